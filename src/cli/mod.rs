//! CLI support for doc-expr
//!
//! Provides programmatic access to the CLI operations so other tools can
//! embed them.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, Mode, execute_build, execute_check};
pub use convert::{json_to_literal, literal_to_json, node_to_json};
pub use docs::get_docs_overview;

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Expression rejected
    #[error("Expression error: {0}")]
    Expr(#[from] crate::Error),
    /// JSON parsing or printing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No expression provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
