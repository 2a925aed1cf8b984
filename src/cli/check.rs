//! Compile expressions for the CLI

use std::sync::Arc;

use super::{CliError, json_to_literal, node_to_json};
use crate::{CompiledExpr, Fact, Format, KeywordFormat, Literal, parse, with_defaults};

/// What to print for a compiled expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// The expression rendered in the active dialect
    #[default]
    Render,
    /// Referenced field names
    Fields,
    /// Structural facts
    Extract,
    /// The parsed tree
    Tree,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to compile
    pub expression: String,
    /// What to produce
    pub mode: Mode,
    /// Only validate syntax, don't render
    pub syntax_only: bool,
    /// Dialect layered over the default format
    pub dialect: Option<KeywordFormat>,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rendered expression text
    Rendered(String),
    /// Fields or facts as JSON
    Output(serde_json::Value),
}

fn format_for(dialect: Option<&KeywordFormat>) -> Arc<dyn Format> {
    with_defaults(dialect.map(|d| Arc::new(d.clone()) as Arc<dyn Format>))
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        parse(&options.expression)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let format = format_for(options.dialect.as_ref());
    let compiled = CompiledExpr::compile(&options.expression, &*format, None)?;

    match options.mode {
        Mode::Render => Ok(CheckResult::Rendered(compiled.rendered().to_owned())),
        Mode::Fields => Ok(CheckResult::Output(serde_json::to_value(compiled.fields())?)),
        Mode::Extract => {
            let mut facts: Vec<Fact> = Vec::new();
            compiled.extract(&mut facts)?;
            Ok(CheckResult::Output(serde_json::to_value(facts)?))
        }
        Mode::Tree => Ok(CheckResult::Output(node_to_json(compiled.ast()))),
    }
}

/// Compile a JSON array of keyword and literal terms, bypassing the parser
pub fn execute_build(terms: &str, dialect: Option<&KeywordFormat>) -> Result<String, CliError> {
    let json: Vec<serde_json::Value> = serde_json::from_str(terms)?;
    let literals: Vec<Literal> = json
        .into_iter()
        .map(|v| {
            json_to_literal(&v).ok_or_else(|| {
                crate::Error::Mismatch(format!("term {v} is not a string or number")).into()
            })
        })
        .collect::<Result<_, CliError>>()?;

    let format = format_for(dialect);
    let compiled = CompiledExpr::from_terms(Some(&*format), literals)?;
    Ok(compiled.rendered().to_owned())
}
