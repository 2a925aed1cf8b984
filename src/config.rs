//! Runtime configuration.
//!
//! Settings come from an optional JSON file and from environment variables,
//! the environment taking precedence.

use serde::{Deserialize, Serialize};

use crate::format::KeywordFormat;

/// Environment variable holding the log filter.
pub const LOG_LEVEL_ENV: &str = "DOC_EXPR_LOG_LEVEL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Log filter, e.g. `warn` or `doc_expr=debug`.
    pub log_level: String,
    /// Dialect used when rendering; `None` renders with the defaults.
    pub dialect: Option<KeywordFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            dialect: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Apply environment overrides on top of this configuration.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        if let Ok(v) = std::env::var(LOG_LEVEL_ENV) {
            if !v.trim().is_empty() {
                self.log_level = v;
            }
        }
        self
    }
}
