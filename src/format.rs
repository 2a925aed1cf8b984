//! Format strategies: how a backend spells keywords and values.
//!
//! A [`Format`] translates canonical keywords (`AND`, `=`, ...) into a
//! backend's syntax and renders literals that sit in value position. Backends
//! usually override a handful of spellings and wrap their strategy with
//! [`with_defaults`] so everything else falls back to [`DefaultFormat`].

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    ast::{AND_KEYWORD, ASSIGN_KEYWORD, EQUAL_KEYWORD, LIST_KEYWORD, NOT_EQUAL_KEYWORD, OR_KEYWORD},
    error::{Error, Result},
    value::{Literal, LiteralKind},
};

/// Where a node sits while a tree is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatContext {
    /// Structural position, e.g. a field reference.
    #[default]
    Structural,
    /// The right-hand side of an assignment.
    Value,
}

/// Rules used when converting an AST to text.
pub trait Format: Send + Sync {
    /// Translate a canonical keyword, e.g. `AND` might become ` && `.
    /// `None` or an empty string means the keyword is unsupported.
    fn keyword(&self, name: &str) -> Option<String>;

    /// Render a literal that sits in value position.
    fn value(&self, literal: &Literal) -> Result<String>;
}

impl<F: Format + ?Sized> Format for Arc<F> {
    fn keyword(&self, name: &str) -> Option<String> {
        (**self).keyword(name)
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        (**self).value(literal)
    }
}

impl<F: Format + ?Sized> Format for &F {
    fn keyword(&self, name: &str) -> Option<String> {
        (**self).keyword(name)
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        (**self).value(literal)
    }
}

/// Fixed spellings with single spaces, values in their default textual form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormat;

impl Format for DefaultFormat {
    fn keyword(&self, name: &str) -> Option<String> {
        let spelled = match name {
            AND_KEYWORD => " AND ",
            OR_KEYWORD => " OR ",
            LIST_KEYWORD => ", ",
            ASSIGN_KEYWORD => " = ",
            EQUAL_KEYWORD => " == ",
            NOT_EQUAL_KEYWORD => " != ",
            _ => return None,
        };
        Some(spelled.to_owned())
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        Ok(literal.to_string())
    }
}

/// Tries a primary strategy first and falls back to [`DefaultFormat`].
pub struct CompositeFormat {
    primary: Arc<dyn Format>,
    fallback: DefaultFormat,
}

impl CompositeFormat {
    pub fn new(primary: Arc<dyn Format>) -> Self {
        CompositeFormat {
            primary,
            fallback: DefaultFormat,
        }
    }
}

impl Format for CompositeFormat {
    fn keyword(&self, name: &str) -> Option<String> {
        self.primary
            .keyword(name)
            .filter(|s| !s.is_empty())
            .or_else(|| self.fallback.keyword(name))
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        self.primary
            .value(literal)
            .or_else(|_| self.fallback.value(literal))
    }
}

impl std::fmt::Debug for CompositeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeFormat").finish_non_exhaustive()
    }
}

/// The supplied format with default behaviour for anything it leaves
/// unhandled, or the default format alone.
pub fn with_defaults(format: Option<Arc<dyn Format>>) -> Arc<dyn Format> {
    match format {
        Some(primary) => Arc::new(CompositeFormat::new(primary)),
        None => Arc::new(DefaultFormat),
    }
}

/// A data-driven dialect, typically loaded from configuration.
///
/// # Example
///
/// ```
/// use doc_expr::{parse, with_defaults, KeywordFormat};
/// use std::sync::Arc;
///
/// let dialect: KeywordFormat =
///     serde_json::from_str(r#"{"keywords": {"AND": " && "}, "quote": "'"}"#).unwrap();
/// let format = with_defaults(Some(Arc::new(dialect)));
/// let ast = parse("id = tree and step = 1").unwrap();
/// assert_eq!(ast.render(&format).unwrap(), "id = 'tree' && step = 1");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordFormat {
    /// Canonical keyword to rendered spelling, spacing included.
    pub keywords: HashMap<String, String>,
    /// Quote character wrapped around string values.
    pub quote: Option<char>,
    /// Literal kinds this dialect refuses to render.
    pub unsupported: Vec<LiteralKind>,
}

impl KeywordFormat {
    pub fn keyword_spelling(mut self, keyword: &str, spelling: &str) -> Self {
        self.keywords.insert(keyword.to_owned(), spelling.to_owned());
        self
    }

    pub fn quoted(mut self, quote: char) -> Self {
        self.quote = Some(quote);
        self
    }
}

impl Format for KeywordFormat {
    fn keyword(&self, name: &str) -> Option<String> {
        self.keywords.get(name).cloned()
    }

    fn value(&self, literal: &Literal) -> Result<String> {
        if self.unsupported.contains(&literal.kind()) {
            return Err(Error::Mismatch(format!("unsupported value type {}", literal.kind())));
        }
        match (literal, self.quote) {
            (Literal::String(s), Some(q)) => {
                let doubled: String = [q, q].iter().collect();
                let escaped = s.replace(q, &doubled);
                Ok(format!("{q}{escaped}{q}"))
            }
            _ => Ok(literal.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spellings() {
        assert_eq!(DefaultFormat.keyword("AND").as_deref(), Some(" AND "));
        assert_eq!(DefaultFormat.keyword(",").as_deref(), Some(", "));
        assert_eq!(DefaultFormat.keyword("and"), None);
    }

    #[test]
    fn test_composite_falls_back_on_empty_keyword() {
        let primary = KeywordFormat::default().keyword_spelling("AND", "");
        let composite = CompositeFormat::new(Arc::new(primary));
        assert_eq!(composite.keyword("AND").as_deref(), Some(" AND "));
    }

    #[test]
    fn test_quote_is_doubled_inside_values() {
        let format = KeywordFormat::default().quoted('\'');
        let rendered = format.value(&Literal::from("o'neil")).unwrap();
        assert_eq!(rendered, "'o''neil'");
    }
}
