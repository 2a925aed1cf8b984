use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal carried by a value node.
///
/// The lexer classifies literals syntactically: digit runs become integers,
/// digit runs with a fraction or exponent become floats, and everything else
/// (identifiers, quoted strings, unrecognised glyphs) stays a string.
///
/// # Examples
///
/// ```
/// use doc_expr::Literal;
///
/// assert_eq!(Literal::from(10).to_string(), "10");
/// assert_eq!(Literal::from(2.5).to_string(), "2.5");
/// assert_eq!(Literal::from(1e3).to_string(), "1000.0");
/// assert_eq!(Literal::from(1e19).to_string(), "1e19");
/// assert_eq!(Literal::from("wd-20").to_string(), "wd-20");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Integer number (kept apart from floats)
    Int(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string, unquoted
    String(String),
}

/// The type of a [`Literal`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Int,
    Float,
    String,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Int(_) => LiteralKind::Int,
            Literal::Float(_) => LiteralKind::Float,
            Literal::String(_) => LiteralKind::String,
        }
    }

    /// Get as string slice, if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::String => "string",
        })
    }
}

/// The default textual form: strings verbatim, numbers in a form that lexes
/// back to the same literal. Floats keep a fraction or an exponent (`1000.0`,
/// `1e19`) so they never read back as integers.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(n) => write!(f, "{n:?}"),
            Literal::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Int(n.into())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Float(n)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_owned())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}
