//! Error types shared by the lexer, parser, renderer and driver boundary.
//!
//! Every failure carries a stable kind and a message. There are no cause
//! chains: an error means the expression was rejected in full.

/// Stable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    Condition,
    Eval,
    Syntax,
    Malformed,
    Mismatch,
    Parse,
    Unhandled,
}

impl ErrorKind {
    /// Numeric code, stable across releases.
    pub fn code(self) -> u16 {
        1000 + self as u16
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Condition => "condition",
            ErrorKind::Eval => "eval",
            ErrorKind::Syntax => "invalid syntax",
            ErrorKind::Malformed => "malformed",
            ErrorKind::Mismatch => "mismatch",
            ErrorKind::Parse => "parse",
            ErrorKind::Unhandled => "unhandled",
        }
    }
}

/// Errors raised while compiling, rendering or routing an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Rejected by the caller boundary (unknown driver, disallowed field).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Reserved for drivers that cannot honour a condition.
    #[error("condition: {0}")]
    Condition(String),

    /// Reserved for drivers that evaluate expressions.
    #[error("eval: {0}")]
    Eval(String),

    /// Lexing failure, or a keyword the active format cannot render.
    #[error("invalid syntax: {0}")]
    Syntax(String),

    /// A tree that violates its structural invariants.
    #[error("malformed: {0}")]
    Malformed(String),

    /// A value whose type does not fit where it is used.
    #[error("mismatch: {0}")]
    Mismatch(String),

    /// Structural failure in the parser engine.
    #[error("parse: {0}")]
    Parse(String),

    /// A node shape with no rule for the requested operation.
    #[error("unhandled: {0}")]
    Unhandled(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadRequest(_) => ErrorKind::BadRequest,
            Error::Condition(_) => ErrorKind::Condition,
            Error::Eval(_) => ErrorKind::Eval,
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Malformed(_) => ErrorKind::Malformed,
            Error::Mismatch(_) => ErrorKind::Mismatch,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Unhandled(_) => ErrorKind::Unhandled,
        }
    }

    pub fn code(&self) -> u16 {
        self.kind().code()
    }

    pub fn message(&self) -> &str {
        match self {
            Error::BadRequest(m)
            | Error::Condition(m)
            | Error::Eval(m)
            | Error::Syntax(m)
            | Error::Malformed(m)
            | Error::Mismatch(m)
            | Error::Parse(m)
            | Error::Unhandled(m) => m,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
