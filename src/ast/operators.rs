use crate::ast::Symbol;

/// Canonical keyword for conjunction.
pub const AND_KEYWORD: &str = "AND";
/// Canonical keyword for assignment.
pub const ASSIGN_KEYWORD: &str = "=";
/// Canonical keyword for the list separator.
pub const LIST_KEYWORD: &str = ",";
/// Canonical keyword for disjunction.
pub const OR_KEYWORD: &str = "OR";
/// Canonical keyword for equality.
pub const EQUAL_KEYWORD: &str = "==";
/// Canonical keyword for inequality.
pub const NOT_EQUAL_KEYWORD: &str = "!=";

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Conjunctions
    /// Logical AND (`AND`, `and`)
    And,
    /// Logical OR (`OR`, `or`)
    Or,
    /// List separator (`,`)
    List,

    /// Assignment (`=`)
    Assign,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
}

impl BinaryOp {
    /// The canonical keyword a format strategy is asked to translate.
    pub fn keyword(self) -> &'static str {
        match self {
            BinaryOp::And => AND_KEYWORD,
            BinaryOp::Or => OR_KEYWORD,
            BinaryOp::List => LIST_KEYWORD,
            BinaryOp::Assign => ASSIGN_KEYWORD,
            BinaryOp::Equal => EQUAL_KEYWORD,
            BinaryOp::NotEqual => NOT_EQUAL_KEYWORD,
        }
    }

    /// Exact, case-sensitive match on the canonical keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            AND_KEYWORD => Some(BinaryOp::And),
            OR_KEYWORD => Some(BinaryOp::Or),
            LIST_KEYWORD => Some(BinaryOp::List),
            ASSIGN_KEYWORD => Some(BinaryOp::Assign),
            EQUAL_KEYWORD => Some(BinaryOp::Equal),
            NOT_EQUAL_KEYWORD => Some(BinaryOp::NotEqual),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        match symbol {
            Symbol::And => Some(BinaryOp::And),
            Symbol::Or => Some(BinaryOp::Or),
            Symbol::List => Some(BinaryOp::List),
            Symbol::Assign => Some(BinaryOp::Assign),
            Symbol::Eql => Some(BinaryOp::Equal),
            Symbol::Neq => Some(BinaryOp::NotEqual),
            _ => None,
        }
    }

    pub fn is_conjunction(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::List)
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, BinaryOp::Equal | BinaryOp::NotEqual)
    }
}
