//! Structural extraction: hand a caller the shape of an expression without
//! going through text.
//!
//! A driver that builds its own native query implements [`Extract`] and walks
//! the tree with [`Node::extract`]:
//!
//! ```
//! use doc_expr::{parse, Fact};
//!
//! let ast = parse("id = 10 AND step = 1").unwrap();
//! let mut facts: Vec<Fact> = Vec::new();
//! ast.extract(&mut facts).unwrap();
//! assert_eq!(
//!     facts,
//!     vec![
//!         Fact::conjunction("AND"),
//!         Fact::assignment("id", "10"),
//!         Fact::assignment("step", "1"),
//!     ]
//! );
//! ```

use serde::Serialize;

use crate::{
    ast::{BinaryOp, Node},
    error::Result,
};

/// Receives structural facts from [`Node::extract`].
pub trait Extract {
    /// A conjunction (`AND`, `OR`, `,`). Both operands are walked next.
    fn conjunction(&mut self, keyword: &str) -> Result<()>;

    /// An assignment whose operands are both literal values.
    fn assignment(&mut self, field: &str, value: &str) -> Result<()>;

    /// A comparison (`==`, `!=`) whose operands are both literal values.
    fn comparison(&mut self, keyword: &str, lhs: &str, rhs: &str) -> Result<()> {
        let _ = (keyword, lhs, rhs);
        Ok(())
    }
}

impl Node {
    /// Walk the tree, reporting conjunctions, assignments and comparisons.
    ///
    /// Assignments and comparisons with a non-literal operand are skipped
    /// without error. Groups are transparent.
    pub fn extract(&self, visitor: &mut dyn Extract) -> Result<()> {
        match self {
            Node::Value(_) => Ok(()),
            Node::Group(child) => child.extract(visitor),
            Node::Binary { op, left, right } if op.is_conjunction() => {
                visitor.conjunction(op.keyword())?;
                left.extract(visitor)?;
                right.extract(visitor)
            }
            Node::Binary { op, left, right } => {
                let (Some(lhs), Some(rhs)) = (left.as_literal(), right.as_literal()) else {
                    return Ok(());
                };
                let (lhs, rhs) = (lhs.to_string(), rhs.to_string());
                match op {
                    BinaryOp::Assign => visitor.assignment(&lhs, &rhs),
                    _ => visitor.comparison(op.keyword(), &lhs, &rhs),
                }
            }
        }
    }
}

/// One extracted fact, as collected by `Vec<Fact>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fact {
    Conjunction(String),
    Assignment { field: String, value: String },
    Comparison { keyword: String, lhs: String, rhs: String },
}

impl Fact {
    pub fn conjunction(keyword: &str) -> Self {
        Fact::Conjunction(keyword.to_owned())
    }

    pub fn assignment(field: &str, value: &str) -> Self {
        Fact::Assignment {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }

    pub fn comparison(keyword: &str, lhs: &str, rhs: &str) -> Self {
        Fact::Comparison {
            keyword: keyword.to_owned(),
            lhs: lhs.to_owned(),
            rhs: rhs.to_owned(),
        }
    }
}

impl Extract for Vec<Fact> {
    fn conjunction(&mut self, keyword: &str) -> Result<()> {
        self.push(Fact::conjunction(keyword));
        Ok(())
    }

    fn assignment(&mut self, field: &str, value: &str) -> Result<()> {
        self.push(Fact::assignment(field, value));
        Ok(())
    }

    fn comparison(&mut self, keyword: &str, lhs: &str, rhs: &str) -> Result<()> {
        self.push(Fact::comparison(keyword, lhs, rhs));
        Ok(())
    }
}
