use crate::{ast::BinaryOp, value::Literal};

/// Abstract Syntax Tree node representing a parsed filter expression.
///
/// The tree is strictly owned top-down: every child is boxed and belongs to
/// exactly one parent, so a binary node without both operands cannot be
/// represented.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Binary operation (conjunction, assignment, comparison)
    ///
    /// # Examples
    /// ```text
    /// id = 10
    /// id = 10 AND step = 1
    /// id, form
    /// ```
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Parenthesised sub-expression
    ///
    /// # Example
    /// ```text
    /// (id = 10)
    /// ```
    Group(Box<Node>),

    /// Literal value: a field name, or the value side of an assignment
    Value(Literal),
}

impl Node {
    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn group(child: Node) -> Self {
        Node::Group(Box::new(child))
    }

    pub fn value(literal: impl Into<Literal>) -> Self {
        Node::Value(literal.into())
    }

    /// The literal of a value node.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Value(literal) => Some(literal),
            _ => None,
        }
    }
}
