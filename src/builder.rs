//! Build an AST straight from an alternating list of keywords and literals.
//!
//! This skips the lexer and parser. It is meant for callers that compose
//! simple expressions in code and already know which strings are operators:
//!
//! ```
//! use doc_expr::{builder, DefaultFormat, Literal};
//!
//! let terms: Vec<Literal> = vec!["id".into(), "=".into(), 10.into()];
//! let ast = builder::build(terms).unwrap();
//! assert_eq!(ast.render(&DefaultFormat).unwrap(), "id = 10");
//! ```
//!
//! Only the canonical keyword spellings (`AND`, `OR`, `,`, `=`, `==`, `!=`)
//! are operators here. Assignments bind first, then every other operator
//! takes its neighbours from left to right.

use crate::{
    ast::{BinaryOp, Node},
    error::{Error, Result},
    value::Literal,
};

/// A node under construction. Operands stay empty until a pass fills them.
#[derive(Debug)]
enum Slot {
    Value(Literal),
    Binary {
        op: BinaryOp,
        left: Option<Box<Slot>>,
        right: Option<Box<Slot>>,
    },
}

impl Slot {
    fn wrap(literal: Literal) -> Self {
        match literal.as_str().and_then(BinaryOp::from_keyword) {
            Some(op) => Slot::Binary {
                op,
                left: None,
                right: None,
            },
            None => Slot::Value(literal),
        }
    }

    fn into_node(self) -> Result<Node> {
        match self {
            Slot::Value(literal) => Ok(Node::Value(literal)),
            Slot::Binary {
                op,
                left: Some(left),
                right: Some(right),
            } => Ok(Node::binary(op, left.into_node()?, right.into_node()?)),
            // Taken as an operand before its own pass could fill it.
            Slot::Binary { op, left, .. } => Err(Error::Parse(format!(
                "missing {} operand for `{}`",
                if left.is_none() { "left" } else { "right" },
                op.keyword()
            ))),
        }
    }
}

/// Build an AST from keyword and literal terms.
pub fn build<I>(terms: I) -> Result<Node>
where
    I: IntoIterator,
    I::Item: Into<Literal>,
{
    let mut slots: Vec<Option<Slot>> = terms
        .into_iter()
        .map(|t| Some(Slot::wrap(t.into())))
        .collect();

    attach(&mut slots, Some(BinaryOp::Assign))?;
    attach(&mut slots, None)?;

    let mut roots = slots.into_iter().flatten();
    match (roots.next(), roots.next()) {
        (Some(root), None) => root.into_node(),
        (None, _) => Err(Error::Parse("no result".into())),
        (Some(_), Some(_)) => Err(Error::Parse(format!(
            "{} unconsumed terms left after building",
            2 + roots.count()
        ))),
    }
}

/// One binding pass: every operator matching `only` (or every operator,
/// when `None`) takes the nearest remaining term on each empty side.
fn attach(slots: &mut [Option<Slot>], only: Option<BinaryOp>) -> Result<()> {
    let mut last: Option<usize> = None;

    for i in 0..slots.len() {
        let (op, needs_left, needs_right) = match &slots[i] {
            None => continue,
            Some(Slot::Binary { op, left, right }) if only.is_none_or(|o| o == *op) => {
                (*op, left.is_none(), right.is_none())
            }
            Some(_) => {
                last = Some(i);
                continue;
            }
        };

        let new_left = if needs_left {
            let taken = last.and_then(|j| slots[j].take());
            Some(taken.ok_or_else(|| {
                Error::Parse(format!("missing left operand for `{}`", op.keyword()))
            })?)
        } else {
            None
        };
        let new_right = if needs_right {
            let taken = (i + 1..slots.len()).find_map(|j| slots[j].take());
            Some(taken.ok_or_else(|| {
                Error::Parse(format!("missing right operand for `{}`", op.keyword()))
            })?)
        } else {
            None
        };

        if let Some(Slot::Binary { left, right, .. }) = &mut slots[i] {
            if let Some(l) = new_left {
                *left = Some(Box::new(l));
            }
            if let Some(r) = new_right {
                *right = Some(Box::new(r));
            }
        }
        last = Some(i);
    }
    Ok(())
}
