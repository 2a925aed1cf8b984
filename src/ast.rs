//! # Filter Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree for the
//! backend-agnostic filter language. Callers write expressions such as
//!
//! ```text
//! id = 10 AND step = 1
//! ```
//!
//! and a storage backend renders them in its own dialect.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Token symbols and the static token table (binding powers,
//!   prefix and infix rules)
//! - **[operators]** - Binary operators and their canonical keywords
//! - **[expressions]** - The closed set of public AST nodes
//!
//! ## Grammar
//!
//! ```text
//! expr    := term ( (AND|OR|',') term )*
//! term    := operand [ ('='|'=='|'!=') operand ]
//! operand := identifier | quoted-string | number | '(' expr ')'
//! ```
//!
//! ## Binding Powers
//!
//! From loosest to tightest: grouping and values, then `,` / `AND` / `OR`
//! (60), then `==` / `!=` (70), then `=` (80). Assignments therefore cluster
//! before conjunctions combine them:
//!
//! ```text
//! a = 1 AND b = 2   =>   AND(=(a, 1), =(b, 2))
//! ```
//!
//! Operators of equal binding power associate to the left.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Node;
pub use operators::{
    AND_KEYWORD, ASSIGN_KEYWORD, BinaryOp, EQUAL_KEYWORD, LIST_KEYWORD, NOT_EQUAL_KEYWORD,
    OR_KEYWORD,
};
pub use tokens::{Infix, Prefix, Symbol, Token, TokenDef};
