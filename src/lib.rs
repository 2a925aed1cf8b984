pub mod ast;
pub mod builder;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod expr;
pub mod extract;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod value;

pub use ast::{BinaryOp, Node, Symbol, Token};
pub use config::Config;
pub use driver::{Collector, Connection, Db, Driver, Record, Registry, Sink};
pub use error::{Error, ErrorKind, Result};
pub use expr::{CompiledExpr, Expression, FieldPattern, FieldSet, RawExpr, Validator};
pub use extract::{Extract, Fact};
pub use format::{CompositeFormat, DefaultFormat, Format, FormatContext, KeywordFormat, with_defaults};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseNode, Parser, parse};
pub use value::{Literal, LiteralKind};
