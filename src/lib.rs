pub mod ast;
mod broadcast;
pub mod coerce;
pub mod evaluator;
pub mod lexer;
pub mod node;
pub mod output;
pub mod parser;
pub mod query;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BoolOp, Expr, ExprKind, Token};
pub use evaluator::{EvalContext, EvalError, EvalErrorKind};
pub use lexer::{LexError, Lexer, Position};
pub use node::{Node, NodeKind};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use query::Query;
pub use value::Value;
