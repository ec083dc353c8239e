//! # Path Expression Abstract Syntax Tree
//!
//! A path such as `store.book[0].title` or `a..b && c` is compiled into a tree
//! of [`Expr`] nodes. Each node records the character offset it was parsed from,
//! so evaluation errors point back into the original path text.
//!
//! ## Submodules
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, selectors, combinators)
//! - **[operators]** - Boolean combinators
//!
//! ## Selectors
//!
//! ```text
//! a.b          field `b` of field `a` of the root
//! a[0]         element 0 of `a`; out of range is an error
//! a.0          element 0 of `a`; out of range is missing
//! a[-1]        last element of `a`
//! a[("b")]     computed key
//! a.*  a[*]    children of `a` (flattens one level on arrays)
//! a..  a..b    every container under `a` / every `b` under `a`
//! ```
//!
//! ## Vector Expressions
//!
//! Wildcards and descents produce vectors. Any selector or combinator applied
//! to a vector-typed operand is broadcast over it element by element:
//!
//! ```text
//! a..b.c       field `c` of every `b` found under `a`
//! ```
//!
//! Whether an expression is vector-typed is decided once, when it is built,
//! from the operators it contains; see [`Expr::is_vector`].
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, ExprKind};
pub use operators::BoolOp;
pub use tokens::Token;
