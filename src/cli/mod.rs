//! CLI support for jsonpath-eval
//!
//! Provides programmatic access to the `jpe` commands for embedding in other
//! tools.

mod convert;
mod eval;
mod explain;

pub use convert::{parse_document, render};
pub use eval::{EvalOptions, EvalResult, OutputKind, execute_eval};
pub use explain::{Explanation, explain};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}
