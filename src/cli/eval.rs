//! Evaluate queries against JSON input

use tracing::debug;

use super::{CliError, parse_document};
use crate::{Node, Query};

/// Scalar type the result is coerced to with `--as`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputKind {
    Boolean,
    Int,
    Long,
    Double,
    String,
}

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The query to evaluate
    pub query: String,
    /// JSON input string
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Coerce the result to a scalar
    pub as_kind: Option<OutputKind>,
}

/// Result of an eval operation
#[derive(Debug, PartialEq)]
pub enum EvalResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query evaluated successfully
    Success(Node),
}

const RESULT_LABEL: &str = "the query result";

/// Execute an eval operation
pub fn execute_eval(options: &EvalOptions) -> Result<EvalResult, CliError> {
    let query = Query::compile(&options.query)?;

    if options.syntax_only {
        return Ok(EvalResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document = parse_document(json_str)?;

    debug!(query = %query, as_kind = ?options.as_kind, "executing eval");
    let output = match options.as_kind {
        None => query.eval(&document)?.into_node(),
        Some(OutputKind::Boolean) => Node::from(query.eval_as_boolean(&document)?),
        Some(OutputKind::Int) => Node::from(query.eval_as_int(&document, RESULT_LABEL)?),
        Some(OutputKind::Long) => Node::from(query.eval_as_long(&document, RESULT_LABEL)?),
        Some(OutputKind::Double) => Node::from(query.eval_as_double(&document, RESULT_LABEL)?),
        Some(OutputKind::String) => Node::from(query.eval_as_string(&document, RESULT_LABEL)?),
    };
    Ok(EvalResult::Success(output))
}
