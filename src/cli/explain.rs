//! Describe a compiled query without evaluating it

use std::fmt;

use super::CliError;
use crate::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// Normalized form of the query
    pub normalized: String,
    /// Whether the query produces a vector of nodes
    pub vector: bool,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "expression: {}", self.normalized)?;
        write!(f, "result: {}", if self.vector { "vector" } else { "single" })
    }
}

pub fn explain(query: &str) -> Result<Explanation, CliError> {
    let query = Query::compile(query)?;
    Ok(Explanation {
        normalized: query.to_string(),
        vector: query.is_vector(),
    })
}
