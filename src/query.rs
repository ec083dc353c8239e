use std::fmt;

use tracing::debug;

use crate::{
    ast::Expr,
    evaluator::{EvalContext, EvalError},
    node::Node,
    parser::{ParseError, parse},
    value::Value,
};

/// A compiled path expression, ready to evaluate against any number of
/// documents.
///
/// # Examples
///
/// ```
/// use jsonpath_eval::{Node, Query, Value};
/// use serde_json::json;
///
/// let query = Query::compile("a.*.b").unwrap();
/// let doc = Node::from(json!({"a": {"x": {"b": 1}, "y": {"b": 2}}}));
///
/// assert!(query.is_vector());
/// assert_eq!(query.eval(&doc).unwrap(), Value::Vector(vec![Node::from(1), Node::from(2)]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    source: String,
    expr: Expr,
}

impl Query {
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        let expr = parse(source)?;
        debug!(source, vector = expr.is_vector(), "compiled query");
        Ok(Query {
            source: source.to_string(),
            expr,
        })
    }

    /// Wraps an expression built without the parser. The source text is its
    /// normalized form.
    pub fn from_expr(expr: Expr) -> Self {
        Query {
            source: expr.to_string(),
            expr,
        }
    }

    pub fn eval(&self, document: &Node) -> Result<Value, EvalError> {
        debug!(query = %self.source, "evaluating");
        self.expr.eval(&EvalContext::new(document)).inspect_err(|e| {
            debug!(query = %self.source, error = %e, "evaluation failed");
        })
    }

    pub fn eval_as_boolean(&self, document: &Node) -> Result<bool, EvalError> {
        self.expr.eval_as_boolean(&EvalContext::new(document))
    }

    pub fn eval_as_int(&self, document: &Node, label: &str) -> Result<i32, EvalError> {
        self.expr.eval_as_int(&EvalContext::new(document), label)
    }

    pub fn eval_as_long(&self, document: &Node, label: &str) -> Result<i64, EvalError> {
        self.expr.eval_as_long(&EvalContext::new(document), label)
    }

    pub fn eval_as_double(&self, document: &Node, label: &str) -> Result<f64, EvalError> {
        self.expr.eval_as_double(&EvalContext::new(document), label)
    }

    pub fn eval_as_string(&self, document: &Node, label: &str) -> Result<String, EvalError> {
        self.expr.eval_as_string(&EvalContext::new(document), label)
    }

    pub fn is_vector(&self) -> bool {
        self.expr.is_vector()
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The text the query was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
