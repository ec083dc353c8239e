use tracing::trace;

use crate::{
    ast::{Expr, ExprKind},
    broadcast::{dot_product, eval_as_dot_product},
    coerce::as_boolean,
    lexer::Position,
    node::{Node, NodeKind},
    value::Value,
};

/// The document an expression is evaluated against.
///
/// Contexts borrow the document; evaluation never mutates it, so one context
/// can be shared by any number of concurrent evaluations.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// The root document (referred to by `$`)
    pub root: &'a Node,
}

impl<'a> EvalContext<'a> {
    pub fn new(root: &'a Node) -> Self {
        EvalContext { root }
    }
}

/// Errors raised while evaluating an expression.
///
/// Every variant carries the source position of the expression node that
/// raised it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Wrong container kind for a selector, index out of bounds, or vectors
    /// of different lengths under one operator
    #[error("{message} at position {position}")]
    Runtime { position: Position, message: String },

    /// The node is not of the kind an operation requires
    #[error("expected {expected} for {label} but found {} at position {position}", .actual.kind())]
    TypeMismatch {
        position: Position,
        expected: NodeKind,
        actual: Node,
        label: String,
    },

    /// A required value resolved to null
    #[error("null value at position {position}")]
    NullValue { position: Position },
}

/// The category of an [`EvalError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    Runtime,
    TypeMismatch,
    NullValue,
}

impl EvalError {
    pub fn runtime(position: Position, message: impl Into<String>) -> Self {
        EvalError::Runtime {
            position,
            message: message.into(),
        }
    }

    pub fn type_mismatch(position: Position, expected: NodeKind, actual: &Node, label: &str) -> Self {
        EvalError::TypeMismatch {
            position,
            expected,
            actual: actual.clone(),
            label: label.to_string(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EvalError::Runtime { position, .. }
            | EvalError::TypeMismatch { position, .. }
            | EvalError::NullValue { position } => *position,
        }
    }

    pub fn kind(&self) -> EvalErrorKind {
        match self {
            EvalError::Runtime { .. } => EvalErrorKind::Runtime,
            EvalError::TypeMismatch { .. } => EvalErrorKind::TypeMismatch,
            EvalError::NullValue { .. } => EvalErrorKind::NullValue,
        }
    }
}

impl Expr {
    /// Evaluates this expression against the context's document.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonpath_eval::{EvalContext, Node, Value, parse};
    ///
    /// let doc = Node::from(serde_json::json!({"a": [{"b": 1}, {"b": 2}]}));
    /// let ctx = EvalContext::new(&doc);
    ///
    /// assert_eq!(parse("a[-1].b").unwrap().eval(&ctx).unwrap(), Value::Single(Node::from(2)));
    /// assert_eq!(
    ///     parse("a..b").unwrap().eval(&ctx).unwrap(),
    ///     Value::Vector(vec![Node::from(1), Node::from(2)])
    /// );
    /// ```
    pub fn eval(&self, ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
        trace!(position = self.position(), expr = %self, "eval");
        match self.kind() {
            ExprKind::Root => Ok(Value::Single(ctx.root.clone())),
            ExprKind::Literal(node) => Ok(Value::Single(node.clone())),
            ExprKind::FieldSelector { object, index } => self.eval_field(object, index, ctx),
            ExprKind::IndexSelector { object, index } => {
                eval_as_dot_product(self.position(), &[&**object], ctx, |row| {
                    self.select_index(row[0], *index).map(Value::Single)
                })
            }
            ExprKind::Wildcard { object } => {
                eval_as_dot_product(self.position(), &[&**object], ctx, |row| {
                    self.wildcard_children(row[0]).map(Value::Vector)
                })
            }
            ExprKind::Descent { object, field } => {
                eval_as_dot_product(self.position(), &[&**object], ctx, |row| {
                    let mut out = Vec::new();
                    descend(row[0], field.as_deref(), &mut out);
                    Ok(Value::Vector(out))
                })
            }
            ExprKind::Boolean { op, left, right } => {
                let left = left.eval(ctx)?;
                if let Some(node) = left.scalar() {
                    let b = as_boolean(node);
                    if b == op.short_circuits_on() {
                        trace!(position = self.position(), %op, "short circuit");
                        return Ok(Value::Single(Node::Boolean(b)));
                    }
                }
                let right = right.eval(ctx)?;
                dot_product(self.position(), &[left, right], |row| {
                    let b = op.apply(as_boolean(row[0]), as_boolean(row[1]));
                    Ok(Value::Single(Node::Boolean(b)))
                })
            }
        }
    }

    fn eval_field(&self, object: &Expr, index: &Expr, ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
        let object = object.eval(ctx)?;
        if matches!(&object, Value::Vector(nodes) if nodes.is_empty()) {
            return Ok(Value::Vector(Vec::new()));
        }
        // The key does not depend on the row, so it is computed once
        let key = index.eval(ctx)?.into_node();
        dot_product(self.position(), &[object], |row| {
            self.select_field(row[0], &key).map(Value::Single)
        })
    }

    fn select_field(&self, o: &Node, key: &Node) -> Result<Node, EvalError> {
        if key.is_textual() {
            if !o.is_object() {
                return Err(EvalError::runtime(
                    self.position(),
                    format!("field selector must apply on an object, not a {}", o.kind()),
                ));
            }
            let name = self.as_string(key, "index of selector")?;
            return Ok(o.path(name).clone());
        }
        if key.is_number() {
            let Node::Array(items) = o else {
                return Err(EvalError::runtime(
                    self.position(),
                    format!("field selector must apply on an array, not a {}", o.kind()),
                ));
            };
            let n = i64::from(self.as_int(key, "the index of the array")?);
            let size = items.len() as i64;
            if n >= size {
                return Err(EvalError::runtime(
                    self.position(),
                    format!("index out of bound {n} > {}", size - 1),
                ));
            }
            if n < -size {
                return Err(EvalError::runtime(
                    self.position(),
                    format!("index out of bound {n} < {}", -size),
                ));
            }
            let n = if n < 0 { size + n } else { n };
            return Ok(o.path_index(n).clone());
        }
        Err(EvalError::type_mismatch(
            self.position(),
            NodeKind::Number,
            key,
            "the index of the array",
        ))
    }

    /// Out of range yields the missing sentinel.
    fn select_index(&self, o: &Node, index: i64) -> Result<Node, EvalError> {
        let Node::Array(items) = o else {
            return Err(EvalError::runtime(
                self.position(),
                format!("index selector must apply on an array, not a {}", o.kind()),
            ));
        };
        let size = items.len() as i64;
        let n = if index < 0 { size + index } else { index };
        Ok(o.path_index(n).clone())
    }

    fn wildcard_children(&self, node: &Node) -> Result<Vec<Node>, EvalError> {
        match node {
            Node::Array(items) => Ok(items.iter().flat_map(Node::children).cloned().collect()),
            Node::Object(map) => Ok(map.values().cloned().collect()),
            other => Err(EvalError::runtime(
                self.position(),
                format!("wildcard cannot be applied to {}", other.kind()),
            )),
        }
    }

    /// Evaluates and coerces to a boolean. Never fails on the result's kind.
    pub fn eval_as_boolean(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(as_boolean(&self.eval(ctx)?.into_node()))
    }

    pub fn eval_as_int(&self, ctx: &EvalContext<'_>, label: &str) -> Result<i32, EvalError> {
        self.as_int(&self.eval(ctx)?.into_node(), label)
    }

    pub fn eval_as_long(&self, ctx: &EvalContext<'_>, label: &str) -> Result<i64, EvalError> {
        self.as_long(&self.eval(ctx)?.into_node(), label)
    }

    pub fn eval_as_double(&self, ctx: &EvalContext<'_>, label: &str) -> Result<f64, EvalError> {
        self.as_double(&self.eval(ctx)?.into_node(), label)
    }

    pub fn eval_as_string(&self, ctx: &EvalContext<'_>, label: &str) -> Result<String, EvalError> {
        let node = self.eval(ctx)?.into_node();
        self.as_string(&node, label).map(str::to_string)
    }
}

/// Pre-order walk appending containers, or the `field` values they hold.
fn descend(node: &Node, field: Option<&str>, out: &mut Vec<Node>) {
    if !node.is_container() {
        return;
    }
    match field {
        None => out.push(node.clone()),
        Some(field) if node.has(field) => out.push(node.path(field).clone()),
        Some(_) => {}
    }
    for child in node.children() {
        descend(child, field, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::BoolOp, parser::parse};
    use serde_json::json;

    fn eval(path: &str, doc: serde_json::Value) -> Result<Value, EvalError> {
        let doc = Node::from(doc);
        parse(path).unwrap().eval(&EvalContext::new(&doc))
    }

    fn ints(values: &[i64]) -> Value {
        Value::Vector(values.iter().map(|i| Node::from(*i)).collect())
    }

    fn runtime_message(err: EvalError) -> String {
        match err {
            EvalError::Runtime { message, .. } => message,
            other => panic!("expected runtime error, got {other:?}"),
        }
    }

    #[test]
    fn test_root_and_literal() {
        assert_eq!(eval("$", json!(1)).unwrap(), Value::Single(Node::from(1)));
        assert_eq!(eval("\"x\"", json!(null)).unwrap(), Value::Single(Node::text("x")));
    }

    #[test]
    fn test_absent_field_is_missing_not_error() {
        let v = eval("a.zz", json!({"a": {"b": 1}})).unwrap();
        assert_eq!(v, Value::Single(Node::Missing));
        assert!(v.nodes().is_empty());
    }

    #[test]
    fn test_field_on_non_object() {
        let err = eval("a.b", json!({"a": [1]})).unwrap_err();
        assert_eq!(err.position(), 1);
        assert_eq!(runtime_message(err), "field selector must apply on an object, not a array");
    }

    #[test]
    fn test_bracket_index_with_negative_wrap() {
        let doc = json!({"a": [10, 20, 30]});
        assert_eq!(eval("a[0]", doc.clone()).unwrap(), Value::Single(Node::from(10)));
        assert_eq!(eval("a[-1]", doc.clone()).unwrap(), Value::Single(Node::from(30)));
        assert_eq!(eval("a[-3]", doc).unwrap(), Value::Single(Node::from(10)));
    }

    #[test]
    fn test_bracket_index_out_of_bounds_raises() {
        let doc = json!({"a": [10, 20, 30]});
        assert_eq!(runtime_message(eval("a[3]", doc.clone()).unwrap_err()), "index out of bound 3 > 2");
        assert_eq!(runtime_message(eval("a[-4]", doc).unwrap_err()), "index out of bound -4 < -3");
    }

    #[test]
    fn test_float_index_truncates() {
        let doc = json!({"a": [10, 20, 30]});
        assert_eq!(eval("a[1.9]", doc).unwrap(), Value::Single(Node::from(20)));
    }

    #[test]
    fn test_numeric_key_on_object() {
        let err = eval("a[0]", json!({"a": {"b": 1}})).unwrap_err();
        assert_eq!(runtime_message(err), "field selector must apply on an array, not a object");
    }

    #[test]
    fn test_boolean_key_is_type_mismatch() {
        let err = eval("a[(true)]", json!({"a": [1]})).unwrap_err();
        assert_eq!(err.kind(), EvalErrorKind::TypeMismatch);
        assert_eq!(
            err,
            EvalError::TypeMismatch {
                position: 1,
                expected: NodeKind::Number,
                actual: Node::from(true),
                label: "the index of the array".to_string(),
            }
        );
    }

    #[test]
    fn test_null_key_is_type_mismatch() {
        let err = eval("a[null]", json!({"a": [1]})).unwrap_err();
        assert_eq!(err.kind(), EvalErrorKind::TypeMismatch);
    }

    #[test]
    fn test_dotted_index_out_of_range_is_missing() {
        let doc = json!({"a": [10, 20, 30]});
        assert_eq!(eval("a.1", doc.clone()).unwrap(), Value::Single(Node::from(20)));
        assert_eq!(eval("a.-1", doc.clone()).unwrap(), Value::Single(Node::from(30)));
        assert_eq!(eval("a.5", doc.clone()).unwrap(), Value::Single(Node::Missing));
        assert_eq!(eval("a.-4", doc).unwrap(), Value::Single(Node::Missing));
    }

    #[test]
    fn test_dotted_index_on_non_array() {
        let err = eval("a.0", json!({"a": "text"})).unwrap_err();
        assert_eq!(runtime_message(err), "index selector must apply on an array, not a string");
    }

    #[test]
    fn test_wildcard_on_object_yields_values() {
        let v = eval("a.*", json!({"a": {"x": 1, "y": 2}})).unwrap();
        assert_eq!(v, ints(&[1, 2]));
    }

    #[test]
    fn test_wildcard_on_array_flattens_inner_level() {
        let v = eval("a.*", json!({"a": [[1, 2], {"k": 3}, 4]})).unwrap();
        assert_eq!(v, ints(&[1, 2, 3]));
    }

    #[test]
    fn test_wildcard_on_scalar() {
        let err = eval("a.*", json!({"a": 1})).unwrap_err();
        assert_eq!(runtime_message(err), "wildcard cannot be applied to number");
    }

    #[test]
    fn test_field_broadcasts_over_vector() {
        let v = eval("a.*.b", json!({"a": {"x": {"b": 1}, "y": {"b": 2}, "z": {"c": 3}}})).unwrap();
        assert_eq!(v, ints(&[1, 2]));
    }

    #[test]
    fn test_field_over_empty_vector_skips_key() {
        let v = eval("a.*[$.nope.x]", json!({"a": {}})).unwrap();
        assert_eq!(v, Value::Vector(vec![]));
    }

    #[test]
    fn test_descent_with_field() {
        let v = eval("a..b", json!({"a": {"b": 1, "c": {"b": 2}}})).unwrap();
        assert_eq!(v, ints(&[1, 2]));
    }

    #[test]
    fn test_descent_without_field_collects_containers() {
        let v = eval("..", json!({"a": [1, {"b": 2}]})).unwrap();
        assert_eq!(
            v,
            Value::Vector(vec![
                Node::from(json!({"a": [1, {"b": 2}]})),
                Node::from(json!([1, {"b": 2}])),
                Node::from(json!({"b": 2})),
            ])
        );
    }

    #[test]
    fn test_descent_on_scalar_is_empty() {
        assert_eq!(eval("a..", json!({"a": 1})).unwrap(), Value::Vector(vec![]));
    }

    #[test]
    fn test_and_short_circuits() {
        // the right side would fail if evaluated
        let v = eval("false && a.*", json!({"a": 1})).unwrap();
        assert_eq!(v, Value::Single(Node::from(false)));
        assert_eq!(eval("true && false", json!(null)).unwrap(), Value::Single(Node::from(false)));
    }

    #[test]
    fn test_or_short_circuits() {
        let v = eval("a || b.*", json!({"a": 0, "b": 1})).unwrap();
        assert_eq!(v, Value::Single(Node::from(true)));
    }

    #[test]
    fn test_missing_operand_is_false() {
        let doc = json!({"a": true});
        assert_eq!(eval("a && nope", doc.clone()).unwrap(), Value::Single(Node::from(false)));
        assert_eq!(eval("nope || a", doc).unwrap(), Value::Single(Node::from(true)));
    }

    #[test]
    fn test_boolean_broadcasts_over_vectors() {
        let doc = json!({"x": [[true, true, false]], "y": [[true, false, false]]});
        let and = eval("x.* && y.*", doc.clone()).unwrap();
        assert_eq!(and, Value::Vector(vec![true.into(), false.into(), false.into()]));
        let or = eval("x.* || y.*", doc).unwrap();
        assert_eq!(or, Value::Vector(vec![true.into(), true.into(), false.into()]));
    }

    #[test]
    fn test_boolean_incompatible_sizes() {
        let doc = json!({"x": [[true, true]], "y": [[true]]});
        let err = eval("x.* && y.*", doc).unwrap_err();
        assert_eq!(err.position(), 4);
        assert_eq!(runtime_message(err), "dot product of incompatible sizes: 2 vs 1");
    }

    #[test]
    fn test_error_position_is_of_the_failing_node() {
        let err = eval("a.b.c.*", json!({"a": {"b": {"c": 5}}})).unwrap_err();
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn test_typed_helpers() {
        let doc = Node::from(json!({"n": 3, "f": 2.5, "s": "hi", "z": null}));
        let ctx = EvalContext::new(&doc);
        let p = |s: &str| parse(s).unwrap();

        assert_eq!(p("n").eval_as_int(&ctx, "n").unwrap(), 3);
        assert_eq!(p("f").eval_as_long(&ctx, "f").unwrap(), 2);
        assert_eq!(p("n").eval_as_double(&ctx, "n").unwrap(), 3.0);
        assert_eq!(p("s").eval_as_string(&ctx, "s").unwrap(), "hi");
        assert_eq!(p("z").eval_as_string(&ctx, "z").unwrap_err(), EvalError::NullValue { position: 0 });
        assert_eq!(p("s").eval_as_int(&ctx, "s").unwrap_err().kind(), EvalErrorKind::TypeMismatch);
        assert!(p("z").eval_as_boolean(&ctx).unwrap());
        assert!(!p("nope").eval_as_boolean(&ctx).unwrap());
    }

    #[test]
    fn test_manually_built_expression() {
        let doc = Node::from(json!({"a": true}));
        let expr = Expr::boolean(
            0,
            BoolOp::And,
            Expr::field(0, Expr::root(0), "a"),
            Expr::literal(0, Node::from(true)),
        );
        assert!(expr.eval_as_boolean(&EvalContext::new(&doc)).unwrap());
    }

    #[test]
    fn test_error_display() {
        let err = EvalError::type_mismatch(3, NodeKind::String, &Node::from(1), "index of selector");
        assert_eq!(
            err.to_string(),
            "expected string for index of selector but found number at position 3"
        );
        assert_eq!(EvalError::NullValue { position: 2 }.to_string(), "null value at position 2");
    }
}
