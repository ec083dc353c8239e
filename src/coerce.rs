//! Conversions from document nodes to Rust scalars.
//!
//! Every target type comes in three strengths:
//!
//! - `as_lenient_*` returns `None` when the node has the wrong kind.
//! - `as_nullable_*` returns `Ok(None)` for a null node and a
//!   [`EvalError::TypeMismatch`] for any other wrong kind.
//! - `as_*` additionally turns a null node into [`EvalError::NullValue`].
//!
//! The strict variants are methods on [`Expr`] so their errors carry the
//! position of the expression doing the conversion. The `label` names the
//! operation in the message, e.g. `"index of selector"`.
//!
//! Booleans are the exception: [`as_boolean`] never fails. See its docs.

use crate::{
    ast::Expr,
    evaluator::EvalError,
    node::{Node, NodeKind},
};

/// A numeric node's value, keeping integers and floats apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

pub fn as_lenient_number(node: &Node) -> Option<Number> {
    match node {
        Node::Integer(n) => Some(Number::Integer(*n)),
        Node::Float(n) => Some(Number::Float(*n)),
        _ => None,
    }
}

/// Any number, truncated toward zero and wrapped to 32 bits.
pub fn as_lenient_int(node: &Node) -> Option<i32> {
    match node {
        Node::Integer(n) => Some(*n as i32),
        Node::Float(n) => Some(*n as i32),
        _ => None,
    }
}

/// Any number, floats truncated toward zero.
pub fn as_lenient_long(node: &Node) -> Option<i64> {
    match node {
        Node::Integer(n) => Some(*n),
        Node::Float(n) => Some(*n as i64),
        _ => None,
    }
}

pub fn as_lenient_double(node: &Node) -> Option<f64> {
    match node {
        Node::Integer(n) => Some(*n as f64),
        Node::Float(n) => Some(*n),
        _ => None,
    }
}

pub fn as_lenient_string(node: &Node) -> Option<&str> {
    match node {
        Node::String(s) => Some(s),
        _ => None,
    }
}

/// Truthiness of a node.
///
/// A boolean node yields its value and the missing sentinel is false. Every
/// other node, null included, is true: a path that selects something
/// satisfies a predicate whatever it selected.
pub fn as_boolean(node: &Node) -> bool {
    match node {
        Node::Boolean(b) => *b,
        Node::Missing => false,
        _ => true,
    }
}

impl Expr {
    fn nullable<'n, T>(
        &self,
        node: &'n Node,
        expected: NodeKind,
        label: &str,
        lenient: impl FnOnce(&'n Node) -> Option<T>,
    ) -> Result<Option<T>, EvalError> {
        if node.is_null() {
            return Ok(None);
        }
        lenient(node)
            .map(Some)
            .ok_or_else(|| EvalError::type_mismatch(self.position(), expected, node, label))
    }

    fn required<T>(&self, value: Option<T>) -> Result<T, EvalError> {
        value.ok_or(EvalError::NullValue {
            position: self.position(),
        })
    }

    pub fn as_nullable_number(&self, node: &Node, label: &str) -> Result<Option<Number>, EvalError> {
        self.nullable(node, NodeKind::Number, label, as_lenient_number)
    }

    pub fn as_number(&self, node: &Node, label: &str) -> Result<Number, EvalError> {
        let n = self.as_nullable_number(node, label)?;
        self.required(n)
    }

    pub fn as_nullable_int(&self, node: &Node, label: &str) -> Result<Option<i32>, EvalError> {
        self.nullable(node, NodeKind::Number, label, as_lenient_int)
    }

    pub fn as_int(&self, node: &Node, label: &str) -> Result<i32, EvalError> {
        let n = self.as_nullable_int(node, label)?;
        self.required(n)
    }

    pub fn as_nullable_long(&self, node: &Node, label: &str) -> Result<Option<i64>, EvalError> {
        self.nullable(node, NodeKind::Number, label, as_lenient_long)
    }

    pub fn as_long(&self, node: &Node, label: &str) -> Result<i64, EvalError> {
        let n = self.as_nullable_long(node, label)?;
        self.required(n)
    }

    pub fn as_nullable_double(&self, node: &Node, label: &str) -> Result<Option<f64>, EvalError> {
        self.nullable(node, NodeKind::Number, label, as_lenient_double)
    }

    pub fn as_double(&self, node: &Node, label: &str) -> Result<f64, EvalError> {
        let n = self.as_nullable_double(node, label)?;
        self.required(n)
    }

    pub fn as_nullable_string<'n>(
        &self,
        node: &'n Node,
        label: &str,
    ) -> Result<Option<&'n str>, EvalError> {
        self.nullable(node, NodeKind::String, label, as_lenient_string)
    }

    pub fn as_string<'n>(&self, node: &'n Node, label: &str) -> Result<&'n str, EvalError> {
        let s = self.as_nullable_string(node, label)?;
        self.required(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr() -> Expr {
        Expr::root(7)
    }

    #[test]
    fn test_lenient_returns_none_on_wrong_kind() {
        assert_eq!(as_lenient_int(&Node::text("1")), None);
        assert_eq!(as_lenient_string(&Node::from(1)), None);
        assert_eq!(as_lenient_number(&Node::Null), None);
        assert_eq!(as_lenient_double(&Node::Missing), None);
    }

    #[test]
    fn test_lenient_numeric_widths() {
        assert_eq!(as_lenient_int(&Node::from(2.9)), Some(2));
        assert_eq!(as_lenient_int(&Node::from(-2.9)), Some(-2));
        assert_eq!(as_lenient_int(&Node::from(1_i64 << 32)), Some(0));
        assert_eq!(as_lenient_long(&Node::from(1_i64 << 32)), Some(1 << 32));
        assert_eq!(as_lenient_double(&Node::from(3)), Some(3.0));
        assert_eq!(as_lenient_number(&Node::from(3)), Some(Number::Integer(3)));
        assert_eq!(as_lenient_number(&Node::from(0.5)), Some(Number::Float(0.5)));
    }

    #[test]
    fn test_nullable_maps_null_to_none() {
        assert_eq!(expr().as_nullable_int(&Node::Null, "x").unwrap(), None);
        assert_eq!(expr().as_nullable_string(&Node::Null, "x").unwrap(), None);
        assert_eq!(expr().as_nullable_double(&Node::from(1), "x").unwrap(), Some(1.0));
    }

    #[test]
    fn test_nullable_type_mismatch() {
        let err = expr().as_nullable_long(&Node::text("abc"), "the limit").unwrap_err();
        assert_eq!(
            err,
            EvalError::TypeMismatch {
                position: 7,
                expected: NodeKind::Number,
                actual: Node::text("abc"),
                label: "the limit".to_string(),
            }
        );
    }

    #[test]
    fn test_strict_rejects_null() {
        let err = expr().as_string(&Node::Null, "name").unwrap_err();
        assert_eq!(err, EvalError::NullValue { position: 7 });
        assert_eq!(expr().as_string(&Node::text("ok"), "name").unwrap(), "ok");
    }

    #[test]
    fn test_missing_is_a_type_mismatch_not_null() {
        let err = expr().as_int(&Node::Missing, "count").unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { .. }));
    }

    #[test]
    fn test_truthiness() {
        assert!(as_boolean(&Node::from(true)));
        assert!(!as_boolean(&Node::from(false)));
        assert!(!as_boolean(&Node::Missing));
        assert!(as_boolean(&Node::Null));
        assert!(as_boolean(&Node::from(0)));
        assert!(as_boolean(&Node::text("")));
        assert!(as_boolean(&Node::array([])));
    }
}
