use std::fmt;

use crate::{ast::BoolOp, lexer::Position, node::Node};

/// A node of a compiled path expression.
///
/// Expressions are immutable once built. The `vector` flag is computed by the
/// constructors from the operators involved and never from a document, so
/// a compiled expression can be shared across threads and documents.
///
/// # Examples
///
/// ```
/// use jsonpath_eval::{Expr, Node};
///
/// // a.*.b
/// let expr = Expr::field(4, Expr::wildcard(1, Expr::field(0, Expr::root(0), "a")), "b");
///
/// assert!(expr.is_vector());
/// assert_eq!(expr.to_string(), "$.a.*.b");
/// assert!(!Expr::literal(0, Node::from(1)).is_vector());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    position: Position,
    vector: bool,
    kind: ExprKind,
}

/// The variants of [`Expr`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Root document reference (`$`)
    Root,

    /// Constant node
    ///
    /// # Example
    /// ```text
    /// "text"  42  true  null
    /// ```
    Literal(Node),

    /// Field or element selected by a computed key
    ///
    /// A textual key selects an object property (missing when absent); a
    /// numeric key selects an array element and raises when out of range.
    ///
    /// # Examples
    /// ```text
    /// a.b
    /// a[0]
    /// a[-1]
    /// a[("b")]
    /// ```
    FieldSelector { object: Box<Expr>, index: Box<Expr> },

    /// Array element at a constant index
    ///
    /// Out of range yields the missing sentinel instead of an error.
    ///
    /// # Example
    /// ```text
    /// a.0
    /// a.-1
    /// ```
    IndexSelector { object: Box<Expr>, index: i64 },

    /// Children of an object, or children of the containers in an array
    ///
    /// # Examples
    /// ```text
    /// a.*
    /// a[*]
    /// ```
    Wildcard { object: Box<Expr> },

    /// Pre-order walk of every container under the operand
    ///
    /// Without a field every container is collected; with a field, the value
    /// of that field in every container holding it.
    ///
    /// # Examples
    /// ```text
    /// a..
    /// a..b
    /// ```
    Descent {
        object: Box<Expr>,
        field: Option<String>,
    },

    /// Short-circuiting `&&` / `||`
    Boolean {
        op: BoolOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn root(position: Position) -> Self {
        Expr {
            position,
            vector: false,
            kind: ExprKind::Root,
        }
    }

    pub fn literal(position: Position, node: Node) -> Self {
        Expr {
            position,
            vector: false,
            kind: ExprKind::Literal(node),
        }
    }

    /// `object.name`, a field selector with a constant textual key.
    pub fn field(position: Position, object: Expr, name: impl Into<String>) -> Self {
        let key = Expr::literal(position, Node::text(name));
        Expr::field_expr(position, object, key)
    }

    /// `object[(index)]`, a field selector with a computed key.
    pub fn field_expr(position: Position, object: Expr, index: Expr) -> Self {
        Expr {
            position,
            vector: object.vector,
            kind: ExprKind::FieldSelector {
                object: Box::new(object),
                index: Box::new(index),
            },
        }
    }

    pub fn index(position: Position, object: Expr, index: i64) -> Self {
        Expr {
            position,
            vector: object.vector,
            kind: ExprKind::IndexSelector {
                object: Box::new(object),
                index,
            },
        }
    }

    pub fn wildcard(position: Position, object: Expr) -> Self {
        Expr {
            position,
            vector: true,
            kind: ExprKind::Wildcard {
                object: Box::new(object),
            },
        }
    }

    pub fn descent(position: Position, object: Expr, field: Option<String>) -> Self {
        Expr {
            position,
            vector: true,
            kind: ExprKind::Descent {
                object: Box::new(object),
                field,
            },
        }
    }

    pub fn boolean(position: Position, op: BoolOp, left: Expr, right: Expr) -> Self {
        Expr {
            position,
            vector: left.vector || right.vector,
            kind: ExprKind::Boolean {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// Character offset of the token this node was parsed from.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Whether evaluation produces a vector of nodes.
    ///
    /// True for wildcards and descents, and for every selector or combinator
    /// with a vector-typed operand.
    pub fn is_vector(&self) -> bool {
        self.vector
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Root => write!(f, "$"),
            ExprKind::Literal(node) => write!(f, "{node}"),
            ExprKind::FieldSelector { object, index } => {
                write_receiver(f, object)?;
                match index.kind() {
                    ExprKind::Literal(Node::String(name)) if is_plain_name(name) => {
                        write!(f, ".{name}")
                    }
                    ExprKind::Literal(Node::Integer(n)) => write!(f, "[{n}]"),
                    _ => write!(f, "[({index})]"),
                }
            }
            ExprKind::IndexSelector { object, index } => {
                write_receiver(f, object)?;
                write!(f, ".{index}")
            }
            ExprKind::Wildcard { object } => {
                write_receiver(f, object)?;
                write!(f, ".*")
            }
            ExprKind::Descent { object, field } => {
                write_receiver(f, object)?;
                match field {
                    Some(field) if is_plain_name(field) => write!(f, "..{field}"),
                    Some(field) => write!(f, "..{}", Node::text(field.as_str())),
                    None => write!(f, ".."),
                }
            }
            ExprKind::Boolean { op, left, right } => {
                write_operand(f, left, |inner| *op == BoolOp::And && inner == BoolOp::Or)?;
                write!(f, " {op} ")?;
                write_operand(f, right, |inner| *op == BoolOp::And || inner == BoolOp::Or)
            }
        }
    }
}

/// Writes the operand a selector applies to. Combinators bind looser than
/// selector steps, and a number followed by `.` would lex as one float.
fn write_receiver(f: &mut fmt::Formatter<'_>, object: &Expr) -> fmt::Result {
    match object.kind() {
        ExprKind::Boolean { .. } | ExprKind::Literal(Node::Integer(_) | Node::Float(_)) => {
            write!(f, "({object})")
        }
        _ => write!(f, "{object}"),
    }
}

/// Parenthesizes a nested combinator when `needs_parens` says its binding
/// would change on re-parsing.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    operand: &Expr,
    needs_parens: impl Fn(BoolOp) -> bool,
) -> fmt::Result {
    match operand.kind() {
        ExprKind::Boolean { op, .. } if needs_parens(*op) => write!(f, "({operand})"),
        _ => write!(f, "{operand}"),
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        && !matches!(name, "true" | "false" | "null" | "and" | "or")
}
