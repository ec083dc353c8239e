use std::fmt;

use crate::node::{NULL, Node};

/// The result of evaluating a path expression.
///
/// A result is either nothing at all, exactly one node, or an ordered vector of
/// nodes produced by a wildcard, a recursive descent, or broadcasting an
/// operator over such a vector.
///
/// # Examples
///
/// ```
/// use jsonpath_eval::{Node, Value};
///
/// let mut out = Vec::new();
/// Value::Single(Node::from(1)).add_to(&mut out);
/// Value::Single(Node::Missing).add_to(&mut out);
/// Value::Vector(vec![Node::from(2), Node::from(3)]).add_to(&mut out);
///
/// assert_eq!(out, vec![Node::from(1), Node::from(2), Node::from(3)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value; materializes as null
    Absent,

    /// One node, possibly [`Node::Missing`]
    Single(Node),

    /// Zero or more nodes in traversal order; never nested
    Vector(Vec<Node>),
}

impl Value {
    /// Appends this value's contributions to a vector under construction.
    ///
    /// Absent contributes nothing, a missing single node is dropped, and a
    /// vector is spliced in element by element so vectors never nest.
    pub fn add_to(self, out: &mut Vec<Node>) {
        match self {
            Value::Absent => {}
            Value::Single(Node::Missing) => {}
            Value::Single(node) => out.push(node),
            Value::Vector(nodes) => out.extend(nodes),
        }
    }

    /// Materializes the value as a single node.
    pub fn to_node(&self) -> Node {
        match self {
            Value::Absent => Node::Null,
            Value::Single(node) => node.clone(),
            Value::Vector(nodes) => Node::Array(nodes.clone()),
        }
    }

    /// Owning variant of [`Value::to_node`].
    pub fn into_node(self) -> Node {
        match self {
            Value::Absent => Node::Null,
            Value::Single(node) => node,
            Value::Vector(nodes) => Node::Array(nodes),
        }
    }

    /// The matched nodes; empty for `Absent` and for a missing single node.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Value::Absent | Value::Single(Node::Missing) => &[],
            Value::Single(node) => std::slice::from_ref(node),
            Value::Vector(nodes) => nodes,
        }
    }

    /// The node a non-vector value stands for: null when absent, `None` for
    /// vectors.
    pub fn scalar(&self) -> Option<&Node> {
        match self {
            Value::Absent => Some(&NULL),
            Value::Single(node) => Some(node),
            Value::Vector(_) => None,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vector(_))
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Single(node)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_node())
    }
}
