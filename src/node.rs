use std::{collections::BTreeMap, fmt};

/// A node of the JSON document a path is evaluated against.
///
/// Documents are immutable once built; evaluation only reads them and clones
/// the parts it hands back to the caller.
///
/// # Missing
///
/// [`Node::Missing`] is not a JSON value. It is the sentinel returned by a
/// lookup that found nothing (`{"a": 1}.b`) and is kept distinct from
/// [`Node::Null`], which is a real value present in the document.
///
/// # Examples
///
/// ```
/// use jsonpath_eval::Node;
///
/// let doc = Node::object([("a", Node::array([Node::from(1), Node::from(2)]))]);
///
/// assert_eq!(doc.path("a").path_index(1), &Node::from(2));
/// assert!(doc.path("b").is_missing());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// JSON null
    #[default]
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (int and long widths)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered array of nodes
    Array(Vec<Node>),

    /// Object with string keys, iterated in key order
    Object(BTreeMap<String, Node>),

    /// Result of a lookup that found nothing
    Missing,
}

/// The kind of a [`Node`], as named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Missing,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Boolean => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
            NodeKind::Missing => "missing",
        };
        f.write_str(name)
    }
}

static MISSING: Node = Node::Missing;
pub(crate) static NULL: Node = Node::Null;

impl Node {
    /// Builds a string node.
    pub fn text(s: impl Into<String>) -> Self {
        Node::String(s.into())
    }

    /// Builds an array node from its elements, in order.
    pub fn array(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Array(items.into_iter().collect())
    }

    /// Builds an object node from key/value pairs.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Integer(_) | Node::Float(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
            Node::Missing => NodeKind::Missing,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Node::Integer(_) | Node::Float(_))
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, Node::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// Arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    /// Number of elements or properties; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Node::Array(items) => items.len(),
            Node::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when this is an object holding `key`.
    pub fn has(&self, key: &str) -> bool {
        match self {
            Node::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Property lookup that never fails: [`Node::Missing`] when this is not an
    /// object or the key is absent.
    pub fn path(&self, key: &str) -> &Node {
        match self {
            Node::Object(map) => map.get(key).unwrap_or(&MISSING),
            _ => &MISSING,
        }
    }

    /// Element lookup that never fails: [`Node::Missing`] when this is not an
    /// array or the index is outside `0..len`.
    pub fn path_index(&self, index: i64) -> &Node {
        match self {
            Node::Array(items) => usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i))
                .unwrap_or(&MISSING),
            _ => &MISSING,
        }
    }

    /// Array elements or object values, in iteration order. Scalars yield
    /// nothing.
    pub fn children(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match self {
            Node::Array(items) => Box::new(items.iter()),
            Node::Object(map) => Box::new(map.values()),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Boolean(b)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Integer(i64::from(n))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Integer(n)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Float(n)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<serde_json::Value> for Node {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Integer(i),
                // u64 beyond i64::MAX and real floats both land here
                None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            serde_json::Value::Object(obj) => {
                Node::Object(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for serde_json::Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null | Node::Missing => serde_json::Value::Null,
            Node::Boolean(b) => serde_json::Value::Bool(b),
            Node::Integer(i) => serde_json::Value::Number(i.into()),
            Node::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Node::String(s) => serde_json::Value::String(s),
            Node::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Node::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::to_json(self))
    }
}
