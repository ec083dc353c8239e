//! JSON rendering of document nodes and evaluation results.
//!
//! Output is deterministic: object keys come out in the document's key order,
//! floats always keep a fractional part so they read back as floats, and the
//! [`Node::Missing`] sentinel renders as `null`.
//!
//! ```
//! use jsonpath_eval::Node;
//! use jsonpath_eval::output::{to_json, to_json_pretty};
//!
//! let node = Node::object([("a", Node::array([Node::from(1), Node::from(2.0)]))]);
//!
//! assert_eq!(to_json(&node), r#"{"a":[1,2.0]}"#);
//! assert_eq!(to_json_pretty(&node), "{\n  \"a\": [\n    1,\n    2.0\n  ]\n}");
//! ```

use std::fmt::Write;

use crate::node::Node;

struct JsonPrinter {
    pretty: bool,
    out: String,
}

impl JsonPrinter {
    fn new(pretty: bool) -> Self {
        JsonPrinter {
            pretty,
            out: String::new(),
        }
    }

    fn print(mut self, node: &Node) -> String {
        self.print_node(node, 0);
        self.out
    }

    fn print_node(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Null | Node::Missing => self.out.push_str("null"),
            Node::Boolean(b) => {
                let _ = write!(self.out, "{b}");
            }
            Node::Integer(n) => {
                let _ = write!(self.out, "{n}");
            }
            Node::Float(n) => self.print_float(*n),
            Node::String(s) => self.print_string(s),
            Node::Array(items) => {
                if items.is_empty() {
                    self.out.push_str("[]");
                    return;
                }
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    self.separator(i, indent + 1);
                    self.print_node(item, indent + 1);
                }
                self.close(']', indent);
            }
            Node::Object(map) => {
                if map.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    self.separator(i, indent + 1);
                    self.print_string(key);
                    self.out.push_str(if self.pretty { ": " } else { ":" });
                    self.print_node(value, indent + 1);
                }
                self.close('}', indent);
            }
        }
    }

    fn print_float(&mut self, n: f64) {
        if !n.is_finite() {
            self.out.push_str("null");
        } else if n.fract() == 0.0 && n.abs() < 1e16 {
            let _ = write!(self.out, "{n:.1}");
        } else {
            let _ = write!(self.out, "{n}");
        }
    }

    fn separator(&mut self, i: usize, level: usize) {
        if i > 0 {
            self.out.push(',');
        }
        if self.pretty {
            self.out.push('\n');
            self.indent(level);
        }
    }

    fn close(&mut self, bracket: char, level: usize) {
        if self.pretty {
            self.out.push('\n');
            self.indent(level);
        }
        self.out.push(bracket);
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str("  ");
        }
    }

    fn print_string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

/// Renders a node as compact JSON.
pub fn to_json(node: &Node) -> String {
    JsonPrinter::new(false).print(node)
}

/// Renders a node as JSON with two-space indentation, one element or property
/// per line.
pub fn to_json_pretty(node: &Node) -> String {
    JsonPrinter::new(true).print(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(to_json(&Node::Null), "null");
        assert_eq!(to_json(&Node::Missing), "null");
        assert_eq!(to_json(&Node::from(false)), "false");
        assert_eq!(to_json(&Node::from(-7)), "-7");
        assert_eq!(to_json(&Node::from(2.5)), "2.5");
        assert_eq!(to_json(&Node::from(3.0)), "3.0");
        assert_eq!(to_json(&Node::from(f64::NAN)), "null");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(to_json(&Node::text("a\"b\\c\n")), r#""a\"b\\c\n""#);
        assert_eq!(to_json(&Node::text("\u{1}")), r#""\u0001""#);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_json_pretty(&Node::array([])), "[]");
        assert_eq!(to_json_pretty(&Node::object::<&str>([])), "{}");
    }

    #[test]
    fn test_keys_in_order() {
        let node = Node::object([("b", Node::from(1)), ("a", Node::from(2))]);
        assert_eq!(to_json(&node), r#"{"a":2,"b":1}"#);
    }
}
