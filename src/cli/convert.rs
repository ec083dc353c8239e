//! JSON text <-> document conversion for the command line

use crate::{Node, to_json, to_json_pretty};

/// Parses JSON text into a document.
pub fn parse_document(text: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(Node::from(value))
}

pub fn render(node: &Node, pretty: bool) -> String {
    if pretty { to_json_pretty(node) } else { to_json(node) }
}
