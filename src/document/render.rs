//! Rendering nodes back to JSON or YAML text.
//!
//! Output follows the current contents of the node, including any changes
//! made through `MapNode::set` or `MapNode::delete_keys`. Formatting and
//! comments of the source are not preserved.

use super::node::Node;
use super::parser::DocumentFormat;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

/// Converts a node into a `serde_json::Value`.
pub fn to_json_value(node: &Node) -> JsonValue {
    JsonValue::from(&node.to_raw())
}

/// Renders a node as JSON.
pub fn to_json_string(node: &Node, pretty: bool) -> Result<String> {
    let value = to_json_value(node);
    let rendered = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    rendered.context("Failed to render JSON")
}

/// Renders a node as a YAML document, without the trailing newline.
pub fn to_yaml_string(node: &Node) -> Result<String> {
    let rendered = serde_yaml::to_string(&to_json_value(node)).context("Failed to render YAML")?;
    Ok(rendered.trim_end().to_string())
}

/// Renders a node in `format`. `pretty` only affects JSON.
pub fn render(node: &Node, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => to_json_string(node, pretty),
        DocumentFormat::Yaml => to_yaml_string(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;

    #[test]
    fn test_compact_json() {
        let node = parse_json(r#"{"b": 1, "a": [true, null]}"#).unwrap();
        assert_eq!(to_json_string(&node, false).unwrap(), r#"{"b":1,"a":[true,null]}"#);
    }

    #[test]
    fn test_pretty_json() {
        let node = parse_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(to_json_string(&node, true).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_yaml_output() {
        let node = parse_json(r#"{"name": "docnav", "tags": ["a", "b"]}"#).unwrap();
        assert_eq!(to_yaml_string(&node).unwrap(), "name: docnav\ntags:\n- a\n- b");
    }

    #[test]
    fn test_render_reflects_mutation() {
        let node = parse_json(r#"{"keep": 1, "drop": 2}"#).unwrap();
        let map = node.as_map().unwrap();
        map.delete_keys(&["drop"]);
        map.set("added", "x");
        assert_eq!(
            render(&node, DocumentFormat::Json, false).unwrap(),
            r#"{"keep":1,"added":"x"}"#
        );
    }
}
