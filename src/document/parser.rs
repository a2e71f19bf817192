//! Decoding JSON and YAML text into nodes.
//!
//! Both decoders produce the same raw [`Value`] tree, so a document reads the
//! same through the node API whichever format it came from. Map entries keep
//! their source order.
//!
//! YAML is brought into the JSON data model on the way in: merge keys
//! (`<<`) are applied, tags are dropped, scalar keys are turned into strings
//! and non-finite floats are rejected.
//!
//! # Example
//!
//! ```
//! use docnav::document::parser::{parse_json_to_map, parse_yaml_to_map};
//!
//! let from_json = parse_json_to_map(r#"{"server": {"port": 8080}}"#).unwrap();
//! let from_yaml = parse_yaml_to_map("server:\n  port: 8080\n").unwrap();
//!
//! assert_eq!(from_json, from_yaml);
//! assert_eq!(from_yaml.get_to_string(&["server", "port"]).unwrap(), "8080");
//! ```

use super::node::{wrap, MapNode, Node};
use super::value::Value;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use serde_json::Number;
use serde_yaml::Value as YamlValue;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension, looking through a trailing
    /// `.gz`. Returns `None` for unknown extensions.
    ///
    /// - `data.json`, `data.json.gz` → `Json`
    /// - `data.yml`, `data.yaml.gz` → `Yaml`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path_str = path.as_ref().to_string_lossy().to_ascii_lowercase();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".json") {
            Some(DocumentFormat::Json)
        } else if base.ends_with(".yml") || base.ends_with(".yaml") {
            Some(DocumentFormat::Yaml)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => bail!("unknown document format '{}', expected json or yaml", other),
        }
    }
}

/// Parses a JSON string into a node.
///
/// Fails on malformed JSON and on a document that is just `null`.
pub fn parse_json(json_str: &str) -> Result<Node> {
    let json: serde_json::Value = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    finish(Value::from(json), DocumentFormat::Json)
}

/// Parses a YAML string into a node.
///
/// Fails on malformed YAML, on multi-document streams, on mapping keys that
/// are themselves collections, and on an empty or `null` document.
pub fn parse_yaml(yaml_str: &str) -> Result<Node> {
    let yaml: YamlValue = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    finish(convert_yaml_document(yaml)?, DocumentFormat::Yaml)
}

/// Parses raw bytes in the given format. The bytes must be UTF-8.
pub fn parse_bytes(bytes: &[u8], format: DocumentFormat) -> Result<Node> {
    match format {
        DocumentFormat::Json => {
            let json: serde_json::Value =
                serde_json::from_slice(bytes).context("Failed to parse JSON")?;
            finish(Value::from(json), format)
        }
        DocumentFormat::Yaml => {
            let yaml: YamlValue = serde_yaml::from_slice(bytes).context("Failed to parse YAML")?;
            finish(convert_yaml_document(yaml)?, format)
        }
    }
}

/// Parses text of unknown format: JSON first, then YAML.
///
/// Text that is valid JSON is never retried as YAML, so a JSON `null`
/// document fails as empty input.
pub fn parse_auto(content: &str) -> Result<Node> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(json) => finish(Value::from(json), DocumentFormat::Json),
        Err(json_err) => parse_yaml(content).with_context(|| {
            format!(
                "input is neither valid JSON ({}) nor valid YAML",
                json_err
            )
        }),
    }
}

/// Parses a string in the given format, or auto-detects when `format` is
/// `None`.
pub fn parse_str(content: &str, format: Option<DocumentFormat>) -> Result<Node> {
    match format {
        Some(DocumentFormat::Json) => parse_json(content),
        Some(DocumentFormat::Yaml) => parse_yaml(content),
        None => parse_auto(content),
    }
}

/// Parses JSON whose root must be a map.
pub fn parse_json_to_map(json_str: &str) -> Result<MapNode> {
    expect_map(parse_json(json_str)?)
}

/// Parses YAML whose root must be a map.
pub fn parse_yaml_to_map(yaml_str: &str) -> Result<MapNode> {
    expect_map(parse_yaml(yaml_str)?)
}

/// Narrows a document root to a map, failing with a descriptive error.
pub fn expect_map(node: Node) -> Result<MapNode> {
    match node {
        Node::Map(map) => Ok(map),
        Node::Array(_) => Err(anyhow!("document root is not a map (found an array)")),
        Node::Value(value) => Err(anyhow!(
            "document root is not a map (found a {})",
            value.value().kind()
        )),
    }
}

fn finish(value: Value, format: DocumentFormat) -> Result<Node> {
    tracing::debug!(%format, root = value.kind(), "decoded document");
    wrap(value).with_context(|| format!("{} document is empty", format))
}

fn convert_yaml_document(mut yaml: YamlValue) -> Result<Value> {
    yaml.apply_merge().context("Failed to apply YAML merge keys")?;
    convert_yaml(yaml)
}

fn convert_yaml(yaml: YamlValue) -> Result<Value> {
    Ok(match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => convert_yaml_number(&n)?,
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::seq(
            items
                .into_iter()
                .map(convert_yaml)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut entries = IndexMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                entries.insert(yaml_key(key)?, convert_yaml(value)?);
            }
            Value::map(entries)
        }
        YamlValue::Tagged(tagged) => convert_yaml(tagged.value)?,
    })
}

fn convert_yaml_number(n: &serde_yaml::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    match n.as_f64().and_then(Number::from_f64) {
        Some(number) => Ok(Value::Number(number)),
        None => bail!("YAML number {} has no JSON representation", n),
    }
}

/// Mapping keys become strings. `1: a` and `true: b` are keyed `"1"` and
/// `"true"`; a null key is keyed `"null"`.
fn yaml_key(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        YamlValue::Sequence(_) => bail!("unsupported YAML mapping key: sequence"),
        YamlValue::Mapping(_) => bail!("unsupported YAML mapping key: mapping"),
    }
}
