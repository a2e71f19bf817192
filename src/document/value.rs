//! Raw decoded values.
//!
//! `Value` is the generic tree a decoder hands to the node layer: maps keyed
//! by string, ordered sequences, and scalars. Containers are held behind
//! reference-counted handles so that every node wrapping the same map sees
//! the same data. Mutating a map through one handle is visible through all
//! others.
//!
//! # Example
//!
//! ```
//! use docnav::document::value::Value;
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), Value::from("docnav"));
//! fields.insert("version".to_string(), Value::from(1));
//! let doc = Value::map(fields);
//!
//! let alias = doc.clone();
//! if let Value::Map(map) = &alias {
//!     map.borrow_mut().insert("stable".to_string(), Value::from(true));
//! }
//! assert_eq!(doc.to_string(), r#"{"name":"docnav","version":1,"stable":true}"#);
//! ```

use indexmap::IndexMap;
use serde_json::{Number, Value as JsonValue};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a decoded map. Entries keep document order.
pub type SharedMap = Rc<RefCell<IndexMap<String, Value>>>;

/// Shared handle to a decoded sequence.
pub type SharedSeq = Rc<Vec<Value>>;

/// A decoded value of unknown shape.
///
/// Cloning a `Map` or `Seq` clones the handle, not the contents. Equality
/// compares contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit null, or the absent marker.
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Seq(SharedSeq),
    Map(SharedMap),
}

impl Value {
    /// Creates a map value owning `entries`.
    pub fn map(entries: IndexMap<String, Value>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    /// Creates a sequence value owning `items`.
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Rc::new(items))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    /// Returns true for booleans, numbers and strings.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    /// Returns the string contents if this is natively a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }
}

impl fmt::Display for Value {
    /// Scalars render as plain text (`file`, `10`, `true`). Containers
    /// render as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Seq(_) | Value::Map(_) => write!(f, "{}", JsonValue::from(self)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::seq(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::map(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::seq(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(entries) => Value::map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Seq(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            Value::Map(entries) => JsonValue::Object(
                entries
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Value::from("file").to_string(), "file");
        assert_eq!(Value::from(10).to_string(), "10");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_container_display_is_compact_json() {
        let value = Value::from(json!({"a": [1, "two", null]}));
        assert_eq!(value.to_string(), r#"{"a":[1,"two",null]}"#);
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(Value::from(f64::NAN).is_null());
        assert!(Value::from(f64::INFINITY).is_null());
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        match value {
            Value::Map(map) => {
                let keys: Vec<String> = map.borrow().keys().cloned().collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
            }
            other => panic!("Expected map, got {}", other.kind()),
        }
    }

    #[test]
    fn test_json_conversion_preserves_content() {
        let source = json!({"menu": {"id": "file", "order": 10, "tags": [true, null]}});
        let value = Value::from(source.clone());
        assert_eq!(JsonValue::from(&value), source);
    }

    #[test]
    fn test_clone_shares_map() {
        let original = Value::map(IndexMap::new());
        let alias = original.clone();
        if let Value::Map(map) = &alias {
            map.borrow_mut().insert("k".to_string(), Value::from("v"));
        }
        match &original {
            Value::Map(map) => assert_eq!(map.borrow().get("k"), Some(&Value::from("v"))),
            _ => panic!("Expected map"),
        }
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<&str>).is_null());
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_kind_and_predicates() {
        assert_eq!(Value::seq(vec![]).kind(), "sequence");
        assert!(Value::seq(vec![]).is_seq());
        assert!(Value::from("s").is_scalar());
        assert!(!Value::Null.is_scalar());
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::from(1).as_str(), None);
    }
}
