//! Typed views over raw decoded values.
//!
//! A [`Node`] is one of three views: [`MapNode`], [`ArrayNode`] or
//! [`ValueNode`]. Nodes never hold other nodes. Children stay raw
//! [`Value`]s and are wrapped again on every access, so two calls that reach
//! the same child return two independent views over the same data.
//!
//! `MapNode` shares the underlying map with every other view of it.
//! [`MapNode::set`] and [`MapNode::delete_keys`] are visible through all of
//! them, including views obtained from a parent through [`MapNode::get`].
//!
//! # Example
//!
//! ```
//! use docnav::document::node::wrap;
//! use docnav::document::value::Value;
//! use serde_json::json;
//!
//! let root = wrap(Value::from(json!({
//!     "menu": {"id": "file", "order": 10, "popup": {"items": ["New", "Open"]}}
//! })))
//! .unwrap();
//! let menu = root.as_map().unwrap();
//!
//! assert!(menu.get_map(&["menu", "popup"]).unwrap().is_some());
//! assert!(menu.get(&["menu", "popup", "missing"]).unwrap().is_none());
//! assert_eq!(menu.get_string(&["menu", "order"]).unwrap(), "");
//! assert_eq!(menu.get_to_string(&["menu", "order"]).unwrap(), "10");
//!
//! // An intermediate key that is not a map is a caller error.
//! let err = menu.get(&["menu", "id", "name"]).unwrap_err();
//! assert!(err.is_path_violation());
//! ```

use super::error::NodeError;
use super::search;
use super::value::{SharedMap, SharedSeq, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A view over a decoded value, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Map(MapNode),
    Array(ArrayNode),
    Value(ValueNode),
}

/// View over a decoded map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    entries: SharedMap,
}

/// View over a decoded sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    items: SharedSeq,
}

/// View over a single non-null scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    value: Value,
}

/// Classifies a raw value into a node.
///
/// Maps become [`Node::Map`], sequences [`Node::Array`], and every other
/// non-null value [`Node::Value`]. Null is reported as
/// [`NodeError::EmptyInput`] so callers can tell a null document apart from
/// a failed decode.
pub fn wrap(value: Value) -> Result<Node, NodeError> {
    match value {
        Value::Null => Err(NodeError::EmptyInput),
        Value::Map(entries) => Ok(Node::Map(MapNode { entries })),
        Value::Seq(items) => Ok(Node::Array(ArrayNode { items })),
        scalar => Ok(Node::Value(ValueNode { value: scalar })),
    }
}

impl Node {
    /// See [`wrap`].
    pub fn wrap(value: Value) -> Result<Node, NodeError> {
        wrap(value)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }

    pub fn as_map(&self) -> Option<&MapNode> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&ValueNode> {
        match self {
            Node::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<MapNode> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<ArrayNode> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<ValueNode> {
        match self {
            Node::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw value this node views. Containers share their handle.
    pub fn to_raw(&self) -> Value {
        match self {
            Node::Map(map) => Value::Map(Rc::clone(&map.entries)),
            Node::Array(array) => Value::Seq(Rc::clone(&array.items)),
            Node::Value(value) => value.value.clone(),
        }
    }

    /// Returns the first node reachable through `keys` anywhere below this
    /// node. See [`search::find`].
    pub fn find<K: AsRef<str>>(&self, keys: &[K]) -> Option<Node> {
        search::find(self, keys)
    }

    /// Returns every node reachable through `keys` anywhere below this node.
    /// See [`search::find_all`].
    pub fn find_all<K: AsRef<str>>(&self, keys: &[K]) -> Vec<Node> {
        search::find_all(self, keys)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

impl From<MapNode> for Node {
    fn from(map: MapNode) -> Self {
        Node::Map(map)
    }
}

impl From<ArrayNode> for Node {
    fn from(array: ArrayNode) -> Self {
        Node::Array(array)
    }
}

impl From<ValueNode> for Node {
    fn from(value: ValueNode) -> Self {
        Node::Value(value)
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        node.to_raw()
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.to_raw()
    }
}

impl From<MapNode> for Value {
    /// Shares the map; later mutations through either side stay visible.
    fn from(map: MapNode) -> Self {
        Value::Map(map.entries)
    }
}

impl From<ArrayNode> for Value {
    fn from(array: ArrayNode) -> Self {
        Value::Seq(array.items)
    }
}

impl From<ValueNode> for Value {
    fn from(value: ValueNode) -> Self {
        value.value
    }
}

impl MapNode {
    /// Creates a view over a new, empty map.
    pub fn new() -> Self {
        Self::from_entries(IndexMap::new())
    }

    /// Creates a view over a new map owning `entries`.
    pub fn from_entries(entries: IndexMap<String, Value>) -> Self {
        MapNode {
            entries: Rc::new(RefCell::new(entries)),
        }
    }

    /// Wraps `value` and narrows it to a map. Returns `None` for null and
    /// for non-map values.
    pub fn from_value(value: Value) -> Option<MapNode> {
        wrap(value).ok().and_then(Node::into_map)
    }

    /// Resolves `keys` against nested maps starting at this map.
    ///
    /// Every key but the last must name a map. A missing or null key ends the
    /// walk with `Ok(None)`. A key holding anything other than a map is a
    /// broken path and fails with [`NodeError::NotAMap`] before any deeper
    /// key is looked at. The last key is wrapped as-is, so it may be any
    /// shape. An empty path returns `Ok(None)`.
    pub fn get<K: AsRef<str>>(&self, keys: &[K]) -> Result<Option<Node>, NodeError> {
        let mut current = Rc::clone(&self.entries);
        for (depth, key) in keys.iter().enumerate() {
            let key = key.as_ref();
            let value = match current.borrow().get(key) {
                Some(value) if !value.is_null() => value.clone(),
                _ => return Ok(None),
            };

            if depth == keys.len() - 1 {
                return Ok(wrap(value).ok());
            }

            current = match value {
                Value::Map(next) => next,
                other => {
                    tracing::debug!(
                        key,
                        depth,
                        found = other.kind(),
                        "path expects a map at this key"
                    );
                    return Err(NodeError::NotAMap {
                        key: key.to_string(),
                        depth,
                    });
                }
            };
        }
        Ok(None)
    }

    pub fn get_map<K: AsRef<str>>(&self, keys: &[K]) -> Result<Option<MapNode>, NodeError> {
        Ok(self.get(keys)?.and_then(Node::into_map))
    }

    pub fn get_array<K: AsRef<str>>(&self, keys: &[K]) -> Result<Option<ArrayNode>, NodeError> {
        Ok(self.get(keys)?.and_then(Node::into_array))
    }

    /// Like [`MapNode::get_array`], but substitutes an empty array when the
    /// path is absent or does not hold a sequence.
    pub fn get_array_or_empty<K: AsRef<str>>(&self, keys: &[K]) -> Result<ArrayNode, NodeError> {
        Ok(self.get_array(keys)?.unwrap_or_default())
    }

    pub fn get_value<K: AsRef<str>>(&self, keys: &[K]) -> Result<Option<ValueNode>, NodeError> {
        Ok(self.get(keys)?.and_then(Node::into_value))
    }

    /// Returns the scalar at `keys` if it is natively a string, otherwise an
    /// empty string. A number such as `10` yields `""`.
    pub fn get_string<K: AsRef<str>>(&self, keys: &[K]) -> Result<String, NodeError> {
        Ok(self
            .get_value(keys)?
            .map(|value| value.as_str().to_string())
            .unwrap_or_default())
    }

    /// Returns any scalar at `keys` rendered as text (`10` yields `"10"`),
    /// or an empty string when there is no scalar. See the `Display` impl of
    /// [`ValueNode`] for how numbers are written.
    pub fn get_to_string<K: AsRef<str>>(&self, keys: &[K]) -> Result<String, NodeError> {
        Ok(self
            .get_value(keys)?
            .map(|value| value.to_string())
            .unwrap_or_default())
    }

    /// Inserts or replaces `key` in this map.
    ///
    /// The shared map is modified in place. Storing a map inside itself,
    /// directly or through descendants, creates a reference cycle that
    /// [`search::find_all`] would never leave.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Removes each of `keys` from this map. Missing keys are ignored.
    pub fn delete_keys<K: AsRef<str>>(&self, keys: &[K]) {
        let mut entries = self.entries.borrow_mut();
        for key in keys {
            entries.shift_remove(key.as_ref());
        }
    }

    /// Returns every entry whose value is a map, in document order.
    pub fn entries_as_map(&self) -> IndexMap<String, MapNode> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|(key, value)| {
                MapNode::from_value(value.clone()).map(|map| (key.clone(), map))
            })
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Keys in document order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Snapshot of the raw entries. Container values still share their
    /// handles with this map.
    pub(crate) fn raw_entries(&self) -> Vec<(String, Value)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns true when both views share the same underlying map.
    pub fn ptr_eq(&self, other: &MapNode) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl Default for MapNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayNode {
    /// Creates a view over a new sequence owning `items`.
    pub fn new(items: Vec<Value>) -> Self {
        ArrayNode {
            items: Rc::new(items),
        }
    }

    /// Wraps `value` and narrows it to an array.
    pub fn from_value(value: Value) -> Option<ArrayNode> {
        wrap(value).ok().and_then(Node::into_array)
    }

    /// Wraps every item. Null items are skipped.
    pub fn items(&self) -> Vec<Node> {
        self.items
            .iter()
            .filter_map(|item| wrap(item.clone()).ok())
            .collect()
    }

    /// Wraps every item that is a map. Other items are dropped.
    pub fn items_as_map(&self) -> Vec<MapNode> {
        self.items
            .iter()
            .filter_map(|item| MapNode::from_value(item.clone()))
            .collect()
    }

    /// Wraps the raw item at `index`. Returns `None` when out of range or
    /// when the item is null.
    pub fn get(&self, index: usize) -> Option<Node> {
        self.items.get(index).and_then(|item| wrap(item.clone()).ok())
    }

    /// Number of raw items, nulls included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ArrayNode {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ValueNode {
    /// The wrapped scalar.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The scalar if it is natively a string, otherwise `""`.
    pub fn as_str(&self) -> &str {
        self.value.as_str().unwrap_or("")
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.value {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ValueNode {
    /// Renders any scalar kind as text. Numbers keep their decoded form, so a
    /// float with an integral value such as `10.0` renders as `10.0`, not `10`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
