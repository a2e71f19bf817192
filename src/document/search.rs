//! Deep key-path search.
//!
//! Unlike [`MapNode::get`](super::node::MapNode::get), which is anchored at
//! the map it is called on, a search looks for a key path starting at any
//! depth. Every map value and every array item is descended into.
//!
//! Matching rules at a map entry `(key, value)` for the path
//! `[k0, k1, ..., kn]`:
//!
//! - null values are skipped;
//! - if `key == k0` and the path has one key, `value` is a match, and
//!   `value` is then searched again for the same path;
//! - if `key == k0` and the path is longer, `value` is searched for
//!   `[k1, ..., kn]` only;
//! - otherwise `value` is searched for the full path.
//!
//! Map entries are visited in document order, so results are deterministic
//! for a given document.

use super::node::{MapNode, Node};

/// Returns every node reachable through `keys` from any position under
/// `node`, in traversal order. An empty path matches nothing.
///
/// # Example
///
/// ```
/// use docnav::document::node::wrap;
/// use docnav::document::search::find_all;
/// use docnav::document::value::Value;
/// use serde_json::json;
///
/// let doc = wrap(Value::from(json!({
///     "menu": {"popup": {"menuitem": [{"value": "New"}, {"value": "Open"}]}}
/// })))
/// .unwrap();
///
/// let values: Vec<String> = find_all(&doc, &["menuitem", "value"])
///     .iter()
///     .map(|node| node.to_string())
///     .collect();
/// assert_eq!(values, vec!["New", "Open"]);
/// ```
pub fn find_all<K: AsRef<str>>(node: &Node, keys: &[K]) -> Vec<Node> {
    let keys: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
    let mut search = Search::new(true);
    search.visit(node, &keys);
    tracing::trace!(path = ?keys, matches = search.results.len(), "find_all");
    search.results
}

/// Returns the first node [`find_all`] would return, stopping the whole
/// search as soon as it is found.
pub fn find<K: AsRef<str>>(node: &Node, keys: &[K]) -> Option<Node> {
    let keys: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
    let mut search = Search::new(false);
    search.visit(node, &keys);
    search.results.into_iter().next()
}

struct Search {
    all: bool,
    results: Vec<Node>,
}

impl Search {
    fn new(all: bool) -> Self {
        Search {
            all,
            results: Vec::new(),
        }
    }

    /// True once a single-match search has its answer.
    fn done(&self) -> bool {
        !self.all && !self.results.is_empty()
    }

    fn visit(&mut self, node: &Node, keys: &[&str]) {
        if keys.is_empty() {
            return;
        }
        match node {
            Node::Map(map) => self.visit_map(map, keys),
            Node::Array(array) => {
                for item in array.items() {
                    self.visit(&item, keys);
                    if self.done() {
                        return;
                    }
                }
            }
            Node::Value(_) => {}
        }
    }

    fn visit_map(&mut self, map: &MapNode, keys: &[&str]) {
        for (key, value) in map.raw_entries() {
            let child = match Node::wrap(value) {
                Ok(child) => child,
                Err(_) => continue,
            };

            if key == keys[0] {
                if keys.len() > 1 {
                    self.visit(&child, &keys[1..]);
                    if self.done() {
                        return;
                    }
                    continue;
                }
                self.results.push(child.clone());
                if self.done() {
                    return;
                }
            }

            self.visit(&child, keys);
            if self.done() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::wrap;
    use crate::document::value::Value;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Node {
        wrap(Value::from(value)).unwrap()
    }

    fn texts(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(|node| node.to_string()).collect()
    }

    #[test]
    fn test_single_key_counts_every_occurrence() {
        let tree = doc(json!({
            "k": {"k": {"x": 1}},
            "a": [{"k": 2}, {"b": {"k": 3}}],
            "c": "k"
        }));
        let results = find_all(&tree, &["k"]);
        assert_eq!(results.len(), 4);
        assert!(results[0].is_map());
        assert_eq!(texts(&results[2..]), vec!["2", "3"]);
    }

    #[test]
    fn test_multi_key_path_does_not_rescan_matched_subtree() {
        // The inner "a" -> "b" sits below an outer "a" whose remainder search
        // is ["b"]. It is found through that remainder, not twice.
        let tree = doc(json!({
            "a": {"b": 1, "a": {"b": 2}}
        }));
        let results = find_all(&tree, &["a", "b"]);
        assert_eq!(texts(&results), vec!["1", "2"]);
    }

    #[test]
    fn test_remainder_search_reaches_any_depth() {
        let tree = doc(json!({
            "a": {"x": {"a": {"b": "deep"}}}
        }));
        // The outer "a" consumes the first key; below it only "b" is sought,
        // and the nested "a" -> "b" still matches through that remainder.
        assert_eq!(texts(&find_all(&tree, &["a", "b"])), vec!["deep"]);
    }

    #[test]
    fn test_scalar_root_never_matches() {
        let tree = doc(json!("k"));
        assert!(find_all(&tree, &["k"]).is_empty());
        assert!(find(&tree, &["k"]).is_none());
    }

    #[test]
    fn test_empty_path_matches_nothing() {
        let tree = doc(json!({"k": 1}));
        assert!(find_all::<&str>(&tree, &[]).is_empty());
        assert!(find::<&str>(&tree, &[]).is_none());
    }

    #[test]
    fn test_null_values_are_skipped() {
        let tree = doc(json!({
            "gone": null,
            "inside": {"gone": null},
            "list": [null, {"gone": null}]
        }));
        assert!(find_all(&tree, &["gone"]).is_empty());
        assert_eq!(find_all(&tree, &["inside"]).len(), 1);
        assert!(find_all(&tree, &["inside", "gone"]).is_empty());
    }

    #[test]
    fn test_find_matches_first_of_find_all() {
        let tree = doc(json!({
            "x": [{"id": 1}, {"nested": {"id": 2}}],
            "id": 3
        }));
        for path in [vec!["id"], vec!["nested", "id"], vec!["missing"]] {
            let all = find_all(&tree, &path[..]);
            assert_eq!(find(&tree, &path[..]), all.first().cloned());
        }
    }

    #[test]
    fn test_find_stops_at_first_match() {
        let tree = doc(json!({"a": {"k": "first"}, "b": {"k": "second"}}));
        assert_eq!(find(&tree, &["k"]).unwrap().to_string(), "first");
    }

    #[test]
    fn test_array_root_is_searched() {
        let tree = doc(json!([{"k": 1}, [{"k": 2}], "k"]));
        assert_eq!(texts(&find_all(&tree, &["k"])), vec!["1", "2"]);
    }

    #[test]
    fn test_results_share_underlying_maps() {
        let tree = doc(json!({"outer": {"target": {"v": 1}}}));
        let found = find(&tree, &["target"]).unwrap().into_map().unwrap();
        found.set("v", 2);
        let root = tree.as_map().unwrap();
        assert_eq!(root.get_to_string(&["outer", "target", "v"]).unwrap(), "2");
    }
}
