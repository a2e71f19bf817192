//! Error types for wrapping and navigating documents.

use std::fmt;

/// Errors raised by the node layer.
///
/// The two variants belong to different failure classes. `EmptyInput` is an
/// ordinary recoverable result: the decoder succeeded but produced nothing to
/// wrap. `NotAMap` signals a programming error in the caller's path: an
/// intermediate key was expected to hold a map and held something else.
/// Use [`NodeError::is_path_violation`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The value handed to `wrap` was null.
    EmptyInput,
    /// An intermediate path key resolved to a value that is not a map.
    NotAMap {
        /// The offending key.
        key: String,
        /// Zero-based position of `key` in the path.
        depth: usize,
    },
}

impl NodeError {
    /// Returns true for path-shape violations raised by `MapNode::get`.
    pub fn is_path_violation(&self) -> bool {
        matches!(self, NodeError::NotAMap { .. })
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::EmptyInput => write!(f, "input is null"),
            NodeError::NotAMap { key, depth } => write!(
                f,
                "key [{}] at path position {} is not a map node",
                key, depth
            ),
        }
    }
}

impl std::error::Error for NodeError {}
