//! Loosely-typed document model.
//!
//! Decoded JSON or YAML is held as a raw [`Value`] tree and read through
//! [`Node`] views: [`MapNode`] for maps, [`ArrayNode`] for sequences and
//! [`ValueNode`] for scalars. Navigation by key path lives on `MapNode`;
//! deep search lives in [`search`].

pub mod error;
pub mod node;
pub mod parser;
pub mod render;
pub mod search;
pub mod value;

pub use error::NodeError;
pub use node::{wrap, ArrayNode, MapNode, Node, ValueNode};
pub use parser::DocumentFormat;
pub use search::{find, find_all};
pub use value::Value;
