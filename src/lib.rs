//! docnav - navigate loosely-typed JSON and YAML documents by key path.
//!
//! Decoded documents are read through [`document::Node`] views without
//! declaring a schema. [`document::MapNode::get`] walks a path anchored at a
//! map, and [`document::find`] / [`document::find_all`] look for a path at
//! any depth.
//!
//! ```
//! use docnav::document::parser::parse_yaml_to_map;
//!
//! let doc = parse_yaml_to_map("menu:\n  id: file\n  popup:\n    items: [New, Open]\n").unwrap();
//! let items = doc.get_array(&["menu", "popup", "items"]).unwrap().unwrap();
//! assert_eq!(items.items().len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod file;
