//! File I/O for documents.
//!
//! This module loads JSON and YAML documents from disk, readers or stdin,
//! with transparent gzip decompression.

pub mod loader;
