//! Integration tests for document loading.

use docnav::document::parser::DocumentFormat;
use docnav::file::loader::{load_file, load_file_as, load_file_to_map};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use tempfile::{Builder, TempDir};

fn write_gzipped(path: &std::path::Path, content: &str) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_load_simple_json_file() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(temp_file, r#"{{"name": "test"}}"#).unwrap();

    let map = load_file_to_map(temp_file.path()).unwrap();
    assert_eq!(map.get_string(&["name"]).unwrap(), "test");
}

#[test]
fn test_load_yaml_file_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "server:\n  host: localhost\n  port: 8080\n").unwrap();

    let map = load_file_to_map(&path).unwrap();
    assert_eq!(map.get_string(&["server", "host"]).unwrap(), "localhost");
    assert_eq!(map.get_to_string(&["server", "port"]).unwrap(), "8080");
}

#[test]
fn test_yaml_content_in_json_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wrong.json");
    fs::write(&path, "key: value\n").unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse JSON"));
}

#[test]
fn test_unknown_extension_is_auto_detected() {
    let temp_dir = TempDir::new().unwrap();
    let json_path = temp_dir.path().join("data.txt");
    fs::write(&json_path, r#"[1, 2, 3]"#).unwrap();
    assert_eq!(load_file(&json_path).unwrap().as_array().unwrap().len(), 3);

    let yaml_path = temp_dir.path().join("data.conf");
    fs::write(&yaml_path, "- 1\n- 2\n").unwrap();
    assert_eq!(load_file(&yaml_path).unwrap().as_array().unwrap().len(), 2);
}

#[test]
fn test_explicit_format_overrides_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("actually-yaml.json");
    fs::write(&path, "key: value\n").unwrap();

    let node = load_file_as(&path, Some(DocumentFormat::Yaml)).unwrap();
    assert_eq!(node.as_map().unwrap().get_string(&["key"]).unwrap(), "value");
}

#[test]
fn test_load_gzipped_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json.gz");
    write_gzipped(&path, r#"{"compressed": {"ok": true}}"#);

    let map = load_file_to_map(&path).unwrap();
    assert_eq!(map.get_to_string(&["compressed", "ok"]).unwrap(), "true");
}

#[test]
fn test_load_gzipped_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.yml.gz");
    write_gzipped(&path, "list:\n  - a\n  - b\n");

    let map = load_file_to_map(&path).unwrap();
    assert_eq!(map.get_array(&["list"]).unwrap().unwrap().len(), 2);
}

#[test]
fn test_corrupted_gzip_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json.gz");
    fs::write(&path, b"not gzip at all").unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to decompress"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_file(temp_dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_null_document_is_empty_input() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("null.json");
    fs::write(&path, "null").unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("input is null"));
}

#[test]
fn test_load_file_to_map_rejects_array_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("list.json");
    fs::write(&path, "[1]").unwrap();

    let err = load_file_to_map(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("document root is not a map"));
}
