//! Document loading from files, readers and stdin.
//!
//! These functions compose the decoders in [`crate::document::parser`] with
//! I/O. Gzip-compressed input is recognised by a `.gz` suffix on files and by
//! the gzip magic bytes on streams, and is decompressed transparently.

use crate::document::node::{MapNode, Node};
use crate::document::parser::{expect_map, parse_str, DocumentFormat};
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a document from the filesystem.
///
/// The format comes from the file extension (`.json`, `.yml`, `.yaml`,
/// optionally followed by `.gz`). Files with any other extension are
/// auto-detected: JSON first, then YAML.
///
/// # Examples
///
/// ```no_run
/// use docnav::file::loader::load_file;
///
/// let doc = load_file("openapi.yaml").unwrap();
/// let paths = doc.find_all(&["paths"]);
/// ```
///
/// # Errors
///
/// Fails when the file cannot be read or decompressed, when its contents are
/// not valid in the detected format, or when the document is null.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    load_file_as(path, None)
}

/// Loads a document, decoding it as `format` when given. `None` falls back
/// to the extension rules of [`load_file`].
pub fn load_file_as<P: AsRef<Path>>(path: P, format: Option<DocumentFormat>) -> Result<Node> {
    let path_ref = path.as_ref();
    let format = format.or_else(|| DocumentFormat::from_path(path_ref));

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    tracing::debug!(
        path = %path_ref.display(),
        format = format.map(|f| f.as_str()).unwrap_or("auto"),
        gzip = is_gzipped,
        "loading document"
    );

    parse_str(&content, format)
        .with_context(|| format!("Failed to load document {}", path_ref.display()))
}

/// Loads a document whose root must be a map.
pub fn load_file_to_map<P: AsRef<Path>>(path: P) -> Result<MapNode> {
    let path_ref = path.as_ref();
    expect_map(load_file(path_ref)?)
        .with_context(|| format!("Failed to load document {}", path_ref.display()))
}

/// Reads a reader to the end and parses its contents.
///
/// `format` of `None` auto-detects JSON or YAML. Gzip input is detected by
/// its magic bytes.
pub fn load_reader<R: Read>(mut reader: R, format: Option<DocumentFormat>) -> Result<Node> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;
    load_bytes(buffer, format)
}

/// Loads and parses a document from standard input.
///
/// # Examples
///
/// ```no_run
/// use docnav::file::loader::load_from_stdin;
///
/// // Usage: echo '{"key": "value"}' | docnav get - key
/// let doc = load_from_stdin(None).unwrap();
/// ```
pub fn load_from_stdin(format: Option<DocumentFormat>) -> Result<Node> {
    load_reader(std::io::stdin().lock(), format)
        .context("Failed to parse document from stdin")
}

fn load_bytes(buffer: Vec<u8>, format: Option<DocumentFormat>) -> Result<Node> {
    let content = if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Input is not valid UTF-8")?
    };
    parse_str(&content, format)
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
