//! Configuration system for docnav.
//!
//! This module provides the defaults used by the `docnav` command line tool.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments, which always win.
//!
//! # Example
//!
//! ```
//! use docnav::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.input_format, "auto");
//! assert!(config.pretty);
//!
//! let custom = Config {
//!     output_format: "yaml".to_string(),
//!     ..Config::default()
//! };
//! assert_eq!(custom.output_format().unwrap().as_str(), "yaml");
//! ```

use crate::document::parser::DocumentFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the docnav command line tool.
///
/// # Fields
///
/// * `input_format` - "auto", "json" or "yaml" (default: "auto")
/// * `output_format` - "json" or "yaml" (default: "json")
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `raw_scalars` - Print scalars as plain text instead of JSON (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input format used when it cannot be taken from the file name
    #[serde(default = "default_input_format")]
    pub input_format: String,

    /// Format of printed results
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Print scalar results as plain text
    #[serde(default)]
    pub raw_scalars: bool,
}

fn default_input_format() -> String {
    "auto".to_string()
}

fn default_output_format() -> String {
    "json".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_format: default_input_format(),
            output_format: default_output_format(),
            pretty: default_pretty(),
            raw_scalars: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/docnav/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("docnav");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }

    /// The configured input format, or `None` for auto-detection.
    pub fn input_format(&self) -> Result<Option<DocumentFormat>> {
        if self.input_format.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        self.input_format
            .parse::<DocumentFormat>()
            .map(Some)
            .context("Invalid input_format in config")
    }

    pub fn output_format(&self) -> Result<DocumentFormat> {
        self.output_format
            .parse::<DocumentFormat>()
            .context("Invalid output_format in config")
    }
}
