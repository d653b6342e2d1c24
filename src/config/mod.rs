//! Configuration system for quillcheck.
//!
//! This module provides the configuration for diagnostic rendering and the
//! command line, with defaults for every field and serde support. The
//! configuration is read from `~/.config/quillcheck/config.toml`; any missing
//! field falls back to its default.
//!
//! # Example
//!
//! ```
//! use quillcheck::config::{Config, RenderFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.format, RenderFormat::Yaml);
//! assert_eq!(config.indent_size, 4);
//!
//! let custom = Config {
//!     format: RenderFormat::Json,
//!     max_items: 10,
//!     ..Config::default()
//! };
//! assert!(custom.show_counts);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How values are rendered in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFormat::Yaml => f.write_str("yaml"),
            RenderFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(RenderFormat::Yaml),
            "json" => Ok(RenderFormat::Json),
            other => Err(format!("Unknown render format '{}'", other)),
        }
    }
}

/// Configuration for quillcheck.
///
/// # Fields
///
/// * `format` - Rendering of selections and content in diagnostics (default: yaml)
/// * `indent_size` - Spaces each rendered block is indented by (default: 4)
/// * `max_items` - Sequence elements shown before truncating, 0 for all (default: 50)
/// * `show_counts` - Append expected and actual counts to diagnostics (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rendering of selections and content
    #[serde(default)]
    pub format: RenderFormat,

    /// Spaces each rendered block is indented by
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Sequence elements shown before truncating; 0 shows everything
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Append expected and actual counts to diagnostics
    #[serde(default = "default_show_counts")]
    pub show_counts: bool,
}

fn default_indent_size() -> usize {
    4
}

fn default_max_items() -> usize {
    50
}

fn default_show_counts() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: RenderFormat::default(),
            indent_size: default_indent_size(),
            max_items: default_max_items(),
            show_counts: default_show_counts(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/quillcheck/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("quillcheck");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't
    /// be parsed.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring config file: {:#}", err);
                Self::default()
            }
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parses configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
