//! Data tree loading.
//!
//! This module loads the tree under test from files or stdin. The format is
//! chosen from the file name: `.json`, `.jsonl`/`.ndjson` (one value per
//! line, loaded as a sequence), `.yaml`/`.yml`, each optionally gzipped
//! (`.gz`). Anything else is read as YAML, which also accepts JSON.

use crate::document::node::TreeValue;
use crate::document::parser::{parse_json, parse_yaml, parse_yaml_documents};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// The formats a tree can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Json,
    JsonLines,
    Yaml,
}

impl TreeFormat {
    /// Determines the format from a file name, ignoring a `.gz` suffix.
    ///
    /// - `data.jsonl` → `JsonLines`
    /// - `data.json.gz` → `Json`
    /// - `data.txt` → `Yaml`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path_str = path.as_ref().to_string_lossy().to_ascii_lowercase();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".jsonl") || base.ends_with(".ndjson") {
            TreeFormat::JsonLines
        } else if base.ends_with(".json") {
            TreeFormat::Json
        } else {
            TreeFormat::Yaml
        }
    }

    /// Parses content in this format.
    ///
    /// A YAML stream with more than one document loads as a sequence of its
    /// documents.
    pub fn parse(self, content: &str) -> Result<TreeValue> {
        match self {
            TreeFormat::Json => parse_json(content),
            TreeFormat::JsonLines => parse_jsonl_content(content),
            TreeFormat::Yaml => parse_yaml_stream(content),
        }
    }
}

/// Loads and parses a data file from the filesystem.
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The contents do not parse in the detected format
///
/// # Examples
///
/// ```no_run
/// use quillcheck::file::loader::load_tree_file;
///
/// let tree = load_tree_file("cream.yaml").unwrap();
/// ```
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<TreeValue> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let content = if is_gzipped {
        let file = fs::File::open(path_ref)
            .with_context(|| format!("Failed to read file: {}", path_ref.display()))?;
        gunzip(file, &path_ref.display().to_string())?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file: {}", path_ref.display()))?
    };

    let format = TreeFormat::from_path(path_ref);
    debug!("Loading {} as {:?}", path_ref.display(), format);
    format
        .parse(&content)
        .with_context(|| format!("Failed to load {}", path_ref.display()))
}

/// Loads and parses a data tree from standard input.
///
/// Gzipped input is detected by its magic bytes. The content is tried as
/// JSON, then as JSON lines, then as YAML.
pub fn load_tree_from_stdin() -> Result<TreeValue> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    load_tree_from_bytes(&buffer)
}

/// Parses a data tree from raw bytes, detecting gzip and the format.
pub fn load_tree_from_bytes(buffer: &[u8]) -> Result<TreeValue> {
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        gunzip(buffer, "gzipped input")?
    } else {
        String::from_utf8(buffer.to_vec()).context("Invalid UTF-8 in input")?
    };

    if let Ok(tree) = parse_json(&content) {
        return Ok(tree);
    }
    if let Ok(tree) = parse_jsonl_content(&content) {
        return Ok(tree);
    }
    parse_yaml_stream(&content).context("Input is neither valid JSON, JSON lines, nor YAML")
}

/// Parses JSONL content (newline-delimited JSON) into a sequence.
///
/// Each line must be a valid JSON value. Blank lines are skipped.
pub fn parse_jsonl_content(content: &str) -> Result<TreeValue> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(TreeValue::from(value));
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSONL content");
    }

    Ok(TreeValue::Sequence(lines))
}

fn parse_yaml_stream(content: &str) -> Result<TreeValue> {
    match parse_yaml_documents(content)? {
        TreeValue::Sequence(mut documents) if documents.len() == 1 => Ok(documents.remove(0)),
        TreeValue::Sequence(documents) if documents.is_empty() => parse_yaml(content),
        documents => Ok(documents),
    }
}

/// Inflates a gzip stream into text.
fn gunzip<R: std::io::Read>(reader: R, source: &str) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut text = String::new();
    GzDecoder::new(reader)
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to decompress {}", source))?;
    Ok(text)
}
