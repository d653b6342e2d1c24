//! Conversion of external data into `TreeValue` trees.
//!
//! This module is the object-to-tree boundary of quillcheck. YAML and JSON
//! text, `serde_json::Value`, `serde_yaml::Value` and any `serde::Serialize`
//! type are converted into the canonical tree before an assertion ever sees
//! them. Scalar mapping keys (`1963: Formation`) become string keys.
//!
//! # Example
//!
//! ```
//! use quillcheck::document::parser::parse_yaml;
//! use quillcheck::document::node::TreeValue;
//!
//! let tree = parse_yaml("periods:\n  1963: Formation\n").unwrap();
//! let periods = tree.get("periods").unwrap();
//! assert_eq!(periods.get("1963"), Some(&TreeValue::from("Formation")));
//! ```

use super::node::{TreeNumber, TreeValue};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON string into a tree.
pub fn parse_json(content: &str) -> Result<TreeValue> {
    let value: JsonValue = serde_json::from_str(content).context("Failed to parse JSON")?;
    Ok(TreeValue::from(value))
}

/// Parses a YAML string into a tree.
///
/// Only the first document of a multi-document stream is parsed; use
/// [`parse_yaml_documents`] to read all of them.
pub fn parse_yaml(content: &str) -> Result<TreeValue> {
    let value: YamlValue = serde_yaml::from_str(content).context("Failed to parse YAML")?;
    Ok(TreeValue::from(value))
}

/// Parses every document of a YAML stream into a sequence.
pub fn parse_yaml_documents(content: &str) -> Result<TreeValue> {
    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = YamlValue::deserialize(document)
            .with_context(|| format!("Failed to parse YAML document {}", index + 1))?;
        documents.push(TreeValue::from(value));
    }
    Ok(TreeValue::Sequence(documents))
}

impl TreeValue {
    /// Converts any serializable Rust value into a tree.
    ///
    /// Structs become mappings of their serialized fields; skipped fields and
    /// non-data members never reach the tree.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::document::node::TreeValue;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let tree = TreeValue::from_serialize(&Point { x: 1, y: 0 }).unwrap();
    /// assert_eq!(tree.get("x"), Some(&TreeValue::from(1)));
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<TreeValue> {
        let json = serde_json::to_value(value).context("Failed to convert value to a tree")?;
        Ok(TreeValue::from(json))
    }
}

impl From<JsonValue> for TreeValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => TreeValue::Null,
            JsonValue::Bool(b) => TreeValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => TreeValue::Number(TreeNumber::Integer(i)),
                None => TreeValue::Number(TreeNumber::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            JsonValue::String(s) => TreeValue::String(s),
            JsonValue::Array(items) => {
                TreeValue::Sequence(items.into_iter().map(TreeValue::from).collect())
            }
            JsonValue::Object(entries) => TreeValue::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, TreeValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for TreeValue {
    fn from(value: &JsonValue) -> Self {
        TreeValue::from(value.clone())
    }
}

impl From<YamlValue> for TreeValue {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => TreeValue::Null,
            YamlValue::Bool(b) => TreeValue::Bool(b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => TreeValue::Number(TreeNumber::Integer(i)),
                None => TreeValue::Number(TreeNumber::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            YamlValue::String(s) => TreeValue::String(s),
            YamlValue::Sequence(items) => {
                TreeValue::Sequence(items.into_iter().map(TreeValue::from).collect())
            }
            YamlValue::Mapping(entries) => {
                let mut mapping = IndexMap::with_capacity(entries.len());
                for (key, value) in entries {
                    mapping.insert(yaml_key(key), TreeValue::from(value));
                }
                TreeValue::Mapping(mapping)
            }
            YamlValue::Tagged(tagged) => TreeValue::from(tagged.value),
        }
    }
}

/// Renders a YAML mapping key as a string key.
fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => TreeValue::from(other).to_string(),
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Null => serializer.serialize_unit(),
            TreeValue::Bool(b) => serializer.serialize_bool(*b),
            TreeValue::Number(TreeNumber::Integer(i)) => serializer.serialize_i64(*i),
            TreeValue::Number(TreeNumber::Float(f)) => serializer.serialize_f64(*f),
            TreeValue::String(s) => serializer.serialize_str(s),
            TreeValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeValue::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
