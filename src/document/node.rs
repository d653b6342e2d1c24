//! Tree value representation used by every assertion.
//!
//! This module provides the core data structure for the data under test in
//! quillcheck. A `TreeValue` is a closed sum type over mappings, sequences and
//! scalars, so every decision point in navigation and matching is an exhaustive
//! `match` rather than a runtime type probe.
//!
//! # Example
//!
//! ```
//! use quillcheck::document::node::{TreeNumber, TreeValue};
//! use indexmap::IndexMap;
//!
//! let mut band = IndexMap::new();
//! band.insert("band".to_string(), TreeValue::from("Cream"));
//! band.insert("formation".to_string(), TreeValue::Number(TreeNumber::Integer(1966)));
//! let tree = TreeValue::Mapping(band);
//!
//! assert!(tree.is_mapping());
//! assert_eq!(tree.get("formation"), Some(&TreeValue::from(1966)));
//! ```

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Represents tree numbers (integer or float).
///
/// Integers and floats compare numerically, so `Integer(1)` equals `Float(1.0)`.
#[derive(Debug, Clone, Copy)]
pub enum TreeNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for TreeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNumber::Integer(i) => write!(f, "{}", i),
            TreeNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl PartialEq for TreeNumber {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for TreeNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (TreeNumber::Integer(a), TreeNumber::Integer(b)) => Some(a.cmp(b)),
            (TreeNumber::Float(a), TreeNumber::Float(b)) => a.partial_cmp(b),
            (TreeNumber::Integer(i), TreeNumber::Float(f)) => cmp_int_float(*i, *f),
            (TreeNumber::Float(f), TreeNumber::Integer(i)) => {
                cmp_int_float(*i, *f).map(Ordering::reverse)
            }
        }
    }
}

/// Exact comparison of an integer with a float, without rounding the
/// integer through `f64`.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    // i64::MIN is exactly -2^63; 2^63 itself is out of range
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= LIMIT {
        return Some(Ordering::Less);
    }
    if f < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)),
        unequal => Some(unequal),
    }
}

impl TreeNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            TreeNumber::Integer(i) => *i as f64,
            TreeNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, TreeNumber::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, TreeNumber::Float(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            TreeNumber::Integer(i) => *i == 0,
            TreeNumber::Float(f) => *f == 0.0,
        }
    }

    /// Returns true if this number cannot be ordered (a NaN float).
    pub fn is_nan(&self) -> bool {
        matches!(self, TreeNumber::Float(f) if f.is_nan())
    }
}

/// A node of the data tree under test.
///
/// Trees are read-only for the whole lifetime of an assertion session. Mapping
/// equality ignores key order, sequence equality does not.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TreeValue {
    /// An absent value (`null` / `~`)
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A number (integer or float)
    Number(TreeNumber),
    /// A text value
    String(String),
    /// An ordered sequence of values
    Sequence(Vec<TreeValue>),
    /// Key-value pairs with unique keys
    Mapping(IndexMap<String, TreeValue>),
}

/// The runtime shape of a tree value, as checked by `is_a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    /// Any number, integer or float
    Number,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl Kind {
    /// Returns true if `value` has this shape.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::document::node::{Kind, TreeValue};
    ///
    /// assert!(Kind::Number.matches(&TreeValue::from(1.5)));
    /// assert!(Kind::Integer.matches(&TreeValue::from(3)));
    /// assert!(!Kind::Integer.matches(&TreeValue::from(true)));
    /// ```
    pub fn matches(&self, value: &TreeValue) -> bool {
        match (self, value) {
            (Kind::Null, TreeValue::Null) => true,
            (Kind::Bool, TreeValue::Bool(_)) => true,
            (Kind::Number, TreeValue::Number(_)) => true,
            (Kind::Integer, TreeValue::Number(n)) => n.is_integer(),
            (Kind::Float, TreeValue::Number(n)) => n.is_float(),
            (Kind::String, TreeValue::String(_)) => true,
            (Kind::Sequence, TreeValue::Sequence(_)) => true,
            (Kind::Mapping, TreeValue::Mapping(_)) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(Kind::Null),
            "bool" | "boolean" => Ok(Kind::Bool),
            "number" => Ok(Kind::Number),
            "integer" | "int" => Ok(Kind::Integer),
            "float" => Ok(Kind::Float),
            "string" | "str" => Ok(Kind::String),
            "sequence" | "list" | "array" => Ok(Kind::Sequence),
            "mapping" | "map" | "object" => Ok(Kind::Mapping),
            other => Err(format!("Unknown kind '{}'", other)),
        }
    }
}

impl TreeValue {
    /// Returns the shape of this value. Numbers report `Integer` or `Float`.
    pub fn kind(&self) -> Kind {
        match self {
            TreeValue::Null => Kind::Null,
            TreeValue::Bool(_) => Kind::Bool,
            TreeValue::Number(n) if n.is_integer() => Kind::Integer,
            TreeValue::Number(_) => Kind::Float,
            TreeValue::String(_) => Kind::String,
            TreeValue::Sequence(_) => Kind::Sequence,
            TreeValue::Mapping(_) => Kind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, TreeValue::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, TreeValue::Sequence(_))
    }

    /// Returns true if this value is a container (mapping or sequence).
    pub fn is_container(&self) -> bool {
        matches!(self, TreeValue::Mapping(_) | TreeValue::Sequence(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TreeValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TreeValue::Number(TreeNumber::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TreeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TreeValue]> {
        match self {
            TreeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, TreeValue>> {
        match self {
            TreeValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// Returns the length of a string (in characters), sequence or mapping.
    ///
    /// Scalars other than strings have no length.
    pub fn len(&self) -> Option<usize> {
        match self {
            TreeValue::String(s) => Some(s.chars().count()),
            TreeValue::Sequence(items) => Some(items.len()),
            TreeValue::Mapping(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Returns true if this value counts as logically false.
    ///
    /// `null`, `false`, `0`, `0.0`, `""`, `[]` and `{}` are empty-like; every
    /// other value is truthy. This is the only truthiness rule in the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::document::node::TreeValue;
    ///
    /// assert!(TreeValue::Null.is_emptylike());
    /// assert!(TreeValue::from(0).is_emptylike());
    /// assert!(TreeValue::Sequence(vec![]).is_emptylike());
    /// assert!(!TreeValue::from(vec![2]).is_emptylike());
    /// ```
    pub fn is_emptylike(&self) -> bool {
        match self {
            TreeValue::Null => true,
            TreeValue::Bool(b) => !b,
            TreeValue::Number(n) => n.is_zero(),
            TreeValue::String(s) => s.is_empty(),
            TreeValue::Sequence(items) => items.is_empty(),
            TreeValue::Mapping(entries) => entries.is_empty(),
        }
    }
}

impl PartialOrd for TreeValue {
    /// Orders values of the same kind; values of different kinds are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (TreeValue::Null, TreeValue::Null) => Some(Ordering::Equal),
            (TreeValue::Bool(a), TreeValue::Bool(b)) => a.partial_cmp(b),
            (TreeValue::Number(a), TreeValue::Number(b)) => a.partial_cmp(b),
            (TreeValue::String(a), TreeValue::String(b)) => a.partial_cmp(b),
            (TreeValue::Sequence(a), TreeValue::Sequence(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

impl From<bool> for TreeValue {
    fn from(value: bool) -> Self {
        TreeValue::Bool(value)
    }
}

impl From<i32> for TreeValue {
    fn from(value: i32) -> Self {
        TreeValue::Number(TreeNumber::Integer(value.into()))
    }
}

impl From<i64> for TreeValue {
    fn from(value: i64) -> Self {
        TreeValue::Number(TreeNumber::Integer(value))
    }
}

impl From<u32> for TreeValue {
    fn from(value: u32) -> Self {
        TreeValue::Number(TreeNumber::Integer(value.into()))
    }
}

impl From<u64> for TreeValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => TreeValue::Number(TreeNumber::Integer(i)),
            Err(_) => TreeValue::Number(TreeNumber::Float(value as f64)),
        }
    }
}

impl From<usize> for TreeValue {
    fn from(value: usize) -> Self {
        TreeValue::from(value as u64)
    }
}

impl From<f32> for TreeValue {
    fn from(value: f32) -> Self {
        TreeValue::Number(TreeNumber::Float(value.into()))
    }
}

impl From<f64> for TreeValue {
    fn from(value: f64) -> Self {
        TreeValue::Number(TreeNumber::Float(value))
    }
}

impl From<TreeNumber> for TreeValue {
    fn from(value: TreeNumber) -> Self {
        TreeValue::Number(value)
    }
}

impl From<&str> for TreeValue {
    fn from(value: &str) -> Self {
        TreeValue::String(value.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(value: String) -> Self {
        TreeValue::String(value)
    }
}

impl From<&String> for TreeValue {
    fn from(value: &String) -> Self {
        TreeValue::String(value.clone())
    }
}

impl From<()> for TreeValue {
    fn from(_: ()) -> Self {
        TreeValue::Null
    }
}

impl From<&TreeValue> for TreeValue {
    fn from(value: &TreeValue) -> Self {
        value.clone()
    }
}

impl<T: Into<TreeValue>> From<Option<T>> for TreeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TreeValue::Null, Into::into)
    }
}

impl<T: Into<TreeValue>> From<Vec<T>> for TreeValue {
    fn from(items: Vec<T>) -> Self {
        TreeValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, TreeValue>> for TreeValue {
    fn from(entries: IndexMap<String, TreeValue>) -> Self {
        TreeValue::Mapping(entries)
    }
}

impl<T: Into<TreeValue>> FromIterator<T> for TreeValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TreeValue::Sequence(iter.into_iter().map(Into::into).collect())
    }
}
