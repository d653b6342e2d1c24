//! QuillCheck - fluent content assertions over YAML and JSON data trees.
//!
//! A data tree is queried with a space-separated path, the selection is
//! quantified ("every", "at least 2", "no", ...) and checked with an
//! assertion verb:
//!
//! ```
//! use quillcheck::Session;
//! use serde_json::json;
//!
//! let cream = Session::new(json!({
//!     "members": [
//!         {"name": "Jack Bruce", "instrument": "bass"},
//!         {"name": "Ginger Baker", "instrument": "drums"},
//!         {"name": "Eric Clapton", "instrument": "guitar"},
//!     ]
//! }));
//!
//! cream.every("members name").unwrap().matches(r"^\w+ \w+$").unwrap();
//! cream.one("members instrument").unwrap().has("drums").unwrap();
//! cream.no("members").unwrap().has(json!({"instrument": "keys"})).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`document`]: the tree value model and conversion from YAML, JSON and serde types
//! - [`querypath`]: path syntax, parsing and resolution
//! - [`assertion`]: quantifiers, selectors and the assertion verbs
//! - [`report`]: multi-line failure rendering
//! - [`file`]: loading trees from files and stdin
//! - [`config`]: user configuration

pub mod assertion;
pub mod config;
pub mod document;
pub mod file;
pub mod querypath;
pub mod report;

pub use assertion::{AssertionError, Check, Quantifier, Selector, Session};
pub use document::{Kind, TreeValue};
pub use querypath::{Path, PathSegment, Selection};
