//! Path expressions and their resolution against a tree.
//!
//! A path is a sequence of segments applied left to right:
//!
//! - `key` - named child of a mapping, or of every mapping in a sequence
//! - `*` - every child one level down
//! - `**` - every leaf below the current node
//! - `(key, value)` - keeps the mappings of a sequence where `key == value`
//!
//! Paths are usually written as whitespace-separated strings
//! (`"albums * title"`) or built with the [`path!`](crate::path) macro when
//! they need filters or keys containing spaces.
//!
//! # Examples
//!
//! ```
//! use quillcheck::path;
//! use quillcheck::querypath::{resolve, Path};
//! use quillcheck::document::parse_yaml;
//!
//! let tree = parse_yaml("albums:\n  - title: Goodbye\n    year: 1969\n").unwrap();
//! let years = resolve(&tree, &path!["albums", ("title", "Goodbye"), "year"], true).unwrap();
//! assert_eq!(years.unit_count(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Path, PathSegment};
pub use error::{PathNotFound, PathSyntaxError};
pub use evaluator::{resolve, Evaluator, Selection};
pub use parser::Parser;
