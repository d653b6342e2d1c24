//! Data tree model and conversions.
//!
//! - `node` - the `TreeValue` sum type every assertion runs against
//! - `canonical` - order-independent forms for unordered comparison
//! - `parser` - YAML, JSON and serde conversions into trees

pub mod canonical;
pub mod node;
pub mod parser;

pub use canonical::{
    canonicalize, compare, distinct_count, sort_values, Canonical, CanonicalError,
};
pub use node::{Kind, TreeNumber, TreeValue};
pub use parser::{parse_json, parse_yaml, parse_yaml_documents};
