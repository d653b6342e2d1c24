//! Error types for assertions.

use super::bound::Bound;
use crate::document::canonical::CanonicalError;
use crate::document::node::TreeValue;
use crate::querypath::{Path, PathNotFound, PathSegment};
use std::fmt;

/// Failure payload of a cardinality bound violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The full path that was resolved, prefix included
    pub path: Path,
    /// The evaluated selection (unwrapped for the default quantifier)
    pub selection: TreeValue,
    /// The bound the selection was checked against
    pub bound: Bound,
    /// Number of units that matched before evaluation stopped
    pub matched: usize,
    /// The content the selection was compared with, if any
    pub content: Option<TreeValue>,
    /// Extra detail, such as "duplicates found"
    pub detail: Option<String>,
}

impl Violation {
    /// Short form of the expectation, e.g. `expected = 2, got = 1`.
    pub fn summary(&self) -> String {
        format!("expected {}, got = {}", self.bound, self.matched)
    }
}

/// Errors raised by assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionError {
    /// A path segment required by `every` did not exist.
    PathNotFound { segment: PathSegment, path: Path },
    /// The selection did not satisfy the quantifier's bound.
    BoundViolation(Box<Violation>),
    /// Values could not be compared (unorderable values, length of a scalar).
    Comparison { message: String },
    /// `matches` was given a pattern that does not compile.
    InvalidPattern { pattern: String, message: String },
}

impl AssertionError {
    /// The violation payload, if this is a bound violation.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            AssertionError::BoundViolation(violation) => Some(violation),
            _ => None,
        }
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionError::PathNotFound { segment, path } => {
                write!(f, "Attribute {} not found in path {}", segment, path)
            }
            AssertionError::BoundViolation(violation) => {
                write!(
                    f,
                    "Selection on path {} ({}) not verified against ",
                    violation.path, violation.selection
                )?;
                match &violation.content {
                    Some(content) => write!(f, "{}", content)?,
                    None => f.write_str("itself")?,
                }
                write!(f, " ({})", violation.summary())?;
                if let Some(detail) = &violation.detail {
                    write!(f, ": {}", detail)?;
                }
                Ok(())
            }
            AssertionError::Comparison { message } => {
                write!(f, "Comparison failed: {}", message)
            }
            AssertionError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for AssertionError {}

impl From<PathNotFound> for AssertionError {
    fn from(err: PathNotFound) -> Self {
        AssertionError::PathNotFound {
            segment: err.segment,
            path: err.path,
        }
    }
}

impl From<CanonicalError> for AssertionError {
    fn from(err: CanonicalError) -> Self {
        AssertionError::Comparison {
            message: err.to_string(),
        }
    }
}
