//! Error types for path parsing and resolution.

use super::ast::{Path, PathSegment};
use std::fmt;

/// Errors that can occur while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSyntaxError {
    /// Unexpected token at a specific position.
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    InvalidSyntax { message: String },
}

impl fmt::Display for PathSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSyntaxError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            PathSyntaxError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of path, expected {}", expected)
            }
            PathSyntaxError::InvalidSyntax { message } => {
                write!(f, "Invalid path syntax: {}", message)
            }
        }
    }
}

impl std::error::Error for PathSyntaxError {}

/// A segment required by a "must exist" resolution was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNotFound {
    /// The segment that could not be resolved
    pub segment: PathSegment,
    /// The full path being resolved, prefix included
    pub path: Path,
}

impl fmt::Display for PathNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attribute {} not found in path {}",
            self.segment, self.path
        )
    }
}

impl std::error::Error for PathNotFound {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_display() {
        let err = PathNotFound {
            segment: PathSegment::Key("uk chart".to_string()),
            path: Path::from(["albums", "uk chart"]),
        };
        assert_eq!(
            err.to_string(),
            "Attribute 'uk chart' not found in path albums 'uk chart'"
        );
    }

    #[test]
    fn test_syntax_error_display() {
        let err = PathSyntaxError::UnexpectedEnd {
            expected: "']'".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected end of path, expected ']'");
    }
}
