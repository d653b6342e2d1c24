//! Path expression types and their conversions.

use crate::document::node::TreeValue;
use std::fmt;

/// A segment in a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Named child of a mapping, or of every mapping in a sequence
    Key(String),
    /// One-level fan-out (`*`)
    Wildcard,
    /// Fan-out to every leaf (`**`)
    RecursiveWildcard,
    /// Keeps the mappings of a sequence whose `key` equals `value`
    Filter { key: String, value: TreeValue },
}

impl PathSegment {
    /// Builds a segment from a single literal token.
    ///
    /// `*` and `**` become wildcards; anything else is a key, spaces included.
    pub fn from_token(token: &str) -> Self {
        match token {
            "*" => PathSegment::Wildcard,
            "**" => PathSegment::RecursiveWildcard,
            key => PathSegment::Key(key.to_string()),
        }
    }

    /// Builds a filter segment.
    pub fn filter(key: impl Into<String>, value: impl Into<TreeValue>) -> Self {
        PathSegment::Filter {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if key.is_empty() || key.contains(char::is_whitespace) => {
                write!(f, "'{}'", key)
            }
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Wildcard => f.write_str("*"),
            PathSegment::RecursiveWildcard => f.write_str("**"),
            PathSegment::Filter { key, value } => write!(f, "[{}={}]", key, value),
        }
    }
}

/// A complete path expression.
///
/// An empty path addresses the root of the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    /// Segments that make up the path.
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns this path with `other` appended.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::querypath::Path;
    ///
    /// let path = Path::from("albums").join(("title", "Wheels of Fire")).join("year");
    /// assert_eq!(path.to_string(), "albums [title=\"Wheels of Fire\"] year");
    /// ```
    pub fn join(mut self, other: impl Into<Path>) -> Self {
        self.segments.extend(other.into().segments);
        self
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("root");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Splits on whitespace: `"albums * title"` is three segments.
impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::new(path.split_whitespace().map(PathSegment::from_token).collect())
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::from(path.as_str())
    }
}

impl From<&String> for Path {
    fn from(path: &String) -> Self {
        Path::from(path.as_str())
    }
}

/// Each string is one literal token, so keys may contain spaces.
impl<const N: usize> From<[&str; N]> for Path {
    fn from(tokens: [&str; N]) -> Self {
        Path::new(tokens.iter().map(|t| PathSegment::from_token(t)).collect())
    }
}

impl From<Vec<&str>> for Path {
    fn from(tokens: Vec<&str>) -> Self {
        Path::new(tokens.into_iter().map(PathSegment::from_token).collect())
    }
}

impl From<Vec<String>> for Path {
    fn from(tokens: Vec<String>) -> Self {
        Path::new(tokens.iter().map(|t| PathSegment::from_token(t)).collect())
    }
}

impl<V: Into<TreeValue>> From<(&str, V)> for Path {
    fn from((key, value): (&str, V)) -> Self {
        Path::new(vec![PathSegment::filter(key, value)])
    }
}

impl From<i32> for Path {
    fn from(key: i32) -> Self {
        Path::new(vec![PathSegment::Key(key.to_string())])
    }
}

impl From<i64> for Path {
    fn from(key: i64) -> Self {
        Path::new(vec![PathSegment::Key(key.to_string())])
    }
}

impl From<usize> for Path {
    fn from(key: usize) -> Self {
        Path::new(vec![PathSegment::Key(key.to_string())])
    }
}

impl From<PathSegment> for Path {
    fn from(segment: PathSegment) -> Self {
        Path::new(vec![segment])
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path::new(segments)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

/// Builds a [`Path`] from any mix of path parts.
///
/// Strings are split on whitespace, `(key, value)` tuples become filters and
/// integers become keys.
///
/// ```
/// use quillcheck::path;
///
/// let path = path!["albums", ("title", "Goodbye"), "year"];
/// assert_eq!(path.len(), 3);
/// assert!(path![].is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::querypath::Path::root()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::querypath::Path::root()$(.join($part))+
    };
}
