//! Path string parser for the command line.
//!
//! Plain `Path::from(&str)` only splits on whitespace. The parser accepts the
//! same tokens plus two forms a shell user cannot express otherwise:
//!
//! - `'uk chart'` or `"uk chart"` - a quoted key containing spaces
//! - `[key=value]` - a filter; the value is a scalar literal (`1968`,
//!   `true`, `null`, `'Jack Bruce'`, `Cream`)

use super::ast::{Path, PathSegment};
use super::error::PathSyntaxError;
use crate::document::node::{TreeNumber, TreeValue};

/// Parser for path strings.
pub struct Parser {
    input: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given path string.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.chars().collect(),
            position: 0,
        }
    }

    /// Parses a path string into a [`Path`].
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::querypath::{Parser, PathSegment};
    ///
    /// let path = Parser::parse("albums [year=1968] 'uk chart'").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.segments[2], PathSegment::Key("uk chart".to_string()));
    /// ```
    pub fn parse(query: &str) -> Result<Path, PathSyntaxError> {
        let mut parser = Parser::new(query);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Path, PathSyntaxError> {
        let mut segments = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('[') => segments.push(self.parse_filter()?),
                Some('\'') | Some('"') => {
                    let key = self.parse_quoted()?;
                    segments.push(PathSegment::Key(key));
                }
                Some(_) => {
                    let token = self.parse_bare(|ch| ch.is_whitespace() || ch == '[');
                    segments.push(PathSegment::from_token(&token));
                }
            }
        }
        Ok(Path::new(segments))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PathSyntaxError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathSyntaxError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathSyntaxError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Reads characters until `stop` matches or the input ends.
    fn parse_bare(&mut self, stop: impl Fn(char) -> bool) -> String {
        let mut token = String::new();
        while let Some(ch) = self.peek() {
            if stop(ch) {
                break;
            }
            token.push(ch);
            self.position += 1;
        }
        token
    }

    /// Parses a single- or double-quoted string with backslash escapes.
    fn parse_quoted(&mut self) -> Result<String, PathSyntaxError> {
        let quote = match self.next() {
            Some(ch @ ('\'' | '"')) => ch,
            Some(ch) => {
                return Err(PathSyntaxError::UnexpectedToken {
                    position: self.position - 1,
                    found: ch.to_string(),
                    expected: "a quote".to_string(),
                })
            }
            None => {
                return Err(PathSyntaxError::UnexpectedEnd {
                    expected: "a quote".to_string(),
                })
            }
        };

        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(ch @ ('\\' | '\'' | '"')) => value.push(ch),
                    Some(_) | None => {
                        return Err(PathSyntaxError::InvalidSyntax {
                            message: "Invalid escape sequence".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(PathSyntaxError::UnexpectedEnd {
                        expected: format!("closing quote {}", quote),
                    })
                }
            }
        }
        Ok(value)
    }

    /// Parses `[key=value]`.
    fn parse_filter(&mut self) -> Result<PathSegment, PathSyntaxError> {
        self.expect('[')?;
        self.skip_whitespace();

        let key = match self.peek() {
            Some('\'') | Some('"') => self.parse_quoted()?,
            _ => self.parse_bare(|ch| ch == '=' || ch == ']' || ch.is_whitespace()),
        };
        if key.is_empty() {
            return Err(PathSyntaxError::InvalidSyntax {
                message: "Filter key cannot be empty".to_string(),
            });
        }

        self.expect('=')?;
        self.skip_whitespace();

        let value = match self.peek() {
            Some('\'') | Some('"') => TreeValue::String(self.parse_quoted()?),
            _ => {
                let literal = self.parse_bare(|ch| ch == ']');
                scalar_literal(literal.trim())
            }
        };

        self.expect(']')?;
        Ok(PathSegment::Filter { key, value })
    }
}

/// Interprets an unquoted filter value. `nan` and `inf` stay strings.
fn scalar_literal(literal: &str) -> TreeValue {
    match literal {
        "null" | "~" | "" => TreeValue::Null,
        "true" => TreeValue::Bool(true),
        "false" => TreeValue::Bool(false),
        _ => {
            if let Ok(i) = literal.parse::<i64>() {
                TreeValue::Number(TreeNumber::Integer(i))
            } else if let Some(f) = literal.parse::<f64>().ok().filter(|f| f.is_finite()) {
                TreeValue::Number(TreeNumber::Float(f))
            } else {
                TreeValue::String(literal.to_string())
            }
        }
    }
}
