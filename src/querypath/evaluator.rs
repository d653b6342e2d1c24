//! Path resolution against a tree.
//!
//! Resolution walks the segments left to right, carrying a cursor that is
//! either a single node of the tree or a fan-out of matches. Nodes are
//! borrowed from the tree wherever possible; only `*` over a sequence of
//! mappings synthesizes new values (one group of values per mapping).

use super::ast::{Path, PathSegment};
use super::error::PathNotFound;
use crate::document::node::TreeValue;
use indexmap::IndexMap;
use log::{debug, trace};
use std::borrow::Cow;

/// The result of resolving a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A node that exists in the tree, or the root itself
    Node(TreeValue),
    /// Matches synthesized by wildcards, filters, or key lookups across a
    /// sequence. May be empty.
    FanOut(Vec<TreeValue>),
}

impl Selection {
    /// The values an assertion evaluates one at a time.
    ///
    /// A non-empty sequence node yields its elements; any other node yields
    /// itself, so `null`, `0` and `[]` are still evaluated as values. A
    /// fan-out yields its matches and may yield nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::querypath::Selection;
    /// use quillcheck::document::node::TreeValue;
    ///
    /// assert_eq!(Selection::Node(TreeValue::from(vec![1, 2])).units().len(), 2);
    /// assert_eq!(Selection::Node(TreeValue::Sequence(vec![])).units().len(), 1);
    /// assert_eq!(Selection::FanOut(vec![]).units().len(), 0);
    /// ```
    pub fn units(&self) -> &[TreeValue] {
        match self {
            Selection::FanOut(values) => values,
            Selection::Node(TreeValue::Sequence(items)) if !items.is_empty() => items,
            Selection::Node(node) => std::slice::from_ref(node),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.units().len()
    }

    /// The selection as a single tree value, for display.
    pub fn to_value(&self) -> TreeValue {
        match self {
            Selection::Node(node) => node.clone(),
            Selection::FanOut(values) => TreeValue::Sequence(values.clone()),
        }
    }

    pub fn into_value(self) -> TreeValue {
        match self {
            Selection::Node(node) => node,
            Selection::FanOut(values) => TreeValue::Sequence(values),
        }
    }

    /// Wraps the whole selection as the single unit of a fan-out.
    pub fn wrapped(self) -> Selection {
        Selection::FanOut(vec![self.into_value()])
    }
}

enum Cursor<'a> {
    Node(&'a TreeValue),
    FanOut(Vec<Cow<'a, TreeValue>>),
}

enum Shape<'a> {
    Mapping(&'a IndexMap<String, TreeValue>),
    Items(Vec<Cow<'a, TreeValue>>),
    Scalar,
}

impl<'a> Cursor<'a> {
    fn shape(self) -> Shape<'a> {
        match self {
            Cursor::Node(TreeValue::Mapping(entries)) => Shape::Mapping(entries),
            Cursor::Node(TreeValue::Sequence(items)) => {
                Shape::Items(items.iter().map(Cow::Borrowed).collect())
            }
            Cursor::Node(_) => Shape::Scalar,
            Cursor::FanOut(items) => Shape::Items(items),
        }
    }

    /// A sequence whose first element is itself a sequence.
    fn is_super_list(&self) -> bool {
        let first = match self {
            Cursor::Node(TreeValue::Sequence(items)) => items.first(),
            Cursor::FanOut(items) => items.first().map(|item| &**item),
            Cursor::Node(_) => None,
        };
        matches!(first, Some(TreeValue::Sequence(_)))
    }

    fn len(&self) -> usize {
        match self {
            Cursor::Node(_) => 1,
            Cursor::FanOut(items) => items.len(),
        }
    }

    fn into_selection(self) -> Selection {
        match self {
            Cursor::Node(node) => Selection::Node(node.clone()),
            Cursor::FanOut(items) => {
                Selection::FanOut(items.into_iter().map(Cow::into_owned).collect())
            }
        }
    }
}

/// Flattens one level; non-sequence items are kept as they are.
fn flatten(items: Vec<Cow<'_, TreeValue>>) -> Vec<Cow<'_, TreeValue>> {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Cow::Borrowed(TreeValue::Sequence(inner)) => {
                flat.extend(inner.iter().map(Cow::Borrowed))
            }
            Cow::Owned(TreeValue::Sequence(inner)) => {
                flat.extend(inner.into_iter().map(Cow::Owned))
            }
            other => flat.push(other),
        }
    }
    flat
}

/// Collects leaf values depth-first. Empty containers contribute nothing.
fn leaves<'v>(value: &'v TreeValue, out: &mut Vec<&'v TreeValue>) {
    match value {
        TreeValue::Mapping(entries) => entries.values().for_each(|v| leaves(v, out)),
        TreeValue::Sequence(items) => items.iter().for_each(|v| leaves(v, out)),
        scalar => out.push(scalar),
    }
}

/// Resolves paths against a root tree.
pub struct Evaluator<'a> {
    root: &'a TreeValue,
    force_present: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a TreeValue) -> Self {
        Evaluator {
            root,
            force_present: false,
        }
    }

    /// Requires every key and filter along the path to exist.
    pub fn force_present(mut self, force_present: bool) -> Self {
        self.force_present = force_present;
        self
    }

    /// Resolves `path` into a selection.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::querypath::{Evaluator, Path, Selection};
    /// use quillcheck::document::parse_yaml;
    ///
    /// let tree = parse_yaml("members:\n  - name: Ginger\n  - name: Eric\n").unwrap();
    /// let selection = Evaluator::new(&tree).evaluate(&Path::from("members name")).unwrap();
    /// assert_eq!(selection.unit_count(), 2);
    /// ```
    pub fn evaluate(&self, path: &Path) -> Result<Selection, PathNotFound> {
        debug!(
            "Resolving path {} (force_present={})",
            path, self.force_present
        );
        let mut cursor = Cursor::Node(self.root);
        let mut index = 0;
        while let Some(segment) = path.segments.get(index) {
            if cursor.is_super_list() {
                cursor = match cursor.shape() {
                    Shape::Items(items) => Cursor::FanOut(flatten(items)),
                    _ => Cursor::FanOut(Vec::new()),
                };
                continue;
            }
            cursor = self.step(cursor, segment, path)?;
            trace!("Segment {} matched {} node(s)", segment, cursor.len());
            index += 1;
        }
        Ok(cursor.into_selection())
    }

    fn step(
        &self,
        cursor: Cursor<'a>,
        segment: &PathSegment,
        path: &Path,
    ) -> Result<Cursor<'a>, PathNotFound> {
        let not_found = || PathNotFound {
            segment: segment.clone(),
            path: path.clone(),
        };

        match segment {
            PathSegment::RecursiveWildcard => Ok(Cursor::FanOut(expand_leaves(cursor))),
            PathSegment::Wildcard => Ok(Cursor::FanOut(match cursor.shape() {
                Shape::Mapping(entries) => entries.values().map(Cow::Borrowed).collect(),
                Shape::Items(items) => items.into_iter().filter_map(child_group).collect(),
                Shape::Scalar => Vec::new(),
            })),
            PathSegment::Filter { key, value } => match cursor.shape() {
                Shape::Items(items) => {
                    let mut kept = Vec::new();
                    for item in items {
                        let keep = match item.get(key) {
                            Some(found) => found == value,
                            None if self.force_present => return Err(not_found()),
                            None => false,
                        };
                        if keep {
                            kept.push(item);
                        }
                    }
                    Ok(Cursor::FanOut(kept))
                }
                _ if self.force_present => Err(not_found()),
                _ => Ok(Cursor::FanOut(Vec::new())),
            },
            PathSegment::Key(key) => match cursor.shape() {
                Shape::Mapping(entries) => match entries.get(key) {
                    Some(child) => Ok(Cursor::Node(child)),
                    None if self.force_present => Err(not_found()),
                    None => Ok(Cursor::FanOut(Vec::new())),
                },
                Shape::Items(items) => {
                    let mut values = Vec::new();
                    for item in items {
                        let child = match item {
                            Cow::Borrowed(node) => node.get(key).map(Cow::Borrowed),
                            Cow::Owned(node) => node.get(key).cloned().map(Cow::Owned),
                        };
                        match child {
                            Some(child) => values.push(child),
                            None if self.force_present => return Err(not_found()),
                            None => {}
                        }
                    }
                    Ok(Cursor::FanOut(values))
                }
                Shape::Scalar if self.force_present => Err(not_found()),
                Shape::Scalar => Ok(Cursor::FanOut(Vec::new())),
            },
        }
    }
}

/// `*` applied to one element of a sequence.
fn child_group(item: Cow<'_, TreeValue>) -> Option<Cow<'_, TreeValue>> {
    if item.is_sequence() {
        return Some(item);
    }
    item.as_mapping()
        .map(|entries| Cow::Owned(TreeValue::Sequence(entries.values().cloned().collect())))
}

fn expand_leaves(cursor: Cursor<'_>) -> Vec<Cow<'_, TreeValue>> {
    match cursor {
        Cursor::Node(node) => {
            let mut found = Vec::new();
            leaves(node, &mut found);
            found.into_iter().map(Cow::Borrowed).collect()
        }
        Cursor::FanOut(items) => {
            let mut expanded = Vec::new();
            for item in items {
                match item {
                    Cow::Borrowed(node) => {
                        let mut found = Vec::new();
                        leaves(node, &mut found);
                        expanded.extend(found.into_iter().map(Cow::Borrowed));
                    }
                    Cow::Owned(node) => {
                        let mut found = Vec::new();
                        leaves(&node, &mut found);
                        expanded.extend(found.into_iter().cloned().map(Cow::Owned));
                    }
                }
            }
            expanded
        }
    }
}

/// Resolves `path` against `root`.
pub fn resolve(
    root: &TreeValue,
    path: &Path,
    force_present: bool,
) -> Result<Selection, PathNotFound> {
    Evaluator::new(root)
        .force_present(force_present)
        .evaluate(path)
}
