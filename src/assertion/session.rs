//! Assertion sessions over a data tree.

use super::bound::Quantifier;
use super::error::AssertionError;
use super::selector::Selector;
use crate::document::node::TreeValue;
use crate::querypath::{resolve, Path};
use log::debug;

/// A tree under test, with an optional path prefix applied to every query.
///
/// # Example
///
/// ```
/// use quillcheck::assertion::Session;
/// use serde_json::json;
///
/// let cream = Session::with_prefix(
///     json!({"band": {"members": [{"name": "Jack"}, {"name": "Ginger"}, {"name": "Eric"}]}}),
///     "band",
/// );
/// cream.exactly(3, "members name").unwrap().has_some_of(vec!["Jack", "Ginger", "Eric"]).unwrap();
/// cream.no("members name").unwrap().has("Pete").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    tree: TreeValue,
    prefix: Path,
}

impl Session {
    pub fn new(tree: impl Into<TreeValue>) -> Self {
        Session {
            tree: tree.into(),
            prefix: Path::root(),
        }
    }

    pub fn with_prefix(tree: impl Into<TreeValue>, prefix: impl Into<Path>) -> Self {
        Session {
            tree: tree.into(),
            prefix: prefix.into(),
        }
    }

    pub fn tree(&self) -> &TreeValue {
        &self.tree
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Resolves `prefix ++ path` and applies the quantifier's bound.
    pub fn quantify(
        &self,
        quantifier: Quantifier,
        path: impl Into<Path>,
    ) -> Result<Selector, AssertionError> {
        let path = self.prefix.clone().join(path);
        let selection = resolve(&self.tree, &path, quantifier.force_present())?;
        let bound = quantifier.bound(&selection);
        debug!(
            "{} on path {}: {} unit(s), bound {:?}",
            quantifier,
            path,
            selection.unit_count(),
            bound
        );
        let wrapped = quantifier.wraps();
        let selection = if wrapped {
            selection.wrapped()
        } else {
            selection
        };
        Ok(Selector::new(path, selection, bound, wrapped))
    }

    /// The whole selection, matched as one value.
    pub fn select(&self, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::Default, path)
    }

    /// Every unit of the selection; a missing path selects nothing.
    pub fn every_existent(&self, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::EveryExistent, path)
    }

    /// Every unit of the selection; a missing key or filter is an error.
    pub fn every(&self, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::Every, path)
    }

    pub fn exactly(&self, n: usize, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::Exactly(n), path)
    }

    pub fn at_least(&self, n: usize, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::AtLeast(n), path)
    }

    pub fn at_most(&self, n: usize, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::AtMost(n), path)
    }

    pub fn one(&self, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::One, path)
    }

    pub fn some(&self, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::Some, path)
    }

    pub fn no(&self, path: impl Into<Path>) -> Result<Selector, AssertionError> {
        self.quantify(Quantifier::No, path)
    }
}
