//! Structural matching of one selection unit against expected content.
//!
//! Sequence and mapping content is interpreted structurally: every item of a
//! sequence is compared on its own, and mapping content is a partial match
//! against the unit's keys (nested mappings descend into nested keys).
//! Scalars, and lists found inside mapping content, are compared whole.

use super::error::AssertionError;
use crate::document::node::TreeValue;
use indexmap::IndexMap;

/// Fallible comparison of an actual value with an expected one.
pub type Comparator<'f> = dyn Fn(&TreeValue, &TreeValue) -> Result<bool, AssertionError> + 'f;

/// Fallible projection applied to the actual value before comparing.
pub type Property<'f> = dyn Fn(&TreeValue) -> Result<TreeValue, AssertionError> + 'f;

static NULL: TreeValue = TreeValue::Null;

/// How the results of individual comparisons combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every comparison must hold
    All,
    /// At least one comparison must hold
    Any,
}

/// The comparison used when the caller does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultComparison {
    /// The expected value is an element of the actual sequence
    Contains,
    /// The expected string occurs in the actual string
    Substring,
    Equal,
}

impl DefaultComparison {
    /// Picks the comparison from the shape of a selection unit.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::assertion::matcher::DefaultComparison;
    /// use quillcheck::document::node::TreeValue;
    ///
    /// assert_eq!(DefaultComparison::resolve(&TreeValue::from(vec![1])), DefaultComparison::Contains);
    /// assert_eq!(DefaultComparison::resolve(&TreeValue::from("abc")), DefaultComparison::Substring);
    /// assert_eq!(DefaultComparison::resolve(&TreeValue::from(1)), DefaultComparison::Equal);
    /// ```
    pub fn resolve(unit: &TreeValue) -> Self {
        match unit {
            TreeValue::Sequence(_) => DefaultComparison::Contains,
            TreeValue::String(_) => DefaultComparison::Substring,
            _ => DefaultComparison::Equal,
        }
    }

    pub fn compare(&self, actual: &TreeValue, expected: &TreeValue) -> bool {
        match self {
            DefaultComparison::Contains => super::ops::contains(actual, expected),
            DefaultComparison::Substring => match (actual, expected) {
                (_, TreeValue::Null) => actual.is_null(),
                (TreeValue::String(haystack), TreeValue::String(needle)) => {
                    haystack.contains(needle.as_str())
                }
                _ => false,
            },
            DefaultComparison::Equal => actual == expected,
        }
    }
}

/// Compares selection units with content under one set of rules.
pub struct Matcher<'m> {
    comparator: Option<&'m Comparator<'m>>,
    property: Option<&'m Property<'m>>,
    mode: Mode,
    structural: bool,
}

impl<'m> Matcher<'m> {
    /// A structural matcher using the default comparison and no property.
    pub fn new(mode: Mode) -> Self {
        Matcher {
            comparator: None,
            property: None,
            mode,
            structural: true,
        }
    }

    pub fn comparator(mut self, comparator: Option<&'m Comparator<'m>>) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn property(mut self, property: Option<&'m Property<'m>>) -> Self {
        self.property = property;
        self
    }

    /// Compares sequence and mapping content as whole values.
    pub fn whole_value(mut self) -> Self {
        self.structural = false;
        self
    }

    /// Returns whether `unit` matches `content`.
    pub fn check(&self, unit: &TreeValue, content: &TreeValue) -> Result<bool, AssertionError> {
        let default = DefaultComparison::resolve(unit);
        match content {
            TreeValue::Sequence(items) if self.structural => {
                for item in items {
                    let passed = self.compare_at(unit, &[], item, default)?;
                    if let Some(decided) = self.short_circuit(passed) {
                        return Ok(decided);
                    }
                }
                Ok(self.mode == Mode::All)
            }
            TreeValue::Mapping(entries) if self.structural => {
                self.check_entries(unit, &mut Vec::new(), entries, default)
            }
            _ => self.compare_at(unit, &[], content, default),
        }
    }

    /// Checks mapping content below `keys`. Scalar entries are checked before
    /// nested mappings.
    fn check_entries<'c>(
        &self,
        unit: &TreeValue,
        keys: &mut Vec<&'c str>,
        entries: &'c IndexMap<String, TreeValue>,
        default: DefaultComparison,
    ) -> Result<bool, AssertionError> {
        let mut nested = Vec::new();
        for (key, expected) in entries {
            if let TreeValue::Mapping(inner) = expected {
                nested.push((key.as_str(), inner));
                continue;
            }
            keys.push(key);
            let passed = self.compare_at(unit, keys, expected, default);
            keys.pop();
            if let Some(decided) = self.short_circuit(passed?) {
                return Ok(decided);
            }
        }

        for (key, inner) in nested {
            keys.push(key);
            let passed = self.check_entries(unit, keys, inner, default);
            keys.pop();
            if let Some(decided) = self.short_circuit(passed?) {
                return Ok(decided);
            }
        }
        Ok(self.mode == Mode::All)
    }

    fn short_circuit(&self, passed: bool) -> Option<bool> {
        match (self.mode, passed) {
            (Mode::All, false) => Some(false),
            (Mode::Any, true) => Some(true),
            _ => None,
        }
    }

    fn compare_at(
        &self,
        unit: &TreeValue,
        keys: &[&str],
        expected: &TreeValue,
        default: DefaultComparison,
    ) -> Result<bool, AssertionError> {
        let target = lookup(unit, keys);
        match self.property {
            Some(property) => {
                let projected = property(target)?;
                self.compare(&projected, expected, default)
            }
            None => self.compare(target, expected, default),
        }
    }

    fn compare(
        &self,
        actual: &TreeValue,
        expected: &TreeValue,
        default: DefaultComparison,
    ) -> Result<bool, AssertionError> {
        match self.comparator {
            Some(comparator) => comparator(actual, expected),
            None => Ok(default.compare(actual, expected)),
        }
    }
}

/// Follows `keys` through nested mappings. A missing key or a non-mapping
/// along the way yields `null`.
fn lookup<'u>(unit: &'u TreeValue, keys: &[&str]) -> &'u TreeValue {
    let mut current = unit;
    for key in keys {
        match current.get(key) {
            Some(next) => current = next,
            None => return &NULL,
        }
    }
    current
}
