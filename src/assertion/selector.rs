//! Quantified selections and the assertion verbs.

use super::bound::Bound;
use super::error::{AssertionError, Violation};
use super::matcher::{Comparator, DefaultComparison, Matcher, Mode, Property};
use crate::document::canonical::{canonicalize, distinct_count};
use crate::document::node::{Kind, TreeValue};
use crate::querypath::{Path, Selection};
use log::{debug, trace};
use regex::Regex;

/// Explicit comparison options for `has_with`, `has_some_of_with` and
/// `has_not_with`.
///
/// The property is applied to each actual value before the comparator sees
/// it. Without a comparator the default comparison of the unit is used.
#[derive(Default)]
pub struct Check<'f> {
    comparator: Option<Box<dyn Fn(&TreeValue, &TreeValue) -> bool + 'f>>,
    property: Option<Box<dyn Fn(&TreeValue) -> TreeValue + 'f>>,
}

impl<'f> Check<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comparator, called as `comparator(actual, expected)`.
    pub fn comparator(
        mut self,
        comparator: impl Fn(&TreeValue, &TreeValue) -> bool + 'f,
    ) -> Self {
        self.comparator = Some(Box::new(comparator));
        self
    }

    /// Sets the property applied to each actual value.
    pub fn property(mut self, property: impl Fn(&TreeValue) -> TreeValue + 'f) -> Self {
        self.property = Some(Box::new(property));
        self
    }
}

/// A selection under a cardinality bound.
///
/// Every verb walks the units of the selection and fails with a
/// [`Violation`] as soon as the bound can no longer be met.
#[derive(Debug, Clone)]
pub struct Selector {
    path: Path,
    selection: Selection,
    bound: Bound,
    wrapped: bool,
}

impl Selector {
    pub fn new(path: Path, selection: Selection, bound: Bound, wrapped: bool) -> Self {
        Selector {
            path,
            selection,
            bound,
            wrapped,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// Every unit matches `content` (every item of a sequence, every entry of
    /// a mapping).
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::assertion::Session;
    /// use serde_json::json;
    ///
    /// let band = Session::new(json!({"members": ["Jack", "Ginger", "Eric"]}));
    /// band.select("members").unwrap().has(vec!["Eric", "Jack"]).unwrap();
    /// assert!(band.select("members").unwrap().has("Pete").is_err());
    /// ```
    pub fn has(&self, content: impl Into<TreeValue>) -> Result<(), AssertionError> {
        self.has_with(content, &Check::new())
    }

    pub fn has_with(
        &self,
        content: impl Into<TreeValue>,
        check: &Check<'_>,
    ) -> Result<(), AssertionError> {
        self.run_check(content.into(), check, Mode::All, false)
    }

    /// Like [`has`](Self::has), but one item or entry of the content is
    /// enough.
    pub fn has_some_of(&self, content: impl Into<TreeValue>) -> Result<(), AssertionError> {
        self.has_some_of_with(content, &Check::new())
    }

    pub fn has_some_of_with(
        &self,
        content: impl Into<TreeValue>,
        check: &Check<'_>,
    ) -> Result<(), AssertionError> {
        self.run_check(content.into(), check, Mode::Any, false)
    }

    /// Like [`has`](Self::has) with the comparison negated.
    pub fn has_not(&self, content: impl Into<TreeValue>) -> Result<(), AssertionError> {
        self.has_not_with(content, &Check::new())
    }

    pub fn has_not_with(
        &self,
        content: impl Into<TreeValue>,
        check: &Check<'_>,
    ) -> Result<(), AssertionError> {
        self.run_check(content.into(), check, Mode::All, true)
    }

    pub fn has_all<I, T>(&self, items: I) -> Result<(), AssertionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TreeValue>,
    {
        items.into_iter().try_for_each(|item| self.has(item))
    }

    pub fn has_some_of_all<I, T>(&self, items: I) -> Result<(), AssertionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TreeValue>,
    {
        items.into_iter().try_for_each(|item| self.has_some_of(item))
    }

    pub fn has_not_all<I, T>(&self, items: I) -> Result<(), AssertionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TreeValue>,
    {
        items.into_iter().try_for_each(|item| self.has_not(item))
    }

    /// Fails when fewer distinct units exist than the bound requires.
    pub fn has_no_duplicates(&self) -> Result<(), AssertionError> {
        let units = self.selection.units();
        let distinct = distinct_count(units)?;
        trace!("{} distinct unit(s) out of {}", distinct, units.len());
        if self.bound.min > distinct {
            return Err(self.violation(
                distinct,
                None,
                Some("duplicates found".to_string()),
            ));
        }
        Ok(())
    }

    pub fn has_no_nones(&self) -> Result<(), AssertionError> {
        self.has_not(TreeValue::Null)
    }

    /// Compares the length of each unit (characters, elements or entries)
    /// with `length`.
    pub fn has_length(&self, length: usize) -> Result<(), AssertionError> {
        self.has_length_by(length, |actual, expected| actual == expected)
    }

    /// Compares the length of each unit using `comparator(length, expected)`.
    ///
    /// ```
    /// use quillcheck::assertion::{ops, Session};
    /// use serde_json::json;
    ///
    /// let users = Session::new(json!(["ada", "grace", "linus"]));
    /// users.select("").unwrap().has_length_by(1, ops::gt).unwrap();
    /// ```
    pub fn has_length_by(
        &self,
        length: usize,
        comparator: impl Fn(&TreeValue, &TreeValue) -> bool,
    ) -> Result<(), AssertionError> {
        let compare = |actual: &TreeValue, expected: &TreeValue| -> Result<bool, AssertionError> {
            Ok(comparator(actual, expected))
        };
        let measure = |value: &TreeValue| {
            value
                .len()
                .map(TreeValue::from)
                .ok_or_else(|| AssertionError::Comparison {
                    message: format!("{} value {} has no length", value.kind(), value),
                })
        };
        let matcher = Matcher::new(Mode::All)
            .comparator(Some(&compare))
            .property(Some(&measure))
            .whole_value();
        self.consume(&TreeValue::from(length), &matcher)
    }

    /// Each unit is a string matching `pattern`, or a sequence holding one.
    pub fn matches(&self, pattern: &str) -> Result<(), AssertionError> {
        let regex = Regex::new(pattern).map_err(|err| AssertionError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;
        let compare = |actual: &TreeValue, _: &TreeValue| -> Result<bool, AssertionError> {
            Ok(match actual {
                TreeValue::String(text) => regex.is_match(text),
                TreeValue::Sequence(items) => items
                    .iter()
                    .filter_map(TreeValue::as_str)
                    .any(|text| regex.is_match(text)),
                _ => false,
            })
        };
        let matcher = Matcher::new(Mode::All)
            .comparator(Some(&compare))
            .whole_value();
        self.consume(&TreeValue::from(pattern), &matcher)
    }

    pub fn matches_all<'p, I>(&self, patterns: I) -> Result<(), AssertionError>
    where
        I: IntoIterator<Item = &'p str>,
    {
        patterns
            .into_iter()
            .try_for_each(|pattern| self.matches(pattern))
    }

    /// Each unit equals `content`. Sequences and mappings are compared
    /// without regard to order or repetition.
    ///
    /// ```
    /// use quillcheck::assertion::Session;
    /// use serde_json::json;
    ///
    /// let primes = Session::new(json!({"primes": [2, 3, 5, 7]}));
    /// primes.select("primes").unwrap().is_(vec![7, 5, 3, 2, 2]).unwrap();
    /// ```
    pub fn is_(&self, content: impl Into<TreeValue>) -> Result<(), AssertionError> {
        self.compare_whole(content.into(), false)
    }

    pub fn is_not(&self, content: impl Into<TreeValue>) -> Result<(), AssertionError> {
        self.compare_whole(content.into(), true)
    }

    pub fn is_all<I, T>(&self, items: I) -> Result<(), AssertionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TreeValue>,
    {
        items.into_iter().try_for_each(|item| self.is_(item))
    }

    /// Each unit equals `content`, order included.
    pub fn is_ordered(&self, content: impl Into<TreeValue>) -> Result<(), AssertionError> {
        let equal = |actual: &TreeValue, expected: &TreeValue| -> Result<bool, AssertionError> {
            Ok(actual == expected)
        };
        let matcher = Matcher::new(Mode::All)
            .comparator(Some(&equal))
            .whole_value();
        self.consume(&content.into(), &matcher)
    }

    pub fn is_a(&self, kind: Kind) -> Result<(), AssertionError> {
        let compare = |actual: &TreeValue, _: &TreeValue| -> Result<bool, AssertionError> {
            Ok(kind.matches(actual))
        };
        let matcher = Matcher::new(Mode::All)
            .comparator(Some(&compare))
            .whole_value();
        self.consume(&TreeValue::from(kind.name()), &matcher)
    }

    pub fn is_none(&self) -> Result<(), AssertionError> {
        self.is_(TreeValue::Null)
    }

    pub fn is_not_none(&self) -> Result<(), AssertionError> {
        self.is_not(TreeValue::Null)
    }

    /// Each unit is the boolean `true` (not merely truthy).
    pub fn is_true(&self) -> Result<(), AssertionError> {
        self.is_ordered(true)
    }

    pub fn is_false(&self) -> Result<(), AssertionError> {
        self.is_ordered(false)
    }

    /// Each unit is truthy: not `null`, `false`, zero or empty.
    pub fn evals_true(&self) -> Result<(), AssertionError> {
        self.compare_truthiness(true)
    }

    pub fn evals_false(&self) -> Result<(), AssertionError> {
        self.compare_truthiness(false)
    }

    fn compare_truthiness(&self, wanted: bool) -> Result<(), AssertionError> {
        let compare = |actual: &TreeValue, _: &TreeValue| -> Result<bool, AssertionError> {
            Ok(!actual.is_emptylike() == wanted)
        };
        let matcher = Matcher::new(Mode::All)
            .comparator(Some(&compare))
            .whole_value();
        self.consume(&TreeValue::from(wanted), &matcher)
    }

    fn compare_whole(&self, content: TreeValue, negate: bool) -> Result<(), AssertionError> {
        if content.is_container() {
            let expected = canonicalize(&content)?;
            let compare = |actual: &TreeValue, _: &TreeValue| -> Result<bool, AssertionError> {
                Ok((canonicalize(actual)? == expected) != negate)
            };
            let matcher = Matcher::new(Mode::All)
                .comparator(Some(&compare))
                .whole_value();
            self.consume(&content, &matcher)
        } else {
            let compare = |actual: &TreeValue, expected: &TreeValue| -> Result<bool, AssertionError> {
                Ok((actual == expected) != negate)
            };
            let matcher = Matcher::new(Mode::All)
                .comparator(Some(&compare))
                .whole_value();
            self.consume(&content, &matcher)
        }
    }

    fn run_check(
        &self,
        content: TreeValue,
        check: &Check<'_>,
        mode: Mode,
        negate: bool,
    ) -> Result<(), AssertionError> {
        let property = check
            .property
            .as_deref()
            .map(|property| {
                move |value: &TreeValue| -> Result<TreeValue, AssertionError> { Ok(property(value)) }
            });
        let property = property.as_ref().map(|p| p as &Property<'_>);

        // has_not resolves its comparison once, from the first unit
        let negated_default = self
            .selection
            .units()
            .first()
            .map_or(DefaultComparison::Equal, DefaultComparison::resolve);
        let comparator = |actual: &TreeValue, expected: &TreeValue| -> Result<bool, AssertionError> {
            let passed = match &check.comparator {
                Some(comparator) => comparator(actual, expected),
                None => negated_default.compare(actual, expected),
            };
            Ok(passed != negate)
        };
        let comparator: Option<&Comparator<'_>> = if negate || check.comparator.is_some() {
            Some(&comparator)
        } else {
            None
        };

        let matcher = Matcher::new(mode)
            .comparator(comparator)
            .property(property);
        self.consume(&content, &matcher)
    }

    /// Walks the units of the selection against the bound.
    fn consume(&self, content: &TreeValue, matcher: &Matcher<'_>) -> Result<(), AssertionError> {
        let units = self.selection.units();
        let mut min = self.bound.min;
        let mut max = self.bound.max;
        let mut matched = 0;
        let mut index = 0;

        loop {
            if max == Some(0) {
                debug!("Bound {} exceeded on path {}", self.bound, self.path);
                return Err(self.violation(matched, Some(content.clone()), None));
            }

            let remaining = units.len() - index;
            if remaining == 0 {
                if min > 0 {
                    debug!("Bound {} not reached on path {}", self.bound, self.path);
                    return Err(self.violation(matched, Some(content.clone()), None));
                }
                return Ok(());
            }

            if min == 0 && max.map_or(true, |max| max > remaining) {
                return Ok(());
            }

            let found = usize::from(matcher.check(&units[index], content)?);
            trace!("Unit {} of {} matched: {}", index + 1, units.len(), found == 1);
            min = min.saturating_sub(found);
            max = max.map(|max| max - found);
            matched += found;
            index += 1;
        }
    }

    fn violation(
        &self,
        matched: usize,
        content: Option<TreeValue>,
        detail: Option<String>,
    ) -> AssertionError {
        let selection = match (&self.selection, self.wrapped) {
            (Selection::FanOut(values), true) if values.len() == 1 => values[0].clone(),
            _ => self.selection.to_value(),
        };
        AssertionError::BoundViolation(Box::new(Violation {
            path: self.path.clone(),
            selection,
            bound: self.bound,
            matched,
            content,
            detail,
        }))
    }
}
