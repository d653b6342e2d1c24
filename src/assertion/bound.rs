//! Cardinality bounds and the quantifiers that build them.

use crate::querypath::Selection;
use std::fmt;

/// How many units of a selection must match.
///
/// Satisfied when at least `min` units match and fewer than `max` do. `max`
/// is exclusive; `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub min: usize,
    pub max: Option<usize>,
}

impl Bound {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Bound { min, max }
    }

    pub fn exactly(n: usize) -> Self {
        Bound::new(n, Some(n + 1))
    }

    pub fn at_least(n: usize) -> Self {
        Bound::new(n, None)
    }

    pub fn at_most(n: usize) -> Self {
        Bound::new(0, Some(n + 1))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (0, Some(max)) => write!(f, "< {}", max),
            (0, None) => f.write_str(">= 0"),
            (min, _) => write!(f, "= {}", min),
        }
    }
}

/// A named bound constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// The whole selection as one unit, matched exactly once
    Default,
    /// Every unit of the selection; missing paths select nothing
    EveryExistent,
    /// Every unit of the selection; missing paths are an error
    Every,
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
    One,
    Some,
    No,
}

impl Quantifier {
    /// Whether missing keys and filters fail the resolution.
    pub fn force_present(&self) -> bool {
        matches!(self, Quantifier::Every)
    }

    /// Whether the selection is evaluated as a single unit.
    pub fn wraps(&self) -> bool {
        matches!(self, Quantifier::Default)
    }

    /// The bound for `selection`, which must be the unwrapped resolution.
    ///
    /// # Example
    ///
    /// ```
    /// use quillcheck::assertion::{Bound, Quantifier};
    /// use quillcheck::querypath::Selection;
    /// use quillcheck::document::node::TreeValue;
    ///
    /// let selection = Selection::Node(TreeValue::from(vec![1, 2, 3]));
    /// assert_eq!(Quantifier::Every.bound(&selection), Bound::at_least(3));
    /// assert_eq!(Quantifier::No.bound(&selection), Bound::new(0, Some(1)));
    /// ```
    pub fn bound(&self, selection: &Selection) -> Bound {
        match *self {
            Quantifier::Default => Bound::new(1, Some(2)),
            Quantifier::EveryExistent | Quantifier::Every => {
                Bound::at_least(selection.unit_count())
            }
            Quantifier::Exactly(n) => Bound::exactly(n),
            Quantifier::AtLeast(n) => Bound::at_least(n),
            Quantifier::AtMost(n) => Bound::at_most(n),
            Quantifier::One => Bound::exactly(1),
            Quantifier::Some => Bound::at_least(1),
            Quantifier::No => Bound::at_most(0),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Default => f.write_str("select"),
            Quantifier::EveryExistent => f.write_str("every_existent"),
            Quantifier::Every => f.write_str("every"),
            Quantifier::Exactly(n) => write!(f, "exactly({})", n),
            Quantifier::AtLeast(n) => write!(f, "at_least({})", n),
            Quantifier::AtMost(n) => write!(f, "at_most({})", n),
            Quantifier::One => f.write_str("one"),
            Quantifier::Some => f.write_str("some"),
            Quantifier::No => f.write_str("no"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::TreeValue;

    #[test]
    fn test_quantifier_table() {
        let selection = Selection::FanOut(vec![TreeValue::from(1), TreeValue::from(2)]);
        assert_eq!(Quantifier::Default.bound(&selection), Bound::new(1, Some(2)));
        assert_eq!(Quantifier::EveryExistent.bound(&selection), Bound::new(2, None));
        assert_eq!(Quantifier::Every.bound(&selection), Bound::new(2, None));
        assert_eq!(Quantifier::Exactly(3).bound(&selection), Bound::new(3, Some(4)));
        assert_eq!(Quantifier::AtLeast(3).bound(&selection), Bound::new(3, None));
        assert_eq!(Quantifier::AtMost(3).bound(&selection), Bound::new(0, Some(4)));
        assert_eq!(Quantifier::One.bound(&selection), Bound::exactly(1));
        assert_eq!(Quantifier::Some.bound(&selection), Bound::at_least(1));
        assert_eq!(Quantifier::No.bound(&selection), Bound::at_most(0));
    }

    #[test]
    fn test_every_on_empty_fan_out_is_vacuous() {
        let bound = Quantifier::Every.bound(&Selection::FanOut(vec![]));
        assert_eq!(bound.min, 0);
    }

    #[test]
    fn test_only_every_forces_presence() {
        assert!(Quantifier::Every.force_present());
        assert!(!Quantifier::EveryExistent.force_present());
        assert!(Quantifier::Default.wraps());
        assert!(!Quantifier::One.wraps());
    }

    #[test]
    fn test_bound_display() {
        assert_eq!(Bound::exactly(2).to_string(), "= 2");
        assert_eq!(Bound::at_most(0).to_string(), "< 1");
        assert_eq!(Bound::at_least(0).to_string(), ">= 0");
    }
}
