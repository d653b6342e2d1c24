//! Canonical, order-independent form of tree values.
//!
//! Canonical forms back the unordered comparisons (`is_`, `is_not`) and the
//! duplicate detection of `has_no_duplicates`. Only the outermost sequence is
//! treated as a set: it is sorted and deduplicated. Nested sequences keep their
//! order, and mapping entries are always sorted by key.

use super::node::{TreeNumber, TreeValue};
use std::cmp::Ordering;
use std::fmt;

/// Canonical representation of a [`TreeValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Canonical {
    /// A scalar, passed through unchanged
    Scalar(TreeValue),
    /// A sequence (sorted and deduplicated at the top level, ordered below it)
    Sequence(Vec<Canonical>),
    /// Mapping entries sorted by key
    Entries(Vec<(String, Canonical)>),
}

/// Raised when values cannot be put in a total order.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalError {
    /// A NaN number was found while sorting.
    Unorderable { value: String },
}

impl fmt::Display for CanonicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalError::Unorderable { value } => {
                write!(f, "Value {} cannot be ordered against its siblings", value)
            }
        }
    }
}

impl std::error::Error for CanonicalError {}

/// Converts `value` into its canonical form.
///
/// # Example
///
/// ```
/// use quillcheck::document::canonical::canonicalize;
/// use quillcheck::document::node::TreeValue;
///
/// let a = canonicalize(&TreeValue::from(vec![3, 1, 2, 1])).unwrap();
/// let b = canonicalize(&TreeValue::from(vec![1, 2, 3])).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn canonicalize(value: &TreeValue) -> Result<Canonical, CanonicalError> {
    match value {
        TreeValue::Sequence(items) => {
            let frozen = items.iter().map(freeze).collect();
            Ok(Canonical::Sequence(sort_unique(frozen)?))
        }
        other => Ok(freeze(other)),
    }
}

/// Counts the distinct values among `values` after canonicalization.
pub fn distinct_count<'a, I>(values: I) -> Result<usize, CanonicalError>
where
    I: IntoIterator<Item = &'a TreeValue>,
{
    let frozen = values.into_iter().map(freeze).collect();
    Ok(sort_unique(frozen)?.len())
}

/// Compares two values in the cross-kind canonical order.
///
/// ```
/// use quillcheck::document::canonical::compare;
/// use quillcheck::document::node::TreeValue;
/// use std::cmp::Ordering;
///
/// let ordering = compare(&TreeValue::from(3), &TreeValue::from("a")).unwrap();
/// assert_eq!(ordering, Ordering::Less);
/// ```
pub fn compare(a: &TreeValue, b: &TreeValue) -> Result<Ordering, CanonicalError> {
    let (a, b) = (freeze(a), freeze(b));
    if let Some(nan) = a.find_nan().or_else(|| b.find_nan()) {
        return Err(CanonicalError::Unorderable {
            value: nan.to_string(),
        });
    }
    Ok(a.total_cmp(&b))
}

/// Sorts `values` in the canonical order, keeping duplicates and the
/// relative order of equal values.
pub fn sort_values(values: &[TreeValue]) -> Result<Vec<TreeValue>, CanonicalError> {
    let mut keyed: Vec<(Canonical, &TreeValue)> =
        values.iter().map(|value| (freeze(value), value)).collect();
    if let Some(nan) = keyed.iter().find_map(|(key, _)| key.find_nan()) {
        return Err(CanonicalError::Unorderable {
            value: nan.to_string(),
        });
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, value)| value.clone()).collect())
}

fn freeze(value: &TreeValue) -> Canonical {
    match value {
        TreeValue::Sequence(items) => Canonical::Sequence(items.iter().map(freeze).collect()),
        TreeValue::Mapping(entries) => {
            let mut pairs: Vec<(String, Canonical)> = entries
                .iter()
                .map(|(key, value)| (key.clone(), freeze(value)))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            Canonical::Entries(pairs)
        }
        scalar => Canonical::Scalar(scalar.clone()),
    }
}

fn sort_unique(mut items: Vec<Canonical>) -> Result<Vec<Canonical>, CanonicalError> {
    if let Some(nan) = items.iter().find_map(Canonical::find_nan) {
        return Err(CanonicalError::Unorderable {
            value: nan.to_string(),
        });
    }
    items.sort_by(Canonical::total_cmp);
    items.dedup();
    Ok(items)
}

impl Canonical {
    /// Position of the value's kind in the cross-kind order.
    fn rank(&self) -> u8 {
        match self {
            Canonical::Scalar(TreeValue::Null) => 0,
            Canonical::Scalar(TreeValue::Bool(_)) => 1,
            Canonical::Scalar(TreeValue::Number(_)) => 2,
            Canonical::Scalar(TreeValue::String(_)) => 3,
            // freeze never leaves containers inside Scalar
            Canonical::Scalar(_) => 4,
            Canonical::Sequence(_) => 5,
            Canonical::Entries(_) => 6,
        }
    }

    fn find_nan(&self) -> Option<TreeNumber> {
        match self {
            Canonical::Scalar(TreeValue::Number(n)) if n.is_nan() => Some(*n),
            Canonical::Scalar(_) => None,
            Canonical::Sequence(items) => items.iter().find_map(Canonical::find_nan),
            Canonical::Entries(pairs) => pairs.iter().find_map(|(_, v)| v.find_nan()),
        }
    }

    /// Total order: by kind (`null < bool < number < string < sequence <
    /// mapping`), then by content. Callers reject NaN beforehand.
    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Canonical::Scalar(a), Canonical::Scalar(b)) if self.rank() == other.rank() => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (Canonical::Sequence(a), Canonical::Sequence(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.total_cmp(y) {
                        Ordering::Equal => continue,
                        unequal => return unequal,
                    }
                }
                a.len().cmp(&b.len())
            }
            (Canonical::Entries(a), Canonical::Entries(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    match ka.cmp(kb).then_with(|| va.total_cmp(vb)) {
                        Ordering::Equal => continue,
                        unequal => return unequal,
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn mapping(pairs: &[(&str, TreeValue)]) -> TreeValue {
        TreeValue::Mapping(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<IndexMap<_, _>>(),
        )
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(
            canonicalize(&TreeValue::from("xyz")).unwrap(),
            Canonical::Scalar(TreeValue::from("xyz"))
        );
    }

    #[test]
    fn test_top_level_sequence_is_a_set() {
        let canonical = canonicalize(&TreeValue::from(vec![1, 2, 2, 3])).unwrap();
        match canonical {
            Canonical::Sequence(items) => assert_eq!(items.len(), 3),
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_sequences_keep_order() {
        let a = TreeValue::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let b = TreeValue::from(vec![vec![4, 5, 6], vec![1, 2, 3]]);
        let c = TreeValue::from(vec![vec![5, 4, 6], vec![3, 2, 1]]);
        assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
        assert_ne!(canonicalize(&a).unwrap(), canonicalize(&c).unwrap());
    }

    #[test]
    fn test_mapping_key_order_is_irrelevant() {
        let a = mapping(&[("b", 2.into()), ("a", 1.into())]);
        let b = mapping(&[("a", 1.into()), ("b", 2.into())]);
        assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
    }

    #[test]
    fn test_mixed_kinds_are_ordered_by_kind() {
        let mixed = TreeValue::from(vec![
            TreeValue::from("text"),
            TreeValue::from(58),
            TreeValue::Null,
            TreeValue::from(58.0),
        ]);
        match canonicalize(&mixed).unwrap() {
            Canonical::Sequence(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Canonical::Scalar(TreeValue::Null));
                assert_eq!(items[2], Canonical::Scalar(TreeValue::from("text")));
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_fails_fast() {
        let values = TreeValue::from(vec![1.0, f64::NAN]);
        assert!(matches!(
            canonicalize(&values),
            Err(CanonicalError::Unorderable { .. })
        ));
    }

    #[test]
    fn test_compare_orders_across_kinds() {
        assert_eq!(
            compare(&TreeValue::from(3), &TreeValue::from("a")).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            compare(&TreeValue::from(vec![1]), &TreeValue::Null).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            compare(&TreeValue::from(2), &TreeValue::from(2.0)).unwrap(),
            Ordering::Equal
        );
        assert!(compare(&TreeValue::from(f64::NAN), &TreeValue::from(1)).is_err());
    }

    #[test]
    fn test_sort_values_keeps_duplicates() {
        let values = [
            TreeValue::from("a"),
            TreeValue::from(3),
            TreeValue::Null,
            TreeValue::from(1),
            TreeValue::from(3),
        ];
        assert_eq!(
            sort_values(&values).unwrap(),
            vec![
                TreeValue::Null,
                TreeValue::from(1),
                TreeValue::from(3),
                TreeValue::from(3),
                TreeValue::from("a"),
            ]
        );
        assert!(sort_values(&[TreeValue::from(f64::NAN)]).is_err());
    }

    #[test]
    fn test_distinct_count() {
        let values = [
            TreeValue::from(1972),
            TreeValue::from(1979),
            TreeValue::from(1972),
        ];
        assert_eq!(distinct_count(values.iter()).unwrap(), 2);
    }
}
