//! Ready-made comparators and properties for [`Check`](super::Check).
//!
//! Comparators take `(actual, expected)`, where `actual` is the selection
//! unit after the property was applied. Ordering comparators are false for
//! values of different kinds.
//!
//! ```
//! use quillcheck::assertion::{ops, Check, Session};
//! use serde_json::json;
//!
//! let session = Session::new(json!({"members": ["Jack", "Ginger", "Eric"]}));
//! let at_least = Check::new().comparator(ops::ge).property(ops::len);
//! session.select("members").unwrap().has_with(3, &at_least).unwrap();
//! ```

use crate::document::canonical::{compare, sort_values};
use crate::document::node::TreeValue;
use std::cmp::Ordering;

pub fn eq(actual: &TreeValue, expected: &TreeValue) -> bool {
    actual == expected
}

pub fn ne(actual: &TreeValue, expected: &TreeValue) -> bool {
    actual != expected
}

pub fn lt(actual: &TreeValue, expected: &TreeValue) -> bool {
    actual < expected
}

pub fn le(actual: &TreeValue, expected: &TreeValue) -> bool {
    actual <= expected
}

pub fn gt(actual: &TreeValue, expected: &TreeValue) -> bool {
    actual > expected
}

pub fn ge(actual: &TreeValue, expected: &TreeValue) -> bool {
    actual >= expected
}

/// Membership: an element of a sequence, a substring of a string, or a key
/// of a mapping.
pub fn contains(actual: &TreeValue, expected: &TreeValue) -> bool {
    match (actual, expected) {
        (TreeValue::Sequence(items), _) => items.contains(expected),
        (TreeValue::String(haystack), TreeValue::String(needle)) => {
            haystack.contains(needle.as_str())
        }
        (TreeValue::Mapping(entries), TreeValue::String(key)) => entries.contains_key(key),
        _ => false,
    }
}

/// Length of a string, sequence or mapping; `null` for anything else.
pub fn len(value: &TreeValue) -> TreeValue {
    value.len().map_or(TreeValue::Null, TreeValue::from)
}

/// Smallest element of a sequence; `null` when empty or unorderable.
pub fn min(value: &TreeValue) -> TreeValue {
    extreme(value, Ordering::Less)
}

/// Largest element of a sequence; `null` when empty or unorderable.
pub fn max(value: &TreeValue) -> TreeValue {
    extreme(value, Ordering::Greater)
}

fn extreme(value: &TreeValue, wanted: Ordering) -> TreeValue {
    let Some(items) = value.as_sequence() else {
        return TreeValue::Null;
    };
    let mut best: Option<&TreeValue> = None;
    for item in items {
        best = match best {
            None => Some(item),
            Some(current) => match item.partial_cmp(current) {
                Some(ordering) if ordering == wanted => Some(item),
                Some(_) => Some(current),
                None => return TreeValue::Null,
            },
        };
    }
    best.cloned().unwrap_or(TreeValue::Null)
}

/// The elements of a sequence in ascending canonical order (`null < bool <
/// number < string < sequence < mapping`); `null` when an element is NaN.
/// Other values are returned unchanged.
pub fn sorted(value: &TreeValue) -> TreeValue {
    match value {
        TreeValue::Sequence(items) => {
            sort_values(items).map_or(TreeValue::Null, TreeValue::Sequence)
        }
        other => other.clone(),
    }
}

/// Whether a sequence is in ascending canonical order.
pub fn is_sorted(value: &TreeValue) -> TreeValue {
    let ordered = value.as_sequence().map_or(false, |items| {
        items
            .windows(2)
            .all(|pair| matches!(compare(&pair[0], &pair[1]), Ok(o) if o != Ordering::Greater))
    });
    TreeValue::Bool(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ordering_comparators() {
        let five = TreeValue::from(5);
        assert!(lt(&TreeValue::from(3), &five));
        assert!(ge(&TreeValue::from(5.0), &five));
        assert!(!gt(&TreeValue::from("6"), &five));
        assert!(!lt(&TreeValue::from("6"), &five));
    }

    #[test]
    fn test_contains() {
        assert!(contains(&TreeValue::from(vec![1, 2]), &TreeValue::from(2)));
        assert!(contains(&TreeValue::from("Rock"), &TreeValue::from("oc")));
        assert!(contains(
            &TreeValue::from(json!({"name": "Cream"})),
            &TreeValue::from("name")
        ));
        assert!(!contains(&TreeValue::from(12), &TreeValue::from(1)));
    }

    #[test]
    fn test_len() {
        assert_eq!(len(&TreeValue::from(vec![1, 2, 3])), TreeValue::from(3));
        assert_eq!(len(&TreeValue::from(true)), TreeValue::Null);
    }

    #[test]
    fn test_min_and_max() {
        let primes = TreeValue::from(vec![7, 2, 29, 13]);
        assert_eq!(min(&primes), TreeValue::from(2));
        assert_eq!(max(&primes), TreeValue::from(29));
        assert_eq!(max(&TreeValue::Sequence(vec![])), TreeValue::Null);
        assert_eq!(
            max(&TreeValue::from(json!([1, "a"]))),
            TreeValue::Null
        );
    }

    #[test]
    fn test_sorted_and_is_sorted() {
        let values = TreeValue::from(vec![3, 1, 2]);
        assert_eq!(sorted(&values), TreeValue::from(vec![1, 2, 3]));
        assert_eq!(is_sorted(&values), TreeValue::Bool(false));
        assert_eq!(is_sorted(&sorted(&values)), TreeValue::Bool(true));
        assert_eq!(is_sorted(&TreeValue::from(1)), TreeValue::Bool(false));
    }

    #[test]
    fn test_sorted_mixed_kinds() {
        let mixed = TreeValue::from(json!([3, "a", 1, null]));
        let ordered = sorted(&mixed);
        assert_eq!(ordered, TreeValue::from(json!([null, 1, 3, "a"])));
        assert_eq!(is_sorted(&ordered), TreeValue::Bool(true));
        assert_eq!(is_sorted(&mixed), TreeValue::Bool(false));
    }

    #[test]
    fn test_sorted_with_nan_is_null() {
        let values = TreeValue::from(vec![2.0, f64::NAN, 1.0]);
        assert_eq!(sorted(&values), TreeValue::Null);
        assert_eq!(is_sorted(&values), TreeValue::Bool(false));
    }
}
