use quillcheck::assertion::{ops, Check, Session};
use quillcheck::document::{canonicalize, distinct_count};
use quillcheck::querypath::{resolve, Path, Selection};
use quillcheck::TreeValue;
use serde_json::json;

fn discography() -> TreeValue {
    TreeValue::from(json!({
        "artists": [
            {"name": "Cream", "albums": ["Fresh Cream", "Disraeli Gears", "Wheels of Fire"]},
            {"name": "Blind Faith", "albums": ["Blind Faith"]},
            {"name": "Derek and the Dominos", "albums": ["Layla"]}
        ],
        "labels": {"uk": "Reaction", "us": "Atco"}
    }))
}

#[test]
fn test_resolution_is_idempotent() {
    let tree = discography();
    for text in ["artists name", "artists albums", "labels *", "**", ""] {
        let path = Path::from(text);
        let first = resolve(&tree, &path, false).unwrap();
        let second = resolve(&tree, &path, false).unwrap();
        assert_eq!(first, second, "path {}", path);
    }
}

#[test]
fn test_exactly_implies_at_least_and_at_most() {
    let session = Session::new(discography());
    let names = ["Cream", "Blind Faith", "Layla", "Atco"];
    for n in 0..3 {
        for content in names {
            let exact = session.exactly(n, "artists name").unwrap().has(content);
            if exact.is_ok() {
                session.at_least(n, "artists name").unwrap().has(content).unwrap();
                session.at_most(n, "artists name").unwrap().has(content).unwrap();
            }
        }
    }
}

#[test]
fn test_has_not_is_has_with_negated_comparator() {
    let session = Session::new(json!({"years": [1966, 1968, 1969, 1970]}));
    let comparators: [fn(&TreeValue, &TreeValue) -> bool; 3] = [ops::lt, ops::eq, ops::ge];

    for comparator in comparators {
        for n in 0..5 {
            for bound in [1966, 1968, 1971] {
                let has_not = session
                    .at_least(n, "years")
                    .unwrap()
                    .has_not_with(bound, &Check::new().comparator(comparator))
                    .is_ok();
                let negated = move |a: &TreeValue, b: &TreeValue| !comparator(a, b);
                let has = session
                    .at_least(n, "years")
                    .unwrap()
                    .has_with(bound, &Check::new().comparator(negated))
                    .is_ok();
                assert_eq!(has_not, has, "at_least({}) with bound {}", n, bound);
            }
        }
    }
}

#[test]
fn test_is_ignores_order_but_is_ordered_does_not() {
    let session = Session::new(json!({"primes": [2, 3, 5, 7]}));
    let permutations = [vec![2, 3, 5, 7], vec![7, 5, 3, 2], vec![3, 2, 7, 5]];
    for permutation in permutations {
        session.select("primes").unwrap().is_(permutation.clone()).unwrap();
        let ordered = session.select("primes").unwrap().is_ordered(permutation.clone());
        assert_eq!(ordered.is_ok(), permutation == vec![2, 3, 5, 7]);
    }
}

#[test]
fn test_recursive_wildcard_on_scalars() {
    for scalar in [TreeValue::from(5), TreeValue::from("five"), TreeValue::Bool(true)] {
        let selection = resolve(&scalar, &Path::from("**"), false).unwrap();
        assert_eq!(selection, Selection::FanOut(vec![scalar.clone()]));
    }
}

#[test]
fn test_wildcard_on_mapping_selects_values() {
    let tree = TreeValue::from(json!({"a": "X", "b": {"y": "Y"}}));
    let selection = resolve(&tree, &Path::from("*"), false).unwrap();
    let expected = TreeValue::from(json!([{"y": "Y"}, "X"]));
    assert_eq!(
        canonicalize(&selection.into_value()).unwrap(),
        canonicalize(&expected).unwrap()
    );
}

#[test]
fn test_distinct_count_is_canonical() {
    let values = [
        TreeValue::from(json!({"a": 1, "b": 2})),
        TreeValue::from(json!({"b": 2, "a": 1})),
        TreeValue::from(1),
        TreeValue::from(1.0),
        TreeValue::from("1"),
    ];
    assert_eq!(distinct_count(&values).unwrap(), 3);

    let nan = [TreeValue::from(f64::NAN), TreeValue::from(1)];
    assert!(distinct_count(&nan).is_err());
}
