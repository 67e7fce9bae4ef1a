//! Property-based tests for path handling.
//!
//! The normalize and relationship modules carry their own small property
//! suites; this module runs the heavier cross-module properties.

use super::normalize::{normalize, normalize_against};
use super::relationship::PathRelationship;
use super::types::TrackedPath;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

fn relative_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(
        prop_oneof![
            path_component_strategy(),
            Just(".".to_string()),
            Just("..".to_string())
        ],
        1..6,
    )
    .prop_map(|parts| parts.iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // Normalization is idempotent: normalize(normalize(p)) == normalize(p)
    #[test]
    fn path_normalization_idempotent(path in absolute_path_strategy()) {
        let once = normalize(&path);
        prop_assert_eq!(normalize(once.as_path()), once);
    }

    // Trailing separators never change the result
    #[test]
    fn trailing_separator_irrelevant(path in absolute_path_strategy()) {
        let with_slash = format!("{}/", path.display());
        prop_assert_eq!(normalize(Path::new(&with_slash)), normalize(&path));
    }

    // Joining onto a base is idempotent as well
    #[test]
    fn normalize_against_idempotent(
        base in absolute_path_strategy(),
        rel in relative_path_strategy(),
    ) {
        let once = normalize_against(&rel, &base);
        prop_assert!(once.as_path().is_absolute());
        prop_assert_eq!(normalize_against(once.as_path(), &base), once);
    }

    // A relative path without `..` always lands inside its base
    #[test]
    fn relative_without_parent_stays_inside(
        base in absolute_path_strategy(),
        parts in prop::collection::vec(path_component_strategy(), 1..5),
    ) {
        let rel: PathBuf = parts.iter().collect();
        let joined = normalize_against(&rel, &base);
        prop_assert!(PathRelationship::is_strictly_within(joined.as_path(), &base));
    }

    // TrackedPath ordering agrees with equality
    #[test]
    fn tracked_path_eq_consistent(a in absolute_path_strategy(), b in absolute_path_strategy()) {
        let ta = TrackedPath::new(&a);
        let tb = TrackedPath::new(&b);
        prop_assert_eq!(ta == tb, ta.cmp(&tb) == std::cmp::Ordering::Equal);
    }
}
