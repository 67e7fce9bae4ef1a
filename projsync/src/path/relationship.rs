//! Path relationship checking.
//!
//! This module determines how two paths relate in the directory hierarchy.
//! The scope predicate uses it to decide whether a path lies under the
//! project root, and batch copies use it to check that a computed
//! destination stays inside the target directory.

use std::path::Path;

use super::normalize::resolve_components;

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use projsync::path::PathRelationship;
/// use std::path::Path;
///
/// let parent = Path::new("/proj");
/// let child = Path::new("/proj/src/a.swift");
///
/// assert_eq!(
///     PathRelationship::between(parent, child),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same after normalization.
    Same,

    /// Neither path contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Both paths are resolved lexically before comparison, and the
    /// comparison is component-wise, so `/proj` is unrelated to `/project`.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/b/"), Path::new("/a")),
    ///     PathRelationship::Descendant
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/proj"), Path::new("/project")),
    ///     PathRelationship::Unrelated
    /// );
    /// ```
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        let p1 = resolve_components(path1);
        let p2 = resolve_components(path2);

        if p1 == p2 {
            return Self::Same;
        }
        if p2.starts_with(&p1) {
            return Self::Ancestor;
        }
        if p1.starts_with(&p2) {
            return Self::Descendant;
        }
        Self::Unrelated
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let dir = Path::new("/proj");
    /// assert!(PathRelationship::is_within(Path::new("/proj/a.swift"), dir));
    /// assert!(PathRelationship::is_within(dir, dir));
    /// assert!(!PathRelationship::is_within(Path::new("/tmp/a.swift"), dir));
    /// ```
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(Self::between(path, directory), Self::Descendant | Self::Same)
    }

    /// Check if a path is strictly beneath a directory.
    #[must_use]
    pub fn is_strictly_within(path: &Path, directory: &Path) -> bool {
        Self::between(path, directory) == Self::Descendant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_ancestor() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/b"), Path::new("/a/b/c/d")),
            PathRelationship::Ancestor
        );
    }

    #[test]
    fn test_relationship_descendant() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/b/c/d"), Path::new("/a/b")),
            PathRelationship::Descendant
        );
    }

    #[test]
    fn test_relationship_same_with_trailing_slash() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/"), Path::new("/a")),
            PathRelationship::Same
        );
    }

    #[test]
    fn test_relationship_unrelated_prefix_string() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/b"), Path::new("/a/bc")),
            PathRelationship::Unrelated
        );
    }

    #[test]
    fn test_relationship_resolves_parent_components() {
        assert!(!PathRelationship::is_within(
            Path::new("/proj/../etc/passwd"),
            Path::new("/proj")
        ));
    }

    #[test]
    fn test_is_strictly_within() {
        assert!(PathRelationship::is_strictly_within(
            Path::new("/d/a.txt"),
            Path::new("/d")
        ));
        assert!(!PathRelationship::is_strictly_within(
            Path::new("/d"),
            Path::new("/d")
        ));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::path::PathBuf;

        fn path_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec("[a-zA-Z0-9_-]{1,10}", 1..=5)
                .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// A path is always Same to itself
            #[test]
            fn relationship_reflexive(s in path_strategy()) {
                let path = Path::new(&s);
                prop_assert_eq!(PathRelationship::between(path, path), PathRelationship::Same);
            }

            /// Ancestor and Descendant mirror each other
            #[test]
            fn relationship_symmetric(s1 in path_strategy(), s2 in path_strategy()) {
                let rel1 = PathRelationship::between(Path::new(&s1), Path::new(&s2));
                let rel2 = PathRelationship::between(Path::new(&s2), Path::new(&s1));
                match (rel1, rel2) {
                    (PathRelationship::Ancestor, PathRelationship::Descendant)
                    | (PathRelationship::Descendant, PathRelationship::Ancestor)
                    | (PathRelationship::Same, PathRelationship::Same)
                    | (PathRelationship::Unrelated, PathRelationship::Unrelated) => {}
                    _ => prop_assert!(false, "asymmetric: {:?} vs {:?}", rel1, rel2),
                }
            }

            /// Children are always within their parent
            #[test]
            fn child_is_within_parent(s in path_strategy(), child in "[a-z]{1,8}") {
                let parent = PathBuf::from(&s);
                let nested = parent.join(&child);
                prop_assert!(PathRelationship::is_within(&nested, &parent));
                prop_assert!(!PathRelationship::is_within(&parent, &nested));
            }
        }
    }
}
