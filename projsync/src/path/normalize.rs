//! Path normalization.
//!
//! Normalization is purely lexical: it never touches the filesystem, so it
//! works for paths that were just deleted or have not been created yet.
//! It:
//! - Simplifies platform-specific absolute forms (`\\?\C:\x` becomes `C:\x`)
//! - Resolves `.` and `..` components
//! - Collapses repeated separators and strips trailing ones

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use super::types::TrackedPath;

/// Resolve `.` and `..` components.
///
/// For absolute paths a `..` at the root stays at the root. For relative
/// paths leading `..` components that cannot be resolved are kept.
///
/// # Examples
///
/// ```
/// use projsync::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../..")), PathBuf::from("/"));
/// assert_eq!(resolve_components(Path::new("../x/./y/")), PathBuf::from("../x/y"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut anchor = PathBuf::new();
    let mut has_root = false;
    let mut parts: Vec<OsString> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => anchor.push(prefix.as_os_str()),
            Component::RootDir => {
                anchor.push(Component::RootDir);
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_parent = parts.last().is_some_and(|p| p == "..");
                if !parts.is_empty() && !last_is_parent {
                    parts.pop();
                } else if !has_root {
                    parts.push(OsString::from(".."));
                }
            }
            Component::Normal(c) => parts.push(c.to_os_string()),
        }
    }

    let mut result = anchor;
    for part in parts {
        result.push(part);
    }
    result
}

/// Normalize a path into a [`TrackedPath`].
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)`. The empty path is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use projsync::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("/proj/src//"));
/// assert_eq!(normalized.as_path(), Path::new("/proj/src"));
///
/// assert_eq!(normalize(Path::new("/")).as_path(), Path::new("/"));
/// assert_eq!(normalize(normalized.as_path()), normalized);
/// ```
#[must_use]
pub fn normalize(path: &Path) -> TrackedPath {
    if path.as_os_str().is_empty() {
        return TrackedPath::from_normalized(PathBuf::new());
    }
    let simplified = dunce::simplified(path);
    TrackedPath::from_normalized(resolve_components(simplified))
}

/// Normalize a path, first joining it onto `base` when it is relative.
///
/// Absolute inputs ignore `base`.
///
/// # Examples
///
/// ```
/// use projsync::path::normalize::normalize_against;
/// use std::path::Path;
///
/// let base = Path::new("/proj");
/// assert_eq!(
///     normalize_against(Path::new("src/../lib/a.swift"), base).as_path(),
///     Path::new("/proj/lib/a.swift")
/// );
/// assert_eq!(
///     normalize_against(Path::new("/tmp/a.swift"), base).as_path(),
///     Path::new("/tmp/a.swift")
/// );
/// ```
#[must_use]
pub fn normalize_against(path: &Path, base: &Path) -> TrackedPath {
    if path.as_os_str().is_empty() || path.is_absolute() || path.has_root() {
        return normalize(path);
    }
    normalize(&base.join(path))
}
