//! The normalized path type used as manifest key and argument.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use super::normalize::normalize;
use super::relationship::PathRelationship;

/// A normalized filesystem path.
///
/// A `TrackedPath` never carries a trailing separator (except for the
/// filesystem root) and never contains `.` or resolvable `..` components.
/// The only way to obtain one is through [`normalize`], so two
/// `TrackedPath`s compare equal exactly when they name the same manifest
/// entry.
///
/// # Examples
///
/// ```
/// use projsync::TrackedPath;
///
/// let a = TrackedPath::new("/proj/src/");
/// let b = TrackedPath::new("/proj/./src");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "/proj/src");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackedPath {
    path: PathBuf,
}

impl TrackedPath {
    /// Normalizes `path` into a `TrackedPath`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        normalize(path.as_ref())
    }

    /// Wraps a path that is already in normal form.
    pub(crate) fn from_normalized(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get a reference to the path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Returns `true` for the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Returns the final component, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    /// Returns the parent directory, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::TrackedPath;
    ///
    /// let file = TrackedPath::new("/proj/src/a.swift");
    /// assert_eq!(file.parent(), Some(TrackedPath::new("/proj/src")));
    /// assert_eq!(TrackedPath::new("/").parent(), None);
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.path
            .parent()
            .map(|p| Self::from_normalized(p.to_path_buf()))
    }

    /// Joins a relative segment and normalizes the result.
    #[must_use]
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        normalize(&self.path.join(segment))
    }

    /// Checks whether this path is `directory` or lies beneath it.
    #[must_use]
    pub fn is_within(&self, directory: &TrackedPath) -> bool {
        PathRelationship::is_within(&self.path, &directory.path)
    }

    /// Returns the path relative to `base`, if it lies beneath it.
    #[must_use]
    pub fn relative_to(&self, base: &TrackedPath) -> Option<&Path> {
        self.path.strip_prefix(&base.path).ok()
    }
}

impl AsRef<Path> for TrackedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl From<&Path> for TrackedPath {
    fn from(path: &Path) -> Self {
        normalize(path)
    }
}

impl From<PathBuf> for TrackedPath {
    fn from(path: PathBuf) -> Self {
        normalize(&path)
    }
}

impl From<&str> for TrackedPath {
    fn from(path: &str) -> Self {
        normalize(Path::new(path))
    }
}

impl fmt::Display for TrackedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
