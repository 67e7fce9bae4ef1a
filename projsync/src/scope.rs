//! Scope decisions: is the synchronizer responsible for a path?
//!
//! A path is in scope when all three hold:
//! 1. the active project has a configured target ([`ProjectState`]),
//! 2. the path lies within the project root,
//! 3. the per-path [`UpdatePolicy`] accepts it.
//!
//! Nothing here touches the filesystem, so deleted paths can be checked.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};

use crate::config::Config;
use crate::error::Result;
use crate::path::{PathRelationship, TrackedPath};

/// Reports whether the active project has an application or library target.
pub trait ProjectState: Send + Sync {
    /// Returns `true` when the manifest has targets whose sources we track.
    fn is_project_configured(&self) -> bool;
}

impl<F> ProjectState for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_project_configured(&self) -> bool {
        self()
    }
}

/// A fixed answer for [`ProjectState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticProject(pub bool);

impl ProjectState for StaticProject {
    fn is_project_configured(&self) -> bool {
        self.0
    }
}

/// Externally supplied per-path allow-list.
pub trait UpdatePolicy: Send + Sync {
    /// Returns `true` if automatic manifest updates are allowed for `path`.
    fn should_update_project(&self, path: &Path) -> bool;
}

impl<F> UpdatePolicy for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn should_update_project(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Glob-based [`UpdatePolicy`] built from configuration.
///
/// Patterns are matched against the path relative to the project root,
/// using `/` as separator. A path is accepted when it matches no exclude
/// pattern and either the include list is empty or an include pattern
/// matches.
///
/// # Examples
///
/// ```
/// use projsync::scope::{PathFilter, UpdatePolicy};
/// use std::path::Path;
///
/// let filter = PathFilter::new(
///     Path::new("/proj"),
///     &["Sources/**".to_string()],
///     &["**/*.orig".to_string()],
/// ).unwrap();
///
/// assert!(filter.should_update_project(Path::new("/proj/Sources/a.swift")));
/// assert!(!filter.should_update_project(Path::new("/proj/Sources/a.swift.orig")));
/// assert!(!filter.should_update_project(Path::new("/proj/README.md")));
/// ```
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    const MATCH_OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    /// Compiles include and exclude patterns relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if a pattern does not compile.
    pub fn new(root: &Path, include: &[String], exclude: &[String]) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<Pattern>> {
            patterns
                .iter()
                .map(|p| Pattern::new(p).map_err(Into::into))
                .collect()
        };
        Ok(Self {
            root: TrackedPath::new(root).into_path_buf(),
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Builds the filter from the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern does not compile.
    pub fn from_config(root: &Path, config: &Config) -> Result<Self> {
        Self::new(root, config.include_patterns(), config.exclude_patterns())
    }

    /// A filter that accepts every path.
    #[must_use]
    pub fn allow_all(root: &Path) -> Self {
        Self {
            root: TrackedPath::new(root).into_path_buf(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    fn relative_text(&self, path: &Path) -> Option<String> {
        let normalized = TrackedPath::new(path);
        let relative = normalized.as_path().strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl UpdatePolicy for PathFilter {
    fn should_update_project(&self, path: &Path) -> bool {
        let Some(relative) = self.relative_text(path) else {
            return false;
        };
        if self
            .exclude
            .iter()
            .any(|p| p.matches_with(&relative, Self::MATCH_OPTIONS))
        {
            return false;
        }
        self.include.is_empty()
            || self
                .include
                .iter()
                .any(|p| p.matches_with(&relative, Self::MATCH_OPTIONS))
    }
}

/// Decides whether a path is in scope for manifest updates.
///
/// # Examples
///
/// ```
/// use projsync::scope::{ScopePredicate, StaticProject};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let scope = ScopePredicate::new(
///     Path::new("/proj"),
///     Arc::new(StaticProject(true)),
///     Arc::new(|p: &Path| p.extension().is_some_and(|e| e == "swift")),
/// );
///
/// assert!(scope.in_scope(Path::new("/proj/src/a.swift")));
/// assert!(!scope.in_scope(Path::new("/proj/src/a.txt")));
/// assert!(!scope.in_scope(Path::new("/tmp/a.swift")));
/// ```
#[derive(Clone)]
pub struct ScopePredicate {
    root: TrackedPath,
    project: Arc<dyn ProjectState>,
    policy: Arc<dyn UpdatePolicy>,
}

impl ScopePredicate {
    /// Creates a predicate for the project rooted at `root`.
    #[must_use]
    pub fn new(root: &Path, project: Arc<dyn ProjectState>, policy: Arc<dyn UpdatePolicy>) -> Self {
        Self {
            root: TrackedPath::new(root),
            project,
            policy,
        }
    }

    /// The normalized project root.
    #[must_use]
    pub fn root(&self) -> &TrackedPath {
        &self.root
    }

    /// Returns `true` if manifest updates for `path` are this system's job.
    #[must_use]
    pub fn in_scope(&self, path: &Path) -> bool {
        if !self.project.is_project_configured() {
            return false;
        }
        if !PathRelationship::is_within(path, self.root.as_path()) {
            return false;
        }
        self.policy.should_update_project(path)
    }

    /// Returns `true` if any of `paths` is in scope.
    ///
    /// Moves use this so that a path leaving or entering the tracked tree
    /// still updates the manifest.
    #[must_use]
    pub fn in_scope_any<'a, I>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = &'a Path>,
    {
        paths.into_iter().any(|p| self.in_scope(p))
    }
}

impl fmt::Debug for ScopePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopePredicate")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
