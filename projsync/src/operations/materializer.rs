//! Recursive materialization of copied directories.
//!
//! Once the group for a copied directory exists, every descendant file is
//! added to the manifest. The walk happens in two phases:
//!
//! 1. **Collect**: a depth-first traversal (on the blocking pool) records
//!    descendant files into a [`PendingWalk`].
//! 2. **Drain**: entries are taken one at a time. Each in-scope file gets an
//!    `add_file` call with group creation enabled, the call is awaited, and
//!    the task yields before the next entry.
//!
//! At most one manifest call is outstanding per walk. The manifest is not
//! assumed to tolerate concurrent writers.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::canonical::CanonicalOperation;
use crate::error::{Error, Result};
use crate::manifest::ManifestStore;
use crate::path::{PathProbe, TrackedPath};
use crate::scope::ScopePredicate;

/// Skipped entries drained between yields. Each skip costs a metadata
/// lookup, so long out-of-scope runs must still give the runtime a turn.
const SKIP_YIELD_INTERVAL: usize = 64;

/// Settings for the collection phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkOptions {
    /// Follow symbolic links into linked directories.
    pub follow_symlinks: bool,

    /// Prune entries whose name starts with a dot.
    pub skip_hidden: bool,
}

/// The queue of descendant files discovered under one directory.
///
/// Owned by the walk that created it. Entries are handed out in traversal
/// order; dropping the walk abandons whatever is left.
#[derive(Debug)]
pub struct PendingWalk {
    root: TrackedPath,
    queue: Vec<TrackedPath>,
    cursor: usize,
    traversal_failures: Vec<Error>,
}

impl PendingWalk {
    /// Traverses `root` depth-first and queues every non-directory entry.
    ///
    /// Directories that cannot be read are recorded as traversal failures;
    /// their siblings are still visited.
    #[must_use]
    pub fn collect(root: &TrackedPath, options: WalkOptions) -> Self {
        let mut queue = Vec::new();
        let mut traversal_failures = Vec::new();

        let walker = WalkDir::new(root.as_path())
            .follow_links(options.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !(options.skip_hidden && is_hidden(e)));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.depth() > 0 && !entry.file_type().is_dir() {
                        queue.push(TrackedPath::new(entry.path()));
                    }
                }
                Err(err) => {
                    let path = err.path().unwrap_or_else(|| root.as_path()).to_path_buf();
                    let reason = err
                        .io_error()
                        .map_or_else(|| err.to_string(), ToString::to_string);
                    log::warn!("skipping {}: {reason}", path.display());
                    traversal_failures.push(Error::Traversal { path, reason });
                }
            }
        }

        log::debug!("collected {} file(s) under {root}", queue.len());
        Self {
            root: root.clone(),
            queue,
            cursor: 0,
            traversal_failures,
        }
    }

    /// Runs [`PendingWalk::collect`] on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskFailed`] if the traversal task panicked.
    pub async fn collect_in_background(root: TrackedPath, options: WalkOptions) -> Result<Self> {
        let walk = tokio::task::spawn_blocking(move || Self::collect(&root, options)).await?;
        Ok(walk)
    }

    /// Builds a walk from an already known listing.
    #[must_use]
    pub fn from_entries(root: TrackedPath, entries: Vec<TrackedPath>) -> Self {
        Self {
            root,
            queue: entries,
            cursor: 0,
            traversal_failures: Vec::new(),
        }
    }

    /// The directory being walked.
    #[must_use]
    pub fn root(&self) -> &TrackedPath {
        &self.root
    }

    /// Total number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing was queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of entries not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.cursor
    }

    /// Failures met while collecting.
    #[must_use]
    pub fn traversal_failures(&self) -> &[Error] {
        &self.traversal_failures
    }

    /// Advances the cursor.
    pub fn next_entry(&mut self) -> Option<TrackedPath> {
        let entry = self.queue.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(entry)
    }

    fn take_failures(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.traversal_failures)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Outcome of one recursive materialization.
#[derive(Debug)]
pub struct WalkReport {
    /// The walked directory.
    pub root: TrackedPath,

    /// Files added to the manifest, in the order they were added.
    pub added: Vec<TrackedPath>,

    /// Entries skipped because they were out of scope or directories.
    pub skipped: Vec<TrackedPath>,

    /// Failed `add_file` calls.
    pub manifest_failures: Vec<Error>,

    /// Subtrees that could not be enumerated.
    pub traversal_failures: Vec<Error>,

    /// The walk stopped early because its root disappeared.
    pub root_vanished: bool,
}

impl WalkReport {
    fn new(root: TrackedPath) -> Self {
        Self {
            root,
            added: Vec::new(),
            skipped: Vec::new(),
            manifest_failures: Vec::new(),
            traversal_failures: Vec::new(),
            root_vanished: false,
        }
    }

    /// Returns `true` if no failure of any kind was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.manifest_failures.is_empty() && self.traversal_failures.is_empty()
    }
}

/// Adds the descendants of a directory to the manifest, one at a time.
///
/// # Examples
///
/// ```no_run
/// use projsync::manifest::InMemoryManifest;
/// use projsync::operations::{RecursiveMaterializer, WalkOptions};
/// use projsync::path::FsProbe;
/// use projsync::scope::{ScopePredicate, StaticProject};
/// use projsync::TrackedPath;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # async fn run() -> projsync::Result<()> {
/// let root = TrackedPath::new("/proj");
/// let manifest = InMemoryManifest::new(root.clone());
/// let scope = ScopePredicate::new(
///     root.as_path(),
///     Arc::new(StaticProject(true)),
///     Arc::new(|_: &Path| true),
/// );
///
/// let report = RecursiveMaterializer::new(&manifest, &scope, &FsProbe)
///     .with_options(WalkOptions { skip_hidden: true, ..WalkOptions::default() })
///     .materialize(&root.join("src"))
///     .await?;
/// println!("added {} file(s)", report.added.len());
/// # Ok(())
/// # }
/// ```
pub struct RecursiveMaterializer<'a> {
    manifest: &'a dyn ManifestStore,
    scope: &'a ScopePredicate,
    probe: &'a dyn PathProbe,
    options: WalkOptions,
}

impl<'a> RecursiveMaterializer<'a> {
    /// Creates a materializer with default walk options.
    #[must_use]
    pub fn new(
        manifest: &'a dyn ManifestStore,
        scope: &'a ScopePredicate,
        probe: &'a dyn PathProbe,
    ) -> Self {
        Self {
            manifest,
            scope,
            probe,
            options: WalkOptions::default(),
        }
    }

    /// Sets the walk options.
    #[must_use]
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Collects and drains the descendants of `root`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the collection task itself failed. Manifest
    /// and traversal failures are recorded in the report.
    pub async fn materialize(&self, root: &TrackedPath) -> Result<WalkReport> {
        let walk = PendingWalk::collect_in_background(root.clone(), self.options).await?;
        Ok(self.drain(walk).await)
    }

    /// Drains a collected walk, one manifest call at a time.
    pub async fn drain(&self, mut walk: PendingWalk) -> WalkReport {
        let mut report = WalkReport::new(walk.root().clone());
        report.traversal_failures = walk.take_failures();
        let mut skipped_since_yield = 0;

        while let Some(entry) = walk.next_entry() {
            if !self.probe.exists(walk.root().as_path()) {
                log::debug!(
                    "{} disappeared; abandoning {} queued file(s)",
                    walk.root(),
                    walk.remaining() + 1
                );
                report.root_vanished = true;
                break;
            }

            if !self.accepts(entry.as_path()) {
                log::trace!("walk: skipping {entry}");
                report.skipped.push(entry);
                skipped_since_yield += 1;
                if skipped_since_yield == SKIP_YIELD_INTERVAL {
                    skipped_since_yield = 0;
                    tokio::task::yield_now().await;
                }
                continue;
            }

            let operation = CanonicalOperation::AddFile {
                path: entry.clone(),
                create_groups: true,
            };
            match operation.apply(self.manifest).await {
                Ok(()) => report.added.push(entry),
                Err(err) => {
                    log::warn!("{}: {err}", operation.description());
                    report.manifest_failures.push(err);
                }
            }
            skipped_since_yield = 0;
            tokio::task::yield_now().await;
        }

        report
    }

    fn accepts(&self, path: &Path) -> bool {
        !self.probe.is_dir(path) && self.scope.in_scope(path)
    }
}
