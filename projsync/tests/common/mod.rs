//! Common test utilities for integration tests.
//!
//! This module provides a recording manifest, a collecting notifier, and
//! fixture builders for project trees on disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use projsync::manifest::{AddFileOptions, ManifestStore};
use projsync::scope::{ScopePredicate, StaticProject};
use projsync::{Error, Notice, Notifier, Result, TrackedPath};
use tempfile::TempDir;

/// A manifest call as seen by [`RecordingManifest`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddFile(TrackedPath, bool),
    AddGroup(TrackedPath),
    MoveFile(TrackedPath, TrackedPath),
    MoveOrRenameGroup(TrackedPath, TrackedPath),
    DeleteFile(TrackedPath),
    DeleteGroup(TrackedPath),
}

/// Manifest that records every call and the peak number of calls in flight.
///
/// Each call sleeps briefly while counted as in flight, so overlapping
/// calls would be observed.
#[derive(Default)]
pub struct RecordingManifest {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<TrackedPath>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingManifest {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every call whose primary path is `path` fail.
    pub fn fail_on(&self, path: impl Into<TrackedPath>) {
        self.failing.lock().unwrap().insert(path.into());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn added_files(&self) -> Vec<TrackedPath> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddFile(p, _) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, operation: &str, path: &TrackedPath, call: Call) -> Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(1)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(path) {
            return Err(Error::manifest(operation, path.as_path(), "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ManifestStore for RecordingManifest {
    async fn add_file(&self, path: &TrackedPath, options: AddFileOptions) -> Result<()> {
        let call = Call::AddFile(path.clone(), options.create_groups);
        self.record("add_file", path, call).await
    }

    async fn add_group(&self, path: &TrackedPath) -> Result<()> {
        self.record("add_group", path, Call::AddGroup(path.clone()))
            .await
    }

    async fn move_file(&self, from: &TrackedPath, to: &TrackedPath) -> Result<()> {
        let call = Call::MoveFile(from.clone(), to.clone());
        self.record("move_file", from, call).await
    }

    async fn move_or_rename_group(&self, from: &TrackedPath, to: &TrackedPath) -> Result<()> {
        let call = Call::MoveOrRenameGroup(from.clone(), to.clone());
        self.record("move_or_rename_group", from, call).await
    }

    async fn delete_file(&self, path: &TrackedPath) -> Result<()> {
        self.record("delete_file", path, Call::DeleteFile(path.clone()))
            .await
    }

    async fn delete_group(&self, path: &TrackedPath) -> Result<()> {
        self.record("delete_group", path, Call::DeleteGroup(path.clone()))
            .await
    }
}

/// Notifier that keeps every notice.
#[allow(dead_code)]
#[derive(Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

#[allow(dead_code)]
impl CollectingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Scope over `root` that accepts paths with the given extensions.
#[allow(dead_code)]
pub fn extension_scope(root: &Path, extensions: &'static [&'static str]) -> ScopePredicate {
    ScopePredicate::new(
        root,
        Arc::new(StaticProject(true)),
        Arc::new(move |p: &Path| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e))
        }),
    )
}

/// Scope over `root` that accepts every path.
#[allow(dead_code)]
pub fn open_scope(root: &Path) -> ScopePredicate {
    ScopePredicate::new(root, Arc::new(StaticProject(true)), Arc::new(|_: &Path| true))
}

/// A project directory on disk.
pub struct ProjectFixture {
    temp: TempDir,
}

#[allow(dead_code)]
impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn tracked(&self, relative: &str) -> TrackedPath {
        TrackedPath::new(self.root().join(relative))
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Creates a file (and its parents) relative to the root.
    pub fn file(&self, relative: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
        self
    }

    /// Creates a directory relative to the root.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.root().join(relative)).unwrap();
        self
    }
}
