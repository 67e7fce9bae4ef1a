//! In-memory manifest.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{AddFileOptions, ManifestStore};
use crate::error::{Error, Result};
use crate::path::TrackedPath;

/// Kind of a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A group mirroring a directory.
    Group,
    /// A file reference.
    File,
}

/// A [`ManifestStore`] holding an ordered tree of groups and files.
///
/// The tree is rooted at the project root, which always exists as a group.
/// Entries are keyed by [`TrackedPath`] and kept in path order.
///
/// Moves whose destination lies outside the root drop the entry from the
/// manifest, and moves whose source is unknown add the destination. That
/// keeps files moving into or out of the project in step with the disk.
///
/// # Examples
///
/// ```
/// use projsync::manifest::{AddFileOptions, InMemoryManifest, ManifestStore};
/// use projsync::TrackedPath;
///
/// # tokio_test_block(async {
/// let manifest = InMemoryManifest::new(TrackedPath::new("/proj"));
/// let file = TrackedPath::new("/proj/src/a.swift");
///
/// manifest.add_file(&file, AddFileOptions::creating_groups()).await.unwrap();
/// assert!(manifest.contains_group(&TrackedPath::new("/proj/src")));
/// assert!(manifest.contains_file(&file));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryManifest {
    root: TrackedPath,
    entries: Mutex<BTreeMap<TrackedPath, EntryKind>>,
}

impl InMemoryManifest {
    /// Creates a manifest containing only the root group.
    #[must_use]
    pub fn new(root: TrackedPath) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(root.clone(), EntryKind::Group);
        Self {
            root,
            entries: Mutex::new(entries),
        }
    }

    /// The root group.
    #[must_use]
    pub fn root(&self) -> &TrackedPath {
        &self.root
    }

    /// Returns the kind of the entry at `path`, if any.
    #[must_use]
    pub fn entry(&self, path: &TrackedPath) -> Option<EntryKind> {
        self.lock().get(path).copied()
    }

    /// Returns `true` if `path` is a file reference.
    #[must_use]
    pub fn contains_file(&self, path: &TrackedPath) -> bool {
        self.entry(path) == Some(EntryKind::File)
    }

    /// Returns `true` if `path` is a group.
    #[must_use]
    pub fn contains_group(&self, path: &TrackedPath) -> bool {
        self.entry(path) == Some(EntryKind::Group)
    }

    /// All file references in path order.
    #[must_use]
    pub fn files(&self) -> Vec<TrackedPath> {
        self.paths_of(EntryKind::File)
    }

    /// All groups in path order, root included.
    #[must_use]
    pub fn groups(&self) -> Vec<TrackedPath> {
        self.paths_of(EntryKind::Group)
    }

    /// Number of entries, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when only the root group is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    fn paths_of(&self, kind: EntryKind) -> Vec<TrackedPath> {
        self.lock()
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(p, _)| p.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<TrackedPath, EntryKind>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_inside(&self, operation: &str, path: &TrackedPath) -> Result<()> {
        if path.is_within(&self.root) {
            Ok(())
        } else {
            Err(Error::manifest(
                operation,
                path.as_path(),
                format!("outside manifest root {}", self.root),
            ))
        }
    }

    /// Inserts the group at `path` and any missing ancestors.
    fn ensure_groups(
        &self,
        entries: &mut BTreeMap<TrackedPath, EntryKind>,
        operation: &str,
        path: &TrackedPath,
    ) -> Result<()> {
        let mut missing = Vec::new();
        let mut current = Some(path.clone());
        while let Some(dir) = current {
            match entries.get(&dir) {
                Some(EntryKind::Group) => break,
                Some(EntryKind::File) => {
                    return Err(Error::manifest(
                        operation,
                        dir.as_path(),
                        "a file reference exists where a group is needed",
                    ));
                }
                None => {
                    current = if dir == self.root { None } else { dir.parent() };
                    missing.push(dir);
                }
            }
        }
        for dir in missing {
            entries.insert(dir, EntryKind::Group);
        }
        Ok(())
    }

    fn subtree(entries: &BTreeMap<TrackedPath, EntryKind>, root: &TrackedPath) -> Vec<TrackedPath> {
        entries
            .range(root.clone()..)
            .take_while(|(p, _)| p.is_within(root))
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[async_trait]
impl ManifestStore for InMemoryManifest {
    async fn add_file(&self, path: &TrackedPath, options: AddFileOptions) -> Result<()> {
        self.require_inside("add_file", path)?;
        let mut entries = self.lock();
        match entries.get(path) {
            Some(EntryKind::File) => return Ok(()),
            Some(EntryKind::Group) => {
                return Err(Error::manifest("add_file", path.as_path(), "a group exists at this path"));
            }
            None => {}
        }

        let parent = path
            .parent()
            .ok_or_else(|| Error::manifest("add_file", path.as_path(), "path has no parent"))?;
        if options.create_groups {
            self.ensure_groups(&mut entries, "add_file", &parent)?;
        } else if entries.get(&parent) != Some(&EntryKind::Group) {
            return Err(Error::manifest(
                "add_file",
                path.as_path(),
                format!("parent group {parent} does not exist"),
            ));
        }

        log::trace!("manifest: add file {path}");
        entries.insert(path.clone(), EntryKind::File);
        Ok(())
    }

    async fn add_group(&self, path: &TrackedPath) -> Result<()> {
        self.require_inside("add_group", path)?;
        let mut entries = self.lock();
        log::trace!("manifest: add group {path}");
        self.ensure_groups(&mut entries, "add_group", path)
    }

    async fn move_file(&self, from: &TrackedPath, to: &TrackedPath) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let mut entries = self.lock();
        if entries.get(from) == Some(&EntryKind::Group) {
            return Err(Error::manifest("move_file", from.as_path(), "source is a group"));
        }
        if entries.get(to) == Some(&EntryKind::Group) {
            return Err(Error::manifest("move_file", to.as_path(), "a group exists at the destination"));
        }

        if to.is_within(&self.root) && to != &self.root {
            if let Some(parent) = to.parent() {
                self.ensure_groups(&mut entries, "move_file", &parent)?;
            }
            entries.insert(to.clone(), EntryKind::File);
        }
        entries.remove(from);
        log::trace!("manifest: move file {from} -> {to}");
        Ok(())
    }

    async fn move_or_rename_group(&self, from: &TrackedPath, to: &TrackedPath) -> Result<()> {
        if from == to {
            return Ok(());
        }
        if from == &self.root {
            return Err(Error::manifest(
                "move_or_rename_group",
                from.as_path(),
                "the root group cannot be moved",
            ));
        }
        if to.is_within(from) {
            return Err(Error::manifest(
                "move_or_rename_group",
                to.as_path(),
                "a group cannot move beneath itself",
            ));
        }

        let mut entries = self.lock();
        if entries.get(from) == Some(&EntryKind::File) {
            return Err(Error::manifest("move_or_rename_group", from.as_path(), "source is a file"));
        }

        let moved = Self::subtree(&entries, from);
        let inside = to.is_within(&self.root);
        if inside {
            if entries.get(to) == Some(&EntryKind::File) {
                return Err(Error::manifest(
                    "move_or_rename_group",
                    to.as_path(),
                    "a file exists at the destination",
                ));
            }
            self.ensure_groups(&mut entries, "move_or_rename_group", to)?;
        }

        for old in moved {
            let Some(kind) = entries.remove(&old) else {
                continue;
            };
            if !inside {
                continue;
            }
            if let Some(relative) = old.relative_to(from) {
                let new = if relative.as_os_str().is_empty() {
                    to.clone()
                } else {
                    to.join(relative)
                };
                entries.insert(new, kind);
            }
        }
        log::trace!("manifest: move group {from} -> {to}");
        Ok(())
    }

    async fn delete_file(&self, path: &TrackedPath) -> Result<()> {
        let mut entries = self.lock();
        match entries.get(path) {
            Some(EntryKind::Group) => {
                Err(Error::manifest("delete_file", path.as_path(), "path is a group"))
            }
            Some(EntryKind::File) => {
                entries.remove(path);
                log::trace!("manifest: delete file {path}");
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn delete_group(&self, path: &TrackedPath) -> Result<()> {
        if path == &self.root {
            return Err(Error::manifest(
                "delete_group",
                path.as_path(),
                "the root group cannot be deleted",
            ));
        }
        let mut entries = self.lock();
        if entries.get(path) == Some(&EntryKind::File) {
            return Err(Error::manifest("delete_group", path.as_path(), "path is a file"));
        }
        for entry in Self::subtree(&entries, path) {
            entries.remove(&entry);
        }
        log::trace!("manifest: delete group {path}");
        Ok(())
    }
}
