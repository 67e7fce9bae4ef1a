//! The manifest collaborator.
//!
//! The manifest is the declarative project index (groups and file
//! references) that must mirror the real file tree. Its storage engine is
//! external; the synchronizer only talks to it through [`ManifestStore`].
//!
//! Every operation is expected to be idempotent: issuing the same call twice
//! leaves the manifest as a single call would. Completion is signalled by the
//! returned future resolving, and the synchronizer never has more than one
//! call outstanding for a single recursive walk.
//!
//! [`InMemoryManifest`] is a working implementation that keeps the tree in
//! memory.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::path::TrackedPath;

pub use memory::{EntryKind, InMemoryManifest};

/// Options for [`ManifestStore::add_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddFileOptions {
    /// Create any missing intermediate groups on demand.
    pub create_groups: bool,
}

impl AddFileOptions {
    /// Options with group creation enabled.
    #[must_use]
    pub const fn creating_groups() -> Self {
        Self {
            create_groups: true,
        }
    }
}

/// Mutating primitives exposed by the manifest storage engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Adds a file reference.
    async fn add_file(&self, path: &TrackedPath, options: AddFileOptions) -> Result<()>;

    /// Adds a group for a directory.
    async fn add_group(&self, path: &TrackedPath) -> Result<()>;

    /// Moves or renames a file reference.
    async fn move_file(&self, from: &TrackedPath, to: &TrackedPath) -> Result<()>;

    /// Moves or renames a group together with everything beneath it.
    async fn move_or_rename_group(&self, from: &TrackedPath, to: &TrackedPath) -> Result<()>;

    /// Removes a file reference.
    async fn delete_file(&self, path: &TrackedPath) -> Result<()>;

    /// Removes a group together with everything beneath it.
    async fn delete_group(&self, path: &TrackedPath) -> Result<()>;
}
