//! Canonical manifest operations.
//!
//! Whatever explorer gesture produced a change, it is reduced to one of the
//! six operations below before the manifest sees it.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::manifest::{AddFileOptions, ManifestStore};
use crate::path::TrackedPath;

/// The normalized intent derived from an explorer event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalOperation {
    /// Add a file reference.
    AddFile {
        /// The file to add.
        path: TrackedPath,
        /// Create missing intermediate groups.
        create_groups: bool,
    },

    /// Add a group for a directory.
    AddGroup(TrackedPath),

    /// Move or rename a group and its contents.
    MoveOrRenameGroup {
        /// The group's previous location.
        from: TrackedPath,
        /// The group's new location.
        to: TrackedPath,
    },

    /// Move or rename a file reference.
    MoveFile {
        /// The file's previous location.
        from: TrackedPath,
        /// The file's new location.
        to: TrackedPath,
    },

    /// Remove a file reference.
    DeleteFile(TrackedPath),

    /// Remove a group and its contents.
    DeleteGroup(TrackedPath),
}

impl CanonicalOperation {
    /// The manifest primitive this operation maps to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddFile { .. } => "add_file",
            Self::AddGroup(_) => "add_group",
            Self::MoveOrRenameGroup { .. } => "move_or_rename_group",
            Self::MoveFile { .. } => "move_file",
            Self::DeleteFile(_) => "delete_file",
            Self::DeleteGroup(_) => "delete_group",
        }
    }

    /// Returns a human-readable description of this operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::operations::CanonicalOperation;
    /// use projsync::TrackedPath;
    ///
    /// let op = CanonicalOperation::MoveFile {
    ///     from: TrackedPath::new("/proj/a.swift"),
    ///     to: TrackedPath::new("/proj/b.swift"),
    /// };
    /// assert_eq!(op.description(), "Move file /proj/a.swift to /proj/b.swift");
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::AddFile {
                path,
                create_groups: true,
            } => format!("Add file {path} (creating groups)"),
            Self::AddFile { path, .. } => format!("Add file {path}"),
            Self::AddGroup(path) => format!("Add group {path}"),
            Self::MoveOrRenameGroup { from, to } => format!("Move group {from} to {to}"),
            Self::MoveFile { from, to } => format!("Move file {from} to {to}"),
            Self::DeleteFile(path) => format!("Delete file {path}"),
            Self::DeleteGroup(path) => format!("Delete group {path}"),
        }
    }

    /// The paths whose scope decides whether this operation runs.
    ///
    /// Moves return both endpoints: a path moving into or out of the
    /// tracked tree still needs a manifest update.
    #[must_use]
    pub fn scope_paths(&self) -> Vec<&Path> {
        match self {
            Self::AddFile { path, .. }
            | Self::AddGroup(path)
            | Self::DeleteFile(path)
            | Self::DeleteGroup(path) => vec![path.as_path()],
            Self::MoveOrRenameGroup { from, to } | Self::MoveFile { from, to } => {
                vec![from.as_path(), to.as_path()]
            }
        }
    }

    /// The path the manifest call is about, used in failure reports.
    #[must_use]
    pub fn primary_path(&self) -> &TrackedPath {
        match self {
            Self::AddFile { path, .. }
            | Self::AddGroup(path)
            | Self::DeleteFile(path)
            | Self::DeleteGroup(path) => path,
            Self::MoveOrRenameGroup { from, .. } | Self::MoveFile { from, .. } => from,
        }
    }

    /// Returns `true` for operations on groups.
    #[must_use]
    pub const fn is_group_operation(&self) -> bool {
        matches!(
            self,
            Self::AddGroup(_) | Self::MoveOrRenameGroup { .. } | Self::DeleteGroup(_)
        )
    }

    /// Issues the matching manifest call and waits for it to complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestCall`] naming this operation's primitive.
    /// Failures the manifest reports in another shape are wrapped.
    pub async fn apply(&self, manifest: &dyn ManifestStore) -> Result<()> {
        let result = match self {
            Self::AddFile {
                path,
                create_groups,
            } => {
                manifest
                    .add_file(
                        path,
                        AddFileOptions {
                            create_groups: *create_groups,
                        },
                    )
                    .await
            }
            Self::AddGroup(path) => manifest.add_group(path).await,
            Self::MoveOrRenameGroup { from, to } => manifest.move_or_rename_group(from, to).await,
            Self::MoveFile { from, to } => manifest.move_file(from, to).await,
            Self::DeleteFile(path) => manifest.delete_file(path).await,
            Self::DeleteGroup(path) => manifest.delete_group(path).await,
        };
        result.map_err(|err| {
            if err.is_manifest_failure() {
                err
            } else {
                Error::manifest(self.name(), self.primary_path().as_path(), err.to_string())
            }
        })
    }
}

impl fmt::Display for CanonicalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
