//! Explorer events as seen by the classifier.
//!
//! These are already normalized: every path is a [`TrackedPath`] and every
//! directory flag was probed after the host finished its mutation.

use std::fmt;

use crate::path::TrackedPath;

/// Whether the host's own filesystem mutation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostOutcome {
    /// The mutation completed.
    #[default]
    Succeeded,
    /// The mutation failed; the reason is reported by the host.
    Failed(String),
}

impl HostOutcome {
    /// Returns `true` for [`HostOutcome::Succeeded`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// One source of a batch copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// The copied path.
    pub source: TrackedPath,
    /// Whether the source is a directory.
    pub is_dir: bool,
}

/// One selected entry of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEntry {
    /// The deleted path.
    pub path: TrackedPath,
    /// Whether the path was a directory before deletion.
    pub is_dir: bool,
    /// Whether the host managed to delete this entry.
    pub outcome: HostOutcome,
}

/// A filesystem change performed through the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerEvent {
    /// A file or directory was created.
    Create {
        /// The new path.
        path: TrackedPath,
        /// Whether it is a directory.
        is_dir: bool,
    },

    /// A path was renamed or moved.
    Rename {
        /// The previous location.
        from: TrackedPath,
        /// The new location.
        to: TrackedPath,
        /// Whether the new location is a directory.
        is_dir: bool,
    },

    /// A single path was copied.
    Copy {
        /// The copied path.
        from: TrackedPath,
        /// The copy.
        to: TrackedPath,
        /// Whether the copy is a directory.
        is_dir: bool,
    },

    /// Several paths were copied into one directory.
    CopyBatch {
        /// The copied paths, in selection order.
        items: Vec<BatchItem>,
        /// The directory receiving the copies.
        target_dir: TrackedPath,
    },

    /// Selected paths were deleted.
    Delete {
        /// The selected entries, in selection order.
        entries: Vec<DeleteEntry>,
    },
}

impl ExplorerEvent {
    /// Short name of the event kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Rename { .. } => "rename",
            Self::Copy { .. } => "copy",
            Self::CopyBatch { .. } => "copy-batch",
            Self::Delete { .. } => "delete",
        }
    }

    /// The path the host acted on: the destination for copies, the source
    /// for renames, the first selected entry for deletes.
    #[must_use]
    pub fn target(&self) -> Option<&TrackedPath> {
        match self {
            Self::Create { path, .. } => Some(path),
            Self::Rename { from, .. } => Some(from),
            Self::Copy { to, .. } => Some(to),
            Self::CopyBatch { target_dir, .. } => Some(target_dir),
            Self::Delete { entries } => entries.first().map(|e| &e.path),
        }
    }

    /// Returns a human-readable description of this event.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Create { path, .. } => format!("create {path}"),
            Self::Rename { from, to, .. } => format!("rename {from} to {to}"),
            Self::Copy { from, to, .. } => format!("copy {from} to {to}"),
            Self::CopyBatch { items, target_dir } => {
                format!("copy {} item(s) into {target_dir}", items.len())
            }
            Self::Delete { entries } => format!("delete {} item(s)", entries.len()),
        }
    }
}

impl fmt::Display for ExplorerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// An explorer event together with the host's overall outcome.
///
/// For deletes the per-entry outcomes live in [`DeleteEntry`]; the overall
/// outcome fails only when nothing was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAction {
    /// The event.
    pub event: ExplorerEvent,
    /// The host's outcome.
    pub outcome: HostOutcome,
}

impl HostAction {
    /// An action whose host mutation succeeded.
    #[must_use]
    pub fn succeeded(event: ExplorerEvent) -> Self {
        Self {
            event,
            outcome: HostOutcome::Succeeded,
        }
    }

    /// An action whose host mutation failed.
    #[must_use]
    pub fn failed(event: ExplorerEvent, reason: impl Into<String>) -> Self {
        Self {
            event,
            outcome: HostOutcome::Failed(reason.into()),
        }
    }

    /// Builds a delete action, deriving the overall outcome from the entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::operations::{DeleteEntry, HostAction, HostOutcome};
    /// use projsync::TrackedPath;
    ///
    /// let action = HostAction::delete(vec![DeleteEntry {
    ///     path: TrackedPath::new("/proj/a.swift"),
    ///     is_dir: false,
    ///     outcome: HostOutcome::Failed("busy".into()),
    /// }]);
    /// assert!(!action.outcome.is_success());
    /// ```
    #[must_use]
    pub fn delete(entries: Vec<DeleteEntry>) -> Self {
        let outcome = if !entries.is_empty() && entries.iter().all(|e| !e.outcome.is_success()) {
            HostOutcome::Failed("no selected entry could be deleted".into())
        } else {
            HostOutcome::Succeeded
        };
        Self {
            event: ExplorerEvent::Delete { entries },
            outcome,
        }
    }
}
