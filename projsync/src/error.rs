//! Error types for the projsync library.
//!
//! This module provides the error hierarchy shared by every component of the
//! synchronizer, using `thiserror` for ergonomic error handling.
//!
//! Not every condition the synchronizer meets is an error: a path that is out
//! of scope is simply skipped and reported through
//! [`DispatchOutcome::OutOfScope`](crate::operations::DispatchOutcome).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a projsync error.
///
/// # Examples
///
/// ```
/// use projsync::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the projsync library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A glob pattern in the update policy could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// The host reported that the underlying filesystem mutation failed.
    #[error("host could not {action} {}: {reason}", path.display())]
    HostMutation {
        /// The host action that failed (for example `rename`).
        action: String,
        /// The path the action targeted.
        path: PathBuf,
        /// The reason reported by the host.
        reason: String,
    },

    /// The manifest collaborator reported a failure.
    #[error("manifest {operation} failed for {}: {reason}", path.display())]
    ManifestCall {
        /// The manifest operation that failed (for example `add_file`).
        operation: String,
        /// The path the operation targeted.
        path: PathBuf,
        /// The reason reported by the manifest.
        reason: String,
    },

    /// A directory could not be enumerated during a recursive walk.
    #[error("cannot traverse {}: {reason}", path.display())]
    Traversal {
        /// The directory that could not be enumerated.
        path: PathBuf,
        /// The underlying failure.
        reason: String,
    },

    /// A scheduled dispatch task panicked or was aborted.
    #[error("sync task failed: {reason}")]
    TaskFailed {
        /// Details about the failure.
        reason: String,
    },
}

impl Error {
    /// Builds a [`Error::ManifestCall`] for the given operation and path.
    ///
    /// Manifest implementations use this to report failures in the shape the
    /// dispatcher surfaces to the user.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::Error;
    ///
    /// let err = Error::manifest("add_file", "/proj/src/a.swift", "group missing");
    /// assert!(err.is_manifest_failure());
    /// assert!(err.to_string().contains("add_file"));
    /// ```
    pub fn manifest(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ManifestCall {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if error was reported by the manifest collaborator.
    #[must_use]
    pub fn is_manifest_failure(&self) -> bool {
        matches!(self, Self::ManifestCall { .. })
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use projsync::Error;
    /// use std::io;
    ///
    /// let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed {
            reason: err.to_string(),
        }
    }
}
