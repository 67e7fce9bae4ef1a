//! Path handling for the synchronizer.
//!
//! Every path that reaches the manifest passes through [`normalize`] first,
//! producing a [`TrackedPath`]. Normalization is lexical (no I/O), so it is
//! safe on paths that were just deleted.
//!
//! # Examples
//!
//! ```
//! use projsync::path::{normalize, PathRelationship};
//! use std::path::Path;
//!
//! let file = normalize(Path::new("/proj/src/./a.swift"));
//! assert!(PathRelationship::is_within(file.as_path(), Path::new("/proj/")));
//! ```

pub mod normalize;
pub mod probe;
pub mod relationship;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use normalize::{normalize, normalize_against};
pub use probe::{FsProbe, PathProbe};
pub use relationship::PathRelationship;
pub use types::TrackedPath;
