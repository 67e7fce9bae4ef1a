#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # projsync
//!
//! Keeps a project manifest (an ordered tree of groups and file references)
//! in step with changes made through a file explorer.
//!
//! The explorer host performs each filesystem change and publishes it
//! through [`ExplorerHooks`]. An [`Interceptor`] picks the event up and
//! schedules a [`SyncDispatcher`] run, which decides scope, classifies the
//! event into canonical operations and issues them to the
//! [`ManifestStore`]. Copied directories are then walked one file at a time
//! so that the manifest never sees two concurrent writes from one walk.
//!
//! ## Core Types
//!
//! - [`TrackedPath`] and [`normalize`]: Normalized paths used as manifest keys
//! - [`ScopePredicate`]: Whether a path is this system's responsibility
//! - [`CanonicalOperation`] and [`OperationClassifier`]: Event classification
//! - [`SyncDispatcher`] and [`RecursiveMaterializer`]: Applying operations
//! - [`ExplorerHooks`] and [`Interceptor`]: Receiving host events
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: User-facing output
//!
//! ## Examples
//!
//! ```
//! use projsync::config::ConfigBuilder;
//! use projsync::manifest::InMemoryManifest;
//! use projsync::scope::{PathFilter, StaticProject};
//! use projsync::{ExplorerHooks, HostEvent, Interceptor, ScopePredicate, SyncDispatcher, TrackedPath};
//! use projsync::operations::HostOutcome;
//! use std::sync::Arc;
//!
//! let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
//! let root = TrackedPath::new("/proj");
//! let manifest = Arc::new(InMemoryManifest::new(root.clone()));
//!
//! let policy = PathFilter::from_config(root.as_path(), &config).unwrap();
//! let scope = ScopePredicate::new(root.as_path(), Arc::new(StaticProject(true)), Arc::new(policy));
//! let dispatcher = SyncDispatcher::new(manifest.clone(), scope)
//!     .with_walk_options(config.walk_options());
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let interceptor = Arc::new(
//!     Interceptor::new(Arc::new(dispatcher), runtime.handle().clone())
//!         .with_enabled(config.is_enabled()),
//! );
//! let hooks = ExplorerHooks::new();
//! interceptor.install(&hooks);
//!
//! hooks.publish(&HostEvent::Added { path: "main.swift".into(), result: HostOutcome::Succeeded });
//! runtime.block_on(interceptor.settle()).unwrap();
//!
//! assert!(manifest.contains_file(&TrackedPath::new("/proj/main.swift")));
//! ```

pub mod config;
pub mod error;
pub mod interception;
pub mod logging;
pub mod manifest;
pub mod operations;
pub mod path;
pub mod scope;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use interception::{ExplorerHooks, ExplorerObserver, HostEvent, InitState, Interceptor};
pub use logging::{init_logger, LogLevel, Logger, Notice, Notifier};
pub use manifest::{AddFileOptions, InMemoryManifest, ManifestStore};
pub use operations::{
    CanonicalOperation, DispatchOutcome, DispatchReport, ExplorerEvent, HostAction,
    OperationClassifier, OperationPlan, RecursiveMaterializer, SyncDispatcher, WalkOptions,
};
pub use path::{normalize, PathRelationship, TrackedPath};
pub use scope::{PathFilter, ProjectState, ScopePredicate, UpdatePolicy};
