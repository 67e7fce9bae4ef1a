//! Explorer events, their canonical manifest operations, and the machinery
//! that applies them.
//!
//! # Architecture
//!
//! Handling an event is split into phases:
//! 1. **Classification**: [`OperationClassifier`] turns an [`ExplorerEvent`]
//!    into an [`OperationPlan`] of [`CanonicalOperation`]s.
//! 2. **Scoping**: [`SyncDispatcher`] drops the steps no in-scope path
//!    touches.
//! 3. **Application**: the remaining operations are issued to the
//!    [`ManifestStore`](crate::manifest::ManifestStore) in plan order.
//!    Copied directories are then walked by [`RecursiveMaterializer`].
//!
//! # Examples
//!
//! ```
//! use projsync::operations::{CanonicalOperation, ExplorerEvent, OperationClassifier};
//! use projsync::TrackedPath;
//!
//! let plan = OperationClassifier::classify(&ExplorerEvent::Copy {
//!     from: TrackedPath::new("/proj/src"),
//!     to: TrackedPath::new("/proj/src2"),
//!     is_dir: true,
//! });
//!
//! assert!(plan.steps[0].expand);
//! assert_eq!(
//!     plan.steps[0].operation,
//!     CanonicalOperation::AddGroup(TrackedPath::new("/proj/src2")),
//! );
//! ```

pub mod canonical;
pub mod classifier;
pub mod dispatcher;
pub mod event;
pub mod materializer;
pub mod plan;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use canonical::CanonicalOperation;
pub use classifier::OperationClassifier;
pub use dispatcher::{ActionPhase, DispatchOutcome, DispatchReport, SyncDispatcher};
pub use event::{BatchItem, DeleteEntry, ExplorerEvent, HostAction, HostOutcome};
pub use materializer::{PendingWalk, RecursiveMaterializer, WalkOptions, WalkReport};
pub use plan::{OperationPlan, PlanStep};
