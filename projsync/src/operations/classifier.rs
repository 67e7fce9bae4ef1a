//! Mapping from explorer events to canonical operations.
//!
//! | Event        | Directory | Operation                              |
//! |--------------|-----------|----------------------------------------|
//! | rename/move  | yes       | `MoveOrRenameGroup(from, to)`          |
//! | rename/move  | no        | `MoveFile(from, to)`                   |
//! | create       | yes       | `AddGroup(path)`                       |
//! | create       | no        | `AddFile(path)`                        |
//! | copy         | yes       | `AddGroup(path)`, then its descendants |
//! | copy         | no        | `AddFile(path)`                        |
//! | copy (batch) | no        | `AddFile(target/name)` per item        |
//! | delete       | yes       | `DeleteGroup(path)`                    |
//! | delete       | no        | `DeleteFile(path)`                     |
//!
//! Batch copies never expand directories; only the single-copy path does.

use super::canonical::CanonicalOperation;
use super::event::{BatchItem, DeleteEntry, ExplorerEvent, HostOutcome};
use super::plan::OperationPlan;
use crate::path::{PathRelationship, TrackedPath};

/// Classifies explorer events into plans of canonical operations.
///
/// # Examples
///
/// ```
/// use projsync::operations::{CanonicalOperation, ExplorerEvent, OperationClassifier};
/// use projsync::TrackedPath;
///
/// let plan = OperationClassifier::classify(&ExplorerEvent::Create {
///     path: TrackedPath::new("/proj/src"),
///     is_dir: true,
/// });
/// assert_eq!(
///     plan.steps[0].operation,
///     CanonicalOperation::AddGroup(TrackedPath::new("/proj/src")),
/// );
/// ```
pub struct OperationClassifier;

impl OperationClassifier {
    /// Builds the plan for `event`.
    ///
    /// The plan is not filtered by scope; that is the dispatcher's job.
    #[must_use]
    pub fn classify(event: &ExplorerEvent) -> OperationPlan {
        let plan = OperationPlan::new(event.description());
        match event {
            ExplorerEvent::Rename { from, to, is_dir } => {
                let (from, to) = (from.clone(), to.clone());
                plan.add_operation(if *is_dir {
                    CanonicalOperation::MoveOrRenameGroup { from, to }
                } else {
                    CanonicalOperation::MoveFile { from, to }
                })
            }
            ExplorerEvent::Create { path, is_dir } => plan.add_operation(add(path, *is_dir)),
            ExplorerEvent::Copy { to, is_dir, .. } => {
                if *is_dir {
                    plan.add_expanding(CanonicalOperation::AddGroup(to.clone()))
                } else {
                    plan.add_operation(add(to, false))
                }
            }
            ExplorerEvent::CopyBatch { items, target_dir } => {
                Self::classify_batch(plan, items, target_dir)
            }
            ExplorerEvent::Delete { entries } => Self::classify_delete(plan, entries),
        }
    }

    fn classify_batch(
        mut plan: OperationPlan,
        items: &[BatchItem],
        target_dir: &TrackedPath,
    ) -> OperationPlan {
        for item in items {
            let Some(name) = item.source.file_name() else {
                plan = plan.add_warning(format!(
                    "{} has no file name; not added to the manifest",
                    item.source
                ));
                continue;
            };

            let destination = target_dir.join(name);
            if !PathRelationship::is_strictly_within(destination.as_path(), target_dir.as_path()) {
                plan = plan.add_warning(format!(
                    "{destination} does not resolve under {target_dir}; not added to the manifest"
                ));
                continue;
            }

            if item.is_dir {
                plan = plan.add_warning(format!(
                    "directory {destination} copied in a batch is not added to the manifest"
                ));
                continue;
            }

            plan = plan.add_operation(add(&destination, false));
        }
        plan
    }

    fn classify_delete(mut plan: OperationPlan, entries: &[DeleteEntry]) -> OperationPlan {
        for entry in entries {
            if let HostOutcome::Failed(reason) = &entry.outcome {
                plan = plan.add_warning(format!(
                    "{} was not deleted ({reason}); manifest left unchanged",
                    entry.path
                ));
                continue;
            }
            let path = entry.path.clone();
            plan = plan.add_operation(if entry.is_dir {
                CanonicalOperation::DeleteGroup(path)
            } else {
                CanonicalOperation::DeleteFile(path)
            });
        }
        plan
    }
}

fn add(path: &TrackedPath, is_dir: bool) -> CanonicalOperation {
    if is_dir {
        CanonicalOperation::AddGroup(path.clone())
    } else {
        CanonicalOperation::AddFile {
            path: path.clone(),
            create_groups: false,
        }
    }
}
