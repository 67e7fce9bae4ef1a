//! Property-based tests for classification.

use super::classifier::OperationClassifier;
use super::event::{BatchItem, DeleteEntry, ExplorerEvent, HostOutcome};
use super::CanonicalOperation;
use crate::path::TrackedPath;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(\\.[a-z]{1,4})?"
}

fn path_strategy() -> impl Strategy<Value = TrackedPath> {
    prop::collection::vec(name_strategy(), 1..5)
        .prop_map(|parts| TrackedPath::new(format!("/proj/{}", parts.join("/"))))
}

fn delete_entry_strategy() -> impl Strategy<Value = DeleteEntry> {
    (path_strategy(), any::<bool>(), any::<bool>()).prop_map(|(path, is_dir, ok)| DeleteEntry {
        path,
        is_dir,
        outcome: if ok {
            HostOutcome::Succeeded
        } else {
            HostOutcome::Failed("denied".into())
        },
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every successful delete entry yields one operation, in selection order
    #[test]
    fn delete_preserves_selection_order(entries in prop::collection::vec(delete_entry_strategy(), 0..12)) {
        let plan = OperationClassifier::classify(&ExplorerEvent::Delete { entries: entries.clone() });

        let expected: Vec<_> = entries
            .iter()
            .filter(|e| e.outcome.is_success())
            .map(|e| if e.is_dir {
                CanonicalOperation::DeleteGroup(e.path.clone())
            } else {
                CanonicalOperation::DeleteFile(e.path.clone())
            })
            .collect();
        let actual: Vec<_> = plan.operations().cloned().collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(plan.len() + plan.warnings.len(), entries.len());
    }

    // Batch copies only ever add files directly under the target
    #[test]
    fn batch_copy_stays_under_target(
        sources in prop::collection::vec((path_strategy(), any::<bool>()), 0..10),
        target in path_strategy(),
    ) {
        let items: Vec<_> = sources
            .into_iter()
            .map(|(source, is_dir)| BatchItem { source, is_dir })
            .collect();
        let files = items.iter().filter(|i| !i.is_dir).count();

        let plan = OperationClassifier::classify(&ExplorerEvent::CopyBatch {
            items,
            target_dir: target.clone(),
        });

        prop_assert_eq!(plan.len(), files);
        for step in &plan.steps {
            prop_assert!(!step.expand);
            match &step.operation {
                CanonicalOperation::AddFile { path, .. } => {
                    prop_assert_eq!(path.parent().as_ref(), Some(&target));
                }
                other => prop_assert!(false, "unexpected {other}"),
            }
        }
    }

    // Single-path events always classify to exactly one step
    #[test]
    fn single_path_events_yield_one_step(
        from in path_strategy(),
        to in path_strategy(),
        is_dir in any::<bool>(),
    ) {
        let events = [
            ExplorerEvent::Create { path: to.clone(), is_dir },
            ExplorerEvent::Rename { from: from.clone(), to: to.clone(), is_dir },
            ExplorerEvent::Copy { from, to, is_dir },
        ];
        for event in &events {
            let plan = OperationClassifier::classify(event);
            prop_assert_eq!(plan.len(), 1);
            prop_assert_eq!(plan.steps[0].operation.is_group_operation(), is_dir);
        }
    }
}
