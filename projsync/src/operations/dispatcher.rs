//! The synchronization façade.
//!
//! Every intercepted explorer action passes through
//! [`SyncDispatcher::dispatch`] exactly once:
//!
//! ```text
//! Idle -> Intercepted -> Classified -> Applied (one per manifest call) -> Idle
//! ```
//!
//! A failed host mutation never leaves `Idle`. An action whose operations are
//! all out of scope returns to `Idle` straight from `Intercepted`.
//!
//! Failures of individual manifest calls never abort the remaining ones; the
//! dispatcher is a best-effort synchronizer, not a transaction. Every failure
//! that leaves the manifest out of step with the disk is surfaced through the
//! [`Notifier`].

use std::fmt;
use std::sync::Arc;

use super::canonical::CanonicalOperation;
use super::classifier::OperationClassifier;
use super::event::{HostAction, HostOutcome};
use super::materializer::{RecursiveMaterializer, WalkOptions, WalkReport};
use super::plan::PlanStep;
use crate::error::Error;
use crate::logging::{Logger, Notice, Notifier};
use crate::manifest::ManifestStore;
use crate::path::{FsProbe, PathProbe, TrackedPath};
use crate::scope::ScopePredicate;

/// A state of the per-action state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// No action in progress.
    Idle,
    /// The host mutation succeeded and the action was picked up.
    Intercepted,
    /// The action was classified and has in-scope operations.
    Classified,
    /// One manifest call completed successfully.
    Applied,
}

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// The host mutation failed; the manifest was not touched.
    HostFailed,
    /// Nothing the action changed is tracked.
    OutOfScope,
    /// In-scope operations were issued. Individual calls may still have
    /// failed; see [`DispatchReport::failures`].
    Applied,
}

/// What happened to one intercepted action.
#[derive(Debug)]
pub struct DispatchReport {
    /// Description of the explorer event.
    pub description: String,

    /// How the action ended.
    pub outcome: DispatchOutcome,

    /// The phases the action passed through, in order.
    pub phases: Vec<ActionPhase>,

    /// Operations the manifest accepted, in issue order. Materialized
    /// descendants are listed in [`DispatchReport::walks`] instead.
    pub applied: Vec<CanonicalOperation>,

    /// Failed manifest calls, including those of recursive walks.
    pub failures: Vec<Error>,

    /// Plan warnings surfaced to the user.
    pub warnings: Vec<String>,

    /// Reports of recursive materializations.
    pub walks: Vec<WalkReport>,
}

impl DispatchReport {
    fn new(description: String) -> Self {
        Self {
            description,
            outcome: DispatchOutcome::OutOfScope,
            phases: vec![ActionPhase::Idle],
            applied: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            walks: Vec::new(),
        }
    }

    fn enter(&mut self, phase: ActionPhase) {
        log::trace!("{}: {:?}", self.description, phase);
        self.phases.push(phase);
    }

    fn finish(mut self, outcome: DispatchOutcome) -> Self {
        self.outcome = outcome;
        if self.phases.last() != Some(&ActionPhase::Idle) {
            self.enter(ActionPhase::Idle);
        }
        self
    }

    /// Number of `Applied` phases, one per successful manifest call.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.phases
            .iter()
            .filter(|p| **p == ActionPhase::Applied)
            .count()
    }

    /// Returns `true` when the action completed without any failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.walks.iter().all(|w| w.traversal_failures.is_empty())
    }
}

/// Applies scope, classification and the manifest calls for each action.
///
/// # Examples
///
/// ```
/// use projsync::manifest::InMemoryManifest;
/// use projsync::operations::{DispatchOutcome, ExplorerEvent, HostAction, SyncDispatcher};
/// use projsync::scope::{ScopePredicate, StaticProject};
/// use projsync::TrackedPath;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let root = TrackedPath::new("/proj");
/// let manifest = Arc::new(InMemoryManifest::new(root.clone()));
/// let scope = ScopePredicate::new(
///     root.as_path(),
///     Arc::new(StaticProject(true)),
///     Arc::new(|_: &Path| true),
/// );
/// let dispatcher = SyncDispatcher::new(manifest.clone(), scope);
///
/// let report = dispatcher
///     .dispatch(HostAction::succeeded(ExplorerEvent::Create {
///         path: TrackedPath::new("/proj/a.swift"),
///         is_dir: false,
///     }))
///     .await;
///
/// assert_eq!(report.outcome, DispatchOutcome::Applied);
/// assert!(manifest.contains_file(&TrackedPath::new("/proj/a.swift")));
/// # });
/// ```
#[derive(Clone)]
pub struct SyncDispatcher {
    manifest: Arc<dyn ManifestStore>,
    scope: ScopePredicate,
    notifier: Arc<dyn Notifier>,
    probe: Arc<dyn PathProbe>,
    walk_options: WalkOptions,
}

impl SyncDispatcher {
    /// Creates a dispatcher that reports through a default [`Logger`] and
    /// probes the real filesystem.
    #[must_use]
    pub fn new(manifest: Arc<dyn ManifestStore>, scope: ScopePredicate) -> Self {
        Self {
            manifest,
            scope,
            notifier: Arc::new(Logger::default()),
            probe: Arc::new(FsProbe),
            walk_options: WalkOptions::default(),
        }
    }

    /// Sets where user-visible failures are reported.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the filesystem probe.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn PathProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Sets the options for recursive walks.
    #[must_use]
    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.walk_options = options;
        self
    }

    /// The scope predicate.
    #[must_use]
    pub fn scope(&self) -> &ScopePredicate {
        &self.scope
    }

    /// The filesystem probe.
    #[must_use]
    pub fn probe(&self) -> Arc<dyn PathProbe> {
        Arc::clone(&self.probe)
    }

    /// Processes one intercepted action.
    pub async fn dispatch(&self, action: HostAction) -> DispatchReport {
        let mut report = DispatchReport::new(action.event.description());

        if let HostOutcome::Failed(reason) = &action.outcome {
            let err = Error::HostMutation {
                action: action.event.kind().to_string(),
                path: action
                    .event
                    .target()
                    .map(|p| p.as_path().to_path_buf())
                    .unwrap_or_default(),
                reason: reason.clone(),
            };
            log::warn!("{err}; manifest untouched");
            return report.finish(DispatchOutcome::HostFailed);
        }
        report.enter(ActionPhase::Intercepted);

        let plan = OperationClassifier::classify(&action.event);
        for warning in &plan.warnings {
            log::warn!("{warning}");
            self.notifier.notify(&Notice::warning(warning.clone()));
        }
        report.warnings.clone_from(&plan.warnings);

        let steps: Vec<PlanStep> = plan
            .steps
            .into_iter()
            .filter(|step| self.scope.in_scope_any(step.operation.scope_paths()))
            .collect();
        if steps.is_empty() {
            log::debug!("{}: out of scope", report.description);
            return report.finish(DispatchOutcome::OutOfScope);
        }
        report.enter(ActionPhase::Classified);

        for step in steps {
            self.apply_step(step, &mut report).await;
        }
        report.finish(DispatchOutcome::Applied)
    }

    async fn apply_step(&self, step: PlanStep, report: &mut DispatchReport) {
        let PlanStep { operation, expand } = step;
        log::debug!("{}", operation.description());
        let expand_root = expand.then(|| operation.primary_path().clone());

        match operation.apply(self.manifest.as_ref()).await {
            Ok(()) => {
                report.enter(ActionPhase::Applied);
                report.applied.push(operation);
            }
            Err(err) => self.surface_failure(err, report),
        }

        // Descendants are added with group creation on, so a failed group
        // call does not strand them.
        if let Some(root) = expand_root {
            self.materialize(&root, report).await;
        }
    }

    async fn materialize(&self, root: &TrackedPath, report: &mut DispatchReport) {
        let materializer =
            RecursiveMaterializer::new(self.manifest.as_ref(), &self.scope, self.probe.as_ref())
                .with_options(self.walk_options);
        match materializer.materialize(root).await {
            Ok(mut walk) => {
                for _ in &walk.added {
                    report.enter(ActionPhase::Applied);
                }
                for err in &walk.traversal_failures {
                    self.notifier.notify(&Notice::warning(err.to_string()));
                }
                for err in walk.manifest_failures.drain(..) {
                    self.surface_failure(err, report);
                }
                log::debug!(
                    "walk of {} added {} file(s), skipped {}",
                    walk.root,
                    walk.added.len(),
                    walk.skipped.len()
                );
                report.walks.push(walk);
            }
            Err(err) => self.surface_failure(err, report),
        }
    }

    fn surface_failure(&self, err: Error, report: &mut DispatchReport) {
        log::error!("{}: {err}", report.description);
        self.notifier.notify(&Notice::error(err.to_string()));
        report.failures.push(err);
    }
}

impl fmt::Debug for SyncDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncDispatcher")
            .field("scope", &self.scope)
            .field("walk_options", &self.walk_options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoticeLevel;
    use crate::manifest::MockManifestStore;
    use crate::operations::event::{DeleteEntry, ExplorerEvent};
    use crate::scope::StaticProject;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collected(Mutex<Vec<Notice>>);

    impl Notifier for Collected {
        fn notify(&self, notice: &Notice) {
            self.0.lock().unwrap().push(notice.clone());
        }
    }

    struct NoDirs;

    impl PathProbe for NoDirs {
        fn is_dir(&self, _: &Path) -> bool {
            false
        }
        fn exists(&self, _: &Path) -> bool {
            true
        }
    }

    fn p(path: &str) -> TrackedPath {
        TrackedPath::new(path)
    }

    fn dispatcher(manifest: MockManifestStore, configured: bool) -> (SyncDispatcher, Arc<Collected>) {
        let scope = ScopePredicate::new(
            Path::new("/proj"),
            Arc::new(StaticProject(configured)),
            Arc::new(|_: &Path| true),
        );
        let notices = Arc::new(Collected::default());
        let dispatcher = SyncDispatcher::new(Arc::new(manifest), scope)
            .with_notifier(notices.clone())
            .with_probe(Arc::new(NoDirs));
        (dispatcher, notices)
    }

    #[tokio::test]
    async fn test_host_failure_short_circuits() {
        let manifest = MockManifestStore::new();
        let (dispatcher, notices) = dispatcher(manifest, true);

        let report = dispatcher
            .dispatch(HostAction::failed(
                ExplorerEvent::Create {
                    path: p("/proj/a.swift"),
                    is_dir: false,
                },
                "disk full",
            ))
            .await;

        assert_eq!(report.outcome, DispatchOutcome::HostFailed);
        assert_eq!(report.phases, vec![ActionPhase::Idle]);
        assert!(notices.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_project_is_out_of_scope() {
        let manifest = MockManifestStore::new();
        let (dispatcher, _) = dispatcher(manifest, false);

        let report = dispatcher
            .dispatch(HostAction::succeeded(ExplorerEvent::Create {
                path: p("/proj/a.swift"),
                is_dir: false,
            }))
            .await;

        assert_eq!(report.outcome, DispatchOutcome::OutOfScope);
        assert_eq!(
            report.phases,
            vec![ActionPhase::Idle, ActionPhase::Intercepted, ActionPhase::Idle]
        );
    }

    #[tokio::test]
    async fn test_move_fires_when_only_source_in_scope() {
        let mut manifest = MockManifestStore::new();
        manifest
            .expect_move_file()
            .with(eq(p("/proj/src/a.swift")), eq(p("/tmp/a.swift")))
            .times(1)
            .returning(|_, _| Ok(()));
        let (dispatcher, _) = dispatcher(manifest, true);

        let report = dispatcher
            .dispatch(HostAction::succeeded(ExplorerEvent::Rename {
                from: p("/proj/src/a.swift"),
                to: p("/tmp/a.swift"),
                is_dir: false,
            }))
            .await;

        assert_eq!(report.outcome, DispatchOutcome::Applied);
        assert_eq!(
            report.phases,
            vec![
                ActionPhase::Idle,
                ActionPhase::Intercepted,
                ActionPhase::Classified,
                ActionPhase::Applied,
                ActionPhase::Idle,
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_batch_in_selection_order_despite_failures() {
        let mut manifest = MockManifestStore::new();
        let mut seq = Sequence::new();
        manifest
            .expect_delete_file()
            .with(eq(p("/proj/a.swift")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|path| Err(Error::manifest("delete_file", path.as_path(), "locked")));
        manifest
            .expect_delete_group()
            .with(eq(p("/proj/src")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        manifest
            .expect_delete_file()
            .with(eq(p("/proj/c.swift")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let (dispatcher, notices) = dispatcher(manifest, true);

        let entry = |path: &str, is_dir, outcome| DeleteEntry {
            path: p(path),
            is_dir,
            outcome,
        };
        let report = dispatcher
            .dispatch(HostAction::delete(vec![
                entry("/proj/a.swift", false, HostOutcome::Succeeded),
                entry("/proj/src", true, HostOutcome::Succeeded),
                entry("/proj/b.swift", false, HostOutcome::Failed("busy".into())),
                entry("/proj/c.swift", false, HostOutcome::Succeeded),
            ]))
            .await;

        assert_eq!(report.outcome, DispatchOutcome::Applied);
        assert_eq!(report.applied_count(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.warnings.len(), 1);

        let notices = notices.0.lock().unwrap();
        let levels: Vec<_> = notices.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Warning, NoticeLevel::Error]);
    }
}
