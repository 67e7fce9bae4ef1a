//! The observer that turns host events into scheduled dispatches.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::hooks::{ExplorerHooks, ExplorerObserver, HostEvent, ObserverId};
use crate::error::Result;
use crate::operations::{
    BatchItem, DeleteEntry, DispatchReport, ExplorerEvent, HostAction, SyncDispatcher,
};
use crate::path::{normalize_against, PathProbe, TrackedPath};

/// Installation state of an [`Interceptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    /// Not subscribed to any hooks.
    #[default]
    Uninitialized,
    /// Subscribed; further installs are no-ops.
    Ready,
}

#[derive(Debug, Default)]
struct Installation {
    state: InitState,
    id: Option<ObserverId>,
}

/// Schedules one [`SyncDispatcher::dispatch`] per host event.
///
/// Observing never blocks the host: each event is normalized, probed and
/// handed to a task spawned on the runtime, and the observer returns
/// immediately. Tasks for different events may interleave.
///
/// # Examples
///
/// ```
/// use projsync::interception::{ExplorerHooks, HostEvent, Interceptor};
/// use projsync::manifest::InMemoryManifest;
/// use projsync::operations::{HostOutcome, SyncDispatcher};
/// use projsync::scope::{ScopePredicate, StaticProject};
/// use projsync::TrackedPath;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let root = TrackedPath::new("/proj");
/// let manifest = Arc::new(InMemoryManifest::new(root.clone()));
/// let scope = ScopePredicate::new(
///     root.as_path(),
///     Arc::new(StaticProject(true)),
///     Arc::new(|_: &Path| true),
/// );
/// let dispatcher = SyncDispatcher::new(manifest.clone(), scope);
///
/// let hooks = ExplorerHooks::new();
/// let interceptor = Arc::new(Interceptor::new(Arc::new(dispatcher), runtime.handle().clone()));
/// assert!(interceptor.install(&hooks));
/// assert!(!interceptor.install(&hooks));
///
/// hooks.publish(&HostEvent::Renamed {
///     from: "a.swift".into(),
///     to: "b.swift".into(),
///     result: HostOutcome::Succeeded,
/// });
/// let reports = runtime.block_on(interceptor.settle()).unwrap();
/// assert_eq!(reports.len(), 1);
/// assert!(manifest.contains_file(&TrackedPath::new("/proj/b.swift")));
/// ```
pub struct Interceptor {
    dispatcher: Arc<SyncDispatcher>,
    runtime: Handle,
    root: TrackedPath,
    probe: Arc<dyn PathProbe>,
    enabled: AtomicBool,
    installation: Mutex<Installation>,
    tasks: Mutex<Vec<JoinHandle<DispatchReport>>>,
}

impl Interceptor {
    /// Creates an enabled, uninstalled interceptor.
    ///
    /// Relative host paths are resolved against the dispatcher's project
    /// root, and directory checks use the dispatcher's probe.
    #[must_use]
    pub fn new(dispatcher: Arc<SyncDispatcher>, runtime: Handle) -> Self {
        let root = dispatcher.scope().root().clone();
        let probe = dispatcher.probe();
        Self {
            dispatcher,
            runtime,
            root,
            probe,
            enabled: AtomicBool::new(true),
            installation: Mutex::new(Installation::default()),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Sets the initial value of the enable flag.
    #[must_use]
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.store(enabled, Ordering::SeqCst);
        self
    }

    /// Turns automatic updates on or off at runtime.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether events are currently acted on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// The current installation state.
    #[must_use]
    pub fn state(&self) -> InitState {
        self.installation().state
    }

    /// Subscribes to `hooks`. Returns `false` if already installed.
    pub fn install(self: &Arc<Self>, hooks: &ExplorerHooks) -> bool {
        let mut installation = self.installation();
        if installation.state == InitState::Ready {
            log::debug!("interceptor already installed");
            return false;
        }
        let observer: Arc<dyn ExplorerObserver> = Arc::clone(self) as Arc<dyn ExplorerObserver>;
        installation.id = Some(hooks.subscribe(observer));
        installation.state = InitState::Ready;
        log::debug!("interceptor installed for {}", self.root);
        true
    }

    /// Unsubscribes from `hooks`. Returns `false` if not installed.
    pub fn uninstall(&self, hooks: &ExplorerHooks) -> bool {
        let mut installation = self.installation();
        let Some(id) = installation.id.take() else {
            return false;
        };
        hooks.unsubscribe(id);
        installation.state = InitState::Uninitialized;
        true
    }

    /// Number of dispatches scheduled and still running.
    ///
    /// Finished dispatches are released here and on every new event, so a
    /// host that never calls [`Interceptor::settle`] does not accumulate
    /// them.
    #[must_use]
    pub fn pending(&self) -> usize {
        let mut tasks = self.tasks();
        tasks.retain(|t| !t.is_finished());
        tasks.len()
    }

    /// Waits for every dispatch still held and returns their reports in
    /// scheduling order.
    ///
    /// Reports of dispatches that finished before a later event or a call
    /// to [`Interceptor::pending`] have already been released.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TaskFailed`] if a dispatch task panicked or
    /// was cancelled.
    pub async fn settle(&self) -> Result<Vec<DispatchReport>> {
        let mut reports = Vec::new();
        loop {
            let batch = std::mem::take(&mut *self.tasks());
            if batch.is_empty() {
                return Ok(reports);
            }
            for task in batch {
                reports.push(task.await?);
            }
        }
    }

    /// Converts a host event into the action handed to the dispatcher.
    ///
    /// Directory flags are probed now, after the host mutation, except for
    /// deletes where the host reports them.
    #[must_use]
    pub fn translate(&self, event: &HostEvent) -> HostAction {
        let (event, result) = match event {
            HostEvent::Added { path, result } => {
                let path = self.resolve(path);
                let is_dir = result.is_success() && self.probe.is_dir(path.as_path());
                (ExplorerEvent::Create { path, is_dir }, result)
            }
            HostEvent::Renamed { from, to, result } => {
                let (from, to) = (self.resolve(from), self.resolve(to));
                let is_dir = result.is_success() && self.probe.is_dir(to.as_path());
                (ExplorerEvent::Rename { from, to, is_dir }, result)
            }
            HostEvent::Copied { from, to, result } => {
                let (from, to) = (self.resolve(from), self.resolve(to));
                let is_dir = result.is_success() && self.probe.is_dir(to.as_path());
                (ExplorerEvent::Copy { from, to, is_dir }, result)
            }
            HostEvent::BatchCopied {
                sources,
                target_dir,
                result,
            } => {
                let items = sources
                    .iter()
                    .map(|source| {
                        let source = self.resolve(source);
                        let is_dir = self.probe.is_dir(source.as_path());
                        BatchItem { source, is_dir }
                    })
                    .collect();
                let target_dir = self.resolve(target_dir);
                (ExplorerEvent::CopyBatch { items, target_dir }, result)
            }
            HostEvent::Deleted { entries } => {
                let entries = entries
                    .iter()
                    .map(|entry| DeleteEntry {
                        path: self.resolve(&entry.path),
                        is_dir: entry.was_dir,
                        outcome: entry.result.clone(),
                    })
                    .collect();
                return HostAction::delete(entries);
            }
        };
        HostAction {
            event,
            outcome: result.clone(),
        }
    }

    fn resolve(&self, path: &Path) -> TrackedPath {
        normalize_against(path, self.root.as_path())
    }

    fn installation(&self) -> MutexGuard<'_, Installation> {
        self.installation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<DispatchReport>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExplorerObserver for Interceptor {
    fn on_event(&self, event: &HostEvent) {
        if !self.is_enabled() {
            log::trace!("automatic updates disabled; ignoring {event:?}");
            return;
        }
        let action = self.translate(event);
        let dispatcher = Arc::clone(&self.dispatcher);
        let task = self
            .runtime
            .spawn(async move { dispatcher.dispatch(action).await });
        let mut tasks = self.tasks();
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("root", &self.root)
            .field("enabled", &self.is_enabled())
            .field("state", &self.state())
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
