//! Typed post-mutation hooks published by the explorer host.
//!
//! The host performs each filesystem change itself and then publishes a
//! [`HostEvent`] describing it. Observers cannot change the host's return
//! value or its user-visible behaviour; they only watch.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::operations::HostOutcome;

/// One selected entry of a delete, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEntry {
    /// The path the user selected.
    pub path: PathBuf,
    /// Whether the path was a directory before it was deleted.
    pub was_dir: bool,
    /// Whether the host managed to delete it.
    pub result: HostOutcome,
}

/// A filesystem change the host has just performed.
///
/// Paths may be relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The explorer's add action created a file or directory.
    Added {
        /// The created path.
        path: PathBuf,
        /// The host's outcome.
        result: HostOutcome,
    },

    /// A path was renamed or moved.
    Renamed {
        /// The previous location.
        from: PathBuf,
        /// The new location.
        to: PathBuf,
        /// The host's outcome.
        result: HostOutcome,
    },

    /// A single path was copied.
    Copied {
        /// The copied path.
        from: PathBuf,
        /// The copy.
        to: PathBuf,
        /// The host's outcome.
        result: HostOutcome,
    },

    /// Several paths were copied into one directory.
    BatchCopied {
        /// The copied paths, in selection order.
        sources: Vec<PathBuf>,
        /// The receiving directory.
        target_dir: PathBuf,
        /// The host's outcome.
        result: HostOutcome,
    },

    /// The explorer's delete action removed the selected paths.
    Deleted {
        /// The selected entries, in selection order.
        entries: Vec<DeletedEntry>,
    },
}

/// Receives [`HostEvent`]s.
pub trait ExplorerObserver: Send + Sync {
    /// Called after the host has performed a mutation.
    fn on_event(&self, event: &HostEvent);
}

/// Handle returned by [`ExplorerHooks::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The registry the host publishes its mutations to.
///
/// # Examples
///
/// ```
/// use projsync::interception::{ExplorerHooks, ExplorerObserver, HostEvent};
/// use projsync::operations::HostOutcome;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl ExplorerObserver for Counter {
///     fn on_event(&self, _: &HostEvent) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let hooks = ExplorerHooks::new();
/// let counter = Arc::new(Counter::default());
/// let id = hooks.subscribe(counter.clone());
///
/// hooks.publish(&HostEvent::Added { path: "a.swift".into(), result: HostOutcome::Succeeded });
/// assert!(hooks.unsubscribe(id));
/// hooks.publish(&HostEvent::Added { path: "b.swift".into(), result: HostOutcome::Succeeded });
///
/// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct ExplorerHooks {
    observers: RwLock<Vec<(ObserverId, Arc<dyn ExplorerObserver>)>>,
    next_id: AtomicU64,
}

impl ExplorerHooks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer.
    pub fn subscribe(&self, observer: Arc<dyn ExplorerObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Delivers `event` to every observer in subscription order.
    pub fn publish(&self, event: &HostEvent) {
        let observers: Vec<_> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for observer in observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for ExplorerHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerHooks")
            .field("observers", &self.observer_count())
            .finish()
    }
}
