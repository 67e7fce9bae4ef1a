//! The interception layer between the explorer host and the dispatcher.
//!
//! The host exposes typed post-mutation hooks ([`ExplorerHooks`]); the
//! synchronizer registers an [`Interceptor`] as an observer rather than
//! wrapping host functions. Every user-triggered change therefore reaches
//! the [`SyncDispatcher`](crate::operations::SyncDispatcher) exactly once,
//! after the host has already changed the disk.

pub mod hooks;
pub mod interceptor;

pub use hooks::{DeletedEntry, ExplorerHooks, ExplorerObserver, HostEvent, ObserverId};
pub use interceptor::{InitState, Interceptor};
