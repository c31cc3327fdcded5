// SPDX-License-Identifier: MIT
//! Opaque handles and the process-wide registry resolving them
//!
//! External consumers never touch a [crate::set::SortedSet] directly; they
//! hold a [Handle], an opaque, `Clone`-able, process-wide identifier. The
//! registry owns the container for as long as any clone of its `Handle`
//! exists and releases it deterministically once the last clone drops; this
//! falls out of [Arc]'s strong-count bookkeeping rather than requiring
//! a finalizer callback from a host runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::concurrency::Guarded;
use crate::config::Config;
use crate::error::Error;
use crate::set::SortedSet;


static REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    entries: DashMap<u64, Guarded>,
}

impl Registry {
    fn insert(&self, set: SortedSet) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, Arc::new(std::sync::Mutex::new(set)));
        id
    }

    fn resolve(&self, id: u64) -> Option<Guarded> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    fn release(&self, id: u64) {
        self.entries.remove(&id);
    }
}

/// Internal state shared by all clones of a [Handle]
///
/// Dropping the last clone runs [HandleInner]'s [Drop] impl, which removes
/// the container from the registry.
#[derive(Debug)]
struct HandleInner {
    id: u64,
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        REGISTRY.release(self.id);
    }
}

/// An opaque, process-wide, reference-counted identifier for a container
///
/// Cloning a `Handle` shares ownership of the underlying container; the
/// container is destroyed only once every clone has been dropped.
#[derive(Debug, Clone)]
pub struct Handle(Arc<HandleInner>);

impl Handle {
    /// Register a newly constructed container and return its handle
    pub(crate) fn register(set: SortedSet) -> Self {
        let id = REGISTRY.insert(set);
        Self(Arc::new(HandleInner { id }))
    }

    /// Resolve this handle to its guarded container
    ///
    /// Fails with [Error::BadReference] if the handle no longer refers to a
    /// live container. This should not normally happen for a `Handle` that
    /// is still alive, but is kept as an explicit, checked path rather than
    /// an `unwrap` since the registry is process-global state.
    pub(crate) fn resolve(&self) -> Result<Guarded, Error> {
        REGISTRY.resolve(self.0.id).ok_or(Error::BadReference)
    }

    /// The handle's numeric id, for diagnostics and tracing only
    pub fn id(&self) -> u64 {
        self.0.id
    }
}

/// Create a new container and return its handle
///
/// The container starts out with one pre-populated empty bucket, ready to
/// accept `add` calls immediately.
pub fn new(config: Config) -> Handle {
    Handle::register(SortedSet::new(config))
}

/// Create a new, bucket-less container for bulk loading
pub fn empty(config: Config) -> Handle {
    Handle::register(SortedSet::empty(config))
}

#[cfg(test)]
impl Handle {
    /// Construct a `Handle` for an id that was never registered (or has
    /// since been released), to exercise the [Error::BadReference] path.
    pub(crate) fn from_raw_id_for_test(id: u64) -> Self {
        Self(Arc::new(HandleInner { id }))
    }
}
