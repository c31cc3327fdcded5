// SPDX-License-Identifier: MIT
//! The single exclusive lock guarding a [crate::set::SortedSet]
//!
//! Every boundary operation follows the same protocol: try to acquire the
//! lock without blocking, run the operation body to completion if acquired,
//! and release it on every exit path including failures. There is no
//! suspension point inside the critical section and no retry here; a
//! caller that receives [crate::error::Error::LockFail] is responsible for
//! rescheduling the call.

use std::sync::{Arc, Mutex, TryLockError};

use crate::error::Error;
use crate::set::SortedSet;


/// A container guarded by a single exclusive, non-blocking-acquire lock
pub type Guarded = Arc<Mutex<SortedSet>>;

/// Run `op` against the container behind `guarded`, without blocking
///
/// Tries to acquire the lock; if contended, returns
/// [Error::LockFail] immediately rather than waiting. If the lock was
/// poisoned by a prior panic inside a critical section, the poisoned guard
/// is recovered rather than propagated as a new error kind. The error
/// taxonomy has no "poisoned" variant, and treating a single panicking
/// caller as a permanent [Error::BadReference] would brick the handle for
/// the rest of the process.
pub fn with_locked<T>(guarded: &Guarded, op: impl FnOnce(&mut SortedSet) -> T) -> Result<T, Error> {
    match guarded.try_lock() {
        Ok(mut guard) => Ok(op(&mut guard)),
        Err(TryLockError::WouldBlock) => Err(Error::LockFail),
        Err(TryLockError::Poisoned(poisoned)) => {
            let mut guard = poisoned.into_inner();
            Ok(op(&mut guard))
        }
    }
}
