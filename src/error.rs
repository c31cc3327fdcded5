// SPDX-License-Identifier: MIT
//! Types and utilities related to error handling and reporting
//!
//! [`OutOfBounds`](crate::api::OpOutcome::OutOfBounds) and
//! [`NotFound`](crate::api::OpOutcome::NotFound) are deliberately absent from
//! [`Error`]: they are ordinary result variants of
//! [`OpOutcome`](crate::api::OpOutcome), not failures.

use thiserror::Error;


/// Failure kinds surfaced by the boundary API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The handle did not resolve to a live container
    #[error("handle does not refer to a live container")]
    BadReference,

    /// The container's lock was contended and the operation did not execute
    ///
    /// Transient. Retrying is the caller's responsibility; this crate never
    /// retries on its own.
    #[error("could not acquire the container lock without blocking")]
    LockFail,

    /// A submitted term (or one of its nested elements) is not admissible
    #[error("term contains a value of an unsupported type")]
    UnsupportedType,

    /// `append_bucket` was called with a batch at or above `bucket_capacity`
    #[error("bucket would exceed the configured bucket capacity")]
    MaxBucketSizeExceeded,
}

/// Convenience alias for boundary API results
pub type Result<T> = std::result::Result<T, Error>;
