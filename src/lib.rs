// SPDX-License-Identifier: MIT
//! A bucketed, ordered, duplicate-free collection of heterogeneous terms
//!
//! The container is a two-level layout: an outer ordered sequence of inner
//! ordered [Bucket]s. This bounds the cost of mutation to a single bucket's
//! length and limits outer growth to relocating fixed-size bucket
//! descriptors rather than term contents; see [set] for the container
//! itself and [locator] for how a term is mapped to its bucket.
//!
//! Containers are never touched directly by external callers: [registry]
//! hands out an opaque, reference-counted [registry::Handle], and every
//! mutating or reading operation goes through [api], which validates
//! arguments, resolves the handle, and takes the container's single
//! exclusive, non-blocking lock ([concurrency]) for the duration of the
//! call.

/// Operation dispatch, argument validation, and result shape
pub mod api;
/// Ordered, duplicate-free, length-bounded inner sequence of terms
pub mod bucket;
/// Construction-time tunables
pub mod config;
/// The single exclusive lock guarding a container
pub mod concurrency;
/// The error taxonomy surfaced by the boundary API
pub mod error;
/// Mapping a term to its `(bucket, offset)` coordinates
pub mod locator;
/// Opaque handles and the process-wide registry resolving them
pub mod registry;
/// The bucketed ordered-set container
pub mod set;
/// The term universe and its total order
pub mod term;



pub use api::OpOutcome;
pub use bucket::Bucket;
pub use config::Config;
pub use error::Error;
pub use registry::Handle;
pub use set::SortedSet;
pub use term::{RawTerm, Term};
