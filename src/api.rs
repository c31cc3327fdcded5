// SPDX-License-Identifier: MIT
//! Operation dispatch, argument validation, and result shape
//!
//! This is the boundary a host runtime's FFI glue (out of scope for this
//! crate) would call into: one function per supported operation, each
//! taking a [Handle] and returning a [Result<OpOutcome, Error>]. Argument
//! admission (via [crate::term::admit]) always runs before a handle is
//! resolved or a lock is taken, so a submission of an inadmissible term
//! never touches the container.

use crate::concurrency::with_locked;
use crate::config::Config;
use crate::error::Error;
use crate::registry::{self, Handle};
use crate::set::{AddOutcome, FindIndexOutcome, RemoveOutcome};
use crate::term::{admit, RawTerm, Term};


/// The tagged result of a dispatched operation
///
/// A single closed enum stands in for the tagged result every operation
/// produces; translating it into whatever wire format a host runtime
/// expects is the term-encoding boundary's job, not this crate's.
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutcome {
    /// `add`: the term was absent and is now present at this global index
    Added(usize),
    /// `add`: the term was already present at this global index
    Duplicate(usize),
    /// `remove`: the term was present and has been removed from this index
    Removed(usize),
    /// `remove` / `find_index`: the term was not present
    NotFound,
    /// `at`: the element at the requested index
    Element(Term),
    /// `at`: the requested index was outside `[0, size)`
    OutOfBounds,
    /// `find_index`: the term's global index
    Index(usize),
    /// `slice` / `to_list`: an ordered sequence of terms
    Sequence(Vec<Term>),
    /// `size`
    Size(usize),
    /// `debug`
    Debug(String),
    /// `append_bucket`: no value to report beyond success
    Ok,
}

/// `new(capacity, bucket_size)`: construct a container pre-populated with one empty bucket
pub fn new(config: Config) -> Handle {
    let handle = registry::new(config);
    tracing::debug!(handle = handle.id(), op = "new", "dispatched");
    handle
}

/// `empty(capacity, bucket_size)`: construct a bucket-less container for bulk loading
pub fn empty(config: Config) -> Handle {
    let handle = registry::empty(config);
    tracing::debug!(handle = handle.id(), op = "empty", "dispatched");
    handle
}

/// `append_bucket(h, terms)`: trusted bulk-append of pre-sorted, deduplicated terms
pub fn append_bucket(handle: &Handle, terms: Vec<RawTerm>) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "append_bucket", "dispatched");
    let admitted = terms.into_iter().map(admit).collect::<Result<Vec<_>, _>>()?;
    let guarded = handle.resolve()?;
    with_locked(&guarded, |set| set.append_bucket(admitted))??;
    Ok(OpOutcome::Ok)
}

/// `add(h, term)`: insert `term`, reporting its global index either way
pub fn add(handle: &Handle, term: RawTerm) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "add", "dispatched");
    let term = admit(term)?;
    let guarded = handle.resolve()?;
    let outcome = with_locked(&guarded, |set| set.add(term))?;
    Ok(match outcome {
        AddOutcome::Added(i) => OpOutcome::Added(i),
        AddOutcome::Duplicate(i) => OpOutcome::Duplicate(i),
    })
}

/// `remove(h, term)`: remove `term`, reporting its prior global index
pub fn remove(handle: &Handle, term: RawTerm) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "remove", "dispatched");
    let term = admit(term)?;
    let guarded = handle.resolve()?;
    let outcome = with_locked(&guarded, |set| set.remove(&term))?;
    Ok(match outcome {
        RemoveOutcome::Removed(i) => OpOutcome::Removed(i),
        RemoveOutcome::NotFound => OpOutcome::NotFound,
    })
}

/// `at(h, i)`: positional access; out-of-bounds is an ordinary result, not an error
pub fn at(handle: &Handle, i: usize) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "at", "dispatched");
    let guarded = handle.resolve()?;
    let found = with_locked(&guarded, |set| set.at(i).cloned())?;
    Ok(found.map_or(OpOutcome::OutOfBounds, OpOutcome::Element))
}

/// `slice(h, start, amount)`: up to `amount` consecutive terms from `start`
pub fn slice(handle: &Handle, start: usize, amount: usize) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "slice", "dispatched");
    let guarded = handle.resolve()?;
    let terms = with_locked(&guarded, |set| set.slice(start, amount))?;
    Ok(OpOutcome::Sequence(terms))
}

/// `find_index(h, term)`: locate `term` and map it to its global index
pub fn find_index(handle: &Handle, term: RawTerm) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "find_index", "dispatched");
    let term = admit(term)?;
    let guarded = handle.resolve()?;
    let outcome = with_locked(&guarded, |set| set.find_index(&term))?;
    Ok(match outcome {
        FindIndexOutcome::Found(i) => OpOutcome::Index(i),
        FindIndexOutcome::NotFound => OpOutcome::NotFound,
    })
}

/// `size(h)`: total number of terms
pub fn size(handle: &Handle) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "size", "dispatched");
    let guarded = handle.resolve()?;
    let size = with_locked(&guarded, |set| set.size())?;
    Ok(OpOutcome::Size(size))
}

/// `to_list(h)`: the full concatenation of buckets, in order
pub fn to_list(handle: &Handle) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "to_list", "dispatched");
    let guarded = handle.resolve()?;
    let terms = with_locked(&guarded, |set| set.to_list())?;
    Ok(OpOutcome::Sequence(terms))
}

/// `debug(h)`: structural rendering of the outer/inner layout
pub fn debug(handle: &Handle) -> Result<OpOutcome, Error> {
    tracing::debug!(handle = handle.id(), op = "debug", "dispatched");
    let guarded = handle.resolve()?;
    let rendering = with_locked(&guarded, |set| set.debug())?;
    Ok(OpOutcome::Debug(rendering))
}


#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::sync::Arc;

    fn int(n: i64) -> RawTerm {
        RawTerm::Integer(BigInt::from(n))
    }

    #[test]
    fn add_reports_added_then_duplicate() {
        let handle = new(Config::new(2, 2));
        assert_eq!(add(&handle, int(5)).unwrap(), OpOutcome::Added(0));
        assert_eq!(add(&handle, int(5)).unwrap(), OpOutcome::Duplicate(0));
    }

    #[test]
    fn add_rejects_unsupported_type() {
        let handle = new(Config::default());
        assert_eq!(add(&handle, RawTerm::Float(1.0)), Err(Error::UnsupportedType));
        assert_eq!(size(&handle).unwrap(), OpOutcome::Size(0));
    }

    #[test]
    fn at_out_of_bounds_is_a_result_not_an_error() {
        let handle = new(Config::default());
        assert_eq!(at(&handle, 0).unwrap(), OpOutcome::OutOfBounds);
    }

    #[test]
    fn bad_reference_after_handle_is_dropped() {
        let handle = new(Config::default());
        let id = handle.id();
        drop(handle);
        let stale = crate::registry::Handle::from_raw_id_for_test(id);
        assert_eq!(size(&stale), Err(Error::BadReference));
    }

    #[test]
    fn unknown_raw_term_container_type_is_rejected_deeply() {
        let handle = new(Config::default());
        let bad = RawTerm::Tuple(vec![int(1), RawTerm::Pid]);
        assert_eq!(add(&handle, bad), Err(Error::UnsupportedType));
        assert_eq!(to_list(&handle).unwrap(), OpOutcome::Sequence(vec![]));
    }

    #[test]
    fn cloning_a_handle_keeps_the_container_alive_for_concurrent_dispatch() {
        let handle = new(Config::default());
        let other = handle.clone();
        add(&handle, int(1)).unwrap();
        assert_eq!(size(&other).unwrap(), OpOutcome::Size(1));
        drop(other);
        assert_eq!(size(&handle).unwrap(), OpOutcome::Size(1));
        let _keep_alive: Arc<()> = Arc::new(());
    }
}
