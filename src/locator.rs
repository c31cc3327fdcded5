// SPDX-License-Identifier: MIT
//! Mapping a term to its `(bucket, offset)` coordinates
//!
//! The locator is deliberately a linear scan over the outer sequence of
//! buckets, not a binary search, because (a) the outer length is small
//! relative to the total term count given a bucket size on the order of a
//! few hundred, and (b) append-near-end / delete-near-beginning workloads,
//! the common case this crate targets, short-circuit a linear scan well. A
//! binary-search variant over the outer sequence is an admissible
//! alternative implementation as long as it preserves the observable
//! contract documented here; this crate does not provide one.

use crate::bucket::Bucket;
use crate::term::Term;


/// Outcome of locating a term within a [crate::set::SortedSet]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The term is present at `bucket_idx`, offset `offset`
    Found { bucket_idx: usize, offset: usize },
    /// The term is absent; it would be inserted at `bucket_idx`, offset `offset`
    NotFound { bucket_idx: usize, offset: usize },
}

impl Location {
    /// The owning bucket index, regardless of found/not-found status
    pub fn bucket_idx(&self) -> usize {
        match self {
            Location::Found { bucket_idx, .. } | Location::NotFound { bucket_idx, .. } => *bucket_idx,
        }
    }

    /// The offset within the owning bucket, regardless of found/not-found status
    pub fn offset(&self) -> usize {
        match self {
            Location::Found { offset, .. } | Location::NotFound { offset, .. } => *offset,
        }
    }
}

/// Locate `term` among `buckets`
///
/// # Algorithm
///
/// 1. Outer scan, left to right, for the first bucket `b` such that
///    `term <= last(b)`. That is the owning bucket. If no such bucket
///    exists, the owner is the last bucket (insertion goes at its end).
/// 2. If `buckets` is empty, the answer is `NotFound { bucket_idx: 0, offset: 0 }`.
/// 3. Inner binary search within the owning bucket via [Bucket::find].
///
/// # Time complexity
///
/// `O(B + log C)` where `B` is the bucket count and `C` is the bucket
/// capacity; with `C` on the order of a few hundred this is sublinear in
/// the total term count for realistic set sizes.
pub fn locate(buckets: &[Bucket], term: &Term) -> Location {
    if buckets.is_empty() {
        return Location::NotFound { bucket_idx: 0, offset: 0 };
    }

    let bucket_idx = buckets
        .iter()
        .position(|b| b.last().map(|last| term <= last).unwrap_or(true))
        .unwrap_or(buckets.len() - 1);

    match buckets[bucket_idx].find(term) {
        crate::bucket::FindResult::Found(offset) => Location::Found { bucket_idx, offset },
        crate::bucket::FindResult::NotFound(offset) => Location::NotFound { bucket_idx, offset },
    }
}
