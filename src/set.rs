// SPDX-License-Identifier: MIT
//! The bucketed ordered-set container
//!
//! A [SortedSet] is an outer ordered sequence of [Bucket]s, each individually
//! ordered and duplicate-free, together bounding the cost of both mutation
//! (shifting is limited to a single bucket) and outer growth (which only
//! relocates bucket descriptors, never term contents).

use std::fmt;

use crate::bucket::{Bucket, InsertResult, RemoveResult};
use crate::config::Config;
use crate::error::Error;
use crate::locator::{self, Location};
use crate::term::Term;


/// Outcome of [SortedSet::add]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The term was absent and has been added at this global index
    Added(usize),
    /// The term was already present at this global index
    Duplicate(usize),
}

/// Outcome of [SortedSet::remove]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The term was present and has been removed from this global index
    Removed(usize),
    /// The term was not present
    NotFound,
}

/// Outcome of [SortedSet::find_index]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindIndexOutcome {
    /// The term is present at this global index
    Found(usize),
    /// The term is not present
    NotFound,
}

/// An ordered, duplicate-free collection of [Term]s with positional access
///
/// See the crate-level invariants: global order, per-bucket length bound,
/// non-empty buckets at steady state, a cached `size`, and the routing
/// property between neighboring buckets.
#[derive(Debug)]
pub struct SortedSet {
    pub(crate) buckets: Vec<Bucket>,
    pub(crate) size: usize,
    bucket_capacity: usize,
}

impl SortedSet {
    /// Construct an empty set with one pre-populated empty bucket
    ///
    /// Preallocates outer storage for `config.initial_capacity()` bucket
    /// slots. A single empty bucket is pushed up front so `add` always has
    /// somewhere to insert into without a first-insert special case;
    /// [SortedSet::empty] skips this since bulk loading builds its own
    /// buckets from scratch.
    pub fn new(config: Config) -> Self {
        let mut buckets = Vec::with_capacity(config.initial_capacity());
        buckets.push(Bucket::new());
        Self { buckets, size: 0, bucket_capacity: config.bucket_size() }
    }

    /// Construct an empty set with no buckets, for bulk loading
    ///
    /// Intended to be followed by zero or more [SortedSet::append_bucket]
    /// calls during a trusted construction phase.
    pub fn empty(config: Config) -> Self {
        Self {
            buckets: Vec::with_capacity(config.initial_capacity()),
            size: 0,
            bucket_capacity: config.bucket_size(),
        }
    }

    /// The configured maximum bucket length
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Total number of terms in the set
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of bucket lengths strictly before `bucket_idx`
    fn prefix_len(&self, bucket_idx: usize) -> usize {
        self.buckets[..bucket_idx].iter().map(Bucket::len).sum()
    }

    /// Add `term` to the set
    ///
    /// Splits the target bucket at its midpoint once it grows past
    /// `bucket_capacity`, keeping every bucket within the configured bound.
    pub fn add(&mut self, term: Term) -> AddOutcome {
        if self.buckets.is_empty() {
            self.buckets.push(Bucket::new());
        }

        let location = locator::locate(&self.buckets, &term);
        let bucket_idx = location.bucket_idx();

        if let Location::Found { offset, .. } = location {
            return AddOutcome::Duplicate(self.prefix_len(bucket_idx) + offset);
        }

        let offset = match self.buckets[bucket_idx].insert(term) {
            InsertResult::Inserted(offset) => offset,
            InsertResult::Duplicate(offset) => {
                // Can only happen if `term`'s ordering is inconsistent with
                // a prior `locate` call; not reachable under correct `Ord`.
                return AddOutcome::Duplicate(self.prefix_len(bucket_idx) + offset);
            }
        };
        self.size += 1;

        if self.buckets[bucket_idx].len() > self.bucket_capacity {
            let overflowing = std::mem::replace(&mut self.buckets[bucket_idx], Bucket::new());
            let (left, right) = overflowing.split_at_midpoint();
            let left_len = left.len();
            self.buckets[bucket_idx] = left;
            self.buckets.insert(bucket_idx + 1, right);

            let (final_idx, final_offset) = if offset < left_len {
                (bucket_idx, offset)
            } else {
                (bucket_idx + 1, offset - left_len)
            };
            AddOutcome::Added(self.prefix_len(final_idx) + final_offset)
        } else {
            AddOutcome::Added(self.prefix_len(bucket_idx) + offset)
        }
    }

    /// Remove `term` from the set
    pub fn remove(&mut self, term: &Term) -> RemoveOutcome {
        if self.buckets.is_empty() {
            return RemoveOutcome::NotFound;
        }

        let bucket_idx = locator::locate(&self.buckets, term).bucket_idx();
        let offset = match self.buckets[bucket_idx].remove(term) {
            RemoveResult::Removed(offset) => offset,
            RemoveResult::NotFound => return RemoveOutcome::NotFound,
        };

        let global_index = self.prefix_len(bucket_idx) + offset;
        self.size -= 1;

        // No merge on underflow: an empty bucket is dropped outright unless
        // it is the sole bucket, in which case it is the canonical
        // empty-set representation and stays.
        if self.buckets[bucket_idx].is_empty() && self.buckets.len() > 1 {
            self.buckets.remove(bucket_idx);
        }

        RemoveOutcome::Removed(global_index)
    }

    /// The term at global index `i`, if within bounds
    pub fn at(&self, i: usize) -> Option<&Term> {
        if i >= self.size {
            return None;
        }
        let mut remaining = i;
        for bucket in &self.buckets {
            if remaining < bucket.len() {
                return bucket.at(remaining);
            }
            remaining -= bucket.len();
        }
        None
    }

    /// Up to `amount` consecutive terms starting at global index `start`
    ///
    /// Returns an empty sequence if `start >= size()`. Only visits the
    /// buckets the requested range actually overlaps.
    pub fn slice(&self, start: usize, amount: usize) -> Vec<Term> {
        if start >= self.size || amount == 0 {
            return Vec::new();
        }

        let take = amount.min(self.size - start);
        let mut result = Vec::with_capacity(take);
        let mut skip = start;
        let mut remaining = take;

        for bucket in &self.buckets {
            if remaining == 0 {
                break;
            }
            let len = bucket.len();
            if skip >= len {
                skip -= len;
                continue;
            }
            let available = len - skip;
            let take_here = available.min(remaining);
            result.extend((skip..skip + take_here).map(|offset| bucket.at(offset).expect("offset in bounds").clone()));
            remaining -= take_here;
            skip = 0;
        }

        result
    }

    /// Locate `term` and map it to its global index
    pub fn find_index(&self, term: &Term) -> FindIndexOutcome {
        match locator::locate(&self.buckets, term) {
            Location::Found { bucket_idx, offset } => FindIndexOutcome::Found(self.prefix_len(bucket_idx) + offset),
            Location::NotFound { .. } => FindIndexOutcome::NotFound,
        }
    }

    /// The full concatenation of buckets, in order
    pub fn to_list(&self) -> Vec<Term> {
        self.buckets.iter().flat_map(Bucket::iter).cloned().collect()
    }

    /// Trusted fast-path append used when bulk-loading pre-sorted, deduplicated input
    ///
    /// # Preconditions (caller-enforced, not validated here)
    ///
    /// `terms` must be sorted, duplicate-free, fully admitted, and strictly
    /// greater than the last term currently in the set. Violating these
    /// corrupts the set's invariants.
    ///
    /// # Errors
    ///
    /// Returns [Error::MaxBucketSizeExceeded] if `terms.len() >=
    /// bucket_capacity()`: a batch that fills or overflows a single bucket
    /// on its own cannot be appended as one bucket without violating the
    /// length bound.
    pub fn append_bucket(&mut self, terms: Vec<Term>) -> Result<(), Error> {
        if terms.len() >= self.bucket_capacity {
            return Err(Error::MaxBucketSizeExceeded);
        }

        let added = terms.len();
        if self.size == 0 {
            if let Some(first) = self.buckets.first_mut() {
                *first = Bucket::from_sorted_unique(terms);
            } else {
                self.buckets.push(Bucket::from_sorted_unique(terms));
            }
        } else {
            self.buckets.push(Bucket::from_sorted_unique(terms));
        }
        self.size += added;
        Ok(())
    }

    /// Structural rendering of the outer/inner layout, for introspection only
    ///
    /// No stability guarantee is made for this format across versions.
    pub fn debug(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for SortedSet {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "SortedSet {{ size: {}, buckets: [", self.size)?;
        for (n, bucket) in self.buckets.iter().enumerate() {
            if n > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{bucket}")?;
        }
        write!(fmt, "] }}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn int(n: i64) -> Term {
        Term::Integer(BigInt::from(n))
    }

    fn small_config() -> Config {
        Config::new(2, 2)
    }

    /// Walk every bucket, asserting global order, the per-bucket length
    /// bound, the cached size, and the no-stray-empty-buckets rule
    fn assert_invariants(set: &SortedSet) {
        assert_eq!(set.size, set.buckets.iter().map(Bucket::len).sum::<usize>());

        let mut empty_buckets = 0;
        for bucket in &set.buckets {
            assert!(bucket.len() <= set.bucket_capacity());
            if bucket.is_empty() {
                empty_buckets += 1;
            }
        }
        if set.size == 0 {
            assert!(empty_buckets <= 1);
        } else {
            assert_eq!(empty_buckets, 0);
        }

        let flat = set.to_list();
        for pair in flat.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn new_starts_with_one_empty_bucket() {
        let set = SortedSet::new(small_config());
        assert_eq!(set.buckets.len(), 1);
        assert_eq!(set.size(), 0);
    }

    #[test]
    fn empty_starts_with_no_buckets() {
        let set = SortedSet::empty(small_config());
        assert_eq!(set.buckets.len(), 0);
        assert_eq!(set.size(), 0);
    }

    #[test]
    fn basic_insert_and_order() {
        let mut set = SortedSet::new(small_config());
        set.add(int(1));
        set.add(int(3));
        set.add(int(2));
        assert_eq!(set.to_list(), vec![int(1), int(2), int(3)]);
        assert_eq!(set.size(), 3);
        assert_eq!(set.find_index(&int(2)), FindIndexOutcome::Found(1));
        assert_invariants(&set);
    }

    #[test]
    fn duplicate_handling() {
        let mut set = SortedSet::new(small_config());
        assert_eq!(set.add(int(5)), AddOutcome::Added(0));
        assert_eq!(set.add(int(5)), AddOutcome::Duplicate(0));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn splitting_keeps_global_indices_correct() {
        let mut set = SortedSet::new(small_config()); // bucket_size = 2
        for n in [1, 2, 3, 4, 5] {
            set.add(int(n));
            assert_invariants(&set);
        }
        assert_eq!(set.to_list(), vec![1, 2, 3, 4, 5].into_iter().map(int).collect::<Vec<_>>());
        assert!(set.buckets.len() > 1);
    }

    #[test]
    fn removal_with_index_from_bulk_loaded_set() {
        let mut set = SortedSet::empty(Config::new(5, 5));
        set.append_bucket(vec![int(2), int(4)]).unwrap();
        set.append_bucket(vec![int(6), int(8)]).unwrap();
        set.append_bucket(vec![int(10), int(12)]).unwrap();
        set.append_bucket(vec![int(14), int(16), int(18)]).unwrap();

        assert_eq!(set.remove(&int(10)), RemoveOutcome::Removed(4));
        assert_eq!(
            set.to_list(),
            vec![2, 4, 6, 8, 12, 14, 16, 18].into_iter().map(int).collect::<Vec<_>>()
        );
        assert_eq!(set.size(), 8);
        assert_invariants(&set);
    }

    #[test]
    fn slice_across_buckets() {
        let mut set = SortedSet::empty(Config::new(5, 5));
        set.append_bucket(vec![int(2), int(4)]).unwrap();
        set.append_bucket(vec![int(6), int(8)]).unwrap();
        set.append_bucket(vec![int(10), int(12)]).unwrap();
        set.append_bucket(vec![int(14), int(16), int(18)]).unwrap();

        assert_eq!(set.slice(1, 4), vec![4, 6, 8, 10].into_iter().map(int).collect::<Vec<_>>());
        assert_eq!(
            set.slice(3, 10),
            vec![8, 10, 12, 14, 16, 18].into_iter().map(int).collect::<Vec<_>>()
        );
        assert_eq!(set.slice(15, 15), Vec::<Term>::new());
    }

    #[test]
    fn removing_the_only_element_leaves_the_canonical_empty_bucket() {
        let mut set = SortedSet::new(small_config());
        set.add(int(1));
        assert_eq!(set.remove(&int(1)), RemoveOutcome::Removed(0));
        assert_eq!(set.size(), 0);
        assert_eq!(set.buckets.len(), 1);
        assert!(set.buckets[0].is_empty());
    }

    #[test]
    fn append_bucket_rejects_batches_at_or_above_capacity() {
        let mut set = SortedSet::empty(Config::new(2, 2));
        assert_eq!(
            set.append_bucket(vec![int(1), int(2)]),
            Err(Error::MaxBucketSizeExceeded)
        );
    }

    #[test]
    fn append_bucket_merges_into_the_single_empty_bucket() {
        let mut set = SortedSet::new(Config::new(5, 5));
        set.append_bucket(vec![int(1), int(2)]).unwrap();
        assert_eq!(set.buckets.len(), 1);
        assert_eq!(set.size(), 2);
    }

    #[test]
    fn at_out_of_bounds_is_none() {
        let mut set = SortedSet::new(small_config());
        set.add(int(1));
        assert_eq!(set.at(0), Some(&int(1)));
        assert_eq!(set.at(1), None);
    }
}
