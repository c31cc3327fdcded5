// SPDX-License-Identifier: MIT
//! Types representing individual buckets and related utilities

use std::fmt;

use crate::term::Term;


/// Outcome of [Bucket::find]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindResult {
    /// The term is present at this offset
    Found(usize),
    /// The term is absent; this is where it would be inserted
    NotFound(usize),
}

/// Outcome of [Bucket::insert]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The term was not present and has been inserted at this offset
    Inserted(usize),
    /// The term was already present at this offset; the bucket is unchanged
    Duplicate(usize),
}

/// Outcome of [Bucket::remove]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResult {
    /// The term was present and has been removed from this offset
    Removed(usize),
    /// The term was not present; the bucket is unchanged
    NotFound,
}

/// An ordered, duplicate-free, length-bounded sequence of [Term]s
///
/// A `Bucket` is the inner level of a [crate::set::SortedSet]'s two-level
/// layout: [crate::set::SortedSet] routes an operation to the owning bucket
/// (via [crate::locator]), and the bucket performs the actual search,
/// insertion or removal with an in-place binary search plus shift.
///
/// # Invariants
///
/// - Strictly increasing under [Term]'s order; no duplicates.
/// - `len() <= capacity`, where `capacity` is the container's configured
///   `bucket_capacity`. A `Bucket` does not enforce this bound itself;
///   [crate::set::SortedSet] is responsible for splitting a bucket before it
///   would exceed the bound; see [Bucket::split_at_midpoint].
#[derive(Debug, Default)]
pub struct Bucket(Vec<Term>);

impl Bucket {
    /// Create an empty bucket
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a bucket with preallocated storage for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Construct a bucket directly from a sequence already known to be
    /// sorted and duplicate-free
    ///
    /// Used by [crate::set::SortedSet::append_bucket]'s trusted fast path.
    /// Does not validate the precondition; misuse corrupts the bucket's
    /// invariants.
    pub(crate) fn from_sorted_unique(items: Vec<Term>) -> Self {
        Self(items)
    }

    /// Binary search for `term`
    ///
    /// # Time complexity
    ///
    /// `O(log n)` with `n` the bucket's length.
    pub fn find(&self, term: &Term) -> FindResult {
        match self.0.binary_search(term) {
            Ok(offset) => FindResult::Found(offset),
            Err(offset) => FindResult::NotFound(offset),
        }
    }

    /// Insert `term`, preserving order
    ///
    /// If `term` is already present, the bucket is left unchanged and
    /// [InsertResult::Duplicate] is returned with its existing offset.
    /// Otherwise `term` is inserted at its sorted position and
    /// [InsertResult::Inserted] is returned with the new offset.
    ///
    /// # Time complexity
    ///
    /// `O(log n)` search plus `O(n)` shift for the insertion itself.
    pub fn insert(&mut self, term: Term) -> InsertResult {
        match self.find(&term) {
            FindResult::Found(offset) => InsertResult::Duplicate(offset),
            FindResult::NotFound(offset) => {
                self.0.insert(offset, term);
                InsertResult::Inserted(offset)
            }
        }
    }

    /// Remove `term`, preserving order of the remaining items
    ///
    /// # Time complexity
    ///
    /// `O(log n)` search plus `O(n)` shift for the removal itself.
    pub fn remove(&mut self, term: &Term) -> RemoveResult {
        match self.find(term) {
            FindResult::Found(offset) => {
                self.0.remove(offset);
                RemoveResult::Removed(offset)
            }
            FindResult::NotFound(_) => RemoveResult::NotFound,
        }
    }

    /// The smallest term in the bucket, if any
    pub fn first(&self) -> Option<&Term> {
        self.0.first()
    }

    /// The largest term in the bucket, if any
    pub fn last(&self) -> Option<&Term> {
        self.0.last()
    }

    /// Number of terms currently held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bucket holds no terms
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The term at `offset`, if within bounds
    pub fn at(&self, offset: usize) -> Option<&Term> {
        self.0.get(offset)
    }

    /// Iterate over the bucket's terms in order
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.0.iter()
    }

    /// Split this bucket in half, preserving order across both halves
    ///
    /// The left half keeps the lower `len() / 2` terms (rounded down); the
    /// right half gets the rest. Used by [crate::set::SortedSet::add] when a
    /// bucket would otherwise exceed `bucket_capacity`.
    pub fn split_at_midpoint(mut self) -> (Bucket, Bucket) {
        let mid = self.0.len() / 2;
        let right = self.0.split_off(mid);
        (self, Bucket(right))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "[")?;
        for (n, term) in self.0.iter().enumerate() {
            if n > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{term}")?;
        }
        write!(fmt, "]")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn int(n: i64) -> Term {
        Term::Integer(BigInt::from(n))
    }

    fn bucket(items: &[i64]) -> Bucket {
        Bucket::from_sorted_unique(items.iter().copied().map(int).collect())
    }

    #[test]
    fn insert_into_empty_bucket() {
        let mut b = Bucket::new();
        assert_eq!(b.insert(int(5)), InsertResult::Inserted(0));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn insert_preserves_order() {
        let mut b = Bucket::new();
        b.insert(int(3));
        b.insert(int(1));
        assert_eq!(b.insert(int(2)), InsertResult::Inserted(1));
        assert_eq!(b.iter().cloned().collect::<Vec<_>>(), vec![int(1), int(2), int(3)]);
    }

    #[test]
    fn insert_duplicate_is_a_no_op() {
        let mut b = bucket(&[1, 2, 3]);
        assert_eq!(b.insert(int(2)), InsertResult::Duplicate(1));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn remove_present_and_absent() {
        let mut b = bucket(&[1, 2, 3]);
        assert_eq!(b.remove(&int(2)), RemoveResult::Removed(1));
        assert_eq!(b.iter().cloned().collect::<Vec<_>>(), vec![int(1), int(3)]);
        assert_eq!(b.remove(&int(2)), RemoveResult::NotFound);
    }

    #[test]
    fn split_at_midpoint_is_order_preserving() {
        let b = bucket(&[1, 2, 3, 4, 5]);
        let (left, right) = b.split_at_midpoint();
        assert_eq!(left.iter().cloned().collect::<Vec<_>>(), vec![int(1), int(2)]);
        assert_eq!(right.iter().cloned().collect::<Vec<_>>(), vec![int(3), int(4), int(5)]);
    }

    #[test]
    fn split_empty_bucket() {
        let (left, right) = Bucket::new().split_at_midpoint();
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn at_and_first_last() {
        let b = bucket(&[10, 20, 30]);
        assert_eq!(b.first(), Some(&int(10)));
        assert_eq!(b.last(), Some(&int(30)));
        assert_eq!(b.at(1), Some(&int(20)));
        assert_eq!(b.at(99), None);
    }
}
