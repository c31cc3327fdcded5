// SPDX-License-Identifier: MIT
//! Construction-time tunables for a [crate::set::SortedSet]
//!
//! Mirrors the shape of [`IndexConfig`]-style configuration elsewhere in
//! this crate's lineage: a small, validated, immutable-after-construction
//! struct rather than free-floating constructor arguments.

/// Default maximum length of any inner bucket
pub const DEFAULT_BUCKET_SIZE: usize = 500;

/// Minimum allowed bucket size
pub const MIN_BUCKET_SIZE: usize = 2;

/// Construction-time configuration for a [crate::set::SortedSet]
///
/// Both fields are fixed at construction and immutable thereafter; there is
/// no API to change them on a live container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Preallocated number of bucket slots in the outer sequence
    ///
    /// This is *not* a bound on the total number of terms; it only sizes the
    /// initial allocation of the outer `Vec<Bucket>`.
    initial_capacity: usize,
    /// Maximum length of any inner bucket
    bucket_size: usize,
}

impl Config {
    /// Construct a validated `Config`
    ///
    /// `capacity` must be at least 1 and `bucket_size` must be at least
    /// [MIN_BUCKET_SIZE]; both are clamped up to their minimum rather than
    /// rejected, since a bad constant here is a caller bug, not a runtime
    /// condition the error taxonomy needs to model.
    pub fn new(capacity: usize, bucket_size: usize) -> Self {
        Self {
            initial_capacity: capacity.max(1),
            bucket_size: bucket_size.max(MIN_BUCKET_SIZE),
        }
    }

    /// The preallocated outer capacity
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// The configured bucket size (maximum bucket length)
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }
}

impl Default for Config {
    /// `initial_capacity` equal to `bucket_size`, `bucket_size` at its default of 500
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_SIZE, DEFAULT_BUCKET_SIZE)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_documented_defaults() {
        let c = Config::default();
        assert_eq!(c.bucket_size(), 500);
        assert_eq!(c.initial_capacity(), 500);
    }

    #[test]
    fn bucket_size_is_clamped_to_the_minimum() {
        let c = Config::new(10, 0);
        assert_eq!(c.bucket_size(), MIN_BUCKET_SIZE);
    }

    #[test]
    fn capacity_is_clamped_to_at_least_one() {
        let c = Config::new(0, 10);
        assert_eq!(c.initial_capacity(), 1);
    }
}
