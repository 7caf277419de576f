// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! A set of record fingerprints seen during the current aggregation window, partitioned into
//! independent, cache-line-aligned shards so concurrent workers contend on at most `1/N` of the
//! state.
//!
//! The shard owning fingerprint `f` is always `f mod shard_count`; this is the same invariant the
//! aggregator uses for its own (distinct) hash. See [`winlog_record::Record::fingerprint`] for how
//! fingerprints are computed.

use std::collections::HashSet;

use parking_lot::Mutex;
use winlog_record::Record;

/// Default initial capacity hint for a shard's fingerprint set, chosen so a single shard can
/// absorb a busy window without repeated reallocation.
const DEFAULT_SHARD_CAPACITY: usize = 4096;

/// Cache line size assumed for alignment padding, matching common x86-64/ARM64 deployment targets.
const CACHE_LINE_SIZE: usize = 64;

/// One independent partition of the deduplication set, aligned to a cache line so that adjacent
/// shards' locks do not false-share.
#[repr(align(64))]
struct Shard {
    seen: Mutex<HashSet<u64>>,
    capacity_hint: usize,
}

impl Shard {
    fn new(capacity_hint: usize) -> Self {
        Self {
            seen: Mutex::new(HashSet::with_capacity(capacity_hint)),
            capacity_hint,
        }
    }

    fn is_new(&self, fingerprint: u64) -> bool {
        self.seen.lock().insert(fingerprint)
    }

    fn reset(&self) {
        *self.seen.lock() = HashSet::with_capacity(self.capacity_hint);
    }
}

/// A set of record fingerprints, sharded for write-heavy concurrent access.
///
/// Created once at startup and shared (typically via `Arc`) between the ingestor's workers and
/// the window manager; [`ShardedDeduplicator::reset`] is called once per window boundary, always
/// after the aggregator has been flushed (see `winlog_window`).
pub struct ShardedDeduplicator {
    shards: Box<[Shard]>,
}

impl ShardedDeduplicator {
    /// Creates a deduplicator with `shard_count` independent shards. `shard_count` is clamped to
    /// at least 1 (a degenerate single-shard deduplicator is a valid, if contended, configuration).
    #[must_use]
    pub fn new(shard_count: usize) -> Self {
        Self::with_capacity(shard_count, DEFAULT_SHARD_CAPACITY)
    }

    /// As [`Self::new`], but with an explicit initial capacity hint preserved across resets.
    #[must_use]
    pub fn with_capacity(shard_count: usize, capacity_hint: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shards = (0..shard_count).map(|_| Shard::new(capacity_hint)).collect();
        Self { shards }
    }

    /// Returns `true` iff this is the first time `record`'s fingerprint has been seen since the
    /// deduplicator was created or last reset.
    #[must_use]
    pub fn is_new(&self, record: &Record) -> bool {
        let fingerprint = record.fingerprint();
        let shard = &self.shards[(fingerprint as usize) % self.shards.len()];
        shard.is_new(fingerprint)
    }

    /// Clears every shard, preserving each shard's capacity hint. Called once per window boundary.
    pub fn reset(&self) {
        for shard in &self.shards {
            shard.reset();
        }
    }

    /// Number of shards this deduplicator was constructed with.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use winlog_record::Record;

    use super::*;

    fn record(attr_value: &str, time_unix: u64) -> Record {
        Record {
            attr_value: attr_value.to_owned(),
            time_unix,
            obs_unix: 0,
            severity: 0,
            body: String::new(),
            trace_id: String::new(),
            span_id: String::new(),
        }
    }

    #[test]
    fn first_call_is_new_second_is_not() {
        let dedup = ShardedDeduplicator::new(4);
        let r = record("bar", 1);
        assert!(dedup.is_new(&r));
        assert!(!dedup.is_new(&r));
    }

    #[test]
    fn reset_allows_the_same_record_to_be_new_again() {
        let dedup = ShardedDeduplicator::new(4);
        let r = record("bar", 1);
        assert!(dedup.is_new(&r));
        dedup.reset();
        assert!(dedup.is_new(&r));
    }

    #[test]
    fn reset_is_idempotent() {
        let dedup = ShardedDeduplicator::new(4);
        dedup.reset();
        dedup.reset();
        assert!(dedup.is_new(&record("bar", 1)));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(32)]
    fn degenerate_and_typical_shard_counts_all_work(#[case] shard_count: usize) {
        let dedup = ShardedDeduplicator::new(shard_count);
        assert_eq!(dedup.shard_count(), shard_count.max(1));
        let r = record("bar", 1);
        assert!(dedup.is_new(&r));
        assert!(!dedup.is_new(&r));
    }

    #[test]
    fn distinct_records_are_each_new() {
        let dedup = ShardedDeduplicator::new(8);
        for i in 0..100u64 {
            assert!(dedup.is_new(&record("bar", i)));
        }
    }

    #[test]
    fn shard_is_cache_line_aligned() {
        assert!(std::mem::align_of::<Shard>() >= CACHE_LINE_SIZE);
    }

    #[test]
    fn concurrent_is_new_calls_are_linearizable_per_shard() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dedup = Arc::new(ShardedDeduplicator::new(4));
        let accepted = Arc::new(AtomicUsize::new(0));
        let r = record("bar", 42);

        std::thread::scope(|scope| {
            for _ in 0..16 {
                let dedup = Arc::clone(&dedup);
                let accepted = Arc::clone(&accepted);
                let r = r.clone();
                scope.spawn(move || {
                    if dedup.is_new(&r) {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }
}
