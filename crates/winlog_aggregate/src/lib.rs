// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! A mapping from grouping key to count, partitioned into independent, cache-line-aligned
//! shards. The shard owning key `k` is always `fnv1_64(k) mod shard_count` — a hash variant
//! distinct from the deduplicator's FNV-1a fingerprint, see [`winlog_record::fnv1_64`].

use std::collections::HashMap;

use parking_lot::Mutex;
use winlog_record::fnv1_64;

const CACHE_LINE_SIZE: usize = 64;

#[repr(align(64))]
struct Shard {
    data: Mutex<HashMap<String, i64>>,
}

impl Shard {
    fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }

    fn inc(&self, key: &str) {
        let mut data = self.data.lock();
        *data.entry(key.to_owned()).or_insert(0) += 1;
    }

    fn take(&self) -> HashMap<String, i64> {
        std::mem::take(&mut *self.data.lock())
    }
}

/// Per-key counters for the current aggregation window, sharded for write-heavy concurrent
/// access. `inc` is a non-blocking, linearizable-per-shard increment; `flush` hands back a merged
/// snapshot of every shard and atomically starts each shard fresh.
///
/// `flush` is deliberately **not** atomic across shards (see `SPEC_FULL.md` §4.2): a window
/// boundary is approximate at sub-millisecond resolution, and the snapshot is "whatever had
/// committed to each shard by the time it was visited," not a single consistent point in time
/// across the whole aggregator.
pub struct ShardedAggregator {
    shards: Box<[Shard]>,
}

impl ShardedAggregator {
    /// Creates an aggregator with `shard_count` independent shards, clamped to at least 1.
    #[must_use]
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shards = (0..shard_count).map(|_| Shard::new()).collect();
        Self { shards }
    }

    /// Increments the counter for `key` by one, creating it at zero if absent.
    pub fn inc(&self, key: &str) {
        let hash = fnv1_64(key.as_bytes());
        let shard = &self.shards[(hash as usize) % self.shards.len()];
        shard.inc(key);
    }

    /// Merges every shard's counters into a single mapping and resets each shard to empty.
    ///
    /// Keys that happen to appear in more than one shard's outgoing data (not possible for a
    /// single key under a stable hash, but defensively supported in case of a shard-count change
    /// between windows) are summed.
    #[must_use]
    pub fn flush(&self) -> HashMap<String, i64> {
        let mut result = HashMap::new();
        for shard in &self.shards {
            for (key, count) in shard.take() {
                *result.entry(key).or_insert(0) += count;
            }
        }
        result
    }

    /// Number of shards this aggregator was constructed with.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
