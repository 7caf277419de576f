// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! A bounded queue plus a fixed worker pool: the frontend boundary calls
//! [`Ingestor::try_enqueue`] and never suspends; workers drain the queue, consult the
//! deduplicator, and feed the aggregator.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyspawn::Spawner;
use parking_lot::Mutex as SyncMutex;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use winlog_aggregate::ShardedAggregator;
use winlog_dedup::ShardedDeduplicator;
use winlog_metrics::Metrics;
use winlog_record::Record;

/// Default worker count used when the configured value is `0` (see `SPEC_FULL.md` §8: "with
/// `workers=0` configured, the Ingestor applies its default of 4").
const DEFAULT_WORKERS: usize = 4;

/// Bounded queue plus fixed worker pool. Construction spawns exactly `workers` tasks (or
/// [`DEFAULT_WORKERS`] if `workers == 0`) that each loop: dequeue, consult the deduplicator,
/// increment the aggregator on a first sighting.
pub struct Ingestor {
    sender: SyncMutex<Option<mpsc::Sender<Record>>>,
    stopped: AtomicBool,
    workers: SyncMutex<Vec<anyspawn::JoinHandle<()>>>,
}

impl Ingestor {
    /// Creates a bounded queue of capacity `queue_size` and spawns the worker pool via `spawner`.
    #[must_use]
    pub fn new(
        queue_size: usize,
        workers: usize,
        aggregator: Arc<ShardedAggregator>,
        deduplicator: Arc<ShardedDeduplicator>,
        metrics: Arc<Metrics>,
        spawner: &Spawner,
    ) -> Arc<Self> {
        let worker_count = if workers == 0 { DEFAULT_WORKERS } else { workers };
        let (sender, receiver) = mpsc::channel(queue_size.max(1));
        let receiver = Arc::new(AsyncMutex::new(receiver));

        let ingestor = Arc::new(Self {
            sender: SyncMutex::new(Some(sender)),
            stopped: AtomicBool::new(false),
            workers: SyncMutex::new(Vec::with_capacity(worker_count)),
        });

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let receiver = Arc::clone(&receiver);
            let aggregator = Arc::clone(&aggregator);
            let deduplicator = Arc::clone(&deduplicator);
            let metrics = Arc::clone(&metrics);
            handles.push(spawner.spawn(worker_loop(receiver, aggregator, deduplicator, metrics)));
        }
        *ingestor.workers.lock() = handles;

        ingestor
    }

    /// Attempts to enqueue `record` without suspending. Returns `false` (and records a drop) if
    /// the ingestor has been stopped or the queue is full; returns `true` only when the record was
    /// actually queued.
    pub fn try_enqueue(&self, record: Record, metrics: &Metrics) -> bool {
        if self.stopped.load(Ordering::Acquire) {
            metrics.record_dropped();
            return false;
        }

        let sent = {
            let guard = self.sender.lock();
            match guard.as_ref() {
                Some(sender) => sender.try_send(record).is_ok(),
                None => false,
            }
        };

        if sent {
            metrics.record_enqueued();
        } else {
            metrics.record_dropped();
        }
        sent
    }

    /// Stops accepting new records, closes the queue, and waits for every worker to drain and
    /// exit. Idempotent: a second call observes `stopped` already set and returns immediately
    /// without touching the (already-taken) sender or re-joining workers.
    pub async fn stop(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            tracing::debug!("ingestor already stopped");
            return;
        }

        // Dropping the last sender closes the channel, which unblocks every worker's `recv`.
        drop(self.sender.lock().take());

        let handles = std::mem::take(&mut *self.workers.lock());
        for handle in handles {
            handle.await;
        }
    }
}

async fn worker_loop(
    receiver: Arc<AsyncMutex<mpsc::Receiver<Record>>>,
    aggregator: Arc<ShardedAggregator>,
    deduplicator: Arc<ShardedDeduplicator>,
    metrics: Arc<Metrics>,
) {
    loop {
        let record = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };
        let Some(record) = record else {
            break;
        };

        metrics.record_dedup_seen();
        metrics.record_ingest_processed();
        if deduplicator.is_new(&record) {
            aggregator.inc(&record.attr_value);
        } else {
            metrics.record_duplicate();
        }
    }
}
