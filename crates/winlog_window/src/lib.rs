// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! The tumbling-window driver: a single task that, on a fixed period, flushes the aggregator,
//! emits the snapshot to a [`Sink`], and only then resets the deduplicator.
//!
//! The flush-before-reset order is load-bearing (see `SPEC_FULL.md` §4.4): resetting first would
//! let a record counted in the window that just ended be counted again as "new" in the next one.

use std::sync::Arc;
use std::time::Duration;

use anyspawn::Spawner;
use futures_util::StreamExt;
use parking_lot::Mutex as SyncMutex;
use tick::{Clock, PeriodicTimer, Stopwatch};
use tokio::sync::oneshot;
use winlog_aggregate::ShardedAggregator;
use winlog_dedup::ShardedDeduplicator;
use winlog_metrics::Metrics;
use winlog_sink::Sink;

/// Drives tumbling windows of a fixed duration. Owns no state of its own beyond the driver
/// task's lifecycle handle: the aggregator and deduplicator it flushes/resets are shared with the
/// ingestor via `Arc`.
pub struct WindowManager {
    stop: SyncMutex<Option<oneshot::Sender<()>>>,
    handle: SyncMutex<Option<anyspawn::JoinHandle<()>>>,
}

impl WindowManager {
    /// Starts the driver task: every `period`, per the [`Clock`] given, it flushes `aggregator`,
    /// emits the snapshot to `sink`, records `metrics`, and resets `deduplicator`.
    #[must_use]
    pub fn start(
        clock: Clock,
        period: Duration,
        aggregator: Arc<ShardedAggregator>,
        deduplicator: Arc<ShardedDeduplicator>,
        sink: Arc<dyn Sink>,
        metrics: Arc<Metrics>,
        spawner: &Spawner,
    ) -> Arc<Self> {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawner.spawn(run(clock, period, aggregator, deduplicator, sink, metrics, stop_rx));

        Arc::new(Self {
            stop: SyncMutex::new(Some(stop_tx)),
            handle: SyncMutex::new(Some(handle)),
        })
    }

    /// Signals the driver to perform its final flush and exit, then waits for that flush to
    /// complete. A second call, after the first has already signaled, is a safe no-op.
    pub async fn stop(&self) {
        let signaled = self.stop.lock().take();
        let Some(stop_tx) = signaled else {
            tracing::debug!("window manager already stopped");
            return;
        };

        // The receiver side may already be gone if the driver task panicked; that is a defect
        // elsewhere, not something `stop` should itself fail on.
        let _: Result<(), ()> = stop_tx.send(()).map_err(|()| ());

        if let Some(handle) = self.handle.lock().take() {
            handle.await;
        }
    }
}

async fn run(
    clock: Clock,
    period: Duration,
    aggregator: Arc<ShardedAggregator>,
    deduplicator: Arc<ShardedDeduplicator>,
    sink: Arc<dyn Sink>,
    metrics: Arc<Metrics>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let timer = PeriodicTimer::new(&clock, period);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            tick = timer.next() => {
                if tick.is_none() {
                    break;
                }
                flush_once(&clock, &aggregator, &deduplicator, &sink, &metrics);
            }
            _ = &mut stop_rx => {
                flush_once(&clock, &aggregator, &deduplicator, &sink, &metrics);
                break;
            }
        }
    }
}

fn flush_once(
    clock: &Clock,
    aggregator: &ShardedAggregator,
    deduplicator: &ShardedDeduplicator,
    sink: &Arc<dyn Sink>,
    metrics: &Metrics,
) {
    let stopwatch = Stopwatch::new(clock);
    let snapshot = aggregator.flush();
    let elapsed_ms = stopwatch.elapsed().as_secs_f64() * 1000.0;
    metrics.record_window_flush(elapsed_ms, snapshot.len() as u64);

    sink.emit(&snapshot);

    // Must happen after the flush (and its emission) above: see module docs.
    deduplicator.reset();
}
