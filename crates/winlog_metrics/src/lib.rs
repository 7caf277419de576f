// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! The OpenTelemetry instruments this service publishes, gathered behind one [`Metrics`] handle
//! so call sites never construct instruments themselves.
//!
//! Every instrument is created unconditionally at startup; when the process configures
//! `otelEnabled=false`, a no-op [`opentelemetry::metrics::MeterProvider`] is installed instead of
//! skipping these call sites (see `SPEC_FULL.md` §6). This keeps the hot path free of branching on
//! whether telemetry is enabled.

use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter, MeterProvider};
use opentelemetry::InstrumentationScope;

const METER_NAME: &str = "winlog";
const VERSION: &str = env!("CARGO_PKG_VERSION");
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.31.0";

/// Handle to every instrument this service records against. Cheap to clone; intended to be built
/// once at startup and shared (typically via `Arc`) with the frontend adapter, the ingestor, and
/// the window manager.
#[derive(Debug, Clone)]
pub struct Metrics {
    logs_received: Counter<u64>,
    logs_enqueued: Counter<u64>,
    ingest_total: Counter<u64>,
    ingest_dropped: Counter<u64>,
    deduplication_seen: Counter<u64>,
    deduplication_duplicates: Counter<u64>,
    window_flushes: Counter<u64>,
    window_flush_duration: Histogram<f64>,
    count_keys: Gauge<u64>,
}

impl Metrics {
    /// Builds every instrument from the given provider's meter.
    #[must_use]
    pub fn new(meter_provider: &dyn MeterProvider) -> Self {
        let meter = create_meter(meter_provider);
        Self {
            logs_received: meter
                .u64_counter("logs.received")
                .with_description("Log records received by the frontend adapter")
                .with_unit("{log}")
                .build(),
            logs_enqueued: meter
                .u64_counter("logs.enqueued")
                .with_description("Log records successfully enqueued to the ingestor")
                .with_unit("{log}")
                .build(),
            ingest_total: meter
                .u64_counter("ingest.total")
                .with_description("Records dequeued and processed by a worker")
                .with_unit("{record}")
                .build(),
            ingest_dropped: meter
                .u64_counter("ingest.dropped")
                .with_description("Records rejected by tryEnqueue due to stopping or a full queue")
                .with_unit("{record}")
                .build(),
            deduplication_seen: meter
                .u64_counter("deduplication.seen")
                .with_description("Records evaluated by the deduplicator")
                .with_unit("{record}")
                .build(),
            deduplication_duplicates: meter
                .u64_counter("deduplication.total")
                .with_description("Records found to be duplicates within the current window")
                .with_unit("{record}")
                .build(),
            window_flushes: meter
                .u64_counter("window.flushes")
                .with_description("Aggregation window flushes performed")
                .with_unit("{flush}")
                .build(),
            window_flush_duration: meter
                .f64_histogram("window.flush.duration")
                .with_description("Time taken to flush the aggregator for one window")
                .with_unit("ms")
                .build(),
            count_keys: meter
                .u64_gauge("count.keys")
                .with_description("Distinct grouping keys present in the most recent flush")
                .with_unit("{key}")
                .build(),
        }
    }

    /// Records one log record received by the frontend adapter, prior to enqueue.
    pub fn record_received(&self) {
        self.logs_received.add(1, &[]);
    }

    /// Records one record successfully enqueued to the ingestor.
    pub fn record_enqueued(&self) {
        self.logs_enqueued.add(1, &[]);
    }

    /// Records one record fully processed by a worker (whether or not it was a duplicate).
    pub fn record_ingest_processed(&self) {
        self.ingest_total.add(1, &[]);
    }

    /// Records one record dropped by `tryEnqueue`.
    pub fn record_dropped(&self) {
        self.ingest_dropped.add(1, &[]);
    }

    /// Records one record evaluated by the deduplicator.
    pub fn record_dedup_seen(&self) {
        self.deduplication_seen.add(1, &[]);
    }

    /// Records one record found to be a duplicate.
    pub fn record_duplicate(&self) {
        self.deduplication_duplicates.add(1, &[]);
    }

    /// Records one completed window flush: its wall-clock duration and the number of distinct
    /// keys in the resulting snapshot.
    pub fn record_window_flush(&self, duration_ms: f64, key_count: u64) {
        self.window_flushes.add(1, &[]);
        self.window_flush_duration.record(duration_ms, &[]);
        self.count_keys.record(key_count, &[]);
    }
}

fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    meter_provider.meter_with_scope(
        InstrumentationScope::builder(METER_NAME)
            .with_version(VERSION)
            .with_schema_url(SCHEMA_URL)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use opentelemetry_sdk::metrics::InMemoryMetricExporter;
    use opentelemetry_sdk::metrics::PeriodicReader;

    use super::*;

    fn test_provider() -> (SdkMeterProvider, InMemoryMetricExporter) {
        let exporter = InMemoryMetricExporter::default();
        let reader = PeriodicReader::builder(exporter.clone()).build();
        let provider = SdkMeterProvider::builder().with_reader(reader).build();
        (provider, exporter)
    }

    #[test]
    fn every_instrument_can_be_recorded_without_panicking() {
        let (provider, _exporter) = test_provider();
        let metrics = Metrics::new(&provider);

        metrics.record_received();
        metrics.record_enqueued();
        metrics.record_ingest_processed();
        metrics.record_dropped();
        metrics.record_dedup_seen();
        metrics.record_duplicate();
        metrics.record_window_flush(12.5, 3);
    }
}
