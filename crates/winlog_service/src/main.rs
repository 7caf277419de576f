// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Process entry point: loads [`winlog_config::Config`], wires the ingestion pipeline together,
//! serves the OTLP `LogsService` and gRPC health check over `tonic`, and drives the mandated
//! shutdown order on `Ctrl+C` (see `SPEC_FULL.md` §4.5 and §7).

use std::net::SocketAddr;
use std::sync::Arc;

use anyspawn::Spawner;
use ohno::app::{AppError, Result};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_stdout::MetricExporter;
use tick::Clock;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use winlog_aggregate::ShardedAggregator;
use winlog_config::Config;
use winlog_dedup::ShardedDeduplicator;
use winlog_ingest::Ingestor;
use winlog_metrics::Metrics;
use winlog_otlp::{LogsServiceHandler, LogsServiceServer};
use winlog_sink::StdoutSink;
use winlog_window::WindowManager;

/// Cannot acquire the configured listen endpoint. Fatal at startup (see `SPEC_FULL.md` §7:
/// "Transport bind error").
#[ohno::error]
#[display("transport bind error: {message}")]
struct TransportBindError {
    message: String,
}

impl From<std::net::AddrParseError> for TransportBindError {
    fn from(err: std::net::AddrParseError) -> Self {
        Self::caused_by(err.to_string(), err)
    }
}

/// The gRPC serve loop exited with an error, or telemetry SDK shutdown failed. Joined onto the
/// run result rather than silently swallowed (see `SPEC_FULL.md` §7: "Shutdown error").
#[ohno::error]
#[display("shutdown error: {message}")]
struct ShutdownError {
    message: String,
}

impl From<tonic::transport::Error> for ShutdownError {
    fn from(err: tonic::transport::Error) -> Self {
        Self::caused_by(err.to_string(), err)
    }
}

impl From<opentelemetry_sdk::error::OTelSdkError> for ShutdownError {
    fn from(err: opentelemetry_sdk::error::OTelSdkError) -> Self {
        Self::caused_by(err.to_string(), err)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse().map_err(AppError::new)?;

    let meter_provider = configure_telemetry(&config);
    let clock = Clock::new_tokio();
    let spawner = Spawner::new_tokio();

    let metrics = Arc::new(Metrics::new(&meter_provider));
    let aggregator = Arc::new(ShardedAggregator::new(config.shards));
    let deduplicator = Arc::new(ShardedDeduplicator::new(config.shards));

    let ingestor = Ingestor::new(
        config.queue_size,
        config.effective_workers(),
        Arc::clone(&aggregator),
        Arc::clone(&deduplicator),
        Arc::clone(&metrics),
        &spawner,
    );

    let window = WindowManager::start(
        clock,
        config.aggregation_window,
        Arc::clone(&aggregator),
        Arc::clone(&deduplicator),
        Arc::new(StdoutSink),
        Arc::clone(&metrics),
        &spawner,
    );

    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter.set_serving::<LogsServiceServer<LogsServiceHandler>>().await;

    // Binding and serving are scoped to their own fallible block so that a transport error (bind
    // failure or a serve-loop error) falls straight through to the mandated shutdown sequence
    // below instead of leaking the already-running ingestor and window manager tasks.
    let serve_result: Result<()> = async {
        let bind_addr = bindable_address(&config.addr);
        let addr: SocketAddr = bind_addr.parse().map_err(TransportBindError::from)?;

        let logs_service =
            LogsServiceHandler::new(Arc::clone(&ingestor), Arc::clone(&metrics), config.attribute_key.as_str());
        let logs_server =
            LogsServiceServer::new(logs_service).max_decoding_message_size(config.max_receive_message_size);

        tracing::info!(%addr, attribute_key = %config.attribute_key, "winlog listening");

        Server::builder()
            .add_service(health_service)
            .add_service(logs_server)
            .serve_with_shutdown(addr, shutdown_signal())
            .await
            .map_err(ShutdownError::from)?;

        Ok(())
    }
    .await;

    // Mandated shutdown order (SPEC_FULL.md §4.5), run unconditionally regardless of the serve
    // result above: stop accepting RPCs, drain the ingestor, then let the window manager perform
    // its final flush. Violating this order, or skipping it on a serve error, risks losing the
    // last window's contents.
    health_reporter.set_not_serving::<LogsServiceServer<LogsServiceHandler>>().await;
    ingestor.stop().await;
    window.stop().await;

    let telemetry_result: Result<()> = meter_provider.shutdown().map_err(ShutdownError::from).map_err(AppError::from);

    // Join the serve result and the telemetry shutdown result (SPEC_FULL.md §7: "such errors are
    // joined with any run error and surfaced as a process exit code") rather than letting either
    // one silently swallow the other.
    serve_result?;
    telemetry_result?;
    Ok(())
}

/// Expands a Go-style `:PORT` address (as used by the distilled original and by
/// [`winlog_config::Config::addr`]'s default) into a bindable `host:port` pair.
fn bindable_address(addr: &str) -> std::borrow::Cow<'_, str> {
    if let Some(port) = addr.strip_prefix(':') {
        std::borrow::Cow::Owned(format!("0.0.0.0:{port}"))
    } else {
        std::borrow::Cow::Borrowed(addr)
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received, draining");
}

fn configure_telemetry(config: &Config) -> SdkMeterProvider {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut builder = SdkMeterProvider::builder();
    if config.otel_enabled {
        builder = builder.with_periodic_exporter(MetricExporter::default());
    }
    builder.build()
}
