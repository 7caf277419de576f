// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! The OTLP `LogsService` gRPC frontend adapter.
//!
//! This crate owns everything between the wire and [`winlog_ingest::Ingestor::try_enqueue`]:
//! the generated protobuf/gRPC bindings ([`generated`]), attribute extraction and value
//! stringification ([`extractor`]), and the [`LogsServiceHandler`] that wires a decoded
//! `ExportLogsServiceRequest` into [`winlog_record::Record`] values.
//!
//! The service never fails an `Export` call because of local overload (see `SPEC_FULL.md`
//! §4.5): a dropped enqueue is counted in [`winlog_metrics::Metrics`] and otherwise invisible to
//! the caller.

pub mod extractor;
pub mod generated;

use std::sync::Arc;

use tonic::{Request, Response, Status};
use winlog_ingest::Ingestor;
use winlog_metrics::Metrics;
use winlog_record::Record;

use crate::extractor::{AttributeExtractor, body_to_string};
use crate::generated::opentelemetry::proto::collector::logs::v1::{
    ExportLogsServiceRequest, ExportLogsServiceResponse, logs_service_server::LogsService,
};

pub use crate::generated::opentelemetry::proto::collector::logs::v1::logs_service_server::LogsServiceServer;

/// Implements the OTLP `LogsService.Export` RPC by decoding each log record, resolving its
/// grouping attribute in *record → scope → resource* priority, and submitting a [`Record`] to
/// the shared [`Ingestor`].
#[derive(Debug)]
pub struct LogsServiceHandler {
    ingestor: Arc<Ingestor>,
    metrics: Arc<Metrics>,
    extractor: AttributeExtractor,
}

impl LogsServiceHandler {
    /// Builds a handler that extracts `attribute_key` and forwards records to `ingestor`.
    #[must_use]
    pub fn new(ingestor: Arc<Ingestor>, metrics: Arc<Metrics>, attribute_key: impl Into<String>) -> Self {
        Self {
            ingestor,
            metrics,
            extractor: AttributeExtractor::new(attribute_key),
        }
    }
}

#[tonic::async_trait]
impl LogsService for LogsServiceHandler {
    #[tracing::instrument(skip_all)]
    async fn export(
        &self,
        request: Request<ExportLogsServiceRequest>,
    ) -> Result<Response<ExportLogsServiceResponse>, Status> {
        let request = request.into_inner();

        for resource_logs in &request.resource_logs {
            let resource = resource_logs.resource.as_ref();
            for scope_logs in &resource_logs.scope_logs {
                let scope = scope_logs.scope.as_ref();
                for log_record in &scope_logs.log_records {
                    self.metrics.record_received();

                    let attr_value = self.extractor.extract(log_record, scope, resource);
                    let record = Record {
                        attr_value,
                        time_unix: log_record.time_unix_nano,
                        obs_unix: log_record.observed_time_unix_nano,
                        severity: i32::try_from(log_record.severity_number).unwrap_or(i32::MAX),
                        body: body_to_string(log_record.body.as_ref()),
                        trace_id: hex::encode(&log_record.trace_id),
                        span_id: hex::encode(&log_record.span_id),
                    };

                    if !self.ingestor.try_enqueue(record, &self.metrics) {
                        tracing::debug!("dropped log record: ingestor overloaded or stopping");
                    }
                }
            }
        }

        Ok(Response::new(ExportLogsServiceResponse::default()))
    }
}
