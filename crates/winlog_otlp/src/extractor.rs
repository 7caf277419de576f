// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pluggable attribute extraction: `(log record, scope, resource) -> String`.

use crate::generated::opentelemetry::proto::common::v1::{AnyValue, KeyValue, any_value};
use crate::generated::opentelemetry::proto::common::v1::InstrumentationScope;
use crate::generated::opentelemetry::proto::logs::v1::LogRecord;
use crate::generated::opentelemetry::proto::resource::v1::Resource;

const UNKNOWN: &str = "unknown";

/// Extracts a grouping key from a decoded log record, falling back through
/// scope and resource attributes, per record-attributes -> scope-attributes ->
/// resource-attributes -> `"unknown"`.
#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    attribute_key: String,
}

impl AttributeExtractor {
    /// Creates an extractor that looks up `attribute_key`.
    #[must_use]
    pub fn new(attribute_key: impl Into<String>) -> Self {
        Self {
            attribute_key: attribute_key.into(),
        }
    }

    /// Resolves the grouping key for one log record, in priority order.
    #[must_use]
    pub fn extract(&self, record: &LogRecord, scope: Option<&InstrumentationScope>, resource: Option<&Resource>) -> String {
        if let Some(value) = find_in_attributes(&record.attributes, &self.attribute_key) {
            return value;
        }
        if let Some(scope) = scope
            && let Some(value) = find_in_attributes(&scope.attributes, &self.attribute_key)
        {
            return value;
        }
        if let Some(resource) = resource
            && let Some(value) = find_in_attributes(&resource.attributes, &self.attribute_key)
        {
            return value;
        }
        UNKNOWN.to_owned()
    }
}

fn find_in_attributes(attributes: &[KeyValue], key: &str) -> Option<String> {
    attributes
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.as_ref())
        .map(value_as_string)
        .filter(|value| !value.is_empty())
}

/// Stringifies an `AnyValue` the same way for attribute values and log bodies
/// (see `SPEC_FULL.md` §4.5): scalars render directly, anything structured
/// (array, kvlist) or absent falls back to `"unknown"`.
#[must_use]
pub fn value_as_string(value: &AnyValue) -> String {
    match &value.value {
        Some(any_value::Value::StringValue(s)) if s.is_empty() => UNKNOWN.to_owned(),
        Some(any_value::Value::StringValue(s)) => s.clone(),
        Some(any_value::Value::IntValue(i)) => i.to_string(),
        Some(any_value::Value::DoubleValue(d)) => format!("{d}"),
        Some(any_value::Value::BoolValue(b)) => b.to_string(),
        Some(any_value::Value::BytesValue(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
        Some(any_value::Value::ArrayValue(_) | any_value::Value::KvlistValue(_)) | None => UNKNOWN.to_owned(),
    }
}

/// Canonicalizes a log record's body to a plain string, per the same rule as
/// attribute stringification. Absent bodies canonicalize to an empty string,
/// matching the "body may be opaque" framing in the data model.
#[must_use]
pub fn body_to_string(body: Option<&AnyValue>) -> String {
    body.map(value_as_string).unwrap_or_default()
}
