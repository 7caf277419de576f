// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! The [`Record`] value object and the fingerprinting hash used to establish its identity.
//!
//! A `Record` is immutable and its identity is the byte-equality of all seven fields taken
//! together. [`Record::fingerprint`] folds that tuple into a 64-bit FNV-1a hash for use as a
//! deduplication set key; a distinct, plain FNV-1 hash ([`fnv1_64`]) is used elsewhere (by the
//! aggregator) to pick a shard for a grouping key, and the two must not be confused.

mod hash;

pub use hash::{fnv1_64, fnv1a_64};

/// One decoded telemetry log record, reduced to the fields used for identity and grouping.
///
/// Two records are the same record iff every field is byte-equal; see [`Record::fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// The grouping key extracted from the record (e.g. the configured attribute's value).
    pub attr_value: String,
    /// Event timestamp, nanoseconds since the Unix epoch.
    pub time_unix: u64,
    /// Observed timestamp, nanoseconds since the Unix epoch.
    pub obs_unix: u64,
    /// Severity number, as defined by the source telemetry schema.
    pub severity: i32,
    /// Canonicalized textual body.
    pub body: String,
    /// Opaque trace identifier; may be empty.
    pub trace_id: String,
    /// Opaque span identifier; may be empty.
    pub span_id: String,
}

impl Record {
    /// Computes the 64-bit FNV-1a fingerprint of this record's full identity tuple.
    ///
    /// Fields are concatenated in declaration order (`attr_value`, `time_unix`, `obs_unix`,
    /// `severity`, `body`, `trace_id`, `span_id`), each preceded by a single `0x00` separator
    /// byte, with integer fields serialized as fixed-width little-endian. This layout is part
    /// of the wire contract between the deduplicator and its callers and must not change without
    /// versioning: the same record must fingerprint identically on every host.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut buf = Vec::with_capacity(
            self.attr_value.len() + self.body.len() + self.trace_id.len() + self.span_id.len() + 7 + 8 + 8 + 4,
        );
        write_string(&mut buf, &self.attr_value);
        write_u64(&mut buf, self.time_unix);
        write_u64(&mut buf, self.obs_unix);
        write_i32(&mut buf, self.severity);
        write_string(&mut buf, &self.body);
        write_string(&mut buf, &self.trace_id);
        write_string(&mut buf, &self.span_id);
        fnv1a_64(&buf)
    }
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(0);
    buf.extend_from_slice(s.as_bytes());
}

fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.push(0);
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.push(0);
    buf.extend_from_slice(&value.to_le_bytes());
}
