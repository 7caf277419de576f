// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! Process configuration, parsed once at startup from CLI flags with environment-variable
//! fallback (`WINLOG_*`), per `SPEC_FULL.md` §6.
//!
//! [`Config::parse`] wraps [`clap`]'s derive parser; anything clap itself rejects (missing
//! required flags, unparseable values) becomes a [`ConfigError`], and so does anything clap
//! cannot express (zero shards, a zero-length window). The result is immutable and is meant to
//! be shared via `Arc` with every component that needs it once constructed.

use std::time::Duration;

use clap::Parser;

/// A configuration error: a missing required option or an unparseable or out-of-range value.
/// Fatal at startup (see `SPEC_FULL.md` §7).
#[ohno::error]
#[display("configuration error: {message}")]
pub struct ConfigError {
    /// Human-readable description of what was wrong with the configuration.
    pub message: String,
}

impl From<clap::Error> for ConfigError {
    fn from(err: clap::Error) -> Self {
        Self::caused_by(err.to_string(), err)
    }
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
    humantime::parse_duration(raw).map_err(|e| e.to_string())
}

/// Process configuration for the windowed ingestion service.
///
/// Every field has a CLI flag and a matching `WINLOG_*` environment variable fallback; CLI flags
/// take precedence when both are given. See `SPEC_FULL.md` §6 for the full option table.
#[derive(Parser, Debug, Clone)]
#[command(name = "winlog", version, about = "Streaming windowed dedup-and-aggregate log ingestion service")]
pub struct Config {
    /// Listen endpoint for the gRPC server.
    #[arg(long, env = "WINLOG_ADDR", default_value = ":4317")]
    pub addr: String,

    /// The attribute name to group records by.
    #[arg(long, env = "WINLOG_ATTRIBUTE_KEY")]
    pub attribute_key: String,

    /// Aggregation window length, e.g. `10s`, `500ms`, `1m`.
    #[arg(long, env = "WINLOG_AGGREGATION_WINDOW", default_value = "10s", value_parser = parse_duration)]
    pub aggregation_window: Duration,

    /// Maximum size, in bytes, of a single decoded gRPC message.
    #[arg(long, env = "WINLOG_MAX_RECEIVE_MESSAGE_SIZE", default_value_t = 4 * 1024 * 1024)]
    pub max_receive_message_size: usize,

    /// Number of shards in the deduplicator and the aggregator. Should be a power of two.
    #[arg(long, env = "WINLOG_SHARDS", default_value_t = 32)]
    pub shards: usize,

    /// Number of ingestor worker tasks. A configured value of `0` falls back to a default of 4.
    #[arg(long, env = "WINLOG_WORKERS", default_value_t = 4)]
    pub workers: usize,

    /// Capacity of the bounded ingestion queue.
    #[arg(long, env = "WINLOG_QUEUE_SIZE", default_value_t = 1000)]
    pub queue_size: usize,

    /// Whether to wire up the OpenTelemetry metrics pipeline. When `false`, a no-op meter
    /// provider is installed; instrument call sites remain unconditional either way.
    #[arg(long, env = "WINLOG_OTEL_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    pub otel_enabled: bool,
}

impl Config {
    /// Parses configuration from `std::env::args()`, falling back to `WINLOG_*` environment
    /// variables for any flag not given on the command line, then validates it.
    pub fn parse() -> Result<Self, ConfigError> {
        let config = <Self as Parser>::try_parse()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from an explicit argument list (primarily for tests).
    pub fn parse_from<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = <Self as Parser>::try_parse_from(args)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects combinations of otherwise well-formed values that clap cannot express as a single
    /// flag constraint: every count here must be strictly positive.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.shards == 0 {
            return Err(ConfigError::new("shards must be a positive integer".to_owned()));
        }
        if self.queue_size == 0 {
            return Err(ConfigError::new("queueSize must be a positive integer".to_owned()));
        }
        if self.aggregation_window.is_zero() {
            return Err(ConfigError::new("aggregationWindow must be greater than zero".to_owned()));
        }
        if self.max_receive_message_size == 0 {
            return Err(ConfigError::new("maxReceiveMessageSize must be a positive integer".to_owned()));
        }
        Ok(())
    }

    /// The effective worker count: `workers`, or 4 if configured as `0` (see
    /// `SPEC_FULL.md` §4.3).
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 { 4 } else { self.workers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Vec<String> {
        let mut v = vec!["winlog".to_owned()];
        v.extend(extra.iter().map(|s| (*s).to_owned()));
        v
    }

    #[test]
    fn defaults_apply_when_only_the_required_flag_is_given() {
        let config = Config::parse_from(args(&["--attribute-key", "service.name"])).unwrap();
        assert_eq!(config.addr, ":4317");
        assert_eq!(config.aggregation_window, Duration::from_secs(10));
        assert_eq!(config.max_receive_message_size, 4 * 1024 * 1024);
        assert_eq!(config.shards, 32);
        assert_eq!(config.workers, 4);
        assert_eq!(config.queue_size, 1000);
        assert!(config.otel_enabled);
    }

    #[test]
    fn missing_required_attribute_key_is_a_configuration_error() {
        let result = Config::parse_from(args(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = Config::parse_from(args(&[
            "--attribute-key",
            "service.name",
            "--shards",
            "64",
            "--workers",
            "8",
            "--queue-size",
            "5000",
            "--aggregation-window",
            "30s",
            "--otel-enabled",
            "false",
        ]))
        .unwrap();
        assert_eq!(config.shards, 64);
        assert_eq!(config.workers, 8);
        assert_eq!(config.queue_size, 5000);
        assert_eq!(config.aggregation_window, Duration::from_secs(30));
        assert!(!config.otel_enabled);
    }

    #[test]
    fn zero_shards_is_rejected() {
        let result = Config::parse_from(args(&["--attribute-key", "k", "--shards", "0"]));
        assert!(result.is_err());
    }

    #[test]
    fn zero_queue_size_is_rejected() {
        let result = Config::parse_from(args(&["--attribute-key", "k", "--queue-size", "0"]));
        assert!(result.is_err());
    }

    #[test]
    fn zero_workers_is_accepted_and_resolves_to_the_default_of_four() {
        let config = Config::parse_from(args(&["--attribute-key", "k", "--workers", "0"])).unwrap();
        assert_eq!(config.workers, 0);
        assert_eq!(config.effective_workers(), 4);
    }

    #[test]
    fn unparseable_duration_is_a_configuration_error() {
        let result = Config::parse_from(args(&["--attribute-key", "k", "--aggregation-window", "not-a-duration"]));
        assert!(result.is_err());
    }
}
