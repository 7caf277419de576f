// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

//! The destination a [`WindowManager`](https://docs.rs/winlog_window)'s per-window snapshot is
//! emitted to.
//!
//! Whether the distilled source's stdout printing is part of the external contract, or merely a
//! development aid, is left ambiguous upstream (see `SPEC_FULL.md` §9). This crate resolves that
//! by making the destination a trait: [`StdoutSink`] is the production default, [`RecordingSink`]
//! is for tests that need to assert on exactly what was emitted.

use std::collections::HashMap;
use std::fmt::Write as _;

/// Receives exactly one emission per window boundary.
///
/// Implementations must not block indefinitely; the window manager calls this synchronously from
/// its single driver task and a slow sink delays the next tick.
pub trait Sink: Send + Sync {
    /// Emits one window's snapshot. `counts` is empty for an empty window.
    fn emit(&self, counts: &HashMap<String, i64>);
}

/// Renders a snapshot the same way the distilled source's stdout printer did: a header line, one
/// `"<key> - <count>"` line per entry, then a boundary marker; `"aggregation window is empty"` for
/// an empty snapshot.
#[must_use]
pub fn render(counts: &HashMap<String, i64>) -> String {
    if counts.is_empty() {
        return "aggregation window is empty".to_owned();
    }

    let mut out = String::from("aggregation window\n");
    for (key, count) in counts {
        let _ = writeln!(out, "{key} - {count}");
    }
    out.push_str("-----");
    out
}

/// The production default: writes [`render`]'s output to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn emit(&self, counts: &HashMap<String, i64>) {
        println!("{}", render(counts));
    }
}

/// A sink that records every emitted snapshot in memory, for tests that need to assert on window
/// boundaries without parsing stdout.
#[derive(Debug, Default)]
pub struct RecordingSink {
    emissions: parking_lot::Mutex<Vec<HashMap<String, i64>>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every snapshot emitted so far, in emission order.
    #[must_use]
    pub fn emissions(&self) -> Vec<HashMap<String, i64>> {
        self.emissions.lock().clone()
    }

    /// Number of emissions recorded so far.
    #[must_use]
    pub fn emission_count(&self) -> usize {
        self.emissions.lock().len()
    }
}

impl Sink for RecordingSink {
    fn emit(&self, counts: &HashMap<String, i64>) {
        self.emissions.lock().push(counts.clone());
    }
}
