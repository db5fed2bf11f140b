// SPDX-License-Identifier: GPL-3.0-only

//! Value sink capability
//!
//! The sink is the pipeline's only output boundary. It is called
//! synchronously from the consumer task, once per processed frame, and must
//! not block indefinitely; a UI sink is expected to marshal to its own
//! context without the pipeline waiting on that marshaling.

use tracing::info;

/// Receives the scalar computed for each processed frame
///
/// Errors inside the sink are the sink's concern; the pipeline neither sees
/// nor handles them.
pub trait ValueSink: Send + Sync {
    /// Called once per processed frame with its mean byte value
    fn report(&self, value: f64);
}

/// Sink that logs each value through `tracing`
///
/// Stand-in for the charting/statistics display the pipeline core excludes.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl ValueSink for LogSink {
    fn report(&self, value: f64) {
        info!(mean = format_args!("{:.2}", value), "frame processed");
    }
}
