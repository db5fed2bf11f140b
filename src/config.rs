// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{queue, timing};

/// Pipeline tuning parameters
///
/// All timing fields are plain milliseconds so the config serializes without
/// custom machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of frames held in the queue
    pub queue_capacity: usize,
    /// Consumer wait between polls of an empty queue (milliseconds)
    pub idle_poll_ms: u64,
    /// Upper bound on how long `stop()` waits for the consumer (milliseconds)
    pub stop_timeout_ms: u64,
}

impl PipelineConfig {
    /// Idle poll interval as a `Duration`
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }

    /// Stop timeout as a `Duration`
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: queue::DEFAULT_CAPACITY,
            idle_poll_ms: timing::IDLE_POLL_INTERVAL.as_millis() as u64,
            stop_timeout_ms: timing::STOP_TIMEOUT.as_millis() as u64,
        }
    }
}
