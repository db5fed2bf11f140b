// SPDX-License-Identifier: GPL-3.0-only

//! Pipeline-wide constants

/// Queue sizing constants
pub mod queue {
    /// Default bounded queue capacity (frames)
    ///
    /// Small on purpose: under sustained overload the queue keeps only the
    /// newest frames, bounding end-to-end latency.
    pub const DEFAULT_CAPACITY: usize = 5;
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// How long the consumer waits before re-polling an empty queue
    pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

    /// Upper bound on how long `stop()` waits for the consumer task to exit
    pub const STOP_TIMEOUT: Duration = Duration::from_millis(1000);

    /// Frame counter modulo for periodic logging in the demo source
    pub const FRAME_LOG_INTERVAL: u64 = 30;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_timeout_covers_idle_poll() {
        // A cancellation request must be observable within one pop-or-wait
        // cycle, so the stop bound has to exceed the idle interval.
        assert!(timing::STOP_TIMEOUT > timing::IDLE_POLL_INTERVAL);
    }
}
