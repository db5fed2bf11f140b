// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the frame pipeline

use std::fmt;

/// Errors raised while converting a raw frame handle into an owned buffer
///
/// An ingest error is fatal only to that single frame: the queue is left
/// untouched and the producer keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Memory for the frame copy could not be allocated
    AllocationFailed {
        /// Number of bytes that were requested
        bytes: usize,
    },
    /// The handle's byte length does not match its declared dimensions
    DimensionMismatch {
        /// Expected length (`width * height`)
        expected: usize,
        /// Actual length of the referenced memory
        actual: usize,
    },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {} bytes for frame copy", bytes)
            }
            IngestError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "frame length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Recoverable anomalies encountered while processing a dequeued frame
///
/// These are contained inside the consumer loop: the frame is skipped and the
/// loop continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The buffer holds no pixels, so no mean can be computed
    EmptyBuffer,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::EmptyBuffer => write!(f, "frame buffer is empty"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Errors from consumer lifecycle operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerError {
    /// `start()` was called while the consumer was not idle
    AlreadyStarted,
}

impl fmt::Display for ConsumerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerError::AlreadyStarted => {
                write!(f, "consumer has already been started")
            }
        }
    }
}

impl std::error::Error for ConsumerError {}

/// How a `stop()` call completed
///
/// A timeout is surfaced as a value rather than an error: resources are
/// released either way and the pipeline is stopped either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The consumer loop exited within the stop timeout
    Clean,
    /// The stop timeout elapsed and the consumer task was aborted
    TimedOut,
    /// The consumer was never started or was already stopped
    NotRunning,
}

impl StopOutcome {
    /// True unless the stop had to abort the consumer task
    pub fn is_clean(&self) -> bool {
        !matches!(self, StopOutcome::TimedOut)
    }
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopOutcome::Clean => write!(f, "stopped cleanly"),
            StopOutcome::TimedOut => write!(f, "stop timed out, task aborted"),
            StopOutcome::NotRunning => write!(f, "consumer was not running"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_display() {
        let err = IngestError::AllocationFailed { bytes: 1024 };
        assert!(err.to_string().contains("1024"));

        let err = IngestError::DimensionMismatch {
            expected: 100,
            actual: 99,
        };
        let msg = err.to_string();
        assert!(msg.contains("100") && msg.contains("99"));
    }

    #[test]
    fn test_stop_outcome_cleanliness() {
        assert!(StopOutcome::Clean.is_clean());
        assert!(StopOutcome::NotRunning.is_clean());
        assert!(!StopOutcome::TimedOut.is_clean());
    }
}
