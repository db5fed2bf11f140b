// SPDX-License-Identifier: GPL-3.0-only

//! Pipeline lifecycle coordination
//!
//! [`FramePipeline`] is the single owning context: it wires ingest results
//! into the queue and owns the consumer. The producer side is the
//! synchronous [`on_frame`](FramePipeline::on_frame) notification; the
//! consumer side is a tokio task managed through `start`/`stop`.

use std::sync::Arc;
use tracing::info;

use crate::config::PipelineConfig;
use crate::consumer::{ConsumerState, FrameConsumer};
use crate::errors::{ConsumerError, IngestError, StopOutcome};
use crate::frame::RawFrameHandle;
use crate::ingest::FrameIngestor;
use crate::queue::BoundedFrameQueue;
use crate::sink::ValueSink;

/// Owns the ingestor, the queue, and the consumer
pub struct FramePipeline {
    ingestor: FrameIngestor,
    queue: Arc<BoundedFrameQueue>,
    consumer: FrameConsumer,
}

impl FramePipeline {
    /// Build a pipeline reporting to `sink` with the given tuning
    pub fn new(config: &PipelineConfig, sink: Arc<dyn ValueSink>) -> Self {
        let queue = Arc::new(BoundedFrameQueue::new(config.queue_capacity));
        let consumer = FrameConsumer::new(
            Arc::clone(&queue),
            sink,
            config.idle_poll(),
            config.stop_timeout(),
        );

        info!(
            capacity = config.queue_capacity,
            idle_poll_ms = config.idle_poll_ms,
            "frame pipeline created"
        );

        Self {
            ingestor: FrameIngestor::new(),
            queue,
            consumer,
        }
    }

    /// Start the consumer task; valid once, from the initial state
    pub fn start(&mut self) -> Result<(), ConsumerError> {
        self.consumer.start()
    }

    /// Producer notification: copy the frame out and enqueue it
    ///
    /// Completes the copy before returning and never stores the handle, so
    /// the producer is free to reuse its memory immediately afterwards.
    /// Never suspends; an allocation failure drops this frame only and is
    /// returned to the caller.
    pub fn on_frame(&self, handle: RawFrameHandle<'_>) -> Result<(), IngestError> {
        let buffer = self.ingestor.ingest(handle)?;
        self.queue.push(buffer);
        Ok(())
    }

    /// Cancel the consumer and release the queue
    ///
    /// Frames still queued are dropped, not processed. Safe to call before
    /// any frame was ever pushed, and idempotent afterwards.
    pub async fn stop(&mut self) -> StopOutcome {
        let outcome = self.consumer.stop().await;
        // Release whatever the consumer left behind.
        while self.queue.try_pop().is_some() {}
        outcome
    }

    /// Current consumer lifecycle state
    pub fn consumer_state(&self) -> ConsumerState {
        self.consumer.state()
    }

    /// Number of frames currently queued
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Frames evicted by backpressure since the pipeline was created
    pub fn dropped_frames(&self) -> u64 {
        self.queue.dropped_frames()
    }
}

impl std::fmt::Debug for FramePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePipeline")
            .field("state", &self.consumer_state())
            .field("queue", &self.queue)
            .finish()
    }
}
