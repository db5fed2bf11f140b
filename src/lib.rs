// SPDX-License-Identifier: GPL-3.0-only

//! framelux - a bounded, backpressured frame-analysis pipeline
//!
//! A producer delivers raw pixel buffers at a fixed rate; a consumer drains
//! them, computes each frame's mean brightness, and reports it to a sink.
//!
//! # Architecture
//!
//! - [`ingest`]: copies a transient raw-memory handle into an owned buffer
//! - [`queue`]: fixed-capacity FIFO with drop-oldest backpressure
//! - [`consumer`]: cooperative drain loop with start/stop lifecycle
//! - [`pipeline`]: the owning context wiring the pieces together
//! - [`sink`]: the capability boundary values are reported through
//!
//! Device capture, format conversion, and display are external collaborators;
//! they connect through [`FramePipeline::on_frame`] on one side and
//! [`ValueSink`] on the other.
//!
//! # Example
//!
//! ```no_run
//! use framelux::{FramePipeline, LogSink, PipelineConfig, RawFrameHandle};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let mut pipeline = FramePipeline::new(&PipelineConfig::default(), Arc::new(LogSink::new()));
//! pipeline.start().unwrap();
//!
//! let pixels = vec![128u8; 64 * 48];
//! pipeline.on_frame(RawFrameHandle::new(&pixels, 64, 48)).unwrap();
//!
//! pipeline.stop().await;
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod consumer;
pub mod errors;
pub mod frame;
pub mod ingest;
pub mod pipeline;
pub mod queue;
pub mod sink;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use consumer::{ConsumerState, FrameConsumer};
pub use errors::{ConsumerError, FrameError, IngestError, StopOutcome};
pub use frame::{OwnedFrameBuffer, RawFrameHandle};
pub use ingest::FrameIngestor;
pub use pipeline::FramePipeline;
pub use queue::BoundedFrameQueue;
pub use sink::{LogSink, ValueSink};
