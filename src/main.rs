// SPDX-License-Identifier: GPL-3.0-only

//! Demo binary: a synthetic frame source wired to the pipeline
//!
//! Stands in for the camera capture loop the library treats as an external
//! collaborator. Generates single-channel frames into one reused scratch
//! buffer at a fixed rate and reports each frame's mean brightness through
//! the logging sink.

use clap::Parser;
use framelux::{FramePipeline, LogSink, PipelineConfig, RawFrameHandle};
use framelux::constants::timing;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "framelux")]
#[command(about = "Bounded frame-analysis pipeline demo")]
#[command(version)]
struct Cli {
    /// Frame width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Source frame rate
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Queue capacity (frames)
    #[arg(long, default_value = "5")]
    capacity: usize,

    /// Run for this many seconds, then stop (default: until Ctrl-C)
    #[arg(long)]
    duration: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=framelux=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let config = PipelineConfig {
        queue_capacity: cli.capacity,
        ..PipelineConfig::default()
    };
    let mut pipeline = FramePipeline::new(&config, Arc::new(LogSink::new()));
    pipeline.start()?;

    info!(
        width = cli.width,
        height = cli.height,
        fps = cli.fps,
        "synthetic frame source running, Ctrl-C to stop"
    );

    let frame_len = cli.width as usize * cli.height as usize;
    // One scratch buffer reused for every frame, like a real capture loop
    // reusing its mapped buffer. The pipeline copies before returning, so
    // this reuse is safe.
    let mut scratch = vec![0u8; frame_len];
    let mut ticker = tokio::time::interval(Duration::from_secs(1) / cli.fps.max(1));
    let deadline = cli
        .duration
        .map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frame_number: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A slow brightness sweep so the reported means visibly move.
                let level = (frame_number % 256) as u8;
                scratch.fill(level);

                let handle = RawFrameHandle::new(&scratch, cli.width, cli.height);
                if let Err(e) = pipeline.on_frame(handle) {
                    warn!(error = %e, "frame not ingested");
                }

                frame_number += 1;
                if frame_number % timing::FRAME_LOG_INTERVAL == 0 {
                    info!(
                        frames = frame_number,
                        queued = pipeline.queue_len(),
                        dropped = pipeline.dropped_frames(),
                        "source progress"
                    );
                }

                if let Some(deadline) = deadline {
                    if tokio::time::Instant::now() >= deadline {
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupt received");
                break;
            }
        }
    }

    let outcome = pipeline.stop().await;
    info!(
        %outcome,
        frames = frame_number,
        dropped = pipeline.dropped_frames(),
        "pipeline stopped"
    );

    Ok(())
}
