// SPDX-License-Identifier: GPL-3.0-only

//! Consumer task lifecycle management
//!
//! The consumer drains the frame queue on a cooperatively scheduled tokio
//! task. It owns each buffer exclusively between pop and report, suspends
//! only when the queue is empty, and checks its cancellation signal once per
//! iteration, so a stop request is observed within one pop-or-wait cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::errors::{ConsumerError, StopOutcome};
use crate::queue::BoundedFrameQueue;
use crate::sink::ValueSink;

/// Lifecycle state of the consumer
///
/// Transitions: `Idle → Running → Stopping → Stopped`. `Stopped` is terminal;
/// a consumer is not restartable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    /// Created but not yet started
    Idle,
    /// Loop task is draining the queue
    Running,
    /// Stop requested, waiting for the loop to exit
    Stopping,
    /// Loop has exited (terminal)
    Stopped,
}

/// Drains the queue, computes each frame's mean, reports it to the sink
pub struct FrameConsumer {
    queue: Arc<BoundedFrameQueue>,
    sink: Arc<dyn ValueSink>,
    idle_poll: Duration,
    stop_timeout: Duration,
    stop_signal: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
    state: ConsumerState,
}

impl FrameConsumer {
    /// Create an idle consumer over the given queue and sink
    pub fn new(
        queue: Arc<BoundedFrameQueue>,
        sink: Arc<dyn ValueSink>,
        idle_poll: Duration,
        stop_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            sink,
            idle_poll,
            stop_timeout,
            stop_signal: Arc::new(AtomicBool::new(false)),
            task: None,
            state: ConsumerState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConsumerState {
        self.state
    }

    /// Spawn the consumer loop; valid only from `Idle`
    pub fn start(&mut self) -> Result<(), ConsumerError> {
        if self.state != ConsumerState::Idle {
            return Err(ConsumerError::AlreadyStarted);
        }

        let queue = Arc::clone(&self.queue);
        let sink = Arc::clone(&self.sink);
        let stop_signal = Arc::clone(&self.stop_signal);
        let idle_poll = self.idle_poll;

        info!("starting frame consumer");
        self.task = Some(tokio::spawn(Self::run(queue, sink, stop_signal, idle_poll)));
        self.state = ConsumerState::Running;
        Ok(())
    }

    /// Signal cancellation and wait for the loop to exit, bounded by the
    /// stop timeout
    ///
    /// Idempotent: once the consumer is stopped, further calls return
    /// [`StopOutcome::NotRunning`] with no side effects. If the timeout
    /// elapses the task is aborted and resources are released anyway; the
    /// condition is reported in the return value, never raised.
    pub async fn stop(&mut self) -> StopOutcome {
        match self.state {
            ConsumerState::Idle => {
                self.state = ConsumerState::Stopped;
                return StopOutcome::NotRunning;
            }
            ConsumerState::Stopped => return StopOutcome::NotRunning,
            ConsumerState::Running | ConsumerState::Stopping => {}
        }

        self.state = ConsumerState::Stopping;
        self.stop_signal.store(true, Ordering::SeqCst);
        // Wake the loop if it is parked on an empty queue.
        self.queue.wake();

        let outcome = match self.task.take() {
            Some(task) => {
                let abort = task.abort_handle();
                match timeout(self.stop_timeout, task).await {
                    Ok(Ok(())) => {
                        debug!("consumer loop exited cleanly");
                        StopOutcome::Clean
                    }
                    Ok(Err(e)) => {
                        // The loop is gone either way; the stop still
                        // completed, but a panic must not pass silently.
                        warn!(error = %e, "consumer task ended abnormally");
                        StopOutcome::Clean
                    }
                    Err(_) => {
                        warn!(
                            timeout_ms = self.stop_timeout.as_millis() as u64,
                            "consumer did not stop within timeout, aborting task"
                        );
                        abort.abort();
                        StopOutcome::TimedOut
                    }
                }
            }
            None => StopOutcome::NotRunning,
        };

        self.state = ConsumerState::Stopped;
        info!(?outcome, "frame consumer stopped");
        outcome
    }

    async fn run(
        queue: Arc<BoundedFrameQueue>,
        sink: Arc<dyn ValueSink>,
        stop_signal: Arc<AtomicBool>,
        idle_poll: Duration,
    ) {
        debug!("consumer loop started");

        loop {
            if stop_signal.load(Ordering::SeqCst) {
                debug!("stop signal received");
                break;
            }

            match queue.try_pop() {
                Some(frame) => match frame.mean() {
                    Ok(value) => sink.report(value),
                    // A malformed frame is skipped, not fatal; the loop
                    // continues with the next one.
                    Err(e) => warn!(error = %e, "skipping malformed frame"),
                },
                None => {
                    // Bounded wait: woken early by a push (or by stop), and
                    // falls through after the idle interval regardless.
                    let _ = timeout(idle_poll, queue.notified()).await;
                }
            }
        }

        debug!("consumer loop exiting");
    }
}

impl std::fmt::Debug for FrameConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameConsumer")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .finish()
    }
}
