// SPDX-License-Identifier: GPL-3.0-only

//! Bounded frame queue with drop-oldest backpressure
//!
//! Single producer, single consumer. All access goes through `push` and
//! `try_pop`; the internal deque is never exposed, so no caller can observe
//! or mutate its layout while the other side is mid-operation.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Notify;
use tracing::debug;

use crate::frame::OwnedFrameBuffer;

/// Fixed-capacity FIFO of owned frame buffers
///
/// Overflow policy: when full, the oldest entry is evicted to admit the new
/// one. The inserter is never blocked and the new frame is never rejected, so
/// under sustained overload the queue holds the newest frames and end-to-end
/// latency stays bounded. Evictions are silent backpressure, not faults; they
/// are counted for observability.
pub struct BoundedFrameQueue {
    inner: Mutex<VecDeque<OwnedFrameBuffer>>,
    capacity: usize,
    dropped: AtomicU64,
    /// Wakes the consumer when a frame arrives, so it does not have to ride
    /// out its full idle interval.
    notify: Notify,
}

impl BoundedFrameQueue {
    /// Create a queue holding at most `capacity` frames
    ///
    /// A zero capacity would make every push a self-eviction; clamp to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
            capacity: capacity.max(1),
            dropped: AtomicU64::new(0),
            notify: Notify::new(),
        }
    }

    /// Insert a frame, evicting the FIFO head first if the queue is full
    ///
    /// Never blocks beyond the short internal critical section and never
    /// suspends; safe to call from the producer's synchronous notification.
    pub fn push(&self, buffer: OwnedFrameBuffer) {
        {
            let mut queue = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if queue.len() == self.capacity {
                queue.pop_front();
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(dropped_total = total, "queue full, evicted oldest frame");
            }
            queue.push_back(buffer);
        }
        self.notify.notify_one();
    }

    /// Remove and return the oldest frame, or `None` without blocking
    pub fn try_pop(&self) -> Option<OwnedFrameBuffer> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    /// Current number of queued frames
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of frames the queue will hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total frames evicted by the overflow policy since creation
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Wait until a frame is pushed (or [`wake`](Self::wake) is called)
    ///
    /// The consumer bounds this with its idle interval; the notification is
    /// an optimization over fixed polling, not a replacement for it.
    pub(crate) async fn notified(&self) {
        self.notify.notified().await;
    }

    /// Wake a consumer waiting in [`notified`](Self::notified)
    pub(crate) fn wake(&self) {
        self.notify.notify_one();
    }
}

impl std::fmt::Debug for BoundedFrameQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedFrameQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("dropped", &self.dropped_frames())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tag: u8) -> OwnedFrameBuffer {
        OwnedFrameBuffer::new(4, 1, vec![tag; 4].into_boxed_slice())
    }

    #[test]
    fn test_fifo_order() {
        let queue = BoundedFrameQueue::new(5);
        for tag in 0..3 {
            queue.push(frame(tag));
        }

        for tag in 0..3 {
            assert_eq!(queue.try_pop().unwrap().data()[0], tag);
        }
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        // Push N + k frames: exactly the last N survive, in arrival order.
        let queue = BoundedFrameQueue::new(5);
        for tag in 0..8 {
            queue.push(frame(tag));
        }

        assert_eq!(queue.len(), 5);
        assert_eq!(queue.dropped_frames(), 3);
        for tag in 3..8 {
            assert_eq!(queue.try_pop().unwrap().data()[0], tag);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty_returns_none() {
        let queue = BoundedFrameQueue::new(5);
        assert!(queue.try_pop().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let queue = BoundedFrameQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        queue.push(frame(1));
        queue.push(frame(2));
        assert_eq!(queue.dropped_frames(), 1);
        assert_eq!(queue.try_pop().unwrap().data()[0], 2);
    }

    #[test]
    fn test_concurrent_push_pop_no_corruption() {
        // One producer thread, one consumer thread. Every frame is filled
        // with a single recognizable byte; a popped frame must always match
        // some frame that was actually pushed, with no partial writes.
        use std::sync::Arc;
        use std::thread;

        const FRAMES: usize = 2_000;
        let queue = Arc::new(BoundedFrameQueue::new(5));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..FRAMES {
                    let tag = (i % 251) as u8;
                    queue.push(OwnedFrameBuffer::new(
                        64,
                        1,
                        vec![tag; 64].into_boxed_slice(),
                    ));
                }
            })
        };

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut popped = 0usize;
                while popped < FRAMES {
                    match queue.try_pop() {
                        Some(buf) => {
                            let first = buf.data()[0];
                            assert!(
                                buf.data().iter().all(|&b| b == first),
                                "torn frame observed"
                            );
                            popped += 1;
                        }
                        None => {
                            if queue.dropped_frames() as usize + popped >= FRAMES {
                                break;
                            }
                            thread::yield_now();
                        }
                    }
                }
            })
        };

        producer.join().unwrap();
        consumer.join().unwrap();

        // Drain whatever the consumer left behind after the producer finished.
        while let Some(buf) = queue.try_pop() {
            let first = buf.data()[0];
            assert!(buf.data().iter().all(|&b| b == first));
        }
    }
}
