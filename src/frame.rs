// SPDX-License-Identifier: GPL-3.0-only

//! Frame buffer types
//!
//! Two representations with very different lifetimes:
//!
//! - [`RawFrameHandle`] borrows producer-owned memory and is only valid for
//!   the duration of the producer's notification call. The borrow makes the
//!   lifetime contract explicit: a handle cannot be stored past the call.
//! - [`OwnedFrameBuffer`] is an independently allocated copy with exactly one
//!   owner at any time. Once created, nothing the producer does to its own
//!   memory can change the buffer's contents.

use crate::errors::FrameError;

/// Non-owning view of one frame's pixel memory
///
/// Single-channel data: `width * height` must equal the byte length. The
/// referenced memory may be reused or overwritten by the producer as soon as
/// the notification call returns, which is exactly what the borrow enforces.
#[derive(Debug, Clone, Copy)]
pub struct RawFrameHandle<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> RawFrameHandle<'a> {
    /// Wrap a producer-owned byte slice with its pixel dimensions
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// The referenced bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Expected byte length for the declared dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An independently-owned copy of one frame's pixel data
///
/// Created once per frame by [`FrameIngestor::ingest`](crate::ingest::FrameIngestor::ingest).
/// Immutable after creation; destroyed when processed or when evicted by the
/// queue's overflow policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFrameBuffer {
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl OwnedFrameBuffer {
    pub(crate) fn new(width: u32, height: u32, data: Box<[u8]>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The frame's bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes in the frame
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the frame holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mean byte value of the frame, in `[0.0, 255.0]`
    ///
    /// Sums into a `u64` accumulator: even a 2^32-byte frame of 0xFF bytes
    /// stays far below the accumulator's range, so the sum cannot overflow
    /// for any frame this pipeline can represent.
    pub fn mean(&self) -> Result<f64, FrameError> {
        if self.data.is_empty() {
            return Err(FrameError::EmptyBuffer);
        }
        let sum: u64 = self.data.iter().map(|&b| u64::from(b)).sum();
        Ok(sum as f64 / self.data.len() as f64)
    }
}

impl AsRef<[u8]> for OwnedFrameBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_from(bytes: &[u8]) -> OwnedFrameBuffer {
        OwnedFrameBuffer::new(bytes.len() as u32, 1, bytes.to_vec().into_boxed_slice())
    }

    #[test]
    fn test_mean_all_zero() {
        let buf = buffer_from(&[0u8; 100]);
        assert_eq!(buf.mean().unwrap(), 0.0);
    }

    #[test]
    fn test_mean_all_max() {
        let buf = buffer_from(&[255u8; 100]);
        assert_eq!(buf.mean().unwrap(), 255.0);
    }

    #[test]
    fn test_mean_mixed() {
        let buf = buffer_from(&[0, 128, 255]);
        let mean = buf.mean().unwrap();
        assert!((mean - 383.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_empty_buffer_is_anomaly() {
        let buf = buffer_from(&[]);
        assert_eq!(buf.mean(), Err(FrameError::EmptyBuffer));
    }

    #[test]
    fn test_handle_expected_len() {
        let data = vec![0u8; 12];
        let handle = RawFrameHandle::new(&data, 4, 3);
        assert_eq!(handle.expected_len(), 12);
        assert_eq!(handle.width(), 4);
        assert_eq!(handle.height(), 3);
    }
}
