// SPDX-License-Identifier: GPL-3.0-only

//! Frame ingestion: raw handle to owned buffer
//!
//! The copy must complete synchronously inside [`FrameIngestor::ingest`],
//! because the memory behind a [`RawFrameHandle`] is only guaranteed valid
//! until the producer's notification call returns. Reusing one buffer across
//! frames or deferring the copy is precisely the defect this design removes:
//! it would let the producer overwrite data that is still sitting in the
//! queue.

use crate::errors::IngestError;
use crate::frame::{OwnedFrameBuffer, RawFrameHandle};

/// Sole allocator of [`OwnedFrameBuffer`] values
///
/// Every returned buffer has storage independent of the source memory and of
/// every other buffer, even when the producer hands in the same memory region
/// for consecutive frames.
#[derive(Debug, Default)]
pub struct FrameIngestor;

impl FrameIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Copy exactly `width * height` bytes out of the handle
    ///
    /// All-or-nothing: on allocation failure no buffer is produced and the
    /// queue is unaffected. The allocation is fallible rather than aborting
    /// so a single oversized or unlucky frame cannot take the producer's
    /// execution context down with it.
    pub fn ingest(&self, handle: RawFrameHandle<'_>) -> Result<OwnedFrameBuffer, IngestError> {
        let expected = handle.expected_len();
        let data = handle.data();
        if data.len() != expected {
            return Err(IngestError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }

        let mut copy = Vec::new();
        copy.try_reserve_exact(expected)
            .map_err(|_| IngestError::AllocationFailed { bytes: expected })?;
        copy.extend_from_slice(data);

        Ok(OwnedFrameBuffer::new(
            handle.width(),
            handle.height(),
            copy.into_boxed_slice(),
        ))
    }
}
