//! Public LZ4 block decompression API.
//!
//!   - One-shot decompression: [`decompress_safe`], [`decompress_safe_partial`]
//!   - Dictionary decompression: [`decompress_safe_using_dict`],
//!     [`decompress_safe_partial_using_dict`]
//!   - Streaming decode context: [`Lz4StreamDecode`]
//!
//! Every function here is safe for arbitrary input. The streaming context
//! keeps its own copy of the trailing 64 KiB of decoded output, so callers
//! may decode each block into any buffer, including one they reuse.

use tracing::{debug, trace};

use crate::error::{Lz4Error, Result};

use super::decompress_core::{decompress_generic, DecodeTarget};
use super::types::{slide_history, StreamStatus, LZ4_DICT_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// One-shot
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress a full LZ4 block with no dictionary.
///
/// `dst.len()` is the decoder's capacity; the block must decode into it
/// entirely. Returns the number of bytes written into `dst`.
///
/// # Errors
/// [`Lz4Error::MalformedInput`] for corrupt blocks,
/// [`Lz4Error::OutputTooSmall`] when the decoded data would not fit.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    decompress_generic(src, dst, &[], DecodeTarget::Full)
}

/// Decompress at most `target_output_size` bytes of a block.
///
/// Decoding stops as soon as `target_output_size` bytes (capped at
/// `dst.len()`) have been produced, even in the middle of a sequence, so the
/// output is always an exact prefix of the full decompression.
///
/// If `src` holds exactly one block, a target larger than its decompressed
/// size simply returns the full size. If `src` carries trailing bytes after
/// the block, the target must not exceed the real decompressed size: beyond
/// it the trailing bytes are decoded as if they were block data, giving
/// either an error or unspecified output (never out-of-bounds access).
pub fn decompress_safe_partial(
    src: &[u8],
    dst: &mut [u8],
    target_output_size: usize,
) -> Result<usize> {
    decompress_generic(src, dst, &[], DecodeTarget::Partial(target_output_size))
}

/// Decompress a block that was compressed with `dict` loaded.
///
/// Only the trailing 64 KiB of `dict` can be referenced.
pub fn decompress_safe_using_dict(src: &[u8], dst: &mut [u8], dict: &[u8]) -> Result<usize> {
    decompress_generic(src, dst, dict_window(dict), DecodeTarget::Full)
}

/// Partial variant of [`decompress_safe_using_dict`].
pub fn decompress_safe_partial_using_dict(
    src: &[u8],
    dst: &mut [u8],
    target_output_size: usize,
    dict: &[u8],
) -> Result<usize> {
    decompress_generic(
        src,
        dst,
        dict_window(dict),
        DecodeTarget::Partial(target_output_size),
    )
}

#[inline]
fn dict_window(dict: &[u8]) -> &[u8] {
    &dict[dict.len().saturating_sub(LZ4_DICT_SIZE)..]
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming decode context
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming decompression context.
///
/// Decodes the blocks of a stream produced by
/// [`Lz4Stream`](super::stream::Lz4Stream) in the same order, each block
/// able to reference up to 64 KiB of previously decoded output. The history
/// is owned by the context.
///
/// A failed call leaves the context corrupted; further calls return
/// [`Lz4Error::InvalidContextState`] until [`Lz4StreamDecode::set_dict`] or
/// [`Lz4StreamDecode::reset`].
#[derive(Debug, Clone)]
pub struct Lz4StreamDecode {
    history: Vec<u8>,
    status: StreamStatus,
}

impl Lz4StreamDecode {
    pub fn new() -> Self {
        Self {
            history: Vec::with_capacity(LZ4_DICT_SIZE),
            status: StreamStatus::Ready,
        }
    }

    /// Start a new stream with no history.
    pub fn reset(&mut self) {
        self.history.clear();
        self.status = StreamStatus::Ready;
        debug!("stream decoder reset");
    }

    /// Start a new stream whose first block was compressed against `dict`.
    pub fn set_dict(&mut self, dict: &[u8]) {
        self.history.clear();
        self.history.extend_from_slice(dict_window(dict));
        self.status = StreamStatus::Ready;
        debug!(dict_size = self.history.len(), "stream decoder dictionary set");
    }

    /// Bytes of history currently available to the next block.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Decode the next block of the stream into `dst`.
    pub fn decompress_safe_continue(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        self.continue_with(src, dst, DecodeTarget::Full)
    }

    /// Decode at most `target_output_size` bytes of the next block.
    ///
    /// Only the produced prefix joins the history, so a partially decoded
    /// block is normally the last one of the stream.
    pub fn decompress_safe_partial_continue(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        target_output_size: usize,
    ) -> Result<usize> {
        self.continue_with(src, dst, DecodeTarget::Partial(target_output_size))
    }

    fn continue_with(&mut self, src: &[u8], dst: &mut [u8], target: DecodeTarget) -> Result<usize> {
        if self.status == StreamStatus::Corrupted {
            return Err(Lz4Error::InvalidContextState);
        }
        match decompress_generic(src, dst, &self.history, target) {
            Ok(n) => {
                slide_history(&mut self.history, &dst[..n]);
                trace!(compressed = src.len(), decoded = n, "stream block decoded");
                Ok(n)
            }
            Err(e) => {
                self.status = StreamStatus::Corrupted;
                debug!(error = %e, "stream decoder corrupted");
                Err(e)
            }
        }
    }
}

impl Default for Lz4StreamDecode {
    fn default() -> Self {
        Self::new()
    }
}
