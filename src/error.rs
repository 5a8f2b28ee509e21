//! Error type shared by the block, streaming and HC codecs.

use thiserror::Error;

/// Every failure the codec can report.
///
/// None of these are raised by panicking: untrusted input and undersized
/// buffers always come back through [`Result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Lz4Error {
    /// The destination buffer cannot hold the compressed or decompressed
    /// result. Retry with a larger buffer.
    #[error("destination buffer too small")]
    OutputTooSmall,

    /// The compressed stream is inconsistent with its own bounds: an offset of
    /// zero, an offset reaching before the available history, a length that
    /// runs past the end of the source, or a truncated sequence.
    #[error("malformed compressed block at input byte {position}")]
    MalformedInput { position: usize },

    /// The source is larger than [`crate::block::LZ4_MAX_INPUT_SIZE`].
    #[error("input of {0} bytes exceeds the maximum block input size")]
    InputTooLarge(usize),

    /// A streaming context was used after an earlier call on it failed.
    /// Reset it (or load a dictionary) before continuing.
    #[error("stream context is corrupted; reset it before further use")]
    InvalidContextState,
}

pub type Result<T> = core::result::Result<T, Lz4Error>;
