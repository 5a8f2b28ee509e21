//! HC sequence encoder.
//!
//! [`encode_sequence`] serialises one complete LZ4 sequence (token, literal
//! run, offset, match-length tail) and is called once per match during HC
//! compression.

use crate::block::compress::write_length_tail;
use crate::block::types::{LASTLITERALS, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};
use crate::error::{Lz4Error, Result};

/// Encode `src[anchor..pos]` as literals followed by a match of
/// `match_length` bytes at distance `offset`, starting at `dst[op]`.
///
/// The sequence must fit below `oend` with room left for a final literal
/// run. On success the new output position is returned.
///
/// # Errors
/// [`Lz4Error::OutputTooSmall`] when the sequence does not fit. Bytes from
/// `op` onwards may have been overwritten, but the caller's `op` still marks
/// the end of valid output.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn encode_sequence(
    dst: &mut [u8],
    op: usize,
    src: &[u8],
    anchor: usize,
    pos: usize,
    offset: u32,
    match_length: usize,
    oend: usize,
) -> Result<usize> {
    debug_assert!(match_length >= MINMATCH);
    debug_assert!(offset >= 1 && offset <= u16::MAX as u32);

    // Literal length
    let length = pos - anchor;
    if op + length / 255 + length + (2 + 1 + LASTLITERALS) > oend {
        return Err(Lz4Error::OutputTooSmall);
    }
    let token = op;
    let mut op = if length >= RUN_MASK {
        dst[token] = (RUN_MASK << ML_BITS) as u8;
        write_length_tail(dst, token + 1, length - RUN_MASK)
    } else {
        dst[token] = (length << ML_BITS) as u8;
        token + 1
    };

    // Literals
    dst[op..op + length].copy_from_slice(&src[anchor..pos]);
    op += length;

    // Offset
    dst[op..op + 2].copy_from_slice(&(offset as u16).to_le_bytes());
    op += 2;

    // Match length
    let length = match_length - MINMATCH;
    if op + length / 255 + (1 + LASTLITERALS) > oend {
        return Err(Lz4Error::OutputTooSmall);
    }
    if length >= ML_MASK {
        dst[token] += ML_MASK as u8;
        op = write_length_tail(dst, op, length - ML_MASK);
    } else {
        dst[token] += length as u8;
    }
    Ok(op)
}
