//! LZ4 block compression: the fast single-candidate encoder.
//!
//! | Function                        | Purpose                                    |
//! |---------------------------------|--------------------------------------------|
//! | [`compress_bound`]              | worst-case compressed size                 |
//! | [`compress_fast`]               | one-shot compression with acceleration     |
//! | [`compress_default`]            | `compress_fast` at acceleration 1          |
//! | [`compress_fast_with_state`]    | one-shot with caller-owned [`CompressState`] |
//! | [`compress_dest_size`]          | fill a fixed-size destination              |
//!
//! The encoder uses a hash table to find back-references within a sliding
//! window of up to [`LZ4_DISTANCE_MAX`] bytes. Each sequence is a literal run
//! followed by a match (offset + length); the block always ends with a
//! literal-only run covering at least the last [`LASTLITERALS`] bytes.
//!
//! Every write into the destination is preceded by a capacity check, so an
//! undersized buffer yields [`Lz4Error::OutputTooSmall`] and never a partial
//! overrun.
//!
//! [`LZ4_DISTANCE_MAX`]: super::types::LZ4_DISTANCE_MAX

use crate::error::{Lz4Error, Result};

use super::types::{
    HashKind, HashTable, Window, LASTLITERALS, LZ4_MIN_LENGTH, LZ4_SKIP_TRIGGER,
    MFLIMIT, MINMATCH, ML_BITS, ML_MASK, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum allowed input size (2 113 929 216 bytes). Inputs larger than this
/// cannot be represented in an LZ4 block.
pub const LZ4_MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Default acceleration factor (equals 1, probe every position).
pub const LZ4_ACCELERATION_DEFAULT: i32 = 1;

/// Maximum allowed acceleration factor.
pub const LZ4_ACCELERATION_MAX: i32 = 65_537;

/// How the encoder treats the destination capacity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum OutputDirective {
    /// Fail with `OutputTooSmall` as soon as the block cannot fit.
    Limited,
    /// Stop early and emit whatever prefix of the input fits.
    FillOutput,
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for a given input size.
///
/// Returns 0 if `input_size` exceeds [`LZ4_MAX_INPUT_SIZE`].
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    if input_size > LZ4_MAX_INPUT_SIZE {
        0
    } else {
        input_size + input_size / 255 + 16
    }
}

/// Clamp a caller-supplied acceleration into `1..=LZ4_ACCELERATION_MAX`.
#[inline]
pub fn clamp_acceleration(acceleration: i32) -> u32 {
    if acceleration < 1 {
        LZ4_ACCELERATION_DEFAULT as u32
    } else {
        acceleration.min(LZ4_ACCELERATION_MAX) as u32
    }
}

/// Write a 255-continuation length tail.
#[inline(always)]
pub(crate) fn write_length_tail(dst: &mut [u8], mut op: usize, mut len: usize) -> usize {
    while len >= 255 {
        dst[op] = 255;
        op += 1;
        len -= 255;
    }
    dst[op] = len as u8;
    op + 1
}

/// Emit the final literal-only sequence for `src[anchor..anchor + run]`.
#[inline]
pub(crate) fn write_last_literals(dst: &mut [u8], mut op: usize, src: &[u8], run: usize) -> usize {
    if run >= RUN_MASK {
        dst[op] = (RUN_MASK << ML_BITS) as u8;
        op = write_length_tail(dst, op + 1, run - RUN_MASK);
    } else {
        dst[op] = (run << ML_BITS) as u8;
        op += 1;
    }
    dst[op..op + run].copy_from_slice(&src[..run]);
    op + run
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Inner core of LZ4 block compression.
///
/// Compresses `window.src` into `dst`, using `table` for candidates and
/// recording every probed position in it. Matches may reach back into
/// `window.dict`. Returns `(consumed, written)`; `consumed` is smaller than the
/// input only under [`OutputDirective::FillOutput`].
pub(crate) fn compress_generic(
    table: &mut HashTable,
    window: Window<'_>,
    dst: &mut [u8],
    acceleration: u32,
    hash: HashKind,
    directive: OutputDirective,
) -> Result<(usize, usize)> {
    let src = window.src;
    let src_len = src.len();
    if src_len > LZ4_MAX_INPUT_SIZE {
        return Err(Lz4Error::InputTooLarge(src_len));
    }
    if directive == OutputDirective::FillOutput && dst.is_empty() {
        return Err(Lz4Error::OutputTooSmall);
    }
    let olimit = dst.len();

    let mut op = 0usize;
    let mut anchor = 0usize;

    'main: {
        if src_len < LZ4_MIN_LENGTH {
            break 'main;
        }
        let mflimit_plus_one = src_len - MFLIMIT + 1;
        let matchlimit = src_len - LASTLITERALS;

        // First byte
        table.put(hash.at(src, 0), window.index(0));
        let mut ip = 1usize;
        let mut forward_h = hash.at(src, ip);

        loop {
            // ── Find a match ─────────────────────────────────────────────────
            let mut m;
            {
                let mut forward_ip = ip;
                let mut step = 1usize;
                let mut search_match_nb = acceleration << LZ4_SKIP_TRIGGER;
                loop {
                    let h = forward_h;
                    ip = forward_ip;
                    forward_ip += step;
                    step = (search_match_nb >> LZ4_SKIP_TRIGGER) as usize;
                    search_match_nb += 1;

                    if forward_ip > mflimit_plus_one {
                        break 'main;
                    }

                    m = table.get(h);
                    forward_h = hash.at(src, forward_ip);
                    table.put(h, window.index(ip));

                    if window.matches(m, ip) {
                        break;
                    }
                }
            }

            // Catch up
            let back = window.backward_len(m, ip, anchor);
            ip -= back;
            m -= back as u32;

            // ── Encode literal length ────────────────────────────────────────
            let lit_length = ip - anchor;
            let mut token = op;
            match directive {
                OutputDirective::Limited => {
                    if token + 1 + lit_length + (2 + 1 + LASTLITERALS) + lit_length / 255 > olimit {
                        return Err(Lz4Error::OutputTooSmall);
                    }
                }
                OutputDirective::FillOutput => {
                    if token + 1 + (lit_length + 240) / 255 + lit_length + 2 + 1 + MFLIMIT
                        - MINMATCH
                        > olimit
                    {
                        op = token;
                        break 'main;
                    }
                }
            }
            op = if lit_length >= RUN_MASK {
                dst[token] = (RUN_MASK << ML_BITS) as u8;
                write_length_tail(dst, token + 1, lit_length - RUN_MASK)
            } else {
                dst[token] = (lit_length << ML_BITS) as u8;
                token + 1
            };
            dst[op..op + lit_length].copy_from_slice(&src[anchor..ip]);
            op += lit_length;

            // ── Sequences sharing the anchor (immediate re-matches) ──────────
            loop {
                if directive == OutputDirective::FillOutput
                    && op + 2 + 1 + MFLIMIT - MINMATCH > olimit
                {
                    op = token;
                    break 'main;
                }

                // Offset
                let offset = (window.index(ip) - m) as u16;
                dst[op..op + 2].copy_from_slice(&offset.to_le_bytes());
                op += 2;

                // Match length
                let mut match_code = window.forward_len(m + MINMATCH as u32, ip + MINMATCH, matchlimit);
                ip += MINMATCH + match_code;

                if op + 1 + LASTLITERALS + (match_code + 240) / 255 > olimit {
                    if directive == OutputDirective::Limited {
                        return Err(Lz4Error::OutputTooSmall);
                    }
                    let new_match_code = 14 + (olimit - op - 1 - LASTLITERALS) * 255;
                    ip -= match_code - new_match_code;
                    match_code = new_match_code;
                }
                if match_code >= ML_MASK {
                    dst[token] += ML_MASK as u8;
                    op = write_length_tail(dst, op, match_code - ML_MASK);
                } else {
                    dst[token] += match_code as u8;
                }

                anchor = ip;

                if ip >= mflimit_plus_one {
                    break 'main;
                }

                // Fill table
                table.put(hash.at(src, ip - 2), window.index(ip - 2));

                // Test next position
                let h = hash.at(src, ip);
                m = table.get(h);
                table.put(h, window.index(ip));
                if window.matches(m, ip) {
                    token = op;
                    dst[token] = 0;
                    op += 1;
                    continue;
                }

                // Prepare next loop
                ip += 1;
                forward_h = hash.at(src, ip);
                break;
            }
        }
    }

    // ── Last literals ────────────────────────────────────────────────────────
    let mut last_run = src_len - anchor;
    if op + last_run + 1 + (last_run + 255 - RUN_MASK) / 255 > olimit {
        match directive {
            OutputDirective::Limited => return Err(Lz4Error::OutputTooSmall),
            OutputDirective::FillOutput => {
                last_run = olimit - op - 1;
                last_run -= (last_run + 256 - RUN_MASK) / 256;
            }
        }
    }
    op = write_last_literals(dst, op, &src[anchor..], last_run);

    Ok((anchor + last_run, op))
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot state
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-owned scratch state for one-shot compression.
///
/// Reusing one across calls avoids re-zeroing a fresh table on the stack;
/// nothing carries over between calls.
#[derive(Clone, Default)]
pub struct CompressState {
    table: HashTable,
}

impl CompressState {
    pub fn new() -> Box<Self> {
        Box::default()
    }
}

/// Size in bytes of [`CompressState`].
pub fn size_of_state() -> usize {
    core::mem::size_of::<CompressState>()
}

// ─────────────────────────────────────────────────────────────────────────────
// Public one-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` using caller-owned state.
///
/// The state is reset first, so any previous contents are irrelevant.
pub fn compress_fast_with_state(
    state: &mut CompressState,
    src: &[u8],
    dst: &mut [u8],
    acceleration: i32,
) -> Result<usize> {
    state.table.clear();
    let (_, written) = compress_generic(
        &mut state.table,
        Window::prefix_only(src),
        dst,
        clamp_acceleration(acceleration),
        HashKind::for_input(src.len()),
        OutputDirective::Limited,
    )?;
    Ok(written)
}

/// Compress `src` into `dst` with a caller-supplied `acceleration` factor.
///
/// Allocates temporary compression state on the stack. Acceleration below 1
/// is treated as 1 and above [`LZ4_ACCELERATION_MAX`] as the maximum.
///
/// Returns the number of bytes written to `dst`, or
/// `Err(Lz4Error::OutputTooSmall)`. A `dst` of [`compress_bound`] bytes
/// always suffices.
pub fn compress_fast(src: &[u8], dst: &mut [u8], acceleration: i32) -> Result<usize> {
    let mut state = CompressState::default();
    compress_fast_with_state(&mut state, src, dst, acceleration)
}

/// Compress `src` into `dst` with the default acceleration factor (1).
///
/// This is the recommended entry point for one-shot LZ4 block compression.
pub fn compress_default(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    compress_fast(src, dst, LZ4_ACCELERATION_DEFAULT)
}

/// Compress as much of `src` as fits in `dst`.
///
/// Returns `(consumed, written)`: the number of leading bytes of `src` that the
/// block encodes, and the compressed length. The block decodes into a buffer
/// of exactly `consumed` bytes.
pub fn compress_dest_size(src: &[u8], dst: &mut [u8]) -> Result<(usize, usize)> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        return Err(Lz4Error::InputTooLarge(src.len()));
    }
    if dst.len() >= compress_bound(src.len()) {
        // Guaranteed success, use the normal path.
        let written = compress_default(src, dst)?;
        return Ok((src.len(), written));
    }
    let mut table = HashTable::new();
    compress_generic(
        &mut table,
        Window::prefix_only(src),
        dst,
        LZ4_ACCELERATION_DEFAULT as u32,
        HashKind::for_input(src.len()),
        OutputDirective::FillOutput,
    )
}
