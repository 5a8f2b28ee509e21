//! LZ4 block decompression core engine.
//!
//!   - `read_variable_length`: bounded 255-continuation length decoder
//!   - `copy_match`: overlap-aware back-reference copy
//!   - `decompress_generic`: the decoding loop itself
//!
//! # Security boundary
//!
//! This module decodes untrusted bytes. Every read of `src` and every write
//! of `dst` is bounds-checked before it happens; malformed or truncated input
//! returns `Err(Lz4Error::MalformedInput)` and never panics.
//!
//! The decoder does not enforce the encoder-side parsing restrictions (last
//! five bytes literal, no match start in the last twelve). Any token stream
//! that stays in bounds decodes.

use crate::error::{Lz4Error, Result};

use super::types::{read_u16, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};

/// How much output the caller wants.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum DecodeTarget {
    /// Decode the whole block; it must fit in `dst`.
    Full,
    /// Stop after this many bytes, even mid-sequence.
    Partial(usize),
}

#[inline(always)]
fn malformed<T>(position: usize) -> Result<T> {
    Err(Lz4Error::MalformedInput { position })
}

// ─────────────────────────────────────────────────────────────────────────────
// read_variable_length
// ─────────────────────────────────────────────────────────────────────────────

/// Read the extension bytes of a literal or match length.
///
/// Accumulates bytes until one is below 255. Running off the end of `src`
/// before that is an error, as is a sum that no longer fits in `usize`.
#[inline(always)]
fn read_variable_length(src: &[u8], ip: &mut usize) -> Result<usize> {
    let mut length = 0usize;
    loop {
        let Some(&s) = src.get(*ip) else {
            return malformed(*ip);
        };
        *ip += 1;
        length = match length.checked_add(s as usize) {
            Some(l) => l,
            None => return malformed(*ip),
        };
        if s != 255 {
            return Ok(length);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// copy_match
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `len` bytes from `dst[op - offset..]` to `dst[op..]`.
///
/// When `offset < len` the regions overlap and the output must repeat the
/// `offset`-byte pattern. Each pass copies the already-periodic span ahead of
/// itself, so the copied span doubles and no pass reads bytes it writes.
#[inline]
pub(crate) fn copy_match(dst: &mut [u8], op: usize, offset: usize, len: usize) {
    let start = op - offset;
    if offset >= len {
        dst.copy_within(start..start + len, op);
        return;
    }
    let mut copied = 0;
    while copied < len {
        let chunk = (op + copied - start).min(len - copied);
        dst.copy_within(start..start + chunk, op + copied);
        copied += chunk;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_generic
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the block in `src` into `dst`.
///
/// `dict` holds the bytes that logically precede `dst[0]` (an external
/// dictionary or the previous blocks of a stream); offsets may reach into it
/// up to its full length.
///
/// Returns the number of bytes written to `dst`.
pub(crate) fn decompress_generic(
    src: &[u8],
    dst: &mut [u8],
    dict: &[u8],
    target: DecodeTarget,
) -> Result<usize> {
    let (oend, partial) = match target {
        DecodeTarget::Full => (dst.len(), false),
        DecodeTarget::Partial(t) => (t.min(dst.len()), true),
    };
    if src.is_empty() {
        return malformed(0);
    }
    if partial && oend == 0 {
        return Ok(0);
    }

    let iend = src.len();
    let mut ip = 0usize;
    let mut op = 0usize;

    loop {
        let Some(&token) = src.get(ip) else {
            // A block never ends on a match.
            return malformed(ip);
        };
        ip += 1;

        // ── literals ─────────────────────────────────────────────────────────
        let mut length = (token >> ML_BITS) as usize;
        if length == RUN_MASK {
            length += read_variable_length(src, &mut ip)?;
        }

        if partial {
            let n = length.min(iend - ip).min(oend - op);
            dst[op..op + n].copy_from_slice(&src[ip..ip + n]);
            ip += n;
            op += n;
            // Output full, or nothing left that could hold an offset.
            if op == oend || ip + 2 > iend {
                return Ok(op);
            }
        } else {
            if length > iend - ip {
                return malformed(ip);
            }
            if length > oend - op {
                return Err(Lz4Error::OutputTooSmall);
            }
            dst[op..op + length].copy_from_slice(&src[ip..ip + length]);
            ip += length;
            op += length;
            if ip == iend {
                return Ok(op);
            }
        }

        // ── match ────────────────────────────────────────────────────────────
        if ip + 2 > iend {
            return malformed(ip);
        }
        let offset = read_u16(src, ip) as usize;
        if offset == 0 || offset > op + dict.len() {
            return malformed(ip);
        }
        ip += 2;

        let mut length = (token as usize) & ML_MASK;
        if length == ML_MASK {
            length += read_variable_length(src, &mut ip)?;
        }
        length += MINMATCH;

        if length > oend - op {
            if !partial {
                return Err(Lz4Error::OutputTooSmall);
            }
            length = oend - op;
        }

        if offset > op {
            // Starts inside the dictionary; may continue into dst.
            let back = offset - op;
            let from = dict.len() - back;
            let n = back.min(length);
            dst[op..op + n].copy_from_slice(&dict[from..from + n]);
            op += n;
            length -= n;
        }
        if length > 0 {
            copy_match(dst, op, offset, length);
            op += length;
        }

        if partial && op == oend {
            return Ok(op);
        }
    }
}
