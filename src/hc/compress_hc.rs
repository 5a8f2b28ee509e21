//! HC main compression loop.
//!
//! [`compress_hash_chain`] walks the input with the chained match finder,
//! looking one or two positions ahead of every match (depending on the
//! level's [`HcStrategy`](super::types::HcStrategy)) to see whether emitting a
//! literal first would buy a longer match. The chosen match is then extended
//! backwards over pending literals and encoded.
//!
//! Both output modes are supported: `Limited` fails as soon as the block
//! cannot fit; `FillOutput` shortens or drops the sequence that overflows
//! and ends the block with as many literals as still fit.

use super::encode::encode_sequence;
use super::search::{insert_and_find_best_match, Match};
use super::types::{CParams, HcContext};
use crate::block::compress::{write_last_literals, OutputDirective, LZ4_MAX_INPUT_SIZE};
use crate::block::types::{
    Window, LASTLITERALS, LZ4_MIN_LENGTH, MFLIMIT, MINMATCH, ML_MASK, RUN_MASK,
};
use crate::error::{Lz4Error, Result};

/// Compress `window.src` with the hash-chain strategy.
///
/// Returns `(consumed, written)`; `consumed` is only smaller than the input
/// under [`OutputDirective::FillOutput`].
pub(crate) fn compress_hash_chain(
    ctx: &mut HcContext,
    window: Window<'_>,
    dst: &mut [u8],
    params: CParams,
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

    let full_end = dst.len();
    // In fill mode every sequence keeps LASTLITERALS spare bytes for the tail.
    let oend = match directive {
        OutputDirective::Limited => full_end,
        OutputDirective::FillOutput => full_end.saturating_sub(LASTLITERALS),
    };
    let max_searches = params.nb_searches;
    let target_length = params.target_length as usize;
    let lookahead = params.strat.lookahead();

    let mut op = 0usize;
    let mut anchor = 0usize;

    'main: {
        if src_len < LZ4_MIN_LENGTH {
            break 'main;
        }
        let mflimit = src_len - MFLIMIT;
        let matchlimit = src_len - LASTLITERALS;

        let mut ip = 0usize;
        while ip <= mflimit {
            let found =
                insert_and_find_best_match(ctx, &window, ip, matchlimit, max_searches, target_length);
            let Some(mut best) = found else {
                ip += 1;
                continue;
            };
            let mut pos = ip;

            // Lazy evaluation: a match starting `step` bytes later must be
            // longer by more than the `step - 1` extra literals it costs.
            let mut step = 1;
            while best.len < target_length && step <= lookahead && pos + step <= mflimit {
                let next =
                    insert_and_find_best_match(ctx, &window, pos + step, matchlimit, max_searches, target_length);
                match next {
                    Some(next) if next.len > best.len + (step - 1) => {
                        pos += step;
                        best = next;
                        step = 1;
                    }
                    _ => step += 1,
                }
            }

            // Catch up
            let back = window.backward_len(best.reference, pos, anchor);
            pos -= back;
            best = Match {
                reference: best.reference - back as u32,
                len: best.len + back,
            };

            let offset = window.index(pos) - best.reference;
            match encode_sequence(dst, op, src, anchor, pos, offset, best.len, oend) {
                Ok(next_op) => {
                    op = next_op;
                    ip = pos + best.len;
                    anchor = ip;
                }
                Err(e) => {
                    if directive == OutputDirective::Limited {
                        return Err(e);
                    }
                    // Shorten the overflowing match to whatever still fits.
                    let ll = pos - anchor;
                    let ll_total_cost = 1 + (ll + 240) / 255 + ll;
                    let Some(max_lit_pos) = oend.checked_sub(3) else {
                        break 'main;
                    };
                    if op + ll_total_cost <= max_lit_pos {
                        let bytes_left_for_ml = max_lit_pos - (op + ll_total_cost);
                        let max_ml_size = MINMATCH + (ML_MASK - 1) + bytes_left_for_ml * 255;
                        let ml = best.len.min(max_ml_size);
                        if full_end - (op + ll_total_cost + 2) - 1 + ml >= MFLIMIT {
                            let shortened =
                                encode_sequence(dst, op, src, anchor, pos, offset, ml, full_end);
                            debug_assert!(shortened.is_ok(), "shortened match exceeds the budget");
                            if let Ok(next_op) = shortened {
                                op = next_op;
                                anchor = pos + ml;
                            }
                        }
                    }
                    break 'main;
                }
            }
        }
    }

    // ── Last literals ────────────────────────────────────────────────────────
    let mut last_run = src_len - anchor;
    let ll_add = (last_run + 255 - RUN_MASK) / 255;
    if op + 1 + ll_add + last_run > full_end {
        if directive == OutputDirective::Limited {
            return Err(Lz4Error::OutputTooSmall);
        }
        last_run = full_end - op - 1;
        last_run -= (last_run + 256 - RUN_MASK) / 256;
    }
    op = write_last_literals(dst, op, &src[anchor..], last_run);

    Ok((anchor + last_run, op))
}
