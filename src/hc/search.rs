//! Match-finding core for the LZ4-HC compressor.
//!
//! 1. **Insertion** ([`insert`]) updates the hash and chain tables for every
//!    position in `[next_to_update, target)`, dictionary positions included.
//! 2. **Search** ([`insert_and_find_best_match`]) walks the chain from the
//!    newest candidate backwards and keeps the longest verified match.

use super::types::{hash_at, HcContext, LZ4HC_HASHSIZE, LZ4HC_MAXD_MASK};
use crate::block::types::{Window, LZ4_DISTANCE_MAX, MINMATCH};

/// A verified back-reference: `len` bytes starting at window index
/// `reference`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub reference: u32,
    pub len: usize,
}

#[inline(always)]
fn delta_next(chain_table: &[u16], idx: u32) -> u32 {
    chain_table[idx as usize & LZ4HC_MAXD_MASK] as u32
}

/// Hash of the four bytes at window index `idx`, if they lie inside one
/// segment.
#[inline(always)]
fn hash_index(window: &Window<'_>, idx: u32) -> Option<usize> {
    if idx >= window.base {
        let p = (idx - window.base) as usize;
        (p + LZ4HC_HASHSIZE <= window.src.len()).then(|| hash_at(window.src, p))
    } else {
        let p = (idx - window.low_limit()) as usize;
        (p + LZ4HC_HASHSIZE <= window.dict.len()).then(|| hash_at(window.dict, p))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// insert
// ─────────────────────────────────────────────────────────────────────────────

/// Insert every index in `[next_to_update, target)` into the tables.
pub fn insert(ctx: &mut HcContext, window: &Window<'_>, target: u32) {
    let mut idx = ctx.next_to_update.max(window.low_limit());
    while idx < target {
        if let Some(h) = hash_index(window, idx) {
            let delta = idx.wrapping_sub(ctx.hash_table[h]).min(LZ4_DISTANCE_MAX as u32);
            ctx.chain_table[idx as usize & LZ4HC_MAXD_MASK] = delta as u16;
            ctx.hash_table[h] = idx;
        }
        idx += 1;
    }
    ctx.next_to_update = ctx.next_to_update.max(target);
}

// ─────────────────────────────────────────────────────────────────────────────
// insert_and_find_best_match
// ─────────────────────────────────────────────────────────────────────────────

/// Longest match for `src[pos..]` found within `max_searches` chain steps.
///
/// Matches never extend past `matchlimit`. The walk stops early once a match
/// reaches `target_length`.
pub fn insert_and_find_best_match(
    ctx: &mut HcContext,
    window: &Window<'_>,
    pos: usize,
    matchlimit: usize,
    max_searches: u32,
    target_length: usize,
) -> Option<Match> {
    let cur = window.index(pos);
    insert(ctx, window, cur);

    let low = window
        .low_limit()
        .max(cur.saturating_sub(LZ4_DISTANCE_MAX as u32));
    let mut m = ctx.hash_table[hash_at(window.src, pos)];
    let mut best: Option<Match> = None;
    let mut best_len = MINMATCH - 1;
    let mut attempts = max_searches;

    while attempts > 0 && m >= low && m < cur {
        attempts -= 1;
        if window.matches(m, pos) {
            let len = MINMATCH
                + window.forward_len(m + MINMATCH as u32, pos + MINMATCH, matchlimit);
            if len > best_len {
                best_len = len;
                best = Some(Match { reference: m, len });
                if len >= target_length {
                    break;
                }
            }
        }
        match m.checked_sub(delta_next(&ctx.chain_table, m)) {
            Some(next) if next < m => m = next,
            _ => break,
        }
    }
    best
}
