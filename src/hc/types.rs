//! HC compression constants, level table and the chained match-finder state.
//!
//!   - `HcStrategy` and `CParams`, one entry per compression level
//!   - `K_CL_TABLE` and [`get_clevel_params`]
//!   - `hash_hc`, the 15-bit hash of a 4-byte sequence
//!   - [`HcContext`], the hash and chain tables shared by the one-shot and
//!     streaming HC encoders

use crate::block::types::{read_u32, KB};

// ─────────────────────────────────────────────────────────────────────────────
// Compression-level constants
// ─────────────────────────────────────────────────────────────────────────────

pub const LZ4HC_CLEVEL_MIN: i32 = 3;
pub const LZ4HC_CLEVEL_DEFAULT: i32 = 9;
pub const LZ4HC_CLEVEL_OPT_MIN: i32 = 10;
pub const LZ4HC_CLEVEL_MAX: i32 = 12;

// ─────────────────────────────────────────────────────────────────────────────
// HC table sizing
// ─────────────────────────────────────────────────────────────────────────────

pub const LZ4HC_DICTIONARY_LOGSIZE: u32 = 16;
/// Chain table length: one entry per slot in the 64 KB window.
pub const LZ4HC_MAXD: usize = 1 << LZ4HC_DICTIONARY_LOGSIZE; // 65536
pub const LZ4HC_MAXD_MASK: usize = LZ4HC_MAXD - 1;

pub const LZ4HC_HASH_LOG: u32 = 15;
/// Hash table entries (32768 u32 slots).
pub const LZ4HC_HASHTABLESIZE: usize = 1 << LZ4HC_HASH_LOG;

/// Bytes hashed per position.
pub const LZ4HC_HASHSIZE: usize = 4;

/// First index handed out by a fresh context. Zeroed table slots then sit
/// more than a window away from every real position.
pub const LZ4HC_START_INDEX: u32 = 64 * KB as u32;

// ─────────────────────────────────────────────────────────────────────────────
// Strategy and per-level parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Parsing strategy selected by the compression level.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HcStrategy {
    /// Hash-chain search with one position of lazy lookahead (levels 3–9).
    Lz4Hc,
    /// Deeper search with two positions of lookahead (levels 10–12).
    Lz4Deep,
}

impl HcStrategy {
    /// Positions past the current match that are searched for a better one.
    pub fn lookahead(self) -> usize {
        match self {
            HcStrategy::Lz4Hc => 1,
            HcStrategy::Lz4Deep => 2,
        }
    }
}

/// Per-level compression parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CParams {
    pub strat: HcStrategy,
    /// Chain candidates examined per position.
    pub nb_searches: u32,
    /// A match this long ends the search and skips lookahead.
    pub target_length: u32,
}

/// Level → parameter table, indexed by level 3..=12 minus 3.
#[rustfmt::skip]
pub static K_CL_TABLE: [CParams; (LZ4HC_CLEVEL_MAX - LZ4HC_CLEVEL_MIN + 1) as usize] = [
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:     4, target_length:   16 }, /* 3 */
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:     8, target_length:   16 }, /* 4 */
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:    16, target_length:   16 }, /* 5 */
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:    32, target_length:   16 }, /* 6 */
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:    64, target_length:   16 }, /* 7 */
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:   128, target_length:   16 }, /* 8 */
    CParams { strat: HcStrategy::Lz4Hc,   nb_searches:   256, target_length:   16 }, /* 9 */
    CParams { strat: HcStrategy::Lz4Deep, nb_searches:    96, target_length:   64 }, /* 10 */
    CParams { strat: HcStrategy::Lz4Deep, nb_searches:   512, target_length:  128 }, /* 11 */
    CParams { strat: HcStrategy::Lz4Deep, nb_searches: 16384, target_length: 4096 }, /* 12 */
];

/// Clamp a caller-supplied level: below 1 selects the default, 1 and 2 round
/// up to the minimum, anything above 12 is 12.
pub fn clamp_level(c_level: i32) -> i32 {
    if c_level < 1 {
        LZ4HC_CLEVEL_DEFAULT
    } else {
        c_level.clamp(LZ4HC_CLEVEL_MIN, LZ4HC_CLEVEL_MAX)
    }
}

/// Parameters for `c_level` after [`clamp_level`].
pub fn get_clevel_params(c_level: i32) -> CParams {
    K_CL_TABLE[(clamp_level(c_level) - LZ4HC_CLEVEL_MIN) as usize]
}

// ─────────────────────────────────────────────────────────────────────────────
// Hash
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
pub fn hash_hc(sequence: u32) -> usize {
    (sequence.wrapping_mul(2_654_435_761) >> (32 - LZ4HC_HASH_LOG)) as usize
}

/// Hash of the four bytes at `buf[i..]`.
#[inline(always)]
pub fn hash_at(buf: &[u8], i: usize) -> usize {
    hash_hc(read_u32(buf, i))
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// Hash-chain tables.
///
/// `hash_table[h]` holds the most recent index whose 4-byte hash is `h`;
/// `chain_table[idx & 0xFFFF]` holds the distance from `idx` back to the
/// previous index with the same hash (capped at 65535, which is out of
/// reach). Every index below `next_to_update` has been inserted.
#[derive(Clone)]
pub struct HcContext {
    pub hash_table: Box<[u32]>,
    pub chain_table: Box<[u16]>,
    pub next_to_update: u32,
}

impl HcContext {
    pub fn new() -> Self {
        Self {
            hash_table: vec![0u32; LZ4HC_HASHTABLESIZE].into_boxed_slice(),
            chain_table: vec![0xFFFFu16; LZ4HC_MAXD].into_boxed_slice(),
            next_to_update: LZ4HC_START_INDEX,
        }
    }

    /// Zero the hash table and reset the chain to "no predecessor".
    pub fn clear_tables(&mut self) {
        self.hash_table.fill(0);
        self.chain_table.fill(0xFFFF);
    }

    /// Total memory held by the context, tables included.
    pub fn memory_size() -> usize {
        core::mem::size_of::<Self>() + LZ4HC_HASHTABLESIZE * 4 + LZ4HC_MAXD * 2
    }
}

impl Default for HcContext {
    fn default() -> Self {
        Self::new()
    }
}
