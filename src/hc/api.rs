//! LZ4 HC public API.
//!
//! One-shot helpers ([`compress_hc`], [`compress_hc_dest_size`],
//! [`compress_hc_with_state`]) and the streaming context [`Lz4StreamHc`].
//! The output is a plain LZ4 block, readable by every decoder in
//! [`crate::block`].
//!
//! ## Function Map
//!
//! | Operation                     | Rust                                   |
//! |-------------------------------|----------------------------------------|
//! | state size                    | [`size_of_state_hc`]                   |
//! | compress with caller state    | [`compress_hc_with_state`]             |
//! | compress                      | [`compress_hc`]                        |
//! | compress into a fixed budget  | [`compress_hc_dest_size`]              |
//! | create / release a stream     | [`Lz4StreamHc::new`] / drop            |
//! | reset                         | [`Lz4StreamHc::reset`], [`Lz4StreamHc::reset_fast`] |
//! | change level                  | [`Lz4StreamHc::set_level`]             |
//! | load a dictionary             | [`Lz4StreamHc::load_dict`]             |
//! | compress the next block       | [`Lz4StreamHc::compress_continue`]     |
//! | same, into a fixed budget     | [`Lz4StreamHc::compress_continue_dest_size`] |
//! | save the window               | [`Lz4StreamHc::save_dict`]             |

use tracing::{debug, trace};

use super::compress_hc::compress_hash_chain;
use super::search::insert;
use super::types::{clamp_level, get_clevel_params, HcContext, LZ4HC_START_INDEX};
use crate::block::compress::{compress_bound, OutputDirective, LZ4_MAX_INPUT_SIZE};
use crate::block::types::{slide_history, StreamStatus, Window, LZ4_DICT_SIZE};
use crate::error::{Lz4Error, Result};

/// Index at which the stream's window is rebuilt from its history.
const RENORM_THRESHOLD: u32 = 0x8000_0000;

/// [`Lz4StreamHc::reset_fast`] falls back to a full reset past this index.
const RESET_FAST_LIMIT: u32 = 1 << 30;

// ─────────────────────────────────────────────────────────────────────────────
// One-shot compression
// ─────────────────────────────────────────────────────────────────────────────

/// Bytes of working memory one HC compression needs.
pub fn size_of_state_hc() -> usize {
    HcContext::memory_size()
}

fn directive_for(src_len: usize, dst_len: usize) -> OutputDirective {
    if dst_len >= compress_bound(src_len) {
        OutputDirective::Limited
    } else {
        OutputDirective::FillOutput
    }
}

/// Compress `src` into `dst` at `compression_level`, reusing `state`.
///
/// The state is cleared first, so nothing leaks from a previous call.
pub fn compress_hc_with_state(
    state: &mut HcContext,
    src: &[u8],
    dst: &mut [u8],
    compression_level: i32,
) -> Result<usize> {
    state.clear_tables();
    state.next_to_update = LZ4HC_START_INDEX;
    let window = Window {
        dict: &[],
        src,
        base: LZ4HC_START_INDEX,
    };
    let (_, written) = compress_hash_chain(
        state,
        window,
        dst,
        get_clevel_params(compression_level),
        OutputDirective::Limited,
    )?;
    Ok(written)
}

/// Compress `src` into `dst` at `compression_level` (3..=12; see
/// [`clamp_level`](super::types::clamp_level) for out-of-range values).
///
/// # Errors
/// [`Lz4Error::OutputTooSmall`] if the block does not fit; size `dst` with
/// [`compress_bound`] to rule that out.
pub fn compress_hc(src: &[u8], dst: &mut [u8], compression_level: i32) -> Result<usize> {
    let mut state = Box::new(HcContext::new());
    compress_hc_with_state(&mut state, src, dst, compression_level)
}

/// Compress as much of `src` as fits into `dst`.
///
/// Returns `(consumed, written)`: the first `consumed` input bytes were
/// encoded into `dst[..written]`, and the block decodes to exactly those
/// bytes.
pub fn compress_hc_dest_size(
    src: &[u8],
    dst: &mut [u8],
    compression_level: i32,
) -> Result<(usize, usize)> {
    let mut state = Box::new(HcContext::new());
    let window = Window {
        dict: &[],
        src,
        base: LZ4HC_START_INDEX,
    };
    compress_hash_chain(
        &mut state,
        window,
        dst,
        get_clevel_params(compression_level),
        directive_for(src.len(), dst.len()),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Lz4StreamHc
// ─────────────────────────────────────────────────────────────────────────────

/// LZ4 HC streaming compression context.
///
/// Behaves like [`Lz4Stream`](crate::block::Lz4Stream): each block may
/// reference the previous 64 KiB, the context owns that history, and a
/// failed call leaves it corrupted until [`reset`](Self::reset),
/// [`reset_fast`](Self::reset_fast) or [`load_dict`](Self::load_dict).
#[derive(Clone)]
pub struct Lz4StreamHc {
    ctx: HcContext,
    current_offset: u32,
    history: Vec<u8>,
    level: i32,
    status: StreamStatus,
}

impl Lz4StreamHc {
    pub fn new(compression_level: i32) -> Box<Self> {
        Box::new(Self {
            ctx: HcContext::new(),
            current_offset: LZ4HC_START_INDEX,
            history: Vec::with_capacity(LZ4_DICT_SIZE),
            level: clamp_level(compression_level),
            status: StreamStatus::Ready,
        })
    }

    /// Fully reinitialise the context at `compression_level`.
    pub fn reset(&mut self, compression_level: i32) {
        self.ctx.clear_tables();
        self.current_offset = LZ4HC_START_INDEX;
        self.ctx.next_to_update = LZ4HC_START_INDEX;
        self.history.clear();
        self.level = clamp_level(compression_level);
        self.status = StreamStatus::Ready;
        debug!(level = self.level, "HC stream reset");
    }

    /// Start an independent stream without clearing the tables.
    pub fn reset_fast(&mut self, compression_level: i32) {
        if self.current_offset > RESET_FAST_LIMIT {
            self.reset(compression_level);
            return;
        }
        self.current_offset += LZ4_DICT_SIZE as u32;
        self.ctx.next_to_update = self.current_offset;
        self.history.clear();
        self.level = clamp_level(compression_level);
        self.status = StreamStatus::Ready;
        trace!(current_offset = self.current_offset, level = self.level, "HC stream fast reset");
    }

    /// Change the level used from the next block on.
    pub fn set_level(&mut self, compression_level: i32) {
        self.level = clamp_level(compression_level);
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Reset the stream and index the trailing 64 KiB of `dictionary` as its
    /// history. Returns the number of bytes retained.
    pub fn load_dict(&mut self, dictionary: &[u8]) -> usize {
        let dict = &dictionary[dictionary.len().saturating_sub(LZ4_DICT_SIZE)..];
        self.rebuild_from(dict.to_vec());
        self.status = StreamStatus::Ready;
        debug!(dict_size = dict.len(), "HC dictionary loaded");
        dict.len()
    }

    /// Clear the tables and re-index `history` so it starts at the lowest
    /// usable index.
    fn rebuild_from(&mut self, history: Vec<u8>) {
        self.ctx.clear_tables();
        self.history = history;
        self.current_offset = LZ4HC_START_INDEX + self.history.len() as u32;
        self.ctx.next_to_update = LZ4HC_START_INDEX;
        let window = Window {
            dict: &self.history,
            src: &[],
            base: self.current_offset,
        };
        insert(&mut self.ctx, &window, self.current_offset);
    }

    fn renorm(&mut self, next_size: usize) {
        if self.current_offset as u64 + next_size as u64 <= RENORM_THRESHOLD as u64 {
            return;
        }
        let old = self.current_offset;
        let history = core::mem::take(&mut self.history);
        self.rebuild_from(history);
        debug!(from = old, to = self.current_offset, "HC stream index space rebased");
    }

    // ── Streaming compression ─────────────────────────────────────────────────

    /// Compress `src` as the continuation of the stream. Returns the number
    /// of bytes written to `dst`.
    pub fn compress_continue(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        self.guarded(src, dst, OutputDirective::Limited)
            .map(|(_, written)| written)
    }

    /// Compress as much of `src` as fits into `dst`, returning
    /// `(consumed, written)`. Only the consumed bytes join the history.
    pub fn compress_continue_dest_size(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
    ) -> Result<(usize, usize)> {
        let directive = directive_for(src.len(), dst.len());
        self.guarded(src, dst, directive)
    }

    fn guarded(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        directive: OutputDirective,
    ) -> Result<(usize, usize)> {
        if self.status == StreamStatus::Corrupted {
            return Err(Lz4Error::InvalidContextState);
        }
        let result = self.compress_block(src, dst, directive);
        if let Err(e) = &result {
            self.status = StreamStatus::Corrupted;
            debug!(error = %e, "HC stream corrupted");
        }
        result
    }

    fn compress_block(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        directive: OutputDirective,
    ) -> Result<(usize, usize)> {
        if src.len() > LZ4_MAX_INPUT_SIZE {
            return Err(Lz4Error::InputTooLarge(src.len()));
        }
        self.renorm(src.len());

        let window = Window {
            dict: &self.history,
            src,
            base: self.current_offset,
        };
        let (consumed, written) = compress_hash_chain(
            &mut self.ctx,
            window,
            dst,
            get_clevel_params(self.level),
            directive,
        )?;

        self.current_offset += consumed as u32;
        // Positions past `consumed` were indexed with bytes the stream never
        // kept; they are re-inserted from the next block's data.
        self.ctx.next_to_update = self.ctx.next_to_update.min(self.current_offset);
        slide_history(&mut self.history, &src[..consumed]);
        trace!(src = src.len(), consumed, written, level = self.level, "HC stream block compressed");
        Ok((consumed, written))
    }

    // ── Save dictionary ───────────────────────────────────────────────────────

    /// Copy the trailing window (at most `safe_buffer.len()` bytes) into
    /// `safe_buffer` and shrink the stream's history to it.
    pub fn save_dict(&mut self, safe_buffer: &mut [u8]) -> usize {
        let n = safe_buffer.len().min(self.history.len());
        let from = self.history.len() - n;
        safe_buffer[..n].copy_from_slice(&self.history[from..]);
        self.history.drain(..from);
        debug!(saved = n, "HC dictionary saved");
        n
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_corrupted(&self) -> bool {
        self.status == StreamStatus::Corrupted
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
