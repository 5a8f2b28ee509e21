//! LZ4 streaming compression state management.
//!
//! [`Lz4Stream`] compresses a sequence of dependent blocks: each block may
//! reference up to 64 KiB of the data compressed before it (or of a loaded
//! dictionary). The decoder side is
//! [`Lz4StreamDecode`](super::decompress_api::Lz4StreamDecode).
//!
//! # API
//! - [`Lz4Stream::new`], [`Lz4Stream::reset`], [`Lz4Stream::reset_fast`]
//! - [`Lz4Stream::load_dict`] / [`Lz4Stream::load_dict_slow`]
//! - [`Lz4Stream::compress_fast_continue`]
//! - [`Lz4Stream::save_dict`]
//!
//! ## History ownership
//! The stream keeps its own copy of the trailing 64 KiB window, so source
//! buffers do not need to stay resident between calls. `save_dict` still
//! exists for callers that want a copy of the window.
//!
//! ## Index space
//! Positions are `u32` indices that keep growing across blocks
//! (`current_offset`). Before an index would pass 2 GiB the table is rebased
//! so the window starts again at 64 KiB.

use tracing::{debug, trace};

use crate::error::{Lz4Error, Result};

use super::compress::{
    clamp_acceleration, compress_generic, OutputDirective, LZ4_MAX_INPUT_SIZE,
};
use super::types::{
    slide_history, HashKind, HashTable, StreamStatus, Window, KB, LZ4_DICT_SIZE,
};

/// Streams always hash five bytes, read eight at a time.
const STREAM_HASH: HashKind = HashKind::Five;

/// Index at which a rebase is forced.
const RENORM_THRESHOLD: u32 = 0x8000_0000;

/// Table entries are considered stale by [`Lz4Stream::reset_fast`] once the
/// index space grows past this.
const RESET_FAST_LIMIT: u32 = 1 << 30;

// ─────────────────────────────────────────────────────────────────────────────
// Internal load-dict mode flag
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum LoadDictMode {
    /// Step-3 hash filling (favours end-of-dictionary positions).
    Fast,
    /// Additional step-1 filling of still-empty slots (favours the start).
    Slow,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public streaming-compression state
// ─────────────────────────────────────────────────────────────────────────────

/// LZ4 streaming compression context.
///
/// Allocate with [`Lz4Stream::new`]; drop it to release it. After any failed
/// [`compress_fast_continue`](Lz4Stream::compress_fast_continue) the context
/// is corrupted and rejects further blocks with
/// [`Lz4Error::InvalidContextState`] until it is reset or given a dictionary.
#[derive(Clone)]
pub struct Lz4Stream {
    table: HashTable,
    current_offset: u32,
    history: Vec<u8>,
    status: StreamStatus,
}

impl Lz4Stream {
    // ── Construction ──────────────────────────────────────────────────────────

    pub fn new() -> Box<Self> {
        Box::new(Self {
            table: HashTable::new(),
            current_offset: 0,
            history: Vec::with_capacity(LZ4_DICT_SIZE),
            status: StreamStatus::Ready,
        })
    }

    // ── Reset ─────────────────────────────────────────────────────────────────

    /// Fully reinitialise the context, clearing the hash table.
    pub fn reset(&mut self) {
        self.table.clear();
        self.current_offset = 0;
        self.history.clear();
        self.status = StreamStatus::Ready;
        debug!("compression stream reset");
    }

    /// Start a new independent stream without clearing the hash table.
    ///
    /// Old entries stay in the table but the index space jumps 64 KiB ahead,
    /// so every one of them is out of reach of the new stream.
    pub fn reset_fast(&mut self) {
        if self.current_offset > RESET_FAST_LIMIT {
            self.reset();
            return;
        }
        if self.current_offset != 0 {
            self.current_offset += LZ4_DICT_SIZE as u32;
        }
        self.history.clear();
        self.status = StreamStatus::Ready;
        trace!(current_offset = self.current_offset, "compression stream fast reset");
    }

    // ── Dictionary loading ────────────────────────────────────────────────────

    fn load_dict_internal(&mut self, dictionary: &[u8], mode: LoadDictMode) -> usize {
        self.reset();
        self.current_offset += 64 * KB as u32;

        if dictionary.len() < STREAM_HASH.unit() {
            return 0;
        }
        let dict = &dictionary[dictionary.len().saturating_sub(LZ4_DICT_SIZE)..];
        self.history.extend_from_slice(dict);

        let start = self.current_offset - dict.len() as u32;
        let last = dict.len() - STREAM_HASH.unit();
        for p in (0..=last).step_by(3) {
            self.table.put(STREAM_HASH.at(dict, p), start + p as u32);
        }

        if mode == LoadDictMode::Slow {
            let limit = self.current_offset - 64 * KB as u32;
            for p in 0..=last {
                let h = STREAM_HASH.at(dict, p);
                if self.table.get(h) <= limit {
                    self.table.put(h, start + p as u32);
                }
            }
        }

        debug!(dict_size = dict.len(), slow = (mode == LoadDictMode::Slow), "dictionary loaded");
        dict.len()
    }

    /// Reset the stream and use the trailing 64 KiB of `dictionary` as its
    /// history. Returns the number of dictionary bytes retained; inputs
    /// shorter than 8 bytes are ignored (0).
    pub fn load_dict(&mut self, dictionary: &[u8]) -> usize {
        self.load_dict_internal(dictionary, LoadDictMode::Fast)
    }

    /// Like [`load_dict`](Self::load_dict) but indexes every dictionary
    /// position, which is slower and usually compresses slightly better.
    pub fn load_dict_slow(&mut self, dictionary: &[u8]) -> usize {
        self.load_dict_internal(dictionary, LoadDictMode::Slow)
    }

    // ── Renormalisation ───────────────────────────────────────────────────────

    fn renorm(&mut self, next_size: usize) {
        if self.current_offset as u64 + next_size as u64 <= RENORM_THRESHOLD as u64 {
            return;
        }
        let delta = self.current_offset - LZ4_DICT_SIZE as u32;
        self.table.rebase(delta);
        self.current_offset = LZ4_DICT_SIZE as u32;
        debug!(delta, "stream index space rebased");
    }

    // ── Streaming compression ─────────────────────────────────────────────────

    /// Compress `src` as the continuation of everything compressed so far.
    ///
    /// Returns the number of bytes written to `dst`. On failure the stream
    /// becomes corrupted.
    pub fn compress_fast_continue(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        acceleration: i32,
    ) -> Result<usize> {
        if self.status == StreamStatus::Corrupted {
            return Err(Lz4Error::InvalidContextState);
        }
        let result = self.compress_block(src, dst, clamp_acceleration(acceleration));
        if let Err(e) = &result {
            self.status = StreamStatus::Corrupted;
            debug!(error = %e, "compression stream corrupted");
        }
        result
    }

    fn compress_block(&mut self, src: &[u8], dst: &mut [u8], acceleration: u32) -> Result<usize> {
        if src.len() > LZ4_MAX_INPUT_SIZE {
            return Err(Lz4Error::InputTooLarge(src.len()));
        }
        self.renorm(src.len());

        let window = Window {
            dict: &self.history,
            src,
            base: self.current_offset,
        };
        let (_, written) = compress_generic(
            &mut self.table,
            window,
            dst,
            acceleration,
            STREAM_HASH,
            OutputDirective::Limited,
        )?;

        self.current_offset += src.len() as u32;
        slide_history(&mut self.history, src);
        trace!(src = src.len(), written, "stream block compressed");
        Ok(written)
    }

    // ── Save dictionary ───────────────────────────────────────────────────────

    /// Copy the trailing history window (at most `safe_buffer.len()` bytes)
    /// into `safe_buffer`, returning its size.
    ///
    /// The stream's own window shrinks to the saved bytes, so the next block
    /// references exactly what the caller now holds.
    pub fn save_dict(&mut self, safe_buffer: &mut [u8]) -> usize {
        let n = safe_buffer.len().min(self.history.len());
        let from = self.history.len() - n;
        safe_buffer[..n].copy_from_slice(&self.history[from..]);
        self.history.drain(..from);
        debug!(saved = n, "dictionary saved");
        n
    }

    /// Bytes of history the next block may reference.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True once a continue call has failed and the stream needs a reset.
    pub fn is_corrupted(&self) -> bool {
        self.status == StreamStatus::Corrupted
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
