//! Compression strategy selection for the benchmark subsystem.
//!
//! Defines the [`CompressionStrategy`] trait and four concrete implementations
//! covering every combination of one-shot / streaming and fast / HC modes:
//!
//! | Type              | Stream | Algorithm |
//! |-------------------|--------|-----------|
//! | [`NoStreamFast`]  | no     | fast      |
//! | [`NoStreamHC`]    | no     | HC        |
//! | [`StreamFast`]    | yes    | fast      |
//! | [`StreamHC`]      | yes    | HC        |
//!
//! Streaming strategies are used whenever a dictionary is supplied or blocks
//! are linked. Use [`build_compression_strategy`] to obtain a boxed strategy;
//! levels below [`LZ4HC_CLEVEL_MIN`] select the fast encoder.

use std::io;

use super::config::BenchConfig;
use crate::block::{compress_bound, compress_fast_with_state, CompressState, Lz4Stream};
use crate::hc::{compress_hc_with_state, HcContext, Lz4StreamHc, LZ4HC_CLEVEL_MIN};

// ── CompressionStrategy trait ─────────────────────────────────────────────────

/// A single compression strategy used by the benchmark runner.
pub trait CompressionStrategy: Send {
    /// Start a new independent sequence of blocks. Strategies holding a
    /// dictionary restore it here.
    fn reset(&mut self);

    /// Compress `src` into `dst`, growing `dst` to the worst-case size
    /// first. Returns the number of compressed bytes.
    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> io::Result<usize>;
}

/// Ensure `dst` can hold the worst-case output for `src_len` bytes.
#[inline]
fn ensure_dst_capacity(src_len: usize, dst: &mut Vec<u8>) {
    let bound = compress_bound(src_len);
    if dst.len() < bound {
        dst.resize(bound, 0u8);
    }
}

/// Negative levels ask for more speed: level `-n` uses acceleration `n + 1`.
/// Other levels use `base`.
fn acceleration_for(c_level: i32, base: i32) -> i32 {
    if c_level < 0 {
        c_level.saturating_neg().saturating_add(1)
    } else {
        base
    }
}

// ── Strategy 1: NoStreamFast ──────────────────────────────────────────────────

/// Independent blocks through the fast encoder.
pub struct NoStreamFast {
    acceleration: i32,
    state: Box<CompressState>,
}

impl NoStreamFast {
    pub fn new(c_level: i32, acceleration: i32) -> Self {
        NoStreamFast {
            acceleration: acceleration_for(c_level, acceleration),
            state: CompressState::new(),
        }
    }
}

impl CompressionStrategy for NoStreamFast {
    fn reset(&mut self) {}

    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> io::Result<usize> {
        ensure_dst_capacity(src.len(), dst);
        compress_fast_with_state(&mut self.state, src, dst, self.acceleration)
            .map_err(io::Error::other)
    }
}

// ── Strategy 2: NoStreamHC ────────────────────────────────────────────────────

/// Independent blocks through the HC encoder.
pub struct NoStreamHC {
    c_level: i32,
    state: Box<HcContext>,
}

impl NoStreamHC {
    pub fn new(c_level: i32) -> Self {
        NoStreamHC {
            c_level,
            state: Box::new(HcContext::new()),
        }
    }
}

impl CompressionStrategy for NoStreamHC {
    fn reset(&mut self) {}

    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> io::Result<usize> {
        ensure_dst_capacity(src.len(), dst);
        compress_hc_with_state(&mut self.state, src, dst, self.c_level).map_err(io::Error::other)
    }
}

// ── Strategy 3: StreamFast ────────────────────────────────────────────────────

/// Fast streaming encoder with an optional dictionary.
///
/// The dictionary is indexed once into `primed`; every [`reset`] clones that
/// context instead of re-indexing.
///
/// [`reset`]: CompressionStrategy::reset
pub struct StreamFast {
    acceleration: i32,
    stream: Box<Lz4Stream>,
    primed: Option<Box<Lz4Stream>>,
}

impl StreamFast {
    /// Pass an empty `dict` to stream without a dictionary.
    pub fn new(c_level: i32, acceleration: i32, dict: &[u8]) -> Self {
        let primed = (!dict.is_empty()).then(|| {
            let mut s = Lz4Stream::new();
            s.load_dict_slow(dict);
            s
        });
        StreamFast {
            acceleration: acceleration_for(c_level, acceleration),
            stream: Lz4Stream::new(),
            primed,
        }
    }
}

impl CompressionStrategy for StreamFast {
    fn reset(&mut self) {
        match &self.primed {
            Some(primed) => self.stream.clone_from(primed),
            None => self.stream.reset_fast(),
        }
    }

    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> io::Result<usize> {
        ensure_dst_capacity(src.len(), dst);
        self.stream
            .compress_fast_continue(src, dst, self.acceleration)
            .map_err(io::Error::other)
    }
}

// ── Strategy 4: StreamHC ──────────────────────────────────────────────────────

/// HC streaming encoder with an optional dictionary.
pub struct StreamHC {
    c_level: i32,
    stream: Box<Lz4StreamHc>,
    primed: Option<Box<Lz4StreamHc>>,
}

impl StreamHC {
    pub fn new(c_level: i32, dict: &[u8]) -> Self {
        let primed = (!dict.is_empty()).then(|| {
            let mut s = Lz4StreamHc::new(c_level);
            s.load_dict(dict);
            s
        });
        StreamHC {
            c_level,
            stream: Lz4StreamHc::new(c_level),
            primed,
        }
    }
}

impl CompressionStrategy for StreamHC {
    fn reset(&mut self) {
        match &self.primed {
            Some(primed) => self.stream.clone_from(primed),
            None => self.stream.reset_fast(self.c_level),
        }
    }

    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> io::Result<usize> {
        ensure_dst_capacity(src.len(), dst);
        self.stream.compress_continue(src, dst).map_err(io::Error::other)
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Build the strategy for `c_level`.
///
/// - no dictionary, unlinked blocks: [`NoStreamFast`] / [`NoStreamHC`]
/// - otherwise: [`StreamFast`] / [`StreamHC`]
pub fn build_compression_strategy(
    c_level: i32,
    dict: &[u8],
    config: &BenchConfig,
) -> Box<dyn CompressionStrategy> {
    let hc = c_level >= LZ4HC_CLEVEL_MIN;
    let acceleration = config.acceleration;
    match (hc, dict.is_empty() && !config.linked_blocks) {
        (false, true) => Box::new(NoStreamFast::new(c_level, acceleration)),
        (true, true) => Box::new(NoStreamHC::new(c_level)),
        (false, false) => Box::new(StreamFast::new(c_level, acceleration, dict)),
        (true, false) => Box::new(StreamHC::new(c_level, dict)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
