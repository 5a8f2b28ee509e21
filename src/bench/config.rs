//! Benchmark configuration: constants and runtime parameters for the `bench` subsystem.
//!
//! [`BenchConfig`] holds the tuneable settings for a benchmark run: duration,
//! block size, verbosity and whether files are measured one by one. Its
//! builder-style setters allow callers to construct a configuration
//! incrementally before passing it to the runner.

// ── Timing constants ─────────────────────────────────────────────────────────

/// Default benchmark duration in seconds.
pub const NBSECONDS: u32 = 3;

/// Target duration per timing loop (1 second in nanoseconds).
pub const TIMELOOP_NANOSEC: u64 = 1_000_000_000;

// ── Size multiplier constants ───────────────────────────────────────────────

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

/// Maximum dictionary size accepted by LZ4 (64 KiB).
pub const LZ4_MAX_DICT_SIZE: usize = 64 * KB;

/// Maximum memory the benchmark will attempt to allocate.
pub const MAX_MEMORY: usize = if usize::BITS == 32 {
    (2 * GB) - (64 * MB)
} else {
    1usize << (usize::BITS - 31)
};

// ── BenchConfig struct ────────────────────────────────────────────────────────

/// Runtime parameters controlling a single benchmark session.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity level: 0 = silent, 1 = one summary line per level,
    /// 2 = progress and results (default).
    pub display_level: u32,

    /// Minimum benchmark duration in seconds. `0` runs a single pass.
    pub nb_seconds: u32,

    /// Block size for splitting input into independent chunks.
    /// Values below 32 mean "one block per file".
    pub block_size: usize,

    /// Benchmark each input file on its own instead of as one dataset.
    pub bench_separately: bool,

    /// Compress consecutive blocks as one stream so each may reference the
    /// previous one.
    pub linked_blocks: bool,

    /// Acceleration for the fast encoder at levels 0 to 2. Negative levels
    /// override it.
    pub acceleration: i32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            nb_seconds: NBSECONDS,
            block_size: crate::config::BLOCK_SIZE_DEFAULT,
            bench_separately: false,
            linked_blocks: false,
            acceleration: crate::config::ACCELERATION_DEFAULT,
        }
    }
}

impl BenchConfig {
    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    pub fn set_nb_seconds(&mut self, nb_seconds: u32) -> &mut Self {
        self.nb_seconds = nb_seconds;
        self
    }

    /// Set the block size used to split input data into chunks.
    ///
    /// Pass `0` to compress each input file as a single block.
    pub fn set_block_size(&mut self, block_size: usize) -> &mut Self {
        self.block_size = block_size;
        self
    }

    pub fn set_bench_separately(&mut self, separate: bool) -> &mut Self {
        self.bench_separately = separate;
        self
    }

    /// Measure the streaming encoders: blocks of one file are compressed as
    /// a dependent sequence and decoded with a streaming decoder.
    pub fn set_linked_blocks(&mut self, linked: bool) -> &mut Self {
        self.linked_blocks = linked;
        self
    }

    pub fn set_acceleration(&mut self, acceleration: i32) -> &mut Self {
        self.acceleration = acceleration;
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
