//! In-memory benchmark harness for the block codecs.
//!
//! [`bench_files`] is the entry point. Callers pass a list of files, or an
//! empty slice to benchmark generated data from [`crate::datagen`]. Work is
//! dispatched to:
//!
//! - [`runner::bench_c_level`]: one in-memory buffer, a range of levels.
//! - [`runner::bench_file_table`]: a set of files loaded as one dataset.
//!
//! Levels below 3 use the fast encoder (negative levels raise its
//! acceleration); levels 3 to 12 use HC. [`config::BenchConfig`] controls
//! verbosity, duration, block size and whether blocks are linked.

pub mod bench_mem;
pub mod compress_strategy;
pub mod config;
pub mod runner;

pub use bench_mem::BenchResult;
pub use config::BenchConfig;

use std::fs;
use std::io::{self, Read, Seek, SeekFrom};

use tracing::{info, warn};

use crate::hc::LZ4HC_CLEVEL_MAX;
use config::LZ4_MAX_DICT_SIZE;
use runner::{bench_c_level, bench_file_table};

/// Size of the generated sample used when no file is given.
pub const SYNTHETIC_SIZE: usize = 10_000_000;

fn synthetic_test(
    c_level: i32,
    c_level_last: i32,
    dict: &[u8],
    compressibility: f64,
    config: &BenchConfig,
) -> io::Result<Vec<BenchResult>> {
    let src = crate::datagen::gen_buffer(SYNTHETIC_SIZE, compressibility, 0);
    let name = format!("Synthetic {:2}%", (compressibility * 100.0).round() as u32);
    bench_c_level(&src, &name, c_level, c_level_last, config, dict, &[])
}

/// Read the trailing [`LZ4_MAX_DICT_SIZE`] bytes of `path`.
pub fn load_dict_file(path: &str) -> io::Result<Vec<u8>> {
    let mut f = fs::File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Dictionary error : could not open {path}: {e}"))
    })?;
    let size = f.metadata()?.len();
    if size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Dictionary error : {path} is empty"),
        ));
    }
    let keep = size.min(LZ4_MAX_DICT_SIZE as u64);
    f.seek(SeekFrom::Start(size - keep))?;
    let mut buf = vec![0u8; keep as usize];
    f.read_exact(&mut buf).map_err(|e| {
        io::Error::new(e.kind(), format!("Dictionary error : could not read {path}: {e}"))
    })?;
    Ok(buf)
}

/// Benchmark compression and decompression across one or more files.
///
/// - `file_names`: files to benchmark. An empty slice benchmarks
///   [`SYNTHETIC_SIZE`] generated bytes with the given `compressibility`.
/// - `c_level` / `c_level_last`: inclusive level range, both capped at
///   [`LZ4HC_CLEVEL_MAX`]. A reversed range runs `c_level` only.
/// - `dict_file`: optional dictionary; only its last 64 KiB are used.
///
/// # Errors
/// Returns `Err` if a file or the dictionary cannot be read, or if any
/// benchmark pass fails its round-trip check.
pub fn bench_files(
    file_names: &[&str],
    c_level: i32,
    c_level_last: i32,
    dict_file: Option<&str>,
    compressibility: f64,
    config: &BenchConfig,
) -> io::Result<Vec<BenchResult>> {
    let c_level = c_level.min(LZ4HC_CLEVEL_MAX);
    let c_level_last = c_level_last.min(LZ4HC_CLEVEL_MAX).max(c_level);
    if c_level_last > c_level {
        info!("Benchmarking levels from {} to {}", c_level, c_level_last);
    }

    let dict = match dict_file {
        Some(path) => load_dict_file(path)?,
        None => Vec::new(),
    };

    if file_names.is_empty() {
        return synthetic_test(c_level, c_level_last, &dict, compressibility, config);
    }
    if !config.bench_separately {
        return bench_file_table(file_names, c_level, c_level_last, &dict, config);
    }

    let mut results = Vec::new();
    let mut failed = false;
    for file_name in file_names {
        match bench_file_table(&[file_name], c_level, c_level_last, &dict, config) {
            Ok(r) => results.extend(r),
            Err(e) => {
                warn!(file = file_name, error = %e, "bench error");
                failed = true;
            }
        }
    }
    if failed {
        Err(io::Error::other("benchmark reported errors"))
    } else {
        Ok(results)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
