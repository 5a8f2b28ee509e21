//! Benchmark runner: file loading, memory estimation, and compression-level sweeps.
//!
//! 1. **Memory estimation** ([`find_max_mem`]): the largest input buffer the
//!    process should allocate for benchmark data.
//! 2. **File loading** ([`load_files`]): reads one or more files into a single
//!    contiguous buffer, capped by that limit.
//! 3. **Level sweep** ([`bench_c_level`], [`bench_file_table`]): runs
//!    [`bench_mem`] for every compression level in a requested range,
//!    with fresh codec state per level.

use std::fs;
use std::io::{self, Read};

use tracing::{debug, warn};

use super::bench_mem::{bench_mem, BenchResult};
use super::compress_strategy::build_compression_strategy;
use super::config::{BenchConfig, MAX_MEMORY};
use crate::block::LZ4_MAX_INPUT_SIZE;

// ── Memory probe ──────────────────────────────────────────────────────────────

/// Estimate the maximum usable buffer size for `required_mem` bytes of
/// benchmark data.
///
/// Rounds up to the next 64 MiB boundary plus two blocks of headroom, caps at
/// [`MAX_MEMORY`], then gives back two 64 MiB steps for the compressed and
/// decompressed copies.
fn find_max_mem(required_mem: u64) -> usize {
    const STEP: u64 = 64 * 1024 * 1024;

    let mut mem = ((required_mem >> 26) + 1) << 26;
    mem = mem.saturating_add(2 * STEP).min(MAX_MEMORY as u64);

    for _ in 0..2 {
        if mem > STEP {
            mem -= STEP;
        } else {
            mem >>= 1;
        }
    }
    mem as usize
}

// ── Level iteration ───────────────────────────────────────────────────────────

/// Benchmark one in-memory buffer at every level in `c_level..=c_level_last`.
///
/// Only the basename of `display_name` is shown. `file_sizes` holds the
/// per-file byte counts within `src`; empty means a single file.
pub fn bench_c_level(
    src: &[u8],
    display_name: &str,
    c_level: i32,
    c_level_last: i32,
    config: &BenchConfig,
    dict: &[u8],
    file_sizes: &[usize],
) -> io::Result<Vec<BenchResult>> {
    let display_name = display_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(display_name);

    if config.display_level == 1 {
        eprintln!(
            "bench {}: input {} bytes, {} seconds, {} KB blocks{}",
            crate::LZ4_VERSION_STRING,
            src.len(),
            config.nb_seconds,
            config.block_size >> 10,
            if config.linked_blocks { ", linked" } else { "" },
        );
    }

    let c_level_last = c_level_last.max(c_level);
    let mut results = Vec::new();
    let mut failures = 0usize;
    for l in c_level..=c_level_last {
        let mut strategy = build_compression_strategy(l, dict, config);
        match bench_mem(src, display_name, config, l, &mut *strategy, dict, file_sizes) {
            Ok(r) => results.push(r),
            Err(e) => {
                warn!(level = l, error = %e, "benchmark pass failed");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        Err(io::Error::other(format!("{failures} benchmark pass(es) failed")))
    } else {
        Ok(results)
    }
}

// ── File loading ──────────────────────────────────────────────────────────────

/// Load multiple files into a single contiguous buffer of at most
/// `buffer_size` bytes.
///
/// When the buffer fills up the current file is truncated and later paths
/// are not read. Directories are skipped.
///
/// Returns `(buffer, file_sizes)` where `file_sizes[i]` is the number of
/// bytes loaded for `paths[i]`.
///
/// # Errors
/// Returns `Err` if any file cannot be opened or read, or if nothing was
/// loaded.
pub fn load_files(paths: &[&str], buffer_size: usize) -> io::Result<(Vec<u8>, Vec<usize>)> {
    let mut buffer = vec![0u8; buffer_size];
    let mut file_sizes = vec![0usize; paths.len()];
    let mut pos = 0usize;

    for (n, path) in paths.iter().enumerate() {
        if pos == buffer_size {
            break;
        }
        let meta = fs::metadata(path)
            .map_err(|e| io::Error::new(e.kind(), format!("cannot stat {path}: {e}")))?;
        if meta.is_dir() {
            debug!(path, "ignoring directory");
            continue;
        }

        let to_read = (meta.len() as usize).min(buffer_size - pos);
        let mut f = fs::File::open(path)
            .map_err(|e| io::Error::new(e.kind(), format!("impossible to open file {path}: {e}")))?;
        f.read_exact(&mut buffer[pos..pos + to_read])
            .map_err(|e| io::Error::new(e.kind(), format!("could not read {path}: {e}")))?;

        pos += to_read;
        file_sizes[n] = to_read;
    }

    if pos == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no data to bench"));
    }

    buffer.truncate(pos);
    Ok((buffer, file_sizes))
}

// ── File table benchmark ──────────────────────────────────────────────────────

/// Load `file_names` as one dataset and sweep `c_level..=c_level_last`
/// over it.
pub fn bench_file_table(
    file_names: &[&str],
    c_level: i32,
    c_level_last: i32,
    dict: &[u8],
    config: &BenchConfig,
) -> io::Result<Vec<BenchResult>> {
    let total_size_to_load: u64 = file_names
        .iter()
        .filter_map(|p| fs::metadata(p).ok())
        .filter(|m| !m.is_dir())
        .map(|m| m.len())
        .sum();

    // Input, compressed and decompressed copies all live at once.
    let mut benched_size = find_max_mem(total_size_to_load.saturating_mul(3)) / 3;
    if benched_size == 0 {
        return Err(io::Error::other("not enough memory"));
    }
    benched_size = benched_size.min(total_size_to_load as usize);
    if benched_size > LZ4_MAX_INPUT_SIZE {
        benched_size = LZ4_MAX_INPUT_SIZE;
        warn!(
            "File(s) bigger than LZ4's max input size; testing {} MB only...",
            benched_size >> 20
        );
    } else if (benched_size as u64) < total_size_to_load {
        warn!("Not enough memory; testing {} MB only...", benched_size >> 20);
    }

    let (src_buffer, file_sizes) = load_files(file_names, benched_size)?;

    let display_name = match file_names {
        [single] => single.to_string(),
        _ => format!(" {} files", file_names.len()),
    };

    bench_c_level(
        &src_buffer,
        &display_name,
        c_level,
        c_level_last,
        config,
        dict,
        &file_sizes,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
