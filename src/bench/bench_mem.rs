//! Core benchmark timing loop.
//!
//! The input is cut into blocks (per file, so no block straddles two files),
//! every block is compressed with the chosen [`CompressionStrategy`] and
//! decoded again, and the whole round trip is checked with XXH64. Timing
//! loops adapt their iteration count so each pass lasts about one second.

use std::io;
use std::time::Instant;

use xxhash_rust::xxh64::xxh64;

use super::compress_strategy::CompressionStrategy;
use super::config::{BenchConfig, MB, TIMELOOP_NANOSEC};

use crate::block::{compress_bound, decompress_safe_using_dict, Lz4StreamDecode};

// ── Internal block descriptor ─────────────────────────────────────────────────

/// Per-block buffers, allocated up front so the timing loop never allocates.
struct BlockParam {
    src_offset: usize,
    src_size: usize,
    /// Blocks that start a file (or every block when blocks are unlinked).
    starts_sequence: bool,
    c_buf: Vec<u8>,
    c_size: usize,
    res_buf: Vec<u8>,
    res_size: usize,
}

/// Result of one [`bench_mem`] run.
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub src_size: usize,
    pub compressed_size: usize,
    /// `src_size / compressed_size`.
    pub ratio: f64,
    /// Fastest observed compression throughput in MB/s.
    pub compress_speed_mb_s: f64,
    /// Fastest observed decompression throughput in MB/s.
    pub decompress_speed_mb_s: f64,
    pub c_level: i32,
}

fn build_block_table(
    src: &[u8],
    block_size: usize,
    file_sizes: &[usize],
    linked: bool,
) -> Vec<BlockParam> {
    let single = [src.len()];
    let sizes: &[usize] = if file_sizes.is_empty() { &single } else { file_sizes };

    let mut table = Vec::with_capacity(src.len() / block_size + sizes.len());
    let mut offset = 0usize;
    for &file_size in sizes {
        let mut remaining = file_size;
        let mut first = true;
        while remaining > 0 || (first && file_size == 0 && sizes.len() == 1) {
            let size = remaining.min(block_size);
            table.push(BlockParam {
                src_offset: offset,
                src_size: size,
                starts_sequence: first || !linked,
                c_buf: vec![0u8; compress_bound(size)],
                c_size: 0,
                res_buf: vec![0u8; size],
                res_size: 0,
            });
            offset += size;
            remaining -= size;
            first = false;
        }
    }
    table
}

fn speed_mb_s(bytes: usize, ns: u64) -> f64 {
    if ns == 0 || ns == u64::MAX {
        0.0
    } else {
        bytes as f64 / ns as f64 * 1000.0
    }
}

/// Benchmark compression and decompression of `src`.
///
/// - `c_level` is only displayed; the `strategy` was built for it.
/// - `dict` must be the dictionary the strategy was built with (empty for
///   none); decoding uses it.
/// - `file_sizes` lists the files concatenated in `src`; empty means one.
///
/// # Errors
/// Returns `Err` if a block fails to compress or decode, or if the
/// decompressed data does not hash to the same XXH64 as `src`.
pub fn bench_mem(
    src: &[u8],
    display_name: &str,
    config: &BenchConfig,
    c_level: i32,
    strategy: &mut dyn CompressionStrategy,
    dict: &[u8],
    file_sizes: &[usize],
) -> io::Result<BenchResult> {
    let src_size = src.len();
    let block_size = if config.block_size >= 32 {
        config.block_size
    } else {
        src_size.max(1)
    };
    let mut block_table = build_block_table(src, block_size, file_sizes, config.linked_blocks);

    let display_name = match display_name.char_indices().rev().nth(16) {
        Some((i, _)) => &display_name[i..],
        None => display_name,
    };

    let crc_orig = xxh64(src, 0);
    let max_time_ns = config.nb_seconds as u64 * TIMELOOP_NANOSEC;
    let (mut nb_compression_loops, mut nb_decode_loops) = if config.nb_seconds == 0 {
        (1u32, 1u32)
    } else {
        (
            ((5 * MB) / (src_size + 1)) as u32 + 1,
            ((200 * MB) / (src_size + 1)) as u32 + 1,
        )
    };
    let mut fastest_c_ns = u64::MAX;
    let mut fastest_d_ns = u64::MAX;
    let mut total_c_ns = 0u64;
    let mut total_d_ns = 0u64;
    let mut c_size: usize;
    let mut decoder = Lz4StreamDecode::new();

    const MARKS: [&str; 4] = [" |", " /", " =", "\\"];
    let mut mark_nb = 0usize;

    loop {
        // ── compression ───────────────────────────────────────────────────────
        if config.display_level >= 2 {
            eprint!("{}-{:<17.17} :{:>10} ->\r", MARKS[mark_nb], display_name, src_size);
        }
        let start = Instant::now();
        for _ in 0..nb_compression_loops {
            for block in &mut block_table {
                if block.starts_sequence {
                    strategy.reset();
                }
                let input = &src[block.src_offset..block.src_offset + block.src_size];
                block.c_size = strategy.compress_block(input, &mut block.c_buf).map_err(|e| {
                    io::Error::other(format!(
                        "compression failed on block at offset {}: {e}",
                        block.src_offset
                    ))
                })?;
            }
        }
        let elapsed = start.elapsed().as_nanos() as u64;
        fastest_c_ns = fastest_c_ns.min(elapsed / nb_compression_loops as u64);
        nb_compression_loops = (TIMELOOP_NANOSEC / fastest_c_ns.max(1)) as u32 + 1;
        total_c_ns += elapsed;

        c_size = block_table.iter().map(|b| b.c_size).sum::<usize>().max(1);
        let ratio = src_size as f64 / c_size as f64;
        mark_nb = (mark_nb + 1) % MARKS.len();

        // ── decompression ─────────────────────────────────────────────────────
        let start = Instant::now();
        for _ in 0..nb_decode_loops {
            for block in &mut block_table {
                let c = &block.c_buf[..block.c_size];
                let decoded = if config.linked_blocks {
                    if block.starts_sequence {
                        decoder.set_dict(dict);
                    }
                    decoder.decompress_safe_continue(c, &mut block.res_buf)
                } else {
                    decompress_safe_using_dict(c, &mut block.res_buf, dict)
                };
                block.res_size = decoded.map_err(|e| {
                    io::Error::other(format!(
                        "decompression failed on block at offset {} of size {}: {e}",
                        block.src_offset, block.src_size
                    ))
                })?;
            }
        }
        let elapsed = start.elapsed().as_nanos() as u64;
        fastest_d_ns = fastest_d_ns.min(elapsed / nb_decode_loops as u64);
        nb_decode_loops = (TIMELOOP_NANOSEC / fastest_d_ns.max(1)) as u32 + 1;
        total_d_ns += elapsed;

        if config.display_level >= 2 {
            eprint!(
                "{}-{:<17.17} :{:>10} ->{:>10} ({:5.3}),{:6.1} MB/s ,{:6.1} MB/s\r",
                MARKS[mark_nb],
                display_name,
                src_size,
                c_size,
                ratio,
                speed_mb_s(src_size, fastest_c_ns),
                speed_mb_s(src_size, fastest_d_ns),
            );
        }

        // ── checksum ──────────────────────────────────────────────────────────
        let mut hasher = xxhash_rust::xxh64::Xxh64::new(0);
        for block in &block_table {
            hasher.update(&block.res_buf[..block.res_size]);
        }
        let crc_check = hasher.digest();
        if crc_orig != crc_check {
            let first_diff = block_table.iter().find_map(|b| {
                let expected = &src[b.src_offset..b.src_offset + b.src_size];
                let got = &b.res_buf[..b.res_size];
                expected
                    .iter()
                    .zip(got)
                    .position(|(x, y)| x != y)
                    .or((expected.len() != got.len()).then(|| expected.len().min(got.len())))
                    .map(|d| b.src_offset + d)
            });
            return Err(io::Error::other(format!(
                "{display_name}: invalid checksum {crc_orig:x} != {crc_check:x}, first difference at {:?}",
                first_diff
            )));
        }

        if total_c_ns >= max_time_ns && total_d_ns >= max_time_ns {
            break;
        }
    }

    let ratio = src_size as f64 / c_size as f64;
    let compress_speed_mb_s = speed_mb_s(src_size, fastest_c_ns);
    let decompress_speed_mb_s = speed_mb_s(src_size, fastest_d_ns);

    if config.display_level >= 2 {
        eprintln!("{:2}#", c_level);
    }
    if config.display_level == 1 {
        println!(
            "-{:<3}{:>11} ({:5.3}) {:6.2} MB/s {:6.1} MB/s  {}",
            c_level, c_size, ratio, compress_speed_mb_s, decompress_speed_mb_s, display_name,
        );
    }

    Ok(BenchResult {
        src_size,
        compressed_size: c_size,
        ratio,
        compress_speed_mb_s,
        decompress_speed_mb_s,
        c_level,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
