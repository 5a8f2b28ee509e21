// Integration tests for `bench_mem`, the single-buffer benchmark pass.

use lz4::bench::bench_mem::bench_mem;
use lz4::bench::compress_strategy::build_compression_strategy;
use lz4::bench::config::BenchConfig;
use lz4::datagen::gen_buffer;

fn quiet_config() -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_nb_seconds(0).set_notification_level(0);
    c
}

#[test]
fn reports_sizes_and_ratio() {
    let src = gen_buffer(300_000, 0.7, 21);
    let config = quiet_config();
    let mut strategy = build_compression_strategy(1, &[], &config);
    let r = bench_mem(&src, "sample", &config, 1, strategy.as_mut(), &[], &[]).unwrap();
    assert_eq!(r.src_size, src.len());
    assert_eq!(r.c_level, 1);
    assert!(r.compressed_size < src.len());
    let ratio = src.len() as f64 / r.compressed_size as f64;
    assert!((r.ratio - ratio).abs() < 1e-9);
}

#[test]
fn small_blocks_cost_ratio() {
    let src = gen_buffer(300_000, 0.7, 22);
    let mut small = quiet_config();
    small.set_block_size(1024);
    let mut large = quiet_config();
    large.set_block_size(256 * 1024);

    let mut s = build_compression_strategy(1, &[], &small);
    let r_small = bench_mem(&src, "small", &small, 1, s.as_mut(), &[], &[]).unwrap();
    let mut s = build_compression_strategy(1, &[], &large);
    let r_large = bench_mem(&src, "large", &large, 1, s.as_mut(), &[], &[]).unwrap();
    assert!(r_small.compressed_size > r_large.compressed_size);
}

#[test]
fn linked_blocks_recover_ratio() {
    let src = gen_buffer(300_000, 0.7, 23);
    let mut independent = quiet_config();
    independent.set_block_size(1024);
    let mut linked = quiet_config();
    linked.set_block_size(1024).set_linked_blocks(true);

    let mut s = build_compression_strategy(1, &[], &independent);
    let r_ind = bench_mem(&src, "ind", &independent, 1, s.as_mut(), &[], &[]).unwrap();
    let mut s = build_compression_strategy(1, &[], &linked);
    let r_lnk = bench_mem(&src, "lnk", &linked, 1, s.as_mut(), &[], &[]).unwrap();
    assert!(r_lnk.compressed_size < r_ind.compressed_size);
}

#[test]
fn file_boundaries_split_blocks() {
    let src = gen_buffer(50_000, 0.5, 24);
    let config = quiet_config();
    let mut s = build_compression_strategy(9, &[], &config);
    let r = bench_mem(&src, "a/very/long/path/to/two_files.bin", &config, 9, s.as_mut(), &[], &[20_000, 30_000])
        .unwrap();
    assert_eq!(r.src_size, 50_000);
}

#[test]
fn empty_source() {
    let config = quiet_config();
    let mut s = build_compression_strategy(1, &[], &config);
    let r = bench_mem(&[], "empty", &config, 1, s.as_mut(), &[], &[]).unwrap();
    assert_eq!(r.src_size, 0);
}
