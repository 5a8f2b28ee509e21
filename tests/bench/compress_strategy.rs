// Integration tests for the compression strategies the benchmark drives.
//
// Each strategy must produce blocks the matching decoder restores, and
// `reset` must bring a strategy back to its starting point.

use lz4::bench::compress_strategy::{
    build_compression_strategy, CompressionStrategy, NoStreamFast, NoStreamHC, StreamFast,
    StreamHC,
};
use lz4::bench::config::BenchConfig;
use lz4::block::{decompress_safe, decompress_safe_using_dict, Lz4StreamDecode};
use lz4::datagen::gen_buffer;

fn run_linked(strategy: &mut dyn CompressionStrategy, data: &[u8], dict: &[u8]) {
    let mut dec = Lz4StreamDecode::new();
    dec.set_dict(dict);
    let mut dst = Vec::new();
    for chunk in data.chunks(16 * 1024) {
        let n = strategy.compress_block(chunk, &mut dst).unwrap();
        let mut out = vec![0u8; chunk.len()];
        assert_eq!(dec.decompress_safe_continue(&dst[..n], &mut out), Ok(chunk.len()));
        assert_eq!(out, chunk);
    }
}

#[test]
fn independent_strategies_give_standalone_blocks() {
    let data = gen_buffer(50_000, 0.5, 11);
    let strategies: Vec<Box<dyn CompressionStrategy>> = vec![
        Box::new(NoStreamFast::new(1, 1)),
        Box::new(NoStreamFast::new(-20, 1)),
        Box::new(NoStreamHC::new(9)),
    ];
    for mut s in strategies {
        let mut dst = Vec::new();
        let n = s.compress_block(&data, &mut dst).unwrap();
        let mut out = vec![0u8; data.len()];
        assert_eq!(decompress_safe(&dst[..n], &mut out), Ok(data.len()));
        assert_eq!(out, data);
    }
}

#[test]
fn streaming_strategies_link_blocks() {
    let data = gen_buffer(100_000, 0.6, 12);
    run_linked(&mut StreamFast::new(1, 1, &[]), &data, &[]);
    run_linked(&mut StreamHC::new(4, &[]), &data, &[]);
}

#[test]
fn dictionary_strategies_restore_dictionary_on_reset() {
    let dict = gen_buffer(32 * 1024, 0.5, 13);
    let data = dict[4_000..24_000].to_vec();
    for mut s in [
        Box::new(StreamFast::new(1, 1, &dict)) as Box<dyn CompressionStrategy>,
        Box::new(StreamHC::new(9, &dict)),
    ] {
        for _ in 0..2 {
            s.reset();
            let mut dst = Vec::new();
            let n = s.compress_block(&data, &mut dst).unwrap();
            assert!(n < data.len() / 10, "dictionary should be used, got {n}");
            let mut out = vec![0u8; data.len()];
            assert_eq!(decompress_safe_using_dict(&dst[..n], &mut out, &dict), Ok(data.len()));
            assert_eq!(out, data);
        }
    }
}

#[test]
fn factory_picks_encoder_by_level() {
    let data = gen_buffer(200_000, 0.5, 14);
    let config = BenchConfig::default();
    let mut fast = build_compression_strategy(1, &[], &config);
    let mut hc = build_compression_strategy(12, &[], &config);
    let mut a = Vec::new();
    let mut b = Vec::new();
    let nf = fast.compress_block(&data, &mut a).unwrap();
    let nh = hc.compress_block(&data, &mut b).unwrap();
    assert!(nh < nf, "HC {nh} vs fast {nf}");
}

#[test]
fn factory_uses_configured_acceleration() {
    let data = gen_buffer(200_000, 0.5, 15);
    let mut config = BenchConfig::default();
    let mut base = build_compression_strategy(1, &[], &config);
    config.set_acceleration(50);
    let mut accelerated = build_compression_strategy(1, &[], &config);
    let mut a = Vec::new();
    let mut b = Vec::new();
    let n1 = base.compress_block(&data, &mut a).unwrap();
    let n50 = accelerated.compress_block(&data, &mut b).unwrap();
    assert!(n50 > n1, "acceleration 50 gave {n50}, default gave {n1}");
}
