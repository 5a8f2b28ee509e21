//! E2E Test Suite 03: HC API
//!
//! Tests the High Compression (HC) API for both one-shot and streaming modes.
//! HC blocks are plain LZ4 blocks, so every check decodes them with the
//! standard block decoder.

use lz4::block::{decompress_safe_partial, decompress_safe_using_dict, Lz4StreamDecode};
use lz4::datagen::gen_buffer;
use lz4::hc::{
    compress_hc_with_state, HcContext, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN,
};
use lz4::{
    compress_bound, compress_hc, compress_hc_dest_size, lz4_compress_default,
    lz4_decompress_safe, Lz4StreamHc,
};

fn hc_roundtrip(original: &[u8], level: i32) -> usize {
    let mut compressed = vec![0u8; compress_bound(original.len())];
    let n = compress_hc(original, &mut compressed, level).expect("HC compression failed");
    let mut restored = vec![0u8; original.len()];
    assert_eq!(lz4_decompress_safe(&compressed[..n], &mut restored), Ok(original.len()));
    assert_eq!(restored, original, "level {level}");
    n
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: every level roundtrips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_all_levels_roundtrip() {
    let data = gen_buffer(200_000, 0.5, 21);
    for level in -1..=14 {
        hc_roundtrip(&data, level);
    }
}

#[test]
fn test_hc_small_inputs() {
    let text = b"Hello LZ4 HC! ".repeat(150);
    for len in [0, 1, 12, 13, 64, 1_000, text.len()] {
        hc_roundtrip(&text[..len], LZ4HC_CLEVEL_DEFAULT);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: ratio against the fast encoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_beats_fast_encoder() {
    let data = gen_buffer(512 * 1024, 0.6, 22);
    let mut fast = vec![0u8; compress_bound(data.len())];
    let fast_size = lz4_compress_default(&data, &mut fast).unwrap();

    let min = hc_roundtrip(&data, LZ4HC_CLEVEL_MIN);
    let def = hc_roundtrip(&data, LZ4HC_CLEVEL_DEFAULT);
    let max = hc_roundtrip(&data, LZ4HC_CLEVEL_MAX);
    assert!(min <= fast_size, "min {min} vs fast {fast_size}");
    assert!(def <= min + min / 100, "default {def} vs min {min}");
    assert!(max <= def + def / 100, "max {max} vs default {def}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: reusable state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_state_reuse_is_deterministic() {
    let a = gen_buffer(100_000, 0.5, 23);
    let b = gen_buffer(100_000, 0.5, 24);
    let mut state = Box::new(HcContext::new());

    let mut first = vec![0u8; compress_bound(a.len())];
    let n1 = compress_hc_with_state(&mut state, &a, &mut first, 9).unwrap();
    let mut other = vec![0u8; compress_bound(b.len())];
    compress_hc_with_state(&mut state, &b, &mut other, 9).unwrap();
    let mut again = vec![0u8; compress_bound(a.len())];
    let n2 = compress_hc_with_state(&mut state, &a, &mut again, 9).unwrap();

    assert_eq!(first[..n1], again[..n2]);
    let mut fresh = vec![0u8; compress_bound(a.len())];
    let n3 = compress_hc(&a, &mut fresh, 9).unwrap();
    assert_eq!(first[..n1], fresh[..n3]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: fixed output budget
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_dest_size_fills_budget() {
    let data = gen_buffer(128 * 1024, 0.6, 25);
    for budget in [64usize, 1_000, 16 * 1024] {
        let mut dst = vec![0u8; budget];
        let (consumed, written) = compress_hc_dest_size(&data, &mut dst, 10).unwrap();
        assert!(written <= budget);
        assert!(consumed > 0 && consumed < data.len());
        let mut out = vec![0u8; consumed];
        assert_eq!(lz4_decompress_safe(&dst[..written], &mut out), Ok(consumed));
        assert_eq!(out, data[..consumed]);

        let mut head = vec![0u8; consumed.min(50)];
        let want = head.len();
        assert_eq!(decompress_safe_partial(&dst[..written], &mut head, want), Ok(want));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: streaming
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_stream_roundtrip_with_level_changes() {
    let data = gen_buffer(300_000, 0.6, 26);
    let mut enc = Lz4StreamHc::new(LZ4HC_CLEVEL_MIN);
    let mut dec = Lz4StreamDecode::new();
    let mut restored = Vec::new();
    for (i, chunk) in data.chunks(16 * 1024).enumerate() {
        enc.set_level(LZ4HC_CLEVEL_MIN + (i as i32 % 10));
        let mut c = vec![0u8; compress_bound(chunk.len())];
        let n = enc.compress_continue(chunk, &mut c).unwrap();
        let mut out = vec![0u8; chunk.len()];
        assert_eq!(dec.decompress_safe_continue(&c[..n], &mut out), Ok(chunk.len()));
        restored.extend_from_slice(&out);
    }
    assert_eq!(restored, data);
}

#[test]
fn test_hc_stream_with_dictionary() {
    let dict = gen_buffer(64 * 1024, 0.5, 27);
    let src: Vec<u8> = dict[10_000..30_000].to_vec();

    let mut enc = Lz4StreamHc::new(LZ4HC_CLEVEL_DEFAULT);
    assert_eq!(enc.load_dict(&dict), dict.len());
    let mut c = vec![0u8; compress_bound(src.len())];
    let n = enc.compress_continue(&src, &mut c).unwrap();
    assert!(n < 500, "dictionary copy should be tiny, got {n}");

    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress_safe_using_dict(&c[..n], &mut out, &dict), Ok(src.len()));
    assert_eq!(out, src);
}

#[test]
fn test_hc_stream_dest_size_then_continue() {
    let data = gen_buffer(100_000, 0.6, 28);
    let mut enc = Lz4StreamHc::new(9);
    let mut dec = Lz4StreamDecode::new();

    let mut page = vec![0u8; 2_048];
    let (consumed, written) = enc.compress_continue_dest_size(&data, &mut page).unwrap();
    let mut out = vec![0u8; consumed];
    assert_eq!(dec.decompress_safe_continue(&page[..written], &mut out), Ok(consumed));
    assert_eq!(out, data[..consumed]);

    let rest = &data[consumed..];
    let mut c = vec![0u8; compress_bound(rest.len())];
    let n = enc.compress_continue(rest, &mut c).unwrap();
    let mut out = vec![0u8; rest.len()];
    assert_eq!(dec.decompress_safe_continue(&c[..n], &mut out), Ok(rest.len()));
    assert_eq!(out, rest);
}

#[test]
fn test_hc_stream_save_dict_and_reset() {
    let data = gen_buffer(90_000, 0.6, 29);
    let (a, b) = data.split_at(50_000);
    let mut enc = Lz4StreamHc::new(9);
    let mut c = vec![0u8; compress_bound(data.len())];
    enc.compress_continue(a, &mut c).unwrap();

    let mut saved = vec![0u8; 32 * 1024];
    assert_eq!(enc.save_dict(&mut saved), saved.len());
    let n = enc.compress_continue(b, &mut c).unwrap();
    let mut out = vec![0u8; b.len()];
    assert_eq!(decompress_safe_using_dict(&c[..n], &mut out, &saved), Ok(b.len()));
    assert_eq!(out, b);

    enc.reset_fast(12);
    assert_eq!(enc.level(), 12);
    assert_eq!(enc.history_len(), 0);
    let n = enc.compress_continue(b, &mut c).unwrap();
    assert_eq!(lz4_decompress_safe(&c[..n], &mut out), Ok(b.len()));
    assert_eq!(out, b);
}
