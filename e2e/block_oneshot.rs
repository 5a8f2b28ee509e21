//! E2E Test Suite 01: Block one-shot API
//!
//! Compresses assorted data shapes through the crate-root entry points and
//! checks that the standard decoder restores them, that output sizes respect
//! `compress_bound`, and that known inputs produce the reference encoding.

use lz4::datagen::gen_buffer;
use lz4::{
    compress_bound, compress_dest_size, compress_fast, decompress_safe, decompress_safe_partial,
    lz4_compress_default, lz4_decompress_safe,
};

fn roundtrip(original: &[u8]) -> Vec<u8> {
    let mut compressed = vec![0u8; compress_bound(original.len())];
    let n = lz4_compress_default(original, &mut compressed).expect("compression failed");
    assert!(n <= compress_bound(original.len()));
    compressed.truncate(n);

    let mut restored = vec![0u8; original.len()];
    let d = lz4_decompress_safe(&compressed, &mut restored).expect("decompression failed");
    assert_eq!(d, original.len());
    assert_eq!(restored, original);
    compressed
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: reference encoding of a short run
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reference_encoding_of_run() {
    let compressed = roundtrip(&[b'a'; 20]);
    // literal 'a', match offset 1 length 14, then five literals
    assert_eq!(
        compressed,
        [0x1A, b'a', 0x01, 0x00, 0x50, b'a', b'a', b'a', b'a', b'a']
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: data shapes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_text_roundtrip() {
    let text = b"It is a truth universally acknowledged, that a single man in \
        possession of a good fortune, must be in want of a wife. "
        .repeat(200);
    let c = roundtrip(&text);
    assert!(c.len() < text.len() / 10);
}

#[test]
fn test_zeros_roundtrip() {
    let zeros = vec![0u8; 1 << 20];
    let c = roundtrip(&zeros);
    assert!(c.len() < 5_000);
}

#[test]
fn test_binary_pattern_roundtrip() {
    let data: Vec<u8> = (0..500_000u32).flat_map(|i| (i / 3).to_le_bytes()).collect();
    roundtrip(&data);
}

#[test]
fn test_synthetic_compressibility_levels() {
    for proba in [0.0, 0.25, 0.5, 0.75, 1.0] {
        roundtrip(&gen_buffer(256 * 1024, proba, 1));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: boundary sizes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boundary_sizes() {
    let base = gen_buffer(70_000, 0.5, 2);
    for len in [0, 1, 4, 12, 13, 14, 255, 256, 4096, 65_535, 65_536, 65_547, 65_548, 70_000] {
        roundtrip(&base[..len]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: acceleration trade-off
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_acceleration_sweep() {
    let src = gen_buffer(1 << 20, 0.5, 3);
    let mut prev = 0usize;
    for acceleration in [1, 4, 16, 256] {
        let mut c = vec![0u8; compress_bound(src.len())];
        let n = compress_fast(&src, &mut c, acceleration).unwrap();
        let mut out = vec![0u8; src.len()];
        assert_eq!(decompress_safe(&c[..n], &mut out), Ok(src.len()));
        assert!(n + n / 100 >= prev, "acceleration {acceleration}: {n} < {prev}");
        prev = n;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: fixed output budget and partial decode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fill_fixed_page_then_partial_decode() {
    let src = gen_buffer(64 * 1024, 0.6, 4);
    let mut page = [0u8; 4096];
    let (consumed, written) = compress_dest_size(&src, &mut page).unwrap();
    assert!(consumed > 4096, "a compressible page should hold more than its size");
    assert!(written <= page.len());

    let mut head = vec![0u8; 1000];
    assert_eq!(decompress_safe_partial(&page[..written], &mut head, 1000), Ok(1000));
    assert_eq!(head, src[..1000]);
}
