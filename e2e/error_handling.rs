//! E2E Test Suite 04: Error Handling & Edge Cases
//!
//! Every failure the codec can hit must come back as an `Lz4Error`, never a
//! panic or an out-of-bounds write.
//!
//! Coverage:
//! - Undersized destinations on both sides
//! - Corrupt and truncated blocks
//! - Out-of-range parameters (acceleration, level, input size)
//! - Partial decompression limits
//! - Stream contexts after a failure

use lz4::block::{compress_block_to_vec, decompress_block_to_vec, LZ4_MAX_INPUT_SIZE};
use lz4::datagen::gen_buffer;
use lz4::{
    compress_bound, compress_fast, compress_hc, decompress_safe_partial, lz4_compress_default,
    lz4_decompress_safe, Lz4Error, Lz4Stream, Lz4StreamDecode, Lz4StreamHc,
};

// ═════════════════════════════════════════════════════════════════════════════
// Test 1: destination too small
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_decompress_dst_too_small() {
    let src = b"Hello, this is a test message for LZ4 compression!";
    let mut compressed = vec![0u8; compress_bound(src.len())];
    let n = lz4_compress_default(src, &mut compressed).expect("compression should succeed");

    let mut dst = [0u8; 10];
    assert_eq!(
        lz4_decompress_safe(&compressed[..n], &mut dst),
        Err(Lz4Error::OutputTooSmall)
    );
}

#[test]
fn test_compress_dst_empty() {
    let mut dst: Vec<u8> = vec![];
    assert_eq!(
        lz4_compress_default(b"Some data to compress", &mut dst),
        Err(Lz4Error::OutputTooSmall)
    );
}

#[test]
fn test_compress_dst_too_small() {
    let src = b"This is a longer message that needs more space when compressed with metadata";
    let mut dst = [0u8; 5];
    assert_eq!(lz4_compress_default(src, &mut dst), Err(Lz4Error::OutputTooSmall));

    let mut dst = [0u8; 5];
    assert_eq!(compress_hc(src, &mut dst, 9), Err(Lz4Error::OutputTooSmall));
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 2: corrupt data
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_decompress_corrupt_data() {
    let garbage = b"\xDE\xAD\xBE\xEF\xCA\xFE\xBA\xBE\x00\x11\x22\x33\x44\x55\x66\x77";
    let mut dst = vec![0u8; 1024];
    assert!(matches!(
        lz4_decompress_safe(garbage, &mut dst),
        Err(Lz4Error::MalformedInput { .. })
    ));
}

#[test]
fn test_decompress_empty_input() {
    let mut dst = vec![0u8; 16];
    assert_eq!(
        lz4_decompress_safe(&[], &mut dst),
        Err(Lz4Error::MalformedInput { position: 0 })
    );
}

#[test]
fn test_bit_flips_never_panic() {
    let src = gen_buffer(4_096, 0.6, 31);
    let block = compress_block_to_vec(&src, 1).unwrap();
    for i in 0..block.len() {
        for bit in [0x01u8, 0x10, 0x80] {
            let mut bad = block.clone();
            bad[i] ^= bit;
            let mut out = vec![0u8; src.len()];
            let _ = lz4_decompress_safe(&bad, &mut out);
            let _ = decompress_safe_partial(&bad, &mut out, 1_000);
        }
    }
}

#[test]
fn test_truncated_block_fails() {
    let src = gen_buffer(10_000, 0.5, 32);
    let block = compress_block_to_vec(&src, 1).unwrap();
    for cut in [1, block.len() / 3, block.len() / 2, block.len() - 1] {
        // A cut can land right after a literal run, which is a shorter valid
        // block; it must never reproduce the full input.
        if let Ok(v) = decompress_block_to_vec(&block[..cut], src.len()) {
            assert!(v.len() < src.len(), "cut {cut}");
        }
    }
    assert!(decompress_block_to_vec(&block[..block.len() - 1], src.len()).is_err());
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 3: out-of-range parameters are clamped
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_compress_fast_out_of_range_acceleration() {
    let src = b"Test data for compression, test data for compression";
    for acceleration in [i32::MIN, -5, 0, 1 << 20, i32::MAX] {
        let mut dst = vec![0u8; compress_bound(src.len())];
        let n = compress_fast(src, &mut dst, acceleration).expect("acceleration is clamped");
        let mut out = vec![0u8; src.len()];
        assert_eq!(lz4_decompress_safe(&dst[..n], &mut out), Ok(src.len()));
    }
}

#[test]
fn test_hc_out_of_range_level() {
    let src = gen_buffer(20_000, 0.5, 33);
    for level in [i32::MIN, 0, 2, 13, i32::MAX] {
        let mut dst = vec![0u8; compress_bound(src.len())];
        let n = compress_hc(&src, &mut dst, level).expect("level is clamped");
        assert_eq!(decompress_block_to_vec(&dst[..n], src.len()).unwrap(), src);
    }
}

#[test]
fn test_max_input_size_constant() {
    assert_eq!(LZ4_MAX_INPUT_SIZE, 0x7E00_0000);
    assert_eq!(compress_bound(LZ4_MAX_INPUT_SIZE + 1), 0);
    assert!(compress_bound(LZ4_MAX_INPUT_SIZE) > LZ4_MAX_INPUT_SIZE);
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 4: partial decompression limits
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_decompress_partial_target_exceeds_dst() {
    let src = b"Partial decompression test data";
    let block = compress_block_to_vec(src, 1).unwrap();
    let mut dst = [0u8; 10];
    assert_eq!(decompress_safe_partial(&block, &mut dst, 20), Ok(10));
    assert_eq!(&dst, &src[..10]);
}

#[test]
fn test_decompress_partial_zero_target() {
    let block = compress_block_to_vec(b"Test", 1).unwrap();
    let mut dst = [0u8; 100];
    assert_eq!(decompress_safe_partial(&block, &mut dst, 0), Ok(0));
}

#[test]
fn test_decompress_partial_target_larger_than_original() {
    let block = compress_block_to_vec(b"Short", 1).unwrap();
    let mut dst = [0u8; 1024];
    assert_eq!(decompress_safe_partial(&block, &mut dst, 1000), Ok(5));
    assert_eq!(&dst[..5], b"Short");
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 5: edge inputs
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_compress_empty_input() {
    let block = compress_block_to_vec(&[], 1).unwrap();
    assert_eq!(block, [0x00]);
    assert_eq!(decompress_block_to_vec(&block, 0).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_roundtrip_single_byte() {
    let block = compress_block_to_vec(b"X", 1).unwrap();
    assert_eq!(block, [0x10, b'X']);
    let mut out = [0u8; 100];
    assert_eq!(lz4_decompress_safe(&block, &mut out), Ok(1));
    assert_eq!(out[0], b'X');
}

#[test]
fn test_compress_large_repeated_data() {
    let src = vec![b'A'; 10_000];
    let block = compress_block_to_vec(&src, 1).unwrap();
    assert!(block.len() < 100, "got {}", block.len());
    assert_eq!(decompress_block_to_vec(&block, src.len()).unwrap(), src);
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 6: streams after failure
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_fast_stream_refuses_work_until_reset() {
    let src = gen_buffer(5_000, 0.3, 34);
    let mut enc = Lz4Stream::new();
    let mut tiny = [0u8; 4];
    assert_eq!(enc.compress_fast_continue(&src, &mut tiny, 1), Err(Lz4Error::OutputTooSmall));
    let mut dst = vec![0u8; compress_bound(src.len())];
    assert_eq!(
        enc.compress_fast_continue(&src, &mut dst, 1),
        Err(Lz4Error::InvalidContextState)
    );
    enc.reset();
    assert!(enc.compress_fast_continue(&src, &mut dst, 1).is_ok());
}

#[test]
fn test_hc_stream_refuses_work_until_reset() {
    let src = gen_buffer(5_000, 0.3, 35);
    let mut enc = Lz4StreamHc::new(9);
    let mut tiny = [0u8; 4];
    assert_eq!(enc.compress_continue(&src, &mut tiny), Err(Lz4Error::OutputTooSmall));
    assert!(enc.is_corrupted());
    let mut dst = vec![0u8; compress_bound(src.len())];
    assert_eq!(enc.compress_continue(&src, &mut dst), Err(Lz4Error::InvalidContextState));
    enc.reset(9);
    assert!(enc.compress_continue(&src, &mut dst).is_ok());
}

#[test]
fn test_stream_decoder_after_corrupt_block() {
    let src = gen_buffer(5_000, 0.5, 36);
    let mut enc = Lz4Stream::new();
    let mut block = vec![0u8; compress_bound(src.len())];
    let n = enc.compress_fast_continue(&src, &mut block, 1).unwrap();

    let mut dec = Lz4StreamDecode::new();
    let mut out = vec![0u8; src.len()];
    // zero offset
    let bad = [0x10, b'a', 0x00, 0x00, 0x00];
    assert!(dec.decompress_safe_continue(&bad, &mut out).is_err());
    dec.reset();
    assert_eq!(dec.decompress_safe_continue(&block[..n], &mut out), Ok(src.len()));
    assert_eq!(out, src);
}
