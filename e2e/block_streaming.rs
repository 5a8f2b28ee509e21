//! E2E Test Suite 02: Block streaming
//!
//! Drives `Lz4Stream` and `Lz4StreamDecode` the way a framing layer would:
//! fixed-size chunks, a ring of reused buffers, dictionary priming, saving
//! the window between batches, and many independent streams through one
//! context.

use lz4::block::{decompress_safe, decompress_safe_using_dict};
use lz4::datagen::gen_buffer;
use lz4::{compress_bound, Lz4Stream, Lz4StreamDecode};

fn encode_chunks(stream: &mut Lz4Stream, data: &[u8], chunk: usize) -> Vec<Vec<u8>> {
    data.chunks(chunk)
        .map(|piece| {
            let mut c = vec![0u8; compress_bound(piece.len())];
            let n = stream.compress_fast_continue(piece, &mut c, 1).unwrap();
            c.truncate(n);
            c
        })
        .collect()
}

fn decode_chunks(decoder: &mut Lz4StreamDecode, blocks: &[Vec<u8>], chunk: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    for block in blocks {
        let n = decoder.decompress_safe_continue(block, &mut buf).unwrap();
        out.extend_from_slice(&buf[..n]);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: chunk sizes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stream_various_chunk_sizes() {
    let data = gen_buffer(400_000, 0.6, 11);
    for (chunk, len) in [(1usize, 3_000usize), (100, 50_000), (4 * 1024, 400_000), (64 * 1024, 400_000), (100_000, 400_000)] {
        let input = &data[..len];
        let mut enc = Lz4Stream::new();
        let blocks = encode_chunks(&mut enc, input, chunk);
        let mut dec = Lz4StreamDecode::new();
        assert_eq!(decode_chunks(&mut dec, &blocks, chunk), input, "chunk {chunk}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: streaming beats independent blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_linked_smaller_than_independent() {
    let data = gen_buffer(256 * 1024, 0.7, 12);
    let mut enc = Lz4Stream::new();
    let linked: usize = encode_chunks(&mut enc, &data, 2_048).iter().map(Vec::len).sum();

    let independent: usize = data
        .chunks(2_048)
        .map(|piece| {
            let mut c = vec![0u8; compress_bound(piece.len())];
            lz4::compress_default(piece, &mut c).unwrap()
        })
        .sum();
    assert!(linked < independent, "linked {linked} vs independent {independent}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: dictionary primed stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_dictionary_stream() {
    let dict = gen_buffer(32 * 1024, 0.5, 13);
    let mut data = dict[..8_000].to_vec();
    data.extend_from_slice(&gen_buffer(40_000, 0.5, 14));

    let mut enc = Lz4Stream::new();
    enc.load_dict(&dict);
    let blocks = encode_chunks(&mut enc, &data, 8_000);

    let mut dec = Lz4StreamDecode::new();
    dec.set_dict(&dict);
    assert_eq!(decode_chunks(&mut dec, &blocks, 8_000), data);

    // The first block alone needs the dictionary.
    let mut out = vec![0u8; 8_000];
    assert!(decompress_safe(&blocks[0], &mut out).is_err());
    assert_eq!(decompress_safe_using_dict(&blocks[0], &mut out, &dict), Ok(8_000));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: save the window, keep going
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_save_dict_between_batches() {
    let data = gen_buffer(200_000, 0.6, 15);
    let (first, second) = data.split_at(120_000);

    let mut enc = Lz4Stream::new();
    let mut blocks = encode_chunks(&mut enc, first, 10_000);
    let mut window = vec![0u8; 64 * 1024];
    let saved = enc.save_dict(&mut window);
    assert_eq!(saved, 64 * 1024);
    blocks.extend(encode_chunks(&mut enc, second, 10_000));

    let mut dec = Lz4StreamDecode::new();
    assert_eq!(decode_chunks(&mut dec, &blocks, 10_000), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: one context, many streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reset_fast_many_streams() {
    let mut enc = Lz4Stream::new();
    for seed in 0..50u32 {
        let data = gen_buffer(20_000 + seed as usize * 500, 0.5, seed);
        enc.reset_fast();
        let blocks = encode_chunks(&mut enc, &data, 8 * 1024);
        let mut dec = Lz4StreamDecode::new();
        assert_eq!(decode_chunks(&mut dec, &blocks, 8 * 1024), data, "stream {seed}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: long stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_long_stream_keeps_decoding() {
    let unit = gen_buffer(512 * 1024, 0.5, 16);
    let mut enc = Lz4Stream::new();
    let mut dec = Lz4StreamDecode::new();
    for round in 0..4 {
        let blocks = encode_chunks(&mut enc, &unit, 64 * 1024);
        assert_eq!(decode_chunks(&mut dec, &blocks, 64 * 1024), unit, "round {round}");
    }
}
