// Integration tests for the HC streaming context.
//
//   - Linked blocks decode with Lz4StreamDecode
//   - set_level / level and reset behaviour
//   - load_dict feeds the first block; save_dict narrows the window
//   - compress_continue_dest_size only keeps what it consumed
//   - Failures corrupt the stream until it is reset

use lz4::block::{compress_bound, decompress_safe, decompress_safe_using_dict, Lz4StreamDecode};
use lz4::datagen::gen_buffer;
use lz4::hc::{Lz4StreamHc, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX};
use lz4::Lz4Error;

fn next_block(stream: &mut Lz4StreamHc, src: &[u8]) -> Vec<u8> {
    let mut c = vec![0u8; compress_bound(src.len())];
    let n = stream.compress_continue(src, &mut c).unwrap();
    c.truncate(n);
    c
}

#[test]
fn linked_blocks_round_trip() {
    let data = gen_buffer(250_000, 0.6, 71);
    let mut enc = Lz4StreamHc::new(LZ4HC_CLEVEL_DEFAULT);
    let mut dec = Lz4StreamDecode::new();
    let mut restored = Vec::new();
    for chunk in data.chunks(16 * 1024) {
        let c = next_block(&mut enc, chunk);
        let mut out = vec![0u8; chunk.len()];
        assert_eq!(dec.decompress_safe_continue(&c, &mut out), Ok(chunk.len()));
        restored.extend_from_slice(&out);
    }
    assert_eq!(restored, data);
}

#[test]
fn level_changes_between_blocks() {
    let data = gen_buffer(64 * 1024, 0.5, 72);
    let mut enc = Lz4StreamHc::new(0);
    assert_eq!(enc.level(), LZ4HC_CLEVEL_DEFAULT);
    let mut dec = Lz4StreamDecode::new();
    for (i, chunk) in data.chunks(8 * 1024).enumerate() {
        enc.set_level(3 + i as i32);
        assert_eq!(enc.level(), (3 + i as i32).min(LZ4HC_CLEVEL_MAX));
        let c = next_block(&mut enc, chunk);
        let mut out = vec![0u8; chunk.len()];
        assert_eq!(dec.decompress_safe_continue(&c, &mut out), Ok(chunk.len()));
        assert_eq!(out, chunk);
    }
}

#[test]
fn second_copy_of_a_block_is_nearly_free() {
    let block = gen_buffer(20_000, 0.2, 73);
    let mut enc = Lz4StreamHc::new(LZ4HC_CLEVEL_MAX);
    let first = next_block(&mut enc, &block);
    let second = next_block(&mut enc, &block);
    assert!(second.len() < first.len() / 20, "{} vs {}", second.len(), first.len());
}

#[test]
fn reset_fast_starts_an_independent_stream() {
    let a = gen_buffer(30_000, 0.5, 74);
    let mut enc = Lz4StreamHc::new(9);
    next_block(&mut enc, &a);
    enc.reset_fast(4);
    assert_eq!(enc.level(), 4);
    assert_eq!(enc.history_len(), 0);
    let c = next_block(&mut enc, &a);
    let mut out = vec![0u8; a.len()];
    assert_eq!(decompress_safe(&c, &mut out), Ok(a.len()));
    assert_eq!(out, a);
}

#[test]
fn dictionary_primes_first_block() {
    let dict = gen_buffer(40_000, 0.5, 75);
    let src = dict[12_000..20_000].to_vec();
    // Deep search so the aligned dictionary copy wins over short repeats.
    let mut enc = Lz4StreamHc::new(LZ4HC_CLEVEL_MAX);
    assert_eq!(enc.load_dict(&dict), dict.len());
    let c = next_block(&mut enc, &src);
    assert!(c.len() < 200, "{} bytes", c.len());

    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress_safe_using_dict(&c, &mut out, &dict), Ok(src.len()));
    assert_eq!(out, src);
}

#[test]
fn save_dict_and_continue() {
    let data = gen_buffer(60_000, 0.6, 76);
    let (a, b) = data.split_at(40_000);
    let mut enc = Lz4StreamHc::new(9);
    next_block(&mut enc, a);

    let mut saved = vec![0u8; 32 * 1024];
    assert_eq!(enc.save_dict(&mut saved), 32 * 1024);
    assert_eq!(enc.history_len(), 32 * 1024);

    let c = next_block(&mut enc, b);
    let mut out = vec![0u8; b.len()];
    assert_eq!(decompress_safe_using_dict(&c, &mut out, &saved), Ok(b.len()));
    assert_eq!(out, b);
}

#[test]
fn dest_size_stream_then_continue() {
    let data = gen_buffer(40_000, 0.5, 77);
    let mut enc = Lz4StreamHc::new(9);
    let mut dec = Lz4StreamDecode::new();

    let mut small = vec![0u8; 2_000];
    let (consumed, written) = enc.compress_continue_dest_size(&data, &mut small).unwrap();
    assert!(consumed < data.len());
    assert_eq!(enc.history_len(), consumed);
    let mut out = vec![0u8; consumed];
    assert_eq!(dec.decompress_safe_continue(&small[..written], &mut out), Ok(consumed));
    assert_eq!(out, data[..consumed]);

    // The rest continues from exactly where the first block stopped.
    let rest = &data[consumed..];
    let c = next_block(&mut enc, rest);
    let mut out = vec![0u8; rest.len()];
    assert_eq!(dec.decompress_safe_continue(&c, &mut out), Ok(rest.len()));
    assert_eq!(out, rest);
}

#[test]
fn failure_corrupts_until_reset() {
    let src = gen_buffer(10_000, 0.3, 78);
    let mut enc = Lz4StreamHc::new(9);
    let mut tiny = [0u8; 4];
    assert_eq!(enc.compress_continue(&src, &mut tiny), Err(Lz4Error::OutputTooSmall));
    assert!(enc.is_corrupted());

    let mut dst = vec![0u8; compress_bound(src.len())];
    assert_eq!(enc.compress_continue(&src, &mut dst), Err(Lz4Error::InvalidContextState));

    enc.reset(9);
    assert!(!enc.is_corrupted());
    let n = enc.compress_continue(&src, &mut dst).unwrap();
    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress_safe(&dst[..n], &mut out), Ok(src.len()));
}

#[test]
fn cloned_stream_continues_independently() {
    let data = gen_buffer(30_000, 0.5, 79);
    let (a, b) = data.split_at(15_000);
    let mut enc = Lz4StreamHc::new(9);
    next_block(&mut enc, a);
    let mut copy = enc.clone();
    assert_eq!(next_block(&mut enc, b), next_block(&mut copy, b));
}
