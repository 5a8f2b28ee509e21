// Integration tests for the decoding loop on hostile and hand-built input.
//
// Every case below must come back as an Err (or a correct Ok), never a panic
// or a write outside the destination.

use lz4::block::{decompress_safe, decompress_safe_partial, decompress_safe_using_dict};
use lz4::Lz4Error;

fn malformed(r: Result<usize, Lz4Error>) -> bool {
    matches!(r, Err(Lz4Error::MalformedInput { .. }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Truncation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_source_is_malformed() {
    let mut out = [0u8; 8];
    assert_eq!(
        decompress_safe(&[], &mut out),
        Err(Lz4Error::MalformedInput { position: 0 })
    );
}

#[test]
fn literal_run_past_end_of_source() {
    let mut out = [0u8; 64];
    // Claims 5 literals, carries 2.
    assert!(malformed(decompress_safe(&[0x50, b'a', b'b'], &mut out)));
}

#[test]
fn unterminated_length_extension() {
    let mut out = [0u8; 1024];
    assert!(malformed(decompress_safe(&[0xF0, 0xFF, 0xFF], &mut out)));
}

#[test]
fn missing_offset_after_literals() {
    let mut out = [0u8; 64];
    // Literals end one byte before the source does: no room for an offset.
    assert!(malformed(decompress_safe(&[0x14, b'a', 0x01], &mut out)));
}

#[test]
fn block_ending_on_a_match_is_malformed() {
    let mut out = [0u8; 64];
    // literal "a", match offset 1 length 4, then nothing.
    assert!(malformed(decompress_safe(&[0x10, b'a', 0x01, 0x00], &mut out)));
}

#[test]
fn every_truncation_of_a_valid_block_fails_cleanly() {
    let block = [0x26, b'a', b'b', 0x02, 0x00, 0x50, b'v', b'w', b'x', b'y', b'z'];
    let expected = b"ababababababvwxyz";
    let mut out = [0u8; 17];
    assert_eq!(decompress_safe(&block, &mut out), Ok(17));
    for cut in 0..block.len() {
        let mut out = [0u8; 17];
        match decompress_safe(&block[..cut], &mut out) {
            // Cutting right after the first literals leaves a valid
            // literal-only block.
            Ok(n) => {
                assert_eq!(cut, 3);
                assert_eq!(&out[..n], &expected[..n]);
            }
            Err(e) => assert!(matches!(e, Lz4Error::MalformedInput { .. }), "cut {cut}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Offsets
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_offset_is_malformed() {
    let mut out = [0u8; 64];
    let r = decompress_safe(&[0x10, b'a', 0x00, 0x00, 0x00], &mut out);
    assert_eq!(r, Err(Lz4Error::MalformedInput { position: 2 }));
}

#[test]
fn offset_before_start_of_output() {
    let mut out = [0u8; 64];
    // One literal produced, offset 2 reaches one byte before dst[0].
    assert!(malformed(decompress_safe(&[0x10, b'a', 0x02, 0x00, 0x00], &mut out)));
}

#[test]
fn offset_into_dictionary_is_allowed_up_to_its_length() {
    let dict = b"0123456789";
    let mut out = [0u8; 9];
    // Match of 4 at offset 10: copies "0123"; then 5 literals.
    let block = [0x00, 0x0A, 0x00, 0x50, b'v', b'w', b'x', b'y', b'z'];
    assert_eq!(decompress_safe_using_dict(&block, &mut out, dict), Ok(9));
    assert_eq!(&out, b"0123vwxyz");

    let too_far = [0x00, 0x0B, 0x00, 0x50, b'v', b'w', b'x', b'y', b'z'];
    assert!(malformed(decompress_safe_using_dict(&too_far, &mut out, dict)));
}

#[test]
fn match_spanning_dictionary_and_output() {
    let dict = b"wxyz";
    // 2 literals "ab", match offset 4 length 6: "yzabyz", then 0 literals.
    let block = [0x22, b'a', b'b', 0x04, 0x00, 0x00];
    let mut out = [0u8; 8];
    assert_eq!(decompress_safe_using_dict(&block, &mut out, dict), Ok(8));
    assert_eq!(&out, b"abyzabyz");
}

// ─────────────────────────────────────────────────────────────────────────────
// Output bounds
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn match_overrunning_destination() {
    let block = [0x1F, b'a', 0x01, 0x00, 0x80, 0x00];
    let mut small = [0u8; 16];
    assert_eq!(decompress_safe(&block, &mut small), Err(Lz4Error::OutputTooSmall));
    // 1 + (15 + 128 + 4) bytes.
    let mut exact = [0u8; 148];
    assert_eq!(decompress_safe(&block, &mut exact), Ok(148));
    assert!(exact.iter().all(|&b| b == b'a'));
}

#[test]
fn partial_decode_stops_inside_a_match() {
    let block = [0x1F, b'a', 0x01, 0x00, 0x80, 0x00];
    let mut out = [0u8; 148];
    assert_eq!(decompress_safe_partial(&block, &mut out, 10), Ok(10));
    assert!(out[..10].iter().all(|&b| b == b'a'));
    assert!(out[10..].iter().all(|&b| b == 0));
}

#[test]
fn huge_length_extension_does_not_wrap() {
    let mut src = vec![0xF0];
    src.extend(std::iter::repeat(0xFF).take(10_000));
    src.push(0x00);
    let mut out = [0u8; 64];
    assert!(decompress_safe(&src, &mut out).is_err());
}

#[test]
fn arbitrary_bytes_never_panic() {
    let mut x = 0x9E37_79B9u32;
    for len in 0..300usize {
        let src: Vec<u8> = (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (x >> 16) as u8
            })
            .collect();
        let mut out = vec![0u8; 512];
        let _ = decompress_safe(&src, &mut out);
        let _ = decompress_safe_partial(&src, &mut out, 100);
        let _ = decompress_safe_using_dict(&src, &mut out, b"dictionary bytes");
    }
}
