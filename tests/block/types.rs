// Integration tests for the block primitives: constants, readers, hashing,
// the hash table and the two-segment match window.

use lz4::block::types::{
    common_prefix, hash4, hash5, read_u16, read_u32, read_u64, slide_history, HashKind,
    HashTable, Window, LASTLITERALS, LZ4_64KLIMIT, LZ4_DICT_SIZE, LZ4_DISTANCE_MAX,
    LZ4_HASHLOG, LZ4_HASH_SIZE_U32, LZ4_MIN_LENGTH, MFLIMIT, MINMATCH, ML_MASK, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_constants() {
    assert_eq!(MINMATCH, 4);
    assert_eq!(LASTLITERALS, 5);
    assert_eq!(MFLIMIT, 12);
    assert_eq!(LZ4_MIN_LENGTH, 13);
    assert_eq!(LZ4_DISTANCE_MAX, 65_535);
    assert_eq!(LZ4_DICT_SIZE, 65_536);
    assert_eq!(ML_MASK, 15);
    assert_eq!(RUN_MASK, 15);
    assert_eq!(LZ4_64KLIMIT, 65_536 + 11);
}

#[test]
fn default_table_geometry() {
    assert_eq!(LZ4_HASHLOG, 12);
    assert_eq!(LZ4_HASH_SIZE_U32, 4096);
}

// ─────────────────────────────────────────────────────────────────────────────
// Readers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn little_endian_reads_at_any_offset() {
    let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
    assert_eq!(read_u16(&buf, 1), 0x0302);
    assert_eq!(read_u32(&buf, 3), 0x0706_0504);
    assert_eq!(read_u64(&buf, 1), 0x0908_0706_0504_0302);
}

#[test]
fn common_prefix_lengths() {
    assert_eq!(common_prefix(b"", b"abc"), 0);
    assert_eq!(common_prefix(b"abcdefghij", b"abcdefghij"), 10);
    assert_eq!(common_prefix(b"abcdefghXj", b"abcdefghij"), 8);
    assert_eq!(common_prefix(b"abcXefghij", b"abcdefghij"), 3);
    assert_eq!(common_prefix(b"abcdefghijkl", b"abcdefghijk"), 11);
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hashes_fit_the_table() {
    for seq in [0u64, 1, 0xDEAD_BEEF, u64::MAX, 0x0102_0304_0506_0708] {
        assert!(hash4(seq as u32) < LZ4_HASH_SIZE_U32);
        assert!(hash5(seq) < LZ4_HASH_SIZE_U32);
    }
}

#[test]
fn hash5_ignores_upper_three_bytes() {
    let a = 0x00_00_00_11_22_33_44_55u64;
    let b = 0xFF_EE_DD_11_22_33_44_55u64;
    assert_eq!(hash5(a), hash5(b));
}

#[test]
fn hash_kind_by_input_size() {
    assert_eq!(HashKind::for_input(0), HashKind::Four);
    assert_eq!(HashKind::for_input(LZ4_64KLIMIT - 1), HashKind::Four);
    assert_eq!(HashKind::for_input(LZ4_64KLIMIT), HashKind::Five);
    assert_eq!(HashKind::Four.unit(), 4);
    assert_eq!(HashKind::Five.unit(), 8);

    let buf = b"0123456789";
    assert_eq!(HashKind::Four.at(buf, 2), hash4(read_u32(buf, 2)));
    assert_eq!(HashKind::Five.at(buf, 2), hash5(read_u64(buf, 2)));
}

// ─────────────────────────────────────────────────────────────────────────────
// HashTable
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn table_put_get_clear() {
    let mut t = HashTable::new();
    assert_eq!(t.get(17), 0);
    t.put(17, 1234);
    t.put(4095, 9);
    assert_eq!(t.get(17), 1234);
    t.put(17, 99);
    assert_eq!(t.get(17), 99);
    t.clear();
    assert_eq!(t.get(17), 0);
    assert_eq!(t.get(4095), 0);
}

#[test]
fn table_rebase_saturates_at_zero() {
    let mut t = HashTable::default();
    t.put(1, 100_000);
    t.put(2, 500);
    t.rebase(1_000);
    assert_eq!(t.get(1), 99_000);
    assert_eq!(t.get(2), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn prefix_only_window_indexes_src() {
    let w = Window::prefix_only(b"hello hello");
    assert_eq!(w.low_limit(), 0);
    assert_eq!(w.index(6), 6);
    assert_eq!(w.byte(6), b'h');
    assert!(w.matches(0, 6));
    assert!(!w.matches(6, 6));
    assert_eq!(w.forward_len(0, 6, 11), 5);
}

#[test]
fn two_segment_window_addresses_dict_then_src() {
    let dict = b"xxabcd";
    let src = b"abcdabcd";
    let w = Window { dict, src, base: 100 };
    assert_eq!(w.low_limit(), 94);
    assert_eq!(w.byte(94), b'x');
    assert_eq!(w.byte(99), b'd');
    assert_eq!(w.byte(100), b'a');

    // "abcd" at dict index 96 matches src[0..4]
    assert!(w.reachable(96, 0));
    assert!(w.matches(96, 0));
    assert_eq!(w.read4(96), read_u32(src, 0));
    // dict[3..] has fewer than four bytes left in its own segment
    assert!(!w.reachable(97, 0));
    // Matching runs from the dictionary into src.
    assert_eq!(w.forward_len(96, 0, src.len()), 8);
}

#[test]
fn reachable_respects_max_distance() {
    let src = vec![7u8; LZ4_DISTANCE_MAX + 10];
    let w = Window::prefix_only(&src);
    let pos = LZ4_DISTANCE_MAX + 5;
    assert!(w.reachable(5, pos));
    assert!(!w.reachable(4, pos));
}

#[test]
fn backward_len_stops_at_anchor_and_window_start() {
    let dict = b"zzab";
    let src = b"zzabQzzab";
    let w = Window { dict, src, base: 4 };
    // match at src[7] ("ab") against dict index 2; extends back over "zz"
    assert_eq!(w.backward_len(2, 7, 0), 2);
    assert_eq!(w.backward_len(2, 7, 6), 1);
    // candidate at the first window byte can't extend back
    assert_eq!(w.backward_len(0, 5, 0), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slide_history_keeps_trailing_window() {
    let mut h = Vec::new();
    slide_history(&mut h, b"abc");
    assert_eq!(h, b"abc");

    let big: Vec<u8> = (0..LZ4_DICT_SIZE + 100).map(|i| i as u8).collect();
    slide_history(&mut h, &big);
    assert_eq!(h.len(), LZ4_DICT_SIZE);
    assert_eq!(h[..], big[100..]);

    slide_history(&mut h, b"tail");
    assert_eq!(h.len(), LZ4_DICT_SIZE);
    assert_eq!(&h[h.len() - 4..], b"tail");
    assert_eq!(h[0], big[104]);
}
