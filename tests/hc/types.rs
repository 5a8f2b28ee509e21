// Integration tests for the HC parameter table, level clamping, hashing and
// context construction.

use lz4::hc::types::{
    clamp_level, get_clevel_params, hash_at, hash_hc, HcContext, HcStrategy, K_CL_TABLE,
    LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN, LZ4HC_CLEVEL_OPT_MIN,
    LZ4HC_HASHTABLESIZE, LZ4HC_MAXD, LZ4HC_START_INDEX,
};
use lz4::hc::size_of_state_hc;

#[test]
fn level_constants() {
    assert_eq!(LZ4HC_CLEVEL_MIN, 3);
    assert_eq!(LZ4HC_CLEVEL_DEFAULT, 9);
    assert_eq!(LZ4HC_CLEVEL_OPT_MIN, 10);
    assert_eq!(LZ4HC_CLEVEL_MAX, 12);
    assert_eq!(LZ4HC_START_INDEX, 65_536);
}

#[test]
fn clamp_level_edges() {
    assert_eq!(clamp_level(i32::MIN), LZ4HC_CLEVEL_DEFAULT);
    assert_eq!(clamp_level(0), LZ4HC_CLEVEL_DEFAULT);
    assert_eq!(clamp_level(1), 3);
    assert_eq!(clamp_level(2), 3);
    for l in 3..=12 {
        assert_eq!(clamp_level(l), l);
    }
    assert_eq!(clamp_level(13), 12);
    assert_eq!(clamp_level(i32::MAX), 12);
}

#[test]
fn parameter_table_shape() {
    assert_eq!(K_CL_TABLE.len(), 10);
    for (i, p) in K_CL_TABLE.iter().enumerate() {
        let level = i as i32 + LZ4HC_CLEVEL_MIN;
        let expected = if level >= LZ4HC_CLEVEL_OPT_MIN {
            HcStrategy::Lz4Deep
        } else {
            HcStrategy::Lz4Hc
        };
        assert_eq!(p.strat, expected, "level {level}");
        assert_eq!(get_clevel_params(level), *p);
    }
    // Search effort grows through the lazy levels.
    for w in K_CL_TABLE[..7].windows(2) {
        assert!(w[1].nb_searches > w[0].nb_searches);
    }
    assert_eq!(get_clevel_params(0), get_clevel_params(9));
    assert_eq!(get_clevel_params(99), get_clevel_params(12));
}

#[test]
fn lookahead_by_strategy() {
    assert_eq!(HcStrategy::Lz4Hc.lookahead(), 1);
    assert_eq!(HcStrategy::Lz4Deep.lookahead(), 2);
}

#[test]
fn hash_range_and_consistency() {
    let buf = b"abcdefgh";
    for i in 0..=4 {
        let h = hash_at(buf, i);
        assert!(h < LZ4HC_HASHTABLESIZE);
        assert_eq!(h, hash_hc(u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]])));
    }
}

#[test]
fn context_starts_empty() {
    let ctx = HcContext::new();
    assert_eq!(ctx.hash_table.len(), LZ4HC_HASHTABLESIZE);
    assert_eq!(ctx.chain_table.len(), LZ4HC_MAXD);
    assert!(ctx.hash_table.iter().all(|&e| e == 0));
    assert!(ctx.chain_table.iter().all(|&e| e == 0xFFFF));
    assert_eq!(ctx.next_to_update, LZ4HC_START_INDEX);
    assert!(size_of_state_hc() >= LZ4HC_HASHTABLESIZE * 4 + LZ4HC_MAXD * 2);
}

#[test]
fn clear_tables_resets_entries() {
    let mut ctx = HcContext::default();
    ctx.hash_table[5] = 77;
    ctx.chain_table[9] = 3;
    ctx.clear_tables();
    assert_eq!(ctx.hash_table[5], 0);
    assert_eq!(ctx.chain_table[9], 0xFFFF);
}
