#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The first byte picks the encoder: fast with some acceleration, or HC.
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };

    let mut compressed = vec![0u8; lz4::compress_bound(payload.len())];
    let n = if selector & 0x80 == 0 {
        lz4::compress_fast(payload, &mut compressed, (selector & 0x0F) as i32 + 1)
    } else {
        lz4::compress_hc(payload, &mut compressed, (selector & 0x0F) as i32)
    }
    .expect("a bound-sized destination always fits");

    let recovered = lz4::block::decompress_block_to_vec(&compressed[..n], payload.len())
        .expect("a freshly compressed block must decode");
    assert_eq!(
        recovered, payload,
        "block round-trip mismatch: {} bytes compressed to {}",
        payload.len(),
        n
    );

    // Fill mode must produce a block decoding to exactly the consumed prefix.
    let budget = (payload.len() / 2).max(1);
    let mut page = vec![0u8; budget];
    if let Ok((consumed, written)) = lz4::compress_dest_size(payload, &mut page) {
        let prefix = lz4::block::decompress_block_to_vec(&page[..written], consumed)
            .expect("a dest-size block must decode");
        assert_eq!(prefix, &payload[..consumed]);
    }
});
