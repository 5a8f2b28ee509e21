#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte sets the block size, the rest is streamed through linked
    // blocks and decoded with one streaming decoder.
    let Some((&size, payload)) = data.split_first() else {
        return;
    };
    let block = size as usize * 64 + 1;

    let mut fast = lz4::Lz4Stream::new();
    let mut hc = lz4::Lz4StreamHc::new(lz4::hc::LZ4HC_CLEVEL_MIN);
    let mut fast_dec = lz4::Lz4StreamDecode::new();
    let mut hc_dec = lz4::Lz4StreamDecode::new();
    let mut compressed = vec![0u8; lz4::compress_bound(block)];
    let mut out = vec![0u8; block];

    for chunk in payload.chunks(block) {
        let n = fast
            .compress_fast_continue(chunk, &mut compressed, 1)
            .expect("fast stream block");
        let d = fast_dec
            .decompress_safe_continue(&compressed[..n], &mut out)
            .expect("fast stream decode");
        assert_eq!(&out[..d], chunk);

        let n = hc.compress_continue(chunk, &mut compressed).expect("HC stream block");
        let d = hc_dec
            .decompress_safe_continue(&compressed[..n], &mut out)
            .expect("HC stream decode");
        assert_eq!(&out[..d], chunk);
    }
});
