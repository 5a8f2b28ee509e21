#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Err results are expected; what matters is no panic and no overrun.

    // Zero-length output buffer.
    {
        let mut dst = vec![0u8; 0];
        let _ = lz4::lz4_decompress_safe(data, &mut dst);
    }

    // 4 KiB output buffer, full and partial decoding.
    {
        let mut dst = vec![0u8; 4096];
        let _ = lz4::lz4_decompress_safe(data, &mut dst);
        let _ = lz4::decompress_safe_partial(data, &mut dst, 1000);
    }

    // Capped at 1 MiB so tiny inputs claiming huge output don't OOM.
    {
        let large = (data.len().saturating_mul(255)).min(1 << 20);
        let mut dst = vec![0u8; large];
        let _ = lz4::lz4_decompress_safe(data, &mut dst);
    }

    // Offsets that reach into a dictionary.
    {
        let dict: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let mut dst = vec![0u8; 8192];
        let _ = lz4::block::decompress_safe_using_dict(data, &mut dst, &dict);
        let _ = lz4::block::decompress_safe_partial_using_dict(data, &mut dst, 100, &dict);
    }
});
