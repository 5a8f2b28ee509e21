//! LZ4 block compression and decompression.
//!
//! The fast encoder, the safe decoder and the streaming contexts built on
//! them.

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod stream;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    clamp_acceleration, compress_bound, compress_default, compress_dest_size, compress_fast,
    compress_fast_with_state, size_of_state, CompressState, LZ4_ACCELERATION_DEFAULT,
    LZ4_ACCELERATION_MAX, LZ4_MAX_INPUT_SIZE,
};
pub use decompress_api::{
    decompress_safe, decompress_safe_partial, decompress_safe_partial_using_dict,
    decompress_safe_using_dict, Lz4StreamDecode,
};
pub use stream::Lz4Stream;
pub use types::{LZ4_DICT_SIZE, LZ4_DISTANCE_MAX, MINMATCH};

/// Compress `src` into a freshly allocated buffer trimmed to the block size.
pub fn compress_block_to_vec(src: &[u8], acceleration: i32) -> crate::Result<Vec<u8>> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        return Err(crate::Lz4Error::InputTooLarge(src.len()));
    }
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_fast(src, &mut dst, acceleration)?;
    dst.truncate(n);
    Ok(dst)
}

/// Decompress a block whose original size is known to be `original_size`.
pub fn decompress_block_to_vec(src: &[u8], original_size: usize) -> crate::Result<Vec<u8>> {
    let mut dst = vec![0u8; original_size];
    let n = decompress_safe(src, &mut dst)?;
    dst.truncate(n);
    Ok(dst)
}
