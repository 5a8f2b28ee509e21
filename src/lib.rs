// lz4-block: LZ4 block format encoder, decoder and streaming contexts

pub mod error;
pub mod config;
pub mod datagen;
pub mod block;
pub mod hc;
pub mod bench;

pub use error::{Lz4Error, Result};

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZ4_VERSION_MAJOR: u32 = 1;
pub const LZ4_VERSION_MINOR: u32 = 10;
pub const LZ4_VERSION_RELEASE: u32 = 0;
pub const LZ4_VERSION_NUMBER: u32 =
    LZ4_VERSION_MAJOR * 100 * 100 + LZ4_VERSION_MINOR * 100 + LZ4_VERSION_RELEASE;
/// Version of the block format implemented here.
pub const LZ4_VERSION_STRING: &str = "1.10.0";

pub fn version_number() -> u32 {
    LZ4_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    LZ4_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress_bound, compress_default, compress_dest_size, compress_fast, decompress_safe,
    decompress_safe_partial, Lz4Stream, Lz4StreamDecode,
};
pub use block::compress_default as lz4_compress_default;
pub use block::decompress_safe as lz4_decompress_safe;
pub use hc::{compress_hc, compress_hc_dest_size, Lz4StreamHc};
