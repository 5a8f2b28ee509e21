//! LZ4 HC (high-compression) block encoder.
//!
//! Trades speed for ratio by searching a chain of earlier positions per hash
//! bucket. Blocks it produces are ordinary LZ4 blocks.

pub mod api;
pub mod compress_hc;
pub mod encode;
pub mod search;
pub mod types;

// Re-export key public API items at the module level.
pub use api::{
    compress_hc, compress_hc_dest_size, compress_hc_with_state, size_of_state_hc, Lz4StreamHc,
};
pub use types::{
    clamp_level, HcContext, LZ4HC_CLEVEL_DEFAULT, LZ4HC_CLEVEL_MAX, LZ4HC_CLEVEL_MIN,
    LZ4HC_CLEVEL_OPT_MIN,
};
