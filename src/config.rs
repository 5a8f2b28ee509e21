// config.rs: compile-time tuning constants and environment overrides.
//
// The constants size the encoder's tables and pick the defaults used by the
// bench binary. `LZ4_ACCELERATION` and `LZ4_CLEVEL` may override the two
// defaults at runtime; invalid values are reported and ignored.

use tracing::warn;

// log2 of the fast encoder's hash table size in bytes. 14 gives a 16 KiB
// table of 4096 u32 slots. Changing it changes the compressed output but
// never its validity.
pub const LZ4_MEMORY_USAGE: u32 = 14;

// Default acceleration for the fast encoder.
// Can be overridden by the LZ4_ACCELERATION environment variable.
pub const ACCELERATION_DEFAULT: i32 = 1;

// Default HC compression level.
// Can be overridden by the LZ4_CLEVEL environment variable.
pub const CLEVEL_DEFAULT: i32 = 9;

// Default block size used by the bench harness when splitting its input.
pub const BLOCK_SIZE_DEFAULT: usize = 64 * 1024;

const ENV_ACCELERATION: &str = "LZ4_ACCELERATION";
const ENV_CLEVEL: &str = "LZ4_CLEVEL";

fn parse_env_u32(name: &str, env_val: Option<&str>) -> Option<u32> {
    let env = env_val?;
    match env.trim().parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(
                "Ignore environment variable setting {}={}: not a valid unsigned value",
                name, env
            );
            None
        }
    }
}

/// Read the default acceleration from `LZ4_ACCELERATION`.
pub fn init_acceleration() -> i32 {
    init_acceleration_from(std::env::var(ENV_ACCELERATION).ok().as_deref())
}

/// Testable core of [`init_acceleration`]. `None` means the variable is
/// unset. Values are clamped the same way the encoder clamps them.
pub fn init_acceleration_from(env_val: Option<&str>) -> i32 {
    match parse_env_u32(ENV_ACCELERATION, env_val) {
        Some(v) => crate::block::clamp_acceleration(v.min(i32::MAX as u32) as i32) as i32,
        None => ACCELERATION_DEFAULT,
    }
}

/// Read the default HC level from `LZ4_CLEVEL`.
pub fn init_c_level() -> i32 {
    init_c_level_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Testable core of [`init_c_level`]: parse an optional `LZ4_CLEVEL` value.
pub fn init_c_level_from(env_val: Option<&str>) -> i32 {
    match parse_env_u32(ENV_CLEVEL, env_val) {
        Some(v) => crate::hc::clamp_level(v.min(i32::MAX as u32) as i32),
        None => CLEVEL_DEFAULT,
    }
}
