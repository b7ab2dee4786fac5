pub const GRID_SIZE: usize = 6;

pub const TILE_MIN: i8 = -9;
pub const TILE_MAX: i8 = 9;

/// One level per minute of unpaused play.
pub const LEVEL_INTERVAL_SECS: u64 = 60;

/// Minimum gap between accepted tile flips.
pub const FLIP_DEBOUNCE_MS: u64 = 100;

/// Fallback timeout for the tiles-clearing latch: the renderer's clear
/// animation runs 400ms, plus margin so the latch never sticks.
pub const CLEAR_EFFECT_TIMEOUT_MS: u64 = 600;

/// Duration of the mistake feedback window. Pointer input is suppressed
/// for the whole window.
pub const MISTAKE_EFFECT_MS: u64 = 1700;
