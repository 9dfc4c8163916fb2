use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Caller-supplied game-clock timestamp. The engine never reads a clock.
pub type Timestamp = u64;

/// Research progress at which a project completes (100%).
pub const PROGRESS_COMPLETE: Fixed64 = Fixed64::from_bits(100 << 32);

/// Convert an f64 to Fixed64. Use only for initialization and tests.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Add `delta` percent to `progress`, keeping the result within `0..=100`.
#[inline]
pub fn advance_percent(progress: Fixed64, delta: Fixed64) -> Fixed64 {
    progress
        .saturating_add(delta)
        .clamp(Fixed64::ZERO, PROGRESS_COMPLETE)
}
