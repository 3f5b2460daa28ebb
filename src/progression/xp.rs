//! Experience arithmetic helpers
//!
//! Rounding and clamping shared by the level curve, the projector and the
//! pity converter.

/// Slack, in units of the value's own precision, taken off before rounding
/// action counts up. Float noise like `84.00000000000001` then does not cost
/// an extra robbery, while a genuinely tiny remainder still costs one.
const CEIL_TOLERANCE_ULPS: f64 = 4.0;

/// Round a raw XP value the way the season tables display it.
///
/// The value is floored and bumped by one when the dropped remainder is at
/// least one half. Ties always go up, never to even. Negative and NaN inputs
/// yield 0.
pub fn round_half_up(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }

    let floored = value.floor();
    let remainder = value - floored;
    let rounded = if remainder >= 0.5 { floored + 1.0 } else { floored };

    rounded as u64
}

/// Round a fractional action count up to a whole number of actions
pub fn ceil_count(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }

    let adjusted = value - value.abs() * f64::EPSILON * CEIL_TOLERANCE_ULPS;
    if adjusted <= 0.0 {
        0
    } else {
        adjusted.ceil() as u32
    }
}

/// Clamp a percentage into `[0, 100]`, mapping NaN to 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
