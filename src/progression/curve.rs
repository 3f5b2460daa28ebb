//! Season level curve
//!
//! Spreads a season's total XP budget over levels `1..=target_level` as a
//! geometric series with ratio `curve_k`. Level 1 is where every player
//! starts, so it costs nothing; each later level costs `curve_k` times the
//! one before it, and reaching the target level uses up the whole budget.

use serde::{Deserialize, Serialize};

use super::season::{SeasonRateConstants, MAX_TARGET_LEVEL};
use super::xp::round_half_up;

/// Cumulative XP needed to reach `level` from level 0.
///
/// Level 0 costs nothing. Levels past the target are priced as the target
/// itself, since the curve does not model them.
pub fn cumulative_xp(level: u32, constants: &SeasonRateConstants) -> u64 {
    if level == 0 {
        return 0;
    }

    let target = constants.target_level.max(1);
    let level = level.min(target);
    let total = constants.total_possible_exp();

    // With a single level there is no series to spread the budget over
    let steps = target - 1;
    if steps == 0 {
        return round_half_up(total);
    }

    let k = constants.curve_k;
    let raw = total * budget_fraction(level - 1, steps, k);

    round_half_up(raw)
}

/// Share of the budget spent after `reached` of `steps` geometric steps.
///
/// This is `(1 - k^reached) / (1 - k^steps)`. Above a ratio of one both
/// powers overflow for long seasons, so the fraction is rewritten over
/// `r = 1/k` as `(r^(steps - reached) - r^steps) / (1 - r^steps)`.
fn budget_fraction(reached: u32, steps: u32, k: f64) -> f64 {
    let reached_f = f64::from(reached);
    let steps_f = f64::from(steps);

    if k == 1.0 {
        reached_f / steps_f
    } else if k < 1.0 {
        (1.0 - k.powf(reached_f)) / (1.0 - k.powf(steps_f))
    } else {
        let r = 1.0 / k;
        let r_steps = r.powf(steps_f);
        (r.powf(steps_f - reached_f) - r_steps) / (1.0 - r_steps)
    }
}

/// XP needed to go from `level - 1` to `level`
pub fn xp_required_for_level(level: u32, constants: &SeasonRateConstants) -> u64 {
    if level == 0 {
        return 0;
    }
    cumulative_xp(level, constants).saturating_sub(cumulative_xp(level - 1, constants))
}

/// Percentage used to scale progress bars, 0 when there is nothing to scale by
pub fn progress_percentage(cumulative_xp_at_level: u64, max_cumulative_xp: u64) -> f64 {
    if max_cumulative_xp == 0 {
        return 0.0;
    }
    100.0 * cumulative_xp_at_level as f64 / max_cumulative_xp as f64
}

/// One row of the level requirements table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRequirement {
    pub level: u32,
    /// XP for this level alone
    pub xp_required: u64,
    /// XP from level 0 up to and including this level
    pub total_xp: u64,
    /// `total_xp` relative to the target level, 0-100
    pub progress_percent: f64,
}

/// Build the full requirements table for `1..=target_level`
pub fn requirements(constants: &SeasonRateConstants) -> Vec<LevelRequirement> {
    let target = constants.target_level;
    let max_total = cumulative_xp(target, constants);

    let mut rows = Vec::with_capacity(target.min(MAX_TARGET_LEVEL) as usize);
    let mut previous_total = 0;

    for level in 1..=target {
        let total_xp = cumulative_xp(level, constants);
        rows.push(LevelRequirement {
            level,
            xp_required: total_xp.saturating_sub(previous_total),
            total_xp,
            progress_percent: progress_percentage(total_xp, max_total),
        });
        previous_total = total_xp;
    }

    rows
}
