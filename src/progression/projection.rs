//! "Will I make it" projection
//!
//! Answers whether a player can still reach the target level before the
//! season ends, assuming they hit the daily XP cap every remaining day.

use super::curve::cumulative_xp;
use super::season::SeasonRateConstants;

/// Outcome of a season projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Whether the daily cap covers the XP still needed
    pub reaches_target: bool,
    /// XP per day needed over the remaining days
    pub daily_xp_needed: f64,
    /// XP left between the player and the target level
    pub xp_still_needed: u64,
    /// Daily cap used for the verdict (pass or no pass)
    pub effective_daily_cap: f64,
    /// Days of capped play needed to close the gap
    pub days_needed_at_cap: u64,
}

/// Project a player's season from their current level and XP.
///
/// `current_xp_in_level` is measured from the start of `current_level`'s bar,
/// which begins at the cumulative requirement of `current_level - 1`.
/// Zero or negative `days_remaining` is treated as one day (today is the
/// last day).
pub fn project(
    current_level: u32,
    current_xp_in_level: u64,
    days_remaining: i64,
    constants: &SeasonRateConstants,
    has_season_pass: bool,
) -> Projection {
    let target_xp = cumulative_xp(constants.target_level, constants);
    let earned = cumulative_xp(current_level.saturating_sub(1), constants)
        .saturating_add(current_xp_in_level);
    let xp_still_needed = target_xp.saturating_sub(earned);

    let days = days_remaining.max(1);
    let daily_xp_needed = xp_still_needed as f64 / days as f64;

    let effective_daily_cap = constants.daily_cap(has_season_pass);
    let reaches_target = daily_xp_needed <= effective_daily_cap;

    let days_needed_at_cap = if xp_still_needed == 0 {
        0
    } else if effective_daily_cap <= 0.0 {
        u64::MAX
    } else {
        (xp_still_needed as f64 / effective_daily_cap).ceil() as u64
    };

    Projection {
        reaches_target,
        daily_xp_needed,
        xp_still_needed,
        effective_daily_cap,
        days_needed_at_cap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn uniform_constants() -> SeasonRateConstants {
        SeasonRateConstants {
            max_daily_xp: 1000.0,
            max_daily_xp_with_pass: 1500.0,
            avg_xp_per_contract: 200.0,
            contracts_per_day: 4.0,
            total_days: 30.0,
            efficiency: 0.7,
            curve_k: 1.0,
            target_level: 10,
        }
    }

    #[test]
    fn test_fresh_player_needs_whole_budget() {
        let projection = project(1, 0, 30, &uniform_constants(), false);

        assert_eq!(projection.xp_still_needed, 37_800);
        assert_eq!(projection.daily_xp_needed, 1_260.0);
        assert_eq!(projection.effective_daily_cap, 1_000.0);
        assert!(!projection.reaches_target);
        assert_eq!(projection.days_needed_at_cap, 38);
    }

    #[test]
    fn test_season_pass_raises_cap() {
        let projection = project(1, 0, 30, &uniform_constants(), true);

        assert_eq!(projection.effective_daily_cap, 1_500.0);
        assert!(projection.reaches_target);
        assert_eq!(projection.days_needed_at_cap, 26);
    }

    #[test]
    fn test_progress_counts_toward_target() {
        // Level 5 bar starts at cumulative(4) = 12600
        let projection = project(5, 1_200, 10, &uniform_constants(), false);

        assert_eq!(projection.xp_still_needed, 37_800 - 12_600 - 1_200);
        assert_eq!(projection.daily_xp_needed, 2_400.0);
        assert!(!projection.reaches_target);
    }

    #[test]
    fn test_past_target_needs_nothing() {
        let projection = project(10, 9_000, 5, &uniform_constants(), false);

        assert_eq!(projection.xp_still_needed, 0);
        assert_eq!(projection.daily_xp_needed, 0.0);
        assert!(projection.reaches_target);
        assert_eq!(projection.days_needed_at_cap, 0);
    }

    #[test]
    fn test_no_days_left_counts_as_one() {
        let zero = project(9, 0, 0, &uniform_constants(), false);
        let negative = project(9, 0, -4, &uniform_constants(), false);

        // cumulative(10) - cumulative(8) = 8400
        assert_eq!(zero.daily_xp_needed, 8_400.0);
        assert_eq!(zero, negative);
        assert!(zero.daily_xp_needed.is_finite());
    }

    #[test]
    fn test_zero_cap_never_reaches() {
        let constants = SeasonRateConstants { max_daily_xp: 0.0, ..uniform_constants() };
        let projection = project(1, 0, 30, &constants, false);

        assert!(!projection.reaches_target);
        assert_eq!(projection.days_needed_at_cap, u64::MAX);
    }

    #[test]
    fn test_verdict_matches_cap_comparison() {
        let mut rng = StdRng::seed_from_u64(42);
        let constants = uniform_constants();

        for _ in 0..1_000 {
            let level = rng.gen_range(0..=12);
            let xp = rng.gen_range(0..10_000);
            let days = rng.gen_range(-3..=40);
            let pass = rng.gen_bool(0.5);

            let projection = project(level, xp, days, &constants, pass);
            let cap = constants.daily_cap(pass);
            assert_eq!(projection.reaches_target, projection.daily_xp_needed <= cap);
        }
    }
}
