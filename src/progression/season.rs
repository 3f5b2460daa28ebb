//! Season metadata and rate constants
//!
//! The season record mirrors what the values API serves for the active
//! season. Field names stay in the API's camelCase so a saved payload can be
//! read back verbatim.

use serde::{Deserialize, Serialize};

use crate::data::DataError;

/// Seconds in one season day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Highest target level a season record may ask for
pub const MAX_TARGET_LEVEL: u32 = 10_000;

/// Rate constants that drive the level curve for one season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRateConstants {
    /// XP cap per day without the season pass
    pub max_daily_xp: f64,
    /// XP cap per day with the season pass
    pub max_daily_xp_with_pass: f64,
    /// Mean XP from one completed contract
    pub avg_xp_per_contract: f64,
    /// Contracts assumed completed each day
    pub contracts_per_day: f64,
    /// Season length in days
    pub total_days: f64,
    /// Derating applied to the theoretical maximum (imperfect daily play)
    pub efficiency: f64,
    /// Geometric ratio between consecutive level costs
    pub curve_k: f64,
    /// Level the curve is normalized against
    pub target_level: u32,
}

impl Default for SeasonRateConstants {
    fn default() -> Self {
        Self {
            max_daily_xp: 1_000.0,
            max_daily_xp_with_pass: 1_500.0,
            avg_xp_per_contract: 200.0,
            contracts_per_day: 4.0,
            total_days: 30.0,
            efficiency: 0.7,
            curve_k: 1.1,
            target_level: 10,
        }
    }
}

impl SeasonRateConstants {
    /// Total XP budget spread across levels `1..=target_level`
    pub fn total_possible_exp(&self) -> f64 {
        let contract_xp = self.avg_xp_per_contract * self.contracts_per_day * self.total_days;
        let daily_xp = self.max_daily_xp * self.total_days;
        self.efficiency * (contract_xp + daily_xp)
    }

    /// Daily XP cap that applies to a player
    pub fn daily_cap(&self, has_season_pass: bool) -> f64 {
        if has_season_pass {
            self.max_daily_xp_with_pass
        } else {
            self.max_daily_xp
        }
    }

    /// Check that a record read from disk or the API is usable
    pub fn validate(&self) -> Result<(), DataError> {
        let rates = [
            ("maxDailyXp", self.max_daily_xp),
            ("maxDailyXpWithPass", self.max_daily_xp_with_pass),
            ("avgXpPerContract", self.avg_xp_per_contract),
            ("contractsPerDay", self.contracts_per_day),
            ("totalDays", self.total_days),
        ];

        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(DataError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.total_days <= 0.0 {
            return Err(DataError::Invalid("totalDays must be positive".to_string()));
        }

        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(DataError::Invalid(format!(
                "efficiency must be in (0, 1], got {}",
                self.efficiency
            )));
        }

        if !self.curve_k.is_finite() || self.curve_k <= 0.0 {
            return Err(DataError::Invalid(format!(
                "curveK must be a positive number, got {}",
                self.curve_k
            )));
        }

        if self.target_level == 0 || self.target_level > MAX_TARGET_LEVEL {
            return Err(DataError::Invalid(format!(
                "targetLevel must be between 1 and {}, got {}",
                MAX_TARGET_LEVEL, self.target_level
            )));
        }

        Ok(())
    }
}

/// Free function form of [`SeasonRateConstants::total_possible_exp`]
pub fn total_possible_exp(constants: &SeasonRateConstants) -> f64 {
    constants.total_possible_exp()
}

/// One season as served by the values API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// Season number
    pub number: u32,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Start, unix seconds
    pub start_time: i64,
    /// End, unix seconds
    pub end_time: i64,
    /// Curve constants for this season
    pub rates: SeasonRateConstants,
}

impl Default for Season {
    fn default() -> Self {
        let rates = SeasonRateConstants::default();
        let start_time = 1_760_000_000;
        Self {
            number: 1,
            title: "Season 1".to_string(),
            start_time,
            end_time: start_time + rates.total_days as i64 * SECONDS_PER_DAY,
            rates,
        }
    }
}

impl Season {
    /// Whole days left until the season ends, rounded up, never negative
    pub fn days_remaining(&self, now: i64) -> i64 {
        let seconds_left = self.end_time - now;
        if seconds_left <= 0 {
            0
        } else {
            (seconds_left + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
        }
    }

    pub fn has_started(&self, now: i64) -> bool {
        now >= self.start_time
    }

    pub fn has_ended(&self, now: i64) -> bool {
        now >= self.end_time
    }

    /// Share of the season that has elapsed, in `[0, 1]`
    pub fn elapsed_fraction(&self, now: i64) -> f64 {
        let length = self.end_time - self.start_time;
        if length <= 0 {
            return 1.0;
        }
        ((now - self.start_time) as f64 / length as f64).clamp(0.0, 1.0)
    }

    /// Validate timestamps and rate constants
    pub fn validate(&self) -> Result<(), DataError> {
        if self.end_time <= self.start_time {
            return Err(DataError::Invalid(format!(
                "season {} ends ({}) before it starts ({})",
                self.number, self.end_time, self.start_time
            )));
        }
        self.rates.validate()
    }
}
