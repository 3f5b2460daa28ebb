//! Hyperchrome pity calculator
//!
//! Each Hyperchrome tier fills a pity meter from 0% to 100%; a full meter
//! guarantees the next tier. Every robbery adds a fixed slice of pity, so
//! the number of robberies left is a closed-form function of the tier and
//! the current percentage. Private servers fill the meter more slowly.

use serde::{Deserialize, Serialize};

use crate::data::DataError;
use crate::progression::xp::{ceil_count, clamp_percent};

/// Number of modelled tiers (levels 0 through 4)
pub const TIER_COUNT: usize = 5;

/// Extra robberies needed on a private server
pub const DEFAULT_PRIVATE_SERVER_MULTIPLIER: f64 = 1.5;

/// Robberies needed to take each tier from 0% to 100% pity
pub const DEFAULT_BASE_COSTS: [u32; TIER_COUNT] = [40, 60, 80, 100, 120];

/// Hyperchrome tier the player currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum HyperchromeLevel {
    #[default]
    Level0,
    Level1,
    Level2,
    Level3,
    Level4,
}

impl HyperchromeLevel {
    pub const ALL: [HyperchromeLevel; TIER_COUNT] = [
        HyperchromeLevel::Level0,
        HyperchromeLevel::Level1,
        HyperchromeLevel::Level2,
        HyperchromeLevel::Level3,
        HyperchromeLevel::Level4,
    ];

    /// Tier for a raw index, clamping anything above 4 to level 4
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => HyperchromeLevel::Level0,
            1 => HyperchromeLevel::Level1,
            2 => HyperchromeLevel::Level2,
            3 => HyperchromeLevel::Level3,
            _ => HyperchromeLevel::Level4,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            HyperchromeLevel::Level0 => 0,
            HyperchromeLevel::Level1 => 1,
            HyperchromeLevel::Level2 => 2,
            HyperchromeLevel::Level3 => 3,
            HyperchromeLevel::Level4 => 4,
        }
    }

    /// The tier a full pity meter leads to, `None` past the last modelled tier
    pub fn next(&self) -> Option<Self> {
        match self {
            HyperchromeLevel::Level0 => Some(HyperchromeLevel::Level1),
            HyperchromeLevel::Level1 => Some(HyperchromeLevel::Level2),
            HyperchromeLevel::Level2 => Some(HyperchromeLevel::Level3),
            HyperchromeLevel::Level3 => Some(HyperchromeLevel::Level4),
            HyperchromeLevel::Level4 => None,
        }
    }

    pub fn is_max(&self) -> bool {
        self.next().is_none()
    }

    pub fn name(&self) -> &'static str {
        match self {
            HyperchromeLevel::Level0 => "Level 0",
            HyperchromeLevel::Level1 => "Level 1",
            HyperchromeLevel::Level2 => "Level 2",
            HyperchromeLevel::Level3 => "Level 3",
            HyperchromeLevel::Level4 => "Level 4",
        }
    }
}

/// Per-tier robbery costs and the private server penalty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PityCostTable {
    /// Robberies for a full meter, indexed by tier
    pub base_costs: [u32; TIER_COUNT],
    /// Applied to the final robbery count on private servers
    pub private_server_multiplier: f64,
}

impl Default for PityCostTable {
    fn default() -> Self {
        Self {
            base_costs: DEFAULT_BASE_COSTS,
            private_server_multiplier: DEFAULT_PRIVATE_SERVER_MULTIPLIER,
        }
    }
}

impl PityCostTable {
    /// Robberies that fill the meter for `level` from empty
    pub fn base_cost(&self, level: HyperchromeLevel) -> u32 {
        self.base_costs[level.index() as usize]
    }

    /// Robberies needed to bring `pity_percent` up to 100%.
    ///
    /// The private server multiplier scales the final count, and the result
    /// is rounded up so the stated pity is always reached.
    pub fn robberies_to_level_up(
        &self,
        level: HyperchromeLevel,
        pity_percent: f64,
        is_private_server: bool,
    ) -> u32 {
        let pity = clamp_percent(pity_percent);
        if pity >= 100.0 {
            return 0;
        }

        let remaining = f64::from(self.base_cost(level)) * (100.0 - pity) / 100.0;
        if is_private_server {
            ceil_count(remaining * self.private_server_multiplier)
        } else {
            ceil_count(remaining)
        }
    }

    /// Pity percentage after `robberies` more robberies, capped at 100
    pub fn pity_after_robberies(
        &self,
        level: HyperchromeLevel,
        pity_percent: f64,
        robberies: u32,
        is_private_server: bool,
    ) -> f64 {
        let mut robberies_per_meter = f64::from(self.base_cost(level));
        if is_private_server {
            robberies_per_meter *= self.private_server_multiplier;
        }
        if robberies_per_meter <= 0.0 {
            return 100.0;
        }

        let gained = 100.0 * f64::from(robberies) / robberies_per_meter;
        clamp_percent(clamp_percent(pity_percent) + gained)
    }

    /// Check a table read from disk
    pub fn validate(&self) -> Result<(), DataError> {
        if self.base_costs.iter().any(|&cost| cost == 0) {
            return Err(DataError::Invalid("pity base costs must be positive".to_string()));
        }

        if self.base_costs.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(DataError::Invalid(format!(
                "pity base costs must not decrease with tier, got {:?}",
                self.base_costs
            )));
        }

        if !self.private_server_multiplier.is_finite() || self.private_server_multiplier < 1.0 {
            return Err(DataError::Invalid(format!(
                "private server multiplier must be at least 1, got {}",
                self.private_server_multiplier
            )));
        }

        Ok(())
    }
}

/// Robberies to reach the next tier using the default cost table
pub fn calculate_robberies_to_level_up(
    level: HyperchromeLevel,
    pity_percent: f64,
    is_private_server: bool,
) -> u32 {
    PityCostTable::default().robberies_to_level_up(level, pity_percent, is_private_server)
}

/// Calculator input as entered by the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PityState {
    pub level: HyperchromeLevel,
    pub pity_percent: f64,
    pub is_private_server: bool,
}

impl PityState {
    /// Build a state from raw input, clamping level to 0-4 and pity to 0-100
    pub fn new(level: u8, pity_percent: f64, is_private_server: bool) -> Self {
        Self {
            level: HyperchromeLevel::from_index(level),
            pity_percent: clamp_percent(pity_percent),
            is_private_server,
        }
    }

    pub fn robberies_to_level_up(&self, table: &PityCostTable) -> u32 {
        table.robberies_to_level_up(self.level, self.pity_percent, self.is_private_server)
    }
}
