//! Hyperchrome pity tracking

pub mod pity;

pub use pity::{
    HyperchromeLevel, PityCostTable, PityState, calculate_robberies_to_level_up,
    DEFAULT_BASE_COSTS, DEFAULT_PRIVATE_SERVER_MULTIPLIER, TIER_COUNT,
};
