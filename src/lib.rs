//! SeasonCalc - season progression and Hyperchrome pity calculators
//!
//! Turns a season's rate constants into a per-level XP curve, projects
//! whether a player can still hit the target level, and converts Hyperchrome
//! pity into the robberies left until the next tier.

pub mod progression;
pub mod hyperchrome;
pub mod data;
pub mod ui;

// Re-export commonly used types
pub use progression::{Season, SeasonRateConstants, LevelRequirement, Projection, project};
pub use hyperchrome::{HyperchromeLevel, PityCostTable, PityState, calculate_robberies_to_level_up};
pub use data::{DataError, SeasonData};
