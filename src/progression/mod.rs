//! Season progression systems

pub mod xp;
pub mod season;
pub mod curve;
pub mod projection;

pub use season::{Season, SeasonRateConstants, total_possible_exp, SECONDS_PER_DAY, MAX_TARGET_LEVEL};
pub use curve::{
    cumulative_xp, xp_required_for_level, progress_percentage, requirements, LevelRequirement,
};
pub use projection::{project, Projection};
