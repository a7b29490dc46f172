#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure progression math mapping accumulated wins to level parameters.
//!
//! Every function here is stateless and clamped: the surrounding layers feed
//! in the session tier and win count, and read back grid dimensions, pickup
//! counts, and time budgets without touching any rendering or I/O concern.

use std::time::Duration;

use maze_chase_core::{DifficultyTier, GridSize};

/// Wins required to drive the grid from its tier minimum to its maximum.
const LEVELS_TO_MAX_GRID: u32 = 50;

/// Rendered playfield edge length in pixels; dividing by the grid dimension
/// keeps the on-screen maze area roughly constant as levels grow.
const PLAYFIELD_EXTENT: u32 = 841;

/// Wins beyond which the time-budget bonus stops growing.
const TIME_BONUS_WIN_CAP: u32 = 20;

/// Seconds of time budget granted per cell of the enemy's route.
const ROUTE_SECONDS_PER_CELL: f64 = 0.15;

/// Tuning constants governing one difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierTuning {
    /// Grid dimension at zero wins.
    pub min_grid: u32,
    /// Grid dimension reached after fifty wins.
    pub max_grid: u32,
    /// Flat seconds granted on top of the route-derived time.
    pub time_addition: f64,
    /// Per-win growth applied to the flat addition, capped at twenty wins.
    pub time_multiplier: f64,
    /// Seconds a pickup grants at zero wins.
    pub pickup_bonus_base: f64,
    /// Ceiling on the seconds a pickup can grant.
    pub pickup_bonus_cap: f64,
}

impl TierTuning {
    /// Tuning constants for the provided tier.
    #[must_use]
    pub const fn for_tier(tier: DifficultyTier) -> Self {
        match tier {
            DifficultyTier::Easy => Self {
                min_grid: 10,
                max_grid: 60,
                time_addition: 10.0,
                time_multiplier: 0.2,
                pickup_bonus_base: 10.0,
                pickup_bonus_cap: 30.0,
            },
            DifficultyTier::Hard => Self {
                min_grid: 15,
                max_grid: 90,
                time_addition: 5.0,
                time_multiplier: 0.1,
                pickup_bonus_base: 5.0,
                pickup_bonus_cap: 25.0,
            },
        }
    }
}

/// Grid dimension for the provided win count.
///
/// Interpolates linearly from the tier minimum to the tier maximum over
/// fifty wins, truncated to whole cells and clamped outside that range.
#[must_use]
pub fn grid_size(tier: DifficultyTier, wins: u32) -> GridSize {
    let tuning = TierTuning::for_tier(tier);
    let increment =
        f64::from(tuning.max_grid - tuning.min_grid) / f64::from(LEVELS_TO_MAX_GRID);
    let scaled = f64::from(tuning.min_grid) + f64::from(wins) * increment;
    GridSize::new((scaled as u32).clamp(tuning.min_grid, tuning.max_grid))
}

/// Rendered cell edge length for the provided grid dimension.
#[must_use]
pub fn cell_size(size: GridSize) -> u32 {
    PLAYFIELD_EXTENT / size.get().max(1)
}

/// Number of time-bonus pickups placed for the provided win count.
///
/// One pickup always spawns, a second appears past four wins, and another
/// joins for every ten wins up to five extras. Monotonically non-decreasing.
#[must_use]
pub fn pickup_count(wins: u32) -> u32 {
    let mut count = 1;
    if wins > 4 {
        count += 1;
    }
    count + (wins / 10).min(5)
}

/// Time allotted to clear a level.
///
/// Scales with the length of the enemy's route so larger mazes stay
/// clearable, plus a tier-specific flat addition that grows per win until
/// the twenty-win cap.
#[must_use]
pub fn time_budget(tier: DifficultyTier, wins: u32, route_length: u32) -> Duration {
    let tuning = TierTuning::for_tier(tier);
    let capped_wins = wins.min(TIME_BONUS_WIN_CAP);
    let seconds = f64::from(route_length) * ROUTE_SECONDS_PER_CELL
        + tuning.time_addition
        + tuning.time_addition * tuning.time_multiplier * f64::from(capped_wins);
    Duration::from_secs_f64(seconds)
}

/// Time credited to the level clock when a pickup is collected.
#[must_use]
pub fn pickup_time_bonus(tier: DifficultyTier, wins: u32) -> Duration {
    let tuning = TierTuning::for_tier(tier);
    let seconds =
        (tuning.pickup_bonus_base + 10.0 * (0.1 * f64::from(wins))).min(tuning.pickup_bonus_cap);
    Duration::from_secs_f64(seconds)
}
