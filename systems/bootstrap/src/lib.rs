#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Maze Chase experience.

use maze_chase_core::{CellCoord, LevelPhase, MazeGrid};
use maze_chase_world::{query, World};

/// Produces data required to greet the player and present the level.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the active maze required for rendering.
    #[must_use]
    pub fn maze<'world>(&self, world: &'world World) -> &'world MazeGrid {
        query::maze(world)
    }

    /// Captures the placements and counters a presentation layer needs for
    /// one frame.
    #[must_use]
    pub fn level_overview(&self, world: &World) -> LevelOverview {
        LevelOverview {
            phase: query::phase(world),
            player: query::player_cell(world),
            goal: query::goal_cell(world),
            enemy: query::enemy_cell(world),
            pickups: query::pickup_cells(world).to_vec(),
            cell_size: query::cell_size(world),
            wins: query::wins(world),
            losses: query::losses(world),
            score: query::score(world),
        }
    }
}

/// Frame-ready snapshot of the level placements and session counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelOverview {
    /// Lifecycle state of the active level.
    pub phase: LevelPhase,
    /// Cell currently occupied by the player.
    pub player: CellCoord,
    /// Cell holding the level's goal.
    pub goal: CellCoord,
    /// Cell currently occupied by the enemy.
    pub enemy: CellCoord,
    /// Cells still holding uncollected pickups.
    pub pickups: Vec<CellCoord>,
    /// Rendered cell edge length for the active level.
    pub cell_size: u32,
    /// Levels cleared in the current session.
    pub wins: u32,
    /// Levels lost in the current session.
    pub losses: u32,
    /// Score banked in the current session.
    pub score: u32,
}
