#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh session with a fixed difficulty tier and session seed.
    ConfigureSession {
        /// Difficulty tier selected for the lifetime of the session.
        tier: DifficultyTier,
        /// Seed from which every per-level random stream is derived.
        seed: u64,
    },
    /// Builds the next level from the current win count.
    BeginLevel,
    /// Advances the level clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance one cell in the given direction.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the enemy advance one cell along its pursuit route.
    StepEnemy {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a session was configured and its first level built.
    SessionConfigured {
        /// Difficulty tier fixed for the session.
        tier: DifficultyTier,
        /// Session seed from which level layouts are derived.
        seed: u64,
    },
    /// Announces that a freshly generated level became active.
    LevelBegan {
        /// Win count the level was derived from.
        wins: u32,
        /// Dimension of the generated maze.
        size: GridSize,
        /// Rendered cell edge length derived from the grid dimension.
        cell_size: u32,
        /// Number of time-bonus pickups placed in the maze.
        pickups: u32,
        /// Time allotted to clear the level.
        time_budget: Duration,
        /// Length of the enemy's route to the goal at level start.
        route_length: u32,
    },
    /// Indicates that the level clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved between two open cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after completing the move.
        to: CellCoord,
    },
    /// Confirms that the player collected a time-bonus pickup.
    PickupCollected {
        /// Cell the pickup occupied.
        cell: CellCoord,
        /// Time credited to the level clock.
        bonus: Duration,
        /// Session score after the pickup was banked.
        score: u32,
    },
    /// Confirms that the player reached the goal and won the level.
    GoalReached {
        /// Win count after the victory was recorded.
        wins: u32,
        /// Session score after the victory was banked.
        score: u32,
    },
    /// Confirms that the enemy advanced along its pursuit route.
    EnemyAdvanced {
        /// Cell the enemy occupied before moving.
        from: CellCoord,
        /// Cell the enemy occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that the enemy entered the player's cell, ending the level.
    PlayerCaught {
        /// Cell where the capture happened.
        cell: CellCoord,
    },
    /// Reports that the level clock ran out, ending the level.
    TimeExpired {
        /// Loss count after the expiry was recorded.
        losses: u32,
    },
}

/// Difficulty tier fixed once per session, governing progression constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    /// Smaller mazes and a generous time curve.
    Easy,
    /// Larger mazes and a tight time curve.
    Hard,
}

/// Lifecycle state of the active level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelPhase {
    /// The clock is running and steps are accepted.
    Active,
    /// The player reached the goal; awaiting the next level.
    Cleared,
    /// The clock expired or the enemy caught the player; awaiting a rebuild.
    Failed,
}

/// Traversability of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Impassable cell.
    Wall,
    /// Cell traversable by entities.
    Open,
}

/// Cardinal movement directions available to entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four cardinal directions in a fixed scan order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Cell reached by stepping once from `cell`, when the coordinate space
    /// permits it. Grid bounds remain the caller's concern.
    #[must_use]
    pub fn step(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Direction::North => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Direction::East => cell
                .column()
                .checked_add(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Direction::South => cell
                .row()
                .checked_add(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Direction::West => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
        }
    }

    /// Direction that carries `from` onto `to`, when the two cells are
    /// exactly one step apart.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if to.row() > from.row() {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Dimension of a square maze measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a new grid dimension wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying dimension.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Square occupancy grid produced by maze generation.
///
/// The grid is immutable once built; levels replace it wholesale rather than
/// carving it in place. Every query is total: coordinates outside the grid
/// read as walls instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    size: GridSize,
    cells: Vec<CellKind>,
}

impl MazeGrid {
    /// Builds a grid from row-major cell contents.
    ///
    /// # Panics
    ///
    /// Panics when `cells` does not hold exactly `size * size` entries.
    #[must_use]
    pub fn from_cells(size: GridSize, cells: Vec<CellKind>) -> Self {
        let expected = size.get() as usize * size.get() as usize;
        assert_eq!(
            cells.len(),
            expected,
            "maze cell storage must match the declared dimension"
        );
        Self { size, cells }
    }

    /// Dimension of the square grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.size.get() && cell.row() < self.size.get()
    }

    /// Reports whether the cell is traversable.
    ///
    /// Coordinates outside the grid are defined as not open rather than an
    /// error, so movement validation never has to special-case the border.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells[index] == CellKind::Open)
    }

    /// Iterator over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let size = self.size.get();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, kind)| match kind {
                CellKind::Open => {
                    let index = index as u32;
                    Some(CellCoord::new(index % size, index / size))
                }
                CellKind::Wall => None,
            })
    }

    /// Number of open cells contained in the grid.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|kind| **kind == CellKind::Open)
            .count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size.get()).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
