#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Uniform random placement of entities on open maze cells.

use std::collections::HashSet;

use maze_chase_core::{CellCoord, MazeGrid};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Reasons a placement request may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SelectionError {
    /// Every open cell was claimed by the exclusion set.
    #[error("no open cell is available outside the exclusion set")]
    Exhausted,
}

/// Samples a uniformly random open cell outside the exclusion set.
///
/// Small mazes with many exclusions can legitimately run out of candidates;
/// that case is surfaced as [`SelectionError::Exhausted`] so callers can
/// relax their exclusions instead of receiving a silently defaulted cell.
pub fn random_free_spot<R: Rng>(
    grid: &MazeGrid,
    excluded: &HashSet<CellCoord>,
    rng: &mut R,
) -> Result<CellCoord, SelectionError> {
    let candidates: Vec<CellCoord> = grid
        .open_cells()
        .filter(|cell| !excluded.contains(cell))
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(SelectionError::Exhausted)
}
