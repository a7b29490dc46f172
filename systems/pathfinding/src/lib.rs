#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Uniform-cost shortest-path search over maze grids.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use maze_chase_core::{CellCoord, Direction, MazeGrid};

/// Computes a shortest path between two open cells.
///
/// The search is Dijkstra's algorithm over 4-directional open-cell adjacency
/// with every edge weighing one step, driven by a binary-heap priority
/// queue. The returned path excludes `start` and includes `goal`; it is
/// empty when the goal is unreachable or when `start == goal`. Ties between
/// equal-distance candidates fall to whatever the heap yields, so callers
/// should rely on path length and validity rather than the exact cell
/// sequence.
#[must_use]
pub fn solve(grid: &MazeGrid, start: CellCoord, goal: CellCoord) -> Vec<CellCoord> {
    let mut frontier = BinaryHeap::new();
    let mut distances: HashMap<CellCoord, u32> = HashMap::new();
    let mut previous: HashMap<CellCoord, CellCoord> = HashMap::new();

    frontier.push(Reverse((0_u32, start)));
    let _ = distances.insert(start, 0);

    while let Some(Reverse((distance, current))) = frontier.pop() {
        if current == goal {
            return reconstruct(&previous, goal);
        }

        // Skip queue entries superseded by a shorter relaxation.
        if distances
            .get(&current)
            .map_or(false, |best| distance > *best)
        {
            continue;
        }

        for direction in Direction::ALL {
            let Some(neighbor) = direction.step(current) else {
                continue;
            };
            if !grid.is_open(neighbor) {
                continue;
            }

            let next_distance = distance + 1;
            if distances
                .get(&neighbor)
                .map_or(true, |best| next_distance < *best)
            {
                let _ = distances.insert(neighbor, next_distance);
                let _ = previous.insert(neighbor, current);
                frontier.push(Reverse((next_distance, neighbor)));
            }
        }
    }

    Vec::new()
}

fn reconstruct(previous: &HashMap<CellCoord, CellCoord>, goal: CellCoord) -> Vec<CellCoord> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(prior) = previous.get(&current).copied() {
        path.push(current);
        current = prior;
    }
    path.reverse();
    path
}
