#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized depth-first maze carving.

use std::collections::HashSet;

use maze_chase_core::{CellCoord, CellKind, Direction, GridSize, MazeGrid};
use rand::{seq::SliceRandom, Rng};

/// Carves a maze of the requested dimension using the provided random source.
///
/// Carving runs a depth-first search over cells spaced two units apart: every
/// accepted step opens both the landing cell and the wall cell between it and
/// the previous one, so corridors are exactly one unit wide. The search
/// backtracks through an explicit stack until no unvisited cell remains,
/// which leaves the open cells forming a single 4-connected component.
///
/// The same seed always carves the same maze.
///
/// # Panics
///
/// Panics when `size` is below 2; degenerate dimensions are a caller
/// contract violation rather than a recoverable condition.
#[must_use]
pub fn generate<R: Rng>(size: GridSize, rng: &mut R) -> MazeGrid {
    assert!(
        size.get() >= 2,
        "maze generation requires a dimension of at least 2"
    );

    let dimension = size.get();
    let mut cells =
        vec![CellKind::Wall; usize::try_from(dimension).unwrap_or(0).pow(2)];

    let start = CellCoord::new(rng.gen_range(0..dimension), rng.gen_range(0..dimension));
    let mut visited = HashSet::new();
    let mut stack = vec![start];
    carve(&mut cells, dimension, start);
    let _ = visited.insert(start);

    let mut directions = Direction::ALL;
    while let Some(current) = stack.last().copied() {
        directions.shuffle(rng);

        let mut advanced = false;
        for direction in directions {
            let Some(passage) = direction.step(current) else {
                continue;
            };
            let Some(target) = direction.step(passage) else {
                continue;
            };

            if target.column() < dimension
                && target.row() < dimension
                && !visited.contains(&target)
            {
                carve(&mut cells, dimension, passage);
                carve(&mut cells, dimension, target);
                let _ = visited.insert(target);
                stack.push(target);
                advanced = true;
                break;
            }
        }

        if !advanced {
            let _ = stack.pop();
        }
    }

    MazeGrid::from_cells(size, cells)
}

fn carve(cells: &mut [CellKind], dimension: u32, cell: CellCoord) {
    let index = cell.row() as usize * dimension as usize + cell.column() as usize;
    cells[index] = CellKind::Open;
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use maze_chase_core::{CellCoord, Direction, GridSize, MazeGrid};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::generate;

    fn reachable_from(grid: &MazeGrid, start: CellCoord) -> usize {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let _ = visited.insert(start);
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            for direction in Direction::ALL {
                let Some(neighbor) = direction.step(cell) else {
                    continue;
                };
                if grid.is_open(neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len()
    }

    #[test]
    fn carved_cells_form_a_single_component() {
        for size in [3, 5, 8, 13, 20] {
            let mut rng = ChaCha8Rng::seed_from_u64(u64::from(size));
            let grid = generate(GridSize::new(size), &mut rng);

            let start = grid.open_cells().next().expect("carving opens a cell");
            assert_eq!(
                reachable_from(&grid, start),
                grid.open_cell_count(),
                "size {size} produced a disconnected pocket"
            );
        }
    }

    #[test]
    fn open_cell_count_matches_spanning_tree_shape() {
        // A depth-first spanning tree over C carve cells opens C cells plus
        // C - 1 passages, so the total open count is always odd.
        for size in [3, 6, 9, 12] {
            let mut rng = ChaCha8Rng::seed_from_u64(7 + u64::from(size));
            let grid = generate(GridSize::new(size), &mut rng);
            assert_eq!(grid.open_cell_count() % 2, 1, "size {size}");
        }
    }

    #[test]
    fn generation_is_deterministic_for_same_seed() {
        let mut first_rng = ChaCha8Rng::seed_from_u64(42);
        let mut second_rng = ChaCha8Rng::seed_from_u64(42);

        let first = generate(GridSize::new(11), &mut first_rng);
        let second = generate(GridSize::new(11), &mut second_rng);

        assert_eq!(first, second);
    }

    #[test]
    fn minimal_dimension_opens_a_single_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = generate(GridSize::new(2), &mut rng);
        assert_eq!(grid.open_cell_count(), 1);
    }

    #[test]
    #[should_panic(expected = "dimension of at least 2")]
    fn degenerate_dimension_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let _ = generate(GridSize::new(1), &mut rng);
    }
}
