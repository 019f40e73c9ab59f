use crate::{Grid, Loc, Neighborhood};
use rayon::prelude::*;

/// Conway's rule: a live cell survives with 2 or 3 live neighbors, a dead
/// cell is born with exactly 3.
pub fn next_state(alive: bool, neighbors: usize) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Computes the next generation. Neighbors outside the grid count as dead.
pub fn step(grid: &Grid) -> Grid {
    Grid::new(grid.rows(), grid.cols(), |loc| next_cell(grid, loc))
}

/// Same result as [`step`], with cells computed on the rayon thread pool.
pub fn step_par(grid: &Grid) -> Grid {
    let cells = (0..grid.num_cells())
        .into_par_iter()
        .map(|index| next_cell(grid, grid.loc_of(index)))
        .collect();
    Grid::with_cells(grid.rows(), grid.cols(), cells)
}

fn next_cell(grid: &Grid, loc: Loc) -> bool {
    next_state(grid[loc], Neighborhood::new(grid, loc).live_count())
}

/// Successive generations after `grid`, without end.
pub fn generations(grid: &Grid) -> Generations {
    Generations {
        current: grid.clone(),
    }
}

#[derive(Clone, Debug)]
pub struct Generations {
    current: Grid,
}

impl Iterator for Generations {
    type Item = Grid;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = step(&self.current);
        Some(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pattern, Random, RandomCells};

    #[test]
    fn rule_table() {
        for neighbors in 0..=8 {
            assert_eq!(next_state(true, neighbors), neighbors == 2 || neighbors == 3);
            assert_eq!(next_state(false, neighbors), neighbors == 3);
        }
    }

    #[test]
    fn step_leaves_input_untouched() {
        let grid = Grid::with_pattern(5, 5, Pattern::Blinker, Loc::new(2, 1));
        let before = grid.clone();
        let next = step(&grid);

        assert_eq!(grid, before);
        assert_ne!(next, grid);
    }

    #[test]
    fn parallel_step_matches_serial() {
        for seed in 0..20 {
            let grid = Grid::seeded(17, 23, &mut RandomCells::new(Random::from_seed(seed), 0.5));

            assert_eq!(step_par(&grid), step(&grid), "seed {seed}");
        }
    }

    #[test]
    fn block_survives_in_corner() {
        let grid = Grid::parse("**..\n**..\n....").unwrap();

        assert_eq!(step(&grid), grid);
    }

    #[test]
    fn full_grid_keeps_only_corners() {
        let grid = Grid::parse("****\n****\n****\n****").unwrap();
        let next = step(&grid);

        assert_eq!(next, Grid::parse("*..*\n....\n....\n*..*").unwrap());
    }

    #[test]
    fn generations_follow_step() {
        let grid = Grid::seeded(10, 10, &mut RandomCells::new(Random::from_seed(11), 0.5));
        let mut expected = grid.clone();

        for generation in generations(&grid).take(5) {
            expected = step(&expected);
            assert_eq!(generation, expected);
        }
    }
}
