#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod evolution;
mod patterns;

pub use evolution::{Generations, generations, next_state, step, step_par};
pub use patterns::Pattern;

use anyhow::{Context, bail, ensure};
use arrayvec::ArrayVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::ops::Index;
use std::slice::{ChunksExact, Iter};

/// One generation of a bounded Life board.
///
/// Cells are stored row-major and a `Grid` has no mutators: every generation
/// is built whole by one of the constructors or by [`step`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Builds a grid by asking `init` for every cell, in row-major order.
    pub fn new<F>(rows: usize, cols: usize, mut init: F) -> Self
    where
        F: FnMut(Loc) -> bool,
    {
        assert!(rows > 0 && cols > 0);
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Loc::new(row, col)))
            .map(&mut init)
            .collect();
        Self::with_cells(rows, cols, cells)
    }

    pub fn dead(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, |_| false)
    }

    /// Draws one cell per call from `source`, row by row.
    pub fn seeded<S>(rows: usize, cols: usize, source: &mut S) -> Self
    where
        S: CellSource + ?Sized,
    {
        let grid = Self::new(rows, cols, |_| source.next_alive());
        log::trace!(
            "seeded {}x{} grid with {} live cells",
            rows,
            cols,
            grid.live_count()
        );
        grid
    }

    /// Stamps `pattern` onto a dead grid with its top-left corner at `origin`.
    /// Pattern cells that land outside the grid are dropped.
    pub fn with_pattern(rows: usize, cols: usize, pattern: Pattern, origin: Loc) -> Self {
        Self::new(rows, cols, |loc| {
            let offset = (
                loc.row.checked_sub(origin.row),
                loc.col.checked_sub(origin.col),
            );
            pattern
                .cells()
                .iter()
                .any(|&(row, col)| offset == (Some(row), Some(col)))
        })
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> anyhow::Result<Self> {
        ensure!(!rows.is_empty(), "grid has no rows");
        let cols = rows[0].len();
        ensure!(cols > 0, "grid has no columns");
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            bail!("row {} has {} cells, expected {}", index, row.len(), cols);
        }

        let num_rows = rows.len();
        Ok(Self::with_cells(
            num_rows,
            cols,
            rows.into_iter().flatten().collect(),
        ))
    }

    /// Parses a text board: one line per row, `*`, `#` or `O` for a live
    /// cell and `.` or `_` for a dead one. Blank lines around the board are
    /// ignored.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            bail!("grid text is empty");
        };

        let rows = lines[first..=last]
            .iter()
            .enumerate()
            .map(|(index, line)| {
                Self::parse_row(line).with_context(|| format!("line {}", first + index + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    fn parse_row(line: &str) -> anyhow::Result<Vec<bool>> {
        line.chars()
            .enumerate()
            .map(|(col, ch)| match ch {
                '*' | '#' | 'O' => Ok(true),
                '.' | '_' => Ok(false),
                other => bail!("unexpected character {:?} in column {}", other, col + 1),
            })
            .collect()
    }

    pub(crate) fn with_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_all_dead(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Panics if `row` or `col` is out of bounds.
    pub fn cell_at(&self, row: usize, col: usize) -> bool {
        self[Loc::new(row, col)]
    }

    pub fn get(&self, loc: Loc) -> Option<bool> {
        self.cell(loc).copied()
    }

    pub fn cells_iter(&self) -> Iter<'_, bool> {
        self.cells.iter()
    }

    pub fn rows_iter(&self) -> ChunksExact<'_, bool> {
        self.cells.chunks_exact(self.cols)
    }

    /// Live cells among the in-bounds neighbors of `loc`.
    pub fn neighbor_count(&self, loc: Loc) -> usize {
        Neighborhood::new(self, loc).live_count()
    }

    pub(crate) fn loc_of(&self, index: usize) -> Loc {
        Loc::new(index / self.cols, index % self.cols)
    }

    fn cell(&self, loc: Loc) -> Option<&bool> {
        loc.grid_index(self.rows, self.cols)
            .map(|index| &self.cells[index])
    }
}

impl Index<Loc> for Grid {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            let line: String = row
                .iter()
                .map(|&alive| if alive { '*' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The in-bounds cells surrounding one cell. The board has hard edges, so
/// edge cells have 5 neighbors and corner cells 3.
pub struct Neighborhood<'a> {
    grid: &'a Grid,
    neighbors: ArrayVec<Loc, 8>,
}

impl<'a> Neighborhood<'a> {
    pub fn new(grid: &'a Grid, center: Loc) -> Self {
        let neighbors = NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(row_offset, col_offset)| {
                Some(Loc::new(
                    Self::offset_index(center.row, row_offset, grid.rows())?,
                    Self::offset_index(center.col, col_offset, grid.cols())?,
                ))
            })
            .collect();
        Self { grid, neighbors }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn locs(&self) -> &[Loc] {
        &self.neighbors
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(bool),
    {
        for &loc in &self.neighbors {
            f(self.grid[loc]);
        }
    }

    pub fn live_count(&self) -> usize {
        let mut result = 0;
        self.for_neighbor_cells(|alive| {
            if alive {
                result += 1;
            }
        });
        result
    }

    fn offset_index(index: usize, offset: isize, max: usize) -> Option<usize> {
        index
            .checked_add_signed(offset)
            .filter(|&offset_index| offset_index < max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: usize,
    pub col: usize,
}

impl Loc {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, rows: usize, cols: usize) -> Option<usize> {
        if self.row < rows && self.col < cols {
            Some(self.row * cols + self.col)
        } else {
            None
        }
    }
}

/// Supplies the initial state of each cell.
pub trait CellSource {
    fn next_alive(&mut self) -> bool;
}

impl<F> CellSource for F
where
    F: FnMut() -> bool,
{
    fn next_alive(&mut self) -> bool {
        self()
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

/// Each cell alive independently with probability `density`.
#[derive(Debug)]
pub struct RandomCells {
    rand: Random,
    density: f64,
}

impl RandomCells {
    pub fn new(rand: Random, density: f64) -> Self {
        assert!((0.0..=1.0).contains(&density));
        Self { rand, density }
    }

    pub fn density(&self) -> f64 {
        self.density
    }
}

impl CellSource for RandomCells {
    fn next_alive(&mut self) -> bool {
        self.rand.next_bool(self.density)
    }
}
