//! The fixed-size toroidal grid and its transition function.

use petri_types::GridSize;
use rand::Rng;

/// Number of grid rows. Fixed for every run.
pub const ROWS: usize = 30;

/// Number of grid columns. Fixed for every run.
pub const COLS: usize = 50;

/// A 30×50 matrix of cell states with toroidal topology.
///
/// Cells are stored row-major in a flat vector. The grid is immutable once
/// built; each generation is produced as a new grid by [`Grid::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cell states, `true` = alive. Length is always `ROWS * COLS`.
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn dead() -> Self {
        Self {
            cells: vec![false; ROWS * COLS],
        }
    }

    /// Create a grid where each cell is independently alive with the given
    /// probability.
    ///
    /// The probability is compared against a uniform sample in `[0, 1)` and
    /// is intentionally not clamped: a negative value yields an all-dead
    /// grid, a value above 1 an all-alive one.
    pub fn random(rng: &mut impl Rng, alive_probability: f64) -> Self {
        let cells = (0..ROWS * COLS)
            .map(|_| rng.random::<f64>() < alive_probability)
            .collect();
        Self { cells }
    }

    /// Return the grid dimensions.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn size() -> GridSize {
        GridSize {
            rows: ROWS as u32,
            cols: COLS as u32,
        }
    }

    /// Whether the cell at `(row, col)` is alive.
    ///
    /// Out-of-range coordinates read as dead; in-range lookups go through
    /// the flat row-major index.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        if row >= ROWS || col >= COLS {
            return false;
        }
        self.cells
            .get(row.saturating_mul(COLS).saturating_add(col))
            .copied()
            .unwrap_or(false)
    }

    /// Number of live cells in the grid.
    pub fn alive_count(&self) -> u32 {
        let count = self.cells.iter().filter(|cell| **cell).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Count the live neighbors of `(row, col)` on the torus.
    ///
    /// All 8 surrounding positions are inspected with wrap-around indexing;
    /// the cell itself is never counted. The result is in `[0, 8]`.
    // Offsets stay below 2 * dimension, so the additions cannot overflow
    // and the modulo keeps every index in range.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0_u8;
        for dr in [ROWS - 1, 0, 1] {
            for dc in [COLS - 1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = (row + dr) % ROWS;
                let nc = (col + dc) % COLS;
                if self.is_alive(nr, nc) {
                    count = count.saturating_add(1);
                }
            }
        }
        count
    }

    /// Produce the next generation.
    ///
    /// Applies B3/S23 to every cell simultaneously: a live cell survives
    /// with 2 or 3 live neighbors, a dead cell is born with exactly 3. All
    /// neighbor counts are taken against `self`, the pre-step grid, which
    /// is left untouched.
    pub fn step(&self) -> Self {
        let cells = (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .map(|(row, col)| {
                let neighbors = self.count_neighbors(row, col);
                if self.is_alive(row, col) {
                    neighbors == 2 || neighbors == 3
                } else {
                    neighbors == 3
                }
            })
            .collect();
        Self { cells }
    }
}
