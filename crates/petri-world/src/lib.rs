//! Toroidal Game of Life grid engine.
//!
//! This crate owns grid state and the generation transition function. The
//! rule set is fixed: standard Conway B3/S23 on a 30×50 torus. Edges wrap,
//! so a cell in row 0 counts row `ROWS - 1` among its neighbors and the
//! leftmost column neighbors the rightmost.
//!
//! # Design Principles
//!
//! - [`Grid::step`] is a pure function: it reads the pre-step grid and
//!   produces a fresh grid, never mutating its input. All cells transition
//!   synchronously against the same snapshot.
//! - Randomness is injected, never ambient: [`Grid::random`] takes the
//!   generator as an argument so callers (and tests) control seeding.
//! - The initial alive probability is deliberately not clamped. Values
//!   below 0 produce an all-dead grid and values above 1 an all-alive one,
//!   matching the comparison `uniform_sample < probability`.

pub mod grid;

pub use grid::{COLS, Grid, ROWS};
