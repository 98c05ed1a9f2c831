//! Run-log document structs.
//!
//! These types serialize 1:1 to the on-disk JSON log written for each
//! simulation run. Timestamps are carried as RFC 3339 strings rather than
//! parsed date types: the analyzer parses them leniently and falls back to
//! a placeholder when a stamp is malformed, so a bad timestamp must not
//! make the whole document undeserializable.

use serde::{Deserialize, Serialize};

use crate::ids::WorldId;

/// Fixed dimensions of a simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

impl GridSize {
    /// Total number of cells in the grid.
    pub const fn total_cells(self) -> u64 {
        (self.rows as u64).saturating_mul(self.cols as u64)
    }
}

/// Statistics recorded for one generation of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Generation number, starting at 0, strictly increasing with no gaps.
    pub generation: u64,
    /// RFC 3339 timestamp taken when the step was logged.
    pub timestamp: String,
    /// Number of live cells after this generation.
    pub alive_count: u32,
    /// Number of dead cells after this generation.
    pub dead_count: u32,
}

impl StepRecord {
    /// Percentage of cells alive, or 0 when the cell total is 0.
    pub fn percent_alive(&self) -> f64 {
        let total = u64::from(self.alive_count).saturating_add(u64::from(self.dead_count));
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = f64::from(self.alive_count) / (total as f64) * 100.0;
        pct
    }
}

/// The complete log document for one simulation run.
///
/// Created once at run start with an empty `steps` list, then rewritten in
/// full on every append. `end_time` is overwritten on each append, so a
/// run interrupted at any point still carries the stamp of its last logged
/// generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    /// Identifier of the run this document belongs to.
    pub world_id: WorldId,
    /// RFC 3339 timestamp taken when the run started.
    pub start_time: String,
    /// RFC 3339 timestamp of the most recent append.
    pub end_time: String,
    /// Initial alive probability, as the percentage given on the CLI.
    pub alive_percent: f64,
    /// Dimensions of the simulated grid.
    pub grid_size: GridSize,
    /// Per-generation records, in append order.
    pub steps: Vec<StepRecord>,
}

impl RunLog {
    /// Create a log document for a freshly started run with no steps.
    pub fn new(world_id: WorldId, alive_percent: f64, grid_size: GridSize, now: String) -> Self {
        Self {
            world_id,
            start_time: now.clone(),
            end_time: now,
            alive_percent,
            grid_size,
            steps: Vec::new(),
        }
    }

    /// Extract the alive-count trend series, in generation order.
    ///
    /// This is the in-memory series handed to the trend plotter; it is
    /// never persisted.
    pub fn alive_series(&self) -> Vec<u32> {
        self.steps.iter().map(|s| s.alive_count).collect()
    }
}
