//! The run-log store: one JSON document per run in a flat directory.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use petri_types::{GridSize, RunLog, StepRecord, WorldId};

use crate::error::StoreError;

/// Handle to the flat directory holding one log file per run.
#[derive(Debug, Clone)]
pub struct RunStore {
    /// Directory containing `<world_id>.json` files.
    dir: PathBuf,
}

impl RunStore {
    /// Create a store handle over the given directory.
    ///
    /// The directory itself is created lazily by [`RunStore::create_run`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Return the directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file for a run, derived from its id.
    pub fn log_path(&self, world_id: WorldId) -> PathBuf {
        self.dir.join(format!("{world_id}.json"))
    }

    /// Create the log document for a freshly started run.
    ///
    /// Ensures the log directory exists (idempotent) and writes an initial
    /// document with the run metadata and an empty step list. This is the
    /// one store operation that must fail loudly: without it the run has
    /// no analyzable artifact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or file cannot be
    /// written, or [`StoreError::Serialize`] if encoding fails.
    pub fn create_run(
        &self,
        world_id: WorldId,
        alive_percent: f64,
        grid_size: GridSize,
    ) -> Result<RunLog, StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let log = RunLog::new(world_id, alive_percent, grid_size, now_rfc3339());
        self.write_document(&log)?;
        debug!(world_id = %world_id, path = %self.log_path(world_id).display(), "run log created");
        Ok(log)
    }

    /// Append one generation's statistics to a run's log.
    ///
    /// Reads the full existing document, pushes a [`StepRecord`] with a
    /// fresh timestamp and the derived dead count, overwrites `end_time`,
    /// and rewrites the whole file. Callers in the live simulation loop
    /// should treat a returned error as diagnostic only: warn and keep
    /// going, never interrupt the render cadence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the run has no log yet, and the
    /// load/write errors of [`RunStore::load`] otherwise.
    pub fn append_step(
        &self,
        world_id: WorldId,
        generation: u64,
        alive_count: u32,
    ) -> Result<(), StoreError> {
        let mut log = self.load(world_id)?;
        let now = now_rfc3339();
        let dead = log
            .grid_size
            .total_cells()
            .saturating_sub(u64::from(alive_count));
        log.steps.push(StepRecord {
            generation,
            timestamp: now.clone(),
            alive_count,
            dead_count: u32::try_from(dead).unwrap_or(u32::MAX),
        });
        log.end_time = now;
        self.write_document(&log)?;
        debug!(world_id = %world_id, generation, alive_count, "step appended");
        Ok(())
    }

    /// Load a run's log document by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no file exists for the id,
    /// [`StoreError::Invalid`] if the file is not parseable JSON, or
    /// [`StoreError::Io`] if reading fails.
    pub fn load(&self, world_id: WorldId) -> Result<RunLog, StoreError> {
        let path = self.log_path(world_id);
        if !path.exists() {
            return Err(StoreError::NotFound(world_id));
        }
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Invalid { world_id, source })
    }

    /// Serialize a document and write it to its run's file.
    fn write_document(&self, log: &RunLog) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(log)
            .map_err(|source| StoreError::Serialize { source })?;
        std::fs::write(self.log_path(log.world_id), contents)?;
        Ok(())
    }
}

/// Current wall-clock time as an RFC 3339 string.
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    /// A store over a unique temp directory for one test.
    fn test_store(tag: &str) -> RunStore {
        let unique = format!(
            "petri_store_test_{tag}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        RunStore::new(std::env::temp_dir().join(unique))
    }

    fn grid_size() -> GridSize {
        GridSize { rows: 30, cols: 50 }
    }

    #[test]
    fn create_then_load_roundtrips_metadata() {
        let store = test_store("create");
        let world_id = WorldId::new();

        let created = store.create_run(world_id, 60.0, grid_size()).unwrap();
        let loaded = store.load(world_id).unwrap();

        assert_eq!(created, loaded);
        assert_eq!(loaded.world_id, world_id);
        assert!(loaded.steps.is_empty());
        assert!((loaded.alive_percent - 60.0).abs() < f64::EPSILON);

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn appended_steps_reload_in_order_with_full_cell_totals() {
        let store = test_store("append");
        let world_id = WorldId::new();
        store.create_run(world_id, 35.0, grid_size()).unwrap();

        for (generation, alive) in [(0_u64, 10_u32), (1, 12), (2, 8)] {
            store.append_step(world_id, generation, alive).unwrap();
        }

        let log = store.load(world_id).unwrap();
        assert_eq!(log.steps.len(), 3);
        for (index, step) in log.steps.iter().enumerate() {
            assert_eq!(step.generation, index as u64);
            assert_eq!(
                u64::from(step.alive_count) + u64::from(step.dead_count),
                grid_size().total_cells(),
            );
        }
        assert_eq!(log.alive_series(), vec![10, 12, 8]);

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn append_refreshes_the_end_timestamp() {
        let store = test_store("endtime");
        let world_id = WorldId::new();
        let created = store.create_run(world_id, 50.0, grid_size()).unwrap();

        store.append_step(world_id, 0, 42).unwrap();
        let log = store.load(world_id).unwrap();

        assert_eq!(log.start_time, created.start_time);
        assert!(log.end_time >= created.end_time);
        assert_eq!(log.steps.last().unwrap().timestamp, log.end_time);

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn load_of_unknown_world_is_not_found() {
        let store = test_store("missing");
        let result = store.load(WorldId::new());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn append_to_unknown_world_is_not_found() {
        let store = test_store("append_missing");
        let result = store.append_step(WorldId::new(), 0, 1);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn garbage_file_loads_as_invalid() {
        let store = test_store("garbage");
        let world_id = WorldId::new();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.log_path(world_id), "{ not json").unwrap();

        let result = store.load(world_id);
        assert!(matches!(result, Err(StoreError::Invalid { .. })));

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn log_path_is_derived_from_the_id() {
        let store = test_store("path");
        let world_id = WorldId::new();
        let path = store.log_path(world_id);
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("{world_id}.json"),
        );
    }
}
