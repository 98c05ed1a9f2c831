//! Run analysis: load a log, compute summary statistics, assemble the report.
//!
//! [`analyze`] never returns an error. Every failure mode -- unknown run,
//! unreadable log, a run that logged no steps -- is an [`Analysis`] variant
//! the caller prints. Only a well-formed log with at least one step yields
//! a full [`RunReport`].

use std::fmt;

use chrono::DateTime;
use tracing::debug;

use petri_store::{RunStore, StoreError};
use petri_types::{GridSize, StepRecord, WorldId};

use crate::plot::render_trend;

/// Chart width used for the report's trend plot, in columns.
const CHART_WIDTH: usize = 60;

/// Chart height used for the report's trend plot, in rows.
const CHART_HEIGHT: usize = 12;

/// Number of step records shown at each end of the report table.
const TABLE_EDGE: usize = 10;

/// Placeholder shown when the run duration cannot be computed.
const UNKNOWN_DURATION: &str = "Unknown";

/// Outcome of analyzing a run id.
#[derive(Debug)]
pub enum Analysis {
    /// No log exists for the given id (including ids that are not valid
    /// world ids -- no file can exist for those either).
    NotFound {
        /// The id exactly as the user supplied it.
        raw_id: String,
    },

    /// The log file exists but could not be read as a JSON document.
    Invalid {
        /// The run whose log is unreadable.
        world_id: WorldId,
        /// Description of the underlying failure.
        reason: String,
    },

    /// The log is valid but recorded no steps.
    Empty {
        /// The run that has nothing to report.
        world_id: WorldId,
    },

    /// A complete report over at least one step record.
    Report(Box<RunReport>),
}

/// Summary of one run, ready for display.
#[derive(Debug)]
pub struct RunReport {
    /// The analyzed run.
    pub world_id: WorldId,
    /// Start timestamp exactly as logged.
    pub start_time: String,
    /// End timestamp exactly as logged.
    pub end_time: String,
    /// Wall-clock duration, or the `Unknown` placeholder when a timestamp
    /// does not parse.
    pub duration: String,
    /// Initial alive percentage the run was started with.
    pub alive_percent: f64,
    /// Grid dimensions of the run.
    pub grid_size: GridSize,
    /// Total number of logged generations.
    pub generations: usize,
    /// Minimum alive count across the run.
    pub min_alive: u32,
    /// Maximum alive count across the run.
    pub max_alive: u32,
    /// Mean alive count across the run.
    pub average_alive: f64,
    /// Alive count of the first logged generation.
    pub initial_alive: u32,
    /// Alive count of the last logged generation.
    pub final_alive: u32,
    /// Rendered trend chart over the full alive-count series.
    pub chart: String,
    /// The first [`TABLE_EDGE`] step records.
    pub head: Vec<StepRecord>,
    /// The last [`TABLE_EDGE`] step records, when more than
    /// [`TABLE_EDGE`] exist; empty otherwise.
    pub tail: Vec<StepRecord>,
}

/// Analyze the run named by `raw_id` against the given store.
///
/// Loads the log, computes per-series statistics, renders the trend chart,
/// and selects the table rows. All failures come back as [`Analysis`]
/// variants; nothing is raised.
pub fn analyze(store: &RunStore, raw_id: &str) -> Analysis {
    let Ok(world_id) = raw_id.parse::<WorldId>() else {
        debug!(raw_id, "analyze target is not a parseable world id");
        return Analysis::NotFound {
            raw_id: raw_id.to_owned(),
        };
    };

    let log = match store.load(world_id) {
        Ok(log) => log,
        Err(StoreError::NotFound(_)) => {
            return Analysis::NotFound {
                raw_id: raw_id.to_owned(),
            };
        }
        Err(StoreError::Invalid { source, .. }) => {
            return Analysis::Invalid {
                world_id,
                reason: source.to_string(),
            };
        }
        Err(other) => {
            return Analysis::Invalid {
                world_id,
                reason: other.to_string(),
            };
        }
    };

    if log.steps.is_empty() {
        return Analysis::Empty { world_id };
    }

    let series = log.alive_series();
    let min_alive = series.iter().copied().min().unwrap_or(0);
    let max_alive = series.iter().copied().max().unwrap_or(0);
    let sum: u64 = series.iter().map(|v| u64::from(*v)).sum();
    #[allow(clippy::cast_precision_loss)]
    let average_alive = sum as f64 / series.len() as f64;
    let initial_alive = series.first().copied().unwrap_or(0);
    let final_alive = series.last().copied().unwrap_or(0);

    let head: Vec<StepRecord> = log.steps.iter().take(TABLE_EDGE).cloned().collect();
    let tail: Vec<StepRecord> = if log.steps.len() > TABLE_EDGE {
        let skip = log.steps.len().saturating_sub(TABLE_EDGE);
        log.steps.iter().skip(skip).cloned().collect()
    } else {
        Vec::new()
    };

    Analysis::Report(Box::new(RunReport {
        world_id,
        duration: duration_between(&log.start_time, &log.end_time),
        start_time: log.start_time,
        end_time: log.end_time,
        alive_percent: log.alive_percent,
        grid_size: log.grid_size,
        generations: log.steps.len(),
        min_alive,
        max_alive,
        average_alive,
        initial_alive,
        final_alive,
        chart: render_trend(&series, CHART_WIDTH, CHART_HEIGHT),
        head,
        tail,
    }))
}

/// Wall-clock span between two RFC 3339 stamps, or the `Unknown`
/// placeholder when either fails to parse.
fn duration_between(start: &str, end: &str) -> String {
    let (Ok(start), Ok(end)) = (
        DateTime::parse_from_rfc3339(start),
        DateTime::parse_from_rfc3339(end),
    ) else {
        return UNKNOWN_DURATION.to_owned();
    };

    let span = end.signed_duration_since(start);
    let total_seconds = span.num_seconds();
    let minutes = total_seconds.checked_div(60).unwrap_or(0);
    let seconds = total_seconds.checked_rem(60).unwrap_or(0);
    if minutes == 0 {
        let millis = span.num_milliseconds().checked_rem(1000).unwrap_or(0).abs();
        format!("{seconds}.{millis:03}s")
    } else {
        format!("{minutes}m {seconds:02}s")
    }
}

/// One table row of the step listing.
fn table_row(step: &StepRecord) -> String {
    format!(
        "{:>10}  {:>6}  {:>6}  {:>7.1}%",
        step.generation,
        step.alive_count,
        step.dead_count,
        step.percent_alive(),
    )
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { raw_id } => {
                write!(f, "No log found for world '{raw_id}'.")
            }
            Self::Invalid { world_id, reason } => {
                write!(f, "Log for world {world_id} is unreadable: {reason}")
            }
            Self::Empty { world_id } => {
                write!(f, "World {world_id} recorded no steps.")
            }
            Self::Report(report) => report.fmt(f),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "World {}", self.world_id)?;
        writeln!(f, "Started:  {}", self.start_time)?;
        writeln!(f, "Ended:    {}", self.end_time)?;
        writeln!(f, "Duration: {}", self.duration)?;
        writeln!(
            f,
            "Grid:     {} x {} ({} cells), initial alive chance {}%",
            self.grid_size.rows,
            self.grid_size.cols,
            self.grid_size.total_cells(),
            self.alive_percent,
        )?;
        writeln!(f)?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(
            f,
            "Alive cells: min {}, max {}, average {:.1}",
            self.min_alive, self.max_alive, self.average_alive,
        )?;
        writeln!(
            f,
            "Initial: {}, final: {}",
            self.initial_alive, self.final_alive,
        )?;
        writeln!(f, "{}", self.chart)?;
        writeln!(f, "{:>10}  {:>6}  {:>6}  {:>8}", "Generation", "Alive", "Dead", "% Alive")?;
        for step in &self.head {
            writeln!(f, "{}", table_row(step))?;
        }
        if !self.tail.is_empty() {
            writeln!(f, "{:>10}", "...")?;
            for step in &self.tail {
                writeln!(f, "{}", table_row(step))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]
mod tests {
    use petri_types::RunLog;

    use super::*;

    /// A store over a unique temp directory for one test.
    fn test_store(tag: &str) -> RunStore {
        let unique = format!(
            "petri_observer_test_{tag}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        RunStore::new(std::env::temp_dir().join(unique))
    }

    fn grid_size() -> GridSize {
        GridSize { rows: 30, cols: 50 }
    }

    /// Create a run and append the given alive counts as its steps.
    fn seeded_run(store: &RunStore, alive_counts: &[u32]) -> WorldId {
        let world_id = WorldId::new();
        store.create_run(world_id, 60.0, grid_size()).unwrap();
        for (generation, alive) in alive_counts.iter().enumerate() {
            store
                .append_step(world_id, generation as u64, *alive)
                .unwrap();
        }
        world_id
    }

    #[test]
    fn unknown_world_reports_not_found() {
        let store = test_store("not_found");
        let analysis = analyze(&store, &WorldId::new().to_string());
        assert!(matches!(analysis, Analysis::NotFound { .. }));
    }

    #[test]
    fn unparseable_id_reports_not_found() {
        let store = test_store("bad_id");
        let analysis = analyze(&store, "definitely-not-a-uuid");
        match analysis {
            Analysis::NotFound { raw_id } => assert_eq!(raw_id, "definitely-not-a-uuid"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_log_reports_invalid() {
        let store = test_store("corrupt");
        let world_id = WorldId::new();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.log_path(world_id), "]]] nope").unwrap();

        let analysis = analyze(&store, &world_id.to_string());
        assert!(matches!(analysis, Analysis::Invalid { .. }));

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn run_with_no_steps_reports_empty() {
        let store = test_store("empty");
        let world_id = WorldId::new();
        store.create_run(world_id, 10.0, grid_size()).unwrap();

        let analysis = analyze(&store, &world_id.to_string());
        assert!(matches!(analysis, Analysis::Empty { .. }));

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn three_step_run_summarizes_correctly() {
        let store = test_store("stats");
        let world_id = seeded_run(&store, &[10, 12, 8]);

        let analysis = analyze(&store, &world_id.to_string());
        let Analysis::Report(report) = analysis else {
            panic!("expected a full report");
        };
        assert_eq!(report.generations, 3);
        assert_eq!(report.min_alive, 8);
        assert_eq!(report.max_alive, 12);
        assert!((report.average_alive - 10.0).abs() < f64::EPSILON);
        assert_eq!(report.initial_alive, 10);
        assert_eq!(report.final_alive, 8);
        assert_ne!(report.duration, UNKNOWN_DURATION);
        assert!(report.chart.contains('*'));
        assert_eq!(report.head.len(), 3);
        assert!(report.tail.is_empty());

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn long_run_tables_first_and_last_ten() {
        let store = test_store("table");
        let counts: Vec<u32> = (0..25).collect();
        let world_id = seeded_run(&store, &counts);

        let Analysis::Report(report) = analyze(&store, &world_id.to_string()) else {
            panic!("expected a full report");
        };
        assert_eq!(report.head.len(), 10);
        assert_eq!(report.tail.len(), 10);
        assert_eq!(report.head.first().unwrap().generation, 0);
        assert_eq!(report.tail.last().unwrap().generation, 24);

        let text = report.to_string();
        assert!(text.contains("..."));

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn malformed_timestamps_degrade_to_unknown_duration() {
        let store = test_store("badtime");
        let world_id = WorldId::new();
        let mut log = RunLog::new(world_id, 50.0, grid_size(), "yesterday-ish".to_owned());
        log.steps.push(StepRecord {
            generation: 0,
            timestamp: "also not a time".to_owned(),
            alive_count: 5,
            dead_count: 1495,
        });
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(
            store.log_path(world_id),
            serde_json::to_string_pretty(&log).unwrap(),
        )
        .unwrap();

        let Analysis::Report(report) = analyze(&store, &world_id.to_string()) else {
            panic!("expected a full report");
        };
        assert_eq!(report.duration, UNKNOWN_DURATION);

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn display_covers_every_outcome() {
        let not_found = Analysis::NotFound {
            raw_id: "zzz".to_owned(),
        };
        assert!(not_found.to_string().contains("zzz"));

        let world_id = WorldId::new();
        let invalid = Analysis::Invalid {
            world_id,
            reason: "bad json".to_owned(),
        };
        assert!(invalid.to_string().contains("bad json"));

        let empty = Analysis::Empty { world_id };
        assert!(empty.to_string().contains("no steps"));
    }
}
