//! Terminal binary for the Petri life observatory.
//!
//! Two commands share one binary: `run` seeds a fresh 30×50 world and
//! animates it in the terminal while journaling every generation to a
//! JSON log, and `analyze` reconstructs a past run into a statistics
//! report with an ASCII trend chart.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, stderr so frames stay clean)
//! 2. Parse the command line (`run <alive_percent>` | `analyze <world_id>`)
//! 3. Load configuration from `petri-config.yaml` when present
//! 4. Dispatch to the simulation loop or the analyzer
//! 5. Exit non-zero on usage errors or fatal startup failures

mod config;
mod error;
mod render;
mod simulate;

use std::path::Path;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use petri_observer::analyze;
use petri_store::RunStore;

use crate::config::{CONFIG_FILE, EngineConfig};
use crate::error::EngineError;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    /// Start a new simulation with the given initial alive percentage.
    Run {
        /// Percentage in 0-100 (accepted unvalidated beyond parseability).
        alive_percent: f64,
    },
    /// Print the analysis report for an existing run.
    Analyze {
        /// The run id exactly as supplied.
        raw_id: String,
    },
}

/// Application entry point.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_command(&args) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    match dispatch(&command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration and execute the chosen command.
fn dispatch(command: &Command) -> Result<(), EngineError> {
    let config = load_config()?;
    match command {
        Command::Run { alive_percent } => simulate::run_world(&config, *alive_percent),
        Command::Analyze { raw_id } => {
            let store = RunStore::new(&config.storage.log_dir);
            println!("{}", analyze(&store, raw_id));
            Ok(())
        }
    }
}

/// Parse the command line into a [`Command`].
///
/// A bare floating-point argument is shorthand for `run`, matching the
/// classic single-argument invocation. Returns [`None`] on anything that
/// should print usage instead.
fn parse_command(args: &[String]) -> Option<Command> {
    match args {
        [mode, percent] if mode == "run" => {
            let alive_percent = percent.parse::<f64>().ok()?;
            Some(Command::Run { alive_percent })
        }
        [mode, raw_id] if mode == "analyze" => Some(Command::Analyze {
            raw_id: raw_id.clone(),
        }),
        [percent] => {
            let alive_percent = percent.parse::<f64>().ok()?;
            Some(Command::Run { alive_percent })
        }
        _ => None,
    }
}

/// Print CLI usage to stderr.
fn print_usage() {
    eprintln!("Usage: petri-engine run <alive_percent>");
    eprintln!("       petri-engine analyze <world_id>");
    eprintln!("Example: petri-engine run 60");
}

/// Load the engine configuration from `petri-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// a missing file means defaults.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let config = EngineConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(EngineConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn run_mode_parses_the_percentage() {
        let command = parse_command(&args(&["run", "60"]));
        assert_eq!(command, Some(Command::Run { alive_percent: 60.0 }));
    }

    #[test]
    fn bare_float_is_shorthand_for_run() {
        let command = parse_command(&args(&["37.5"]));
        assert_eq!(
            command,
            Some(Command::Run {
                alive_percent: 37.5
            })
        );
    }

    #[test]
    fn out_of_range_percentages_still_parse() {
        // Deliberately unvalidated; the grid seeding handles the extremes.
        assert!(parse_command(&args(&["run", "250"])).is_some());
        assert!(parse_command(&args(&["run", "-10"])).is_some());
    }

    #[test]
    fn analyze_mode_keeps_the_raw_id() {
        let command = parse_command(&args(&["analyze", "some-id"]));
        assert_eq!(
            command,
            Some(Command::Analyze {
                raw_id: "some-id".to_owned()
            })
        );
    }

    #[test]
    fn usage_cases_parse_to_none() {
        assert_eq!(parse_command(&args(&[])), None);
        assert_eq!(parse_command(&args(&["run"])), None);
        assert_eq!(parse_command(&args(&["run", "sixty"])), None);
        assert_eq!(parse_command(&args(&["frolic", "60"])), None);
        assert_eq!(parse_command(&args(&["not-a-number"])), None);
        assert_eq!(parse_command(&args(&["run", "60", "extra"])), None);
    }
}
