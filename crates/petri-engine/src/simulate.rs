//! The live simulation loop.
//!
//! One iteration per generation: paint the frame, append the step record,
//! compute the next grid, sleep the tick interval. The loop runs until a
//! SIGINT flips the shutdown flag, then prints a final status line and
//! returns cleanly. In-memory grid state is discarded on exit; only the
//! logged steps survive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{info, warn};

use petri_store::RunStore;
use petri_types::WorldId;
use petri_world::Grid;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::render;

/// Pause after printing the run banner, so the id is readable before the
/// first frame clears the screen.
const BANNER_PAUSE: Duration = Duration::from_millis(500);

/// Start a new world and run it until interrupted.
///
/// `alive_percent` is the 0-100 figure from the CLI; it is divided by 100
/// and passed through unclamped, so out-of-range values behave exactly
/// like the underlying grid seeding (all dead or all alive).
///
/// # Errors
///
/// Returns [`EngineError::Store`] if the run's log cannot be created. A
/// run that cannot log has no analyzable artifact, so this is the one
/// fatal path; later append failures only warn.
#[allow(clippy::arithmetic_side_effects)]
pub fn run_world(config: &EngineConfig, alive_percent: f64) -> Result<(), EngineError> {
    let world_id = WorldId::new();
    let store = RunStore::new(&config.storage.log_dir);
    store.create_run(world_id, alive_percent, Grid::size())?;

    println!("World {world_id}");
    println!("Log:   {}", store.log_path(world_id).display());
    println!("Press Ctrl+C to stop.");
    info!(world_id = %world_id, alive_percent, "simulation starting");
    std::thread::sleep(BANNER_PAUSE);

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    if let Err(err) = ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst)) {
        warn!(error = %err, "interrupt handler not installed; stop with the terminal instead");
    }

    let mut rng = rand::rng();
    let mut grid = Grid::random(&mut rng, alive_percent / 100.0);
    let mut generation: u64 = 0;
    let tick = Duration::from_millis(config.world.tick_interval_ms);

    while running.load(Ordering::SeqCst) {
        render::display(&grid, generation, &config.render);

        // A dropped append leaves a gap in the historical record but never
        // interrupts the visual loop.
        if let Err(err) = store.append_step(world_id, generation, grid.alive_count()) {
            warn!(world_id = %world_id, generation, error = %err, "step not logged, continuing");
        }

        grid = grid.step();
        generation = generation.saturating_add(1);
        std::thread::sleep(tick);
    }

    println!("\nGame stopped.");
    println!("World {world_id} logged {generation} generations.");
    info!(world_id = %world_id, generations = generation, "simulation stopped");
    Ok(())
}
