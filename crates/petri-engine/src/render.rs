//! Terminal renderer for the live simulation view.
//!
//! Each generation repaints the whole screen: an ANSI clear-and-home
//! escape, a centered title block, the grid as one glyph per cell, and a
//! centered alive-cell count. Frame assembly is a pure function over the
//! grid so it can be tested without a terminal.

use std::io::Write;

use petri_world::{COLS, Grid, ROWS};

use crate::config::RenderSettings;

/// ANSI escape clearing the screen and homing the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Title shown above the grid.
const TITLE: &str = "Conway Game of Life";

/// Build the complete text frame for one generation.
pub fn frame(grid: &Grid, generation: u64, render: &RenderSettings) -> String {
    let rule = "-".repeat(COLS);
    let mut out = String::new();
    out.push_str(&centered(TITLE, COLS));
    out.push('\n');
    out.push_str(&centered(&format!("Generation: {generation}"), COLS));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in 0..ROWS {
        for col in 0..COLS {
            out.push(if grid.is_alive(row, col) {
                render.alive_glyph
            } else {
                render.dead_glyph
            });
        }
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&centered(
        &format!("Alive cells: {}", grid.alive_count()),
        COLS,
    ));
    out.push('\n');
    out
}

/// Clear the terminal and paint one generation's frame.
///
/// Output errors are ignored: a broken pipe should not bring down the
/// simulation, and the log keeps accumulating regardless.
pub fn display(grid: &Grid, generation: u64, render: &RenderSettings) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{CLEAR_SCREEN}{}", frame(grid, generation, render));
    let _ = stdout.flush();
}

/// Center `text` within `width` columns, without trailing padding.
fn centered(text: &str, width: usize) -> String {
    format!("{text:^width$}").trim_end().to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_header_grid_and_footer() {
        let grid = Grid::dead();
        let settings = RenderSettings::default();
        let text = frame(&grid, 7, &settings);
        let lines: Vec<&str> = text.lines().collect();

        // Title, generation, rule, 30 grid rows, rule, alive count.
        assert_eq!(lines.len(), 3 + ROWS + 2);
        assert!(lines[0].contains(TITLE));
        assert!(lines[1].contains("Generation: 7"));
        assert_eq!(lines[2], "-".repeat(COLS));
        assert_eq!(lines[3 + ROWS], "-".repeat(COLS));
        assert!(lines[4 + ROWS].contains("Alive cells: 0"));
    }

    #[test]
    fn dead_grid_renders_only_dead_glyphs() {
        let grid = Grid::dead();
        let settings = RenderSettings::default();
        let text = frame(&grid, 0, &settings);
        let grid_rows: Vec<&str> = text.lines().skip(3).take(ROWS).collect();
        for row in grid_rows {
            assert_eq!(row, "-".repeat(COLS));
        }
    }

    #[test]
    fn glyphs_follow_the_render_settings() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(5);
        let grid = petri_world::Grid::random(&mut rng, 2.0);
        let settings = RenderSettings {
            alive_glyph: '#',
            dead_glyph: '.',
        };
        let text = frame(&grid, 0, &settings);
        let first_row = text.lines().nth(3).unwrap();
        assert_eq!(first_row, "#".repeat(COLS));
    }

    #[test]
    fn title_is_centered_over_the_grid_width() {
        let line = centered(TITLE, COLS);
        let leading = line.len() - line.trim_start().len();
        assert!(leading > 0);
        assert!(line.len() <= COLS);
    }
}
