//! ASCII line chart renderer for alive-count trend series.
//!
//! The chart is a fixed-size text canvas: data points are `*`, connecting
//! segments are `.`, the y axis is labeled at its extremes, and the x axis
//! carries generation numbers. Series longer than the chart width are
//! downsampled by picking evenly spaced samples -- values are never
//! averaged, so each plotted point is a real observation.

/// Glyph marking a sampled data point.
const POINT: char = '*';

/// Glyph filling the straight segments between consecutive points.
const SEGMENT: char = '.';

/// Glyph prefixed to an x-axis label that stands in for skipped generations.
const CHECKPOINT: char = '^';

/// Footnote printed when any x-axis label covers a multi-generation skip.
const FOOTNOTE: &str = "^ = sampled checkpoint (series downsampled to fit width)";

/// Caption printed under the chart.
const CAPTION: &str = "alive cells by generation";

/// Render a series as a multi-line ASCII chart.
///
/// The output starts with a blank line, has one line per plot row with a
/// right-aligned y label on the top (max) and bottom (min) rows, then a
/// horizontal rule, the x-axis label line, an optional footnote, and the
/// axis caption. An empty series renders as an empty string.
///
/// The vertical scale runs from the minimum to the maximum of the full
/// series (computed before any downsampling); a flat series is given a
/// range of 1 so it renders as a line along the bottom of the chart.
pub fn render_trend(series: &[u32], width: usize, height: usize) -> String {
    if series.is_empty() {
        return String::new();
    }
    let width = width.max(1);

    let min = series.iter().copied().min().unwrap_or(0);
    let max = series.iter().copied().max().unwrap_or(0);
    let range = if max == min {
        1.0
    } else {
        f64::from(max.saturating_sub(min))
    };

    let downsampled = series.len() > width;
    let samples = sample_points(series, width, downsampled);
    let rows = plot_rows(&samples, min, range, height);
    let canvas = draw_canvas(&rows, samples.len(), height);

    let max_label = max.to_string();
    let min_label = min.to_string();
    let label_width = max_label.len().max(min_label.len());

    let mut out = String::new();
    out.push('\n');
    for (row_index, row) in canvas.iter().enumerate() {
        let label = if row_index == 0 {
            max_label.as_str()
        } else if row_index == height {
            min_label.as_str()
        } else {
            ""
        };
        out.push_str(&format!("{label:>label_width$} |"));
        out.extend(row.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>label_width$} +", ""));
    out.push_str(&"-".repeat(samples.len()));
    out.push('\n');

    let (label_line, has_checkpoints) = if downsampled {
        sampled_labels(&samples)
    } else {
        (direct_labels(samples.len()), false)
    };
    out.push_str(&format!("{:>label_width$}  {label_line}\n", ""));
    if has_checkpoints {
        out.push_str(FOOTNOTE);
        out.push('\n');
    }
    out.push_str(CAPTION);
    out.push('\n');
    out
}

/// Pick the `(generation, value)` pairs to plot.
///
/// When downsampling, sample index `i` maps to the original index
/// `i * len / width` -- a nearest-earlier-sample strategy, no averaging.
fn sample_points(series: &[u32], width: usize, downsampled: bool) -> Vec<(usize, u32)> {
    if downsampled {
        (0..width)
            .filter_map(|i| {
                let index = i.saturating_mul(series.len()) / width;
                series.get(index).map(|value| (index, *value))
            })
            .collect()
    } else {
        series.iter().copied().enumerate().collect()
    }
}

/// Map each sampled value to its canvas row, top row = maximum.
// Display geometry: values fit in f64 exactly (u32) and rows are bounded
// by the chart height, so the float round-trip cannot misplace a point.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]
fn plot_rows(samples: &[(usize, u32)], min: u32, range: f64, height: usize) -> Vec<usize> {
    samples
        .iter()
        .map(|(_, value)| {
            let scaled = (f64::from(value.saturating_sub(min)) / range * height as f64).round();
            let clamped = (scaled as usize).min(height);
            height - clamped
        })
        .collect()
}

/// Draw points and connecting segments onto a blank canvas.
///
/// Segments use integer-stepped linear interpolation: `max(|dx|, |dy|) + 1`
/// evenly spaced parameter values, each rounded to a cell. A segment cell
/// never overwrites a data-point glyph.
// Canvas bounds: every x is a sample column and every y is produced by
// plot_rows, so all indices are in range.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_canvas(rows: &[usize], cols: usize, height: usize) -> Vec<Vec<char>> {
    let mut canvas = vec![vec![' '; cols]; height + 1];

    for (x, y) in rows.iter().enumerate() {
        canvas[*y][x] = POINT;
    }

    for x in 1..rows.len() {
        let (x0, y0) = (x - 1, rows[x - 1]);
        let (x1, y1) = (x, rows[x]);
        let steps = x1.abs_diff(x0).max(y1.abs_diff(y0)) + 1;
        for s in 0..steps {
            let t = if steps > 1 {
                s as f64 / (steps - 1) as f64
            } else {
                0.0
            };
            let px = (x0 as f64 + t * (x1 as f64 - x0 as f64)).round() as usize;
            let py = (y0 as f64 + t * (y1 as f64 - y0 as f64)).round() as usize;
            if canvas[py][px] != POINT {
                canvas[py][px] = SEGMENT;
            }
        }
    }

    canvas
}

/// Label line for a series that fits the chart without downsampling.
///
/// Every generation below 10 is labeled with its digit; from there on,
/// every 5th column carries the generation's last digit.
fn direct_labels(cols: usize) -> String {
    (0..cols)
        .map(|generation| {
            if generation < 10 || generation % 5 == 0 {
                char::from_digit(u32::try_from(generation % 10).unwrap_or(0), 10).unwrap_or(' ')
            } else {
                ' '
            }
        })
        .collect()
}

/// Label line for a downsampled series: up to 5 evenly spaced labels
/// (first, last, intermediates) showing true generation numbers.
///
/// A label whose sample skips over unplotted generations is prefixed with
/// the checkpoint glyph. Returns the line and whether any checkpoint was
/// marked (which triggers the footnote).
// Label placement walks left to right; the cursor keeps labels from
// overlapping when the chart is narrow.
#[allow(clippy::arithmetic_side_effects)]
fn sampled_labels(samples: &[(usize, u32)]) -> (String, bool) {
    let cols = samples.len();
    let positions: Vec<usize> = if cols == 1 {
        vec![0]
    } else {
        let mut seen = Vec::new();
        for k in 0..5_usize {
            let p = k * (cols - 1) / 4;
            if !seen.contains(&p) {
                seen.push(p);
            }
        }
        seen
    };

    let mut line = String::new();
    let mut has_checkpoints = false;
    let mut cursor = 0_usize;
    for &p in &positions {
        let generation = samples.get(p).map_or(0, |(g, _)| *g);
        let previous = p
            .checked_sub(1)
            .and_then(|q| samples.get(q))
            .map(|(g, _)| *g);
        let skips = previous.is_some_and(|prev| generation.saturating_sub(prev) > 1);

        let text = if skips {
            has_checkpoints = true;
            format!("{CHECKPOINT}{generation}")
        } else {
            generation.to_string()
        };

        let start = p.max(cursor);
        while line.len() < start {
            line.push(' ');
        }
        line.push_str(&text);
        cursor = start + text.len() + 1;
    }

    (line, has_checkpoints)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_renders_nothing() {
        assert_eq!(render_trend(&[], 40, 10), "");
    }

    #[test]
    fn constant_series_renders_a_flat_line() {
        let chart = render_trend(&[5, 5, 5, 5, 5], 40, 4);
        assert!(!chart.is_empty());

        // All five points sit on one row: the bottom of the chart.
        let point_rows: Vec<&str> = chart
            .lines()
            .filter(|line| line.contains(POINT))
            .collect();
        assert_eq!(point_rows.len(), 1);
        assert_eq!(point_rows[0].matches(POINT).count(), 5);
        assert!(point_rows[0].trim_start().starts_with('5'));
    }

    #[test]
    fn output_starts_with_a_blank_line_and_ends_with_the_caption() {
        let chart = render_trend(&[1, 2, 3], 40, 6);
        assert!(chart.starts_with('\n'));
        assert_eq!(chart.lines().last().unwrap(), CAPTION);
    }

    #[test]
    fn y_axis_is_labeled_at_the_extremes() {
        let chart = render_trend(&[2, 9, 4], 40, 6);
        let lines: Vec<&str> = chart.lines().collect();
        // lines[0] is the leading blank; plot rows follow.
        assert!(lines[1].trim_start().starts_with("9 |"));
        assert!(lines[7].trim_start().starts_with("2 |"));
        // Interior rows carry no y label.
        assert!(lines[3].trim_start().starts_with('|'));
    }

    #[test]
    fn short_series_labels_each_generation_directly() {
        let chart = render_trend(&[1, 1, 1, 1, 1, 1, 1], 40, 4);
        let labels = chart
            .lines()
            .find(|line| line.contains("012"))
            .unwrap();
        assert!(labels.contains("0123456"));
    }

    #[test]
    fn direct_labels_mark_every_fifth_generation_past_ten() {
        let labels = direct_labels(22);
        let chars: Vec<char> = labels.chars().collect();
        assert_eq!(&chars[0..10], &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
        assert_eq!(chars[10], '0');
        assert_eq!(chars[11], ' ');
        assert_eq!(chars[15], '5');
        assert_eq!(chars[20], '0');
        assert_eq!(chars[21], ' ');
    }

    #[test]
    fn long_series_is_downsampled_by_index_not_averaged() {
        let series: Vec<u32> = (0..100).collect();
        let samples = sample_points(&series, 10, true);
        assert_eq!(samples.len(), 10);
        // Every sampled value is a real observation at i * len / width.
        for (i, (index, value)) in samples.iter().enumerate() {
            assert_eq!(*index, i * 100 / 10);
            assert_eq!(*value, series[*index]);
        }
    }

    #[test]
    fn downsampled_chart_carries_checkpoints_and_a_footnote() {
        let series: Vec<u32> = (0..200).map(|i| i % 37).collect();
        let chart = render_trend(&series, 40, 8);
        assert!(chart.contains(CHECKPOINT));
        assert!(chart.contains(FOOTNOTE));
        // First label is the true first generation.
        let label_line = chart
            .lines()
            .find(|line| line.contains("199") || line.contains("^19"))
            .unwrap_or("");
        assert!(!label_line.is_empty());
    }

    #[test]
    fn short_series_has_no_footnote() {
        let chart = render_trend(&[3, 1, 4, 1, 5], 40, 8);
        assert!(!chart.contains(FOOTNOTE));
        assert!(!chart.contains(CHECKPOINT));
    }

    #[test]
    fn segments_fill_between_distant_points_without_eating_them() {
        let chart = render_trend(&[0, 10], 40, 10);
        assert_eq!(chart.matches(POINT).count(), 2);
        // A 10-row drop needs interpolated segment cells.
        assert!(chart.matches(SEGMENT).count() >= 8);
    }

    #[test]
    fn zero_range_does_not_divide_by_zero() {
        // Regression guard: a constant series must not panic.
        let chart = render_trend(&[7; 300], 50, 10);
        assert!(chart.contains(POINT));
    }

    #[test]
    fn single_point_series_renders() {
        let chart = render_trend(&[42], 40, 8);
        assert_eq!(chart.matches(POINT).count(), 1);
        assert!(chart.contains("42"));
    }
}
