use ratatui::style::Color;

use crate::sample::Sample;
use crate::score::Tier;
use crate::speed_history::SpeedHistoryWindow;
use crate::summary::Severity;

/// Speed at which the trail colour saturates to red, px/s
pub const SPEED_COLOR_CEILING: f64 = 800.0;

pub const GREEN: Color = Color::Rgb(74, 222, 128);
pub const AMBER: Color = Color::Rgb(251, 191, 36);
pub const RED: Color = Color::Rgb(232, 56, 79);

/// Trail colour ramp: green through yellow to red as speed rises
pub fn speed_to_color(speed: f64) -> Color {
    let norm = (speed / SPEED_COLOR_CEILING).clamp(0.0, 1.0);
    if norm < 0.4 {
        let t = norm / 0.4;
        Color::Rgb(
            (46.0 + t * (255.0 - 46.0)).round() as u8,
            (160.0 + t * (200.0 - 160.0)).round() as u8,
            (46.0 - t * 30.0).round() as u8,
        )
    } else {
        let t = (norm - 0.4) / 0.6;
        Color::Rgb(
            255,
            (200.0 - t * 200.0).round() as u8,
            (20.0 - t * 20.0).round() as u8,
        )
    }
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Smooth => GREEN,
        Tier::Moderate => AMBER,
        Tier::Intense => RED,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Good => GREEN,
        Severity::Warn => AMBER,
        Severity::Alert => RED,
    }
}

/// Sparkline bars and their upper bound (never below 1)
pub fn velocity_bars(history: &SpeedHistoryWindow) -> (Vec<u64>, u64) {
    let bars = history.values().map(|s| s.round() as u64).collect();
    (bars, history.max_or(1.0).round() as u64)
}

/// Every n-th sample is stamped onto the heatmap
pub const HEATMAP_STRIDE: usize = 3;

/// The heatmap only refreshes once per this many samples
pub const HEATMAP_REFRESH_POINTS: usize = 20;

const HEAT_LOW: (f64, f64, f64) = (70.0, 12.0, 24.0);
const HEAT_HIGH: (f64, f64, f64) = (200.0, 16.0, 46.0);
const HEAT_SHADES: [&str; 3] = ["░", "▒", "▓"];

/// Samples shown on the heatmap: the buffer truncated to the last refresh
/// boundary.
pub fn heatmap_samples(samples: &[Sample]) -> &[Sample] {
    &samples[..samples.len() - samples.len() % HEATMAP_REFRESH_POINTS]
}

/// Bin every [`HEATMAP_STRIDE`]-th sample into a `rows x cols` grid covering
/// a canvas of `canvas_px` (width, height) pixels. Indexed `[row][col]`.
///
/// Empty when there is nothing to show or no room to show it.
pub fn heatmap_cells(
    samples: &[Sample],
    canvas_px: (f64, f64),
    grid: (usize, usize),
) -> Vec<Vec<u16>> {
    let (width, height) = canvas_px;
    let (cols, rows) = grid;
    if samples.is_empty() || cols == 0 || rows == 0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let bin = |pos: f64, extent: f64, slots: usize| {
        ((pos / extent * slots as f64).floor().max(0.0) as usize).min(slots - 1)
    };

    let mut cells = vec![vec![0u16; cols]; rows];
    for sample in samples.iter().step_by(HEATMAP_STRIDE) {
        let cell = &mut cells[bin(sample.y, height, rows)][bin(sample.x, width, cols)];
        *cell = cell.saturating_add(1);
    }
    cells
}

/// Shade and colour for a cell holding `count` of the grid's `max` hits,
/// `None` for an empty cell
pub fn heat_cell(count: u16, max: u16) -> Option<(&'static str, Color)> {
    if count == 0 || max == 0 {
        return None;
    }

    let ratio = (f64::from(count) / f64::from(max)).min(1.0);
    let shade = ((ratio * HEAT_SHADES.len() as f64).ceil() as usize).clamp(1, HEAT_SHADES.len());
    let lerp = |lo: f64, hi: f64| (lo + ratio * (hi - lo)).round() as u8;
    let color = Color::Rgb(
        lerp(HEAT_LOW.0, HEAT_HIGH.0),
        lerp(HEAT_LOW.1, HEAT_HIGH.1),
        lerp(HEAT_LOW.2, HEAT_HIGH.2),
    );
    Some((HEAT_SHADES[shade - 1], color))
}
