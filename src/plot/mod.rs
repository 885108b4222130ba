//! Chart rendering back-ends that don't need a terminal.
//!
//! - `ascii`: fixed-grid text rendering for `autodash report`
//! - `svg`: Plotters SVG rendering for `autodash html`
//!
//! The colors are shared with the TUI so a chart looks the same everywhere.

use plotters::style::RGBColor;

pub mod ascii;
pub mod svg;

pub use ascii::render_ascii_chart;
pub use svg::render_svg;

/// Categorical palette (one color per bar / pie slice).
const PALETTE: [RGBColor; 6] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
];

/// Color of the primary series (lines, uncolored bars).
pub const SERIES_COLOR: RGBColor = PALETTE[0];

pub fn category_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// Continuous scale for a second measure, `t` in `[0, 1]` (dark blue -> yellow).
pub fn gradient_color(t: f64) -> RGBColor {
    const LO: (f64, f64, f64) = (13.0, 8.0, 135.0);
    const HI: (f64, f64, f64) = (240.0, 249.0, 33.0);
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(mix(LO.0, HI.0), mix(LO.1, HI.1), mix(LO.2, HI.2))
}

/// Position of `v` within `(lo, hi)`, or the middle when the range is degenerate.
pub fn normalize(v: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo { (v - lo) / (hi - lo) } else { 0.5 }
}
