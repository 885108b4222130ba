//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a pipe
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line charts: points `o` joined by `-`
//! - bar charts: one horizontal `#` bar per category
//! - pie charts: one horizontal `#` bar per slice, sized by share, with percentages

use crate::chart::{Chart, ChartKind};

/// Render any chart kind as text. The title is the first line.
pub fn render_ascii_chart(chart: &Chart, width: usize, height: usize) -> String {
    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');

    if chart.points.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    match chart.kind {
        ChartKind::Line => out.push_str(&render_line(chart, width, height)),
        ChartKind::Bar => out.push_str(&render_bars(chart, width)),
        ChartKind::Pie => out.push_str(&render_pie(chart, width)),
    }
    out
}

fn render_line(chart: &Chart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let pts: Vec<(f64, f64)> = chart.points.iter().map(|p| (p.x, p.value)).collect();
    let (x_min, x_max) = x_range(&pts).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = chart.value_range().unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw segments first (so points can overlay).
    let mut prev = None;
    for &(x, y) in &pts {
        let gx = map_x(x, x_min, x_max, width);
        let gy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, gx, gy, '-');
        }
        prev = Some((gx, gy));
    }
    for &(x, y) in &pts {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}=[{x_min:.0}, {x_max:.0}] | {}=[{y_min:.2}, {y_max:.2}]\n",
        chart.x_label, chart.y_label
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn render_bars(chart: &Chart, width: usize) -> String {
    let label_w = label_width(chart);
    let values: Vec<String> = chart.points.iter().map(|p| format!("{:.2}", p.value)).collect();
    let value_w = values.iter().map(|v| v.len()).max().unwrap_or(0);
    let bar_w = width.saturating_sub(label_w + 3 + value_w + 1).max(1);
    let max = chart.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("{} by {}\n", chart.y_label, chart.x_label));
    for (p, value) in chart.points.iter().zip(&values) {
        let len = if max > 0.0 {
            ((p.value.max(0.0) / max) * bar_w as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(len);
        let mut line = format!("{:<label_w$} | {bar:<bar_w$} {value:>value_w$}", truncate(&p.label, label_w));
        if let (Some(color), Some(name)) = (p.color, &chart.color_label) {
            line.push_str(&format!("  {name}={color:.2}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_pie(chart: &Chart, width: usize) -> String {
    let label_w = label_width(chart);
    let bar_w = width.saturating_sub(label_w + 3 + 7).max(1);
    let shares = chart.shares();

    let mut out = String::new();
    out.push_str(&format!("{} share by {}\n", chart.y_label, chart.x_label));
    for (p, share) in chart.points.iter().zip(shares) {
        let bar = "#".repeat((share * bar_w as f64).round() as usize);
        let line = format!(
            "{:<label_w$} | {bar:<bar_w$} {:>5.1}%",
            truncate(&p.label, label_w),
            share * 100.0
        );
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn label_width(chart: &Chart) -> usize {
    chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(20)
}

fn x_range(pts: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in pts {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
