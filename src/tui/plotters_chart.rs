//! Chart widget for one grid cell of the dashboard.
//!
//! Line charts go through Plotters (`plotters-ratatui-backend`) for proper
//! axes and ticks. Bars use Ratatui's own `BarChart`, and pie charts are drawn
//! as a share list, since terminal cells are too coarse for slices.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget, Wrap},
};

use crate::chart::{Chart, ChartKind};
use crate::plot::{SERIES_COLOR, category_color, gradient_color, normalize};
use crate::view::ChartSlot;

/// Render-only view of one chart slot, including its bordered title block.
pub struct ChartWidget<'a> {
    pub slot: &'a ChartSlot,
}

impl<'a> Widget for ChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.slot.title(), Style::default().add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chart = match self.slot {
            ChartSlot::Rendered(chart) => chart,
            ChartSlot::Unavailable { reason, .. } => {
                Paragraph::new(format!("Unavailable: {reason}"))
                    .style(Style::default().fg(Color::Yellow))
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
                return;
            }
        };

        // Plotters may fail to lay out very small areas; show a hint instead.
        if inner.width < 20 || inner.height < 5 {
            buf.set_string(
                inner.x,
                inner.y,
                "Too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if chart.points.is_empty() {
            buf.set_string(inner.x, inner.y, "(no data)", Style::default().fg(Color::Gray));
            return;
        }

        match chart.kind {
            ChartKind::Line => render_line(chart, inner, buf),
            ChartKind::Bar => render_bars(chart, inner, buf),
            ChartKind::Pie => render_pie(chart, inner, buf),
        }
    }
}

fn render_line(chart: &Chart, area: Rect, buf: &mut Buffer) {
    let points: Vec<(f64, f64)> = chart.points.iter().map(|p| (p.x, p.value)).collect();
    let Some((x0, x1, y0, y1)) = line_bounds(&points) else {
        return;
    };
    let x_label = chart.x_label.clone();
    let y_label = chart.y_label.clone();

    let widget = widget_fn(move |root| {
        let mut cc = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 6)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        cc.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_label.as_str())
            .y_desc(y_label.as_str())
            .x_labels(5)
            .y_labels(4)
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .draw()?;

        // `Circle` markers come out huge on this backend; plain pixels read better.
        cc.draw_series(LineSeries::new(points.iter().copied(), &SERIES_COLOR))?;
        cc.draw_series(points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
        Ok(())
    });

    widget.render(area, buf);
}

fn render_bars(chart: &Chart, area: Rect, buf: &mut Buffer) {
    let color_range = chart.color_range();
    let (legend, body) = if let (Some(name), Some((lo, hi))) = (&chart.color_label, color_range) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (Some((rows[1], format!("color: {name} {lo:.2} .. {hi:.2}"))), rows[0])
    } else {
        (None, area)
    };

    let bars: Vec<Bar> = chart
        .points
        .iter()
        .map(|p| {
            let color = match (p.color, color_range) {
                (Some(c), Some(range)) => gradient_color(normalize(c, range)),
                _ => SERIES_COLOR,
            };
            Bar::default()
                .value(p.value.max(0.0).round() as u64)
                .text_value(format!("{:.0}", p.value))
                .label(Line::from(p.label.clone()))
                .style(Style::default().fg(term_color(color)))
        })
        .collect();

    BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(u16::from(body.height as usize >= chart.points.len() * 2))
        .value_style(Style::default().fg(Color::Black).bg(Color::White))
        .data(BarGroup::default().bars(&bars))
        .render(body, buf);

    if let Some((rect, text)) = legend {
        buf.set_string(rect.x, rect.y, text, Style::default().fg(Color::Gray));
    }
}

fn render_pie(chart: &Chart, area: Rect, buf: &mut Buffer) {
    let label_w = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(20);
    let bar_w = (area.width as usize).saturating_sub(label_w + 10).max(1);

    let mut lines = vec![Line::from(Span::styled(
        format!("{} share by {}", chart.y_label, chart.x_label),
        Style::default().fg(Color::Gray),
    ))];
    for (i, (p, share)) in chart.points.iter().zip(chart.shares()).enumerate() {
        let filled = (share * bar_w as f64).round() as usize;
        lines.push(Line::from(vec![
            Span::raw(format!("{:<label_w$} ", p.label)),
            Span::styled("█".repeat(filled), Style::default().fg(term_color(category_color(i)))),
            Span::raw(" ".repeat(bar_w.saturating_sub(filled))),
            Span::raw(format!(" {:>5.1}%", share * 100.0)),
        ]));
    }
    Paragraph::new(lines).render(area, buf);
}

fn line_bounds(points: &[(f64, f64)]) -> Option<(f64, f64, f64, f64)> {
    let (mut x0, mut x1, mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }
    if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
        return None;
    }
    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    let pad = ((y1 - y0).abs() * 0.05).max(0.5);
    Some((x0, x1, y0 - pad, y1 + pad))
}

fn term_color(c: RGBColor) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}
