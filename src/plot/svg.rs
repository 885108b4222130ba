//! SVG rendering of [`Chart`]s via Plotters.
//!
//! Used by `autodash html` to build a static page. Every chart kind is drawn
//! into its own `SVGBackend::with_string` buffer so the result can be inlined.

use std::f64::consts::PI;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{SERIES_COLOR, category_color, gradient_color, normalize};
use crate::chart::{Chart, ChartKind};
use crate::error::RenderError;

/// Default size of one chart cell on the HTML page.
pub const CHART_SIZE: (u32, u32) = (560, 400);

type SvgResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

/// Render `chart` into an SVG document of `size` pixels.
pub fn render_svg(chart: &Chart, size: (u32, u32)) -> Result<String, RenderError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        draw(&root, chart)
            .and_then(|()| root.present())
            .map_err(|e| RenderError::Draw {
                title: chart.title.clone(),
                message: e.to_string(),
            })?;
    }
    Ok(buffer)
}

fn draw(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &Chart) -> SvgResult {
    root.fill(&WHITE)?;
    if chart.points.is_empty() {
        let area = root.titled(&chart.title, ("sans-serif", 16))?;
        let (w, h) = area.dim_in_pixel();
        area.draw(&Text::new(
            "no data",
            (w as i32 / 2 - 24, h as i32 / 2),
            ("sans-serif", 14).into_font().color(&BLACK.mix(0.6)),
        ))?;
        return Ok(());
    }
    match chart.kind {
        ChartKind::Line => draw_line(root, chart),
        ChartKind::Bar => draw_bars(root, chart),
        ChartKind::Pie => draw_pie(root, chart),
    }
}

fn draw_line(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &Chart) -> SvgResult {
    let (mut x0, mut x1) = chart
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    let (y0, y1) = padded(chart.value_range().unwrap_or((0.0, 1.0)));

    let mut cc = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    cc.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    cc.draw_series(LineSeries::new(
        chart.points.iter().map(|p| (p.x, p.value)),
        SERIES_COLOR.stroke_width(2),
    ))?;
    cc.draw_series(
        chart
            .points
            .iter()
            .map(|p| Circle::new((p.x, p.value), 3, SERIES_COLOR.filled())),
    )?;
    Ok(())
}

fn draw_bars(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &Chart) -> SvgResult {
    let n = chart.points.len();
    let max = chart.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let y1 = if max > 0.0 { max * 1.05 } else { 1.0 };
    let color_range = chart.color_range();
    let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();

    let mut cc = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y1)?;

    let tick = |v: &f64| {
        let idx = v.round();
        if (v - idx).abs() < 1e-6 && idx >= 0.0 {
            labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        } else {
            String::new()
        }
    };
    cc.configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&tick)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    cc.draw_series(chart.points.iter().enumerate().map(|(i, p)| {
        let fill = match (p.color, color_range) {
            (Some(c), Some(range)) => gradient_color(normalize(c, range)),
            _ => SERIES_COLOR,
        };
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, p.value.max(0.0))], fill.filled())
    }))?;

    if let (Some(name), Some((lo, hi))) = (&chart.color_label, color_range) {
        let (w, _) = root.dim_in_pixel();
        let legend = format!("color: {name} ({lo:.2} .. {hi:.2})");
        root.draw(&Text::new(
            legend,
            (w as i32 - 260, 30),
            ("sans-serif", 12).into_font().color(&BLACK),
        ))?;
    }
    Ok(())
}

fn draw_pie(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &Chart) -> SvgResult {
    let area = root.titled(&chart.title, ("sans-serif", 16))?;
    let (w, h) = area.dim_in_pixel();
    let (plot, legend) = area.split_horizontally((w as f64 * 0.65) as u32);

    let (pw, ph) = plot.dim_in_pixel();
    let center = ((pw / 2) as f64, (ph / 2) as f64);
    let radius = (pw.min(ph) as f64 / 2.0 - 10.0).max(1.0);

    let shares = chart.shares();
    let mut start = -PI / 2.0;
    for (i, share) in shares.iter().enumerate() {
        if *share <= 0.0 {
            continue;
        }
        let sweep = share * 2.0 * PI;
        let steps = ((sweep / (2.0 * PI)) * 90.0).ceil().max(2.0) as usize;
        let mut poly = vec![(center.0 as i32, center.1 as i32)];
        for s in 0..=steps {
            let a = start + sweep * s as f64 / steps as f64;
            poly.push((
                (center.0 + radius * a.cos()).round() as i32,
                (center.1 + radius * a.sin()).round() as i32,
            ));
        }
        plot.draw(&Polygon::new(poly, category_color(i).filled()))?;
        start += sweep;
    }

    let line_h = 20;
    let top = (h as i32 - line_h * chart.points.len() as i32).max(0) / 2;
    for (i, (p, share)) in chart.points.iter().zip(&shares).enumerate() {
        let y = top + line_h * i as i32;
        legend.draw(&Rectangle::new([(0, y), (12, y + 12)], category_color(i).filled()))?;
        legend.draw(&Text::new(
            format!("{} {:.1}%", p.label, share * 100.0),
            (18, y),
            ("sans-serif", 12).into_font().color(&BLACK),
        ))?;
    }
    Ok(())
}

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = ((hi - lo).abs() * 0.05).max(0.5);
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPoint;

    fn chart(kind: ChartKind, color: Option<f64>) -> Chart {
        Chart {
            kind,
            title: "Sales & Ads".to_string(),
            x_label: "Vehicle_Type".to_string(),
            y_label: "Automobile_Sales".to_string(),
            color_label: color.map(|_| "unemployment_rate".to_string()),
            points: ["Sports", "Executivecar", "Supperminicar"]
                .iter()
                .enumerate()
                .map(|(i, label)| ChartPoint {
                    label: label.to_string(),
                    x: i as f64,
                    value: 10.0 * (i + 1) as f64,
                    color: color.map(|c| c + i as f64),
                })
                .collect(),
        }
    }

    #[test]
    fn every_kind_renders_an_svg_document() {
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie] {
            let svg = render_svg(&chart(kind, None), CHART_SIZE).unwrap();
            assert!(svg.starts_with("<svg"), "{kind:?}");
            assert!(svg.trim_end().ends_with("</svg>"), "{kind:?}");
            assert!(svg.contains("Sales"), "{kind:?} is missing its title");
        }
    }

    #[test]
    fn pie_draws_one_slice_per_point() {
        let svg = render_svg(&chart(ChartKind::Pie, None), CHART_SIZE).unwrap();
        assert_eq!(svg.matches("<polygon").count(), 3);
    }

    #[test]
    fn shaded_bars_mention_the_color_measure() {
        let svg = render_svg(&chart(ChartKind::Bar, Some(5.0)), CHART_SIZE).unwrap();
        assert!(svg.contains("unemployment_rate"));
    }

    #[test]
    fn empty_chart_still_renders() {
        let mut c = chart(ChartKind::Line, None);
        c.points.clear();
        let svg = render_svg(&c, (200, 150)).unwrap();
        assert!(svg.contains("no data"));
    }
}
