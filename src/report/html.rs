//! Standalone HTML page for one view.
//!
//! Mirrors the dashboard layout: a centered title, the current selections,
//! then the output region as two flex rows of two inline SVG charts.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::error::RenderError;
use crate::plot::svg::{CHART_SIZE, render_svg};
use crate::view::{ChartSlot, ViewOutput, ViewState};

use super::format_selection;

const PAGE_TITLE: &str = "Automobile Sales Statistics Dashboard";

/// Render the whole page. Fails only if an SVG chart cannot be drawn.
pub fn render_page(state: &ViewState, output: &ViewOutput) -> Result<String, RenderError> {
    let body = match output {
        ViewOutput::Empty => html! {
            p class="empty" { "Select a year to see the yearly report." }
        },
        ViewOutput::Charts { rows } => {
            let mut rendered = Vec::with_capacity(rows.len());
            for row in rows {
                let items = row.iter().map(render_slot).collect::<Result<Vec<_>, _>>()?;
                rendered.push(items);
            }
            html! {
                @for items in &rendered {
                    div style="display: flex" {
                        @for item in items { (item) }
                    }
                }
            }
        }
    };

    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (PAGE_TITLE) }
            }
            body {
                h1 style="text-align: center; color: #503D36; font-size: 24px" { (PAGE_TITLE) }
                p class="selection" { (format_selection(state)) }
                div id="output-container" { (body) }
            }
        }
    };
    Ok(page.into_string())
}

fn render_slot(slot: &ChartSlot) -> Result<Markup, RenderError> {
    let inner = match slot {
        // Plotters output is already a complete SVG document.
        ChartSlot::Rendered(chart) => PreEscaped(render_svg(chart, CHART_SIZE)?),
        ChartSlot::Unavailable { title, reason } => html! {
            h3 { (title) }
            p class="unavailable" { (reason) }
        },
    };
    Ok(html! {
        div class="chart-item" style="flex: 1" { (inner) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReportMode, Table};
    use crate::testing::full_history;
    use crate::view::recompute;

    #[test]
    fn page_has_title_and_four_charts() {
        let table = full_history();
        let state = ViewState {
            mode: ReportMode::Yearly,
            year: Some(2008),
        };
        let page = render_page(&state, &recompute(&table, &state)).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h1 style=\"text-align: center; color: #503D36; font-size: 24px\">"));
        assert!(page.contains("Report: Yearly Statistics | Year: 2008"));
        assert_eq!(page.matches("<svg").count(), 4);
        assert_eq!(page.matches("<div style=\"display: flex\">").count(), 2);
        assert_eq!(page.matches("class=\"chart-item\"").count(), 4);
    }

    #[test]
    fn empty_view_has_no_charts() {
        let page = render_page(&ViewState::default(), &ViewOutput::Empty).unwrap();
        assert!(!page.contains("<svg"));
        assert!(page.contains("Select a year"));
    }

    #[test]
    fn unavailable_slots_are_plain_text() {
        let table = Table::new(full_history().rows()[..12].to_vec());
        let state = ViewState {
            mode: ReportMode::Yearly,
            year: Some(2001),
        };
        let page = render_page(&state, &recompute(&table, &state)).unwrap();

        assert_eq!(page.matches("<svg").count(), 2);
        assert_eq!(page.matches("class=\"unavailable\"").count(), 2);
    }

    #[test]
    fn markup_in_unavailable_slots_is_escaped() {
        let slot = || ChartSlot::Unavailable {
            title: "<b>Ads</b>".to_string(),
            reason: "x < y & z".to_string(),
        };
        let output = ViewOutput::Charts {
            rows: [[slot(), slot()], [slot(), slot()]],
        };
        let page = render_page(&ViewState::default(), &output).unwrap();

        assert!(!page.contains("<b>"));
        assert!(page.contains("&lt;b&gt;Ads&lt;/b&gt;"));
        assert!(page.contains("x &lt; y &amp; z"));
    }
}
