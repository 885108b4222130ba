//! Formatted terminal output for one dashboard view.
//!
//! We keep formatting code in one place so:
//! - the aggregation/chart code stays clean and testable
//! - output changes are localized (handy for snapshot tests)

use crate::plot::render_ascii_chart;
use crate::view::{ChartSlot, ViewOutput, ViewState};

/// Format the whole view: a header with the selection, then each chart slot.
pub fn format_view(state: &ViewState, output: &ViewOutput, width: usize, height: usize) -> String {
    let mut out = String::new();

    out.push_str("=== Automobile Sales Statistics Dashboard ===\n");
    out.push_str(&format_selection(state));
    out.push('\n');

    match output {
        ViewOutput::Empty => {
            out.push_str("\nNo year selected: pass --year to see the yearly report.\n");
        }
        ViewOutput::Charts { .. } => {
            for (idx, slot) in output.slots().into_iter().enumerate() {
                out.push_str(&format!("\n[{}] ", idx + 1));
                out.push_str(&format_slot(slot, width, height));
            }
        }
    }
    out
}

/// One-line summary of the current selections.
pub fn format_selection(state: &ViewState) -> String {
    let year = match state.year {
        Some(y) => y.to_string(),
        None => "-".to_string(),
    };
    format!("Report: {} | Year: {year}", state.mode.display_name())
}

fn format_slot(slot: &ChartSlot, width: usize, height: usize) -> String {
    match slot {
        ChartSlot::Rendered(chart) => render_ascii_chart(chart, width, height),
        ChartSlot::Unavailable { title, reason } => format!("{title}\n(unavailable: {reason})\n"),
    }
}
