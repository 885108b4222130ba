//! Export the current view's chart data to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one line per chart point, with the chart title repeated on every line.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::RenderError;
use crate::view::{ChartSlot, ViewOutput};

const HEADER: [&str; 7] = ["chart", "kind", "x_label", "label", "y_label", "value", "color"];

/// Write every rendered chart point of `output` to `path`.
pub fn write_view_csv(path: &Path, output: &ViewOutput) -> Result<(), RenderError> {
    let file = File::create(path).map_err(|source| RenderError::Write {
        path: path.display().to_string(),
        source,
    })?;
    write_view(file, output, &path.display().to_string())
}

/// Write the CSV to any sink. `name` identifies the sink in write errors.
pub fn write_view<W: Write>(sink: W, output: &ViewOutput, name: &str) -> Result<(), RenderError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(HEADER)?;

    for slot in output.slots() {
        let ChartSlot::Rendered(chart) = slot else {
            continue;
        };
        for p in &chart.points {
            let value = format!("{:.6}", p.value);
            let color = p.color.map(|c| format!("{c:.6}")).unwrap_or_default();
            writer.write_record([
                chart.title.as_str(),
                chart.kind.as_str(),
                chart.x_label.as_str(),
                p.label.as_str(),
                chart.y_label.as_str(),
                value.as_str(),
                color.as_str(),
            ])?;
        }
    }

    writer.flush().map_err(|source| RenderError::Write {
        path: name.to_string(),
        source,
    })?;
    Ok(())
}
