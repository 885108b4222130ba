//! Shared "load + select" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset location -> Table -> ViewController -> ViewOutput
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::cli::SelectionArgs;
use crate::data::{DataSource, load_table};
use crate::domain::Table;
use crate::error::AppError;
use crate::view::{ViewController, ViewOutput, ViewState};

/// Load the dataset named on the command line.
pub fn load(location: &str) -> Result<Table, AppError> {
    let source = DataSource::parse(location);
    let loaded = load_table(&source)?;
    Ok(loaded.table)
}

/// Apply a CLI selection to a fresh controller and return the resulting view.
///
/// Unlike the TUI, there is no previous render to fall back to, so an invalid
/// year is reported as a usage error.
pub fn compute_view(table: &Table, selection: &SelectionArgs) -> Result<(ViewState, ViewOutput), AppError> {
    let mut view = ViewController::new(table);
    view.set_mode(selection.mode);
    view.set_year(selection.year)?;

    let state = view.state();
    let output = view.output().clone();
    info!(mode = ?state.mode, year = ?state.year, charts = output.slots().len(), "view computed");
    Ok((state, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReportMode;
    use crate::testing::full_history;

    #[test]
    fn compute_view_applies_selection() {
        let table = full_history();
        let (state, output) = compute_view(
            &table,
            &SelectionArgs {
                mode: ReportMode::Yearly,
                year: Some(2008),
            },
        )
        .unwrap();

        assert_eq!(state.year, Some(2008));
        assert_eq!(output.slots().len(), 4);
    }

    #[test]
    fn out_of_range_year_is_a_usage_error() {
        let table = full_history();
        let err = compute_view(
            &table,
            &SelectionArgs {
                mode: ReportMode::Yearly,
                year: Some(2050),
            },
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn recession_selection_keeps_year_but_ignores_it() {
        let table = full_history();
        let (state, output) = compute_view(
            &table,
            &SelectionArgs {
                mode: ReportMode::Recession,
                year: Some(2015),
            },
        )
        .unwrap();

        assert_eq!(state.year, Some(2015));
        assert!(output.slots()[0].title().contains("Recession"));
    }
}
