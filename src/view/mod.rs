//! View controller: selection state and the chart set derived from it.
//!
//! The dashboard has exactly two inputs (report mode, year) and one output
//! (a 2x2 grid of charts). The state machine lives in [`ViewController`]; the
//! mapping from state to charts is the pure function [`recompute`], so it can
//! be exercised without any UI.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::aggregate::{mean_by, mean_by_multi, sum_by};
use crate::chart::{Chart, bar_chart, line_chart, pie_chart};
use crate::domain::{GroupKey, GroupValue, Month, ReportMode, Table, ValueColumn, YEAR_MAX, YEAR_MIN};
use crate::error::{AggregateError, ChartError, SelectionError};

/// Current selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub mode: ReportMode,
    pub year: Option<i32>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ReportMode::Yearly,
            year: None,
        }
    }
}

/// One cell of the chart grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartSlot {
    Rendered(Chart),
    /// The chart could not be computed for the current selection (e.g. no rows).
    Unavailable { title: String, reason: String },
}

impl ChartSlot {
    pub fn title(&self) -> &str {
        match self {
            ChartSlot::Rendered(chart) => &chart.title,
            ChartSlot::Unavailable { title, .. } => title,
        }
    }

    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartSlot::Rendered(chart) => Some(chart),
            ChartSlot::Unavailable { .. } => None,
        }
    }
}

/// Everything the output region shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewOutput {
    /// Nothing selected yet.
    Empty,
    /// Two rows of two charts.
    Charts { rows: [[ChartSlot; 2]; 2] },
}

impl ViewOutput {
    /// All slots, row-major.
    pub fn slots(&self) -> Vec<&ChartSlot> {
        match self {
            ViewOutput::Empty => Vec::new(),
            ViewOutput::Charts { rows } => rows.iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewOutput::Empty)
    }
}

/// Owns the selection state and the currently displayed output.
#[derive(Debug)]
pub struct ViewController<'t> {
    table: &'t Table,
    state: ViewState,
    year_selector_enabled: bool,
    output: ViewOutput,
}

impl<'t> ViewController<'t> {
    pub fn new(table: &'t Table) -> Self {
        Self::with_state(table, ViewState::default())
    }

    pub fn with_state(table: &'t Table, state: ViewState) -> Self {
        Self {
            table,
            state,
            year_selector_enabled: state.mode == ReportMode::Yearly,
            output: recompute(table, &state),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn output(&self) -> &ViewOutput {
        &self.output
    }

    /// The year selector only matters for the yearly report.
    pub fn year_selector_enabled(&self) -> bool {
        self.year_selector_enabled
    }

    pub fn set_mode(&mut self, mode: ReportMode) -> &ViewOutput {
        self.state.mode = mode;
        self.year_selector_enabled = mode == ReportMode::Yearly;
        self.refresh()
    }

    /// Select a year (or clear it). Out-of-range years leave everything unchanged.
    pub fn set_year(&mut self, year: Option<i32>) -> Result<&ViewOutput, SelectionError> {
        if let Some(year) = year {
            validate_year(year)?;
        }
        self.state.year = year;
        Ok(self.refresh())
    }

    /// Select a mode by its selector label ("Yearly Statistics") or short name.
    pub fn select_mode_label(&mut self, label: &str) -> Result<&ViewOutput, SelectionError> {
        let mode = ReportMode::from_label(label).ok_or_else(|| SelectionError::InvalidMode(label.to_string()))?;
        Ok(self.set_mode(mode))
    }

    /// Select a year from text; an empty string clears the selection.
    pub fn select_year_label(&mut self, label: &str) -> Result<&ViewOutput, SelectionError> {
        let label = label.trim();
        if label.is_empty() {
            return self.set_year(None);
        }
        let year = label
            .parse::<i32>()
            .map_err(|_| SelectionError::InvalidYear(label.to_string()))?;
        self.set_year(Some(year))
    }

    fn refresh(&mut self) -> &ViewOutput {
        self.output = recompute(self.table, &self.state);
        &self.output
    }
}

pub fn validate_year(year: i32) -> Result<i32, SelectionError> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Ok(year)
    } else {
        Err(SelectionError::YearOutOfRange {
            year,
            min: YEAR_MIN,
            max: YEAR_MAX,
        })
    }
}

/// Compute the full chart set for `state`.
pub fn recompute(table: &Table, state: &ViewState) -> ViewOutput {
    debug!(mode = ?state.mode, year = ?state.year, rows = table.len(), "recomputing view");
    match (state.mode, state.year) {
        (ReportMode::Recession, _) => recession_report(table),
        (ReportMode::Yearly, Some(year)) => yearly_report(table, year),
        (ReportMode::Yearly, None) => ViewOutput::Empty,
    }
}

fn recession_report(table: &Table) -> ViewOutput {
    let data = table.recession_rows();

    let by_year = slot("Average Number of Automobile Sold in Recession Years", |title| {
        let rows = mean_by(&data, GroupKey::Year, ValueColumn::AutomobileSales)?;
        Ok(line_chart(&rows, GroupKey::Year, ValueColumn::AutomobileSales, title)?)
    });

    let by_type = slot("Average Number of Vehicles (by Type) Sold in Recession", |title| {
        let rows = mean_by(&data, GroupKey::VehicleType, ValueColumn::AutomobileSales)?;
        Ok(bar_chart(&rows, GroupKey::VehicleType, ValueColumn::AutomobileSales, title, None)?)
    });

    let advertising = slot("Advertising per Vehicle Type in Recession", |title| {
        let rows = mean_by(&data, GroupKey::VehicleType, ValueColumn::AdvertisingExpenditure)?;
        Ok(pie_chart(&rows, ValueColumn::AdvertisingExpenditure, GroupKey::VehicleType, title)?)
    });

    let unemployment = slot(
        "The Effect of Unemployment Rate on Vehicle Type Sales in Recession",
        |title| {
            let rows = mean_by_multi(
                &data,
                GroupKey::VehicleType,
                &[ValueColumn::AutomobileSales, ValueColumn::UnemploymentRate],
            )?;
            Ok(bar_chart(
                &rows,
                GroupKey::VehicleType,
                ValueColumn::AutomobileSales,
                title,
                Some(ValueColumn::UnemploymentRate),
            )?)
        },
    );

    ViewOutput::Charts {
        rows: [[by_year, by_type], [advertising, unemployment]],
    }
}

fn yearly_report(table: &Table, year: i32) -> ViewOutput {
    // Charts 1 and 2 cover the whole history; only 3 and 4 use the selected year.
    let all = table.view();
    let in_year = table.year_rows(year);

    let by_year = slot("Average Number of Automobile Sold between 1980 and 2024", |title| {
        let rows = mean_by(&all, GroupKey::Year, ValueColumn::AutomobileSales)?;
        Ok(line_chart(&rows, GroupKey::Year, ValueColumn::AutomobileSales, title)?)
    });

    let by_month = slot("Aggregated Number of Automobile Sold per Month between 1980-2024", |title| {
        let calendar: Vec<GroupValue> = Month::ALL.into_iter().map(GroupValue::Month).collect();
        let rows = sum_by(&all, GroupKey::Month, ValueColumn::AutomobileSales)?.with_category_order(&calendar);
        Ok(bar_chart(&rows, GroupKey::Month, ValueColumn::AutomobileSales, title, None)?)
    });

    let by_type = slot(&format!("Average Vehicles Sold by Vehicle Type in the year {year}"), |title| {
        let rows = mean_by(&in_year, GroupKey::VehicleType, ValueColumn::AutomobileSales)?;
        Ok(bar_chart(&rows, GroupKey::VehicleType, ValueColumn::AutomobileSales, title, None)?)
    });

    let advertising = slot(&format!("Advertising per Vehicle Type in the year {year}"), |title| {
        let rows = mean_by(&in_year, GroupKey::VehicleType, ValueColumn::AdvertisingExpenditure)?;
        Ok(pie_chart(&rows, ValueColumn::AdvertisingExpenditure, GroupKey::VehicleType, title)?)
    });

    ViewOutput::Charts {
        rows: [[by_year, by_month], [by_type, advertising]],
    }
}

#[derive(Debug, Error)]
enum SlotError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

fn slot(title: &str, build: impl FnOnce(&str) -> Result<Chart, SlotError>) -> ChartSlot {
    match build(title) {
        Ok(chart) => ChartSlot::Rendered(chart),
        Err(err) => {
            debug!(title, error = %err, "chart unavailable");
            ChartSlot::Unavailable {
                title: title.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
