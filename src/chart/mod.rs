//! Chart builders.
//!
//! A [`Chart`] is a render-only description: kind, title, axis labels and a list
//! of points. Builders only *bind* columns of an already reduced
//! [`SummaryTable`] to chart roles; they never aggregate and never mutate their
//! input. Rendering is left to the front-ends (`tui`, `plot`).

use serde::Serialize;

use crate::aggregate::SummaryTable;
use crate::domain::{GroupKey, GroupValue, ValueColumn};
use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    /// Lowercase name, as used in JSON and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Category label (x tick for line/bar, slice name for pie).
    pub label: String,
    /// Numeric x position: the year for year keys, the category index otherwise.
    pub x: f64,
    pub value: f64,
    /// Optional second measure used to shade the mark.
    pub color: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    /// `(min, max)` of the point values, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().map(|p| p.value))
    }

    /// `(min, max)` of the color measure, if any point has one.
    pub fn color_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().filter_map(|p| p.color))
    }

    /// Fraction of the total carried by each point (pie slices).
    ///
    /// Negative values are clamped to zero; an all-zero chart yields all zeros.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.points.iter().map(|p| p.value.max(0.0)).sum();
        self.points
            .iter()
            .map(|p| if total > 0.0 { p.value.max(0.0) / total } else { 0.0 })
            .collect()
    }
}

/// Line chart of `y` against the group key `x`.
pub fn line_chart(
    rows: &SummaryTable,
    x: GroupKey,
    y: ValueColumn,
    title: impl Into<String>,
) -> Result<Chart, ChartError> {
    check_key(rows, x)?;
    let y_idx = column_index(rows, y)?;
    Ok(Chart {
        kind: ChartKind::Line,
        title: title.into(),
        x_label: x.column_name().to_string(),
        y_label: y.column_name().to_string(),
        color_label: None,
        points: points(rows, y_idx, None),
    })
}

/// Bar chart of `y` per category of `x`, optionally shaded by `color`.
pub fn bar_chart(
    rows: &SummaryTable,
    x: GroupKey,
    y: ValueColumn,
    title: impl Into<String>,
    color: Option<ValueColumn>,
) -> Result<Chart, ChartError> {
    check_key(rows, x)?;
    let y_idx = column_index(rows, y)?;
    let color_idx = color.map(|c| column_index(rows, c)).transpose()?;
    Ok(Chart {
        kind: ChartKind::Bar,
        title: title.into(),
        x_label: x.column_name().to_string(),
        y_label: y.column_name().to_string(),
        color_label: color.map(|c| c.column_name().to_string()),
        points: points(rows, y_idx, color_idx),
    })
}

/// Pie chart: one slice per `label` group, sized by `value`.
pub fn pie_chart(
    rows: &SummaryTable,
    value: ValueColumn,
    label: GroupKey,
    title: impl Into<String>,
) -> Result<Chart, ChartError> {
    check_key(rows, label)?;
    let value_idx = column_index(rows, value)?;
    Ok(Chart {
        kind: ChartKind::Pie,
        title: title.into(),
        x_label: label.column_name().to_string(),
        y_label: value.column_name().to_string(),
        color_label: None,
        points: points(rows, value_idx, None),
    })
}

fn check_key(rows: &SummaryTable, requested: GroupKey) -> Result<(), ChartError> {
    if rows.key != requested {
        return Err(ChartError::KeyMismatch {
            requested,
            actual: rows.key,
        });
    }
    Ok(())
}

fn column_index(rows: &SummaryTable, column: ValueColumn) -> Result<usize, ChartError> {
    rows.column_index(column).ok_or(ChartError::MissingColumn(column))
}

fn points(rows: &SummaryTable, value_idx: usize, color_idx: Option<usize>) -> Vec<ChartPoint> {
    rows.rows
        .iter()
        .enumerate()
        .map(|(i, row)| ChartPoint {
            label: row.key.to_string(),
            x: match row.key {
                GroupValue::Year(y) => y as f64,
                _ => i as f64,
            },
            value: row.values[value_idx],
            color: color_idx.map(|c| row.values[c]),
        })
        .collect()
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{mean_by, mean_by_multi};
    use crate::testing::full_history;

    #[test]
    fn line_chart_uses_years_as_x() {
        let table = full_history();
        let summary = mean_by(&table.view(), GroupKey::Year, ValueColumn::AutomobileSales).unwrap();

        let chart = line_chart(&summary, GroupKey::Year, ValueColumn::AutomobileSales, "Sales").unwrap();

        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.x_label, "Year");
        assert_eq!(chart.y_label, "Automobile_Sales");
        assert_eq!(chart.points.len(), 44);
        assert_eq!(chart.points[0].x, 1980.0);
        assert_eq!(chart.points[0].label, "1980");
    }

    #[test]
    fn bar_chart_carries_color_measure() {
        let table = full_history();
        let summary = mean_by_multi(
            &table.recession_rows(),
            GroupKey::VehicleType,
            &[ValueColumn::AutomobileSales, ValueColumn::UnemploymentRate],
        )
        .unwrap();

        let chart = bar_chart(
            &summary,
            GroupKey::VehicleType,
            ValueColumn::AutomobileSales,
            "Effect",
            Some(ValueColumn::UnemploymentRate),
        )
        .unwrap();

        assert_eq!(chart.color_label.as_deref(), Some("unemployment_rate"));
        assert!(chart.points.iter().all(|p| p.color.is_some()));
        assert_eq!(chart.points[1].x, 1.0);
        assert!(chart.color_range().is_some());
    }

    #[test]
    fn pie_shares_sum_to_one() {
        let table = full_history();
        let summary = mean_by(
            &table.year_rows(2008),
            GroupKey::VehicleType,
            ValueColumn::AdvertisingExpenditure,
        )
        .unwrap();

        let chart = pie_chart(&summary, ValueColumn::AdvertisingExpenditure, GroupKey::VehicleType, "Ads").unwrap();

        let total: f64 = summary.rows.iter().map(|r| r.values[0]).sum();
        let chart_total: f64 = chart.points.iter().map(|p| p.value).sum();
        assert!((total - chart_total).abs() < 1e-9);
        let shares: f64 = chart.shares().iter().sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_bindings_are_rejected() {
        let table = full_history();
        let summary = mean_by(&table.view(), GroupKey::Year, ValueColumn::AutomobileSales).unwrap();

        let err = bar_chart(&summary, GroupKey::Month, ValueColumn::AutomobileSales, "x", None).unwrap_err();
        assert_eq!(
            err,
            ChartError::KeyMismatch {
                requested: GroupKey::Month,
                actual: GroupKey::Year
            }
        );

        let err = pie_chart(&summary, ValueColumn::Price, GroupKey::Year, "x").unwrap_err();
        assert_eq!(err, ChartError::MissingColumn(ValueColumn::Price));
    }

    #[test]
    fn builders_leave_input_untouched() {
        let table = full_history();
        let summary = mean_by(&table.view(), GroupKey::Month, ValueColumn::AutomobileSales).unwrap();
        let before = summary.clone();

        let _ = bar_chart(&summary, GroupKey::Month, ValueColumn::AutomobileSales, "x", None).unwrap();
        let _ = pie_chart(&summary, ValueColumn::AutomobileSales, GroupKey::Month, "x").unwrap();

        assert_eq!(summary, before);
    }

    #[test]
    fn kind_names_match_their_json_form() {
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.as_str()));
        }
    }
}
