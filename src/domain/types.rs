//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - exported to JSON/CSV
//! - rendered by any of the front-ends (TUI, text report, HTML page)

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

/// First selectable year.
pub const YEAR_MIN: i32 = 1980;
/// Last selectable year.
pub const YEAR_MAX: i32 = 2023;

/// Calendar month of an observation.
///
/// Declaration order is calendar order, so the derived `Ord` sorts `Jan..Dec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl FromStr for Month {
    type Err = String;

    /// Accepts the three-letter abbreviation or the full name, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let prefix: String = s.chars().take(3).collect::<String>().to_ascii_lowercase();
        let month = Month::ALL
            .into_iter()
            .find(|m| m.label().to_ascii_lowercase() == prefix)
            .ok_or_else(|| format!("Unknown month '{s}'."))?;

        // "Janx" or "Marchy" are not months.
        if s.len() > 3 {
            let full = chrono::Month::try_from(month as u8 + 1)
                .map(|m| m.name().to_ascii_lowercase())
                .unwrap_or_default();
            if s.to_ascii_lowercase() != full {
                return Err(format!("Unknown month '{s}'."));
            }
        }
        Ok(month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vehicle category as spelled in the dataset.
///
/// Declared in alphabetical order so ascending key order matches the
/// order a plain string sort of the column would give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum VehicleType {
    Executivecar,
    Mediumfamilycar,
    Smallfamiliycar,
    Sports,
    Supperminicar,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Executivecar,
        VehicleType::Mediumfamilycar,
        VehicleType::Smallfamiliycar,
        VehicleType::Sports,
        VehicleType::Supperminicar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Executivecar => "Executivecar",
            VehicleType::Mediumfamilycar => "Mediumfamilycar",
            VehicleType::Smallfamiliycar => "Smallfamiliycar",
            VehicleType::Sports => "Sports",
            VehicleType::Supperminicar => "Supperminicar",
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        VehicleType::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown vehicle type '{s}'."))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observation of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: NaiveDate,
    pub recession: bool,
    pub automobile_sales: f64,
    pub gdp: f64,
    pub unemployment_rate: f64,
    pub consumer_confidence: f64,
    pub seasonality_weight: f64,
    pub price: f64,
    pub advertising_expenditure: f64,
    pub vehicle_type: VehicleType,
    pub competition: f64,
    pub month: Month,
    pub year: i32,

    /// Present in the published dataset, unused by the charts.
    pub growth_rate: Option<f64>,
    pub city: Option<String>,
}

/// The loaded dataset. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow every row.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            rows: self.rows.iter().collect(),
        }
    }

    /// Borrow the rows matching `pred`, in table order.
    pub fn filter(&self, pred: impl Fn(&Row) -> bool) -> TableView<'_> {
        TableView {
            rows: self.rows.iter().filter(|r| pred(r)).collect(),
        }
    }

    /// Rows flagged as recession periods.
    pub fn recession_rows(&self) -> TableView<'_> {
        self.filter(|r| r.recession)
    }

    /// Rows observed in `year`.
    pub fn year_rows(&self, year: i32) -> TableView<'_> {
        self.filter(|r| r.year == year)
    }
}

/// A borrowed subset of a [`Table`].
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    rows: Vec<&'a Row>,
}

impl<'a> TableView<'a> {
    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column a table can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupKey {
    Year,
    Month,
    VehicleType,
}

impl GroupKey {
    pub fn of(self, row: &Row) -> GroupValue {
        match self {
            GroupKey::Year => GroupValue::Year(row.year),
            GroupKey::Month => GroupValue::Month(row.month),
            GroupKey::VehicleType => GroupValue::VehicleType(row.vehicle_type),
        }
    }

    /// Column name as it appears in the dataset header.
    pub fn column_name(self) -> &'static str {
        match self {
            GroupKey::Year => "Year",
            GroupKey::Month => "Month",
            GroupKey::VehicleType => "Vehicle_Type",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// The concrete key of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Year(i32),
    Month(Month),
    VehicleType(VehicleType),
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Year(y) => write!(f, "{y}"),
            GroupValue::Month(m) => f.write_str(m.label()),
            GroupValue::VehicleType(v) => f.write_str(v.label()),
        }
    }
}

/// Numeric columns that can be reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueColumn {
    AutomobileSales,
    Gdp,
    UnemploymentRate,
    ConsumerConfidence,
    SeasonalityWeight,
    Price,
    AdvertisingExpenditure,
    Competition,
}

impl ValueColumn {
    pub fn of(self, row: &Row) -> f64 {
        match self {
            ValueColumn::AutomobileSales => row.automobile_sales,
            ValueColumn::Gdp => row.gdp,
            ValueColumn::UnemploymentRate => row.unemployment_rate,
            ValueColumn::ConsumerConfidence => row.consumer_confidence,
            ValueColumn::SeasonalityWeight => row.seasonality_weight,
            ValueColumn::Price => row.price,
            ValueColumn::AdvertisingExpenditure => row.advertising_expenditure,
            ValueColumn::Competition => row.competition,
        }
    }

    /// Column name as it appears in the dataset header.
    pub fn column_name(self) -> &'static str {
        match self {
            ValueColumn::AutomobileSales => "Automobile_Sales",
            ValueColumn::Gdp => "GDP",
            ValueColumn::UnemploymentRate => "unemployment_rate",
            ValueColumn::ConsumerConfidence => "Consumer_Confidence",
            ValueColumn::SeasonalityWeight => "Seasonality_Weight",
            ValueColumn::Price => "Price",
            ValueColumn::AdvertisingExpenditure => "Advertising_Expenditure",
            ValueColumn::Competition => "Competition",
        }
    }
}

impl fmt::Display for ValueColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Which report the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Yearly Statistics.
    Yearly,
    /// Recession Period Statistics.
    Recession,
}

impl ReportMode {
    pub const ALL: [ReportMode; 2] = [ReportMode::Yearly, ReportMode::Recession];

    /// Label shown in the mode selector.
    pub fn display_name(self) -> &'static str {
        match self {
            ReportMode::Yearly => "Yearly Statistics",
            ReportMode::Recession => "Recession Period Statistics",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ReportMode::Yearly => ReportMode::Recession,
            ReportMode::Recession => ReportMode::Yearly,
        }
    }

    /// Parse either a selector label ("Yearly Statistics") or a short name ("yearly").
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        ReportMode::ALL.into_iter().find(|m| {
            m.display_name().eq_ignore_ascii_case(s)
                || <ReportMode as ValueEnum>::to_possible_value(m)
                    .is_some_and(|v| v.matches(s, true))
        })
    }
}
