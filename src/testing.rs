//! Deterministic in-memory datasets shared by unit tests.

use chrono::NaiveDate;

use crate::domain::{Month, Row, Table, VehicleType, YEAR_MAX, YEAR_MIN};

pub(crate) const RECESSION_YEARS: [i32; 10] = [1980, 1981, 1982, 1991, 2000, 2001, 2007, 2008, 2009, 2020];

/// A single row with neutral values; tweak fields in the test.
pub(crate) fn row(year: i32, month: Month, vehicle_type: VehicleType, sales: f64) -> Row {
    let month_no = month as u32 + 1;
    Row {
        date: NaiveDate::from_ymd_opt(year, month_no, 1).unwrap(),
        recession: RECESSION_YEARS.contains(&year),
        automobile_sales: sales,
        gdp: 50.0,
        unemployment_rate: 5.0,
        consumer_confidence: 100.0,
        seasonality_weight: 0.5,
        price: 25_000.0,
        advertising_expenditure: 2_000.0,
        vehicle_type,
        competition: 5.0,
        month,
        year,
        growth_rate: None,
        city: None,
    }
}

/// One row per month for every year in the selectable range.
///
/// Vehicle types rotate with the month so every year covers all five types,
/// and values depend on year/month so group means are distinguishable.
pub(crate) fn full_history() -> Table {
    let mut rows = Vec::new();
    for year in YEAR_MIN..=YEAR_MAX {
        for (m, month) in Month::ALL.into_iter().enumerate() {
            let vehicle_type = VehicleType::ALL[m % VehicleType::ALL.len()];
            let mut r = row(year, month, vehicle_type, (year - YEAR_MIN) as f64 * 10.0 + m as f64);
            r.advertising_expenditure = 1_000.0 + m as f64 * 100.0;
            r.unemployment_rate = if r.recession { 8.0 + m as f64 * 0.1 } else { 4.0 };
            rows.push(r);
        }
    }
    Table::new(rows)
}
