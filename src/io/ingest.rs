//! CSV ingest and normalization.
//!
//! This module is responsible for turning the automobile sales CSV into a
//! clean, typed [`Table`].
//!
//! Design goals:
//! - **Strict schema** for required columns (missing column = load failure)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (row order is file order)
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Month, Row, Table, VehicleType};
use crate::error::LoadError;

/// Columns every dataset must carry (normalized header names).
const REQUIRED_COLUMNS: [&str; 13] = [
    "date",
    "recession",
    "automobile_sales",
    "gdp",
    "unemployment_rate",
    "consumer_confidence",
    "seasonality_weight",
    "price",
    "advertising_expenditure",
    "vehicle_type",
    "competition",
    "month",
    "year",
];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the table plus what was skipped along the way.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Parse a full CSV document into a [`Table`].
pub fn parse_table<R: Read>(input: R) -> Result<LoadedTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(LoadError::Headers)?.clone();
    let header_map = build_header_map(&headers);

    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(LoadError::MissingColumn(name));
        }
    }

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if rows.is_empty() {
        return Err(LoadError::NoRows { rows_read });
    }

    Ok(LoadedTable {
        table: Table::new(rows),
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Row, String> {
    let year = get_required(record, header_map, "year")?;
    let year = year
        .parse::<i32>()
        .map_err(|_| format!("Invalid `year` value '{year}'."))?;

    let vehicle_type = get_required(record, header_map, "vehicle_type")?.parse::<VehicleType>()?;
    let month = get_required(record, header_map, "month")?.parse::<Month>()?;
    let date = parse_date(get_required(record, header_map, "date")?)?;
    let recession = parse_flag(get_required(record, header_map, "recession")?)?;

    Ok(Row {
        date,
        recession,
        automobile_sales: get_f64(record, header_map, "automobile_sales")?,
        gdp: get_f64(record, header_map, "gdp")?,
        unemployment_rate: get_f64(record, header_map, "unemployment_rate")?,
        consumer_confidence: get_f64(record, header_map, "consumer_confidence")?,
        seasonality_weight: get_f64(record, header_map, "seasonality_weight")?,
        price: get_f64(record, header_map, "price")?,
        advertising_expenditure: get_f64(record, header_map, "advertising_expenditure")?,
        vehicle_type,
        competition: get_f64(record, header_map, "competition")?,
        month,
        year,
        growth_rate: parse_opt_f64(get_optional(record, header_map, "growth_rate")),
        city: get_optional(record, header_map, "city").map(str::to_string),
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn get_f64(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<f64, String> {
    let raw = get_required(record, header_map, name)?;
    parse_opt_f64(Some(raw)).ok_or_else(|| format!("Invalid `{name}` value '{raw}'."))
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(format!("Invalid `recession` flag '{s}'. Expected 0/1.")),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // The published dataset uses US-style `M/D/YYYY`; ISO dates and a couple of
    // other common export formats are accepted as well.
    const FMTS: [&str; 4] = ["%m/%d/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: M/D/YYYY, YYYY-MM-DD, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let s = s?;
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Year,Month,Recession,Consumer_Confidence,Seasonality_Weight,Price,Advertising_Expenditure,Competition,GDP,Growth_Rate,unemployment_rate,Automobile_Sales,Vehicle_Type,City";

    #[test]
    fn parses_published_layout() {
        let csv = format!(
            "{HEADER}\n\
             1/31/1980,1980,Jan,1,108.24,0.5,27483.571,1558,7,60.223,0.01,5.4,456,Supperminicar,Georgia\n\
             2/29/1980,1980,Feb,1,98.75,0.75,24308.678,3048,4,45.986,-0.49,4.8,555.9,Smallfamiliycar,New York\n"
        );
        let loaded = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(loaded.rows_read, 2);
        assert!(loaded.row_errors.is_empty());
        let rows = loaded.table.rows();
        assert_eq!(rows[0].year, 1980);
        assert_eq!(rows[0].month, Month::Jan);
        assert!(rows[0].recession);
        assert_eq!(rows[0].vehicle_type, VehicleType::Supperminicar);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(1980, 2, 29).unwrap());
        assert!((rows[1].automobile_sales - 555.9).abs() < 1e-9);
        assert_eq!(rows[1].city.as_deref(), Some("New York"));
        assert_eq!(rows[1].growth_rate, Some(-0.49));
    }

    #[test]
    fn skips_bad_rows_with_line_numbers() {
        let csv = format!(
            "{HEADER}\n\
             1/31/1980,1980,Jan,1,108.24,0.5,27483.571,1558,7,60.223,0.01,5.4,456,Supperminicar,Georgia\n\
             2/29/1980,1980,Feb,1,98.75,0.75,24308.678,3048,4,45.986,-0.49,4.8,555.9,Truck,New York\n\
             3/31/1980,,Mar,1,98.75,0.75,24308.678,3048,4,45.986,-0.49,4.8,555.9,Sports,Illinois\n\
             4/30/1980,1980,Apr,maybe,98.75,0.75,24308.678,3048,4,45.986,-0.49,4.8,555.9,Sports,Illinois\n"
        );
        let loaded = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(loaded.rows_read, 4);
        assert_eq!(loaded.table.len(), 1);
        let lines: Vec<usize> = loaded.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(loaded.row_errors[0].message.contains("Truck"));
        assert!(loaded.row_errors[1].message.contains("year"));
    }

    #[test]
    fn missing_column_fails_the_load() {
        let csv = "Date,Year,Month\n1/31/1980,1980,Jan\n";
        let err = parse_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("recession")));
    }

    #[test]
    fn all_rows_rejected_is_an_error() {
        let csv = format!(
            "{HEADER}\n\
             1/31/1980,1980,Jan,1,108.24,0.5,27483.571,1558,7,60.223,0.01,5.4,n/a,Supperminicar,Georgia\n"
        );
        let err = parse_table(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoRows { rows_read: 1 }));
    }

    #[test]
    fn headers_tolerate_bom_and_case() {
        let csv = "\u{feff}DATE,YEAR,MONTH,RECESSION,CONSUMER_CONFIDENCE,SEASONALITY_WEIGHT,PRICE,ADVERTISING_EXPENDITURE,COMPETITION,GDP,UNEMPLOYMENT_RATE,AUTOMOBILE_SALES,VEHICLE_TYPE\n\
                   1980-01-31,1980,January,false,108.24,0.5,27483.571,1558,7,60.223,5.4,456,sports\n";
        let loaded = parse_table(csv.as_bytes()).unwrap();
        let row = &loaded.table.rows()[0];
        assert_eq!(row.vehicle_type, VehicleType::Sports);
        assert!(!row.recession);
        assert_eq!(row.growth_rate, None);
        assert_eq!(row.city, None);
    }
}
