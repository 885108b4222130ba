//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the dataset row and table (`Row`, `Table`, `TableView`)
//! - grouping keys and value columns (`GroupKey`, `GroupValue`, `ValueColumn`)
//! - selector enums (`ReportMode`, `Month`, `VehicleType`)

pub mod types;

pub use types::*;
