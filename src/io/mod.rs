//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - chart data export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
