//! `autosales-dash` library crate.
//!
//! The binary (`autodash`) is a thin wrapper around this library so that:
//!
//! - the aggregation and view logic is testable without spawning processes
//! - every front-end (TUI, text report, HTML page, CSV export) shares one pipeline
//!
//! Data flows one way: `data` loads a [`domain::Table`], `aggregate` reduces
//! it, `chart` binds the reduced rows to chart roles, and `view` decides which
//! charts the current selections produce.

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
pub mod view;

#[cfg(test)]
mod testing;
