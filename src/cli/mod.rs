//! Command-line parsing for the automobile sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::DEFAULT_DATA_URL;
use crate::domain::ReportMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autodash", version, about = "Automobile Sales Statistics Dashboard")]
pub struct Cli {
    /// Dataset location: an http(s) URL or a local CSV path.
    #[arg(long, global = true, env = "AUTODASH_DATA", default_value = DEFAULT_DATA_URL)]
    pub data: String,

    /// Log filter (tracing `EnvFilter` syntax, e.g. `info` or `autosales_dash=debug`).
    #[arg(long, global = true, env = "AUTODASH_LOG", default_value = "info")]
    pub log_level: String,

    /// Append logs to this file. The TUI only logs when this is set.
    #[arg(long, global = true, env = "AUTODASH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Defaults to `tui` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui,
    /// Print the charts of one view as text (or JSON).
    Report(ReportArgs),
    /// Write one view as a standalone HTML page with SVG charts.
    Html(HtmlArgs),
    /// Write the chart data of one view as CSV.
    Export(ExportArgs),
}

/// Which view to compute.
#[derive(Debug, Args, Clone)]
pub struct SelectionArgs {
    /// Report to show.
    #[arg(short = 'm', long, value_enum, default_value_t = ReportMode::Yearly)]
    pub mode: ReportMode,

    /// Year for the yearly report (ignored for the recession report).
    #[arg(short = 'y', long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Emit the view as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 14)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct HtmlArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output HTML file.
    #[arg(short = 'o', long, value_name = "HTML")]
    pub out: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output CSV file.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_selection() {
        let cli = Cli::try_parse_from([
            "autodash", "--data", "sales.csv", "report", "--mode", "recession", "--year", "2008", "--json",
        ])
        .unwrap();

        assert_eq!(cli.data, "sales.csv");
        let Some(Command::Report(args)) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.selection.mode, ReportMode::Recession);
        assert_eq!(args.selection.year, Some(2008));
        assert!(args.json);
    }
}
