//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - loads the dataset (once)
//! - dispatches to the TUI or one of the one-shot renderers

use std::fs;

use clap::Parser;
use serde::Serialize;

use crate::cli::{Cli, Command, ExportArgs, HtmlArgs, ReportArgs};
use crate::error::{AppError, RenderError};
use crate::logging::{self, LogTarget};
use crate::view::{ViewOutput, ViewState};

pub mod pipeline;

/// Entry point for the `autodash` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    // `autodash` without a subcommand opens the dashboard.
    let command = cli.command.unwrap_or(Command::Tui);

    let target = match command {
        Command::Tui => LogTarget::FileOnly,
        _ => LogTarget::Stderr,
    };
    logging::init(&cli.log_level, cli.log_file.as_deref(), target)?;

    // The dataset is loaded before any UI starts: a load failure never
    // leaves the terminal half-initialized.
    let table = pipeline::load(&cli.data)?;

    match command {
        Command::Tui => crate::tui::run(&table),
        Command::Report(args) => handle_report(&table, args),
        Command::Html(args) => handle_html(&table, args),
        Command::Export(args) => handle_export(&table, args),
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    state: &'a ViewState,
    output: &'a ViewOutput,
}

fn handle_report(table: &crate::domain::Table, args: ReportArgs) -> Result<(), AppError> {
    let (state, output) = pipeline::compute_view(table, &args.selection)?;

    if args.json {
        let json = serde_json::to_string_pretty(&ReportJson {
            state: &state,
            output: &output,
        })
        .map_err(RenderError::from)?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", crate::report::format_view(&state, &output, args.width, args.height));
    Ok(())
}

fn handle_html(table: &crate::domain::Table, args: HtmlArgs) -> Result<(), AppError> {
    let (state, output) = pipeline::compute_view(table, &args.selection)?;
    let page = crate::report::html::render_page(&state, &output)?;
    fs::write(&args.out, page).map_err(|source| RenderError::Write {
        path: args.out.display().to_string(),
        source,
    })?;
    tracing::info!(path = %args.out.display(), "wrote HTML page");
    Ok(())
}

fn handle_export(table: &crate::domain::Table, args: ExportArgs) -> Result<(), AppError> {
    let (_, output) = pipeline::compute_view(table, &args.selection)?;
    crate::io::export::write_view_csv(&args.out, &output)?;
    tracing::info!(path = %args.out.display(), "wrote chart data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(argv: &[&str]) -> Command {
        Cli::try_parse_from(argv).unwrap().command.unwrap_or(Command::Tui)
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert!(matches!(command(&["autodash"]), Command::Tui));
        assert!(matches!(command(&["autodash", "--data", "x.csv"]), Command::Tui));
    }

    #[test]
    fn flag_values_named_like_subcommands_are_not_subcommands() {
        let cli = Cli::try_parse_from(["autodash", "--data", "report"]).unwrap();
        assert_eq!(cli.data, "report");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["autodash", "--log-file", "html", "--data", "export"]).unwrap();
        assert_eq!(cli.data, "export");
        assert!(matches!(cli.command.unwrap_or(Command::Tui), Command::Tui));
    }

    #[test]
    fn explicit_subcommands_still_parse() {
        let Command::Report(args) = command(&["autodash", "--data", "x.csv", "report", "-m", "recession"]) else {
            panic!("expected report command");
        };
        assert_eq!(args.selection.mode, crate::domain::ReportMode::Recession);
        assert!(matches!(command(&["autodash", "tui", "--data", "x.csv"]), Command::Tui));
    }
}
