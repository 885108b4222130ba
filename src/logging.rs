//! Tracing subscriber setup.
//!
//! Non-interactive commands log to stderr. The TUI owns the terminal, so it
//! only logs when a log file is given.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Write to the file if one is given, otherwise discard everything.
    FileOnly,
}

pub fn init(filter: &str, file: Option<&Path>, target: LogTarget) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::new(2, format!("Invalid log filter '{filter}': {e}")))?;

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false);

    match (file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| AppError::new(4, format!("Failed to log to '{}': {e}", path.display())))
        }
        (None, LogTarget::Stderr) => {
            // An already installed subscriber keeps receiving stderr output.
            if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
                eprintln!("warning: logging not initialized: {e}");
            }
            Ok(())
        }
        (None, LogTarget::FileOnly) => Ok(()),
    }
}
