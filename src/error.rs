//! Error types.
//!
//! Each component has its own typed error (`thiserror`). At the binary edge
//! everything funnels into [`AppError`], which carries the process exit code:
//!
//! - `2`: usage / configuration / selection errors
//! - `3`: the dataset contained no usable rows
//! - `4`: runtime failures (network, IO, terminal, rendering)

use thiserror::Error;

use crate::domain::{GroupKey, ValueColumn};

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to obtain the dataset. Always fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Request for {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for {url} failed with status {status}.")]
    Status { url: String, status: u16 },

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Expected a file, got a directory: {0}")]
    IsDirectory(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV headers: {0}")]
    Headers(#[source] csv::Error),

    #[error("Missing required column: `{0}`")]
    MissingColumn(&'static str),

    #[error("No valid rows in dataset ({rows_read} read, all rejected).")]
    NoRows { rows_read: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The (filtered) input has no rows, so there is nothing to reduce.
    #[error("No rows to group by {key}.")]
    EmptyGroup { key: GroupKey },

    #[error("No value columns requested.")]
    NoColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Chart binds `{requested}` on the x axis, but the summary is grouped by `{actual}`.")]
    KeyMismatch { requested: GroupKey, actual: GroupKey },

    #[error("Column `{0}` is not present in the summary.")]
    MissingColumn(ValueColumn),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unknown report mode '{0}'. Expected 'Yearly Statistics' or 'Recession Period Statistics'.")]
    InvalidMode(String),

    #[error("Invalid year '{0}'.")]
    InvalidYear(String),

    #[error("Year {year} is outside {min}..={max}.")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to draw chart '{title}': {message}")]
    Draw { title: String, message: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize view: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let code = match err {
            LoadError::NoRows { .. } => 3,
            LoadError::NotFound(_) | LoadError::IsDirectory(_) | LoadError::MissingColumn(_) => 2,
            _ => 4,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::new(4, err.to_string())
    }
}
