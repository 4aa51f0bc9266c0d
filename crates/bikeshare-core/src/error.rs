use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating or parsing a city's trip file.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The city identifier is not one of the configured cities.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// The configured source file for a city does not exist.
    #[error("Data file not found: {0}")]
    SourceNotFound(PathBuf),

    /// The source file exists but could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected the file (bad quoting, ragged rows, bad UTF-8).
    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column every city file must carry is missing from the header.
    #[error("Missing required column \"{column}\" in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A required value on a data row could not be parsed.
    #[error("Malformed row at line {line} in {path}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

/// A filter value that does not name a city, month or weekday.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFilterError {
    #[error("Invalid city: {0}")]
    City(String),

    #[error("Invalid month: {0}")]
    Month(String),

    #[error("Invalid weekday: {0}")]
    Weekday(String),
}

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// The trip data for a city could not be loaded.
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    /// A filter value failed validation.
    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    /// A reporter was handed a dataset with no rows.
    #[error("Cannot compute {0} statistics over an empty dataset")]
    EmptyDataset(&'static str),

    /// A report could not be serialised.
    #[error("Failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for terminal / stdin / stdout I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
