//! Data-layer error types.

use tadash_types::CoreError;
use thiserror::Error;

/// Errors that can occur while loading, parsing or validating bar data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required file was not found on disk.
    #[error("File not found: {0} ({1})")]
    FileNotFound(String, String),

    /// Parquet parsing or decoding failed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A required column is missing.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected data type.
    #[error("Invalid column type: {0}")]
    InvalidColumnType(String),

    /// A timestamp column is missing timezone or not UTC.
    #[error("Invalid timezone for column {column}: expected UTC, got {timezone}")]
    InvalidTimezone {
        /// Name of the offending column.
        column: String,
        /// Observed timezone string ("<none>" if missing).
        timezone: String,
    },

    /// A date or datetime string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The requested range ends before it starts.
    #[error("Invalid date range: start_ns={start_ns} > end_ns={end_ns}")]
    InvalidDateRange {
        /// Inclusive start timestamp (epoch-ns).
        start_ns: i64,
        /// Inclusive end timestamp (epoch-ns).
        end_ns: i64,
    },

    /// Data violated a bar invariant.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Building the close series failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
