//! tadash Data
//!
//! Parquet bar loading, date parsing, range filtering and validation.

#![deny(clippy::all)]
#![deny(missing_docs)]

/// Date parsing helpers.
pub mod date;
/// Data-layer error types.
pub mod error;
/// Parquet loading and date-range filters.
pub mod loader;
/// Bar validation.
pub mod validation;

/// Re-export: date boundary for date-only inputs.
pub use date::DateBoundary;
/// Re-export: end of the current UTC day.
pub use date::end_of_today_ns;
/// Re-export: date string to epoch nanoseconds.
pub use date::parse_date_ns;
/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: env var naming the data root.
pub use loader::DATA_ROOT_ENV;
/// Re-export: fallback data root.
pub use loader::DEFAULT_DATA_ROOT;
/// Re-export: date-range filter for bars.
pub use loader::filter_by_date_range;
/// Re-export: load bars from Parquet.
pub use loader::load_bars;
/// Re-export: load range-filtered close series.
pub use loader::load_close_series;
/// Re-export: load, validate and range-filter bars.
pub use loader::load_range;
/// Re-export: resolve bar file path.
pub use loader::resolve_data_path;
/// Re-export: bar validation.
pub use validation::validate_bars;
