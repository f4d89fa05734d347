//! tadash Types
//!
//! Core data structures for the tadash indicator dashboard.
//! This crate provides the keyed sample series every indicator consumes and
//! produces, price bars, indicator requests and run configuration.

#![deny(clippy::all)]

pub mod bar;
pub mod config;
pub mod error;
pub mod interval;
pub mod request;
pub mod sample;
pub mod series;

// Re-export main types for convenience
pub use bar::Bar;
pub use config::{DashboardConfig, LoggingConfig};
pub use error::CoreError;
pub use interval::{Interval, ParseIntervalError};
pub use request::{
    IndicatorKind, IndicatorRequest, ParseIndicatorKindError, PeriodPolicy, default_requests,
};
pub use sample::Sample;
pub use series::Series;
