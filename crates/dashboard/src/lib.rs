//! tadash Dashboard
//!
//! Runs a dashboard config end to end: loads bars, computes the requested
//! indicators and emits a JSON chart payload for an external renderer.

#![deny(clippy::all)]

pub mod error;
pub mod logging;
pub mod payload;
pub mod runner;

pub use error::{DashboardError, ErrorResult};
pub use logging::init_tracing;
pub use payload::{ChartPayload, IndicatorEntry, Panel, PanelKind, Trace, build_payload};
pub use runner::{run_dashboard, run_dashboard_from_json, validate_config};
