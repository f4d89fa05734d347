//! High-level dashboard runner helpers.

use tadash_data::{
    DateBoundary, end_of_today_ns, load_range, parse_date_ns, resolve_data_path,
};
use tadash_indicators::IndicatorEngine;
use tadash_types::{DashboardConfig, Series};
use tracing::info;

use crate::error::DashboardError;
use crate::payload::{ChartPayload, RunInfo, build_payload};

/// Main entry point: receives config JSON, returns payload JSON.
///
/// # Errors
/// - [`DashboardError::ConfigParse`] when JSON parsing fails.
/// - [`DashboardError::ConfigValidation`] for invalid configuration values.
/// - Any error from [`run_dashboard`].
pub fn run_dashboard_from_json(config_json: &str) -> Result<String, DashboardError> {
    let config: DashboardConfig = serde_json::from_str(config_json)
        .map_err(|e| DashboardError::ConfigParse(e.to_string()))?;

    let payload = run_dashboard(&config)?;

    serde_json::to_string(&payload).map_err(|e| DashboardError::ResultSerialize(e.to_string()))
}

/// Loads the configured bars, computes every requested indicator and builds
/// the chart payload.
///
/// Failing indicator requests do not fail the run; they are reported inside
/// the payload. A date range without bars yields a payload with empty series.
///
/// # Errors
/// - [`DashboardError::ConfigValidation`] for invalid configuration values.
/// - [`DashboardError::Data`] when the bar file is missing or corrupt.
pub fn run_dashboard(config: &DashboardConfig) -> Result<ChartPayload, DashboardError> {
    let (start_ns, end_ns) = validate_config(config)?;

    let path = resolve_data_path(&config.ticker, config.interval, config.data_root.as_deref());
    let bars = load_range(&path, start_ns, end_ns)?;
    let series = Series::from_closes(&bars)?;

    let engine = IndicatorEngine::new(config.period_policy);
    let set = if series.is_empty() {
        engine.resolve_empty(&config.indicators)
    } else if config.parallel {
        engine.compute_parallel(&series, &config.indicators)
    } else {
        engine.compute(&series, &config.indicators)
    };

    info!(
        ticker = %config.ticker,
        interval = %config.interval,
        bars = bars.len(),
        policy = ?engine.policy(),
        requests = config.indicators.len(),
        failed = set.failures().count(),
        "Dashboard run complete"
    );

    let run_info = RunInfo {
        ticker: &config.ticker,
        interval: config.interval,
        start_ns,
        end_ns,
    };
    Ok(build_payload(&run_info, bars, &config.indicators, set))
}

/// Checks the config and resolves its date range to epoch nanoseconds.
///
/// A missing `end_date` means the end of the current UTC day.
///
/// # Errors
/// [`DashboardError::ConfigValidation`] on an empty or path-like ticker,
/// unparseable dates or a range that ends before it starts.
pub fn validate_config(config: &DashboardConfig) -> Result<(i64, i64), DashboardError> {
    let ticker = config.ticker.trim();
    if ticker.is_empty() {
        return Err(DashboardError::ConfigValidation("ticker is empty".to_string()));
    }
    if ticker != config.ticker || ticker.contains(['/', '\\']) || ticker.starts_with('.') {
        return Err(DashboardError::ConfigValidation(format!(
            "invalid ticker '{}'",
            config.ticker
        )));
    }

    let start_ns = parse_date_ns(&config.start_date, DateBoundary::Start)
        .map_err(|e| DashboardError::ConfigValidation(format!("start_date: {e}")))?;
    let end_ns = match &config.end_date {
        Some(end) => parse_date_ns(end, DateBoundary::End)
            .map_err(|e| DashboardError::ConfigValidation(format!("end_date: {e}")))?,
        None => end_of_today_ns(),
    };
    if start_ns > end_ns {
        return Err(DashboardError::ConfigValidation(
            "start_date must not be after end_date".to_string(),
        ));
    }

    Ok((start_ns, end_ns))
}
