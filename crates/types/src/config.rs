use crate::error::CoreError;
use crate::interval::Interval;
use crate::request::{IndicatorRequest, PeriodPolicy, default_requests};

/// Dashboard run configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DashboardConfig {
    /// Ticker symbol
    pub ticker: String,
    /// Start date (ISO format, inclusive)
    pub start_date: String,
    /// End date (ISO format, inclusive); `None` means "up to now"
    #[serde(default)]
    pub end_date: Option<String>,
    /// Bar interval
    #[serde(default)]
    pub interval: Interval,
    /// Root directory of the Parquet files; falls back to `TADASH_DATA_ROOT`
    #[serde(default)]
    pub data_root: Option<String>,
    /// Indicator requests, in output order
    #[serde(default = "default_requests")]
    pub indicators: Vec<IndicatorRequest>,
    /// Treatment of out-of-range periods
    #[serde(default)]
    pub period_policy: PeriodPolicy,
    /// Evaluate requests on worker threads
    #[serde(default)]
    pub parallel: bool,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Minimal config for `ticker` from `start_date` with the default requests.
    #[must_use]
    pub fn new(ticker: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            start_date: start_date.into(),
            end_date: None,
            interval: Interval::default(),
            data_root: None,
            indicators: default_requests(),
            period_policy: PeriodPolicy::default(),
            parallel: false,
            logging: LoggingConfig::default(),
        }
    }

    /// Parses a config from JSON.
    ///
    /// # Errors
    /// Returns [`CoreError::Json`] when the document does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    /// Returns [`CoreError::Io`] or [`CoreError::Json`].
    pub fn from_file(path: &std::path::Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Logging configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_logging_level")]
    pub level: String,
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
        }
    }
}
