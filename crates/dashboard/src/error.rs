//! Dashboard error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a dashboard run.
///
/// Per-indicator failures are not in here: they are recorded in the payload
/// next to the indicators that succeeded.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// JSON config parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Result serialization error
    #[error("result serialization error: {0}")]
    ResultSerialize(String),

    /// Data loading, date parsing or validation error
    #[error("data error: {0}")]
    Data(#[from] tadash_data::DataError),

    /// Series or config invariant violation
    #[error("core error: {0}")]
    Core(#[from] tadash_types::CoreError),
}

impl DashboardError {
    /// Returns true if this is a config parse/validation error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DashboardError::ConfigParse(_) | DashboardError::ConfigValidation(_)
        )
    }

    /// Returns the error category for the output contract.
    /// Categories: `config`, `market_data`, `runtime`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            DashboardError::ConfigParse(_) | DashboardError::ConfigValidation(_) => "config",
            DashboardError::Data(_) => "market_data",
            DashboardError::Core(_) | DashboardError::ResultSerialize(_) => "runtime",
        }
    }
}

/// Error document printed instead of a payload when a run fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    /// One of `config`, `market_data`, `runtime`
    pub category: String,
    /// Human-readable message
    pub message: String,
}

impl From<DashboardError> for ErrorResult {
    fn from(err: DashboardError) -> Self {
        Self {
            category: err.error_category().to_string(),
            message: err.to_string(),
        }
    }
}
