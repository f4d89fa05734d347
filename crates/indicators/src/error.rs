//! Indicator error types.

use thiserror::Error;

/// Errors that can occur while building or evaluating a single indicator request.
///
/// Errors are local to one request; sibling requests in the same engine call
/// are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// No factory is registered for the requested indicator
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    /// Window length of zero (strict policy only)
    #[error("invalid period: {0} (must be >= 1)")]
    InvalidPeriod(usize),

    /// Series shorter than the indicator's first defined output (strict policy only)
    #[error("insufficient data: need {required} samples, got {actual}")]
    InsufficientData {
        /// Required number of samples.
        required: usize,
        /// Actual number of samples provided.
        actual: usize,
    },

    /// Parameters that can never produce a meaningful result (programmer error)
    #[error("degenerate parameters: {0}")]
    DegenerateParameters(String),

    /// Two requests in one call share a result name
    #[error("duplicate indicator name: {0}")]
    DuplicateName(String),

    /// Computation error (e.g. a worker thread panicked)
    #[error("computation error: {0}")]
    ComputationError(String),
}

impl IndicatorError {
    /// Creates a `DegenerateParameters` error with a message.
    #[must_use]
    pub fn degenerate(msg: impl Into<String>) -> Self {
        IndicatorError::DegenerateParameters(msg.into())
    }

    /// Creates a `ComputationError` with a message.
    #[must_use]
    pub fn computation(msg: impl Into<String>) -> Self {
        IndicatorError::ComputationError(msg.into())
    }
}
