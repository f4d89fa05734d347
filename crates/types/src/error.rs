use thiserror::Error;

/// Core error types for tadash
#[derive(Debug, Error)]
pub enum CoreError {
    /// Series keys must be strictly increasing
    #[error("non-monotonic key at index {index}: {current} <= {previous}")]
    NonMonotonicKey {
        /// Index of the offending key.
        index: usize,
        /// Key at `index - 1`.
        previous: i64,
        /// Key at `index`.
        current: i64,
    },

    /// Keys and values differ in length
    #[error("length mismatch: {keys} keys, {values} values")]
    LengthMismatch {
        /// Number of keys.
        keys: usize,
        /// Number of values.
        values: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
