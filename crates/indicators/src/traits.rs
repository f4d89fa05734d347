//! Indicator traits.
//!
//! Every indicator consumes a [`Series`] and returns output series on the
//! same key axis. Warm-up positions are `Sample::Missing`.

use tadash_types::Series;

/// Trait for single-output indicators.
pub trait Indicator: Send + Sync {
    /// Computes the indicator over the whole series.
    ///
    /// The result has the same length and keys as `series`.
    fn compute(&self, series: &Series) -> Series;

    /// Name of the indicator (e.g., "SMA", "RSI").
    fn name(&self) -> &str;

    /// Number of leading positions that are always `Missing`.
    fn warmup_periods(&self) -> usize;

    /// Minimum series length for at least one defined output.
    fn required_len(&self) -> usize {
        self.warmup_periods() + 1
    }
}

/// Trait for multi-output indicators like Bollinger Bands.
///
/// These indicators produce several series (e.g. upper, middle, lower bands)
/// that are computed together.
pub trait MultiOutputIndicator: Send + Sync {
    /// Type of the output structure
    type Output: IntoMultiSeries;

    /// Computes all outputs at once.
    fn compute_all(&self, series: &Series) -> Self::Output;

    /// Name of the indicator.
    fn name(&self) -> &str;

    /// Number of leading positions that are always `Missing`.
    fn warmup_periods(&self) -> usize;

    /// Minimum series length for at least one defined output.
    fn required_len(&self) -> usize {
        self.warmup_periods() + 1
    }

    /// List of output names, in the order of [`IntoMultiSeries::into_series`].
    fn output_names(&self) -> &'static [&'static str];
}

/// Trait for converting multi-output results into a list of series.
pub trait IntoMultiSeries {
    /// Converts the output structure into its series, in output-name order.
    fn into_series(self) -> Vec<Series>;
}
