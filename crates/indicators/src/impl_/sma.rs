//! Simple Moving Average (SMA) indicator

use crate::impl_::window::RollingSum;
use crate::traits::Indicator;
use tadash_types::{Sample, Series};

/// Simple Moving Average
///
/// Arithmetic mean of the last `period` samples. Any window containing a
/// `Missing` sample yields `Missing`.
#[derive(Debug, Clone)]
pub struct SMA {
    /// Number of periods for the moving average
    pub period: usize,
}

impl SMA {
    /// Creates a new SMA indicator with the given period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

/// Writes the trailing mean of `input` into `out` (same length).
pub(crate) fn rolling_mean(input: &[Sample], period: usize, out: &mut [Sample]) {
    let divisor = period as f64;
    for (slot, sum) in out.iter_mut().zip(RollingSum::new(input, period)) {
        if let Some(sum) = sum {
            *slot = Sample::from_f64(sum / divisor);
        }
    }
}

impl Indicator for SMA {
    fn compute(&self, series: &Series) -> Series {
        series.derive(|input, out| rolling_mean(input, self.period, out))
    }

    fn name(&self) -> &str {
        "SMA"
    }

    fn warmup_periods(&self) -> usize {
        self.period.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_series(values: &[f64]) -> Series {
        Series::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as i64 * 60, *v)),
        )
        .unwrap()
    }

    fn value(series: &Series, idx: usize) -> f64 {
        series.value_at(idx).value().unwrap()
    }

    #[test]
    fn test_sma_basic() {
        let series = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = SMA::new(3).compute(&series);

        assert!(result.value_at(0).is_missing());
        assert!(result.value_at(1).is_missing());
        assert_relative_eq!(value(&result, 2), 2.0, epsilon = 1e-10); // (1+2+3)/3
        assert_relative_eq!(value(&result, 3), 3.0, epsilon = 1e-10); // (2+3+4)/3
        assert_relative_eq!(value(&result, 4), 4.0, epsilon = 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_eleven_point_scenario() {
        let series = make_series(&[
            10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0,
        ]);
        let result = SMA::new(5).compute(&series);

        assert!(result.values()[..4].iter().all(|v| v.is_missing()));
        assert_relative_eq!(value(&result, 4), 12.0, epsilon = 1e-12);
        assert_relative_eq!(value(&result, 10), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sma_constant_input() {
        let series = make_series(&[5.0; 10]);
        let result = SMA::new(3).compute(&series);

        for v in &result.values()[2..] {
            assert_relative_eq!(v.value().unwrap(), 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sma_missing_propagates_to_every_window_containing_it() {
        let series = make_series(&[1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0, 7.0, 8.0]);
        let result = SMA::new(3).compute(&series);

        // Windows ending at 3, 4, 5 contain index 3.
        for idx in [3, 4, 5] {
            assert!(result.value_at(idx).is_missing(), "index {idx}");
        }
        assert_relative_eq!(value(&result, 2), 2.0, epsilon = 1e-12);
        assert_relative_eq!(value(&result, 6), 6.0, epsilon = 1e-12);
        assert_relative_eq!(value(&result, 7), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let series = make_series(&[1.0, 2.0]);
        let result = SMA::new(3).compute(&series);

        assert_eq!(result.len(), 2);
        assert!(result.values().iter().all(|v| v.is_missing()));
    }

    #[test]
    fn test_sma_period_one_matches_input() {
        let series = make_series(&[1.5, 2.5, 3.0]);
        let result = SMA::new(1).compute(&series);

        assert_eq!(result.values(), series.values());
    }

    #[test]
    fn test_sma_period_zero_returns_missing() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let result = SMA::new(0).compute(&series);

        assert!(result.values().iter().all(|v| v.is_missing()));
        assert!(result.is_aligned_with(&series));
    }

    #[test]
    fn test_sma_warmup() {
        assert_eq!(SMA::new(20).warmup_periods(), 19);
        assert_eq!(SMA::new(20).required_len(), 20);
    }
}
