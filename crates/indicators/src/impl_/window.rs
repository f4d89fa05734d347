//! Sliding-window sum with compensated accumulation and periodic resynchronization.

use tadash_types::Sample;

/// Neumaier-compensated accumulator.
///
/// `comp` collects the low-order bits lost by each addition, so a large value
/// that enters and later leaves the window cancels exactly instead of leaving
/// its rounding error behind in the sum.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CompensatedSum {
    sum: f64,
    comp: f64,
}

impl CompensatedSum {
    pub(crate) fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.comp += (self.sum - t) + x;
        } else {
            self.comp += (x - t) + self.sum;
        }
        self.sum = t;
    }

    pub(crate) fn value(&self) -> f64 {
        self.sum + self.comp
    }
}

/// Trailing-window sums over a sample slice, one item per input position.
///
/// Yields `Some(sum)` when the window `[i + 1 - period, i]` is complete and
/// holds no `Missing` sample, `None` otherwise. The running sum is updated in
/// O(1) per step with compensated arithmetic and rebuilt from scratch every
/// `period` steps and after any gap.
pub(crate) struct RollingSum<'a> {
    input: &'a [Sample],
    period: usize,
    idx: usize,
    sum: Option<CompensatedSum>,
    since_resync: usize,
    last_missing: Option<usize>,
}

impl<'a> RollingSum<'a> {
    pub(crate) fn new(input: &'a [Sample], period: usize) -> Self {
        Self {
            input,
            period,
            idx: 0,
            sum: None,
            since_resync: 0,
            last_missing: None,
        }
    }

    fn step(&mut self, i: usize) -> Option<f64> {
        if self.input[i].is_missing() {
            self.last_missing = Some(i);
            self.sum = None;
            return None;
        }
        if self.period == 0 || i + 1 < self.period {
            return None;
        }

        let start = i + 1 - self.period;
        if self.last_missing.is_some_and(|m| m >= start) {
            self.sum = None;
            return None;
        }

        let incremental = match self.sum {
            Some(mut acc) if start > 0 && self.since_resync + 1 < self.period => {
                match (self.input[i], self.input[start - 1]) {
                    (Sample::Present(entering), Sample::Present(leaving)) => {
                        acc.add(entering);
                        acc.add(-leaving);
                        Some(acc)
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        let acc = match incremental {
            Some(acc) => {
                self.since_resync += 1;
                acc
            }
            None => {
                self.since_resync = 0;
                accumulate(&self.input[start..=i])
            }
        };

        self.sum = Some(acc);
        Some(acc.value())
    }
}

impl Iterator for RollingSum<'_> {
    type Item = Option<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.input.len() {
            return None;
        }
        let i = self.idx;
        self.idx += 1;
        Some(self.step(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.input.len() - self.idx;
        (remaining, Some(remaining))
    }
}

fn accumulate(window: &[Sample]) -> CompensatedSum {
    let mut acc = CompensatedSum::default();
    for v in window.iter().filter_map(|s| s.value()) {
        acc.add(v);
    }
    acc
}

/// Compensated summation of the present values in `window`.
pub(crate) fn window_sum(window: &[Sample]) -> f64 {
    accumulate(window).value()
}

/// Population standard deviation of a gap-free window.
///
/// Deviations are taken relative to the first element before the two-pass
/// variance, so a constant window yields exactly `0.0`.
pub(crate) fn population_std(window: &[Sample]) -> Option<f64> {
    let first = window.first()?.value()?;
    let mut shifted = Vec::with_capacity(window.len());
    for sample in window {
        match sample {
            Sample::Present(v) => shifted.push(v - first),
            Sample::Missing => return None,
        }
    }

    let n = shifted.len() as f64;
    let mean = shifted.iter().sum::<f64>() / n;
    let variance = shifted.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    Some(variance.max(0.0).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(values: &[f64]) -> Vec<Sample> {
        values.iter().copied().map(Sample::from_f64).collect()
    }

    #[test]
    fn test_rolling_sum_basic() {
        let input = samples(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sums: Vec<_> = RollingSum::new(&input, 3).collect();
        assert_eq!(sums, vec![None, None, Some(6.0), Some(9.0), Some(12.0)]);
    }

    #[test]
    fn test_rolling_sum_skips_windows_with_gaps() {
        let input = samples(&[1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0]);
        let sums: Vec<_> = RollingSum::new(&input, 2).collect();
        assert_eq!(
            sums,
            vec![None, Some(3.0), None, None, Some(9.0), Some(11.0), Some(13.0)]
        );
    }

    #[test]
    fn test_rolling_sum_period_zero_yields_nothing() {
        let input = samples(&[1.0, 2.0]);
        assert!(RollingSum::new(&input, 0).all(|s| s.is_none()));
    }

    #[test]
    fn test_rolling_sum_tracks_fresh_sum_over_long_series() {
        // Values with large magnitude swings stress cancellation in the running sum.
        let values: Vec<f64> = (0..100_000)
            .map(|i| {
                let x = f64::from(i);
                1.0e6 * (x * 0.37).sin() + 1.0e-3 * (x * 1.3).cos() + 5.0e6
            })
            .collect();
        let input = samples(&values);
        let period = 50;

        for (i, sum) in RollingSum::new(&input, period).enumerate().skip(period - 1) {
            let expected = window_sum(&input[i + 1 - period..=i]);
            assert_relative_eq!(sum.unwrap(), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_rolling_sum_recovers_after_spike_leaves_window() {
        let period = 20;
        let mut worst = 0.0_f64;

        for offset in 30..90 {
            let values: Vec<f64> = (0..120)
                .map(|i| {
                    if i == offset {
                        1.0e9
                    } else {
                        1.0 + 0.1 * (f64::from(i) * 0.7).sin()
                    }
                })
                .collect();
            let input = samples(&values);

            for (i, sum) in RollingSum::new(&input, period).enumerate().skip(period - 1) {
                let expected = window_sum(&input[i + 1 - period..=i]);
                let err = ((sum.unwrap() - expected) / expected).abs();
                worst = worst.max(err);
            }
        }

        assert!(worst <= 1e-9, "worst relative error {worst:e}");
    }

    #[test]
    fn test_window_sum_keeps_small_terms_next_to_large_one() {
        let window = samples(&[1.0e9, 0.1, 0.2, -1.0e9]);
        assert_relative_eq!(window_sum(&window), 0.3, max_relative = 1e-12);
    }

    #[test]
    fn test_population_std_constant_window_is_exact_zero() {
        let window = samples(&[0.1, 0.1, 0.1, 0.1]);
        assert_eq!(population_std(&window), Some(0.0));
    }

    #[test]
    fn test_population_std_known_value() {
        let window = samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(population_std(&window).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_population_std_rejects_gaps() {
        let window = vec![Sample::Present(1.0), Sample::Missing];
        assert_eq!(population_std(&window), None);
    }
}
