//! Exponential Moving Average (EMA) indicator

use crate::impl_::window::window_sum;
use crate::traits::Indicator;
use tadash_types::{Sample, Series};

/// Exponential Moving Average
///
/// Multiplier = 2 / (period + 1). The first defined value, at index
/// `period - 1`, is the SMA of the first `period` samples; after that
/// `ema[i] = alpha * x[i] + (1 - alpha) * ema[i - 1]`.
///
/// A `Missing` sample breaks the recurrence: the output is `Missing` there
/// and the average is re-seeded from the next gap-free window of `period`
/// samples.
#[derive(Debug, Clone)]
pub struct EMA {
    /// Number of periods for the EMA
    pub period: usize,
}

impl EMA {
    /// Creates a new EMA indicator with the given period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculates the EMA multiplier (smoothing factor).
    fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    fn fill(&self, input: &[Sample], out: &mut [Sample]) {
        if self.period == 0 {
            return;
        }

        let alpha = self.multiplier();
        let mut prev: Option<f64> = None;
        // First index of the current gap-free run.
        let mut run_start = 0;

        for (i, sample) in input.iter().enumerate() {
            let value = match sample {
                Sample::Present(v) => *v,
                Sample::Missing => {
                    prev = None;
                    run_start = i + 1;
                    continue;
                }
            };

            let next = match prev {
                Some(p) => alpha * value + (1.0 - alpha) * p,
                None if i + 1 - run_start >= self.period => {
                    window_sum(&input[i + 1 - self.period..=i]) / self.period as f64
                }
                None => continue,
            };

            out[i] = Sample::from_f64(next);
            prev = out[i].value();
        }
    }
}

impl Indicator for EMA {
    fn compute(&self, series: &Series) -> Series {
        series.derive(|input, out| self.fill(input, out))
    }

    fn name(&self) -> &str {
        "EMA"
    }

    fn warmup_periods(&self) -> usize {
        self.period.saturating_sub(1)
    }
}
