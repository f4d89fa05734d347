//! Relative Strength Index (RSI) indicator
//!
//! ```text
//! delta[i]  = x[i] - x[i-1]
//! gain      = max(delta, 0),  loss = max(-delta, 0)
//! avg[seed] = mean of the first `period` gains / losses
//! avg[i]    = (avg[i-1] * (period - 1) + current[i]) / period   (Wilder)
//! RSI       = 100 - 100 / (1 + avg_gain / avg_loss)
//! ```
//!
//! An average loss of zero maps to 100.

use crate::traits::Indicator;
use tadash_types::{Sample, Series};

/// Relative Strength Index with Wilder smoothing.
///
/// The first `period` positions are `Missing`: index 0 has no delta, and
/// `period` deltas are needed to seed the averages. A `Missing` sample makes
/// the deltas on both sides of it `Missing`; the averages are re-seeded from
/// the next `period` gap-free deltas.
#[derive(Debug, Clone)]
pub struct RSI {
    /// Smoothing period (typically 14)
    pub period: usize,
}

impl RSI {
    /// Creates a new RSI indicator with the given period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn fill(&self, input: &[Sample], out: &mut [Sample]) {
        if self.period == 0 {
            return;
        }

        let period = self.period as f64;
        let mut averages: Option<(f64, f64)> = None;
        // First index of the current run of defined deltas.
        let mut run_start = 1;

        for i in 1..input.len() {
            let (gain, loss) = match (input[i - 1], input[i]) {
                (Sample::Present(prev), Sample::Present(curr)) => split_delta(curr - prev),
                _ => {
                    averages = None;
                    run_start = i + 1;
                    continue;
                }
            };

            let next = match averages {
                Some((avg_gain, avg_loss)) => (
                    (avg_gain * (period - 1.0) + gain) / period,
                    (avg_loss * (period - 1.0) + loss) / period,
                ),
                None if i + 1 - run_start >= self.period => seed_averages(input, i, self.period),
                None => continue,
            };

            averages = Some(next);
            out[i] = Sample::from_f64(rsi_from_averages(next.0, next.1));
        }
    }
}

/// Splits a price change into `(gain, loss)`, both non-negative.
fn split_delta(delta: f64) -> (f64, f64) {
    if delta > 0.0 {
        (delta, 0.0)
    } else {
        (0.0, -delta)
    }
}

/// Simple mean of the gains and losses of the `period` deltas ending at `end`.
fn seed_averages(input: &[Sample], end: usize, period: usize) -> (f64, f64) {
    let (mut sum_gain, mut sum_loss) = (0.0, 0.0);
    for j in (end + 1 - period)..=end {
        if let (Sample::Present(prev), Sample::Present(curr)) = (input[j - 1], input[j]) {
            let (gain, loss) = split_delta(curr - prev);
            sum_gain += gain;
            sum_loss += loss;
        }
    }
    (sum_gain / period as f64, sum_loss / period as f64)
}

/// Converts average gain / loss into an RSI value in [0, 100].
#[inline]
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

impl Indicator for RSI {
    fn compute(&self, series: &Series) -> Series {
        series.derive(|input, out| self.fill(input, out))
    }

    fn name(&self) -> &str {
        "RSI"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
