//! Bollinger Bands indicator

use crate::impl_::sma::rolling_mean;
use crate::impl_::window::population_std;
use crate::traits::{IntoMultiSeries, MultiOutputIndicator};
use serde::{Deserialize, Serialize};
use tadash_types::{Sample, Series};

/// Bollinger Bands result containing upper, middle, and lower bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    /// Upper band = SMA + num_std_dev_up * std
    pub upper: Series,
    /// Middle band = SMA
    pub middle: Series,
    /// Lower band = SMA - num_std_dev_down * std
    pub lower: Series,
}

impl IntoMultiSeries for BandSeries {
    fn into_series(self) -> Vec<Series> {
        vec![self.upper, self.middle, self.lower]
    }
}

/// Bollinger Bands
///
/// Calculates three bands based on standard deviation around a simple moving average:
/// - Upper Band = SMA + (num_std_dev_up * StdDev)
/// - Middle Band = SMA
/// - Lower Band = SMA - (num_std_dev_down * StdDev)
///
/// Uses population standard deviation (n, not n-1), computed per window with
/// a two-pass formula. All three bands are `Missing` wherever the middle band is.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the SMA and standard deviation
    pub period: usize,
    /// Multiplier for the upper band (typically 2.0)
    pub num_std_dev_up: f64,
    /// Multiplier for the lower band (typically 2.0)
    pub num_std_dev_down: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    pub fn new(period: usize, num_std_dev_up: f64, num_std_dev_down: f64) -> Self {
        Self {
            period,
            num_std_dev_up,
            num_std_dev_down,
        }
    }

    /// Symmetric bands with one multiplier for both sides.
    pub fn symmetric(period: usize, num_std_dev: f64) -> Self {
        Self::new(period, num_std_dev, num_std_dev)
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Output = BandSeries;

    fn compute_all(&self, series: &Series) -> Self::Output {
        let [upper, middle, lower] = series.derive_n::<3>(|input, [upper, middle, lower]| {
            rolling_mean(input, self.period, middle);

            for (i, mid) in middle.iter().enumerate() {
                let Sample::Present(mean) = *mid else {
                    continue;
                };
                let Some(std) = population_std(&input[i + 1 - self.period..=i]) else {
                    continue;
                };
                upper[i] = Sample::from_f64(mean + self.num_std_dev_up * std);
                lower[i] = Sample::from_f64(mean - self.num_std_dev_down * std);
            }
        });

        BandSeries {
            upper,
            middle,
            lower,
        }
    }

    fn name(&self) -> &str {
        "BBANDS"
    }

    fn warmup_periods(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn output_names(&self) -> &'static [&'static str] {
        &["upper", "middle", "lower"]
    }
}
