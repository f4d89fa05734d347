/// A single observation of a series.
///
/// Non-finite floats are never stored as `Present`; they collapse to `Missing`
/// at construction so downstream arithmetic only ever sees finite numbers.
/// Serializes as `Option<f64>` (`Missing` becomes `null`).
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Sample {
    /// A finite value.
    Present(f64),
    /// No value (warm-up, gap, or undefined result).
    #[default]
    Missing,
}

impl Sample {
    /// Wraps a float, mapping NaN and infinities to `Missing`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Sample::Present(value)
        } else {
            Sample::Missing
        }
    }

    /// Returns the value if present.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Sample::Present(v) => Some(v),
            Sample::Missing => None,
        }
    }

    /// True when the sample holds a value.
    #[must_use]
    pub fn is_present(self) -> bool {
        matches!(self, Sample::Present(_))
    }

    /// True when the sample holds no value.
    #[must_use]
    pub fn is_missing(self) -> bool {
        matches!(self, Sample::Missing)
    }

    /// Applies `f` to a present value. The result is re-checked for finiteness.
    #[must_use]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Sample::Present(v) => Sample::from_f64(f(v)),
            Sample::Missing => Sample::Missing,
        }
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Sample::from_f64(value)
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Sample::Missing, Sample::from_f64)
    }
}

impl From<Sample> for Option<f64> {
    fn from(sample: Sample) -> Self {
        sample.value()
    }
}
