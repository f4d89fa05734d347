//! Indicator requests: which indicator to compute, and with what parameters.

use serde::{Deserialize, Serialize};

/// Indicators supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    /// Simple moving average.
    Sma,
    /// Exponential moving average.
    Ema,
    /// Relative strength index.
    Rsi,
    /// Bollinger Bands.
    Bbands,
}

impl IndicatorKind {
    /// Upper-case registry name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Bbands => "BBANDS",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error parsing indicator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIndicatorKindError;

impl std::fmt::Display for ParseIndicatorKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid indicator kind")
    }
}

impl std::error::Error for ParseIndicatorKindError {}

impl std::str::FromStr for IndicatorKind {
    type Err = ParseIndicatorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMA" => Ok(IndicatorKind::Sma),
            "EMA" => Ok(IndicatorKind::Ema),
            "RSI" => Ok(IndicatorKind::Rsi),
            "BBANDS" => Ok(IndicatorKind::Bbands),
            _ => Err(ParseIndicatorKindError),
        }
    }
}

/// How out-of-range periods are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodPolicy {
    /// `period == 0` or `period > len` yields an all-`Missing` series.
    #[default]
    Lenient,
    /// `period == 0` or `period > len` fails the request.
    Strict,
}

fn default_std_dev() -> f64 {
    2.0
}

/// A single indicator request.
///
/// `name` is the key of the result in the engine output; it defaults to the
/// kind's upper-case name. The std-dev multipliers only apply to `BBANDS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    /// Indicator to compute.
    pub kind: IndicatorKind,
    /// Result key override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Window length.
    pub period: usize,
    /// Upper band multiplier (BBANDS).
    #[serde(default = "default_std_dev")]
    pub num_std_dev_up: f64,
    /// Lower band multiplier (BBANDS).
    #[serde(default = "default_std_dev")]
    pub num_std_dev_down: f64,
}

impl IndicatorRequest {
    fn with_kind(kind: IndicatorKind, period: usize) -> Self {
        Self {
            kind,
            name: None,
            period,
            num_std_dev_up: default_std_dev(),
            num_std_dev_down: default_std_dev(),
        }
    }

    /// `SMA(period)`.
    #[must_use]
    pub fn sma(period: usize) -> Self {
        Self::with_kind(IndicatorKind::Sma, period)
    }

    /// `EMA(period)`.
    #[must_use]
    pub fn ema(period: usize) -> Self {
        Self::with_kind(IndicatorKind::Ema, period)
    }

    /// `RSI(period)`.
    #[must_use]
    pub fn rsi(period: usize) -> Self {
        Self::with_kind(IndicatorKind::Rsi, period)
    }

    /// `BBANDS(period, up, down)`.
    #[must_use]
    pub fn bbands(period: usize, num_std_dev_up: f64, num_std_dev_down: f64) -> Self {
        Self {
            num_std_dev_up,
            num_std_dev_down,
            ..Self::with_kind(IndicatorKind::Bbands, period)
        }
    }

    /// Overrides the result key.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Result key: the explicit name, or the kind's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.as_str())
    }
}

/// Default dashboard request set: SMA(20), EMA(15), RSI(14), BBANDS(20, 2, 2).
#[must_use]
pub fn default_requests() -> Vec<IndicatorRequest> {
    vec![
        IndicatorRequest::sma(20),
        IndicatorRequest::ema(15),
        IndicatorRequest::rsi(14),
        IndicatorRequest::bbands(20, 2.0, 2.0),
    ]
}
