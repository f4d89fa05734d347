//! Chart payload handed to the renderer.
//!
//! Describes what to draw (series, panels, reference levels), never how it
//! looks. Every series in the payload is positionally aligned with `keys`.

use serde::{Deserialize, Serialize};
use tadash_indicators::{IndicatorResult, IndicatorSet};
use tadash_types::{Bar, IndicatorKind, IndicatorRequest, Interval};

/// RSI reference levels (oversold, overbought).
pub const RSI_LEVELS: [f64; 2] = [30.0, 70.0];

/// Fixed value range of the RSI panel.
pub const RSI_RANGE: [f64; 2] = [0.0, 100.0];

/// Complete result of one dashboard run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    /// Chart title
    pub title: String,
    /// Ticker symbol
    pub ticker: String,
    /// Bar interval
    pub interval: Interval,
    /// Inclusive range start (epoch ns)
    pub start_ns: i64,
    /// Inclusive range end (epoch ns)
    pub end_ns: i64,
    /// Shared x axis (bar open times, epoch ns)
    pub keys: Vec<i64>,
    /// OHLCV bars, one per key
    pub bars: Vec<Bar>,
    /// One entry per indicator request, in request order
    pub indicators: Vec<IndicatorEntry>,
    /// Panel layout, top to bottom
    pub panels: Vec<Panel>,
}

/// Outcome of one indicator request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorEntry {
    /// Result name
    pub name: String,
    /// Indicator kind
    pub kind: IndicatorKind,
    /// Window length
    pub period: usize,
    /// Computed series, absent on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<IndicatorResult>,
    /// Error message, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Which panel a trace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    /// Candlesticks with moving-average and band overlays
    Price,
    /// Oscillator panel
    Rsi,
}

/// One subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Panel identity
    pub kind: PanelKind,
    /// Subplot title
    pub title: String,
    /// Share of the total chart height
    pub height_ratio: f64,
    /// Fixed y range, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_range: Option<[f64; 2]>,
    /// Horizontal reference lines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<f64>,
    /// Traces drawn in this panel, in draw order
    pub traces: Vec<Trace>,
}

/// Reference from a panel to the data it draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Trace {
    /// The OHLC bars as candlesticks
    Candles {
        /// Legend label
        label: String,
    },
    /// One output series of an indicator entry
    Indicator {
        /// Legend label
        label: String,
        /// [`IndicatorEntry::name`]
        name: String,
        /// Band name (`upper`, `middle`, `lower`) for multi-output indicators
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },
}

/// Inputs of [`build_payload`] that describe the run rather than its data.
#[derive(Debug, Clone)]
pub struct RunInfo<'a> {
    /// Ticker symbol
    pub ticker: &'a str,
    /// Bar interval
    pub interval: Interval,
    /// Inclusive range start (epoch ns)
    pub start_ns: i64,
    /// Inclusive range end (epoch ns)
    pub end_ns: i64,
}

/// Assembles the payload from the loaded bars and the engine output.
///
/// `requests` and `set` must come from the same engine call; entries are
/// matched positionally. For an empty input the set comes from
/// [`IndicatorEngine::resolve_empty`](tadash_indicators::IndicatorEngine::resolve_empty),
/// so parameter errors still show up and successes carry empty series.
#[must_use]
pub fn build_payload(
    info: &RunInfo<'_>,
    bars: Vec<Bar>,
    requests: &[IndicatorRequest],
    set: IndicatorSet,
) -> ChartPayload {
    let keys: Vec<i64> = bars.iter().map(|b| b.timestamp_ns).collect();

    let indicators: Vec<IndicatorEntry> = requests
        .iter()
        .zip(set)
        .map(|(request, (_, outcome))| {
            let (result, error) = match outcome {
                Ok(result) => (Some(result), None),
                Err(err) => (None, Some(err.to_string())),
            };
            IndicatorEntry {
                name: request.name().to_string(),
                kind: request.kind,
                period: request.period,
                result,
                error,
            }
        })
        .collect();

    let panels = layout(info.ticker, &indicators);

    ChartPayload {
        title: format!("{} Technical Analysis", info.ticker),
        ticker: info.ticker.to_string(),
        interval: info.interval,
        start_ns: info.start_ns,
        end_ns: info.end_ns,
        keys,
        bars,
        indicators,
        panels,
    }
}

/// Price panel always; RSI panel only when some RSI entry succeeded.
/// Failed entries get no trace.
fn layout(ticker: &str, indicators: &[IndicatorEntry]) -> Vec<Panel> {
    let mut price_traces = vec![Trace::Candles {
        label: "Price".to_string(),
    }];
    let mut rsi_traces = Vec::new();

    for entry in indicators.iter().filter(|e| e.result.is_some()) {
        match entry.kind {
            IndicatorKind::Sma | IndicatorKind::Ema => price_traces.push(Trace::Indicator {
                label: entry.name.clone(),
                name: entry.name.clone(),
                output: None,
            }),
            IndicatorKind::Bbands => {
                for output in ["upper", "middle", "lower"] {
                    price_traces.push(Trace::Indicator {
                        label: format!("{} {output}", entry.name),
                        name: entry.name.clone(),
                        output: Some(output.to_string()),
                    });
                }
            }
            IndicatorKind::Rsi => rsi_traces.push(Trace::Indicator {
                label: entry.name.clone(),
                name: entry.name.clone(),
                output: None,
            }),
        }
    }

    let mut panels = vec![Panel {
        kind: PanelKind::Price,
        title: format!("{ticker} Price and Indicators"),
        height_ratio: 0.7,
        y_range: None,
        levels: Vec::new(),
        traces: price_traces,
    }];

    if rsi_traces.is_empty() {
        if let Some(price) = panels.first_mut() {
            price.height_ratio = 1.0;
        }
    } else {
        panels.push(Panel {
            kind: PanelKind::Rsi,
            title: "RSI".to_string(),
            height_ratio: 0.3,
            y_range: Some(RSI_RANGE),
            levels: RSI_LEVELS.to_vec(),
            traces: rsi_traces,
        });
    }

    panels
}
