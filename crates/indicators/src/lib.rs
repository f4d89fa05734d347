//! tadash Indicators
//!
//! Technical indicator engine for the tadash dashboard.
//! Derives aligned indicator series from a close-price [`Series`].
//!
//! # Features
//! - Indicator trait over keyed series, with `Missing`-aware warm-up
//! - Multi-output indicators (Bollinger Bands)
//! - Registry for indicator factories
//! - Engine with per-request error isolation and a parallel variant
//!
//! # Available Indicators
//! - SMA: Simple Moving Average
//! - EMA: Exponential Moving Average
//! - RSI: Relative Strength Index (Wilder smoothing)
//! - Bollinger Bands: Upper, Middle, Lower bands
//!
//! [`Series`]: tadash_types::Series

#![deny(clippy::all)]

pub mod engine;
pub mod error;
pub mod impl_;
pub mod registry;
pub mod traits;

// Re-export main types
pub use engine::{IndicatorEngine, IndicatorResult, IndicatorSet, RequestOutcome};
pub use error::IndicatorError;
pub use registry::{IndicatorFactory, IndicatorHandle, IndicatorRegistry};
pub use traits::{Indicator, IntoMultiSeries, MultiOutputIndicator};

// Re-export indicator implementations
pub use impl_::{
    bollinger::{BandSeries, BollingerBands},
    ema::EMA,
    rsi::RSI,
    sma::SMA,
};
