//! Indicator implementations
//!
//! Contains all concrete indicator implementations and the shared
//! rolling-window helpers they are built on.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;
pub(crate) mod window;
