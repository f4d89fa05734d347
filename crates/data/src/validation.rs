//! Bar validation.

use crate::error::DataError;
use tadash_types::Bar;

/// Validates a bar sequence.
///
/// Prices may be non-finite (a missing quote); they become `Missing`
/// samples in the close series. Everything that can be checked is:
///
/// # Errors
/// [`DataError::CorruptData`] on
/// - non-increasing timestamps,
/// - negative or infinite volume,
/// - finite OHLC values with `low > high` or `open`/`close` outside `[low, high]`.
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataError> {
    for (i, bar) in bars.iter().enumerate() {
        if i > 0 && bar.timestamp_ns <= bars[i - 1].timestamp_ns {
            return Err(DataError::CorruptData(format!(
                "Non-monotonic timestamp at index {i}: {} <= {}",
                bar.timestamp_ns,
                bars[i - 1].timestamp_ns
            )));
        }

        if bar.volume < 0.0 || bar.volume.is_infinite() {
            return Err(DataError::CorruptData(format!(
                "Invalid volume at index {i}: {}",
                bar.volume
            )));
        }

        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().all(|p| p.is_finite())
            && (bar.low > bar.open
                || bar.low > bar.close
                || bar.high < bar.open
                || bar.high < bar.close)
        {
            return Err(DataError::CorruptData(format!(
                "Invalid OHLC at index {i}: low={}, high={}, open={}, close={}",
                bar.low, bar.high, bar.open, bar.close
            )));
        }
    }

    Ok(())
}
