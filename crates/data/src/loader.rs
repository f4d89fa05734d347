use std::path::{Path, PathBuf};

use arrow::array::{Array, Float64Array, Int64Array, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::{debug, warn};

use crate::error::DataError;
use crate::validation::validate_bars;
use tadash_types::{Bar, Interval, Series};

/// Environment variable overriding the Parquet root directory.
pub const DATA_ROOT_ENV: &str = "TADASH_DATA_ROOT";

/// Root used when neither the config nor the environment name one.
pub const DEFAULT_DATA_ROOT: &str = "data/parquet";

const TIME_COLUMN: &str = "UTC time";

/// Resolve a Parquet bar path: `<root>/<SYMBOL>/<SYMBOL>_<interval>.parquet`.
///
/// `root` wins over [`DATA_ROOT_ENV`], which wins over [`DEFAULT_DATA_ROOT`].
pub fn resolve_data_path(symbol: &str, interval: Interval, root: Option<&str>) -> PathBuf {
    let root = root.map_or_else(
        || std::env::var(DATA_ROOT_ENV).unwrap_or_else(|_| DEFAULT_DATA_ROOT.to_string()),
        str::to_string,
    );

    PathBuf::from(root)
        .join(symbol)
        .join(format!("{symbol}_{}.parquet", interval.as_str()))
}

/// Loads bars from a Parquet file with schema:
/// `UTC time` (timestamp ns, UTC), `Open`, `High`, `Low`, `Close`, `Volume`.
///
/// Duplicates with identical OHLCV are deduplicated (keep-first); divergent
/// duplicates and out-of-order rows error. A file without rows yields an
/// empty vector.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DataError::FileNotFound(path.display().to_string(), e.to_string()))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::ParseError(e.to_string()))?;
    check_time_column(builder.schema())?;
    let reader = builder
        .build()
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut bars: Vec<Bar> = Vec::new();
    let mut processed_rows = 0usize;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let ts_arr = batch
            .column_by_name(TIME_COLUMN)
            .ok_or_else(|| DataError::MissingColumn(TIME_COLUMN.to_string()))?
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .ok_or_else(|| DataError::InvalidColumnType(TIME_COLUMN.to_string()))?;

        let open_arr = f64_column(&batch, "Open")?;
        let high_arr = f64_column(&batch, "High")?;
        let low_arr = f64_column(&batch, "Low")?;
        let close_arr = f64_column(&batch, "Close")?;
        let volume_arr = numeric_column(&batch, "Volume")?;

        for row_idx in 0..batch.num_rows() {
            let row = processed_rows + row_idx;
            if ts_arr.is_null(row_idx) {
                return Err(DataError::CorruptData(format!("Null timestamp at row {row}")));
            }
            let ts = ts_arr.value(row_idx);
            let last = bars.last().copied();
            if let Some(prev) = last.map(|b| b.timestamp_ns)
                && ts < prev
            {
                return Err(DataError::CorruptData(format!(
                    "Out-of-order timestamp at row {row}: {ts} < {prev}"
                )));
            }

            // Null prices load as NaN and become Missing samples downstream.
            let bar = Bar {
                timestamp_ns: ts,
                open: nullable(open_arr, row_idx),
                high: nullable(high_arr, row_idx),
                low: nullable(low_arr, row_idx),
                close: nullable(close_arr, row_idx),
                volume: volume_arr.value(row_idx),
            };

            // Rows are ordered, so a duplicate can only repeat the last kept bar.
            match last {
                Some(existing) if existing.timestamp_ns == ts => {
                    if !same_bar(&existing, &bar) {
                        return Err(DataError::CorruptData(format!(
                            "Divergent duplicate timestamp {ts} at row {row}"
                        )));
                    }
                }
                _ => bars.push(bar),
            }
        }

        processed_rows += batch.num_rows();
    }

    debug!(
        path = %path.display(),
        rows = processed_rows,
        bars = bars.len(),
        "Loaded bars"
    );
    Ok(bars)
}

/// Keeps the bars whose open time lies in `[start_ns, end_ns]`.
///
/// # Errors
/// [`DataError::InvalidDateRange`] when `start_ns > end_ns`.
pub fn filter_by_date_range(bars: &[Bar], start_ns: i64, end_ns: i64) -> Result<Vec<Bar>, DataError> {
    if start_ns > end_ns {
        return Err(DataError::InvalidDateRange { start_ns, end_ns });
    }

    let first = bars.partition_point(|b| b.timestamp_ns < start_ns);
    let last = bars.partition_point(|b| b.timestamp_ns <= end_ns);
    let kept = bars.get(first..last).unwrap_or_default().to_vec();

    if kept.is_empty() && !bars.is_empty() {
        warn!(start_ns, end_ns, available = bars.len(), "No bars in requested date range");
    } else {
        debug!(kept = kept.len(), dropped = bars.len() - kept.len(), "Filtered bars by date range");
    }
    Ok(kept)
}

/// Loads, validates and range-filters the bars of one file.
pub fn load_range(path: &Path, start_ns: i64, end_ns: i64) -> Result<Vec<Bar>, DataError> {
    let bars = load_bars(path)?;
    validate_bars(&bars)?;
    filter_by_date_range(&bars, start_ns, end_ns)
}

/// Close-price series of the bars in `[start_ns, end_ns]`.
///
/// An empty range is not an error: it yields an empty series.
pub fn load_close_series(path: &Path, start_ns: i64, end_ns: i64) -> Result<Series, DataError> {
    let bars = load_range(path, start_ns, end_ns)?;
    Ok(Series::from_closes(&bars)?)
}

fn check_time_column(schema: &Schema) -> Result<(), DataError> {
    let field = schema
        .field_with_name(TIME_COLUMN)
        .map_err(|_| DataError::MissingColumn(TIME_COLUMN.to_string()))?;

    match field.data_type() {
        DataType::Timestamp(TimeUnit::Nanosecond, Some(tz))
            if matches!(&**tz, "UTC" | "+00:00" | "Etc/UTC") =>
        {
            Ok(())
        }
        DataType::Timestamp(TimeUnit::Nanosecond, tz) => Err(DataError::InvalidTimezone {
            column: TIME_COLUMN.to_string(),
            timezone: tz.as_deref().unwrap_or("<none>").to_string(),
        }),
        _ => Err(DataError::InvalidColumnType(TIME_COLUMN.to_string())),
    }
}

fn nullable(arr: &Float64Array, idx: usize) -> f64 {
    if arr.is_null(idx) { f64::NAN } else { arr.value(idx) }
}

fn same_bar(a: &Bar, b: &Bar) -> bool {
    let eq = |x: f64, y: f64| x == y || (x.is_nan() && y.is_nan());
    eq(a.open, b.open)
        && eq(a.high, b.high)
        && eq(a.low, b.low)
        && eq(a.close, b.close)
        && eq(a.volume, b.volume)
}

enum NumericAccessor<'a> {
    F64(&'a Float64Array),
    I64(&'a Int64Array),
}

impl NumericAccessor<'_> {
    fn value(&self, idx: usize) -> f64 {
        match self {
            NumericAccessor::F64(arr) => nullable(arr, idx),
            NumericAccessor::I64(arr) if arr.is_null(idx) => f64::NAN,
            NumericAccessor::I64(arr) => arr.value(idx) as f64,
        }
    }
}

fn f64_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array, DataError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataError::InvalidColumnType(name.to_string()))
}

fn numeric_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<NumericAccessor<'a>, DataError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;

    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(NumericAccessor::F64(arr))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(NumericAccessor::I64(arr))
    } else {
        Err(DataError::InvalidColumnType(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar {
            timestamp_ns: ts,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let bars: Vec<Bar> = (0..10).map(|i| bar(i * 10, i as f64)).collect();
        let kept = filter_by_date_range(&bars, 20, 50).unwrap();

        let keys: Vec<i64> = kept.iter().map(|b| b.timestamp_ns).collect();
        assert_eq!(keys, vec![20, 30, 40, 50]);
    }

    #[test]
    fn test_filter_empty_range_is_not_an_error() {
        let bars: Vec<Bar> = (0..5).map(|i| bar(i * 10, 1.0)).collect();
        assert!(filter_by_date_range(&bars, 100, 200).unwrap().is_empty());
        assert!(filter_by_date_range(&[], 0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_filter_rejects_inverted_range() {
        let err = filter_by_date_range(&[], 10, 0).unwrap_err();
        assert!(matches!(err, DataError::InvalidDateRange { start_ns: 10, end_ns: 0 }));
    }

    #[test]
    fn test_same_bar_treats_nan_as_equal() {
        let a = bar(0, f64::NAN);
        assert!(same_bar(&a, &a));
        assert!(!same_bar(&a, &bar(0, 1.0)));
    }
}
