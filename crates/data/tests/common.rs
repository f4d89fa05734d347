use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use tadash_types::Bar;

pub const DAY_NS: i64 = 86_400_000_000_000;
/// 2024-01-01 00:00:00 UTC
pub const JAN_1_2024_NS: i64 = 1_704_067_200_000_000_000;

pub fn write_bar_parquet(path: &Path, bars: &[Bar]) -> Result<(), Box<dyn std::error::Error>> {
    write_bar_parquet_with_timezone(path, bars, Some("UTC"))
}

pub fn write_bar_parquet_with_timezone(
    path: &Path,
    bars: &[Bar],
    timezone: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let timestamps: Vec<i64> = bars.iter().map(|b| b.timestamp_ns).collect();
    let opens: Vec<f64> = bars.iter().map(|b| b.open).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let fields = vec![
        Field::new(
            "UTC time",
            DataType::Timestamp(TimeUnit::Nanosecond, timezone.map(Into::into)),
            false,
        ),
        Field::new("Open", DataType::Float64, false),
        Field::new("High", DataType::Float64, false),
        Field::new("Low", DataType::Float64, false),
        Field::new("Close", DataType::Float64, false),
        Field::new("Volume", DataType::Float64, false),
    ];

    let ts_array = TimestampNanosecondArray::from(timestamps);
    let ts_array = match timezone {
        Some(tz) => ts_array.with_timezone(tz),
        None => ts_array,
    };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(ts_array),
        Arc::new(Float64Array::from(opens)),
        Arc::new(Float64Array::from(highs)),
        Arc::new(Float64Array::from(lows)),
        Arc::new(Float64Array::from(closes)),
        Arc::new(Float64Array::from(volumes)),
    ];

    write_custom_parquet(path, fields, columns)
}

pub fn write_custom_parquet(
    path: &Path,
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close().map(|_| ()).map_err(|e| e.into())
}

/// Daily bars from 2024-01-01 with the given closes.
pub fn daily_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp_ns: JAN_1_2024_NS + i as i64 * DAY_NS,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000.0 + i as f64,
        })
        .collect()
}

pub fn string_column(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec())) as ArrayRef
}
