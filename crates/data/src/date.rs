//! ISO-like date parsing to epoch nanoseconds (UTC).

use crate::error::DataError;
use std::time::{SystemTime, UNIX_EPOCH};

const NANOS_PER_DAY: i64 = 86_400_000_000_000;

/// Boundary used when a date has no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBoundary {
    /// Start of the day (00:00:00).
    Start,
    /// End of the day (23:59:59.999999999).
    End,
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` or the same with a
/// space separator, optionally suffixed by `Z` or a `+HH:MM` / `-HH:MM`
/// offset, into epoch nanoseconds.
///
/// # Errors
/// [`DataError::InvalidDate`] on malformed input, out-of-range fields or
/// overflow of the `i64` nanosecond range.
pub fn parse_date_ns(value: &str, boundary: DateBoundary) -> Result<i64, DataError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid("empty date"));
    }

    let (date_part, time_part) = match value.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };

    let (year, month, day) = parse_ymd(date_part)?;
    let (hour, minute, second, nanos, offset) = match time_part {
        Some(time) => parse_time(time)?,
        None => match boundary {
            DateBoundary::Start => (0, 0, 0, 0, 0),
            DateBoundary::End => (23, 59, 59, 999_999_999, 0),
        },
    };

    let total_seconds = days_from_civil(year, month, day)
        .checked_mul(86_400)
        .and_then(|v| v.checked_add(i64::from(hour) * 3_600))
        .and_then(|v| v.checked_add(i64::from(minute) * 60))
        .and_then(|v| v.checked_add(i64::from(second)))
        .and_then(|v| v.checked_sub(i64::from(offset)))
        .ok_or_else(|| invalid(format!("datetime overflow: {value}")))?;

    let total_ns = i128::from(total_seconds) * 1_000_000_000 + i128::from(nanos);
    i64::try_from(total_ns).map_err(|_| invalid(format!("datetime overflow: {value}")))
}

/// Epoch nanoseconds of the last instant of the current UTC day.
#[must_use]
pub fn end_of_today_ns() -> i64 {
    let now_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or(0);
    now_ns.div_euclid(NANOS_PER_DAY) * NANOS_PER_DAY + NANOS_PER_DAY - 1
}

fn invalid(msg: impl Into<String>) -> DataError {
    DataError::InvalidDate(msg.into())
}

fn parse_ymd(date: &str) -> Result<(i32, u32, u32), DataError> {
    let mut parts = date.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid(format!("invalid date format: {date}")));
    };

    let year: i32 = y
        .parse()
        .map_err(|_| invalid(format!("invalid year: {date}")))?;
    let month: u32 = m
        .parse()
        .map_err(|_| invalid(format!("invalid month: {date}")))?;
    let day: u32 = d
        .parse()
        .map_err(|_| invalid(format!("invalid day: {date}")))?;

    if !(1..=12).contains(&month) {
        return Err(invalid(format!("invalid month: {date}")));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(invalid(format!("invalid day: {date}")));
    }

    Ok((year, month, day))
}

fn parse_time(time: &str) -> Result<(u32, u32, u32, u32, i32), DataError> {
    let mut clock = time.trim();
    let mut offset_secs = 0;

    if let Some(stripped) = clock.strip_suffix('Z') {
        clock = stripped;
    } else if let Some(idx) = clock.rfind(['+', '-'])
        && idx > 0
    {
        let (t, offset) = clock.split_at(idx);
        clock = t;
        offset_secs = parse_offset(offset)?;
    }

    let parts: Vec<&str> = clock.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid(format!("invalid time format: {time}")));
    }

    let hour: u32 = parts[0]
        .parse()
        .map_err(|_| invalid(format!("invalid hour: {time}")))?;
    let minute: u32 = parts[1]
        .parse()
        .map_err(|_| invalid(format!("invalid minute: {time}")))?;
    let (second, nanos) = match parts.get(2) {
        Some(s) => parse_seconds(s)?,
        None => (0, 0),
    };

    if hour > 23 || minute > 59 || second > 59 {
        return Err(invalid(format!("invalid time value: {time}")));
    }

    Ok((hour, minute, second, nanos, offset_secs))
}

fn parse_offset(offset: &str) -> Result<i32, DataError> {
    let (sign, rest) = match offset.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return Err(invalid(format!("invalid offset: {offset}"))),
    };

    let Some((h, m)) = rest.split_once(':') else {
        return Err(invalid(format!("invalid offset: {offset}")));
    };
    let hours: i32 = h
        .parse()
        .map_err(|_| invalid(format!("invalid offset: {offset}")))?;
    let minutes: i32 = m
        .parse()
        .map_err(|_| invalid(format!("invalid offset: {offset}")))?;

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid(format!("invalid offset: {offset}")));
    }

    Ok(sign * (hours * 3_600 + minutes * 60))
}

fn parse_seconds(input: &str) -> Result<(u32, u32), DataError> {
    let (whole, frac) = input.split_once('.').unwrap_or((input, ""));
    let seconds: u32 = whole
        .parse()
        .map_err(|_| invalid(format!("invalid seconds: {input}")))?;

    if frac.is_empty() {
        return Ok((seconds, 0));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("invalid fraction: {input}")));
    }
    // Pad or truncate to nanosecond precision.
    let digits: String = frac.chars().chain(std::iter::repeat('0')).take(9).collect();
    let nanos = digits
        .parse()
        .map_err(|_| invalid(format!("invalid fraction: {input}")))?;

    Ok((seconds, nanos))
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let d = i64::from(day);
    let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
