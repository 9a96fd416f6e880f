//! Date/time derivation.
//!
//! The KSI export carries the collision date as free text (several layouts
//! across releases) and the time of day as an unpadded HHMM number, so
//! `930` means 09:30 and `5` means 00:05. This module parses both and
//! derives `time_str`, `hour`, `minute` and a combined `datetime`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use tracing::{debug, trace, warn};

use ksi_common::{column_text_values, parse_f64, parse_i64};
use ksi_model::DateTimeCounts;
use ksi_model::columns::{DATE, DATETIME, HOUR, MINUTE, TIME, TIME_STR};

use crate::error::Result;

/// Whole-string layouts tried before splitting off a time component.
const FULL_DATE_FORMATS: [&str; 5] = [
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
];

/// Layouts for the leading date token.
const DATE_TOKEN_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%Y%m%d"];

/// Largest value accepted as an HHMM number.
const MAX_HHMM: f64 = 9999.0;

/// Parse a collision date, keeping only the calendar date.
///
/// Accepts ISO dates with an optional time and offset
/// (`2006-03-11T05:00:00.000Z`), slash layouts (`2006/03/11 05:00:00+00`,
/// `3/11/2006 10:00:00 AM`), compact `20060311`, and long month names.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ksi_transform::datetime::parse_collision_date;
///
/// let expected = NaiveDate::from_ymd_opt(2006, 3, 11);
/// assert_eq!(parse_collision_date("2006/03/11 05:00:00+00"), expected);
/// assert_eq!(parse_collision_date("3/11/2006 10:00:00 AM"), expected);
/// assert_eq!(parse_collision_date("not a date"), None);
/// ```
pub fn parse_collision_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    let token = trimmed.split_whitespace().next().unwrap_or(trimmed);
    parse_date_token(token).or_else(|| {
        token
            .split_once('T')
            .and_then(|(head, _)| parse_date_token(head))
    })
}

fn parse_date_token(token: &str) -> Option<NaiveDate> {
    DATE_TOKEN_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(token, format).ok())
}

/// Coerce a raw time cell to an HHMM number.
///
/// Decimals are truncated toward zero (`930.0` is `930`). Values that are
/// not finite or fall outside `0..=9999` are rejected.
pub fn coerce_hhmm(value: &str) -> Option<u16> {
    let number = parse_f64(value)?;
    if !number.is_finite() {
        return None;
    }
    let truncated = number.trunc();
    if !(0.0..=MAX_HHMM).contains(&truncated) {
        return None;
    }
    Some(truncated as u16)
}

/// Zero-pad an HHMM number to four characters.
pub fn format_time_str(hhmm: u16) -> String {
    format!("{hhmm:04}")
}

/// Split a time string into `(hour, minute)`: the first two characters and
/// the last two. Non-numeric slices yield `None` independently.
pub fn split_time_str(time_str: &str) -> (Option<i32>, Option<i32>) {
    let len = time_str.len();
    let hour = time_str.get(0..2).and_then(parse_i64);
    let minute = len
        .checked_sub(2)
        .and_then(|start| time_str.get(start..len))
        .and_then(parse_i64);
    (
        hour.and_then(|v| i32::try_from(v).ok()),
        minute.and_then(|v| i32::try_from(v).ok()),
    )
}

/// Combine a date with an optional time string.
///
/// A missing time string means midnight. A time string that is not a clock
/// time (`2575`) gives `None`.
pub fn combine_datetime(date: NaiveDate, time_str: Option<&str>) -> Option<NaiveDateTime> {
    let Some(time_str) = time_str else {
        return Some(date.and_time(NaiveTime::MIN));
    };
    let (Some(hour), Some(minute)) = split_time_str(time_str) else {
        return None;
    };
    let hour = u32::try_from(hour).ok()?;
    let minute = u32::try_from(minute).ok()?;
    date.and_hms_opt(hour, minute, 0)
}

/// Derived values for one row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedDateTime {
    pub date: Option<NaiveDate>,
    pub time_str: Option<String>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub datetime: Option<NaiveDateTime>,
}

/// Derive every date/time field for one row from its raw cells.
pub fn derive_row(date: Option<&str>, time: Option<&str>) -> DerivedDateTime {
    let date = date.and_then(parse_collision_date);
    let time_str = time.and_then(coerce_hhmm).map(format_time_str);
    let (hour, minute) = match time_str.as_deref() {
        Some(value) => split_time_str(value),
        None => (None, None),
    };
    let datetime = date.and_then(|d| combine_datetime(d, time_str.as_deref()));
    DerivedDateTime {
        date,
        time_str,
        hour,
        minute,
        datetime,
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    // NaiveDate::default() is 1970-01-01
    let days = date.signed_duration_since(NaiveDate::default()).num_days();
    i32::try_from(days).unwrap_or(i32::MAX)
}

fn epoch_millis(datetime: NaiveDateTime) -> i64 {
    datetime.and_utc().timestamp_millis()
}

/// Replace `date` with a typed calendar date and append `time_str`, `hour`,
/// `minute` and `datetime`.
///
/// A missing `date` or `time` column is treated as all-null input for that
/// field; the derived columns are still added.
pub fn derive_datetime_columns(df: &mut DataFrame) -> Result<DateTimeCounts> {
    let height = df.height();
    let dates = column_text_values(df, DATE).unwrap_or_else(|| {
        warn!(column = DATE, "column missing or not text, dates will be null");
        vec![None; height]
    });
    let times = column_text_values(df, TIME).unwrap_or_else(|| {
        warn!(column = TIME, "column missing or not text, times will be null");
        vec![None; height]
    });

    let mut counts = DateTimeCounts::default();
    let mut date_days: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut time_strs: Vec<Option<String>> = Vec::with_capacity(height);
    let mut hours: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut minutes: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut datetimes: Vec<Option<i64>> = Vec::with_capacity(height);

    for (idx, (date, time)) in dates.iter().zip(times.iter()).enumerate() {
        let derived = derive_row(date.as_deref(), time.as_deref());
        if derived.date.is_none() {
            counts.unparsed_dates += 1;
            trace!(row = idx, "unparsed date");
        }
        if derived.time_str.is_none() {
            counts.unparsed_times += 1;
            trace!(row = idx, "unparsed time");
        }
        if derived.date.is_some() && derived.datetime.is_none() {
            counts.invalid_clock_times += 1;
            trace!(row = idx, time_str = ?derived.time_str, "time is not a clock time");
        }
        date_days.push(derived.date.map(days_since_epoch));
        datetimes.push(derived.datetime.map(epoch_millis));
        time_strs.push(derived.time_str);
        hours.push(derived.hour);
        minutes.push(derived.minute);
    }

    let date_series = Series::new(DATE.into(), date_days).cast(&DataType::Date)?;
    let datetime_series = Series::new(DATETIME.into(), datetimes)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    df.with_column(date_series)?;
    df.with_column(Series::new(TIME_STR.into(), time_strs))?;
    df.with_column(Series::new(HOUR.into(), hours))?;
    df.with_column(Series::new(MINUTE.into(), minutes))?;
    df.with_column(datetime_series)?;

    debug!(
        rows = height,
        unparsed_dates = counts.unparsed_dates,
        unparsed_times = counts.unparsed_times,
        invalid_clock_times = counts.invalid_clock_times,
        "derived date/time columns"
    );
    Ok(counts)
}
