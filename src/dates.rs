//! Calendar date helpers
//!
//! All dates in this crate are `NaiveDate` values: year/month/day only, no
//! time of day and no timezone. Strings use the `YYYY-MM-DD` format.

use chrono::{Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A date string that is not a valid `YYYY-MM-DD` calendar date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date format '{input}'. Use YYYY-MM-DD (e.g., '2025-03-15')")]
pub struct FormatError {
    pub input: String,
}

impl FormatError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` string into a calendar date
///
/// The string must be exactly four year digits, two month digits and two day
/// digits separated by dashes. Impossible dates such as `2024-02-30` are
/// rejected rather than rolled over into the next month.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, FormatError> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(FormatError::new(s));
    }

    let year: i32 = s[0..4].parse().map_err(|_| FormatError::new(s))?;
    let month: u32 = s[5..7].parse().map_err(|_| FormatError::new(s))?;
    let day: u32 = s[8..10].parse().map_err(|_| FormatError::new(s))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| FormatError::new(s))
}

/// Render a calendar date as `YYYY-MM-DD`
pub fn format_calendar_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Rearrange a `YYYY-MM-DD` string into `DD.MM.YYYY` for display
///
/// This is plain string shuffling; the input is not validated.
pub fn format_calendar_date_local(iso: &str) -> String {
    let mut parts = iso.split('-');
    let year = parts.next().unwrap_or_default();
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();
    format!("{}.{}.{}", day, month, year)
}

/// Whole calendar days from `from` to `to`, positive when `to` is later
pub fn day_difference(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Like [`day_difference`], but for timestamps: both sides are truncated to
/// midnight first so the time of day never affects the result.
pub fn day_difference_at(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    day_difference(from.date(), to.date())
}

/// Serde adapter storing dates as strict `YYYY-MM-DD` strings
pub mod iso_date {
    use super::{format_calendar_date_iso, parse_calendar_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_calendar_date_iso(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_calendar_date(&s).map_err(de::Error::custom)
    }
}
