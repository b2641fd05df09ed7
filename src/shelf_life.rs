//! Shelf-life arithmetic
//!
//! Derives an expiry date from a start date plus a duration in days, weeks
//! or months.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of a shelf-life duration
///
/// Uses lowercase naming to match the persisted JSON format.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeUnit {
    days,
    weeks,
    months,
}

impl FromStr for LifeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(LifeUnit::days),
            "weeks" => Ok(LifeUnit::weeks),
            "months" => Ok(LifeUnit::months),
            _ => Err(format!(
                "Invalid unit '{}'. Valid options are: days, weeks, months",
                s
            )),
        }
    }
}

impl fmt::Display for LifeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifeUnit::days => "days",
            LifeUnit::weeks => "weeks",
            LifeUnit::months => "months",
        };
        f.write_str(s)
    }
}

/// Compute the expiry date for a shelf life starting on `start`
///
/// Only whole units are applied; any fractional part of `value` is dropped.
/// Adding months keeps the day of month where it exists and otherwise clamps
/// to the last day of the target month (Jan 31 + 1 month = Feb 28/29).
///
/// Callers are expected to pass a finite, positive `value`. Returns `None`
/// only when the result falls outside the representable date range.
pub fn compute_expiry(start: NaiveDate, value: f64, unit: LifeUnit) -> Option<NaiveDate> {
    if !value.is_finite() || value < 0.0 || value >= u32::MAX as f64 {
        return None;
    }
    let whole = value.trunc() as u64;

    match unit {
        LifeUnit::days => start.checked_add_days(Days::new(whole)),
        LifeUnit::weeks => start.checked_add_days(Days::new(whole.checked_mul(7)?)),
        LifeUnit::months => start.checked_add_months(Months::new(u32::try_from(whole).ok()?)),
    }
}
