//! Urgency classification of expiry dates

use crate::dates::day_difference;
use chrono::NaiveDate;
use std::fmt;

/// Items expiring within this many days (and not yet today) are "soon"
pub const SOON_THRESHOLD: i64 = 3;

/// How urgent an item is, derived from its days left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    Expired,
    ExpiresToday,
    Soon,
    Ok,
}

impl Urgency {
    /// Expired and expiring today are treated alike when filtering
    pub fn is_critical(self) -> bool {
        matches!(self, Urgency::Expired | Urgency::ExpiresToday)
    }

    /// Human readable badge text
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Expired => "Expired",
            Urgency::ExpiresToday => "Expires today",
            Urgency::Soon => "Expiring soon",
            Urgency::Ok => "OK",
        }
    }

    /// Badge style: `danger`, `warn` or `ok`
    pub fn kind(self) -> &'static str {
        match self {
            Urgency::Expired | Urgency::ExpiresToday => "danger",
            Urgency::Soon => "warn",
            Urgency::Ok => "ok",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency plus the signed number of days until expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub urgency: Urgency,
    pub days_left: i64,
}

/// Classify an expiry date relative to `today`
pub fn classify(expiry: NaiveDate, today: NaiveDate) -> Classification {
    let days_left = day_difference(today, expiry);
    let urgency = match days_left {
        d if d < 0 => Urgency::Expired,
        0 => Urgency::ExpiresToday,
        d if d <= SOON_THRESHOLD => Urgency::Soon,
        _ => Urgency::Ok,
    };
    Classification { urgency, days_left }
}

/// Render days left as `"N days"`, or `"N days ago"` once expired
pub fn format_days_left(days_left: i64) -> String {
    if days_left < 0 {
        format!("{} days ago", days_left.unsigned_abs())
    } else {
        format!("{} days", days_left)
    }
}
