//! Filtered, sorted view of the stored items

use crate::item::Item;
use crate::status::{Classification, SOON_THRESHOLD, classify};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Which rows the view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    /// Already expired or expiring today
    Expired,
    /// Expiring within [`SOON_THRESHOLD`] days, excluding today
    Soon,
}

impl Filter {
    fn keeps(self, status: Classification) -> bool {
        match self {
            Filter::All => true,
            Filter::Expired => status.days_left <= 0,
            Filter::Soon => status.days_left > 0 && status.days_left <= SOON_THRESHOLD,
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "expired" => Ok(Filter::Expired),
            "soon" => Ok(Filter::Soon),
            _ => Err(format!(
                "Invalid filter '{}'. Valid options are: all, expired, soon",
                s
            )),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Expired => "expired",
            Filter::Soon => "soon",
        })
    }
}

/// An item decorated with its classification for `today`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    pub item: &'a Item,
    pub status: Classification,
}

/// Derive the display rows for `items`
///
/// Rows are sorted by expiry date; items expiring on the same day keep
/// their insertion order.
pub fn project<'a>(items: &'a [Item], filter: Filter, today: NaiveDate) -> Vec<Row<'a>> {
    let mut rows: Vec<Row<'a>> = items
        .iter()
        .map(|item| Row {
            item,
            status: classify(item.expiry_date, today),
        })
        .filter(|row| filter.keeps(row.status))
        .collect();
    rows.sort_by_key(|row| row.item.expiry_date);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;
    use crate::status::Urgency;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn item(id: &str, start: &str, days: f64) -> Item {
        NewItem::new(id)
            .start_date(start)
            .life(days, "days")
            .into_item(id.to_string(), today())
            .unwrap()
    }

    fn ids(rows: &[Row<'_>]) -> Vec<String> {
        rows.iter().map(|row| row.item.id.clone()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item("ok", "2024-01-01", 30.0),     // 2024-01-31
            item("expired", "2024-01-01", 2.0), // 2024-01-03
            item("soon3", "2024-01-01", 7.0),   // 2024-01-08
            item("today", "2024-01-01", 4.0),   // 2024-01-05
            item("soon1", "2024-01-05", 1.0),   // 2024-01-06
            item("later", "2024-01-01", 8.0),   // 2024-01-09
        ]
    }

    #[test]
    fn test_sorted_by_expiry() {
        let items = vec![
            item("tenth", "2024-01-01", 9.0),
            item("fifth", "2024-01-01", 4.0),
        ];
        let rows = project(&items, Filter::All, today());
        assert_eq!(ids(&rows), ["fifth", "tenth"]);
    }

    #[test]
    fn test_all() {
        let items = sample();
        let rows = project(&items, Filter::All, today());
        assert_eq!(
            ids(&rows),
            ["expired", "today", "soon1", "soon3", "later", "ok"]
        );
        assert_eq!(rows[1].status.urgency, Urgency::ExpiresToday);
        assert_eq!(rows[4].status.urgency, Urgency::Ok);
    }

    #[test]
    fn test_expired_includes_today() {
        let items = sample();
        let rows = project(&items, Filter::Expired, today());
        assert_eq!(ids(&rows), ["expired", "today"]);
        assert!(rows.iter().all(|row| row.status.urgency.is_critical()));
    }

    #[test]
    fn test_soon() {
        let items = sample();
        let rows = project(&items, Filter::Soon, today());
        assert_eq!(ids(&rows), ["soon1", "soon3"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let items = vec![
            item("b", "2024-01-01", 10.0),
            item("a", "2024-01-04", 7.0),
            item("c", "2024-01-08", 3.0),
            item("first", "2024-01-01", 1.0),
        ];
        let rows = project(&items, Filter::All, today());
        assert_eq!(ids(&rows), ["first", "b", "a", "c"]);
    }

    #[test]
    fn test_repeatable() {
        let items = sample();
        let first = project(&items, Filter::All, today());
        let second = project(&items, Filter::All, today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty() {
        assert!(project(&[], Filter::Expired, today()).is_empty());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!("expired".parse::<Filter>(), Ok(Filter::Expired));
        assert_eq!("soon".parse::<Filter>(), Ok(Filter::Soon));
        assert!("ok".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }
}
