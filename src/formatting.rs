//! Text rendering of the projected view for MCP responses

use crate::dates::{format_calendar_date_iso, format_calendar_date_local};
use crate::projection::{Filter, Row};
use crate::status::format_days_left;

fn display_date(date: chrono::NaiveDate) -> String {
    format_calendar_date_local(&format_calendar_date_iso(date))
}

/// Format rows into a display string
pub fn format_rows(rows: &[Row<'_>], filter: Filter) -> String {
    if rows.is_empty() {
        return format!("No items found (filter: {})", filter);
    }

    let mut result = format!("Found {} item(s) (filter: {}):\n\n", rows.len(), filter);
    for row in rows {
        let item = row.item;
        result.push_str(&format!(
            "- [{}] {} ({}, {})\n",
            item.id,
            item.name,
            row.status.urgency.label(),
            format_days_left(row.status.days_left)
        ));
        if !item.note.is_empty() {
            result.push_str(&format!("  Note: {}\n", item.note));
        }
        result.push_str(&format!(
            "  Start: {}  Expires: {}  Shelf life: {} {}\n",
            display_date(item.start_date),
            display_date(item.expiry_date),
            item.life_value,
            item.life_unit
        ));
    }

    result
}
