//! Clear handler for the expiry MCP server

use crate::ExpiryServerHandler;
use crate::commands::Command;
use crate::dates::local_date_today;
use crate::formatting;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl ExpiryServerHandler {
    /// Removes every item.
    pub async fn handle_clear_all(&self) -> McpResult<String> {
        let today = local_date_today();
        let mut tracker = self.tracker()?;

        let count = tracker.store().len();
        if let Err(e) = tracker.execute(Command::ClearAll, today) {
            drop(tracker);
            bail_public!(_, "Failed to save: {}", e);
        }
        info!(count, "cleared all items");

        Ok(format!(
            "Deleted {} item(s)\n\n{}",
            count,
            formatting::format_rows(&tracker.view(today), tracker.filter())
        ))
    }
}
