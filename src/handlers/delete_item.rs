//! Delete handler for the expiry MCP server

use crate::ExpiryServerHandler;
use crate::commands::{Command, Outcome};
use crate::dates::local_date_today;
use crate::formatting;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl ExpiryServerHandler {
    /// Removes one item by ID; unknown IDs leave the list as it is.
    pub async fn handle_delete_item(&self, id: String) -> McpResult<String> {
        let today = local_date_today();
        let mut tracker = self.tracker()?;

        let outcome = match tracker.execute(Command::DeleteItem(id.clone()), today) {
            Ok(outcome) => outcome,
            Err(e) => {
                drop(tracker);
                bail_public!(_, "Failed to save: {}", e);
            }
        };
        if outcome == Outcome::Removed(true) {
            info!(id = %id.trim(), "item deleted");
        }

        Ok(formatting::format_rows(&tracker.view(today), tracker.filter()))
    }
}
