//! Add handler for the expiry MCP server

use crate::ExpiryServerHandler;
use crate::commands::{Command, Outcome};
use crate::dates::local_date_today;
use crate::formatting;
use crate::item::NewItem;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl ExpiryServerHandler {
    /// Adds an item and returns the updated list.
    ///
    /// Invalid input creates nothing and produces no error; the caller just
    /// gets the unchanged list back.
    pub async fn handle_add_item(
        &self,
        name: String,
        start_date: Option<String>,
        life_value: Option<f64>,
        life_unit: Option<String>,
        note: Option<String>,
    ) -> McpResult<String> {
        let today = local_date_today();
        let input = NewItem {
            name,
            start_date,
            life_value,
            life_unit,
            note,
        };

        let mut tracker = self.tracker()?;
        let outcome = match tracker.execute(Command::AddItem(input), today) {
            Ok(outcome) => outcome,
            Err(e) => {
                drop(tracker);
                bail_public!(_, "Failed to save: {}", e);
            }
        };

        let view = formatting::format_rows(&tracker.view(today), tracker.filter());
        match outcome {
            Outcome::Added(id) => {
                info!(%id, "item added");
                Ok(format!("Item added with ID: {}\n\n{}", id, view))
            }
            _ => Ok(view),
        }
    }
}
