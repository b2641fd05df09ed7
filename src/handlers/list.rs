use crate::ExpiryServerHandler;
use crate::dates::local_date_today;
use crate::formatting;
use crate::projection::Filter;
use mcp_attr::{Result as McpResult, bail_public};

impl ExpiryServerHandler {
    /// Optionally switches the active filter, then renders the view.
    pub async fn handle_list(&self, filter: Option<String>) -> McpResult<String> {
        let today = local_date_today();

        // Parse and validate filter before touching the tracker
        let filter = match filter.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => match s.parse::<Filter>() {
                Ok(f) => Some(f),
                Err(msg) => {
                    bail_public!(_, "{}", msg);
                }
            },
        };

        let mut tracker = self.tracker()?;
        if let Some(filter) = filter {
            tracker.set_filter(filter);
        }
        Ok(formatting::format_rows(&tracker.view(today), tracker.filter()))
    }
}
