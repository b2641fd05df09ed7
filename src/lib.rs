//! Expiry MCP Server Library
//!
//! This library tracks perishable items: each item has a start date and a
//! shelf life, from which an expiry date is computed once and stored. Items
//! are classified by urgency (expired, expires today, expiring soon, ok) and
//! shown in a filtered view sorted by expiry date.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `ExpiryServerHandler` - Exposes the user commands as MCP tools
//! - **Domain Layer**: `dates`, `shelf_life`, `status`, `item`, `projection`,
//!   `commands` - Pure date arithmetic, classification and view logic
//! - **Persistence Layer**: `storage` and `store` - Key-value storage holding the
//!   item collection as JSON under a single versioned key
//!
//! # Example
//!
//! ```no_run
//! use expiry_mcp::ExpiryServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = ExpiryServerHandler::new("expiry.toml")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod dates;
pub mod formatting;
mod handlers;
pub mod item;
pub mod projection;
pub mod shelf_life;
pub mod status;
pub mod storage;
pub mod store;

use anyhow::{Result, bail};
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

// Re-export commonly used types
pub use commands::{Command, Outcome, Tracker};
pub use item::{Item, NewItem};
pub use projection::{Filter, Row, project};
pub use shelf_life::LifeUnit;
pub use status::{Classification, SOON_THRESHOLD, Urgency, classify};
pub use storage::{FileBackend, KeyValueBackend, MemoryBackend, STORAGE_KEY, StorageError};
pub use store::{ItemStore, StoreError};

/// MCP Server handler for expiry tracking
///
/// Owns the tracker for one storage file. Every tool call runs one command
/// and answers with the freshly projected view.
pub struct ExpiryServerHandler {
    pub(crate) tracker: Mutex<Tracker<FileBackend>>,
}

impl ExpiryServerHandler {
    /// Create a new handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the storage file (TOML key-value document).
    ///   It is created on the first write.
    ///
    /// # Returns
    /// Result containing the handler or an error if the path is a directory
    pub fn new(storage_path: &str) -> Result<Self> {
        if Path::new(storage_path).is_dir() {
            bail!("Storage path '{}' is a directory", storage_path);
        }
        let tracker = Tracker::open(FileBackend::new(storage_path));
        Ok(Self {
            tracker: Mutex::new(tracker),
        })
    }

    pub(crate) fn tracker(&self) -> McpResult<MutexGuard<'_, Tracker<FileBackend>>> {
        match self.tracker.lock() {
            Ok(guard) => Ok(guard),
            Err(_) => {
                bail_public!(_, "Tracker state is unavailable after an earlier failure");
            }
        }
    }

    /// Path of the backing storage file
    pub fn storage_path(&self) -> McpResult<std::path::PathBuf> {
        let tracker = self.tracker()?;
        Ok(tracker.store().backend().file_path().to_path_buf())
    }
}

/// Expiry tracker: keeps a list of perishable items and tells you what is about to go off.
///
/// Each item has a start date (e.g. purchase or opening date) and a shelf life in days,
/// weeks or months; the expiry date is computed when the item is added.
///
/// Urgency categories:
/// - **Expired**: expiry date is in the past
/// - **Expires today**: expiry date is today
/// - **Expiring soon**: expires within the next 3 days
/// - **OK**: more than 3 days left
///
/// Every tool returns the current list sorted by expiry date, using the active filter.
#[mcp_server]
impl McpServer for ExpiryServerHandler {
    /// **Add**: Track a new item. Expiry = start date + shelf life.
    /// Invalid input (empty name, bad date, non-positive shelf life, unknown unit) is ignored
    /// and the list is returned unchanged.
    #[tool]
    async fn add_item(
        &self,
        /// Name of the item (e.g., "Milk")
        name: String,
        /// Start date: YYYY-MM-DD (optional, defaults to today)
        start_date: Option<String>,
        /// Shelf life amount, positive number (optional, defaults to 7)
        life_value: Option<f64>,
        /// Shelf life unit: days/weeks/months (optional, defaults to days)
        life_unit: Option<String>,
        /// Free-text note (optional)
        note: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_item(name, start_date, life_value, life_unit, note)
            .await
    }

    /// **Delete**: Remove one item by ID. Unknown IDs are ignored.
    #[tool]
    async fn delete_item(
        &self,
        /// ID of the item to remove
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_item(id).await
    }

    /// **Clear**: Remove every item.
    #[tool]
    async fn clear_all(&self) -> McpResult<String> {
        self.handle_clear_all().await
    }

    /// **List**: Show items sorted by expiry date.
    /// **Filter**: "all" = everything; "expired" = expired or expiring today; "soon" = within 3 days.
    /// The filter stays active for later calls.
    #[tool]
    async fn list(
        &self,
        /// Filter: all/expired/soon. Empty = keep current filter.
        filter: Option<String>,
    ) -> McpResult<String> {
        self.handle_list(filter).await
    }
}
