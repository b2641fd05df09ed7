//! Commands the presentation layer sends to the tracker

use crate::item::{NewItem, create_id};
use crate::projection::{Filter, Row, project};
use crate::storage::{KeyValueBackend, StorageError};
use crate::store::{ItemStore, StoreError};
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddItem(NewItem),
    DeleteItem(String),
    ClearAll,
    SetFilter(Filter),
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// New item stored under this ID
    Added(String),
    /// Add input was invalid; nothing was stored
    Rejected,
    /// Whether an item was actually removed
    Removed(bool),
    Cleared,
    FilterChanged(Filter),
}

/// Item store plus the currently selected filter
pub struct Tracker<B> {
    store: ItemStore<B>,
    filter: Filter,
}

impl<B: KeyValueBackend> Tracker<B> {
    /// Load the persisted items from `backend`
    pub fn open(backend: B) -> Self {
        Self::with_store(ItemStore::open(backend))
    }

    pub fn with_store(store: ItemStore<B>) -> Self {
        Self {
            store,
            filter: Filter::default(),
        }
    }

    pub fn store(&self) -> &ItemStore<B> {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Select which rows [`Tracker::view`] returns; storage is untouched
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Run one command
    ///
    /// Invalid add input is dropped quietly with [`Outcome::Rejected`]. Only
    /// a failed write is reported as an error.
    pub fn execute(&mut self, command: Command, today: NaiveDate) -> Result<Outcome, StorageError> {
        match command {
            Command::AddItem(input) => {
                let item = match input.into_item(create_id(), today) {
                    Ok(item) => item,
                    Err(reason) => {
                        debug!(%reason, "add rejected");
                        return Ok(Outcome::Rejected);
                    }
                };
                let id = item.id.clone();
                match self.store.add(item) {
                    Ok(()) => Ok(Outcome::Added(id)),
                    Err(StoreError::Storage(e)) => Err(e),
                    Err(StoreError::DuplicateId(id)) => {
                        debug!(%id, "add rejected: generated ID already in use");
                        Ok(Outcome::Rejected)
                    }
                }
            }
            Command::DeleteItem(id) => Ok(Outcome::Removed(self.store.remove(id.trim())?)),
            Command::ClearAll => {
                self.store.clear()?;
                Ok(Outcome::Cleared)
            }
            Command::SetFilter(filter) => {
                self.set_filter(filter);
                Ok(Outcome::FilterChanged(filter))
            }
        }
    }

    /// Rows to display for `today` under the current filter
    pub fn view(&self, today: NaiveDate) -> Vec<Row<'_>> {
        project(self.store.items(), self.filter, today)
    }
}
