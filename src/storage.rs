//! Key-value persistence for the item collection
//!
//! The collection lives under a single key as a JSON array, the same layout
//! the browser version keeps in `localStorage`. On disk, [`FileBackend`]
//! keeps a small TOML document mapping keys to string values.

use crate::item::Item;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Key under which the collection is stored
///
/// The `_v1` suffix leaves room for a future layout next to the old data.
pub const STORAGE_KEY: &str = "expiry_items_v1";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode items: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write storage document: {0}")]
    Document(#[from] toml::ser::Error),
}

/// Synchronous string key-value store with a single writer
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Backend kept in memory, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if written by an earlier session
    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Backend persisting every key to one TOML file
pub struct FileBackend {
    file_path: PathBuf,
}

impl FileBackend {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.file_path.clone(),
            source,
        }
    }

    /// Read every stored entry
    ///
    /// A document that is not UTF-8 or not a TOML string table counts as
    /// empty, so the next write replaces it.
    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.file_path).map_err(|e| self.io_error(e))?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "storage document is not valid UTF-8");
                return Ok(BTreeMap::new());
            }
        };
        match toml::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "storage document is unreadable");
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);

        let content = toml::to_string(&entries)?;
        fs::write(&self.file_path, content).map_err(|e| self.io_error(e))
    }
}

/// Serialize the whole collection
pub fn encode_items(items: &[Item]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(items)?)
}

/// Parse a stored collection; any malformed record fails the whole decode
pub fn decode_items(raw: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(raw)
}
