//! In-memory item collection backed by a key-value store

use crate::item::Item;
use crate::storage::{KeyValueBackend, STORAGE_KEY, StorageError, decode_items, encode_items};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Item ID '{0}' already exists")]
    DuplicateId(String),
}

/// Owner of the item collection
///
/// Items are kept in insertion order. Every mutation builds the next
/// collection, persists it in full, and only then replaces the current one,
/// so the in-memory state always matches what was last written.
pub struct ItemStore<B> {
    backend: B,
    key: String,
    items: Vec<Item>,
}

impl<B: KeyValueBackend> ItemStore<B> {
    /// Open the store under [`STORAGE_KEY`], loading whatever was persisted
    pub fn open(backend: B) -> Self {
        Self::open_with_key(backend, STORAGE_KEY)
    }

    pub fn open_with_key(backend: B, key: &str) -> Self {
        let mut store = Self {
            backend,
            key: key.to_string(),
            items: Vec::new(),
        };
        store.items = store.load();
        store
    }

    /// Read the persisted collection
    ///
    /// Missing, unreadable or corrupt data yields an empty collection. The
    /// stored list is a cache, not a source of truth worth failing over.
    pub fn load(&self) -> Vec<Item> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read items, starting empty");
                return Vec::new();
            }
        };

        match decode_items(&raw) {
            Ok(items) => {
                info!(key = %self.key, count = items.len(), "loaded items");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored items are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the current collection, overwriting what was stored
    pub fn save(&mut self) -> Result<(), StorageError> {
        let content = encode_items(&self.items)?;
        self.backend.set(&self.key, content)
    }

    fn replace(&mut self, next: Vec<Item>) -> Result<(), StorageError> {
        let content = encode_items(&next)?;
        self.backend.set(&self.key, content)?;
        self.items = next;
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append an item and persist
    pub fn add(&mut self, item: Item) -> Result<(), StoreError> {
        if self.get(&item.id).is_some() {
            return Err(StoreError::DuplicateId(item.id));
        }
        let id = item.id.clone();
        let mut next = self.items.clone();
        next.push(item);
        self.replace(next)?;
        debug!(id = %id, "added item");
        Ok(())
    }

    /// Remove the item with `id` and persist
    ///
    /// Returns `false` without touching storage when no such item exists.
    pub fn remove(&mut self, id: &str) -> Result<bool, StorageError> {
        if self.get(id).is_none() {
            debug!(id = %id, "remove: no such item");
            return Ok(false);
        }
        let next: Vec<Item> = self.items.iter().filter(|item| item.id != id).cloned().collect();
        self.replace(next)?;
        debug!(id = %id, "removed item");
        Ok(true)
    }

    /// Remove every item and persist
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let count = self.items.len();
        self.replace(Vec::new())?;
        debug!(count, "cleared items");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;
    use crate::storage::MemoryBackend;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn item(id: &str, start: &str) -> Item {
        NewItem::new(id)
            .start_date(start)
            .life(7.0, "days")
            .into_item(id.to_string(), today())
            .unwrap()
    }

    /// Backend whose writes always fail
    #[derive(Default)]
    struct BrokenBackend {
        stored: Option<String>,
    }

    impl KeyValueBackend for BrokenBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.stored.clone())
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "broken".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn test_add_persists_whole_collection() {
        let mut store = ItemStore::open(MemoryBackend::new());
        store.add(item("milk", "2024-01-01")).unwrap();
        store.add(item("eggs", "2024-01-02")).unwrap();

        let raw = store.backend().get(STORAGE_KEY).unwrap().unwrap();
        let persisted = decode_items(&raw).unwrap();
        assert_eq!(persisted, store.items());
        assert_eq!(persisted[0].id, "milk");
        assert_eq!(persisted[1].id, "eggs");
    }

    #[test]
    fn test_reopen_restores_items() {
        let mut store = ItemStore::open(MemoryBackend::new());
        store.add(item("milk", "2024-01-01")).unwrap();
        let backend = store.backend().clone();

        let reopened = ItemStore::open(backend);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.items()[0].expiry_date.to_string(), "2024-01-08");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = ItemStore::open(MemoryBackend::new());
        store.add(item("milk", "2024-01-01")).unwrap();
        let err = store.add(item("milk", "2024-02-01")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "milk"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = ItemStore::open(MemoryBackend::new());
        store.add(item("milk", "2024-01-01")).unwrap();
        store.add(item("eggs", "2024-01-02")).unwrap();

        assert!(store.remove("milk").unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.get("milk").is_none());

        let reopened = ItemStore::open(store.backend().clone());
        assert_eq!(reopened.items()[0].id, "eggs");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = ItemStore::open(MemoryBackend::new());
        store.add(item("milk", "2024-01-01")).unwrap();
        let before = store.items().to_vec();

        assert!(!store.remove("nope").unwrap());
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_clear() {
        let mut store = ItemStore::open(MemoryBackend::new());
        store.add(item("milk", "2024-01-01")).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.backend().get(STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for raw in ["{not json", "", "42", "[{\"id\":1}]"] {
            let backend = MemoryBackend::new().with_entry(STORAGE_KEY, raw);
            let store = ItemStore::open(backend);
            assert!(store.is_empty(), "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_one_bad_record_discards_everything() {
        let raw = r#"[
            {"id":"a","name":"A","startDate":"2024-01-01","expiryDate":"2024-01-08","lifeValue":7,"lifeUnit":"days","note":""},
            {"id":"b","name":"B","startDate":"2024-01-01","expiryDate":"08.01.2024","lifeValue":7,"lifeUnit":"days","note":""}
        ]"#;
        let store = ItemStore::open(MemoryBackend::new().with_entry(STORAGE_KEY, raw));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_previous_state() {
        let mut store = ItemStore::open(BrokenBackend::default());
        let err = store.add(item("milk", "2024-01-01")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(store.is_empty());
        assert!(store.clear().is_err());
        assert!(store.save().is_err());
    }

    #[test]
    fn test_custom_key() {
        let mut store = ItemStore::open_with_key(MemoryBackend::new(), "expiry_items_test");
        store.add(item("milk", "2024-01-01")).unwrap();
        assert!(store.backend().get(STORAGE_KEY).unwrap().is_none());
        assert!(store.backend().get("expiry_items_test").unwrap().is_some());
    }
}
