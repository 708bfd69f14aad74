//! Storage binding for the recent-search list.
//!
//! [`HistoryStore`] owns a [`KeyValueStorage`] backend and the per-screen key
//! the history array persists under. Every failure here is recovered locally:
//! the error is logged and the caller continues with whatever is in memory.
//! History persistence is best-effort by contract: it must never surface an
//! error to the user or block a search.

use crate::storage::KeyValueStorage;

/// Persists one screen's search history as a JSON-encoded string array.
///
/// The value written under the key is exactly `["most-recent", ...]` so other
/// clients of the host storage (and older app versions) can read it without
/// knowing this crate's types.
pub struct HistoryStore {
    /// Storage backend the array is written to.
    storage: Box<dyn KeyValueStorage>,

    /// Per-screen storage key, e.g. `"search_history_jobs"`.
    key: String,
}

impl HistoryStore {
    /// Creates a store binding a backend to one screen's history key.
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Returns the storage key this store writes under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted history array.
    ///
    /// Returns an empty list when the key is absent, the storage read fails,
    /// or the stored value is not a JSON string array. Failures are logged and
    /// otherwise invisible: the screen simply starts with no history.
    #[must_use]
    pub fn load(&self) -> Vec<String> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "history read failed, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "persisted history is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Persists the history array, returning whether the write succeeded.
    ///
    /// A failed write leaves the previous persisted value (if any) in place
    /// and is only logged; in-memory history is unaffected.
    pub fn persist(&mut self, entries: &[String]) -> bool {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to encode history");
                return false;
            }
        };

        match self.storage.set_item(&self.key, &json) {
            Ok(()) => {
                tracing::debug!(key = %self.key, entry_count = entries.len(), "history persisted");
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "history write failed, keeping in-memory only");
                false
            }
        }
    }

    /// Deletes the persisted history array, returning whether the delete succeeded.
    pub fn clear(&mut self) -> bool {
        match self.storage.remove_item(&self.key) {
            Ok(()) => {
                tracing::debug!(key = %self.key, "persisted history cleared");
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "history delete failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{LocalfindError, Result};
    use crate::storage::MemoryStorage;

    #[test]
    fn persist_then_load_round_trips() {
        let mut store = HistoryStore::new(Box::new(MemoryStorage::new()), "search_history_jobs");
        assert!(store.persist(&["plumber".to_string(), "cleaning".to_string()]));
        assert_eq!(store.load(), vec!["plumber", "cleaning"]);
    }

    #[test]
    fn absent_key_loads_empty() {
        let store = HistoryStore::new(Box::new(MemoryStorage::new()), "search_history_jobs");
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_value_loads_empty() {
        let mut backing = MemoryStorage::new();
        crate::storage::KeyValueStorage::set_item(&mut backing, "k", "{not an array}").unwrap();

        let store = HistoryStore::new(Box::new(backing), "k");
        assert!(store.load().is_empty());
    }

    #[test]
    fn clear_removes_the_persisted_key() {
        let mut store = HistoryStore::new(Box::new(MemoryStorage::new()), "k");
        store.persist(&["a".to_string()]);
        assert!(store.clear());
        assert!(store.load().is_empty());
    }

    /// Backend that fails every operation, for exercising degradation paths.
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(LocalfindError::Storage("unavailable".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(LocalfindError::Storage("unavailable".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Err(LocalfindError::Storage("unavailable".to_string()))
        }
    }

    #[test]
    fn storage_failures_degrade_silently() {
        let mut store = HistoryStore::new(Box::new(BrokenStorage), "k");
        assert!(store.load().is_empty());
        assert!(!store.persist(&["a".to_string()]));
        assert!(!store.clear());
    }
}
