//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes the whole key space
//! - **Best for**: a handful of small string values, infrequent writes
//!
//! Search history is the only payload this crate stores, so the whole key
//! space stays tiny (one JSON array per screen).

use crate::domain::error::{LocalfindError, Result};
use crate::storage::backend::KeyValueStorage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk. Wraps the key space in
/// a versioned object so the format can migrate later without guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageDocument {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored values, one opaque string per key.
    #[serde(default)]
    items: HashMap<String, String>,
}

impl Default for StorageDocument {
    fn default() -> Self {
        Self {
            version: 1,
            items: HashMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// Stores all keys in one human-readable JSON file with atomic writes. The
/// entire document is kept in memory and persisted on modifications.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It's designed to be owned by the
/// single worker that performs persistence, matching the engine's
/// message-passing architecture.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "items": {
///     "search_history_jobs": "[\"plumber\",\"electrician\"]"
///   }
/// }
/// ```
pub struct JsonFileStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory document cache, loaded on creation.
    document: StorageDocument,

    /// Tracks if the document has been modified since last save.
    dirty: bool,
}

impl JsonFileStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts with an empty
    /// document. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use localfind::storage::JsonFileStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonFileStorage::new(PathBuf::from("/tmp/localfind.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let document = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageDocument::default()
        };

        tracing::debug!(item_count = document.items.len(), "storage initialized");

        Ok(Self {
            file_path,
            document,
            dirty: false,
        })
    }

    /// Loads the storage document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &PathBuf) -> Result<StorageDocument> {
        let contents = std::fs::read_to_string(path)?;
        let document: StorageDocument = serde_json::from_str(&contents)
            .map_err(|e| LocalfindError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = document.version,
            item_count = document.items.len(),
            "loaded storage document"
        );

        Ok(document)
    }

    /// Saves the document to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the
    /// target path. This ensures the file is never left in a corrupt state,
    /// even if the process crashes mid-write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename
    /// fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving storage document");

        let json = serde_json::to_string_pretty(&self.document)
            .map_err(|e| LocalfindError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("storage saved successfully");
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self.document.items.get(key).cloned();
        tracing::debug!(key = %key, found = value.is_some(), "storage item lookup");
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("storage_set_item", key = %key).entered();

        self.document.items.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("storage_remove_item", key = %key).entered();

        if self.document.items.remove(key).is_some() {
            self.dirty = true;
            self.save_to_file()?;
        } else {
            tracing::debug!("key absent, nothing to remove");
        }
        Ok(())
    }
}

impl Drop for JsonFileStorage {
    /// Ensures data is saved on drop, even if a save was skipped earlier.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty document on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

/// In-memory storage backend.
///
/// Holds keys in a plain map with no persistence. Used by tests and as the
/// in-memory-only fallback when the host storage is unavailable: history
/// still works for the session, it just doesn't survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
