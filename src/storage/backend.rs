//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStorage`] trait that abstracts over the
//! secure local key-value store the host application provides. The engine only
//! ever stores one kind of value, the JSON-encoded search-history array
//! keyed by a per-screen string constant, so the trait is deliberately the
//! smallest surface that covers it.
//!
//! # Design Philosophy
//!
//! The trait mirrors the host storage interface verbatim
//! (`get_item`/`set_item`/`remove_item`) rather than inventing a richer ORM.
//! Each method maps directly to one history operation: load, persist, clear.

use crate::domain::error::Result;

/// Abstraction over the host's secure local key-value storage.
///
/// Implementations must tolerate unknown keys (`get_item` returns `Ok(None)`)
/// and removing keys that were never written.
///
/// # Implementations
///
/// - [`JsonFileStorage`](crate::storage::JsonFileStorage): JSON file with
///   atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-memory map for
///   tests and in-memory-only fallback
///
/// # Examples
///
/// ```no_run
/// use localfind::storage::{JsonFileStorage, KeyValueStorage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonFileStorage::new(PathBuf::from("/tmp/localfind.json"))?;
/// storage.set_item("search_history_jobs", "[\"plumber\"]")?;
/// assert!(storage.get_item("search_history_jobs")?.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStorage: Send {
    /// Retrieves the value stored under a key.
    ///
    /// Returns `Ok(None)` if the key has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value under a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails. Callers treat a failed
    /// write as "history is in-memory-only for this session", never as fatal.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes a key and its value.
    ///
    /// Removing an absent key is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete operation fails.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}
