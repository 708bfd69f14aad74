//! Search history: recent terms, suggestions, and persistence.
//!
//! History is the one piece of a screen's query state that outlives the
//! screen. The in-memory list ([`SearchHistory`]) enforces the dedupe /
//! cap / most-recent-first rules; [`HistoryStore`] round-trips it through
//! the host key-value storage as a plain JSON string array, degrading to
//! in-memory-only when storage misbehaves.
//!
//! # Modules
//!
//! - [`recent`]: `SearchHistory` and popular-term [`suggestions`]
//! - [`store`]: `HistoryStore`, the storage binding

pub mod recent;
pub mod store;

pub use recent::{
    suggestions, SearchHistory, DEFAULT_HISTORY_LIMIT, DEFAULT_SUGGESTION_LIMIT,
};
pub use store::HistoryStore;
