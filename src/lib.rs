//! Localfind: a reusable search, filter, and sort engine for local
//! marketplace listings.
//!
//! Localfind consolidates the search pipeline that marketplace screens (job
//! boards, rentals, shops, favorites, global search) otherwise each carry a
//! copy of:
//! - A pure filter-and-sort pipeline over domain records
//! - Per-screen query state with toggleable filters and validated ranges
//! - Persistent, deduplicated, capped search history with typing suggestions
//! - A message-passing worker boundary for candidate fetches with
//!   stale-response protection
//! - View-model projection for interchangeable list/grid rendering
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host UI (out of scope)                             │  ← Events in, view models out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Screen state
//! │  - Event handling                                   │  ← Fetch generations
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Pipeline      │   │ History       │   │ Worker        │
//! │ (pipeline/)   │   │ (history/)    │   │ (worker/)     │
//! │ - Predicates  │   │ - Recent list │   │ - Fetch       │
//! │ - Sort keys   │   │ - Suggestions │   │ - Persistence │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Projection (ui/), Storage (storage/),              │
//! │  Domain (domain/), Infrastructure (infrastructure/) │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: screen state machine with event/action model
//! - [`domain`]: core domain types (`Listing`, `Searchable`, errors)
//! - [`pipeline`]: the pure filter-and-sort transformation
//! - [`history`]: recent searches, suggestions, persistence binding
//! - [`storage`]: key-value storage abstraction and JSON file backend
//! - [`worker`]: background worker for fetches and history persistence
//! - [`ui`]: view-model projection for list/grid rendering
//! - [`infrastructure`]: platform paths
//! - `observability`: OpenTelemetry tracing (internal wiring)
//!
//! # Screen Lifecycle
//!
//! 1. **Mount**: build a [`Config`], call [`initialize`], feed
//!    `Event::ScreenMounted` to the handler, and execute the returned
//!    actions (history load + first fetch) against a
//!    [`worker::SearchWorker`].
//! 2. **Interaction**: translate UI input into [`app::Event`] values; each
//!    `handle_event` call mutates state and may emit worker actions.
//! 3. **Worker responses**: wrap each response in
//!    `Event::WorkerResponse` and feed it back; stale fetch responses are
//!    dropped by generation check.
//! 4. **Render**: call [`ui::compute_viewmodel`] whenever the handler
//!    reports a redraw.
//!
//! # Examples
//!
//! ```
//! use localfind::app::{handle_event, Event, ScreenState};
//! use localfind::Config;
//!
//! let config = Config {
//!     screen_title: "Jobs".to_string(),
//!     screen_key: "search_history_jobs".to_string(),
//!     popular_terms: vec!["plumbing".to_string(), "cleaning".to_string()],
//!     ..Default::default()
//! };
//!
//! let mut state = localfind::initialize(&config);
//! let (redraw, _actions) =
//!     handle_event(&mut state, &Event::QueryChanged("plumb".to_string()))?;
//! assert!(redraw);
//! assert_eq!(state.suggestions, vec!["plumbing"]);
//! # Ok::<(), localfind::LocalfindError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## One Pipeline, Many Screens
//!
//! Screens differ by record type and filter selections, not by logic. The
//! pipeline is generic over the [`domain::Searchable`] accessor trait, and
//! per-screen differences (storage key, popular terms, page size) live in
//! [`Config`] values rather than code.
//!
//! ## Fetch Generations
//!
//! Candidate fetches have no cancellation; a screen can only outrace its
//! own requests. Every fetch carries a generation token and only the
//! response matching the current generation commits, so a slow superseded
//! response can never overwrite newer state.
//!
//! ## Best-Effort Persistence
//!
//! Search history is the only persisted state, and losing it must never
//! break a search. Storage failures are logged and absorbed; the in-memory
//! list keeps working for the session.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod history;
pub mod infrastructure;
pub mod pipeline;
pub mod storage;
pub mod ui;
pub mod worker;

pub mod observability;

pub use app::{handle_event, Action, Event, LayoutMode, LoadStatus, ScreenState};
pub use domain::{Listing, LocalfindError, Result, Searchable};
pub use pipeline::{FilterFlag, FilterState, SortKey};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-screen configuration for the search engine.
///
/// Every screen instantiates the same engine with different values: its
/// storage key, its popular search terms, its pagination and grid geometry.
/// Values come from [`Config::default`], a string map
/// ([`Config::from_map`]), or a TOML file ([`Config::from_file`]).
///
/// # Example
///
/// ```toml
/// # jobs-screen.toml
/// screen_key = "search_history_jobs"
/// screen_title = "Jobs"
/// popular_terms = ["plumbing", "house cleaning", "electrician"]
/// page_size = 20
/// grid_columns = 2
/// trace_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage key the screen's history array persists under.
    ///
    /// Must be unique per screen; two screens sharing a key share a history.
    pub screen_key: String,

    /// Human-readable screen title used in the header view model.
    pub screen_title: String,

    /// Static popular-terms list that drives typing suggestions.
    pub popular_terms: Vec<String>,

    /// Maximum number of remembered search terms. Default: 10.
    pub history_limit: usize,

    /// Maximum number of typing suggestions. Default: 5.
    pub suggestion_limit: usize,

    /// Results per page. Default: 20.
    pub page_size: usize,

    /// Columns per row in grid layout. Default: 2.
    pub grid_columns: usize,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_key: "search_history".to_string(),
            screen_title: "Results".to_string(),
            popular_terms: Vec::new(),
            history_limit: history::DEFAULT_HISTORY_LIMIT,
            suggestion_limit: history::DEFAULT_SUGGESTION_LIMIT,
            page_size: 20,
            grid_columns: 2,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// Host applications often hand screens their configuration as untyped
    /// key-value pairs. This extracts and parses typed values with fallback
    /// defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `popular_terms`: comma-separated string → `Vec<String>` (empty
    ///   values filtered)
    /// - `history_limit`, `suggestion_limit`, `page_size`, `grid_columns`:
    ///   string → `usize` (fall back to defaults on parse error)
    /// - `screen_key`, `screen_title`, `trace_level`: taken verbatim
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use localfind::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("screen_key".to_string(), "search_history_rentals".to_string());
    /// map.insert("popular_terms".to_string(), "studio, loft".to_string());
    /// map.insert("page_size".to_string(), "12".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.screen_key, "search_history_rentals");
    /// assert_eq!(config.popular_terms, vec!["studio", "loft"]);
    /// assert_eq!(config.page_size, 12);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let popular_terms = map
            .get("popular_terms")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let parse_usize = |key: &str, fallback: usize| {
            map.get(key)
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(fallback)
        };

        Self {
            screen_key: map
                .get("screen_key")
                .cloned()
                .unwrap_or(defaults.screen_key),
            screen_title: map
                .get("screen_title")
                .cloned()
                .unwrap_or(defaults.screen_title),
            popular_terms,
            history_limit: parse_usize("history_limit", defaults.history_limit),
            suggestion_limit: parse_usize("suggestion_limit", defaults.suggestion_limit),
            page_size: parse_usize("page_size", defaults.page_size),
            grid_columns: parse_usize("grid_columns", defaults.grid_columns),
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// Unspecified fields take their defaults, so a screen's file only lists
    /// what it overrides.
    ///
    /// # Errors
    ///
    /// Returns [`LocalfindError::Config`] when the file cannot be read or is
    /// not valid TOML for this structure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LocalfindError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| LocalfindError::Config(format!("invalid config {}: {e}", path.display())))
    }
}

/// Initializes a search screen from its configuration.
///
/// Creates a [`ScreenState`] with empty candidates and history; both are
/// populated by worker responses after the host feeds
/// [`app::Event::ScreenMounted`] through the handler. Call
/// [`observability::init_tracing`] first if trace output is wanted.
///
/// # Example
///
/// ```
/// use localfind::Config;
///
/// let state = localfind::initialize(&Config::default());
/// assert!(state.candidates.is_empty());
/// assert!(state.history.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> ScreenState {
    tracing::debug!(screen = %config.screen_title, "initializing search screen");
    ScreenState::new(config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_screen_expectations() {
        let config = Config::default();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.grid_columns, 2);
    }

    #[test]
    fn from_map_ignores_malformed_numbers() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "a lot".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.page_size, Config::default().page_size);
    }

    #[test]
    fn from_map_filters_empty_popular_terms() {
        let mut map = BTreeMap::new();
        map.insert("popular_terms".to_string(), "studio,, loft ,".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.popular_terms, vec!["studio", "loft"]);
    }

    #[test]
    fn from_file_round_trips_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.toml");
        std::fs::write(
            &path,
            "screen_key = \"search_history_shop\"\npopular_terms = [\"drill\"]\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.screen_key, "search_history_shop");
        assert_eq!(config.popular_terms, vec!["drill"]);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn from_file_reports_unreadable_paths() {
        let result = Config::from_file("/nonexistent/localfind.toml");
        assert!(matches!(result, Err(LocalfindError::Config(_))));
    }
}
