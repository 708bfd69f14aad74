//! Screen state management.
//!
//! This module defines [`ScreenState`], the central state container for one
//! search screen, with methods for query/filter mutation, selection movement,
//! pagination, and fetch-generation tracking. It is the single source of truth
//! for everything transient on a screen.
//!
//! # Architecture
//!
//! `ScreenState` separates core data (the candidate list delivered by the
//! worker) from derived state (pipeline results, selection, page) to keep the
//! two consistent: every mutation that can change what is visible funnels
//! through [`ScreenState::apply_pipeline`], which recomputes results and
//! clamps the cursor and page back into bounds.
//!
//! # Fetch generations
//!
//! Candidate fetches are fire-and-forget: the screen posts a request and keeps
//! working. Each request carries a monotonically increasing generation number,
//! and only the response matching the *current* generation is committed. A
//! slow response from a superseded request is dropped instead of overwriting
//! newer state.

use crate::app::modes::{LayoutMode, LoadStatus};
use crate::domain::Listing;
use crate::history::{self, SearchHistory};
use crate::pipeline::{self, FilterState};
use crate::Config;

/// Central state container for one search screen.
///
/// Holds the candidate list, the active [`FilterState`], pipeline results,
/// selection cursor, layout, pagination, load status, search history, and
/// typing suggestions. Mutated by the event handler; read by view-model
/// projection.
///
/// # Examples
///
/// ```
/// use localfind::app::ScreenState;
/// use localfind::Config;
///
/// let mut state = ScreenState::new(Config::default());
/// state.set_query("plumber");
/// assert_eq!(state.filter.query, "plumber");
/// assert!(state.results.is_empty());
/// ```
#[derive(Debug)]
pub struct ScreenState {
    /// Candidate records delivered by the worker, untouched by filtering.
    ///
    /// Replaced wholesale when a fetch commits. The pipeline never mutates
    /// this list; `results` is always derived from it.
    pub candidates: Vec<Listing>,

    /// Active search/filter/sort selections.
    pub filter: FilterState,

    /// Pipeline output for the current candidates and filter.
    ///
    /// Recomputed by [`apply_pipeline`](Self::apply_pipeline) after every
    /// mutation that can change it.
    pub results: Vec<Listing>,

    /// Zero-based cursor within `results`. Clamped on every recompute.
    pub selected_index: usize,

    /// Current visual layout.
    pub layout: LayoutMode,

    /// Zero-based current page within `results`.
    pub page: usize,

    /// Progress of the most recent fetch.
    pub load_status: LoadStatus,

    /// Recent committed search terms for this screen.
    pub history: SearchHistory,

    /// Popular-term suggestions for the current query prefix.
    pub suggestions: Vec<String>,

    /// Generation number of the most recent fetch request.
    pub fetch_generation: u64,

    /// Per-screen configuration.
    pub config: Config,
}

impl ScreenState {
    /// Creates screen state with empty candidates and default filter.
    ///
    /// The candidate list stays empty until a worker response delivers data;
    /// history stays empty until the persisted array is loaded.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            candidates: Vec::new(),
            filter: FilterState::new(),
            results: Vec::new(),
            selected_index: 0,
            layout: LayoutMode::default(),
            page: 0,
            load_status: LoadStatus::Idle,
            history: SearchHistory::new(config.history_limit),
            suggestions: Vec::new(),
            fetch_generation: 0,
            config,
        }
    }

    /// Re-runs the filter-and-sort pipeline and clamps derived cursors.
    ///
    /// Called after every mutation that can change visible results: query or
    /// filter edits, committed fetches, history-driven query restoration.
    /// Keeps `selected_index` within `results` and `page` within the page
    /// count.
    pub fn apply_pipeline(&mut self) {
        let _span = tracing::debug_span!(
            "apply_pipeline",
            candidate_count = self.candidates.len(),
            query_len = self.filter.query.len()
        )
        .entered();

        self.results = pipeline::run(&self.candidates, &self.filter);

        if self.results.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.results.len() - 1);
        }

        let last_page = self.page_count().saturating_sub(1);
        self.page = self.page.min(last_page);

        tracing::debug!(result_count = self.results.len(), "pipeline reapplied");
    }

    /// Updates the free-text query, recomputing suggestions and results.
    pub fn set_query(&mut self, query: &str) {
        self.filter.set_query(query);
        self.suggestions = history::suggestions(
            &self.config.popular_terms,
            &self.filter.query,
            self.config.suggestion_limit,
        );
        self.apply_pipeline();
    }

    /// Commits the current query to history, returning whether it changed.
    ///
    /// The committed text is the trimmed query; empty commits are ignored by
    /// the history itself.
    pub fn commit_search(&mut self) -> bool {
        let query = self.filter.query.clone();
        let changed = self.history.commit(&query);
        if changed {
            tracing::debug!(term = %query.trim(), "search term committed");
        }
        changed
    }

    /// Moves the selection cursor down by one, wrapping to the top at the end.
    ///
    /// No-op when there are no results.
    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
        self.follow_selection();
    }

    /// Moves the selection cursor up by one, wrapping to the bottom at the top.
    ///
    /// No-op when there are no results.
    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
        self.follow_selection();
    }

    /// Returns the currently selected listing, if any result is visible.
    #[must_use]
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.results.get(self.selected_index)
    }

    /// Number of pages the current results span. At least 1.
    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.results.is_empty() {
            return 1;
        }
        let page_size = self.config.page_size.max(1);
        (self.results.len() + page_size - 1) / page_size
    }

    /// Advances to the next page if one exists.
    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            self.snap_selection_to_page();
        }
    }

    /// Returns to the previous page if one exists.
    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.snap_selection_to_page();
        }
    }

    /// Starts a new fetch, returning the generation token the request must carry.
    ///
    /// Every call supersedes all outstanding requests: their responses will
    /// fail the generation check and be dropped.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.load_status = LoadStatus::Loading;
        tracing::debug!(generation = self.fetch_generation, "fetch started");
        self.fetch_generation
    }

    /// Commits a completed fetch, returning whether it was current.
    ///
    /// A response whose generation does not match the latest request is
    /// stale: it is logged and dropped without touching state.
    pub fn complete_fetch(&mut self, generation: u64, listings: Vec<Listing>) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!(
                response_generation = generation,
                current_generation = self.fetch_generation,
                "dropping stale fetch response"
            );
            return false;
        }

        tracing::debug!(listing_count = listings.len(), "fetch committed");
        self.candidates = listings;
        self.load_status = LoadStatus::Loaded;
        self.apply_pipeline();
        true
    }

    /// Records a failed fetch, returning whether it was current.
    ///
    /// A current failure empties the candidate list and flips the load status
    /// to failed; projection surfaces this as the "unable to load" state.
    /// Stale failures are dropped like stale successes.
    pub fn fail_fetch(&mut self, generation: u64, message: &str) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!(
                response_generation = generation,
                current_generation = self.fetch_generation,
                "dropping stale fetch failure"
            );
            return false;
        }

        tracing::error!(error = %message, "candidate fetch failed");
        self.candidates = Vec::new();
        self.load_status = LoadStatus::Failed;
        self.apply_pipeline();
        true
    }

    /// Keeps the page showing the selection after cursor movement.
    fn follow_selection(&mut self) {
        let page_size = self.config.page_size.max(1);
        self.page = self.selected_index / page_size;
    }

    /// Keeps the selection on the page after page movement.
    fn snap_selection_to_page(&mut self) {
        let page_size = self.config.page_size.max(1);
        let first_on_page = self.page * page_size;
        if self.results.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = first_on_page.min(self.results.len() - 1);
        }
    }
}
