//! View model types representing renderable screen state.
//!
//! This module defines immutable view models computed from screen state.
//! View models are optimized for rendering and contain pre-computed display
//! information (formatted labels, highlight ranges, pagination) with no
//! business logic. The host's rendering layer consumes them verbatim,
//! whatever its widget toolkit.

use crate::app::LayoutMode;

/// Complete view model for one search screen frame.
///
/// Contains everything a renderer needs: result rows shaped for the active
/// layout, header and search-bar info, pagination, and the empty state when
/// there is nothing to show. Computed from `ScreenState`, never mutated.
#[derive(Debug, Clone)]
pub struct ResultsViewModel {
    /// Result rows for the current page, shaped by the layout.
    ///
    /// List layout yields one item per row; grid layout yields up to the
    /// configured column count per row.
    pub rows: Vec<Vec<DisplayItem>>,

    /// Layout the rows were shaped for.
    pub layout: LayoutMode,

    /// Header information (title, result count).
    pub header: HeaderInfo,

    /// Search bar state (query, suggestions, recent searches).
    pub search_bar: SearchBarInfo,

    /// Pagination window over the full result list.
    pub pagination: PageInfo,

    /// Empty state message when no results are visible.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single listing.
///
/// Represents one cell in the result grid or one row in the list. Labels are
/// pre-formatted so rendering is pure string placement.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// Listing identifier, used as the render key and navigation target.
    pub id: String,

    /// Display title, truncated to the display budget.
    pub title: String,

    /// Secondary line: location and/or provider.
    pub subtitle: String,

    /// Formatted price, "—" when the listing has none.
    pub price_label: String,

    /// Humanized creation time (e.g. "3h ago").
    pub posted_label: String,

    /// Whether the listing is featured/promoted.
    pub is_featured: bool,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Byte range of the first query match in `title`, for highlight rendering.
    pub highlight_range: Option<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. " Jobs (12) ".
    pub title: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,

    /// Popular-term suggestions for the typed prefix.
    pub suggestions: Vec<String>,

    /// Recent committed searches, most recent first.
    pub recent: Vec<String>,
}

/// Pagination window over the full result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Zero-based current page.
    pub page: usize,

    /// Total number of pages (at least 1).
    pub total_pages: usize,

    /// Total number of results across all pages.
    pub total_results: usize,

    /// Whether a previous page exists.
    pub has_prev: bool,

    /// Whether a next page exists.
    pub has_next: bool,
}

/// Empty state message display information.
///
/// Shown when the current page has no items. The message distinguishes a
/// fetch in flight, a failed fetch, an unmatched query, and a genuinely
/// empty screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g. "No results for \"plumber\"").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

impl EmptyState {
    /// Empty state for a fetch in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            message: "Loading listings…".to_string(),
            subtitle: "Hang tight while we fetch the latest results".to_string(),
        }
    }

    /// Empty state for a failed fetch.
    #[must_use]
    pub fn load_failed() -> Self {
        Self {
            message: "Unable to load listings".to_string(),
            subtitle: "Check your connection and pull to refresh".to_string(),
        }
    }

    /// Empty state for a query that matched nothing.
    #[must_use]
    pub fn no_matches(query: &str) -> Self {
        Self {
            message: format!("No results for \"{}\"", query.trim()),
            subtitle: "Try a different search or clear some filters".to_string(),
        }
    }

    /// Empty state for a screen with no listings at all.
    #[must_use]
    pub fn no_listings() -> Self {
        Self {
            message: "Nothing here yet".to_string(),
            subtitle: "New listings will appear as providers post them".to_string(),
        }
    }
}
