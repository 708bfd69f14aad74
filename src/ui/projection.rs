//! View model computation from screen state.
//!
//! This module transforms a [`ScreenState`] into a renderable
//! [`ResultsViewModel`]: windowing the results to the current page, shaping
//! rows for the active layout, pre-formatting labels, computing query
//! highlight ranges, and selecting the right empty state. The projection is
//! pure: given the same state it produces the same view model, and toggling
//! the layout mode neither refetches nor resorts anything.

use crate::app::{LayoutMode, LoadStatus, ScreenState};
use crate::domain::{Listing, Searchable};
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, HeaderInfo, PageInfo, ResultsViewModel, SearchBarInfo,
};

/// Character budget for display titles before truncation.
const TITLE_DISPLAY_WIDTH: usize = 35;

/// Computes the renderable view model for the current frame.
///
/// # Windowing
///
/// Only the current page's slice of the pipeline results is projected. Page
/// bounds come from the screen's configuration; the state keeps the page and
/// selection clamped, so the slice arithmetic here cannot go out of range.
///
/// # Example
///
/// ```
/// use localfind::app::ScreenState;
/// use localfind::ui::compute_viewmodel;
/// use localfind::Config;
///
/// let state = ScreenState::new(Config::default());
/// let vm = compute_viewmodel(&state);
/// assert!(vm.rows.is_empty());
/// assert!(vm.empty_state.is_some());
/// ```
#[must_use]
pub fn compute_viewmodel(state: &ScreenState) -> ResultsViewModel {
    let _span = tracing::debug_span!(
        "compute_viewmodel",
        result_count = state.results.len(),
        layout = ?state.layout,
        page = state.page
    )
    .entered();

    let page_size = state.config.page_size.max(1);
    let total_pages = state.page_count();

    let start = state.page * page_size;
    let end = (start + page_size).min(state.results.len());
    let page_slice = if start < state.results.len() {
        &state.results[start..end]
    } else {
        &[]
    };

    let items: Vec<DisplayItem> = page_slice
        .iter()
        .enumerate()
        .map(|(offset, listing)| {
            let absolute_index = start + offset;
            compute_display_item(state, listing, absolute_index)
        })
        .collect();

    let columns = match state.layout {
        LayoutMode::List => 1,
        LayoutMode::Grid => state.config.grid_columns.max(1),
    };
    let rows: Vec<Vec<DisplayItem>> = items
        .chunks(columns)
        .map(<[DisplayItem]>::to_vec)
        .collect();

    ResultsViewModel {
        rows,
        layout: state.layout,
        header: compute_header(state),
        search_bar: compute_search_bar(state),
        pagination: PageInfo {
            page: state.page,
            total_pages,
            total_results: state.results.len(),
            has_prev: state.page > 0,
            has_next: state.page + 1 < total_pages,
        },
        empty_state: compute_empty_state(state),
    }
}

/// Projects one listing into its display item.
///
/// Handles title truncation, subtitle assembly from location and provider,
/// label formatting, and the query highlight range.
fn compute_display_item(state: &ScreenState, listing: &Listing, absolute_index: usize) -> DisplayItem {
    let title = truncate_title(listing.title());

    let subtitle = match (listing.location(), listing.provider()) {
        (Some(location), Some(provider)) => format!("{location} · {provider}"),
        (Some(location), None) => location.to_string(),
        (None, Some(provider)) => provider.to_string(),
        (None, None) => String::new(),
    };

    DisplayItem {
        id: listing.id.clone(),
        highlight_range: highlight_range(&title, &state.filter.query),
        title,
        subtitle,
        price_label: listing.price_label(),
        posted_label: listing.posted_ago(),
        is_featured: listing.featured,
        is_selected: absolute_index == state.selected_index,
    }
}

/// Truncates a title to the display budget, appending an ellipsis.
///
/// Cuts on a character boundary so multi-byte titles cannot split a code
/// point.
fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_DISPLAY_WIDTH {
        return title.to_string();
    }

    let kept: String = title.chars().take(TITLE_DISPLAY_WIDTH - 3).collect();
    format!("{kept}...")
}

/// Finds the byte range of the first case-insensitive query occurrence.
///
/// Searches the display title (post-truncation) so the range is valid for
/// the string the renderer actually shows. Returns `None` for an empty query,
/// no occurrence, or when case folding shifted byte offsets such that the
/// range no longer lands on character boundaries.
fn highlight_range(title: &str, query: &str) -> Option<(usize, usize)> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let haystack = title.to_lowercase();
    let start = haystack.find(&needle)?;
    let end = start + needle.len();

    if title.is_char_boundary(start) && title.is_char_boundary(end) {
        Some((start, end))
    } else {
        None
    }
}

/// Computes header text with the current result count.
fn compute_header(state: &ScreenState) -> HeaderInfo {
    HeaderInfo {
        title: format!(" {} ({}) ", state.config.screen_title, state.results.len()),
    }
}

/// Computes search bar state: query, suggestions, recent searches.
fn compute_search_bar(state: &ScreenState) -> SearchBarInfo {
    SearchBarInfo {
        query: state.filter.query.clone(),
        suggestions: state.suggestions.clone(),
        recent: state.history.entries().to_vec(),
    }
}

/// Selects the empty state for a page with no visible results.
///
/// Priority order: failed fetch, fetch in flight, unmatched active query,
/// genuinely empty screen. A page with results has no empty state.
fn compute_empty_state(state: &ScreenState) -> Option<EmptyState> {
    if !state.results.is_empty() {
        return None;
    }

    match state.load_status {
        LoadStatus::Failed => Some(EmptyState::load_failed()),
        LoadStatus::Loading => Some(EmptyState::loading()),
        _ if !state.filter.query.trim().is_empty() => {
            Some(EmptyState::no_matches(&state.filter.query))
        }
        _ => Some(EmptyState::no_listings()),
    }
}
