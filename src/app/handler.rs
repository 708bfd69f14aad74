//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input
//! and worker responses, translating them into state changes and action
//! sequences. It is the primary control flow coordinator for a search screen.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host UI or the background worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`ScreenState`] methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Query**: `QueryChanged`, `SubmitSearch`, `SuggestionPicked`, `ClearHistory`
//! - **Filters**: `CategoryToggled`, `KindToggled`, `PriceRangeSet`,
//!   `FlagToggled`, `SortSelected`, `FiltersReset`
//! - **Display**: `LayoutToggled`, `NextPage`, `PrevPage`, `KeyDown`, `KeyUp`
//! - **Lifecycle**: `ScreenMounted`, `Refresh`, `OpenSelected`
//! - **Worker**: `WorkerResponse` with typed message variants

use crate::app::{Action, ScreenState};
use crate::domain::error::Result;
use crate::pipeline::{FilterFlag, SortKey};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The screen became visible; load persisted history and fetch candidates.
    ScreenMounted,

    /// The free-text query changed (typically per keystroke).
    QueryChanged(String),

    /// The user explicitly submitted the current query.
    SubmitSearch,

    /// The user tapped a typing suggestion, adopting and submitting it.
    SuggestionPicked(String),

    /// The user cleared the recent-search list.
    ClearHistory,

    /// A category chip was toggled (single-select: re-toggle clears).
    CategoryToggled(String),

    /// A kind chip was toggled (multi-select membership).
    KindToggled(String),

    /// The price range inputs were applied.
    PriceRangeSet {
        /// Lower bound, `None` for unbounded.
        min: Option<f64>,
        /// Upper bound, `None` for unbounded.
        max: Option<f64>,
    },

    /// A boolean filter was toggled.
    FlagToggled(FilterFlag),

    /// A sort option was selected.
    SortSelected(SortKey),

    /// All filters were reset to defaults (query kept).
    FiltersReset,

    /// The layout switch was pressed.
    LayoutToggled,

    /// Advance to the next result page.
    NextPage,

    /// Return to the previous result page.
    PrevPage,

    /// Moves the selection cursor down by one position (wraps to top).
    KeyDown,

    /// Moves the selection cursor up by one position (wraps to bottom).
    KeyUp,

    /// Opens the currently selected listing.
    OpenSelected,

    /// Requests a fresh candidate fetch.
    Refresh,

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates screen state, and returns actions to execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects. It pattern-matches on event types, calls state mutation
/// methods, and collects actions to be executed by the host runtime.
///
/// # Returns
///
/// A `(redraw, actions)` pair: whether the visible state changed, plus the
/// side effects to run. The action list is often empty; most events are pure
/// state mutations.
///
/// # Errors
///
/// Reserved for state mutations that can fail; every current arm is
/// infallible and returns `Ok`.
///
/// # Tracing
///
/// Each call creates a debug-level span carrying the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut ScreenState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::ScreenMounted => {
            let generation = state.begin_fetch();
            let query = state.filter.query.clone();
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::load_history()),
                    Action::PostToWorker(WorkerMessage::fetch_listings(generation, query)),
                ],
            ))
        }
        Event::QueryChanged(query) => {
            state.set_query(query);
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if state.commit_search() {
                let entries = state.history.entries().to_vec();
                Ok((
                    true,
                    vec![Action::PostToWorker(WorkerMessage::persist_history(entries))],
                ))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::SuggestionPicked(term) => {
            state.set_query(term);
            let mut actions = vec![];
            if state.commit_search() {
                let entries = state.history.entries().to_vec();
                actions.push(Action::PostToWorker(WorkerMessage::persist_history(entries)));
            }
            Ok((true, actions))
        }
        Event::ClearHistory => {
            state.history.clear();
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::clear_history())],
            ))
        }
        Event::CategoryToggled(category) => {
            state.filter.toggle_category(category);
            state.apply_pipeline();
            Ok((true, vec![]))
        }
        Event::KindToggled(kind) => {
            state.filter.toggle_kind(kind);
            state.apply_pipeline();
            Ok((true, vec![]))
        }
        Event::PriceRangeSet { min, max } => {
            state.filter.set_price_range(*min, *max);
            state.apply_pipeline();
            Ok((true, vec![]))
        }
        Event::FlagToggled(flag) => {
            state.filter.toggle_flag(*flag);
            state.apply_pipeline();
            Ok((true, vec![]))
        }
        Event::SortSelected(sort) => {
            state.filter.set_sort(*sort);
            state.apply_pipeline();
            Ok((true, vec![]))
        }
        Event::FiltersReset => {
            state.filter.reset();
            state.apply_pipeline();
            Ok((true, vec![]))
        }
        // Layout only reshapes rows; results are deliberately left untouched.
        Event::LayoutToggled => {
            state.layout = state.layout.toggled();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            state.next_page();
            Ok((true, vec![]))
        }
        Event::PrevPage => {
            state.prev_page();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            state.selected_listing().map_or_else(
                || {
                    tracing::debug!("no listing selected");
                    Ok((false, vec![]))
                },
                |listing| {
                    tracing::debug!(listing_id = %listing.id, "opening listing");
                    Ok((
                        false,
                        vec![Action::OpenListing {
                            id: listing.id.clone(),
                        }],
                    ))
                },
            )
        }
        Event::Refresh => {
            let generation = state.begin_fetch();
            let query = state.filter.query.clone();
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::fetch_listings(
                    generation, query,
                ))],
            ))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Applies a worker response to screen state.
///
/// Stale fetch responses (generation mismatch) are dropped without a redraw;
/// history acknowledgements never require one.
fn handle_worker_response(
    state: &mut ScreenState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::ListingsFetched {
            generation,
            listings,
        } => {
            let committed = state.complete_fetch(*generation, listings.clone());
            Ok((committed, vec![]))
        }
        WorkerResponse::FetchFailed {
            generation,
            message,
        } => {
            let current = state.fail_fetch(*generation, message);
            Ok((current, vec![]))
        }
        WorkerResponse::HistoryLoaded { entries } => {
            state.history.replace(entries.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::HistoryPersisted { .. } | WorkerResponse::HistoryCleared => {
            Ok((false, vec![]))
        }
        WorkerResponse::Error { message } => {
            tracing::error!("worker error: {}", message);
            Ok((false, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;
    use crate::Config;

    fn mounted_state() -> ScreenState {
        let mut state = ScreenState::new(Config::default());
        let (_, actions) = handle_event(&mut state, &Event::ScreenMounted).unwrap();
        assert_eq!(actions.len(), 2);
        state
    }

    fn deliver(state: &mut ScreenState, listings: Vec<Listing>) {
        let generation = state.fetch_generation;
        let event = Event::WorkerResponse(WorkerResponse::ListingsFetched {
            generation,
            listings,
        });
        handle_event(state, &event).unwrap();
    }

    #[test]
    fn mount_requests_history_and_candidates() {
        let mut state = ScreenState::new(Config::default());
        let (redraw, actions) = handle_event(&mut state, &Event::ScreenMounted).unwrap();

        assert!(redraw);
        assert!(matches!(
            actions[0],
            Action::PostToWorker(WorkerMessage::LoadHistory { .. })
        ));
        assert!(matches!(
            actions[1],
            Action::PostToWorker(WorkerMessage::FetchListings { .. })
        ));
    }

    #[test]
    fn submit_search_persists_deduplicated_history() {
        let mut state = mounted_state();

        handle_event(&mut state, &Event::QueryChanged("cleaning".to_string())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert_eq!(actions.len(), 1);

        // Submitting the same term again changes nothing and persists nothing.
        let (redraw, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
        assert_eq!(state.history.entries(), ["cleaning"]);
    }

    #[test]
    fn clear_history_empties_memory_and_posts_delete() {
        let mut state = mounted_state();
        handle_event(&mut state, &Event::QueryChanged("plumber".to_string())).unwrap();
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        let (redraw, actions) = handle_event(&mut state, &Event::ClearHistory).unwrap();
        assert!(redraw);
        assert!(state.history.is_empty());
        assert!(matches!(
            actions[0],
            Action::PostToWorker(WorkerMessage::ClearHistory { .. })
        ));
    }

    #[test]
    fn stale_fetch_response_is_ignored_without_redraw() {
        let mut state = mounted_state();
        let stale_generation = state.fetch_generation;

        // A refresh supersedes the mount-time fetch.
        handle_event(&mut state, &Event::Refresh).unwrap();

        let event = Event::WorkerResponse(WorkerResponse::ListingsFetched {
            generation: stale_generation,
            listings: vec![Listing::new("stale", "Stale", 0)],
        });
        let (redraw, _) = handle_event(&mut state, &event).unwrap();
        assert!(!redraw);
        assert!(state.candidates.is_empty());
    }

    #[test]
    fn fetch_failure_flags_the_screen() {
        let mut state = mounted_state();
        let generation = state.fetch_generation;

        let event = Event::WorkerResponse(WorkerResponse::FetchFailed {
            generation,
            message: "connection refused".to_string(),
        });
        let (redraw, _) = handle_event(&mut state, &event).unwrap();
        assert!(redraw);
        assert_eq!(state.load_status, crate::app::LoadStatus::Failed);
    }

    #[test]
    fn layout_toggle_keeps_result_order() {
        let mut state = mounted_state();
        deliver(
            &mut state,
            vec![
                Listing::new("a", "A", 3),
                Listing::new("b", "B", 2),
                Listing::new("c", "C", 1),
            ],
        );
        let before: Vec<String> = state.results.iter().map(|r| r.id.clone()).collect();

        handle_event(&mut state, &Event::LayoutToggled).unwrap();
        let after: Vec<String> = state.results.iter().map(|r| r.id.clone()).collect();

        assert_eq!(before, after);
        assert_eq!(state.layout, crate::app::LayoutMode::Grid);
    }

    #[test]
    fn open_selected_emits_navigation_with_the_listing_id() {
        let mut state = mounted_state();
        deliver(&mut state, vec![Listing::new("job-7", "Plumber Job", 0)]);

        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenListing {
                id: "job-7".to_string()
            }]
        );
    }

    #[test]
    fn open_selected_without_results_is_inert() {
        let mut state = mounted_state();
        let (redraw, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
    }

    #[test]
    fn history_loaded_replaces_the_in_memory_list() {
        let mut state = mounted_state();
        let event = Event::WorkerResponse(WorkerResponse::HistoryLoaded {
            entries: vec!["plumber".to_string(), "cleaning".to_string()],
        });
        handle_event(&mut state, &event).unwrap();
        assert_eq!(state.history.entries(), ["plumber", "cleaning"]);
    }
}
