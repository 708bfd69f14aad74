//! Integration tests for the localfind engine.
//!
//! These tests verify end-to-end behavior by wiring a real screen state, a
//! worker with a JSON-file storage backend in a temporary directory, and the
//! event handler, then driving complete user flows through them the way a
//! host runtime would.

use localfind::app::{handle_event, Action, Event, ScreenState};
use localfind::domain::Listing;
use localfind::history::HistoryStore;
use localfind::storage::JsonFileStorage;
use localfind::worker::{SearchWorker, StaticSource};
use localfind::Config;
use std::path::Path;

/// Builds a worker whose history persists to `storage.json` under `dir`.
fn worker_with(dir: &Path, listings: Vec<Listing>, key: &str) -> SearchWorker {
    let storage = JsonFileStorage::new(dir.join("storage.json")).unwrap();
    SearchWorker::new(
        Box::new(StaticSource::new(listings)),
        HistoryStore::new(Box::new(storage), key),
    )
}

/// Executes handler actions the way a host runtime would: worker messages go
/// to the worker and each response is fed back through the handler. Returns
/// the navigation targets encountered.
fn execute_actions(
    state: &mut ScreenState,
    worker: &mut SearchWorker,
    actions: Vec<Action>,
) -> Vec<String> {
    let mut opened = Vec::new();
    for action in actions {
        match action {
            Action::PostToWorker(message) => {
                let response = worker.handle_message(message);
                let (_, follow_ups) =
                    handle_event(state, &Event::WorkerResponse(response)).unwrap();
                opened.extend(execute_actions(state, worker, follow_ups));
            }
            Action::OpenListing { id } => opened.push(id),
        }
    }
    opened
}

/// Drives one event end-to-end, executing any emitted actions.
fn drive(state: &mut ScreenState, worker: &mut SearchWorker, event: &Event) -> Vec<String> {
    let (_, actions) = handle_event(state, event).unwrap();
    execute_actions(state, worker, actions)
}

fn sample_listings() -> Vec<Listing> {
    let mut plumber = Listing::new("j-1", "Plumber Job", 100);
    plumber.price = Some(500.0);
    plumber.category = Some("trades".to_string());

    let mut electrician = Listing::new("j-2", "Electrician Gig", 200);
    electrician.price = Some(1200.0);
    electrician.category = Some("trades".to_string());

    let mut cleaner = Listing::new("j-3", "House Cleaning", 300);
    cleaner.price = Some(80.0);
    cleaner.category = Some("home".to_string());

    vec![plumber, electrician, cleaner]
}

#[test]
fn mount_loads_candidates_and_search_narrows_them() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = worker_with(dir.path(), sample_listings(), "search_history_jobs");
    let mut state = localfind::initialize(&Config::default());

    drive(&mut state, &mut worker, &Event::ScreenMounted);
    assert_eq!(state.candidates.len(), 3);
    // Default sort is newest-first.
    assert_eq!(state.results[0].id, "j-3");

    drive(
        &mut state,
        &mut worker,
        &Event::QueryChanged("job".to_string()),
    );
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].title, "Plumber Job");
}

#[test]
fn committed_searches_survive_a_screen_remount() {
    let dir = tempfile::tempdir().unwrap();
    let key = "search_history_jobs";

    {
        let mut worker = worker_with(dir.path(), sample_listings(), key);
        let mut state = localfind::initialize(&Config::default());
        drive(&mut state, &mut worker, &Event::ScreenMounted);

        drive(
            &mut state,
            &mut worker,
            &Event::QueryChanged("plumber".to_string()),
        );
        drive(&mut state, &mut worker, &Event::SubmitSearch);
        drive(
            &mut state,
            &mut worker,
            &Event::QueryChanged("cleaning".to_string()),
        );
        drive(&mut state, &mut worker, &Event::SubmitSearch);
    }

    // Fresh screen and worker over the same storage file.
    let mut worker = worker_with(dir.path(), sample_listings(), key);
    let mut state = localfind::initialize(&Config::default());
    drive(&mut state, &mut worker, &Event::ScreenMounted);

    assert_eq!(state.history.entries(), ["cleaning", "plumber"]);
}

#[test]
fn history_caps_at_ten_most_recent_entries() {
    let dir = tempfile::tempdir().unwrap();
    let key = "search_history_jobs";
    let mut worker = worker_with(dir.path(), vec![], key);
    let mut state = localfind::initialize(&Config::default());
    drive(&mut state, &mut worker, &Event::ScreenMounted);

    for i in 1..=11 {
        drive(
            &mut state,
            &mut worker,
            &Event::QueryChanged(format!("term-{i}")),
        );
        drive(&mut state, &mut worker, &Event::SubmitSearch);
    }

    // The persisted array holds the ten most recent, most-recent-first.
    let storage = JsonFileStorage::new(dir.path().join("storage.json")).unwrap();
    let raw = localfind::storage::KeyValueStorage::get_item(&storage, key)
        .unwrap()
        .unwrap();
    let persisted: Vec<String> = serde_json::from_str(&raw).unwrap();

    assert_eq!(persisted.len(), 10);
    assert_eq!(persisted[0], "term-11");
    assert_eq!(persisted[9], "term-2");
    assert!(!persisted.contains(&"term-1".to_string()));
}

#[test]
fn clear_history_removes_the_persisted_key() {
    let dir = tempfile::tempdir().unwrap();
    let key = "search_history_jobs";
    let mut worker = worker_with(dir.path(), vec![], key);
    let mut state = localfind::initialize(&Config::default());
    drive(&mut state, &mut worker, &Event::ScreenMounted);

    drive(
        &mut state,
        &mut worker,
        &Event::QueryChanged("plumber".to_string()),
    );
    drive(&mut state, &mut worker, &Event::SubmitSearch);
    drive(&mut state, &mut worker, &Event::ClearHistory);

    assert!(state.history.is_empty());

    let storage = JsonFileStorage::new(dir.path().join("storage.json")).unwrap();
    assert!(localfind::storage::KeyValueStorage::get_item(&storage, key)
        .unwrap()
        .is_none());
}

#[test]
fn superseded_fetch_cannot_overwrite_the_latest_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = worker_with(dir.path(), sample_listings(), "search_history_jobs");
    let mut state = localfind::initialize(&Config::default());

    // Two refreshes race: hold both fetch actions, deliver them out of order.
    let (_, first_actions) = handle_event(&mut state, &Event::Refresh).unwrap();
    let (_, second_actions) = handle_event(&mut state, &Event::Refresh).unwrap();

    execute_actions(&mut state, &mut worker, second_actions);
    assert_eq!(state.candidates.len(), 3);

    // The older response arrives last and must be dropped.
    execute_actions(&mut state, &mut worker, first_actions);
    assert_eq!(state.candidates.len(), 3);
    assert_eq!(state.load_status, localfind::LoadStatus::Loaded);
}

#[test]
fn filter_sort_and_open_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = worker_with(dir.path(), sample_listings(), "search_history_jobs");
    let mut state = localfind::initialize(&Config::default());
    drive(&mut state, &mut worker, &Event::ScreenMounted);

    drive(
        &mut state,
        &mut worker,
        &Event::CategoryToggled("trades".to_string()),
    );
    drive(
        &mut state,
        &mut worker,
        &Event::SortSelected(localfind::SortKey::PriceAsc),
    );

    let prices: Vec<f64> = state.results.iter().filter_map(|r| r.price).collect();
    assert_eq!(prices, vec![500.0, 1200.0]);

    // Open the cheaper one.
    let opened = drive(&mut state, &mut worker, &Event::OpenSelected);
    assert_eq!(opened, vec!["j-1".to_string()]);

    // Resetting filters restores the full set but keeps the (empty) query.
    drive(&mut state, &mut worker, &Event::FiltersReset);
    assert_eq!(state.results.len(), 3);
}

#[test]
fn viewmodel_reflects_a_full_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = worker_with(dir.path(), sample_listings(), "search_history_jobs");
    let mut state = localfind::initialize(&Config {
        screen_title: "Jobs".to_string(),
        popular_terms: vec!["plumbing".to_string()],
        ..Config::default()
    });
    drive(&mut state, &mut worker, &Event::ScreenMounted);

    drive(
        &mut state,
        &mut worker,
        &Event::QueryChanged("plumb".to_string()),
    );

    let vm = localfind::ui::compute_viewmodel(&state);
    assert_eq!(vm.header.title, " Jobs (1) ");
    assert_eq!(vm.search_bar.suggestions, vec!["plumbing"]);
    assert_eq!(vm.rows.len(), 1);
    assert!(vm.rows[0][0].highlight_range.is_some());
}
