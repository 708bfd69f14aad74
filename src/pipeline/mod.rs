//! The pure filter-and-sort pipeline.
//!
//! This module is the single implementation of the narrowing-and-ordering
//! step every marketplace screen shares: given a full candidate list and a
//! [`FilterState`], produce the ordered sublist to display. The pipeline is
//! synchronous, side-effect-free, and never mutates its input: the same
//! state applied twice to the same candidates yields identical output.
//!
//! Screens differ only in their record type (jobs, rentals, products) and
//! their filter selections; both vary through the [`Searchable`] accessor
//! trait and the `FilterState` value, not through per-screen copies of this
//! logic.
//!
//! # Modules
//!
//! - [`filter`]: `FilterState` and predicate composition
//! - [`sort`]: `SortKey` and stable comparators
//!
//! # Example
//!
//! ```
//! use localfind::domain::Listing;
//! use localfind::pipeline::{self, FilterState};
//!
//! let mut plumber = Listing::new("j-1", "Plumber Job", 10);
//! plumber.price = Some(500.0);
//! let mut electrician = Listing::new("j-2", "Electrician Gig", 20);
//! electrician.price = Some(1200.0);
//!
//! let candidates = vec![plumber, electrician];
//! let mut filter = FilterState::new();
//! filter.set_query("job");
//!
//! let results = pipeline::run(&candidates, &filter);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Plumber Job");
//! ```

pub mod filter;
pub mod sort;

pub use filter::{FilterFlag, FilterState};
pub use sort::SortKey;

use crate::domain::Searchable;

/// Runs the filter-and-sort pipeline over a candidate list.
///
/// Narrows the candidates to the records passing every active filter
/// dimension, then orders the remainder with the state's sort key. Returns a
/// new vector; the input slice is never reordered or modified.
///
/// Malformed records (missing optional fields) flow through without error:
/// each filter dimension has a defined behavior for an absent field, and the
/// comparators fall back to neutral values.
#[must_use]
pub fn run<T: Searchable + Clone>(candidates: &[T], filter: &FilterState) -> Vec<T> {
    let _span = tracing::debug_span!(
        "pipeline_run",
        candidate_count = candidates.len(),
        query_len = filter.query.len(),
        sort = ?filter.sort
    )
    .entered();

    let mut results: Vec<T> = candidates
        .iter()
        .filter(|record| filter.matches(*record))
        .cloned()
        .collect();

    sort::apply(&mut results, filter.sort, &filter.query);

    tracing::debug!(result_count = results.len(), "pipeline applied");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;

    fn sample_candidates() -> Vec<Listing> {
        let mut plumber = Listing::new("j-1", "Plumber Job", 100);
        plumber.price = Some(500.0);
        let mut electrician = Listing::new("j-2", "Electrician Gig", 200);
        electrician.price = Some(1200.0);
        vec![plumber, electrician]
    }

    #[test]
    fn empty_filter_returns_input_sorted_newest_first() {
        let candidates = sample_candidates();
        let results = run(&candidates, &FilterState::new());
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["j-2", "j-1"]);
    }

    #[test]
    fn query_narrows_to_matching_records_only() {
        let candidates = sample_candidates();
        let mut filter = FilterState::new();
        filter.set_query("job");

        let results = run(&candidates, &filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Plumber Job");
        assert_eq!(results[0].price, Some(500.0));
    }

    #[test]
    fn pipeline_never_mutates_its_input() {
        let candidates = sample_candidates();
        let snapshot = candidates.clone();

        let mut filter = FilterState::new();
        filter.set_sort(SortKey::PriceDesc);
        let _ = run(&candidates, &filter);

        assert_eq!(candidates, snapshot);
    }

    #[test]
    fn same_filter_applied_twice_yields_identical_output() {
        let candidates = sample_candidates();
        let mut filter = FilterState::new();
        filter.set_query("e");
        filter.set_sort(SortKey::PriceAsc);

        let first = run(&candidates, &filter);
        let second = run(&candidates, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn range_filter_composes_with_sort() {
        let mut candidates = sample_candidates();
        let mut unpriced = Listing::new("j-3", "Volunteer Job", 300);
        unpriced.price = None;
        candidates.push(unpriced);

        let mut filter = FilterState::new();
        filter.set_price_range(Some(100.0), Some(2000.0));
        filter.set_sort(SortKey::PriceAsc);

        let results = run(&candidates, &filter);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["j-1", "j-2"]);
    }
}
