//! Filter state and predicate composition.
//!
//! This module defines [`FilterState`], the active search/filter/sort selection
//! for one screen, and the predicate logic that decides whether a record passes
//! it. Every dimension composes with AND: a record must pass the text match,
//! the category match, the kind match, the price range, and every set flag.
//!
//! An unset dimension matches everything, so the empty `FilterState` is the
//! identity filter. There are no transition constraints between fields; this
//! is flat key-value state that any setter may change at any time.

use crate::domain::Searchable;
use crate::pipeline::sort::SortKey;
use serde::{Deserialize, Serialize};

/// Sentinel category value that clears the category filter.
///
/// Screens render an "All" chip alongside the real categories; selecting it
/// must behave exactly like having no category filter.
const CATEGORY_ALL: &str = "all";

/// Boolean filter dimensions.
///
/// Each flag, when toggled on, admits only records with the corresponding
/// field set. A flag that is off does not filter on that dimension at all
/// (it never *excludes* available or featured records).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterFlag {
    /// Only records whose availability flag is true.
    Available,
    /// Only remote-friendly records (job screens).
    Remote,
    /// Only featured records.
    Featured,
}

/// The active query: free text, discrete filters, and the sort key.
///
/// Created with empty defaults on screen mount, mutated by user interaction,
/// and discarded on unmount. Only the committed search text outlives it, via
/// the search history. Serializes so it can travel inside worker messages.
///
/// # Invariant
///
/// When both price bounds are present, `price_min <= price_max`. The setter
/// enforces this by swapping a reversed pair and clamping negative bounds to
/// zero, so the invariant holds for every reachable state.
///
/// # Examples
///
/// ```
/// use localfind::pipeline::FilterState;
///
/// let mut filter = FilterState::new();
/// filter.set_query("plumber");
/// filter.set_price_range(Some(300.0), Some(100.0));
/// assert_eq!(filter.price_min, Some(100.0));
/// assert_eq!(filter.price_max, Some(300.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text query, matched case-insensitively as a substring.
    pub query: String,

    /// Single-select category filter. `None` matches every category.
    pub category: Option<String>,

    /// Multi-select kind filter. Empty matches every kind.
    pub kinds: Vec<String>,

    /// Lower price bound. `None` is unbounded below.
    pub price_min: Option<f64>,

    /// Upper price bound. `None` is unbounded above.
    pub price_max: Option<f64>,

    /// Admit only available records when true.
    pub available_only: bool,

    /// Admit only remote-friendly records when true.
    pub remote_only: bool,

    /// Admit only featured records when true.
    pub featured_only: bool,

    /// Active sort key.
    pub sort: SortKey,
}

impl FilterState {
    /// Creates a filter with empty defaults: no text, no discrete filters,
    /// newest-first sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Toggles the single-select category filter.
    ///
    /// Selecting the category that is already active clears it, and the
    /// sentinel value `"all"` (case-insensitive) always clears it, so an
    /// unrecognized "match everything" chip cannot leak into the state.
    pub fn toggle_category(&mut self, category: &str) {
        if category.eq_ignore_ascii_case(CATEGORY_ALL) {
            self.category = None;
            return;
        }

        let already_active = self
            .category
            .as_deref()
            .is_some_and(|current| current.eq_ignore_ascii_case(category));

        if already_active {
            self.category = None;
        } else {
            self.category = Some(category.to_string());
        }
    }

    /// Toggles one kind in the multi-select kind filter.
    ///
    /// Kinds accumulate (a record passes if its kind is any selected one);
    /// toggling a selected kind removes it.
    pub fn toggle_kind(&mut self, kind: &str) {
        if let Some(position) = self
            .kinds
            .iter()
            .position(|k| k.eq_ignore_ascii_case(kind))
        {
            self.kinds.remove(position);
        } else {
            self.kinds.push(kind.to_string());
        }
    }

    /// Sets the price range, validating at the boundary.
    ///
    /// Negative bounds are clamped to zero and a reversed pair is stored
    /// swapped, so `price_min <= price_max` holds whenever both are present.
    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) {
        let min = min.map(|v| v.max(0.0));
        let max = max.map(|v| v.max(0.0));

        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => {
                tracing::debug!(min = lo, max = hi, "reversed price range, swapping");
                self.price_min = Some(hi);
                self.price_max = Some(lo);
            }
            _ => {
                self.price_min = min;
                self.price_max = max;
            }
        }
    }

    /// Toggles one boolean filter dimension.
    pub fn toggle_flag(&mut self, flag: FilterFlag) {
        match flag {
            FilterFlag::Available => self.available_only = !self.available_only,
            FilterFlag::Remote => self.remote_only = !self.remote_only,
            FilterFlag::Featured => self.featured_only = !self.featured_only,
        }
    }

    /// Selects the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Restores every filter field to its default, leaving the text query untouched.
    pub fn reset(&mut self) {
        let query = std::mem::take(&mut self.query);
        *self = Self::default();
        self.query = query;
    }

    /// Decides whether a record passes every active filter dimension.
    ///
    /// # Matching rules
    ///
    /// - **Text**: case-insensitive substring against title, description,
    ///   location, and provider; an empty or whitespace query matches all.
    /// - **Category**: case-insensitive equality; absent filter matches all.
    ///   An unrecognized category on the record simply never matches.
    /// - **Kind**: membership in the selected kind set; empty set matches all.
    /// - **Price**: within `[price_min, price_max]`, either bound unbounded
    ///   when unset; a record without a price is excluded whenever any bound
    ///   is set.
    /// - **Flags**: each active flag requires the record's field to be true.
    #[must_use]
    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        self.matches_text(record)
            && self.matches_category(record)
            && self.matches_kind(record)
            && self.matches_price(record)
            && self.matches_flags(record)
    }

    fn matches_text<T: Searchable>(&self, record: &T) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let scanned = [
            Some(record.title()),
            Some(record.description()),
            record.location(),
            record.provider(),
        ];

        scanned
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category<T: Searchable>(&self, record: &T) -> bool {
        self.category.as_deref().map_or(true, |wanted| {
            record
                .category()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted))
        })
    }

    fn matches_kind<T: Searchable>(&self, record: &T) -> bool {
        if self.kinds.is_empty() {
            return true;
        }

        record.kind().is_some_and(|kind| {
            self.kinds.iter().any(|k| k.eq_ignore_ascii_case(kind))
        })
    }

    fn matches_price<T: Searchable>(&self, record: &T) -> bool {
        if self.price_min.is_none() && self.price_max.is_none() {
            return true;
        }

        let Some(price) = record.price() else {
            return false;
        };

        self.price_min.map_or(true, |lo| price >= lo)
            && self.price_max.map_or(true, |hi| price <= hi)
    }

    fn matches_flags<T: Searchable>(&self, record: &T) -> bool {
        (!self.available_only || record.is_available())
            && (!self.remote_only || record.is_remote())
            && (!self.featured_only || record.is_featured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;

    fn listing(id: &str, title: &str) -> Listing {
        Listing::new(id, title, 0)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = FilterState::new();
        assert!(filter.matches(&listing("1", "Plumber Job")));
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let mut filter = FilterState::new();
        filter.set_query("JOB");
        assert!(filter.matches(&listing("1", "Plumber Job")));
        assert!(!filter.matches(&listing("2", "Electrician Gig")));
    }

    #[test]
    fn text_match_scans_description_location_and_provider() {
        let mut filter = FilterState::new();
        filter.set_query("riverside");

        let mut by_description = listing("1", "Apartment");
        by_description.description = "Sunny unit in Riverside".to_string();
        assert!(filter.matches(&by_description));

        let mut by_location = listing("2", "Apartment");
        by_location.location = Some("Riverside, CA".to_string());
        assert!(filter.matches(&by_location));

        let mut by_provider = listing("3", "Apartment");
        by_provider.provider = Some("Riverside Rentals".to_string());
        assert!(filter.matches(&by_provider));
    }

    #[test]
    fn whitespace_query_matches_everything() {
        let mut filter = FilterState::new();
        filter.set_query("   ");
        assert!(filter.matches(&listing("1", "Anything")));
    }

    #[test]
    fn category_toggle_is_single_select() {
        let mut filter = FilterState::new();
        filter.toggle_category("cleaning");
        assert_eq!(filter.category.as_deref(), Some("cleaning"));

        filter.toggle_category("Cleaning");
        assert!(filter.category.is_none());
    }

    #[test]
    fn category_all_sentinel_clears_the_filter() {
        let mut filter = FilterState::new();
        filter.toggle_category("cleaning");
        filter.toggle_category("All");
        assert!(filter.category.is_none());
    }

    #[test]
    fn unrecognized_record_category_never_matches() {
        let mut filter = FilterState::new();
        filter.toggle_category("cleaning");

        let mut record = listing("1", "Job");
        record.category = Some("landscaping".to_string());
        assert!(!filter.matches(&record));

        record.category = None;
        assert!(!filter.matches(&record));
    }

    #[test]
    fn kind_filter_is_multi_select_membership() {
        let mut filter = FilterState::new();
        filter.toggle_kind("full-time");
        filter.toggle_kind("contract");

        let mut record = listing("1", "Job");
        record.kind = Some("contract".to_string());
        assert!(filter.matches(&record));

        record.kind = Some("part-time".to_string());
        assert!(!filter.matches(&record));

        filter.toggle_kind("contract");
        assert_eq!(filter.kinds, vec!["full-time".to_string()]);
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let mut filter = FilterState::new();
        filter.set_price_range(Some(20.0), Some(80.0));

        let mut record = listing("1", "Rental");
        record.price = Some(20.0);
        assert!(filter.matches(&record));
        record.price = Some(80.0);
        assert!(filter.matches(&record));
        record.price = Some(80.01);
        assert!(!filter.matches(&record));
    }

    #[test]
    fn unset_bound_is_unbounded_on_that_side() {
        let mut filter = FilterState::new();
        filter.set_price_range(Some(50.0), None);

        let mut record = listing("1", "Rental");
        record.price = Some(1_000_000.0);
        assert!(filter.matches(&record));
        record.price = Some(49.0);
        assert!(!filter.matches(&record));
    }

    #[test]
    fn priceless_record_is_excluded_once_a_bound_is_set() {
        let mut filter = FilterState::new();
        let record = listing("1", "Rental");
        assert!(filter.matches(&record));

        filter.set_price_range(None, Some(100.0));
        assert!(!filter.matches(&record));
    }

    #[test]
    fn reversed_range_is_swapped_and_negatives_clamped() {
        let mut filter = FilterState::new();
        filter.set_price_range(Some(300.0), Some(-10.0));
        assert_eq!(filter.price_min, Some(0.0));
        assert_eq!(filter.price_max, Some(300.0));
    }

    #[test]
    fn flags_only_filter_when_set() {
        let mut filter = FilterState::new();
        let mut record = listing("1", "Job");
        record.available = false;
        assert!(filter.matches(&record));

        filter.toggle_flag(FilterFlag::Available);
        assert!(!filter.matches(&record));

        record.available = true;
        assert!(filter.matches(&record));
    }

    #[test]
    fn reset_keeps_the_query() {
        let mut filter = FilterState::new();
        filter.set_query("plumber");
        filter.toggle_category("cleaning");
        filter.toggle_flag(FilterFlag::Remote);
        filter.set_sort(SortKey::PriceAsc);

        filter.reset();
        assert_eq!(filter.query, "plumber");
        assert!(filter.category.is_none());
        assert!(!filter.remote_only);
        assert_eq!(filter.sort, SortKey::Newest);
    }
}
