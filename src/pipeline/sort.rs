//! Sort key selection and stable comparators.
//!
//! This module defines [`SortKey`], the closed set of orderings a screen can
//! select, and [`apply`], which reorders pipeline output in place. Every sort
//! uses a stable algorithm, so records that compare equal keep the order the
//! candidate source delivered them in.

use crate::domain::Searchable;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Relevance score assigned to records the fuzzy matcher rejects outright.
///
/// Low enough that any match outranks a non-match, while still ordering
/// non-matches stably among themselves.
const NO_MATCH_SCORE: i64 = i64::MIN;

/// The orderings a screen can apply to filtered results.
///
/// `Newest` is the default every screen mounts with. `Rating` is best-effort:
/// on data sets without rating information it degrades to a visible no-op
/// because every record carries the same missing-rating key. `Relevance`
/// scores records against the free-text query and falls back to `Newest`
/// when the query is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Descending creation time. The default.
    #[default]
    Newest,
    /// Ascending price, missing prices first (treated as zero).
    PriceAsc,
    /// Descending price, missing prices last (treated as zero).
    PriceDesc,
    /// Descending rating, unrated records last.
    Rating,
    /// Descending fuzzy-match score against the query.
    Relevance,
}

/// Reorders records in place according to the selected sort key.
///
/// The query is only consulted by [`SortKey::Relevance`]; other keys ignore
/// it. Sorting never removes or alters records.
///
/// # Examples
///
/// ```
/// use localfind::domain::Listing;
/// use localfind::pipeline::{sort, SortKey};
///
/// let mut cheap = Listing::new("r-1", "Bike", 10);
/// cheap.price = Some(20.0);
/// let mut pricey = Listing::new("r-2", "Car", 20);
/// pricey.price = Some(80.0);
///
/// let mut records = vec![pricey, cheap];
/// sort::apply(&mut records, SortKey::PriceAsc, "");
/// assert_eq!(records[0].id, "r-1");
/// ```
pub fn apply<T: Searchable>(records: &mut [T], key: SortKey, query: &str) {
    match key {
        SortKey::Newest => {
            records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }
        SortKey::PriceAsc => {
            records.sort_by(|a, b| compare_prices(a, b));
        }
        SortKey::PriceDesc => {
            records.sort_by(|a, b| compare_prices(b, a));
        }
        SortKey::Rating => {
            records.sort_by(|a, b| {
                let rating_a = a.rating().unwrap_or(f64::NEG_INFINITY);
                let rating_b = b.rating().unwrap_or(f64::NEG_INFINITY);
                rating_b.partial_cmp(&rating_a).unwrap_or(Ordering::Equal)
            });
        }
        SortKey::Relevance => {
            let needle = query.trim().to_lowercase();
            if needle.is_empty() {
                apply(records, SortKey::Newest, query);
                return;
            }

            let matcher = SkimMatcherV2::default();
            records.sort_by_cached_key(|record| {
                std::cmp::Reverse(relevance_score(record, &matcher, &needle))
            });
        }
    }
}

/// Compares two records by price, treating a missing price as zero.
fn compare_prices<T: Searchable>(a: &T, b: &T) -> Ordering {
    let price_a = a.price().unwrap_or(0.0);
    let price_b = b.price().unwrap_or(0.0);
    price_a.partial_cmp(&price_b).unwrap_or(Ordering::Equal)
}

/// Scores a record against the query, scanning title first and description
/// as a weaker fallback.
fn relevance_score<T: Searchable>(record: &T, matcher: &SkimMatcherV2, needle: &str) -> i64 {
    matcher
        .fuzzy_match(record.title(), needle)
        .or_else(|| matcher.fuzzy_match(record.description(), needle))
        .unwrap_or(NO_MATCH_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;

    fn priced(id: &str, price: f64, created_at: i64) -> Listing {
        let mut listing = Listing::new(id, id, created_at);
        listing.price = Some(price);
        listing
    }

    #[test]
    fn newest_sorts_descending_by_creation_time() {
        let mut records = vec![
            Listing::new("old", "old", 100),
            Listing::new("new", "new", 300),
            Listing::new("mid", "mid", 200),
        ];
        apply(&mut records, SortKey::Newest, "");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn newest_preserves_input_order_on_ties() {
        let mut records = vec![
            Listing::new("a", "a", 100),
            Listing::new("b", "b", 100),
            Listing::new("c", "c", 100),
        ];
        apply(&mut records, SortKey::Newest, "");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn price_asc_and_desc_are_mirrors() {
        let mut records = vec![priced("expensive", 80.0, 0), priced("cheap", 20.0, 0)];
        apply(&mut records, SortKey::PriceAsc, "");
        assert_eq!(records[0].id, "cheap");

        apply(&mut records, SortKey::PriceDesc, "");
        assert_eq!(records[0].id, "expensive");
    }

    #[test]
    fn missing_price_sorts_as_zero() {
        let mut records = vec![priced("cheap", 20.0, 0), Listing::new("free", "free", 0)];
        apply(&mut records, SortKey::PriceAsc, "");
        assert_eq!(records[0].id, "free");
    }

    #[test]
    fn rating_sort_puts_unrated_last() {
        let mut rated = Listing::new("rated", "rated", 0);
        rated.rating = Some(4.5);
        let unrated = Listing::new("unrated", "unrated", 0);

        let mut records = vec![unrated, rated];
        apply(&mut records, SortKey::Rating, "");
        assert_eq!(records[0].id, "rated");
    }

    #[test]
    fn rating_sort_is_a_noop_without_rating_data() {
        let mut records = vec![
            Listing::new("a", "a", 0),
            Listing::new("b", "b", 0),
            Listing::new("c", "c", 0),
        ];
        apply(&mut records, SortKey::Rating, "");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn relevance_with_empty_query_falls_back_to_newest() {
        let mut records = vec![Listing::new("old", "old", 100), Listing::new("new", "new", 200)];
        apply(&mut records, SortKey::Relevance, "  ");
        assert_eq!(records[0].id, "new");
    }

    #[test]
    fn relevance_ranks_title_matches_above_non_matches() {
        let mut records = vec![
            Listing::new("misc", "Garden shears", 0),
            Listing::new("hit", "House cleaning service", 0),
        ];
        apply(&mut records, SortKey::Relevance, "cleaning");
        assert_eq!(records[0].id, "hit");
    }
}
