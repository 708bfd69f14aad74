//! In-memory recent-search list and popular-term suggestions.
//!
//! [`SearchHistory`] holds the committed search terms for one screen:
//! deduplicated, capped, most-recent-first. It is pure in-memory state; the
//! storage round-trip lives in [`store`](crate::history::store) so the list
//! keeps working when persistence is unavailable.

/// Default maximum number of remembered search terms per screen.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Default maximum number of suggestions offered while typing.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Recent committed search terms, most-recent-first.
///
/// Committing a term that is already present moves it to the front rather
/// than duplicating it, so the list reads as "what did I search for last".
/// The list never exceeds its cap; the oldest term falls off the end.
///
/// # Examples
///
/// ```
/// use localfind::history::SearchHistory;
///
/// let mut history = SearchHistory::new(10);
/// history.commit("plumber");
/// history.commit("cleaning");
/// history.commit("plumber");
///
/// assert_eq!(history.entries(), ["plumber", "cleaning"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    /// Most-recent-first committed terms.
    entries: Vec<String>,

    /// Maximum number of retained terms.
    limit: usize,
}

impl SearchHistory {
    /// Creates an empty history with the given cap.
    ///
    /// A zero cap is treated as "remember nothing": commits succeed but the
    /// list stays empty.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Returns the committed terms, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns true when no terms have been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commits a search term, returning whether the list changed.
    ///
    /// The term is trimmed first; an empty result is ignored. A term that is
    /// already present (case-sensitive, as typed) moves to the front. The
    /// list is truncated to its cap afterwards.
    pub fn commit(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        if self.entries.first().is_some_and(|front| front == term) {
            return false;
        }

        if let Some(position) = self.entries.iter().position(|e| e == term) {
            self.entries.remove(position);
        }

        self.entries.insert(0, term.to_string());
        self.entries.truncate(self.limit);
        true
    }

    /// Clears every remembered term.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the list with terms loaded from storage.
    ///
    /// Applies the same hygiene as committing: blank entries are dropped,
    /// duplicates keep their first (most recent) occurrence, and the result
    /// is truncated to the cap. A tampered or over-long persisted array can
    /// therefore never break the in-memory invariants.
    pub fn replace(&mut self, terms: Vec<String>) {
        self.entries.clear();
        for term in terms {
            let term = term.trim();
            if term.is_empty() || self.entries.iter().any(|e| e == term) {
                continue;
            }
            self.entries.push(term.to_string());
        }
        self.entries.truncate(self.limit);
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

/// Computes typing suggestions from a static popular-terms list.
///
/// Returns the popular terms containing the typed prefix as a
/// case-insensitive substring, in their configured order, capped at `limit`.
/// An empty or whitespace query yields no suggestions.
///
/// # Examples
///
/// ```
/// use localfind::history::suggestions;
///
/// let popular = vec!["house cleaning".to_string(), "plumbing".to_string()];
/// assert_eq!(suggestions(&popular, "clean", 5), vec!["house cleaning"]);
/// assert!(suggestions(&popular, "", 5).is_empty());
/// ```
#[must_use]
pub fn suggestions(popular_terms: &[String], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    popular_terms
        .iter()
        .filter(|term| term.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}
