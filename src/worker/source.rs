//! The candidate-source collaborator interface.
//!
//! Every screen's data comes from an external service (a marketplace API, a
//! job board, a rental index). This module reduces that collaborator to the
//! one capability the engine needs (fetch listings or fail) so the worker
//! can be wired to any backend, and tests can substitute a canned one.

use crate::domain::error::Result;
use crate::domain::Listing;

/// A fetch request as forwarded to the candidate source.
///
/// Carries the generation token (for response correlation; the source itself
/// ignores it) and the committed query text, which backends may use for
/// server-side narrowing. Client-side filtering runs regardless, so a source
/// that ignores the query is still correct, just less efficient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Generation token of the requesting screen.
    pub generation: u64,

    /// Committed query text, may be empty.
    pub query: String,
}

/// Abstraction over the external data-fetching service.
///
/// Implementations wrap whatever transport the host application uses. A
/// rejection is never fatal: the worker converts it into a failure response
/// and the screen shows the "unable to load" state with an empty list.
pub trait CandidateSource: Send {
    /// Fetches candidate listings for a request.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying service rejects the fetch or
    /// returns an unusable payload.
    fn fetch(&mut self, request: &FetchRequest) -> Result<Vec<Listing>>;
}

/// A candidate source backed by a fixed in-memory list.
///
/// Returns a clone of its listings for every request, ignoring the query;
/// the pipeline does the narrowing. Used in tests and anywhere a screen runs
/// against pre-loaded data.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    listings: Vec<Listing>,
}

impl StaticSource {
    /// Creates a source serving the given listings.
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl CandidateSource for StaticSource {
    fn fetch(&mut self, request: &FetchRequest) -> Result<Vec<Listing>> {
        tracing::debug!(
            generation = request.generation,
            listing_count = self.listings.len(),
            "serving static listings"
        );
        Ok(self.listings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_serves_the_same_listings_every_time() {
        let mut source = StaticSource::new(vec![Listing::new("l-1", "Bike", 0)]);

        let request = FetchRequest {
            generation: 1,
            query: "ignored".to_string(),
        };
        let first = source.fetch(&request).unwrap();
        let second = source.fetch(&request).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
