//! Listing domain model and the field-accessor seam used by the pipeline.
//!
//! This module defines the core `Listing` type representing one marketplace
//! record (a job posting, a rental, a product) flowing through the search
//! pipeline, plus the [`Searchable`] trait that exposes the fields the pipeline
//! filters and sorts on. Any domain record type can run through the pipeline by
//! implementing `Searchable`; `Listing` is the canonical implementation.
//!
//! Records are owned by an external candidate source; this crate only reads
//! them. Every optional field is serde-defaulted so that records with missing
//! fields deserialize and flow through the pipeline instead of erroring.

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Field accessors the filter-and-sort pipeline reads from a record.
///
/// Implementing this trait is the per-domain configuration the pipeline needs:
/// which text fields are scanned by the free-text query, which tag fields the
/// discrete filters compare against, and which numeric fields drive range
/// filtering and sorting. Accessors for fields a domain does not have return
/// `None` (or `false` for flags); the corresponding filter dimension then
/// behaves exactly as it does for a present-but-unset filter.
pub trait Searchable {
    /// Unique identifier, used for navigation and display keys.
    fn id(&self) -> &str;

    /// Display title, scanned by the free-text query.
    fn title(&self) -> &str;

    /// Free-text description, scanned by the free-text query.
    fn description(&self) -> &str;

    /// Location string, scanned by the free-text query when present.
    fn location(&self) -> Option<&str>;

    /// Provider or company name, scanned by the free-text query when present.
    fn provider(&self) -> Option<&str>;

    /// Category tag compared against the single-select category filter.
    fn category(&self) -> Option<&str>;

    /// Kind tag compared against the multi-select kind filter.
    fn kind(&self) -> Option<&str>;

    /// Price or salary, driving range filtering and price sorting.
    fn price(&self) -> Option<f64>;

    /// Rating, driving the best-effort rating sort.
    fn rating(&self) -> Option<f64>;

    /// Whether the record is currently available.
    fn is_available(&self) -> bool;

    /// Whether the record is remote-friendly.
    fn is_remote(&self) -> bool;

    /// Whether the record is featured.
    fn is_featured(&self) -> bool;

    /// Creation time as a Unix timestamp, driving the default newest-first sort.
    fn created_at(&self) -> i64;
}

/// One marketplace record flowing through the search pipeline.
///
/// Listings cover every record shape the marketplace screens share: jobs,
/// rentals, products, favorites. The structurally identical attributes live
/// here once; screen-specific meaning comes from `category` and `kind`
/// (e.g. a job's `kind` might be `"full-time"`, a rental's `"apartment"`).
///
/// # Examples
///
/// ```
/// use localfind::domain::Listing;
///
/// let listing = Listing::new("job-17", "Plumber Job", 1_700_000_000);
/// assert_eq!(listing.id, "job-17");
/// assert!(listing.price.is_none());
/// assert!(listing.available);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier assigned by the owning service.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Category tag from the screen's closed category set.
    #[serde(default)]
    pub category: Option<String>,

    /// Kind tag within the category (job type, rental type, ...).
    #[serde(default)]
    pub kind: Option<String>,

    /// Price or salary. `None` when the service omitted it.
    #[serde(default)]
    pub price: Option<f64>,

    /// Location string as supplied by the service.
    #[serde(default)]
    pub location: Option<String>,

    /// Provider or company name.
    #[serde(default)]
    pub provider: Option<String>,

    /// Average rating. Frequently absent on pre-launch data sets.
    #[serde(default)]
    pub rating: Option<f64>,

    /// Availability/status flag.
    #[serde(default = "default_true")]
    pub available: bool,

    /// Remote-friendly flag (job screens).
    #[serde(default)]
    pub remote: bool,

    /// Featured/promoted flag.
    #[serde(default)]
    pub featured: bool,

    /// Unix timestamp the record was created at.
    #[serde(default)]
    pub created_at: i64,
}

/// Serde default for the availability flag: records missing the field count as available.
const fn default_true() -> bool {
    true
}

impl Listing {
    /// Creates a listing with the given identity and creation time.
    ///
    /// All optional attributes start empty and the availability flag starts
    /// true, matching what the candidate services return for freshly created
    /// records.
    ///
    /// # Examples
    ///
    /// ```
    /// use localfind::domain::Listing;
    ///
    /// let listing = Listing::new("rental-3", "Studio downtown", 1_700_000_000);
    /// assert_eq!(listing.title, "Studio downtown");
    /// assert_eq!(listing.created_at, 1_700_000_000);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: None,
            kind: None,
            price: None,
            location: None,
            provider: None,
            rating: None,
            available: true,
            remote: false,
            featured: false,
            created_at,
        }
    }

    /// Returns a human-readable string describing how long ago the listing was posted.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago" (e.g., "5m ago")
    /// - Less than 1 day: "Xh ago" (e.g., "3h ago")
    /// - 1 day or more: "Xd ago" (e.g., "7d ago")
    ///
    /// # Examples
    ///
    /// ```
    /// use localfind::domain::Listing;
    ///
    /// let now = chrono::Utc::now().timestamp();
    /// let listing = Listing::new("job-1", "Electrician Gig", now - 300);
    /// assert_eq!(listing.posted_ago(), "5m ago");
    /// ```
    #[must_use]
    pub fn posted_ago(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let diff = now - self.created_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }

    /// Formats the price for display, falling back to "—" when absent.
    ///
    /// Presentational fallback only: filtering treats an absent price as
    /// excluded under a range, never as zero.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.price
            .map_or_else(|| "—".to_string(), |p| format!("${p:.0}"))
    }
}

impl Searchable for Listing {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn is_remote(&self) -> bool {
        self.remote
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_listing_has_empty_optionals() {
        let listing = Listing::new("p-1", "Cordless drill", 100);
        assert!(listing.category.is_none());
        assert!(listing.price.is_none());
        assert!(listing.rating.is_none());
        assert!(listing.available);
        assert!(!listing.featured);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let json = r#"{"id":"j-1","title":"Plumber Job"}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, "j-1");
        assert_eq!(listing.description, "");
        assert!(listing.price.is_none());
        assert!(listing.available);
        assert_eq!(listing.created_at, 0);
    }

    #[test]
    fn price_label_falls_back_when_absent() {
        let mut listing = Listing::new("r-1", "Studio", 0);
        assert_eq!(listing.price_label(), "—");
        listing.price = Some(850.0);
        assert_eq!(listing.price_label(), "$850");
    }
}
