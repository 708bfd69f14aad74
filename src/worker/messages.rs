//! Worker message types for the async collaborator boundary.
//!
//! This module defines the request and response protocol between a screen's
//! event loop and the background worker that talks to the candidate source
//! and the key-value storage. It also implements distributed tracing context
//! propagation across the message boundary.
//!
//! Fetch traffic carries a generation token: responses echo the generation of
//! the request that produced them, which is what lets the screen drop stale
//! responses instead of letting them overwrite newer state.

use crate::domain::Listing;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-boundary span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when a message crosses into the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            tracing::trace!("span context is not valid, message will be unlinked");
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_listings(FetchListings { generation: u64, query: String }),
    load_history(LoadHistory {}),
    persist_history(PersistHistory { entries: Vec<String> }),
    clear_history(ClearHistory {}),
}

/// Messages sent from a screen to the background worker.
///
/// Each variant corresponds to one collaborator operation that should run off
/// the event loop. All variants include an optional trace context for
/// distributed tracing support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch candidate listings from the external source.
    FetchListings {
        /// Generation token of this request; echoed in the response.
        generation: u64,

        /// Committed query text forwarded to the source.
        query: String,

        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load the persisted search-history array.
    LoadHistory {
        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist the search-history array under the screen's key.
    PersistHistory {
        /// History entries, most recent first.
        entries: Vec<String>,

        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete the persisted search-history array.
    ClearHistory {
        /// Trace context for linking spans across the boundary.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

/// Responses sent from the worker back to the screen.
///
/// Each variant corresponds to the completion of a worker operation, either
/// successfully with result data or with an error message. Fetch responses
/// carry the generation of the request that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Candidates were successfully fetched.
    ListingsFetched {
        /// Generation of the request that produced this response.
        generation: u64,

        /// The fetched listings, unsorted and unfiltered.
        listings: Vec<Listing>,
    },

    /// The candidate source rejected the fetch.
    FetchFailed {
        /// Generation of the request that produced this failure.
        generation: u64,

        /// Human-readable error message.
        message: String,
    },

    /// The persisted history array was loaded (empty when absent).
    HistoryLoaded {
        /// History entries, most recent first.
        entries: Vec<String>,
    },

    /// The history array was persisted (best-effort).
    HistoryPersisted {
        /// Number of entries written.
        count: usize,
    },

    /// The persisted history array was deleted.
    HistoryCleared,

    /// A worker-level error occurred (bad payload, missing collaborator).
    Error {
        /// Human-readable error message.
        message: String,
    },
}
