//! Background worker for candidate fetches and history persistence.
//!
//! This module implements the worker that executes every operation a screen
//! must not block on: talking to the candidate source and round-tripping the
//! search history through storage. It includes distributed tracing support so
//! worker spans link back to the screen spans that requested them.
//!
//! The worker is transport-agnostic: hosts with a message channel call
//! [`SearchWorker::handle_message`] with typed messages, and hosts that move
//! JSON strings across a boundary call [`SearchWorker::on_payload`].

use crate::domain::error::{LocalfindError, Result};
use crate::history::HistoryStore;
use crate::worker::source::{CandidateSource, FetchRequest};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker state owning the screen's external collaborators.
///
/// The collaborators are optional so a worker can be constructed before the
/// host has wired them up; operations against a missing collaborator produce
/// error responses instead of panics.
pub struct SearchWorker {
    /// External data-fetching service, if wired.
    source: Option<Box<dyn CandidateSource>>,

    /// History persistence binding, if wired.
    history: Option<HistoryStore>,
}

impl SearchWorker {
    /// Creates a worker with both collaborators wired.
    #[must_use]
    pub fn new(source: Box<dyn CandidateSource>, history: HistoryStore) -> Self {
        Self {
            source: Some(source),
            history: Some(history),
        }
    }

    /// Creates a worker with no collaborators.
    ///
    /// Every operation responds with an error until the collaborators are
    /// attached; useful for hosts that wire lazily.
    #[must_use]
    pub fn unwired() -> Self {
        Self {
            source: None,
            history: None,
        }
    }

    /// Attaches the candidate source.
    pub fn set_source(&mut self, source: Box<dyn CandidateSource>) {
        self.source = Some(source);
    }

    /// Attaches the history store.
    pub fn set_history(&mut self, history: HistoryStore) {
        self.history = Some(history);
    }

    /// Returns the candidate source, failing if not wired.
    fn get_source(&mut self) -> Result<&mut Box<dyn CandidateSource>> {
        self.source
            .as_mut()
            .ok_or_else(|| LocalfindError::Worker("candidate source not wired".to_string()))
    }

    /// Handles the `FetchListings` message.
    ///
    /// A source rejection becomes a `FetchFailed` response carrying the
    /// request's generation, so the screen can tell whether the failure is
    /// current or stale.
    fn handle_fetch(&mut self, generation: u64, query: String) -> WorkerResponse {
        let request = FetchRequest { generation, query };

        let result = self
            .get_source()
            .and_then(|source| source.fetch(&request));

        match result {
            Ok(listings) => {
                tracing::debug!(
                    generation = generation,
                    listing_count = listings.len(),
                    "listings fetched"
                );
                WorkerResponse::ListingsFetched {
                    generation,
                    listings,
                }
            }
            Err(e) => {
                tracing::warn!(generation = generation, error = %e, "fetch failed");
                WorkerResponse::FetchFailed {
                    generation,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Handles the `LoadHistory` message.
    ///
    /// A missing or failing store loads as empty; history is best-effort.
    fn handle_load_history(&self) -> WorkerResponse {
        let entries = self
            .history
            .as_ref()
            .map_or_else(Vec::new, HistoryStore::load);

        tracing::debug!(entry_count = entries.len(), "history loaded");
        WorkerResponse::HistoryLoaded { entries }
    }

    /// Handles the `PersistHistory` message.
    ///
    /// Persistence failures are logged inside the store and acknowledged as
    /// written anyway: the screen's in-memory history is the source of truth
    /// for the session either way.
    fn handle_persist_history(&mut self, entries: &[String]) -> WorkerResponse {
        if let Some(history) = self.history.as_mut() {
            history.persist(entries);
        } else {
            tracing::warn!("history store not wired, entries stay in memory");
        }
        WorkerResponse::HistoryPersisted {
            count: entries.len(),
        }
    }

    /// Handles the `ClearHistory` message.
    fn handle_clear_history(&mut self) -> WorkerResponse {
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
        WorkerResponse::HistoryCleared
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Reconstructs the OpenTelemetry context from the serialized trace
    /// information in the message, allowing spans created in the worker to be
    /// linked to their parent spans on the screen side.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = match message {
            WorkerMessage::FetchListings { trace_context, .. }
            | WorkerMessage::LoadHistory { trace_context, .. }
            | WorkerMessage::PersistHistory { trace_context, .. }
            | WorkerMessage::ClearHistory { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context =
            opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace
    /// context and creates a tracing span for the operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::FetchListings {
                generation, query, ..
            } => self.handle_fetch(generation, query),

            WorkerMessage::LoadHistory { .. } => self.handle_load_history(),

            WorkerMessage::PersistHistory { entries, .. } => {
                self.handle_persist_history(&entries)
            }

            WorkerMessage::ClearHistory { .. } => self.handle_clear_history(),
        }
    }

    /// Processes a JSON-serialized message and returns a JSON-serialized response.
    ///
    /// Entry point for hosts that move strings across a boundary instead of
    /// typed values. A payload that fails to deserialize produces an `Error`
    /// response; a response that fails to serialize produces `None` (logged).
    pub fn on_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                let error = WorkerResponse::Error {
                    message: format!("bad worker payload: {e}"),
                };
                return serde_json::to_string(&error).ok();
            }
        };

        let response = self.handle_message(message);

        match serde_json::to_string(&response) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker")
            .field("source_wired", &self.source.is_some())
            .field("history_wired", &self.history.is_some())
            .finish()
    }
}
