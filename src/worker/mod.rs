//! Background worker for asynchronous collaborator operations.
//!
//! Everything a screen must not block on (candidate fetches and history
//! persistence) runs behind this message boundary. Requests and responses
//! are serializable, so the worker can sit on the other side of a thread,
//! a channel, or a string-based bridge.
//!
//! # Modules
//!
//! - [`messages`]: the `WorkerMessage`/`WorkerResponse` protocol
//! - [`source`]: the `CandidateSource` collaborator interface
//! - [`handler`]: the `SearchWorker` dispatch loop

pub mod handler;
pub mod messages;
pub mod source;

pub use handler::SearchWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
pub use source::{CandidateSource, FetchRequest, StaticSource};
