//! Actions representing side effects to be executed by the host runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! worker responses. Actions bridge pure state transformations and effectful
//! operations like fetching candidates, persisting history, or navigating to
//! a listing's detail view.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The host runtime
//! executes them in sequence.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the host runtime.
///
/// Actions are produced by the event handler and executed by the host. They
/// represent the boundary between pure state transformations and effectful
/// operations; the handler itself never touches the network, storage, or
/// the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Posts a message to the background worker.
    ///
    /// Enables asynchronous operations like candidate fetches and history
    /// persistence without blocking the event loop.
    PostToWorker(WorkerMessage),

    /// Navigates to a listing's detail view.
    ///
    /// Emitted when the user opens a result. Routing is the host's concern;
    /// the engine only supplies the identifier.
    OpenListing {
        /// Identifier of the listing to open.
        id: String,
    },
}
