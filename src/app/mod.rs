//! Application layer coordinating state, events, and actions.
//!
//! This module defines the per-screen logic layer sitting between the host UI
//! and the pipeline/storage/worker layers. It implements the event-driven
//! architecture that powers an interactive search screen.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side-effect commands emitted by the event handler
//! - [`handler`]: event processing logic and state transition coordinator
//! - [`modes`]: layout and load-status state types
//! - [`state`]: central screen state container
//!
//! # Example
//!
//! ```
//! use localfind::app::{handle_event, Event, ScreenState};
//! use localfind::Config;
//!
//! let mut state = ScreenState::new(Config::default());
//! let (redraw, actions) = handle_event(&mut state, &Event::QueryChanged("plumber".into()))?;
//! assert!(redraw);
//! assert!(actions.is_empty());
//! # Ok::<(), localfind::LocalfindError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{LayoutMode, LoadStatus};
pub use state::ScreenState;
