//! Core domain types shared by every layer.
//!
//! This module contains the types the rest of the crate is built around:
//! the [`Listing`] record, the [`Searchable`] field-accessor trait the
//! pipeline operates through, and the centralized error type.
//!
//! # Modules
//!
//! - [`error`]: `LocalfindError` and the crate `Result` alias
//! - [`listing`]: the `Listing` record and the `Searchable` seam

pub mod error;
pub mod listing;

pub use error::{LocalfindError, Result};
pub use listing::{Listing, Searchable};
