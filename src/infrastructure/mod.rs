//! Platform utilities.
//!
//! Small, dependency-light helpers the rest of the crate builds on.
//!
//! # Modules
//!
//! - [`paths`]: filesystem locations for persisted engine data

pub mod paths;

pub use paths::{data_dir, history_storage_path};
