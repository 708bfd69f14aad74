//! Error types for the localfind engine.
//!
//! This module defines the centralized error type [`LocalfindError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! There are no fatal errors in this engine: every failure path degrades to an
//! empty or partial result at the call site. The variants exist so callers can
//! log the cause and pick the right degraded state.

use thiserror::Error;

/// The main error type for localfind operations.
///
/// This enum consolidates all error conditions that can occur while searching,
/// from storage operations to candidate fetching and configuration issues. Most
/// variants carry a human-readable description; I/O errors convert automatically
/// via `#[from]`.
///
/// # Examples
///
/// ```
/// use localfind::domain::LocalfindError;
///
/// fn validate_config() -> Result<(), LocalfindError> {
///     Err(LocalfindError::Config("missing storage key".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum LocalfindError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value storage backend
    /// fails. Search history degrades to in-memory-only when this happens.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The candidate source rejected a fetch.
    ///
    /// Occurs when the external data-fetching collaborator fails or returns an
    /// unusable payload. The screen substitutes an empty candidate list.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when a worker message cannot be serialized, deserialized, or
    /// routed. The string contains details about the communication failure.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for localfind operations.
///
/// This is a type alias for `std::result::Result<T, LocalfindError>` that
/// simplifies function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use localfind::domain::Result;
///
/// fn load_history() -> Result<Vec<String>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, LocalfindError>;
