//! Filesystem locations for persisted engine data.
//!
//! This module resolves where the engine keeps its files (the history
//! storage document and the trace output) using the platform's conventional
//! data directory.

use std::path::PathBuf;

/// Returns the data directory for localfind files.
///
/// Resolves to `<platform data dir>/localfind` (e.g.
/// `~/.local/share/localfind` on Linux, `~/Library/Application Support/localfind`
/// on macOS). Falls back to a relative `.localfind` directory when the
/// platform directory cannot be determined, so the engine still runs in
/// containers and stripped-down environments.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from(".localfind"))
        .join("localfind")
}

/// Returns the default path of the history storage document.
///
/// # Examples
///
/// ```
/// use localfind::infrastructure::history_storage_path;
///
/// let path = history_storage_path();
/// assert!(path.ends_with("history.json"));
/// ```
#[must_use]
pub fn history_storage_path() -> PathBuf {
    data_dir().join("history.json")
}
