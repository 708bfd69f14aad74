//! Layout and load-status state types for a search screen.
//!
//! These enums capture the two orthogonal display dimensions a screen tracks
//! besides its filter state: how results are laid out, and where the last
//! candidate fetch stands. Neither affects what the pipeline computes: layout
//! only reshapes rows, and load status only selects empty-state messaging.

use serde::{Deserialize, Serialize};

/// Visual arrangement of the result list.
///
/// The two layouts are interchangeable views over identical pipeline output:
/// toggling neither refetches nor resorts, it only changes how view-model
/// rows are chunked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One result per row.
    #[default]
    List,

    /// Several results per row, column count set by configuration.
    Grid,
}

impl LayoutMode {
    /// Returns the other layout mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

/// Progress of the most recent candidate fetch.
///
/// Drives empty-state selection: an empty result list reads very differently
/// depending on whether nothing was asked for yet, a fetch is in flight, the
/// fetch failed, or it genuinely matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No fetch has been requested yet.
    #[default]
    Idle,

    /// A fetch is in flight; its response has not arrived.
    Loading,

    /// The latest fetch completed and its candidates are current.
    Loaded,

    /// The latest fetch failed; candidates are empty.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_toggles_back_and_forth() {
        assert_eq!(LayoutMode::List.toggled(), LayoutMode::Grid);
        assert_eq!(LayoutMode::Grid.toggled(), LayoutMode::List);
    }
}
