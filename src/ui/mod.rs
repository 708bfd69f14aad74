//! Render projection: immutable view models computed from screen state.
//!
//! This layer is the boundary between the engine and whatever renders it.
//! It transforms state into display-ready structures and stops there: no
//! widgets, no styling, no layout math beyond row shaping. The same filtered
//! and sorted results project identically whether the host draws a list or
//! a grid.
//!
//! ```text
//! ScreenState → compute_viewmodel → ResultsViewModel → host renderer
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: view model types representing renderable state
//! - [`projection`]: the `compute_viewmodel` transformation

pub mod projection;
pub mod viewmodel;

pub use projection::compute_viewmodel;
pub use viewmodel::{
    DisplayItem, EmptyState, HeaderInfo, PageInfo, ResultsViewModel, SearchBarInfo,
};
