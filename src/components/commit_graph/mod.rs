//! Commit graph canvas component.
//!
//! Draws a [`crate::scene::Scene`] on an HTML canvas with:
//! - The scene fitted into the canvas, data y pointing up
//! - Directed edges with arrowheads and optional branch labels
//! - Pan, zoom and node dragging
//! - Hover highlight of a commit and its neighbours, with a detail tooltip
//! - Free-floating annotation boxes
//!
//! # Example
//!
//! ```ignore
//! use commit_graph::{CommitGraphCanvas, Theme};
//!
//! let scene = commit_graph::prepare(GraphSource::Sample, &ViewConfig::default())?.scene;
//! view! { <CommitGraphCanvas scene=scene theme=Theme::branch_diagram() fullscreen=true /> }
//! ```

mod component;
pub mod render;
pub mod scale;
pub mod state;
pub mod theme;
pub mod view;

pub use component::CommitGraphCanvas;
pub use theme::{Theme, ThemeName};
