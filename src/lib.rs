//! commit-graph: Interactive commit history visualization.
//!
//! Loads a commit graph (nodes and parent-to-child edges) from JSON, lays it
//! out with a seeded force simulation or a fixed coordinate table, and draws
//! it on a canvas with pan/zoom, hover details and annotation boxes. Builds as
//! a WASM client-side app; everything up to drawing also runs natively.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};

pub mod components;
pub mod config;
mod error;
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod scene;

pub use components::commit_graph::{CommitGraphCanvas, Theme, ThemeName};
pub use config::ViewConfig;
pub use error::{GraphError, Result};
pub use graph::{CommitGraph, GraphDocument, GraphStats};
pub use pipeline::{GraphSource, PreparedView, prepare};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("commit-graph: logging initialized");
}

/// Read config and graph data from the page and prepare the figure.
fn load_view() -> Result<PreparedView> {
	let config = ViewConfig::from_page()?;
	let source = GraphSource::from_page()?;
	prepare(source, &config)
}

/// Main application component.
/// Loads graph data from the DOM and renders the commit graph, or an error
/// banner when any stage fails.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let body = match load_view() {
		Ok(PreparedView {
			title,
			scene,
			theme,
			stats,
		}) => {
			info!(
				"commit-graph: rendering {} vertices, {} edges",
				stats.vertices, stats.edges
			);
			let scene_signal = Signal::derive(move || scene.clone());
			view! {
				<Title text=title.clone() />
				<div class="fullscreen-graph">
					<CommitGraphCanvas scene=scene_signal theme=theme fullscreen=true />
					<div class="graph-overlay">
						<h1>{title}</h1>
						<p class="subtitle">
							"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
						</p>
					</div>
				</div>
			}
			.into_any()
		}
		Err(err) => {
			error!("commit-graph: {err}");
			view! {
				<Title text="Commit Graph" />
				<div class="graph-error">
					<h1>"Cannot render commit graph"</h1>
					<p>{err.to_string()}</p>
				</div>
			}
			.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		{body}
	}
}
