//! Builder → layout → scene, for either a loaded document or the sample.

use log::info;

use crate::Result;
use crate::components::commit_graph::{Theme, ThemeName};
use crate::config::{GRAPH_DATA_ELEMENT, ViewConfig};
use crate::graph::{self, CommitGraph, GraphDocument, GraphStats, sample};
use crate::layout::{self, LayoutConfig};
use crate::scene::{self, Placement, Scene};

/// Top-left corner of the statistics panel for loaded documents, in pixels.
const STATS_PANEL_ORIGIN: Placement = Placement::Screen { x: 16.0, y: 72.0 };
const STATS_PANEL_LINE: f64 = 20.0;

/// Where the graph comes from.
#[derive(Clone, Debug)]
pub enum GraphSource {
	/// A parsed JSON document.
	Document(GraphDocument),
	/// The built-in two-branch history.
	Sample,
}

impl GraphSource {
	/// The document embedded in the page, or the sample when there is none.
	pub fn from_page() -> Result<Self> {
		match graph::script_text(GRAPH_DATA_ELEMENT) {
			Some(text) => Ok(Self::Document(graph::parse_str(&text)?)),
			None => {
				info!("commit-graph: no #{GRAPH_DATA_ELEMENT} element, using sample history");
				Ok(Self::Sample)
			}
		}
	}
}

/// Everything the app needs to show one figure.
#[derive(Clone, Debug)]
pub struct PreparedView {
	/// Page and figure title.
	pub title: String,
	/// Validated scene to draw.
	pub scene: Scene,
	/// Resolved theme, overrides applied.
	pub theme: Theme,
	/// Statistics of the drawn graph.
	pub stats: GraphStats,
}

/// Build, lay out and compose a scene.
pub fn prepare(source: GraphSource, config: &ViewConfig) -> Result<PreparedView> {
	let (graph, default_layout, mut annotations, default_theme, default_title) = match source {
		GraphSource::Document(doc) => {
			let graph = CommitGraph::from_document(&doc);
			let stats_panel = if config.show_stats {
				scene::stats_annotations(&GraphStats::of(&graph), STATS_PANEL_ORIGIN, STATS_PANEL_LINE)
			} else {
				Vec::new()
			};
			(
				graph,
				LayoutConfig::default(),
				stats_panel,
				ThemeName::CommitHistory,
				"Commit Graph",
			)
		}
		GraphSource::Sample => {
			let sample = sample::branching_history();
			let graph = sample.build();
			let [x, y] = sample.stats_anchor;
			let stats_panel = scene::stats_annotations(
				&GraphStats::of(&graph),
				Placement::Data { x, y },
				sample.stats_line_step,
			);
			(
				graph,
				LayoutConfig::Fixed {
					positions: sample.positions,
				},
				stats_panel,
				ThemeName::BranchDiagram,
				"Commit Graph Visualization",
			)
		}
	};
	annotations.extend(config.annotations.iter().cloned());

	let layout_config = config.layout.as_ref().unwrap_or(&default_layout);
	let layout = layout::compute(&graph, layout_config)?;
	let scene = Scene::compose(&graph, &layout, annotations)?;

	let mut theme = Theme::named(config.theme.unwrap_or(default_theme));
	if let Some(show) = config.edge_labels {
		theme.edge.show_labels = show;
	}
	if let Some(show) = config.node_labels {
		theme.node.show_labels = show;
	}

	Ok(PreparedView {
		title: config.title.clone().unwrap_or_else(|| default_title.to_string()),
		stats: GraphStats::of(&graph),
		scene,
		theme,
	})
}
