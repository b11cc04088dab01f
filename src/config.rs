//! Page-level view configuration.
//!
//! Read from an optional `<script id="graph-config" type="application/json">`
//! element. Every field is optional; an absent element means defaults.

use serde::Deserialize;

use crate::Result;
use crate::components::commit_graph::ThemeName;
use crate::graph::script_text;
use crate::layout::LayoutConfig;
use crate::scene::Annotation;

/// Element id holding the graph document.
pub const GRAPH_DATA_ELEMENT: &str = "graph-data";
/// Element id holding the [`ViewConfig`].
pub const GRAPH_CONFIG_ELEMENT: &str = "graph-config";

/// Options for one rendered figure.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
	/// Figure title. Each source has its own default.
	pub title: Option<String>,
	/// Color preset. Each source has its own default.
	pub theme: Option<ThemeName>,
	/// Overrides the source's default layout.
	pub layout: Option<LayoutConfig>,
	/// Extra annotations drawn on top of the figure.
	pub annotations: Vec<Annotation>,
	/// Add the statistics panel for loaded documents.
	pub show_stats: bool,
	/// Overrides the theme's edge label setting.
	pub edge_labels: Option<bool>,
	/// Overrides the theme's node label setting.
	pub node_labels: Option<bool>,
}

impl ViewConfig {
	/// Parse a config from JSON text.
	pub fn from_json(json_text: &str) -> Result<Self> {
		Ok(serde_json::from_str(json_text)?)
	}

	/// Config from the page, or defaults when the element is absent.
	pub fn from_page() -> Result<Self> {
		match script_text(GRAPH_CONFIG_ELEMENT) {
			Some(text) => Self::from_json(&text),
			None => Ok(Self::default()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GraphError;
	use crate::layout::SpringConfig;
	use crate::scene::Placement;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(ViewConfig::from_json("{}").unwrap(), ViewConfig::default());
	}

	#[test]
	fn reads_every_field() {
		let config = ViewConfig::from_json(
			r#"{
				"title": "facebook/react",
				"theme": "midnight",
				"layout": {"kind": "spring", "seed": 9, "iterations": 50},
				"annotations": [{"text": "release", "space": "data", "x": 1, "y": 2}],
				"showStats": true,
				"edgeLabels": true
			}"#,
		)
		.unwrap();

		assert_eq!(config.title.as_deref(), Some("facebook/react"));
		assert_eq!(config.theme, Some(ThemeName::Midnight));
		assert_eq!(
			config.layout,
			Some(LayoutConfig::Spring(SpringConfig {
				seed: 9,
				iterations: 50,
				..SpringConfig::default()
			}))
		);
		assert_eq!(config.annotations[0].placement, Placement::Data { x: 1.0, y: 2.0 });
		assert!(config.show_stats);
		assert_eq!(config.edge_labels, Some(true));
		assert_eq!(config.node_labels, None);
	}

	#[test]
	fn unknown_theme_is_a_parse_error() {
		let err = ViewConfig::from_json(r#"{"theme": "neon"}"#).unwrap_err();
		assert!(matches!(err, GraphError::Parse(_)));
	}
}
