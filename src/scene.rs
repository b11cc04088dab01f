//! The drawable join of a graph, its layout and any annotations.

use serde::{Deserialize, Serialize};

use crate::graph::{CommitGraph, GraphStats};
use crate::layout::Layout;
use crate::{GraphError, Result};

/// Where an annotation is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "camelCase")]
pub enum Placement {
	/// Data-space point; follows pan and zoom.
	Data {
		/// Horizontal data coordinate.
		x: f64,
		/// Vertical data coordinate, growing upward.
		y: f64,
	},
	/// Canvas pixel offset from the top-left corner; stays put.
	Screen {
		/// Pixels from the left edge.
		x: f64,
		/// Pixels from the top edge.
		y: f64,
	},
}

/// Text box style for an annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationStyle {
	/// CSS color of the text.
	pub color: String,
	/// CSS color of the box behind the text.
	pub background: String,
	/// Box opacity in `[0, 1]`.
	pub alpha: f64,
	/// Font size in pixels.
	pub font_size: f64,
}

impl Default for AnnotationStyle {
	fn default() -> Self {
		Self {
			color: "#000000".into(),
			background: "#ffffff".into(),
			alpha: 0.5,
			font_size: 12.0,
		}
	}
}

/// Free text placed on the figure. Not tied to any node or edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
	/// Text to show.
	pub text: String,
	/// Anchor point.
	#[serde(flatten)]
	pub placement: Placement,
	/// Box and text style.
	#[serde(default)]
	pub style: AnnotationStyle,
}

impl Annotation {
	/// Annotation with the default style.
	pub fn new(text: impl Into<String>, placement: Placement) -> Self {
		Self {
			text: text.into(),
			placement,
			style: AnnotationStyle::default(),
		}
	}
}

/// One annotation per statistics line, stacked downward from `first`.
///
/// `step` is the gap between lines: data units for [`Placement::Data`],
/// pixels for [`Placement::Screen`].
pub fn stats_annotations(stats: &GraphStats, first: Placement, step: f64) -> Vec<Annotation> {
	stats
		.summary_lines()
		.into_iter()
		.enumerate()
		.map(|(i, line)| {
			let offset = step * i as f64;
			let placement = match first {
				Placement::Data { x, y } => Placement::Data { x, y: y - offset },
				Placement::Screen { x, y } => Placement::Screen { x, y: y + offset },
			};
			Annotation::new(line, placement)
		})
		.collect()
}

/// A positioned commit.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// Commit id.
	pub id: String,
	/// Headline.
	pub title: String,
	/// Secondary line.
	pub subtitle: String,
	/// Commit time.
	pub timestamp: String,
	/// Data-space position.
	pub x: f64,
	/// Data-space y, growing upward.
	pub y: f64,
}

/// An edge between two entries of [`Scene::nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	/// Scene index of the parent.
	pub source: usize,
	/// Scene index of the child.
	pub target: usize,
	/// Branch label, may be empty.
	pub label: String,
}

/// Axis-aligned data-space box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Bottom edge.
	pub min_y: f64,
	/// Right edge.
	pub max_x: f64,
	/// Top edge.
	pub max_y: f64,
}

impl Bounds {
	/// Zero-sized box at one point.
	pub fn point(x: f64, y: f64) -> Self {
		Self {
			min_x: x,
			min_y: y,
			max_x: x,
			max_y: y,
		}
	}

	/// Grow the box to contain a point.
	pub fn include(self, x: f64, y: f64) -> Self {
		Self {
			min_x: self.min_x.min(x),
			min_y: self.min_y.min(y),
			max_x: self.max_x.max(x),
			max_y: self.max_y.max(y),
		}
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

/// Everything the renderer needs, already validated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// Positioned commits.
	pub nodes: Vec<SceneNode>,
	/// Edges between scene indices.
	pub edges: Vec<SceneEdge>,
	/// Text boxes drawn on top.
	pub annotations: Vec<Annotation>,
}

impl Scene {
	/// Join graph and layout. Every node needs a coordinate and every edge
	/// endpoint must be a known node.
	pub fn compose(
		graph: &CommitGraph,
		layout: &Layout,
		annotations: Vec<Annotation>,
	) -> Result<Self> {
		let nodes = graph
			.nodes()
			.iter()
			.map(|node| -> Result<SceneNode> {
				let [x, y] = layout
					.get(&node.id)
					.ok_or_else(|| GraphError::MissingPosition(node.id.clone()))?;
				Ok(SceneNode {
					id: node.id.clone(),
					title: node.title.clone(),
					subtitle: node.subtitle.clone(),
					timestamp: node.timestamp.clone(),
					x,
					y,
				})
			})
			.collect::<Result<Vec<_>>>()?;

		let edges = graph
			.resolved_edges()?
			.into_iter()
			.zip(graph.edges())
			.map(|((source, target), edge)| SceneEdge {
				source,
				target,
				label: edge.label.clone(),
			})
			.collect();

		Ok(Self {
			nodes,
			edges,
			annotations,
		})
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.annotations.is_empty()
	}

	/// Data-space box around nodes and data-placed annotations.
	pub fn bounds(&self) -> Option<Bounds> {
		let node_points = self.nodes.iter().map(|n| (n.x, n.y));
		let annotation_points = self.annotations.iter().filter_map(|a| match a.placement {
			Placement::Data { x, y } => Some((x, y)),
			Placement::Screen { .. } => None,
		});

		node_points
			.chain(annotation_points)
			.fold(None, |acc: Option<Bounds>, (x, y)| {
				Some(match acc {
					Some(b) => b.include(x, y),
					None => Bounds::point(x, y),
				})
			})
	}

	/// Indices of the nodes sharing an edge with `idx`.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		self.edges.iter().filter_map(move |e| {
			if e.source == idx {
				Some(e.target)
			} else if e.target == idx {
				Some(e.source)
			} else {
				None
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn layout_of(points: &[(&str, [f64; 2])]) -> Layout {
		let mut layout = Layout::default();
		for (id, pos) in points {
			layout.insert(*id, *pos);
		}
		layout
	}

	#[test]
	fn compose_resolves_edges_to_indices() {
		let graph = CommitGraph::from_literals(["n1", "n2"], [("n1", "n2", "main")]);
		let layout = layout_of(&[("n1", [0.0, 0.0]), ("n2", [1.0, 1.0])]);

		let scene = Scene::compose(&graph, &layout, vec![]).unwrap();
		assert_eq!(scene.nodes.len(), 2);
		assert_eq!(
			scene.edges,
			vec![SceneEdge {
				source: 0,
				target: 1,
				label: "main".into()
			}]
		);
	}

	#[test]
	fn compose_rejects_unknown_edge_target() {
		let graph = CommitGraph::from_literals(["A"], [("A", "Z", "")]);
		let layout = layout_of(&[("A", [0.0, 0.0]), ("Z", [1.0, 0.0])]);

		let err = Scene::compose(&graph, &layout, vec![]).unwrap_err();
		assert!(matches!(err, GraphError::UnknownNode { ref id, .. } if id == "Z"));
	}

	#[test]
	fn compose_rejects_missing_coordinate() {
		let graph = CommitGraph::from_literals(["A", "B"], []);
		let layout = layout_of(&[("A", [0.0, 0.0])]);

		let err = Scene::compose(&graph, &layout, vec![]).unwrap_err();
		assert!(matches!(err, GraphError::MissingPosition(ref id) if id == "B"));
	}

	#[test]
	fn empty_scene_has_no_bounds() {
		let scene = Scene::compose(&CommitGraph::new(), &Layout::default(), vec![]).unwrap();
		assert!(scene.is_empty());
		assert_eq!(scene.bounds(), None);
	}

	#[test]
	fn bounds_cover_data_annotations_only() {
		let graph = CommitGraph::from_literals(["A", "B"], []);
		let layout = layout_of(&[("A", [0.0, 2.0]), ("B", [3.0, 1.0])]);
		let annotations = vec![
			Annotation::new("left", Placement::Data { x: -0.5, y: 2.2 }),
			Annotation::new("panel", Placement::Screen { x: 500.0, y: 500.0 }),
		];

		let bounds = Scene::compose(&graph, &layout, annotations)
			.unwrap()
			.bounds()
			.unwrap();
		assert_eq!(
			bounds,
			Bounds {
				min_x: -0.5,
				min_y: 1.0,
				max_x: 3.0,
				max_y: 2.2
			}
		);
	}

	#[test]
	fn neighbors_follow_both_directions() {
		let graph = CommitGraph::from_literals(["a", "b", "c"], [("a", "b", ""), ("c", "a", "")]);
		let layout = layout_of(&[("a", [0.0, 0.0]), ("b", [1.0, 0.0]), ("c", [2.0, 0.0])]);
		let scene = Scene::compose(&graph, &layout, vec![]).unwrap();

		let mut around_a: Vec<_> = scene.neighbors(0).collect();
		around_a.sort();
		assert_eq!(around_a, vec![1, 2]);
	}

	#[test]
	fn stats_lines_stack_downward() {
		let graph = CommitGraph::from_literals(["a", "b"], [("a", "b", "")]);
		let stats = GraphStats::of(&graph);

		let data = stats_annotations(&stats, Placement::Data { x: -0.5, y: 2.2 }, 0.3);
		match data[1].placement {
			Placement::Data { x, y } => {
				assert_eq!(x, -0.5);
				assert!((y - 1.9).abs() < 1e-9);
			}
			other => panic!("expected data placement, got {other:?}"),
		}

		let screen = stats_annotations(&stats, Placement::Screen { x: 16.0, y: 80.0 }, 20.0);
		assert_eq!(screen[2].placement, Placement::Screen { x: 16.0, y: 120.0 });
		assert_eq!(screen[0].text, "Number of vertices: 2");
	}

	#[test]
	fn annotation_reads_flattened_json() {
		let a: Annotation =
			serde_json::from_str(r#"{"text": "hi", "space": "screen", "x": 4, "y": 8}"#).unwrap();
		assert_eq!(a.placement, Placement::Screen { x: 4.0, y: 8.0 });
		assert_eq!(a.style, AnnotationStyle::default());
	}
}
