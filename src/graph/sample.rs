//! A small two-branch history used when the page carries no graph document.

use std::collections::HashMap;

use super::CommitGraph;

/// Literal graph data with a hand-placed layout.
#[derive(Clone, Debug)]
pub struct SampleGraph {
	/// Node ids in insertion order.
	pub node_ids: Vec<&'static str>,
	/// `(source, target, branch)` triples.
	pub edges: Vec<(&'static str, &'static str, &'static str)>,
	/// Data-space coordinate of each node.
	pub positions: HashMap<String, [f64; 2]>,
	/// Data-space anchor of the first statistics line.
	pub stats_anchor: [f64; 2],
	/// Vertical distance between statistics lines.
	pub stats_line_step: f64,
}

impl SampleGraph {
	/// Graph of the literal ids and edges.
	pub fn build(&self) -> CommitGraph {
		CommitGraph::from_literals(self.node_ids.iter().copied(), self.edges.iter().copied())
	}
}

/// `main` and `feature-1` fork at `A` and merge into `F`.
pub fn branching_history() -> SampleGraph {
	let positions = [
		("A", [0.0, 2.0]),
		("B", [1.0, 3.0]),
		("C", [1.0, 1.0]),
		("D", [2.0, 3.0]),
		("E", [2.0, 1.0]),
		("F", [3.0, 2.0]),
	]
	.into_iter()
	.map(|(id, pos)| (id.to_string(), pos))
	.collect();

	SampleGraph {
		node_ids: vec!["A", "B", "C", "D", "E", "F"],
		edges: vec![
			("A", "B", "main"),
			("A", "C", "feature-1"),
			("B", "D", "main"),
			("C", "E", "feature-1"),
			("D", "F", "main"),
			("E", "F", "feature-1"),
		],
		positions,
		stats_anchor: [-0.5, 2.2],
		stats_line_step: 0.3,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_node_has_a_position() {
		let sample = branching_history();
		for id in &sample.node_ids {
			assert!(sample.positions.contains_key(*id), "{id} has no position");
		}
	}

	#[test]
	fn builds_six_nodes_and_six_edges() {
		let graph = branching_history().build();
		assert_eq!(graph.node_count(), 6);
		assert_eq!(graph.edge_count(), 6);
		assert_eq!(graph.edges()[1].label, "feature-1");
	}
}
