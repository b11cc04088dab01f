//! Placement from a caller-supplied coordinate table.

use std::collections::HashMap;

use super::Layout;
use crate::graph::CommitGraph;
use crate::{GraphError, Result};

pub(super) fn fixed_layout(
	graph: &CommitGraph,
	positions: &HashMap<String, [f64; 2]>,
) -> Result<Layout> {
	let mut layout = Layout::default();
	for node in graph.nodes() {
		let position = positions
			.get(&node.id)
			.ok_or_else(|| GraphError::MissingPosition(node.id.clone()))?;
		layout.insert(node.id.clone(), *position);
	}
	Ok(layout)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::sample;

	#[test]
	fn uses_table_coordinates() {
		let sample = sample::branching_history();
		let layout = fixed_layout(&sample.build(), &sample.positions).unwrap();

		assert_eq!(layout.len(), 6);
		assert_eq!(layout.get("F"), Some([3.0, 2.0]));
	}

	#[test]
	fn missing_entry_fails() {
		let graph = CommitGraph::from_literals(["A", "G"], []);
		let positions = HashMap::from([("A".to_string(), [0.0, 0.0])]);

		let err = fixed_layout(&graph, &positions).unwrap_err();
		assert!(matches!(err, GraphError::MissingPosition(ref id) if id == "G"));
	}

	#[test]
	fn extra_entries_are_ignored() {
		let graph = CommitGraph::from_literals(["A"], []);
		let positions = HashMap::from([
			("A".to_string(), [0.0, 0.0]),
			("unused".to_string(), [9.0, 9.0]),
		]);

		assert_eq!(fixed_layout(&graph, &positions).unwrap().len(), 1);
	}
}
