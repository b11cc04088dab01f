//! Summary figures for a commit graph, used for the annotation panel.

use std::collections::VecDeque;

use super::CommitGraph;

/// Counts and shape measures computed from a [`CommitGraph`].
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStats {
	/// Number of nodes.
	pub vertices: usize,
	/// Number of edges.
	pub edges: usize,
	/// Distinct non-empty edge labels, in first-seen order.
	pub branches: Vec<String>,
	/// `2 * edges / vertices`, or 0 for an empty graph.
	pub average_degree: f64,
	/// Largest in-degree plus out-degree of any node.
	pub max_degree: usize,
	/// Longest breadth-first edge distance from a root commit.
	pub depth: usize,
}

impl GraphStats {
	/// Compute every statistic for `graph`.
	pub fn of(graph: &CommitGraph) -> Self {
		let vertices = graph.node_count();
		let edges = graph.edge_count();

		let mut branches: Vec<String> = Vec::new();
		for edge in graph.edges() {
			if !edge.label.is_empty() && !branches.contains(&edge.label) {
				branches.push(edge.label.clone());
			}
		}

		let average_degree = if vertices == 0 {
			0.0
		} else {
			2.0 * edges as f64 / vertices as f64
		};

		// Dangling edges have no node to count against.
		let links: Vec<(usize, usize)> = graph
			.edges()
			.iter()
			.filter_map(|e| Some((graph.position_of(&e.source)?, graph.position_of(&e.target)?)))
			.collect();

		let mut degree = vec![0usize; vertices];
		let mut in_degree = vec![0usize; vertices];
		let mut children: Vec<Vec<usize>> = vec![Vec::new(); vertices];
		for &(src, tgt) in &links {
			degree[src] += 1;
			degree[tgt] += 1;
			in_degree[tgt] += 1;
			children[src].push(tgt);
		}
		let max_degree = degree.iter().copied().max().unwrap_or(0);

		Self {
			vertices,
			edges,
			branches,
			average_degree,
			max_degree,
			depth: history_depth(&in_degree, &children),
		}
	}

	/// Text lines for the statistics panel.
	pub fn summary_lines(&self) -> Vec<String> {
		let mut lines = vec![
			format!("Number of vertices: {}", self.vertices),
			format!("Number of edges: {}", self.edges),
		];
		if !self.branches.is_empty() {
			lines.push(format!("Branches: {}", self.branches.join(", ")));
		}
		lines.push(format!("Average degree: {}", format_ratio(self.average_degree)));
		lines.push(format!("Maximum degree: {}", self.max_degree));
		lines.push(format!("Depth of commit history: {}", self.depth));
		lines
	}
}

/// Multi-source BFS from every root. Cycles are visited once.
fn history_depth(in_degree: &[usize], children: &[Vec<usize>]) -> usize {
	let mut distance: Vec<Option<usize>> = vec![None; in_degree.len()];
	let mut queue = VecDeque::new();
	for (idx, &deg) in in_degree.iter().enumerate() {
		if deg == 0 {
			distance[idx] = Some(0);
			queue.push_back(idx);
		}
	}

	let mut depth = 0;
	while let Some(idx) = queue.pop_front() {
		let d = distance[idx].unwrap_or(0);
		depth = depth.max(d);
		for &child in &children[idx] {
			if distance[child].is_none() {
				distance[child] = Some(d + 1);
				queue.push_back(child);
			}
		}
	}
	depth
}

/// Whole numbers print without decimals, others with two.
fn format_ratio(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{value:.0}")
	} else {
		format!("{value:.2}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_graph_has_zero_stats() {
		let stats = GraphStats::of(&CommitGraph::new());
		assert_eq!(stats.vertices, 0);
		assert_eq!(stats.average_degree, 0.0);
		assert_eq!(stats.max_degree, 0);
		assert_eq!(stats.depth, 0);
		assert!(stats.branches.is_empty());
	}

	#[test]
	fn linear_history() {
		let graph = CommitGraph::from_literals(
			["a", "b", "c"],
			[("a", "b", "main"), ("b", "c", "main")],
		);
		let stats = GraphStats::of(&graph);

		assert_eq!(stats.depth, 2);
		assert_eq!(stats.max_degree, 2);
		assert!((stats.average_degree - 4.0 / 3.0).abs() < 1e-9);
		assert_eq!(stats.branches, vec!["main".to_string()]);
	}

	#[test]
	fn cycle_without_root_has_zero_depth() {
		let graph = CommitGraph::from_literals(["a", "b"], [("a", "b", ""), ("b", "a", "")]);
		assert_eq!(GraphStats::of(&graph).depth, 0);
	}

	#[test]
	fn dangling_edges_count_but_add_no_degree() {
		let graph = CommitGraph::from_literals(["a"], [("a", "z", "")]);
		let stats = GraphStats::of(&graph);

		assert_eq!(stats.edges, 1);
		assert_eq!(stats.max_degree, 0);
	}

	#[test]
	fn summary_lines_skip_branches_when_unlabelled() {
		let graph = CommitGraph::from_literals(["a", "b"], [("a", "b", "")]);
		let lines = GraphStats::of(&graph).summary_lines();

		assert_eq!(
			lines,
			vec![
				"Number of vertices: 2",
				"Number of edges: 1",
				"Average degree: 1",
				"Maximum degree: 1",
				"Depth of commit history: 1",
			]
		);
	}

	#[test]
	fn fractional_average_has_two_decimals() {
		assert_eq!(format_ratio(1.3333), "1.33");
		assert_eq!(format_ratio(2.0), "2");
	}
}
