//! In-memory commit graph and the builder that fills it.
//!
//! Nodes are unique by id and keep the slot of their first insertion; a later
//! node with the same id replaces the earlier fields. Edges are kept exactly as
//! given, duplicates and dangling ids included. Validation of edge endpoints
//! happens later, when a layout or scene is built.

use std::collections::HashMap;

use log::debug;

mod loader;
pub mod sample;
mod stats;
mod types;

pub use loader::{load_path, load_script_element, parse_str, script_text};
pub use stats::GraphStats;
pub use types::{EdgeRecord, GraphDocument, NodeRecord};

/// A commit vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
	/// Unique commit id.
	pub id: String,
	/// Headline, usually the commit message.
	pub title: String,
	/// Secondary line, usually the author.
	pub subtitle: String,
	/// Commit time as given.
	pub timestamp: String,
}

/// A directed link between two commits, referenced by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Edge {
	/// Parent commit id.
	pub source: String,
	/// Child commit id.
	pub target: String,
	/// Branch name or other short stat. Empty when absent.
	pub label: String,
}

/// Directed commit graph: unique nodes plus an ordered edge list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitGraph {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
	edges: Vec<Edge>,
}

impl CommitGraph {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a graph from a loaded document, defaulting absent fields to "".
	pub fn from_document(doc: &GraphDocument) -> Self {
		let mut graph = Self::new();
		for record in &doc.nodes {
			graph.insert_node(Node {
				id: record.id.clone(),
				title: record.title.clone().unwrap_or_default(),
				subtitle: record.sub_title.clone().unwrap_or_default(),
				timestamp: record.timestamp.clone().unwrap_or_default(),
			});
		}
		for record in &doc.edges {
			graph.push_edge(Edge {
				source: record.source.clone(),
				target: record.target.clone(),
				label: record.main_stat.clone().unwrap_or_default(),
			});
		}
		debug!(
			"commit-graph: built {} nodes, {} edges from document",
			graph.node_count(),
			graph.edge_count()
		);
		graph
	}

	/// Build a graph from literal ids and `(source, target, label)` triples.
	pub fn from_literals<'a>(
		ids: impl IntoIterator<Item = &'a str>,
		edges: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
	) -> Self {
		let mut graph = Self::new();
		for id in ids {
			graph.insert_node(Node {
				id: id.to_string(),
				..Node::default()
			});
		}
		for (source, target, label) in edges {
			graph.push_edge(Edge {
				source: source.to_string(),
				target: target.to_string(),
				label: label.to_string(),
			});
		}
		graph
	}

	/// Insert a node. A repeated id overwrites the earlier node in place.
	pub fn insert_node(&mut self, node: Node) {
		match self.index.get(&node.id) {
			Some(&slot) => {
				if let Some(existing) = self.nodes.get_mut(slot) {
					*existing = node;
				}
			}
			None => {
				self.index.insert(node.id.clone(), self.nodes.len());
				self.nodes.push(node);
			}
		}
	}

	/// Append an edge. Endpoints are not checked here.
	pub fn push_edge(&mut self, edge: Edge) {
		self.edges.push(edge);
	}

	/// Nodes in first-insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node with `id`.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.position_of(id).and_then(|slot| self.nodes.get(slot))
	}

	/// Slot of `id` in [`CommitGraph::nodes`].
	pub fn position_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Whether a node with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Number of unique nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges, duplicates included.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True when there are no nodes and no edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Resolve every edge to node slots, failing on the first dangling id.
	pub fn resolved_edges(&self) -> crate::Result<Vec<(usize, usize)>> {
		self.edges
			.iter()
			.enumerate()
			.map(|(index, edge)| -> crate::Result<(usize, usize)> {
				let lookup = |id: &str| {
					self.position_of(id).ok_or_else(|| crate::GraphError::UnknownNode {
						index,
						id: id.to_string(),
					})
				};
				Ok((lookup(&edge.source)?, lookup(&edge.target)?))
			})
			.collect()
	}

	/// Serialize back to the document schema. Empty fields are left out.
	pub fn to_document(&self) -> GraphDocument {
		let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
		GraphDocument {
			nodes: self
				.nodes
				.iter()
				.map(|node| NodeRecord {
					id: node.id.clone(),
					title: non_empty(&node.title),
					sub_title: non_empty(&node.subtitle),
					timestamp: non_empty(&node.timestamp),
				})
				.collect(),
			edges: self
				.edges
				.iter()
				.map(|edge| EdgeRecord {
					source: edge.source.clone(),
					target: edge.target.clone(),
					main_stat: non_empty(&edge.label),
				})
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GraphError;

	fn node(id: &str, title: &str) -> NodeRecord {
		NodeRecord {
			id: id.into(),
			title: Some(title.into()),
			..Default::default()
		}
	}

	fn edge(source: &str, target: &str) -> EdgeRecord {
		EdgeRecord {
			source: source.into(),
			target: target.into(),
			main_stat: None,
		}
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let doc = GraphDocument {
			nodes: vec![NodeRecord {
				id: "a".into(),
				..Default::default()
			}],
			edges: vec![edge("a", "a")],
		};
		let graph = CommitGraph::from_document(&doc);

		let a = graph.node("a").unwrap();
		assert_eq!(a.title, "");
		assert_eq!(a.subtitle, "");
		assert_eq!(a.timestamp, "");
		assert_eq!(graph.edges()[0].label, "");
	}

	#[test]
	fn repeated_id_overwrites_in_place() {
		let doc = GraphDocument {
			nodes: vec![node("a", "first"), node("b", "b"), node("a", "second")],
			edges: vec![],
		};
		let graph = CommitGraph::from_document(&doc);

		assert_eq!(graph.node_count(), 2);
		assert_eq!(graph.nodes()[0].id, "a");
		assert_eq!(graph.nodes()[0].title, "second");
		assert_eq!(graph.position_of("b"), Some(1));
	}

	#[test]
	fn parallel_edges_are_kept_in_order() {
		let graph = CommitGraph::from_literals(
			["a", "b"],
			[("a", "b", "main"), ("a", "b", "main"), ("b", "a", "")],
		);

		assert_eq!(graph.edge_count(), 3);
		assert_eq!(graph.edges()[2].source, "b");
		assert_eq!(graph.resolved_edges().unwrap(), vec![(0, 1), (0, 1), (1, 0)]);
	}

	#[test]
	fn dangling_edges_are_accepted_until_resolved() {
		let graph = CommitGraph::from_literals(["a"], [("a", "ghost", "")]);
		assert_eq!(graph.edge_count(), 1);

		match graph.resolved_edges() {
			Err(GraphError::UnknownNode { index, id }) => {
				assert_eq!(index, 0);
				assert_eq!(id, "ghost");
			}
			other => panic!("expected UnknownNode, got {other:?}"),
		}
	}

	#[test]
	fn to_document_drops_empty_fields() {
		let graph = CommitGraph::from_literals(["a", "b"], [("a", "b", "")]);
		let doc = graph.to_document();

		assert_eq!(doc.nodes[0].title, None);
		assert_eq!(doc.edges[0].main_stat, None);
		assert_eq!(CommitGraph::from_document(&doc), graph);
	}
}
