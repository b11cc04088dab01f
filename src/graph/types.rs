//! Serialized graph document: the JSON schema read by the loader.

use serde::{Deserialize, Serialize};

/// A commit entry in the document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
	/// Unique identifier for this commit. Edges reference nodes by it.
	pub id: String,
	/// Optional display title (e.g. "Commit 1a2b3c").
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Optional secondary line (e.g. "Branches: main, dev").
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub_title: Option<String>,
	/// Optional commit timestamp, kept as the exporter wrote it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<String>,
}

/// A directed parent-to-child link.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Optional edge label, usually a branch name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub main_stat: Option<String>,
}

/// Complete graph document: nodes and edges, both in file order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	/// Nodes in document order.
	pub nodes: Vec<NodeRecord>,
	/// Edges in document order.
	pub edges: Vec<EdgeRecord>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn optional_fields_use_camel_case_names() {
		let doc: GraphDocument = serde_json::from_str(
			r#"{
				"nodes": [{"id": "a", "title": "Commit a", "subTitle": "Branches: main", "timestamp": "t0"}],
				"edges": [{"source": "a", "target": "b", "mainStat": "main"}]
			}"#,
		)
		.unwrap();

		assert_eq!(doc.nodes[0].sub_title.as_deref(), Some("Branches: main"));
		assert_eq!(doc.edges[0].main_stat.as_deref(), Some("main"));
	}

	#[test]
	fn exporter_extras_are_ignored() {
		let doc: GraphDocument = serde_json::from_str(
			r#"{
				"nodes": [{"id": "a", "arc__failed": 0, "inDegree": 1, "isMerge": false}],
				"edges": [{"id": "1", "source": "a", "target": "a"}]
			}"#,
		)
		.unwrap();

		assert_eq!(doc.nodes.len(), 1);
		assert_eq!(doc.nodes[0].title, None);
		assert_eq!(doc.edges[0].main_stat, None);
	}

	#[test]
	fn absent_fields_are_not_written_back() {
		let doc = GraphDocument {
			nodes: vec![NodeRecord {
				id: "a".into(),
				..Default::default()
			}],
			edges: vec![],
		};

		let json = serde_json::to_string(&doc).unwrap();
		assert_eq!(json, r#"{"nodes":[{"id":"a"}],"edges":[]}"#);
	}
}
