//! Error types shared by every stage of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading, laying out or composing a commit graph.
#[derive(Error, Debug)]
pub enum GraphError {
	/// The graph source (file path or page element) does not exist.
	#[error("graph data not found: {0}")]
	NotFound(String),

	/// The graph source exists but could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// Path that failed.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// The content is not well-formed JSON or does not match the schema.
	#[error("malformed graph data: {0}")]
	Parse(#[from] serde_json::Error),

	/// An edge points at a node id that is not part of the graph.
	#[error("edge #{index} references unknown node `{id}`")]
	UnknownNode {
		/// Position of the edge in the edge list.
		index: usize,
		/// The id that could not be resolved.
		id: String,
	},

	/// The layout has no coordinate for a node.
	#[error("no position for node `{0}`")]
	MissingPosition(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;
