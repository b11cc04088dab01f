//! Node placement: a seeded force simulation or a fixed coordinate table.
//!
//! Layouts live in data space, where y grows upward. The renderer flips and
//! fits them into the canvas.

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::graph::CommitGraph;

mod fixed;
mod spring;

pub use spring::SpringConfig;

/// How to place nodes. Chosen by the caller, never inferred.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutConfig {
	/// Force-directed placement.
	Spring(SpringConfig),
	/// Look up each node id in a coordinate table.
	Fixed {
		/// Node id to `[x, y]`.
		positions: HashMap<String, [f64; 2]>,
	},
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self::Spring(SpringConfig::default())
	}
}

/// Node id to data-space coordinate, valid for one rendering pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: HashMap<String, [f64; 2]>,
}

impl Layout {
	/// Position of `id`.
	pub fn get(&self, id: &str) -> Option<[f64; 2]> {
		self.positions.get(id).copied()
	}

	/// Set the position of `id`.
	pub fn insert(&mut self, id: impl Into<String>, position: [f64; 2]) {
		self.positions.insert(id.into(), position);
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// True when nothing is placed.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Every placed node, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, [f64; 2])> {
		self.positions.iter().map(|(id, pos)| (id.as_str(), *pos))
	}
}

/// Place every node of `graph`.
///
/// Fails with [`crate::GraphError::UnknownNode`] if an edge names a node the
/// graph does not have, and with [`crate::GraphError::MissingPosition`] if a
/// fixed table lacks a node.
pub fn compute(graph: &CommitGraph, config: &LayoutConfig) -> Result<Layout> {
	let links = graph.resolved_edges()?;
	let layout = match config {
		LayoutConfig::Spring(spring) => spring::spring_layout(graph, &links, spring),
		LayoutConfig::Fixed { positions } => fixed::fixed_layout(graph, positions)?,
	};
	info!("commit-graph: placed {} nodes", layout.len());
	Ok(layout)
}
