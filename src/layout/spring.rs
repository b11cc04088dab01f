//! Force-directed placement on top of the `force_graph` simulation.
//!
//! Nodes start on a circle with seeded jitter, so a given seed always yields
//! the same layout. The simulation then runs headless until the largest
//! per-step displacement drops under `tolerance`, or `iterations` runs out.

use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;
use serde::{Deserialize, Serialize};

use super::Layout;
use crate::graph::CommitGraph;

/// Simulation step, one 60 Hz frame.
const STEP_DT: f32 = 0.016;
const START_RADIUS: f64 = 100.0;
const START_JITTER: f64 = 20.0;

/// Tuning for the spring layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
	/// Seed for the initial jitter.
	pub seed: u64,
	/// Upper bound on simulation steps.
	pub iterations: usize,
	/// Stop once no node moves further than this in one step.
	pub tolerance: f32,
}

impl Default for SpringConfig {
	fn default() -> Self {
		Self {
			seed: 0,
			iterations: 600,
			tolerance: 0.05,
		}
	}
}

/// Deterministic hash of a float into `[0, 1)`.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

fn start_position(seed: u64, index: usize, count: usize) -> (f32, f32) {
	let angle = index as f64 * 2.0 * PI / count.max(1) as f64;
	let salt = (seed % 10_000) as f64 * 0.618 + index as f64;
	let jx = (pseudo_random(salt * 1.1 + 0.5) - 0.5) * START_JITTER;
	let jy = (pseudo_random(salt * 2.3 + 0.5) - 0.5) * START_JITTER;
	(
		(START_RADIUS * angle.cos() + jx) as f32,
		(START_RADIUS * angle.sin() + jy) as f32,
	)
}

fn snapshot(sim: &ForceGraph<usize, ()>, count: usize) -> Vec<(f32, f32)> {
	let mut positions = vec![(0.0, 0.0); count];
	sim.visit_nodes(|node| {
		if let Some(slot) = positions.get_mut(node.data.user_data) {
			*slot = (node.x(), node.y());
		}
	});
	positions
}

pub(super) fn spring_layout(
	graph: &CommitGraph,
	links: &[(usize, usize)],
	config: &SpringConfig,
) -> Layout {
	let count = graph.node_count();
	let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let handles: Vec<_> = (0..count)
		.map(|slot| {
			let (x, y) = start_position(config.seed, slot, count);
			sim.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: slot,
			})
		})
		.collect();

	// A self-loop pulls on nothing, and the simulation cannot hold one.
	for &(src, tgt) in links.iter().filter(|(src, tgt)| src != tgt) {
		if let (Some(&a), Some(&b)) = (handles.get(src), handles.get(tgt)) {
			sim.add_edge(a, b, EdgeData::default());
		}
	}

	let mut previous = snapshot(&sim, count);
	for step in 0..config.iterations {
		sim.update(STEP_DT);
		let current = snapshot(&sim, count);
		let shift = previous
			.iter()
			.zip(&current)
			.map(|(a, b)| ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt())
			.fold(0.0f32, f32::max);
		previous = current;
		if shift < config.tolerance {
			debug!("commit-graph: spring layout settled after {} steps", step + 1);
			break;
		}
	}

	let mut layout = Layout::default();
	for (node, &(x, y)) in graph.nodes().iter().zip(&previous) {
		// Simulation y grows downward.
		layout.insert(node.id.clone(), [x as f64, -(y as f64)]);
	}
	layout
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chain() -> CommitGraph {
		CommitGraph::from_literals(
			["a", "b", "c", "d"],
			[("a", "b", ""), ("b", "c", ""), ("c", "d", ""), ("a", "d", "")],
		)
	}

	fn run(graph: &CommitGraph, config: &SpringConfig) -> Layout {
		let links = graph.resolved_edges().unwrap();
		spring_layout(graph, &links, config)
	}

	#[test]
	fn same_seed_same_layout() {
		let graph = chain();
		let config = SpringConfig {
			seed: 42,
			..SpringConfig::default()
		};
		assert_eq!(run(&graph, &config), run(&graph, &config));
	}

	#[test]
	fn every_node_is_placed_at_a_finite_point() {
		let graph = chain();
		let layout = run(&graph, &SpringConfig::default());

		assert_eq!(layout.len(), 4);
		for (id, [x, y]) in layout.iter() {
			assert!(x.is_finite() && y.is_finite(), "{id} at ({x}, {y})");
		}
	}

	#[test]
	fn self_loops_are_left_out_of_the_simulation() {
		let graph = CommitGraph::from_literals(["a", "b"], [("a", "a", ""), ("a", "b", "")]);
		let looped = run(&graph, &SpringConfig::default());

		let plain = CommitGraph::from_literals(["a", "b"], [("a", "b", "")]);
		assert_eq!(looped, run(&plain, &SpringConfig::default()));
		assert_eq!(looped.len(), 2);
	}

	#[test]
	fn start_positions_are_distinct() {
		let points: Vec<_> = (0..8).map(|i| start_position(3, i, 8)).collect();
		for (i, a) in points.iter().enumerate() {
			for b in &points[i + 1..] {
				assert!((a.0 - b.0).abs() + (a.1 - b.1).abs() > 1.0);
			}
		}
	}

	#[test]
	fn zero_iterations_keeps_start_positions() {
		let graph = CommitGraph::from_literals(["only"], []);
		let config = SpringConfig {
			iterations: 0,
			..SpringConfig::default()
		};
		let (x, y) = start_position(config.seed, 0, 1);

		let layout = run(&graph, &config);
		assert_eq!(layout.get("only"), Some([x as f64, -(y as f64)]));
	}

	#[test]
	fn pseudo_random_stays_in_unit_range() {
		for i in 0..100 {
			let v = pseudo_random(i as f64 * 0.37);
			assert!((0.0..1.0).contains(&v));
		}
	}
}
