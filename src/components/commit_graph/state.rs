//! Scene view state and interaction tracking.
//!
//! Holds the fitted world positions of a [`Scene`], the pan/zoom transform,
//! drag and pan gestures, and per-node hover highlight with smooth intensity
//! transitions.

use std::collections::{HashMap, HashSet};

use super::scale::{ScaleConfig, ScaledValues};
use super::view::DataFit;
use crate::scene::{Placement, Scene};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	/// Horizontal pan in pixels.
	pub x: f64,
	/// Vertical pan in pixels.
	pub y: f64,
	/// Zoom factor (1.0 = fitted, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being dragged.
	pub active: bool,
	/// Dragged node.
	pub node_idx: Option<usize>,
	/// Pointer x at drag start.
	pub start_x: f64,
	/// Pointer y at drag start.
	pub start_y: f64,
	/// Node world x at drag start.
	pub node_start_x: f64,
	/// Node world y at drag start.
	pub node_start_y: f64,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The background is being dragged.
	pub active: bool,
	/// Pointer x at pan start.
	pub start_x: f64,
	/// Pointer y at pan start.
	pub start_y: f64,
	/// Transform x at pan start.
	pub transform_start_x: f64,
	/// Transform y at pan start.
	pub transform_start_y: f64,
}

/// Minimum time (seconds) a highlight is held before it may fade out, so a
/// pointer grazing a node does not flicker.
const MIN_HOLD_TIME: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;
/// Intensities below this are dropped.
const VISIBLE_EPSILON: f64 = 0.005;

/// Per-node highlight intensity, eased toward the hovered node and its
/// neighbours with exponential smoothing.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Node under the pointer.
	pub hovered_node: Option<usize>,
	target_set: HashSet<usize>,
	node_intensity: HashMap<usize, f64>,
	hold_timer: HashMap<usize, f64>,
	cached_max: f64,
}

impl HighlightState {
	/// Change the hovered node and recompute which nodes should light up.
	pub fn set_hover(&mut self, node: Option<usize>, scene: &Scene) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			self.target_set.extend(scene.neighbors(idx));
			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Ease every intensity toward 1 (targeted) or 0 (released) over `dt`.
	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}

		let targets = &self.target_set;
		self.hold_timer.retain(|idx, timer| {
			if targets.contains(idx) {
				return true;
			}
			*timer -= dt;
			*timer > 0.0
		});

		let holds = &self.hold_timer;
		let mut max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !targets.contains(idx) && !holds.contains_key(idx) {
				*intensity *= fade_out;
			}
			max = max.max(*intensity);
			*intensity > VISIBLE_EPSILON
		});
		self.cached_max = max;
	}

	/// Current intensity of a node in `[0, 1]`.
	pub fn node_intensity(&self, idx: usize) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, a: usize, b: usize) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Largest intensity of any node, for dimming everything else.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Everything the canvas needs between frames.
///
/// Created when the component mounts, then mutated by event handlers and
/// the animation loop.
pub struct SceneState {
	/// Scene being shown.
	pub scene: Scene,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node drag gesture.
	pub drag: DragState,
	/// Background pan gesture.
	pub pan: PanState,
	/// Hover highlight.
	pub highlight: HighlightState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Seconds since mount.
	pub time: f64,
	fit: DataFit,
	/// World position of each scene node.
	points: Vec<(f64, f64)>,
}

impl SceneState {
	/// Fit `scene` into a `width` x `height` canvas.
	pub fn new(scene: Scene, width: f64, height: f64, config: &ScaleConfig) -> Self {
		let mut state = Self {
			scene,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			time: 0.0,
			fit: DataFit::new(None, width, height, 0.0),
			points: Vec::new(),
		};
		state.refit(config);
		state
	}

	/// Recompute world positions from data positions for the current size.
	/// Dragged nodes snap back and the view transform resets.
	pub fn refit(&mut self, config: &ScaleConfig) {
		self.fit = DataFit::new(
			self.scene.bounds(),
			self.width,
			self.height,
			config.fit_padding,
		);
		self.points = self
			.scene
			.nodes
			.iter()
			.map(|n| self.fit.to_world(n.x, n.y))
			.collect();
		self.transform = ViewTransform::default();
	}

	/// World position of every node, by scene index.
	pub fn points(&self) -> &[(f64, f64)] {
		&self.points
	}

	/// World position of one node.
	pub fn node_position(&self, idx: usize) -> Option<(f64, f64)> {
		self.points.get(idx).copied()
	}

	/// Place a node at a world position.
	pub fn move_node(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(p) = self.points.get_mut(idx) {
			*p = (x, y);
		}
	}

	/// Screen pixel to world position.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// World position to screen pixel.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Screen position of an annotation's top-left text anchor.
	pub fn annotation_screen_position(&self, placement: Placement) -> (f64, f64) {
		match placement {
			Placement::Data { x, y } => {
				let (wx, wy) = self.fit.to_world(x, y);
				self.graph_to_screen(wx, wy)
			}
			Placement::Screen { x, y } => (x, y),
		}
	}

	/// Closest node whose hit circle contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64, scale: &ScaledValues) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.points
			.iter()
			.enumerate()
			.map(|(idx, &(x, y))| (idx, ((x - gx).powi(2) + (y - gy).powi(2)).sqrt()))
			.filter(|&(_, dist)| dist < scale.hit_radius)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Hover `node`, or nothing.
	pub fn set_hover(&mut self, node: Option<usize>) {
		self.highlight.set_hover(node, &self.scene);
	}

	/// Advance animations by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.time += dt;
		self.highlight.tick(dt);
	}

	/// New canvas size. Refits the scene.
	pub fn resize(&mut self, width: f64, height: f64, config: &ScaleConfig) {
		self.width = width;
		self.height = height;
		self.refit(config);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::commit_graph::theme::Theme;
	use crate::graph::CommitGraph;
	use crate::layout::Layout;

	fn triangle_state() -> SceneState {
		let graph = CommitGraph::from_literals(["a", "b", "c"], [("a", "b", ""), ("b", "c", "")]);
		let mut layout = Layout::default();
		layout.insert("a", [0.0, 0.0]);
		layout.insert("b", [1.0, 0.0]);
		layout.insert("c", [0.0, 1.0]);
		let scene = Scene::compose(&graph, &layout, vec![]).unwrap();
		SceneState::new(scene, 300.0, 300.0, &ScaleConfig::default())
	}

	fn scale() -> ScaledValues {
		ScaledValues::new(&ScaleConfig::default(), &Theme::branch_diagram(), 1.0)
	}

	#[test]
	fn nodes_are_fitted_inside_the_canvas() {
		let state = triangle_state();
		for &(x, y) in state.points() {
			assert!((0.0..=300.0).contains(&x) && (0.0..=300.0).contains(&y));
		}
		// y is flipped: data y=1 is above data y=0.
		assert!(state.points()[2].1 < state.points()[0].1);
	}

	#[test]
	fn hit_test_finds_node_under_pointer() {
		let state = triangle_state();
		let (bx, by) = state.points()[1];

		assert_eq!(state.node_at_position(bx + 3.0, by, &scale()), Some(1));
		assert_eq!(state.node_at_position(150.0, 150.0, &scale()), None);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut state = triangle_state();
		let before = state.screen_to_graph(120.0, 80.0);
		state.zoom_at(120.0, 80.0, 1.1);
		let after = state.screen_to_graph(120.0, 80.0);

		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		assert!((state.transform.k - 1.1).abs() < 1e-12);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = triangle_state();
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 0.5);
		}
		assert_eq!(state.transform.k, 0.1);
	}

	#[test]
	fn hover_lights_up_neighbours() {
		let mut state = triangle_state();
		state.set_hover(Some(1));
		for _ in 0..60 {
			state.tick(0.016);
		}

		assert!(state.highlight.node_intensity(0) > 0.9);
		assert!(state.highlight.node_intensity(2) > 0.9);
		assert!(state.highlight.max_intensity() > 0.9);
	}

	#[test]
	fn released_highlight_fades_after_hold() {
		let mut state = triangle_state();
		state.set_hover(Some(0));
		for _ in 0..30 {
			state.tick(0.016);
		}
		state.set_hover(None);
		state.tick(0.05);
		let held = state.highlight.node_intensity(0);
		for _ in 0..200 {
			state.tick(0.016);
		}

		assert!(held > 0.5);
		assert_eq!(state.highlight.node_intensity(0), 0.0);
	}

	#[test]
	fn screen_annotations_ignore_the_view_transform() {
		let mut state = triangle_state();
		state.zoom_at(10.0, 10.0, 2.0);
		assert_eq!(
			state.annotation_screen_position(Placement::Screen { x: 16.0, y: 24.0 }),
			(16.0, 24.0)
		);
	}
}
