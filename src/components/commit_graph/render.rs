//! Canvas rendering for the commit graph.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with arrowheads, then edge labels (world space)
//! 3. Dimmed nodes, then highlighted nodes on top (world space)
//! 4. Annotations and the hover tooltip (screen space)

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::SceneState;
use super::theme::Theme;
use crate::scene::{Annotation, AnnotationStyle, SceneNode};

type Point = (f64, f64);

/// Straight arrow between two circles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
	/// Shaft start on the source circle.
	pub start: Point,
	/// Where the line meets the base of the head.
	pub shaft_end: Point,
	/// Point touching the target circle.
	pub tip: Point,
	/// Head corner on the left of travel.
	pub left: Point,
	/// Head corner on the right of travel.
	pub right: Point,
}

/// Arrow from `from` to `to`, trimmed by the two node radii.
///
/// `None` when the circles touch or the edge is a self-loop.
pub fn arrow_geometry(
	from: Point,
	to: Point,
	source_radius: f64,
	target_radius: f64,
	head: f64,
) -> Option<Arrow> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 || dist <= source_radius + target_radius {
		return None;
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let tip = (to.0 - ux * target_radius, to.1 - uy * target_radius);
	let back = (tip.0 - ux * head, tip.1 - uy * head);
	let (px, py) = (-uy * head * 0.5, ux * head * 0.5);

	Some(Arrow {
		start: (from.0 + ux * source_radius, from.1 + uy * source_radius),
		shaft_end: back,
		tip,
		left: (back.0 + px, back.1 + py),
		right: (back.0 - px, back.1 - py),
	})
}

/// How one edge is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeShape {
	/// Shaft plus head.
	Arrow(Arrow),
	/// Centre-to-centre line for circles that overlap.
	Line(Point, Point),
	/// Self-loop or coincident nodes.
	Hidden,
}

/// Arrow when there is room for one, otherwise a bare line between centres.
pub fn edge_shape(
	from: Point,
	to: Point,
	source_radius: f64,
	target_radius: f64,
	head: f64,
) -> EdgeShape {
	if let Some(arrow) = arrow_geometry(from, to, source_radius, target_radius, head) {
		return EdgeShape::Arrow(arrow);
	}
	let dist = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
	if dist < 0.001 {
		EdgeShape::Hidden
	} else {
		EdgeShape::Line(from, to)
	}
}

/// Centre of the segment `a`-`b`.
pub fn midpoint(a: Point, b: Point) -> Point {
	((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Lines shown in the hover tooltip. Empty fields are skipped.
pub fn tooltip_lines(node: &SceneNode) -> Vec<&str> {
	let headline = if node.title.is_empty() {
		node.id.as_str()
	} else {
		node.title.as_str()
	};
	[headline, node.subtitle.as_str(), node.timestamp.as_str()]
		.into_iter()
		.filter(|line| !line.is_empty())
		.collect()
}

/// Ease-in-out on `[0, 1]`.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders one frame.
pub fn render(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, theme, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	if theme.edge.show_labels {
		draw_edge_labels(state, ctx, &scale, theme);
	}
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	for annotation in &state.scene.annotations {
		draw_annotation(state, ctx, annotation);
	}
	draw_tooltip(state, ctx, &scale, theme);
}

fn draw_background(state: &SceneState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bg = &theme.background;
	let gradient = bg
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &bg.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &bg.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&bg.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Alpha multiplier for an element given its own and the global highlight.
fn emphasis(own: f64, max: f64) -> f64 {
	let (own, max) = (smooth_step(own), smooth_step(max));
	if own > 0.01 {
		0.7 + 0.3 * own
	} else if max > 0.01 {
		1.0 - 0.7 * max
	} else {
		1.0
	}
}

fn draw_edges(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let color = theme.edge.color;
	let max_t = state.highlight.max_intensity();

	for edge in &state.scene.edges {
		let (Some(from), Some(to)) = (
			state.node_position(edge.source),
			state.node_position(edge.target),
		) else {
			continue;
		};
		let shape = edge_shape(
			from,
			to,
			scale.node_radius,
			scale.node_radius,
			scale.arrow_size,
		);
		let (start, end) = match shape {
			EdgeShape::Arrow(arrow) => (arrow.start, arrow.shaft_end),
			EdgeShape::Line(a, b) => (a, b),
			EdgeShape::Hidden => continue,
		};

		let edge_t = state.highlight.edge_intensity(edge.source, edge.target);
		let alpha = emphasis(edge_t, max_t) * color.a;
		let css = color.with_alpha(alpha).to_css();

		ctx.set_stroke_style_str(&css);
		ctx.set_line_width(scale.edge_line_width * (1.0 + 0.5 * smooth_step(edge_t)));
		ctx.begin_path();
		ctx.move_to(start.0, start.1);
		ctx.line_to(end.0, end.1);
		ctx.stroke();

		let EdgeShape::Arrow(arrow) = shape else {
			continue;
		};
		ctx.set_fill_style_str(&css);
		ctx.begin_path();
		ctx.move_to(arrow.tip.0, arrow.tip.1);
		ctx.line_to(arrow.left.0, arrow.left.1);
		ctx.line_to(arrow.right.0, arrow.right.1);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_edge_labels(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	if scale.edge_label_alpha <= 0.0 {
		return;
	}

	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let pad = 3.0 / scale.k;
	let line_height = theme.edge.label_size / scale.k.max(0.5);

	for edge in state.scene.edges.iter().filter(|e| !e.label.is_empty()) {
		let (Some(a), Some(b)) = (
			state.node_position(edge.source),
			state.node_position(edge.target),
		) else {
			continue;
		};
		let (mx, my) = midpoint(a, b);
		let text_width = ctx
			.measure_text(&edge.label)
			.map(|m| m.width())
			.unwrap_or(0.0);

		ctx.set_global_alpha(scale.edge_label_alpha);
		ctx.set_fill_style_str(&theme.edge.label_background.to_css());
		ctx.fill_rect(
			mx - text_width / 2.0 - pad,
			my - line_height / 2.0 - pad,
			text_width + 2.0 * pad,
			line_height + 2.0 * pad,
		);
		ctx.set_fill_style_str(&theme.edge.label_color.to_css());
		let _ = ctx.fill_text(&edge.label, mx, my);
	}

	ctx.set_global_alpha(1.0);
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}

fn draw_nodes(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = state.highlight.max_intensity();
	let points = state.points();

	// Pass 1: resting nodes, dimmed while anything is highlighted
	for (idx, &point) in points.iter().enumerate() {
		if state.highlight.node_intensity(idx) > 0.001 {
			continue;
		}
		let radius = scale.node_radius * (1.0 - 0.1 * smooth_step(max_t));
		draw_node(ctx, state, idx, point, radius, emphasis(0.0, max_t), scale, theme);
	}

	// Pass 2: highlighted nodes on top
	for (idx, &point) in points.iter().enumerate() {
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			continue;
		}
		let eased = smooth_step(node_t);
		let hovered = state.highlight.hovered_node == Some(idx);
		let grow = if hovered { 0.3 } else { 0.15 };
		let radius = scale.node_radius * (1.0 + grow * eased);
		draw_node(ctx, state, idx, point, radius, emphasis(node_t, max_t), scale, theme);

		if hovered {
			ctx.begin_path();
			let _ = ctx.arc(point.0, point.1, radius + scale.ring_offset, 0.0, 2.0 * PI);
			let ring = theme.node.ring_color;
			ctx.set_stroke_style_str(&ring.with_alpha(ring.a * eased).to_css());
			ctx.set_line_width(scale.ring_width);
			let dash = 3.0 / scale.k;
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(dash),
			));
			ctx.stroke();
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	ctx: &CanvasRenderingContext2d,
	state: &SceneState,
	idx: usize,
	(x, y): Point,
	radius: f64,
	alpha: f64,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let style = &theme.node;
	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	let gradient = style
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &style.fill.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &style.fill.to_css());
			let _ = gradient.add_color_stop(1.0, &style.fill.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&style.fill.to_css()),
	}
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&style.border_color.to_css());
		ctx.set_line_width(style.border_width / scale.k);
		ctx.stroke();
	}

	if style.show_labels {
		if let Some(node) = state.scene.nodes.get(idx) {
			ctx.set_font(&scale.node_label_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			ctx.set_fill_style_str(&style.label_color.to_css());
			let _ = ctx.fill_text(&node.id, x, y);
			ctx.set_text_align("start");
			ctx.set_text_baseline("alphabetic");
		}
	}

	ctx.set_global_alpha(1.0);
}

/// Fill and opacity of the box behind an annotation. The fill is any CSS
/// color and goes to the canvas as written.
pub fn annotation_box(style: &AnnotationStyle) -> (&str, f64) {
	(style.background.as_str(), style.alpha.clamp(0.0, 1.0))
}

fn draw_annotation(state: &SceneState, ctx: &CanvasRenderingContext2d, annotation: &Annotation) {
	let style = &annotation.style;
	let (x, y) = state.annotation_screen_position(annotation.placement);
	let pad = 4.0;

	ctx.set_font(&format!("{}px sans-serif", style.font_size));
	ctx.set_text_baseline("middle");
	let width = ctx
		.measure_text(&annotation.text)
		.map(|m| m.width())
		.unwrap_or(0.0);

	let (background, alpha) = annotation_box(style);
	ctx.set_global_alpha(alpha);
	ctx.set_fill_style_str(background);
	ctx.fill_rect(
		x - pad,
		y - style.font_size / 2.0 - pad,
		width + 2.0 * pad,
		style.font_size + 2.0 * pad,
	);
	ctx.set_global_alpha(1.0);

	ctx.set_fill_style_str(&style.color);
	let _ = ctx.fill_text(&annotation.text, x, y);
	ctx.set_text_baseline("alphabetic");
}

fn draw_tooltip(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	if state.drag.active {
		return;
	}
	let Some(idx) = state.highlight.hovered_node else {
		return;
	};
	let (Some(node), Some((gx, gy))) = (state.scene.nodes.get(idx), state.node_position(idx))
	else {
		return;
	};

	let lines = tooltip_lines(node);
	let style = &theme.tooltip;
	let line_height = style.font_size * 1.4;
	let pad = 6.0;

	ctx.set_font(&format!("{}px sans-serif", style.font_size));
	let width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let height = line_height * lines.len() as f64;

	let (sx, sy) = state.graph_to_screen(gx, gy);
	let offset = scale.node_radius * state.transform.k + 8.0;
	// Keep the box on the canvas.
	let x = (sx + offset).min(state.width - width - 2.0 * pad).max(0.0);
	let y = (sy - height / 2.0 - pad).clamp(0.0, (state.height - height - 2.0 * pad).max(0.0));

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(x, y, width + 2.0 * pad, height + 2.0 * pad);

	ctx.set_fill_style_str(&style.text.to_css());
	ctx.set_text_baseline("top");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + pad, y + pad + i as f64 * line_height);
	}
	ctx.set_text_baseline("alphabetic");
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arrow_stops_at_target_circle() {
		let arrow = arrow_geometry((0.0, 0.0), (100.0, 0.0), 10.0, 10.0, 8.0).unwrap();

		assert_eq!(arrow.start, (10.0, 0.0));
		assert_eq!(arrow.tip, (90.0, 0.0));
		assert_eq!(arrow.shaft_end, (82.0, 0.0));
		assert_eq!(arrow.left, (82.0, 4.0));
		assert_eq!(arrow.right, (82.0, -4.0));
	}

	#[test]
	fn overlapping_or_looping_edges_have_no_arrow() {
		assert_eq!(arrow_geometry((0.0, 0.0), (0.0, 0.0), 5.0, 5.0, 4.0), None);
		assert_eq!(arrow_geometry((0.0, 0.0), (8.0, 0.0), 5.0, 5.0, 4.0), None);
	}

	#[test]
	fn overlapping_nodes_keep_a_bare_line() {
		assert_eq!(
			edge_shape((0.0, 0.0), (8.0, 0.0), 5.0, 5.0, 4.0),
			EdgeShape::Line((0.0, 0.0), (8.0, 0.0))
		);
		assert_eq!(edge_shape((1.0, 1.0), (1.0, 1.0), 5.0, 5.0, 4.0), EdgeShape::Hidden);
		assert!(matches!(
			edge_shape((0.0, 0.0), (100.0, 0.0), 5.0, 5.0, 4.0),
			EdgeShape::Arrow(_)
		));
	}

	#[test]
	fn annotation_background_passes_named_colors_through() {
		let style: AnnotationStyle =
			serde_json::from_str(r#"{"background": "white", "alpha": 1.5}"#).unwrap();
		assert_eq!(annotation_box(&style), ("white", 1.0));

		let style = AnnotationStyle {
			background: "#fff".into(),
			..AnnotationStyle::default()
		};
		assert_eq!(annotation_box(&style), ("#fff", 0.5));
	}

	#[test]
	fn edge_label_sits_at_the_midpoint() {
		assert_eq!(midpoint((0.0, 2.0), (1.0, 3.0)), (0.5, 2.5));
	}

	#[test]
	fn tooltip_falls_back_to_id() {
		let node = SceneNode {
			id: "1a2b".into(),
			title: String::new(),
			subtitle: "Branches: main".into(),
			timestamp: String::new(),
			x: 0.0,
			y: 0.0,
		};
		assert_eq!(tooltip_lines(&node), vec!["1a2b", "Branches: main"]);
	}

	#[test]
	fn smooth_step_pins_the_ends() {
		assert_eq!(smooth_step(0.0), 0.0);
		assert_eq!(smooth_step(1.0), 1.0);
		assert_eq!(smooth_step(0.5), 0.5);
	}
}
