//! Zoom-dependent scaling of graph visuals.
//!
//! World space is the fitted canvas space at zoom 1: one world unit is one
//! pixel before the user zooms. Screen space is canvas pixels after the view
//! transform.
//!
//! - [`ScaleBehavior::World`]: grows and shrinks with zoom.
//! - [`ScaleBehavior::Screen`]: constant pixel size.
//! - [`ScaleBehavior::Clamped`]: world-space, bounded in screen pixels.

use super::theme::Theme;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World completes the set for callers building their own ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to `[min_screen, max_screen]` pixels.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
#[allow(dead_code, reason = "Constant is the neutral choice for custom configs")]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, invisible at `zero_alpha_k`.
	Fade {
		/// Zoom at which the element disappears.
		zero_alpha_k: f64,
		/// Zoom at which the element is fully opaque.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Alpha multiplier in `[0, 1]` at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// How each element reacts to zoom.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node circle radius.
	pub node_radius: ScaleBehavior,
	/// Extra hit area around a node, in screen pixels.
	pub hit_padding: f64,
	/// Arrowhead length.
	pub arrow_size: ScaleBehavior,
	/// Node labels stop shrinking below this zoom.
	pub label_min_k: f64,
	/// Edge labels fade out when zoomed far out.
	pub edge_label_alpha: AlphaBehavior,
	/// Hover ring stroke in screen pixels.
	pub ring_width: f64,
	/// Hover ring gap from the node edge in screen pixels.
	pub ring_offset: f64,
	/// Canvas margin kept free when fitting the scene, in pixels.
	pub fit_padding: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: ScaleBehavior::Clamped {
				min_screen: 2.0,
				max_screen: f64::INFINITY,
			},
			hit_padding: 4.0,
			arrow_size: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: 24.0,
			},
			label_min_k: 0.5,
			edge_label_alpha: AlphaBehavior::Fade {
				zero_alpha_k: 0.3,
				full_alpha_k: 0.6,
			},
			ring_width: 1.5,
			ring_offset: 2.0,
			fit_padding: 48.0,
		}
	}
}

/// Scale values for one frame, all in world space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom factor the values were computed for.
	pub k: f64,
	/// Node circle radius.
	pub node_radius: f64,
	/// Pointer distance that still hits a node.
	pub hit_radius: f64,
	/// CSS font for node labels.
	pub node_label_font: String,
	/// Edge stroke width.
	pub edge_line_width: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
	/// CSS font for edge labels.
	pub edge_label_font: String,
	/// Edge label opacity.
	pub edge_label_alpha: f64,
	/// Hover ring stroke width.
	pub ring_width: f64,
	/// Hover ring gap from the node.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Resolve `config` against `theme` at zoom `k`.
	pub fn new(config: &ScaleConfig, theme: &Theme, k: f64) -> Self {
		let node_radius = config.node_radius.apply(theme.node.radius, k);
		// Node labels sit inside the circle and grow with it; edge labels keep
		// a constant screen size. Both stop shrinking at `label_min_k`.
		let node_label_size = theme.node.label_size * (config.label_min_k / k).max(1.0);
		let edge_label_size = theme.edge.label_size / k.max(config.label_min_k);

		Self {
			k,
			node_radius,
			hit_radius: node_radius + config.hit_padding / k,
			node_label_font: format!(
				"{} {}px sans-serif",
				theme.node.label_weight, node_label_size
			),
			edge_line_width: theme.edge.width / k,
			arrow_size: config.arrow_size.apply(theme.edge.arrow_size, k),
			edge_label_font: format!("{}px sans-serif", edge_label_size),
			edge_label_alpha: config.edge_label_alpha.apply(k),
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_behavior_cancels_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		assert_eq!(ScaleBehavior::World.apply(10.0, 2.0), 10.0);
	}

	#[test]
	fn clamped_behavior_bounds_screen_size() {
		let clamp = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: 20.0,
		};
		// 10 world units at k=4 would be 40px; capped to 20px = 5 world units.
		assert_eq!(clamp.apply(10.0, 4.0), 5.0);
		// 1 world unit at k=1 would be 1px; raised to 4px.
		assert_eq!(clamp.apply(1.0, 1.0), 4.0);
	}

	#[test]
	fn fade_is_linear_between_thresholds() {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.2,
			full_alpha_k: 0.6,
		};
		assert_eq!(fade.apply(0.1), 0.0);
		assert!((fade.apply(0.4) - 0.5).abs() < 1e-9);
		assert_eq!(fade.apply(2.0), 1.0);
	}

	#[test]
	fn unit_zoom_uses_theme_sizes() {
		let theme = Theme::branch_diagram();
		let scale = ScaledValues::new(&ScaleConfig::default(), &theme, 1.0);

		assert_eq!(scale.node_radius, 22.0);
		assert_eq!(scale.arrow_size, 12.0);
		assert_eq!(scale.edge_line_width, 1.0);
		assert_eq!(scale.node_label_font, "bold 15px sans-serif");
		assert_eq!(scale.edge_label_alpha, 1.0);
	}
}
