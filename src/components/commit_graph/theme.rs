//! Visual theming for the commit graph.
//!
//! A theme fixes every color and base size used by the renderer. Sizes are
//! pixels at zoom 1; [`super::scale`] decides how they react to zoom.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f) as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	/// Hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Node visual style. All nodes share it.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Circle fill.
	pub fill: Color,
	/// Circle radius in pixels at zoom 1.
	pub radius: f64,
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Outline color.
	pub border_color: Color,
	/// Draw the node id inside the circle.
	pub show_labels: bool,
	/// Label text color.
	pub label_color: Color,
	/// CSS font weight for node labels ("normal", "bold").
	pub label_weight: &'static str,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Hover ring color.
	pub ring_color: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke and arrowhead color.
	pub color: Color,
	/// Line width in pixels.
	pub width: f64,
	/// Arrowhead length in pixels at zoom 1.
	pub arrow_size: f64,
	/// Draw edge labels at the midpoint.
	pub show_labels: bool,
	/// Label text color.
	pub label_color: Color,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Box behind edge labels.
	pub label_background: Color,
}

/// Tooltip shown next to a hovered node.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Text color.
	pub text: Color,
	/// Font size in pixels.
	pub font_size: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name.
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Node circles and labels.
	pub node: NodeStyle,
	/// Arrows and edge labels.
	pub edge: EdgeStyle,
	/// Hover tooltip.
	pub tooltip: TooltipStyle,
}

/// Theme selector used by page configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeName {
	/// Small translucent dots without text, for long histories.
	CommitHistory,
	/// Large labelled circles for small diagrams.
	BranchDiagram,
	/// Light on dark.
	Midnight,
}

impl Theme {
	/// Preset for `name`.
	pub fn named(name: ThemeName) -> Self {
		match name {
			ThemeName::CommitHistory => Self::commit_history(),
			ThemeName::BranchDiagram => Self::branch_diagram(),
			ThemeName::Midnight => Self::midnight(),
		}
	}

	/// Dense history: small translucent blue dots, gray arrows, no text.
	pub fn commit_history() -> Self {
		Self {
			name: "commit_history",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
			},
			node: NodeStyle {
				fill: Color::rgba(0, 0, 255, 0.7),
				radius: 3.0,
				use_gradient: false,
				border_width: 0.0,
				border_color: Color::rgba(0, 0, 0, 0.0),
				show_labels: false,
				label_color: Color::rgb(0, 0, 0),
				label_weight: "normal",
				label_size: 10.0,
				ring_color: Color::rgba(0, 0, 0, 0.8),
			},
			edge: EdgeStyle {
				color: Color::rgba(128, 128, 128, 0.7),
				width: 1.0,
				arrow_size: 4.0,
				show_labels: false,
				label_color: Color::rgb(255, 0, 0),
				label_size: 10.0,
				label_background: Color::rgba(255, 255, 255, 0.8),
			},
			tooltip: TooltipStyle {
				background: Color::rgba(30, 30, 30, 0.9),
				text: Color::rgb(255, 255, 255),
				font_size: 12.0,
			},
		}
	}

	/// Few labelled commits: large sky-blue circles, branch names on edges.
	pub fn branch_diagram() -> Self {
		Self {
			name: "branch_diagram",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
			},
			node: NodeStyle {
				fill: Color::rgb(135, 206, 235),
				radius: 22.0,
				use_gradient: false,
				border_width: 0.0,
				border_color: Color::rgba(0, 0, 0, 0.0),
				show_labels: true,
				label_color: Color::rgb(0, 0, 0),
				label_weight: "bold",
				label_size: 15.0,
				ring_color: Color::rgba(0, 0, 0, 0.6),
			},
			edge: EdgeStyle {
				color: Color::rgb(0, 0, 0),
				width: 1.0,
				arrow_size: 12.0,
				show_labels: true,
				label_color: Color::rgb(255, 0, 0),
				label_size: 12.0,
				label_background: Color::rgb(255, 255, 255),
			},
			tooltip: TooltipStyle {
				background: Color::rgba(30, 30, 30, 0.9),
				text: Color::rgb(255, 255, 255),
				font_size: 12.0,
			},
		}
	}

	/// Dark canvas with gradient nodes.
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
			},
			node: NodeStyle {
				fill: Color::rgb(94, 129, 172),
				radius: 6.0,
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				show_labels: false,
				label_color: Color::rgba(255, 255, 255, 0.85),
				label_weight: "normal",
				label_size: 10.0,
				ring_color: Color::rgba(255, 255, 255, 0.8),
			},
			edge: EdgeStyle {
				color: Color::rgba(100, 120, 150, 0.6),
				width: 1.5,
				arrow_size: 6.0,
				show_labels: false,
				label_color: Color::rgb(230, 150, 140),
				label_size: 10.0,
				label_background: Color::rgba(18, 20, 28, 0.7),
			},
			tooltip: TooltipStyle {
				background: Color::rgba(40, 44, 56, 0.95),
				text: Color::rgb(230, 230, 235),
				font_size: 12.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::commit_history()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(255, 0, 0).to_css(), "#ff0000");
		assert_eq!(Color::rgba(255, 0, 0, 0.5).to_css(), "rgba(255, 0, 0, 0.5)");
	}

	#[test]
	fn lighten_and_darken_hit_the_extremes() {
		let c = Color::rgb(100, 100, 100);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
	}

	#[test]
	fn theme_names_deserialize_in_camel_case() {
		let name: ThemeName = serde_json::from_str(r#""branchDiagram""#).unwrap();
		assert_eq!(Theme::named(name).name, "branch_diagram");
	}
}
