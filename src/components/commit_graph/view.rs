//! Mapping between data space and world space.
//!
//! Data space is whatever the layout produced, y up. World space is canvas
//! pixels at zoom 1, y down. The fit keeps the aspect ratio and centers the
//! scene inside the padded canvas.

use crate::scene::Bounds;

/// Uniform scale plus offset from data to world coordinates, with y flipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataFit {
	scale: f64,
	origin_x: f64,
	origin_y: f64,
	offset_x: f64,
	offset_y: f64,
}

impl DataFit {
	/// Fit `bounds` into a `width` x `height` canvas leaving `padding` pixels.
	///
	/// With no bounds (empty scene) the data origin lands at the canvas center.
	/// A zero-sized extent along both axes keeps unit scale.
	pub fn new(bounds: Option<Bounds>, width: f64, height: f64, padding: f64) -> Self {
		let Some(bounds) = bounds else {
			return Self {
				scale: 1.0,
				origin_x: 0.0,
				origin_y: 0.0,
				offset_x: width / 2.0,
				offset_y: height / 2.0,
			};
		};

		let avail_w = (width - 2.0 * padding).max(1.0);
		let avail_h = (height - 2.0 * padding).max(1.0);
		let (bw, bh) = (bounds.width(), bounds.height());

		let scale = match (bw > f64::EPSILON, bh > f64::EPSILON) {
			(true, true) => (avail_w / bw).min(avail_h / bh),
			(true, false) => avail_w / bw,
			(false, true) => avail_h / bh,
			(false, false) => 1.0,
		};

		// Center the fitted box.
		let offset_x = (width - bw * scale) / 2.0;
		let offset_y = (height - bh * scale) / 2.0;

		Self {
			scale,
			origin_x: bounds.min_x,
			origin_y: bounds.max_y,
			offset_x,
			offset_y,
		}
	}

	/// Data units to pixels.
	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// Data point to world position.
	pub fn to_world(&self, x: f64, y: f64) -> (f64, f64) {
		(
			(x - self.origin_x) * self.scale + self.offset_x,
			(self.origin_y - y) * self.scale + self.offset_y,
		)
	}
}
