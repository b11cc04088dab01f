//! Leptos component wrapping the commit graph canvas.
//!
//! The component creates an HTML canvas, fits the scene into it and wires up
//! mouse/wheel handlers for node dragging, panning, zooming and hover. A
//! `requestAnimationFrame` loop eases highlights and redraws every frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::SceneState;
use super::theme::Theme;
use crate::scene::Scene;

/// Frame step used by the animation loop, in seconds.
const FRAME_DT: f64 = 0.016;

/// Bundles view state with its visual configuration.
struct GraphContext {
	state: SceneState,
	scale: ScaleConfig,
	theme: Theme,
}

impl GraphContext {
	fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.scale, &self.theme, self.state.transform.k)
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders a commit graph scene on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and refit with the window.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn CommitGraphCanvas(
	#[prop(into)] scene: Signal<Scene>,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("commit-graph: canvas has no 2d context");
				return;
			}
		};

		let scale = ScaleConfig::default();
		let scene = scene.get();
		debug!(
			"commit-graph: mounting canvas {}x{} with {} nodes",
			w,
			h,
			scene.nodes.len()
		);
		*context_init.borrow_mut() = Some(GraphContext {
			state: SceneState::new(scene, w, h, &scale),
			scale,
			theme: theme.clone(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh, &c.scale);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(FRAME_DT);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let scaled = c.scaled();
			let state = &mut c.state;
			match state.node_at_position(x, y, &scaled) {
				Some(idx) => {
					let (nx, ny) = state.node_position(idx).unwrap_or_default();
					state.drag.active = true;
					state.drag.node_idx = Some(idx);
					state.drag.start_x = x;
					state.drag.start_y = y;
					state.drag.node_start_x = nx;
					state.drag.node_start_y = ny;
				}
				None => {
					state.pan.active = true;
					state.pan.start_x = x;
					state.pan.start_y = y;
					state.pan.transform_start_x = state.transform.x;
					state.pan.transform_start_y = state.transform.y;
				}
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let scaled = c.scaled();
			let state = &mut c.state;

			if state.drag.active {
				if let Some(idx) = state.drag.node_idx {
					let k = state.transform.k;
					let nx = state.drag.node_start_x + (x - state.drag.start_x) / k;
					let ny = state.drag.node_start_y + (y - state.drag.start_y) / k;
					state.move_node(idx, nx, ny);
				}
			} else {
				let hovered = state.node_at_position(x, y, &scaled);
				state.set_hover(hovered);
				if state.pan.active {
					state.transform.x = state.pan.transform_start_x + (x - state.pan.start_x);
					state.transform.y = state.pan.transform_start_y + (y - state.pan.start_y);
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="commit-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
