//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming, hover tooltips and clicks. An
//! animation loop runs via `requestAnimationFrame` until the component is
//! unmounted, stepping the physics while it runs and fitting the view when the
//! layout reaches a [`Milestone`]. The loop is owned by the mount effect, so
//! unmounting frees the simulation along with it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::frame::{self, FrameLoop, FrameSlot};
use super::render;
use super::state::{FIT_PADDING, ForceGraphState, Milestone};
use super::theme::Theme;
use super::types::GraphData;

/// Bundles graph simulation state with its theme.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
}

type FrameCallback = Closure<dyn FnMut()>;

/// Hover tooltip contents and where to show it, in viewport pixels.
#[derive(Clone, Debug, PartialEq)]
struct Tooltip {
	x: f64,
	y: f64,
	text: String,
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport. Both follow window resizes.
/// Explicit `width`/`height` override automatic sizing. Clicking a node opens
/// the user's GitHub profile in a new tab.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let (animate, animate_weak): (FrameSlot<FrameCallback>, _) = frame::slot();
	let alive = Arc::new(AtomicBool::new(true));
	let tooltip = RwSignal::new(None::<Tooltip>);
	let (context_init, alive_init) = (context.clone(), alive.clone());

	let measure = move |canvas: &HtmlCanvasElement| -> (f64, f64) {
		if fullscreen {
			let window = web_sys::window();
			let dim = |v: Option<Result<JsValue, JsValue>>, fallback: f64| {
				v.and_then(Result::ok)
					.and_then(|v| v.as_f64())
					.unwrap_or(fallback)
			};
			(
				dim(window.as_ref().map(Window::inner_width), 800.0),
				dim(window.as_ref().map(Window::inner_height), 600.0),
			)
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.filter(|w| *w > 0.0)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.filter(|h| *h > 0.0)
						.unwrap_or(600.0)
				}),
			)
		}
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let (w, h) = measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("cosmic-network: canvas has no 2d context");
				return;
			}
		};

		let graph = data.get_untracked();
		debug!(
			"cosmic-network: laying out {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);
		let theme = Theme::default();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&graph, w, h, &theme),
			theme,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let resize = window_event_listener(leptos::ev::resize, move |_| {
			let (nw, nh) = measure(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		});
		on_cleanup(move || resize.remove());

		let (context_anim, animate_inner, alive_anim) =
			(context_init.clone(), animate_weak.clone(), alive_init.clone());
		*animate.borrow_mut() = Some(FrameLoop::new(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				match c.state.tick(0.016) {
					Some(Milestone::Initial | Milestone::Settled) => c.state.fit_to_view(FIT_PADDING),
					None => {}
				}
				render::render(&c.state, &ctx, &c.theme);
			}
			request_frame(&animate_inner);
		})));
		request_frame(&Rc::downgrade(&animate));
	});

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let position = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y);
			let next = c.state.hovered().map(|node| Tooltip {
				x: ev.client_x() as f64,
				y: ev.client_y() as f64,
				text: node.tooltip(),
			});
			if tooltip.with_untracked(|t| *t != next) {
				tooltip.set(next);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let url = match *context_mu.borrow_mut() {
			Some(ref mut c) => c.state.pointer_up().map(|node| node.profile_url()),
			None => None,
		};
		if let (Some(url), Some(window)) = (url, web_sys::window()) {
			debug!("cosmic-network: opening {}", url);
			let _ = window.open_with_url_and_target_and_features(&url, "_blank", "noopener,noreferrer");
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
		tooltip.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
		}
	};

	let cursor = move || {
		if tooltip.with(Option::is_some) {
			"display: block; cursor: pointer;"
		} else {
			"display: block; cursor: grab;"
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style=cursor
		/>
		{move || {
			tooltip
				.get()
				.map(|t| {
					view! {
						<div
							class="graph-tooltip"
							style=format!(
								"position: fixed; left: {}px; top: {}px; white-space: pre-line; pointer-events: none; z-index: 1000;",
								t.x + 10.0,
								t.y - 10.0,
							)
						>
							{t.text}
						</div>
					}
				})
		}}
	}
}

/// Schedule the next frame of the loop in `slot`, unless the slot is gone.
fn request_frame(slot: &Weak<RefCell<Option<FrameLoop<FrameCallback>>>>) {
	let (Some(slot), Some(window)) = (slot.upgrade(), web_sys::window()) else {
		return;
	};
	if let Some(ref frame) = *slot.borrow() {
		let handle = window
			.request_animation_frame(frame.callback().as_ref().unchecked_ref())
			.ok();
		frame.set_pending(handle);
	}
}
