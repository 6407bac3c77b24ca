//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node display data, the
//! pan/zoom transform, pointer gestures, and the cooldown that decides when
//! the layout has settled and the view should be fit to the content.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::theme::{Color, Theme};
use super::types::{GraphData, GraphNode};

/// Ticks after which the engine stops and the view is fit again.
pub const COOLDOWN_TICKS: u32 = 100;

/// Ticks (about half a second at 60 fps) before the first fit.
pub const INITIAL_FIT_TICKS: u32 = 30;

/// Screen padding kept around the content when fitting.
pub const FIT_PADDING: f64 = 50.0;

/// Pointer travel, in pixels, below which a press on a node counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Per-node display data attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Position in [`ForceGraphState::nodes`].
	pub node: usize,
	/// Community colour.
	pub color: Color,
	/// Radius in world units.
	pub radius: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	/// Screen x of the world origin.
	pub x: f64,
	/// Screen y of the world origin.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag, which becomes a click if it never moves.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a node is held.
	pub active: bool,
	/// Held node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at press.
	pub start_x: f64,
	/// Pointer position at press.
	pub start_y: f64,
	/// Node position at press.
	pub node_start_x: f32,
	/// Node position at press.
	pub node_start_y: f32,
	/// Whether the pointer left the click slop.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether the background is held.
	pub active: bool,
	/// Pointer position at press.
	pub start_x: f64,
	/// Pointer position at press.
	pub start_y: f64,
	/// Transform at press.
	pub transform_start_x: f64,
	/// Transform at press.
	pub transform_start_y: f64,
}

/// The hovered node and its direct neighbours.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	/// Node under the pointer.
	pub node: Option<DefaultNodeIdx>,
	/// Nodes linked to it in either direction.
	pub neighbors: HashSet<DefaultNodeIdx>,
}

impl HoverState {
	/// Whether anything is hovered.
	pub fn is_active(&self) -> bool {
		self.node.is_some()
	}

	/// Whether `idx` is the hovered node or one of its neighbours.
	pub fn is_lit(&self, idx: DefaultNodeIdx) -> bool {
		self.node == Some(idx) || self.neighbors.contains(&idx)
	}
}

/// Layout milestones reported by [`ForceGraphState::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Milestone {
	/// Early layout is done; fit once so the graph is visible.
	Initial,
	/// The cooldown ran out and the engine stopped.
	Settled,
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created when the component mounts, then mutated each frame by the animation
/// loop and by pointer handlers.
pub struct ForceGraphState {
	/// Physics simulation.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Nodes as received, indexed by [`NodeInfo::node`].
	pub nodes: Vec<GraphNode>,
	/// Current pan/zoom.
	pub transform: ViewTransform,
	/// Node drag gesture.
	pub drag: DragState,
	/// Background pan gesture.
	pub pan: PanState,
	/// Hover highlight.
	pub hover: HoverState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Whether the physics engine is still running.
	pub animation_running: bool,
	ticks: u32,
	hit_slop: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	/// Seed the simulation from `data`, nodes on a circle around the origin.
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let count = data.nodes.len().max(1) as f64;
		let ring = 10.0 * count.sqrt() * theme.node.radius;
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					node: i,
					color: theme.palette.for_group(node.group),
					radius: theme.node.radius * node_size(node.val),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			nodes: data.nodes.clone(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			ticks: 0,
			hit_slop: theme.node.hit_slop,
			edges,
		}
	}

	/// Advance the physics by `dt` seconds while the engine runs.
	pub fn tick(&mut self, dt: f32) -> Option<Milestone> {
		if !self.animation_running {
			return None;
		}
		self.graph.update(dt);
		self.ticks += 1;
		match self.ticks {
			INITIAL_FIT_TICKS => Some(Milestone::Initial),
			t if t >= COOLDOWN_TICKS => {
				self.animation_running = false;
				Some(Milestone::Settled)
			}
			_ => None,
		}
	}

	/// Restart the engine after the user moved a node.
	pub fn reheat(&mut self) {
		if !self.animation_running {
			self.animation_running = true;
			self.ticks = INITIAL_FIT_TICKS;
		}
	}

	/// Zoom and pan so every node fits inside the canvas with `padding` to spare.
	pub fn fit_to_view(&mut self, padding: f64) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y, r) = (node.x() as f64, node.y() as f64, node.data.user_data.radius);
			bounds = Some(match bounds {
				None => (x - r, y - r, x + r, y + r),
				Some((x0, y0, x1, y1)) => (x0.min(x - r), y0.min(y - r), x1.max(x + r), y1.max(y + r)),
			});
		});
		let Some((x0, y0, x1, y1)) = bounds else {
			return;
		};

		let (w, h) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let avail_w = (self.width - 2.0 * padding).max(1.0);
		let avail_h = (self.height - 2.0 * padding).max(1.0);
		let k = (avail_w / w).min(avail_h / h).clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);

		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Convert canvas pixels into world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the given canvas position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let slop = self.hit_slop / self.transform.k;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + slop {
				found = Some(node.index());
			}
		});
		found
	}

	/// Input node behind a simulation index.
	pub fn node(&self, idx: DefaultNodeIdx) -> Option<&GraphNode> {
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some(node.data.user_data.node);
			}
		});
		position.and_then(|i| self.nodes.get(i))
	}

	/// The hovered input node.
	pub fn hovered(&self) -> Option<&GraphNode> {
		self.hover.node.and_then(|idx| self.node(idx))
	}

	/// Update the hovered node and recompute its neighbourhood.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors = match node {
			Some(idx) => self
				.edges
				.iter()
				.filter_map(|&(src, tgt)| match (src == idx, tgt == idx) {
					(true, _) => Some(tgt),
					(_, true) => Some(src),
					_ => None,
				})
				.collect(),
			None => HashSet::new(),
		};
	}

	/// Press: grab the node under the pointer, or start panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let mut start = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					start = (node.x(), node.y());
				}
			});
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: start.0,
				node_start_y: start.1,
				moved: false,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Move: update hover, drag the held node, or pan.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let (sdx, sdy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (sdx * sdx + sdy * sdy).sqrt() < CLICK_SLOP {
				return;
			}
			self.drag.moved = true;
			let (nx, ny) = (
				self.drag.node_start_x + (sdx / self.transform.k) as f32,
				self.drag.node_start_y + (sdy / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			self.reheat();
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Release. Returns the node that was clicked, if the press never became a drag.
	pub fn pointer_up(&mut self) -> Option<&GraphNode> {
		let clicked = match (self.drag.active, self.drag.moved) {
			(true, false) => self.drag.node_idx,
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked.and_then(|idx| self.node(idx))
	}

	/// Pointer left the canvas: drop gestures and hover.
	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zoom in or out around the pointer.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Track a canvas size change.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Relative radius for a `val` weight: area grows with `sqrt(val)`, default 1.
fn node_size(val: Option<f64>) -> f64 {
	val.filter(|v| v.is_finite() && *v > 0.0)
		.unwrap_or(1.0)
		.powf(0.25)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphLink;

	fn data() -> GraphData {
		let mut hub = GraphNode::bare("hub");
		hub.group = Some(1);
		hub.val = Some(16.0);
		GraphData {
			nodes: vec![hub, GraphNode::bare("a"), GraphNode::bare("b"), GraphNode::bare("loner")],
			links: vec![
				GraphLink {
					source: "hub".into(),
					target: "a".into(),
				},
				GraphLink {
					source: "b".into(),
					target: "hub".into(),
				},
				GraphLink {
					source: "a".into(),
					target: "missing".into(),
				},
			],
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&data(), 800.0, 600.0, &Theme::default())
	}

	fn screen_position(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if state.nodes[node.data.user_data.node].id == id {
				found = Some((
					node.x() as f64 * state.transform.k + state.transform.x,
					node.y() as f64 * state.transform.k + state.transform.y,
				));
			}
		});
		found.unwrap()
	}

	fn idx_of(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		let (x, y) = screen_position(state, id);
		state.node_at_position(x, y).unwrap()
	}

	#[test]
	fn links_to_unknown_nodes_are_not_simulated() {
		let state = state();
		let mut edges = 0;
		state.graph.visit_edges(|_, _, _| edges += 1);
		assert_eq!(edges, 2);
	}

	#[test]
	fn val_scales_radius() {
		assert_eq!(node_size(None), 1.0);
		assert!((node_size(Some(16.0)) - 2.0).abs() < 1e-9);
		assert_eq!(node_size(Some(-3.0)), 1.0);
	}

	#[test]
	fn milestones_fire_once_each() {
		let mut state = state();
		let milestones: Vec<_> = (0..150).filter_map(|_| state.tick(0.016)).collect();
		assert_eq!(milestones, vec![Milestone::Initial, Milestone::Settled]);
		assert!(!state.animation_running);
	}

	#[test]
	fn reheat_settles_again_without_initial_fit() {
		let mut state = state();
		while state.tick(0.016) != Some(Milestone::Settled) {}
		state.reheat();
		let milestones: Vec<_> = (0..150).filter_map(|_| state.tick(0.016)).collect();
		assert_eq!(milestones, vec![Milestone::Settled]);
	}

	#[test]
	fn fit_keeps_every_node_on_canvas() {
		let mut state = state();
		for _ in 0..COOLDOWN_TICKS {
			state.tick(0.016);
		}
		state.fit_to_view(FIT_PADDING);
		for id in ["hub", "a", "b", "loner"] {
			let (x, y) = screen_position(&state, id);
			assert!((FIT_PADDING - 1.0..=800.0 - FIT_PADDING + 1.0).contains(&x), "{id} x={x}");
			assert!((FIT_PADDING - 1.0..=600.0 - FIT_PADDING + 1.0).contains(&y), "{id} y={y}");
		}
	}

	#[test]
	fn hover_lights_neighbours() {
		let mut state = state();
		let hub = idx_of(&state, "hub");
		let (x, y) = screen_position(&state, "hub");
		state.pointer_move(x, y);
		assert_eq!(state.hover.node, Some(hub));
		assert_eq!(state.hovered().unwrap().tooltip(), "hub\nCommunity: Group 1");
		assert!(state.hover.is_lit(idx_of(&state, "a")));
		assert!(state.hover.is_lit(idx_of(&state, "b")));
		assert!(!state.hover.is_lit(idx_of(&state, "loner")));

		state.pointer_leave();
		assert!(!state.hover.is_active());
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let mut state = state();
		let (x, y) = screen_position(&state, "loner");
		state.pointer_down(x, y);
		state.pointer_move(x + 1.0, y);
		let clicked = state.pointer_up().map(GraphNode::profile_url);
		assert_eq!(clicked.as_deref(), Some("https://github.com/loner"));
	}

	#[test]
	fn dragging_is_not_a_click() {
		let mut state = state();
		let (x, y) = screen_position(&state, "loner");
		state.pointer_down(x, y);
		state.pointer_move(x + 40.0, y + 40.0);
		assert!(state.pointer_up().is_none());
		let (nx, ny) = screen_position(&state, "loner");
		assert!((nx - (x + 40.0)).abs() < 0.5 && (ny - (y + 40.0)).abs() < 0.5);
	}

	#[test]
	fn background_drag_pans() {
		let mut state = state();
		let before = state.transform.clone();
		state.pointer_down(5.0, 5.0);
		state.pointer_move(25.0, 15.0);
		assert!(state.pointer_up().is_none());
		assert_eq!(state.transform.x, before.x + 20.0);
		assert_eq!(state.transform.y, before.y + 10.0);
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut state = state();
		let anchor = state.screen_to_graph(100.0, 100.0);
		state.zoom_at(100.0, 100.0, -1.0);
		let after = state.screen_to_graph(100.0, 100.0);
		assert!((anchor.0 - after.0).abs() < 1e-9 && (anchor.1 - after.1).abs() < 1e-9);
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
	}
}
