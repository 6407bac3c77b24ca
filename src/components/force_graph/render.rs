//! Canvas rendering for the force graph.
//!
//! Draw order: background, links with arrowheads, unlit nodes, then the
//! hovered node and its neighbours on top.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};
use super::theme::Theme;

/// How far unlit elements fade while something is hovered.
const DIM_ALPHA: f64 = 0.25;

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let k = state.transform.k;
	let style = &theme.edge;
	let hovering = state.hover.is_active();

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let lit = hovering && state.hover.node.is_some_and(|h| h == n1.index() || h == n2.index());
		let color = match (hovering, lit) {
			(true, true) => style.color.with_alpha((style.color.a * 3.0).min(1.0)),
			(true, false) => style.color.with_alpha(style.color.a * DIM_ALPHA),
			_ => style.color,
		};
		let css = color.to_css();

		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		let tip = (x2 - ux * r2, y2 - uy * r2);
		let back = (tip.0 - ux * style.arrow_length, tip.1 - uy * style.arrow_length);

		ctx.set_stroke_style_str(&css);
		ctx.set_line_width(style.width / k);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(back.0, back.1);
		ctx.stroke();

		let (px, py) = (-uy * style.arrow_length * 0.5, ux * style.arrow_length * 0.5);
		ctx.set_fill_style_str(&css);
		ctx.begin_path();
		ctx.move_to(tip.0, tip.1);
		ctx.line_to(back.0 + px, back.1 + py);
		ctx.line_to(back.0 - px, back.1 - py);
		ctx.close_path();
		ctx.fill();
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let hovering = state.hover.is_active();

	// Pass 1: unlit nodes, dimmed while something is hovered
	state.graph.visit_nodes(|node| {
		if hovering && state.hover.is_lit(node.index()) {
			return;
		}
		let alpha = if hovering { DIM_ALPHA } else { 1.0 };
		draw_node(ctx, node, theme, alpha);
	});

	if !hovering {
		return;
	}

	// Pass 2: hovered node and neighbours on top
	state.graph.visit_nodes(|node| {
		if !state.hover.is_lit(node.index()) {
			return;
		}
		draw_node(ctx, node, theme, 1.0);

		if state.hover.node == Some(node.index()) {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let k = state.transform.k;
			ctx.begin_path();
			let _ = ctx.arc(x, y, node.data.user_data.radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.node.ring_color.to_css());
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	theme: &Theme,
	alpha: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let radius = info.radius;

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(1.0, &info.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&info.color.to_css()),
	}
	ctx.fill();
	ctx.set_global_alpha(1.0);
}
