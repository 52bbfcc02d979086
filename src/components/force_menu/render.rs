//! Canvas rendering for the menu.
//!
//! Links are drawn first and nodes over them. Each node is a filled, stroked
//! circle with its label centred on top.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceMenuState, style_for};

/// Label fill. The configured text colour is used for the outline.
const TEXT_FILL: &str = "#000000";

fn label_font(text_size: f64) -> String {
	format!("{}px sans-serif", text_size)
}

/// Renders the whole menu at its current positions.
pub fn render(state: &ForceMenuState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.viewport.width, state.viewport.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_links(state: &ForceMenuState, ctx: &CanvasRenderingContext2d) {
	let nodes = &state.menu.nodes;
	ctx.set_stroke_style_str(&state.options.line_stroke_color);
	ctx.set_line_width(state.options.line_stroke_width);

	for link in &state.menu.links {
		let (Some(source), Some(target)) = (nodes.get(link.source), nodes.get(link.target)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceMenuState, ctx: &CanvasRenderingContext2d) {
	let font = label_font(state.menu.text_size);

	for node in &state.menu.nodes {
		let style = style_for(node.kind, &state.options);

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, TAU);
		ctx.set_fill_style_str(&style.fill);
		ctx.fill();
		ctx.set_stroke_style_str(&style.stroke);
		ctx.set_line_width(1.0);
		ctx.stroke();

		ctx.set_font(&font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str(TEXT_FILL);
		let _ = ctx.fill_text(&node.name, node.x, node.y);
		ctx.set_stroke_style_str(&state.options.text_stroke_color);
		let _ = ctx.stroke_text(&node.name, node.x, node.y);
	}
}
