use web_sys::CanvasRenderingContext2d;

use super::highlight::{Emphasis, NodeView};
use super::state::SankeyState;
use super::types::{NodeId, NodeKind};

/// d3 `schemeAccent`, assigned in node order.
const COLORS: &[&str] = &[
	"#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];

const LABEL_LINE_HEIGHT: f64 = 14.0;
const TOOLTIP_PADDING: f64 = 6.0;

fn color(id: NodeId) -> &'static str {
	COLORS[id % COLORS.len()]
}

/// Redraws the whole diagram.
pub fn render(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = state.config.canvas_size();
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(&state.config.background);
	ctx.fill_rect(0.0, 0.0, w, h);
	ctx.save();
	let _ = ctx.translate(state.config.margin_left, 0.0);
	draw_shadows(state, ctx);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn alpha(state: &SankeyState, emphasis: Emphasis, full: f64) -> f64 {
	match emphasis {
		Emphasis::Full => full,
		Emphasis::Dimmed => state.config.dimmed_opacity,
	}
}

fn draw_shadows(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	for node in state.engine.nodes() {
		let r = node.rect;
		ctx.set_global_alpha(alpha(state, node.emphasis, 1.0) * state.config.shadow_opacity);
		ctx.set_fill_style_str(color(node.id));
		ctx.fill_rect(r.x0, r.y0, r.width(), r.height());
	}
	ctx.set_global_alpha(1.0);
}

fn draw_links(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	for link in state.engine.links() {
		if link.width <= 0.0 {
			continue;
		}
		let p = link.path;
		let xm = p.mid_x();
		ctx.set_global_alpha(alpha(state, link.emphasis, state.config.link_opacity));
		ctx.set_stroke_style_str(color(link.source));
		ctx.set_line_width(link.width.max(1.0));
		ctx.begin_path();
		ctx.move_to(p.x0, p.y0);
		ctx.bezier_curve_to(xm, p.y0, xm, p.y1, p.x1, p.y1);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	for node in state.engine.nodes() {
		let r = state.primary_rect(node);
		ctx.set_global_alpha(alpha(state, node.emphasis, 1.0));
		ctx.set_fill_style_str(color(node.id));
		ctx.fill_rect(r.x0, r.y0, r.width(), r.height());
	}
	ctx.set_global_alpha(1.0);
}

/// Name above value, right of status nodes and in the left margin for teams.
fn label_anchor(state: &SankeyState, node: &NodeView) -> f64 {
	match node.kind {
		NodeKind::Status(_) => node.rect.x1 + 8.0,
		NodeKind::Team => node.rect.x0 - state.config.margin_left + 8.0,
	}
}

fn draw_labels(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(&state.config.font);
	ctx.set_text_align("start");
	ctx.set_text_baseline("middle");
	for node in state.engine.nodes() {
		let x = label_anchor(state, node);
		let y = node.rect.center_y();
		ctx.set_global_alpha(alpha(state, node.emphasis, 1.0));
		ctx.set_fill_style_str(color(node.id));
		let _ = ctx.fill_text(&node.label_text, x, y - LABEL_LINE_HEIGHT / 2.0);
		ctx.set_fill_style_str("#333333");
		let _ = ctx.fill_text(&node.value_text, x, y + LABEL_LINE_HEIGHT / 2.0);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_tooltip(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let (Some(lines), Some((px, py))) = (state.tooltip(), state.pointer) else {
		return;
	};
	ctx.set_font(&state.config.font);
	ctx.set_text_align("start");
	ctx.set_text_baseline("top");

	let width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max)
		+ 2.0 * TOOLTIP_PADDING;
	let height = lines.len() as f64 * LABEL_LINE_HEIGHT + 2.0 * TOOLTIP_PADDING;

	// keep the box on the canvas
	let (cw, ch) = state.config.canvas_size();
	let x = (px + 12.0).min(cw - width).max(0.0);
	let y = (py + 12.0).min(ch - height).max(0.0);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.fill_rect(x, y, width, height);
	ctx.set_stroke_style_str("#999999");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, width, height);
	ctx.set_fill_style_str("#222222");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(
			line,
			x + TOOLTIP_PADDING,
			y + TOOLTIP_PADDING + i as f64 * LABEL_LINE_HEIGHT,
		);
	}
}
