//! Canvas rendering for the board.
//!
//! Draws a projected [`Scene`] in screen space, in this order:
//! 1. Background fill and dot grid
//! 2. Edges, arrowheads, then edge labels
//! 3. Cards in list order, so later cards cover earlier ones
//! 4. Selection and link-source rings on top

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::ScaledValues;
use super::state::BoardState;
use super::surface::{EdgePath, NodeBox, Scene, ViewTransform};
use super::theme::{Color, Theme};

/// Renders the complete board to the canvas.
pub fn render(state: &BoardState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let scene = state.scene();
	let scale = ScaledValues::new(&state.scale, state.transform.k);

	draw_background(state, ctx, theme);
	draw_grid(state.width, state.height, &state.transform, ctx, theme);
	draw_edges(&scene, ctx, &scale, theme);
	draw_cards(&scene, ctx, &scale, theme);
}

fn draw_background(state: &BoardState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (state.width, state.height);
	let gradient = theme
		.background
		.use_gradient
		.then(|| ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) * 0.8))
		.and_then(Result::ok);

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, w, h);
}

/// Dots on model-space grid points, so the grid pans and zooms with cards.
fn draw_grid(
	width: f64,
	height: f64,
	transform: &ViewTransform,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) {
	let color = theme.background.grid_color;
	let step = theme.background.grid_spacing * transform.k;
	// Too dense to read when zoomed far out.
	if color.a <= 0.0 || step < 8.0 {
		return;
	}

	ctx.set_fill_style_str(&color.to_css());
	let radius = (transform.k).clamp(0.75, 1.5);
	let mut x = transform.x.rem_euclid(step);
	while x < width {
		let mut y = transform.y.rem_euclid(step);
		while y < height {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.fill();
			y += step;
		}
		x += step;
	}
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	for edge in &scene.edges {
		let color = edge_color(edge, theme);
		let width = if edge.selected {
			scale.edge_line_width * 2.0
		} else {
			scale.edge_line_width
		};

		// Stop the stroke short so it doesn't poke through the arrow tip.
		let end = match edge.end_direction() {
			Some(dir) => edge.to - dir.scale(scale.arrow_size * 0.8),
			None => edge.to,
		};

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(edge.from.x, edge.from.y);
		let _ = ctx.quadratic_curve_to(edge.control.x, edge.control.y, end.x, end.y);
		ctx.stroke();

		draw_arrowhead(edge, ctx, scale, color);
	}

	if scale.cull_edge_labels {
		return;
	}
	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_global_alpha(scale.edge_label_alpha);
	for edge in scene.edges.iter().filter(|e| !e.label.is_empty()) {
		draw_edge_label(edge, ctx, scale, theme);
	}
	ctx.set_global_alpha(1.0);
}

fn edge_color(edge: &EdgePath, theme: &Theme) -> Color {
	if edge.selected {
		theme.edge.selected_color
	} else {
		theme.edge.color
	}
}

fn draw_arrowhead(
	edge: &EdgePath,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	color: Color,
) {
	let Some(dir) = edge.end_direction() else {
		return;
	};
	let tip = edge.to;
	let back = tip - dir.scale(scale.arrow_size);
	let (px, py) = (-dir.y * scale.arrow_size * 0.5, dir.x * scale.arrow_size * 0.5);

	ctx.set_fill_style_str(&color.with_alpha(1.0).to_css());
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back.x + px, back.y + py);
	ctx.line_to(back.x - px, back.y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_label(
	edge: &EdgePath,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let anchor = edge.label_anchor();
	let text_width = ctx
		.measure_text(&edge.label)
		.map(|m| m.width())
		.unwrap_or(edge.label.len() as f64 * scale.label_size * 0.5);
	let pad = 4.0;
	let box_h = scale.label_size + pad;

	ctx.set_fill_style_str(&theme.edge.label_background.to_css());
	ctx.fill_rect(
		anchor.x - text_width / 2.0 - pad,
		anchor.y - box_h / 2.0,
		text_width + pad * 2.0,
		box_h,
	);
	ctx.set_fill_style_str(&theme.edge.label_color.to_css());
	let _ = ctx.fill_text(&edge.label, anchor.x, anchor.y);
}

fn draw_cards(scene: &Scene, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	for card in &scene.nodes {
		draw_card(card, ctx, scale, theme);
	}
	// Rings last so a neighbouring card never hides them.
	for card in &scene.nodes {
		if card.link_source {
			draw_ring(card, ctx, scale, theme.card.link_source_ring, 2.0);
		}
		if card.selected {
			draw_ring(card, ctx, scale, theme.card.selected_ring, 1.0);
		}
	}
}

fn draw_card(card: &NodeBox, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let (x, y, w, h) = (card.left(), card.top(), card.width, card.height);
	let base = theme.palette.for_kind(&card.kind);

	let gradient = theme
		.card
		.use_gradient
		.then(|| ctx.create_linear_gradient(x, y, x, y + h));
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.15).to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.15).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base.to_css()),
	}
	rounded_rect(ctx, x, y, w, h, scale.corner_radius);
	ctx.fill();

	ctx.set_stroke_style_str(&theme.card.border_color.to_css());
	ctx.set_line_width(1.0);
	rounded_rect(ctx, x, y, w, h, scale.corner_radius);
	ctx.stroke();

	// Labels would overflow a card this small.
	if w < 40.0 {
		return;
	}
	let max_text = w - 16.0;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let has_kind = !card.kind.is_empty();
	let label_y = if has_kind {
		card.center.y - h * 0.12
	} else {
		card.center.y
	};
	ctx.set_font(&scale.label_font);
	ctx.set_fill_style_str(&theme.card.label_color.to_css());
	let label = fit_text(ctx, &card.label, max_text);
	let _ = ctx.fill_text(&label, card.center.x, label_y);

	if has_kind {
		ctx.set_font(&scale.kind_font);
		ctx.set_fill_style_str(&theme.card.kind_color.to_css());
		let kind = fit_text(ctx, &card.kind, max_text);
		let _ = ctx.fill_text(&kind, card.center.x, card.center.y + h * 0.24);
	}
}

fn draw_ring(
	card: &NodeBox,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	color: Color,
	level: f64,
) {
	let offset = scale.ring_offset * level + scale.ring_width * (level - 1.0);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.ring_width);
	rounded_rect(
		ctx,
		card.left() - offset,
		card.top() - offset,
		card.width + offset * 2.0,
		card.height + offset * 2.0,
		scale.corner_radius + offset,
	);
	ctx.stroke();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + r, r);
	ctx.line_to(x + w, y + h - r);
	let _ = ctx.arc_to(x + w, y + h, x + w - r, y + h, r);
	ctx.line_to(x + r, y + h);
	let _ = ctx.arc_to(x, y + h, x, y + h - r, r);
	ctx.line_to(x, y + r);
	let _ = ctx.arc_to(x, y, x + r, y, r);
	ctx.close_path();
}

/// Truncates `text` with an ellipsis until it fits in `max_width` pixels.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
	let width = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
	if width(text) <= max_width {
		return text.to_string();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate: String = chars.iter().chain(std::iter::once(&'…')).collect();
		if width(&candidate) <= max_width {
			return candidate;
		}
	}
	String::new()
}
