use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::palette::{EDGE_COLOR, EDGE_HIGHLIGHT};
use super::state::ForceGraphState;

const BACKGROUND: &str = "#0B0C10";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		// weight 0..1 maps onto 1..10 px, like the service's edge scaling
		let base_width = (1.0 + 9.0 * edge.user_data.clamp(0.0, 1.0)) * 0.5 / k;

		let (color, alpha, width) = if is_highlighted {
			(EDGE_HIGHLIGHT, 0.5 + 0.4 * t, base_width * (1.0 + 0.3 * t))
		} else {
			(EDGE_COLOR, 0.5 - 0.35 * t, base_width * (1.0 - 0.3 * t))
		};

		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.set_stroke_style_str(&format!("rgba({color}, {alpha})"));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * r2, y2 - uy * r2);
		ctx.stroke();
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 12.0 / k.max(0.5));

	// dimmed pass first, highlighted nodes on top
	for highlighted_pass in [false, true] {
		if highlighted_pass && !has_highlight {
			break;
		}
		state.graph.visit_nodes(|node| {
			let idx = node.index();
			let highlighted = has_highlight && state.is_highlighted(idx);
			if highlighted != highlighted_pass {
				return;
			}
			let info = &node.data.user_data;
			let (x, y) = (node.x() as f64, node.y() as f64);

			let (alpha, radius) = if !has_highlight {
				(1.0, info.radius)
			} else if !highlighted {
				(1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t))
			} else if state.is_hovered(idx) {
				(1.0, info.radius * (1.0 + 0.35 * t))
			} else {
				(1.0, info.radius * (1.0 + 0.2 * t))
			};

			if highlighted && state.is_hovered(idx) && t > 0.01 {
				draw_glow(ctx, x, y, radius, t);
			}

			ctx.set_global_alpha(alpha);
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(info.style.background);
			ctx.fill();
			ctx.set_stroke_style_str(info.style.border);
			ctx.set_line_width(1.0 / k);
			ctx.stroke();

			if state.is_marked_active(&info.id) {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str("#66FCF1");
				ctx.set_line_width(2.0 / k);
				ctx.stroke();
			}
			if state.is_marked_pending(&info.id) {
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(4.0 / k),
					&JsValue::from_f64(3.0 / k),
				));
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 6.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str("#00BFFF");
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}

			ctx.set_fill_style_str(info.style.font_color);
			ctx.set_font(&font);
			let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
			ctx.set_global_alpha(1.0);
		});
	}
}

fn draw_glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, t: f64) {
	let glow_radius = radius * (1.8 + 1.2 * t);
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) else {
		return;
	};
	let alpha = 0.35 * t;
	let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
	let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
