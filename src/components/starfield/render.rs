use super::state::StarfieldState;
use super::surface::{Align, Surface};
use super::types::{Point, RenderEntity, TimeRange, Viewport};

const BACKDROP: &[(f64, &str)] = &[(0.0, "#000810"), (0.5, "#0a0a1a"), (1.0, "#000000")];
const AXIS_HEIGHT: f64 = 0.9;
const MAX_TICKS: usize = 40;
const OVERLAY_SIZE: (f64, f64) = (300.0, 120.0);
const OVERLAY_TEXT_CHARS: usize = 60;

/// What one frame put on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	pub stars: usize,
	pub entities: usize,
	pub ticks: usize,
	pub overlay: bool,
}

pub fn render(state: &StarfieldState, surface: &impl Surface) -> FrameStats {
	let viewport = state.viewport;
	let mut stats = FrameStats::default();
	if viewport.is_empty() {
		return stats;
	}

	surface.clear(viewport);
	surface.fill_backdrop(viewport, BACKDROP);
	stats.stars = draw_stars(state, surface);

	for entity in state.visible() {
		if on_screen(entity, viewport) {
			draw_entity(entity, state.is_hovered(entity), surface);
			stats.entities += 1;
		}
	}

	stats.ticks = draw_axis(state, surface);

	if let (Some(entity), Some(pointer)) = (state.hovered(), state.pointer()) {
		draw_overlay(entity, pointer, viewport, surface);
		stats.overlay = true;
	}
	stats
}

fn draw_stars(state: &StarfieldState, surface: &impl Surface) -> usize {
	let mut count = 0;
	for star in state.backdrop.placed(state.viewport, state.elapsed) {
		let (r, g, b) = if star.tinted {
			(59, 130, 246)
		} else {
			(255, 255, 255)
		};
		surface.fill_circle(
			star.at,
			star.size,
			&format!("rgba({r}, {g}, {b}, {:.3})", star.opacity * 0.3),
		);
		if star.size > 1.5 {
			surface.fill_circle(
				star.at,
				star.size * 3.0,
				&format!("rgba({r}, {g}, {b}, {:.3})", star.opacity * 0.1),
			);
		}
		count += 1;
	}
	count
}

fn on_screen(entity: &RenderEntity, viewport: Viewport) -> bool {
	let margin = entity.radius * 4.0;
	entity.screen.x > -margin
		&& entity.screen.y > -margin
		&& entity.screen.x < viewport.width + margin
		&& entity.screen.y < viewport.height + margin
}

fn draw_entity(entity: &RenderEntity, hovered: bool, surface: &impl Surface) {
	let (center, r, light) = (entity.screen, entity.radius, entity.brightness);
	let (primary, secondary) = (entity.primary, entity.secondary);

	let glow = r * if hovered { 4.0 } else { 2.0 };
	surface.fill_radial(
		center,
		center,
		glow,
		&[
			(0.0, primary.rgba(if hovered { 0.5 } else { 0.19 })),
			(1.0, primary.rgba(0.0)),
		],
	);

	surface.stroke_circle(
		center,
		r * 1.2,
		&secondary.rgba(if hovered { 0.5 } else { 0.25 }),
		2.0,
	);

	surface.fill_radial(
		Point::new(center.x - r / 3.0, center.y - r / 3.0),
		center,
		r,
		&[
			(0.0, format!("rgba(255, 255, 255, {light:.3})")),
			(0.5, primary.rgba(light)),
			(1.0, primary.rgba(0.5)),
		],
	);
	surface.fill_circle(
		center,
		r * 0.6,
		&format!("rgba(255, 255, 255, {:.3})", light * 0.3),
	);

	let engagement = entity.source.engagement;
	if engagement > 0 {
		surface.stroke_circle(center, r * 1.5, &primary.rgba(0.19), 1.0);
		if hovered {
			surface.text(
				&format!("{engagement} ✦"),
				Point::new(center.x, center.y - r * 2.0),
				"#ffffff",
				"10px sans-serif",
				Align::Center,
			);
		}
	}

	if hovered {
		surface.stroke_circle(center, r + 3.0, "rgba(255, 255, 255, 0.8)", 1.5);
	}
}

/// Years that get a tick: every `step` from the start, plus the end year.
pub fn tick_years(range: TimeRange, step: i32) -> Vec<i32> {
	if range.end < range.start {
		return Vec::new();
	}
	let span = range.end as i64 - range.start as i64;
	let mut step = step.max(1) as i64;
	if span / step >= MAX_TICKS as i64 {
		step = span / (MAX_TICKS as i64 - 1) + 1;
	}
	let mut years: Vec<i32> = (0..=span / step)
		.map(|i| (range.start as i64 + i * step) as i32)
		.collect();
	if years.last() != Some(&range.end) {
		years.push(range.end);
	}
	years
}

fn draw_axis(state: &StarfieldState, surface: &impl Surface) -> usize {
	let viewport = state.viewport;
	let range = state.time_range();
	let (x0, x1) = state.config.layout.time_span;
	let y = viewport.height * AXIS_HEIGHT;
	let screen_x = |layout_x: f64| {
		state
			.camera
			.to_screen(Point::new(layout_x, AXIS_HEIGHT * 100.0), viewport)
			.x
	};

	let style = "rgba(255, 255, 255, 0.1)";
	surface.line(Point::new(screen_x(x0), y), Point::new(screen_x(x1), y), style, 1.0);

	let years = tick_years(range, state.config.tick_step_years);
	for &year in &years {
		let x = screen_x(x0 + (x1 - x0) * range.progress(year));
		surface.line(Point::new(x, y), Point::new(x, y + viewport.height * 0.01), style, 1.0);
		surface.text(
			&year.to_string(),
			Point::new(x, viewport.height * 0.93),
			"rgba(255, 255, 255, 0.5)",
			"12px sans-serif",
			Align::Center,
		);
	}
	years.len()
}

/// Cuts `text` to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
	match text.char_indices().nth(max) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_owned(),
	}
}

fn draw_overlay(entity: &RenderEntity, pointer: Point, viewport: Viewport, surface: &impl Surface) {
	let (w, h) = OVERLAY_SIZE;
	let x = (pointer.x + 10.0).min(viewport.width - w - 4.0).max(4.0);
	let y = (pointer.y + 10.0).min(viewport.height - h - 4.0).max(4.0);
	surface.fill_rect(Point::new(x, y), w, h, "rgba(0, 0, 0, 0.9)");

	let source = &entity.source;
	let lines = [
		truncate(&source.text, OVERLAY_TEXT_CHARS),
		source.author.clone(),
		source.group_name().to_owned(),
		format!("{} resonance", source.engagement),
	];
	for (i, line) in lines.iter().enumerate() {
		surface.text(
			line,
			Point::new(x + 10.0, y + 30.0 + i as f64 * 20.0),
			"#ffffff",
			"12px sans-serif",
			Align::Left,
		);
	}
}
