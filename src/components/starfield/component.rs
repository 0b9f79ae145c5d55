use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::animation::{AnimationLoop, FrameClock};
use super::config::StarfieldConfig;
use super::error::SurfaceError;
use super::render;
use super::state::StarfieldState;
use super::surface::{container_size, context_2d, fit_backing_store};
use super::types::{ContentEntity, Filters, Point, TimeRange, Viewport};

/// Logs skipped frames once per cause instead of once per frame.
#[derive(Default)]
struct SkipLog {
	last: Option<SurfaceError>,
}

impl SkipLog {
	fn skipped(&mut self, err: SurfaceError) {
		if self.last.as_ref() == Some(&err) {
			return;
		}
		match err {
			SurfaceError::ZeroDimension { .. } | SurfaceError::Detached => {
				debug!("frame skipped: {err}")
			}
			_ => warn!("frame skipped: {err}"),
		}
		self.last = Some(err);
	}

	fn drawn(&mut self) {
		if self.last.take().is_some() {
			debug!("drawing resumed");
		}
	}
}

fn pointer_in(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn device_pixel_ratio() -> f64 {
	web_sys::window()
		.map(|w| w.device_pixel_ratio())
		.filter(|dpr| *dpr > 0.0)
		.unwrap_or(1.0)
}

fn update_cursor(canvas: &HtmlCanvasElement, state: &StarfieldState) {
	let cursor = if state.gesture.is_dragging() {
		"grabbing"
	} else if state.hovered().is_some() {
		"pointer"
	} else {
		"grab"
	};
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor);
}

/// A caller-supplied config is used as is; the default one dates undated
/// records to `current_year`.
fn resolve_config(config: Option<StarfieldConfig>, current_year: i32) -> StarfieldConfig {
	config.unwrap_or_else(|| {
		let mut config = StarfieldConfig::default();
		config.layout.fallback_year = current_year;
		config
	})
}

/// One animation frame: resize check, layout, draw.
fn draw_frame(
	canvas: &HtmlCanvasElement,
	ctx: &mut Option<CanvasRenderingContext2d>,
	state: &mut StarfieldState,
) -> Result<(), SurfaceError> {
	let viewport: Viewport = container_size(canvas)?;
	let dpr = device_pixel_ratio();
	if fit_backing_store(canvas, viewport, dpr) {
		debug!(
			"canvas resized to {}x{} @{dpr}",
			viewport.width, viewport.height
		);
	}
	state.resize(viewport);

	if ctx.is_none() {
		*ctx = Some(context_2d(canvas)?);
	}
	let Some(ctx) = ctx.as_ref() else {
		return Err(SurfaceError::MissingContext);
	};
	ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

	state.rebuild();
	render::render(state, ctx);
	Ok(())
}

/// Animated starfield of photons on a canvas that fills its parent element.
#[component]
pub fn StarfieldCanvas(
	#[prop(into)] entities: Signal<Vec<ContentEntity>>,
	#[prop(into, default = Signal::stored(TimeRange::default()))] time_range: Signal<TimeRange>,
	#[prop(into, default = Signal::stored(None))] active_group: Signal<Option<String>>,
	#[prop(into, default = Signal::stored(None))] active_category: Signal<Option<String>>,
	#[prop(optional)] on_entity_click: Option<Callback<ContentEntity>>,
	#[prop(optional)] config: Option<StarfieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let config = resolve_config(config, js_sys::Date::new_0().get_full_year() as i32);
	let state = Rc::new(RefCell::new(StarfieldState::new(config)));
	let frames = StoredValue::new_local(AnimationLoop::new());

	let state_data = state.clone();
	Effect::new(move |_| {
		let data = entities.get();
		debug!("starfield received {} photon(s)", data.len());
		state_data.borrow_mut().set_entities(data);
	});

	let state_filters = state.clone();
	Effect::new(move |_| {
		let filters = Filters {
			category: active_category.get(),
			group: active_group.get(),
		};
		let range = time_range.get();
		let mut s = state_filters.borrow_mut();
		s.set_time_range(range);
		s.set_filters(filters);
	});

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let state_anim = state_init.clone();
		let mut ctx: Option<CanvasRenderingContext2d> = None;
		let mut clock = FrameClock::default();
		let mut skips = SkipLog::default();

		frames.with_value(|frames| {
			frames.start(move |timestamp| {
				let mut s = state_anim.borrow_mut();
				s.tick(clock.step(timestamp));
				match draw_frame(&canvas, &mut ctx, &mut s) {
					Ok(()) => skips.drawn(),
					Err(err) => {
						if matches!(err, SurfaceError::Js(_) | SurfaceError::MissingContext) {
							ctx = None;
						}
						skips.skipped(err);
					}
				}
			})
		});
	});

	on_cleanup(move || {
		let _ = frames.try_with_value(AnimationLoop::stop);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		state_md.borrow_mut().pointer_down(pointer_in(&canvas, &ev));
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let mut s = state_mm.borrow_mut();
		s.pointer_move(pointer_in(&canvas, &ev));
		update_cursor(&canvas, &s);
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let clicked = {
			let mut s = state_mu.borrow_mut();
			let clicked = s.pointer_up(pointer_in(&canvas, &ev));
			update_cursor(&canvas, &s);
			clicked
		};
		if let (Some(entity), Some(cb)) = (clicked, on_entity_click) {
			cb.run((*entity).clone());
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().pointer_leave();
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = pointer_in(&canvas, &ev);
		state_wh.borrow_mut().wheel(ev.delta_y(), Some(at));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; width: 100%; height: 100%; cursor: grab;"
		/>
	}
}
