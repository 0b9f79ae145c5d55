use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::SurfaceError;
use super::types::{Point, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
	Left,
	Center,
}

impl Align {
	fn as_str(self) -> &'static str {
		match self {
			Align::Left => "left",
			Align::Center => "center",
		}
	}
}

/// Drawing primitives the starfield renderer needs, in CSS pixels.
pub trait Surface {
	fn clear(&self, viewport: Viewport);
	fn fill_rect(&self, origin: Point, width: f64, height: f64, style: &str);
	/// Radial gradient from the viewport centre out to its width.
	fn fill_backdrop(&self, viewport: Viewport, stops: &[(f64, &str)]);
	fn fill_circle(&self, center: Point, radius: f64, style: &str);
	/// Fills a circle with a radial gradient that starts at `focus`.
	fn fill_radial(&self, focus: Point, center: Point, radius: f64, stops: &[(f64, String)]);
	fn stroke_circle(&self, center: Point, radius: f64, style: &str, width: f64);
	fn line(&self, from: Point, to: Point, style: &str, width: f64);
	fn text(&self, text: &str, at: Point, style: &str, font: &str, align: Align);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, viewport: Viewport) {
		self.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	}

	fn fill_rect(&self, origin: Point, width: f64, height: f64, style: &str) {
		self.set_fill_style_str(style);
		CanvasRenderingContext2d::fill_rect(self, origin.x, origin.y, width, height);
	}

	fn fill_backdrop(&self, viewport: Viewport, stops: &[(f64, &str)]) {
		let c = viewport.center();
		let Ok(gradient) = self.create_radial_gradient(c.x, c.y, 0.0, c.x, c.y, viewport.width)
		else {
			return;
		};
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, color);
		}
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, viewport.width, viewport.height);
	}

	fn fill_circle(&self, center: Point, radius: f64, style: &str) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
		self.set_fill_style_str(style);
		self.fill();
	}

	fn fill_radial(&self, focus: Point, center: Point, radius: f64, stops: &[(f64, String)]) {
		let radius = radius.max(0.0);
		let Ok(gradient) =
			self.create_radial_gradient(focus.x, focus.y, 0.0, center.x, center.y, radius)
		else {
			return;
		};
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, color);
		}
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, TAU);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}

	fn stroke_circle(&self, center: Point, radius: f64, style: &str, width: f64) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
		self.set_stroke_style_str(style);
		self.set_line_width(width);
		self.stroke();
	}

	fn line(&self, from: Point, to: Point, style: &str, width: f64) {
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.set_stroke_style_str(style);
		self.set_line_width(width);
		self.stroke();
	}

	fn text(&self, text: &str, at: Point, style: &str, font: &str, align: Align) {
		self.set_fill_style_str(style);
		self.set_font(font);
		self.set_text_align(align.as_str());
		let _ = self.fill_text(text, at.x, at.y);
	}
}

/// Fetches the 2d context of `canvas`.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")?
		.ok_or(SurfaceError::MissingContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::MissingContext)
}

/// Measures the canvas container in CSS pixels.
pub fn container_size(canvas: &HtmlCanvasElement) -> Result<Viewport, SurfaceError> {
	let parent = canvas.parent_element().ok_or(SurfaceError::Detached)?;
	let (width, height) = (parent.client_width() as f64, parent.client_height() as f64);
	let viewport = Viewport::new(width, height);
	if viewport.is_empty() {
		return Err(SurfaceError::ZeroDimension { width, height });
	}
	Ok(viewport)
}

/// Resizes the backing store for `viewport` at `dpr`. Returns true when it changed.
pub fn fit_backing_store(canvas: &HtmlCanvasElement, viewport: Viewport, dpr: f64) -> bool {
	let dpr = if dpr > 0.0 { dpr } else { 1.0 };
	let (w, h) = (
		(viewport.width * dpr).round().max(1.0) as u32,
		(viewport.height * dpr).round().max(1.0) as u32,
	);
	if canvas.width() == w && canvas.height() == h {
		return false;
	}
	canvas.set_width(w);
	canvas.set_height(h);
	true
}

#[cfg(test)]
pub mod recording {
	use std::cell::RefCell;

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear,
		Rect,
		Backdrop,
		Circle,
		Radial,
		Ring,
		Line,
		Text(String),
	}

	/// Records draw calls for assertions.
	#[derive(Default)]
	pub struct RecordingSurface {
		pub ops: RefCell<Vec<Op>>,
	}

	impl RecordingSurface {
		pub fn count(&self, op: &Op) -> usize {
			self.ops.borrow().iter().filter(|o| *o == op).count()
		}

		pub fn texts(&self) -> Vec<String> {
			self.ops
				.borrow()
				.iter()
				.filter_map(|o| match o {
					Op::Text(t) => Some(t.clone()),
					_ => None,
				})
				.collect()
		}
	}

	impl Surface for RecordingSurface {
		fn clear(&self, _: Viewport) {
			self.ops.borrow_mut().push(Op::Clear);
		}
		fn fill_rect(&self, _: Point, _: f64, _: f64, _: &str) {
			self.ops.borrow_mut().push(Op::Rect);
		}
		fn fill_backdrop(&self, _: Viewport, _: &[(f64, &str)]) {
			self.ops.borrow_mut().push(Op::Backdrop);
		}
		fn fill_circle(&self, _: Point, _: f64, _: &str) {
			self.ops.borrow_mut().push(Op::Circle);
		}
		fn fill_radial(&self, _: Point, _: Point, _: f64, _: &[(f64, String)]) {
			self.ops.borrow_mut().push(Op::Radial);
		}
		fn stroke_circle(&self, _: Point, _: f64, _: &str, _: f64) {
			self.ops.borrow_mut().push(Op::Ring);
		}
		fn line(&self, _: Point, _: Point, _: &str, _: f64) {
			self.ops.borrow_mut().push(Op::Line);
		}
		fn text(&self, text: &str, _: Point, _: &str, _: &str, _: Align) {
			self.ops.borrow_mut().push(Op::Text(text.to_owned()));
		}
	}
}
