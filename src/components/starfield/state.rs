use std::rc::Rc;

use log::{debug, warn};

use super::backdrop::Backdrop;
use super::camera::{Camera, Gesture, GestureEnd};
use super::config::StarfieldConfig;
use super::filter::filter;
use super::hit::find_hovered;
use super::overlap::resolve;
use super::project::{Projector, groups_of};
use super::types::{ContentEntity, Filters, Point, RenderEntity, TimeRange, Viewport};

/// Longest step the animation clock takes, in seconds.
pub const MAX_FRAME_STEP: f64 = 0.1;

/// Everything one starfield instance mutates between frames.
pub struct StarfieldState {
	pub config: StarfieldConfig,
	pub camera: Camera,
	pub gesture: Gesture,
	pub backdrop: Backdrop,
	pub viewport: Viewport,
	/// Seconds of animation since mount.
	pub elapsed: f64,
	hovered: Option<String>,
	pointer: Option<Point>,
	entities: Vec<Rc<ContentEntity>>,
	groups: Vec<String>,
	time_range: TimeRange,
	filters: Filters,
	/// Camera-independent layout, rebuilt only when inputs change.
	layout: Vec<RenderEntity>,
	layout_dirty: bool,
	visible: Vec<RenderEntity>,
}

impl StarfieldState {
	pub fn new(config: StarfieldConfig) -> Self {
		Self {
			camera: Camera::new(&config.camera),
			backdrop: Backdrop::new(config.backdrop_stars, config.backdrop_seed),
			config,
			gesture: Gesture::default(),
			viewport: Viewport::default(),
			elapsed: 0.0,
			hovered: None,
			pointer: None,
			entities: Vec::new(),
			groups: Vec::new(),
			time_range: TimeRange::default(),
			filters: Filters::default(),
			layout: Vec::new(),
			layout_dirty: true,
			visible: Vec::new(),
		}
	}

	pub fn set_entities(&mut self, entities: Vec<ContentEntity>) {
		let incomplete = entities.iter().filter(|e| e.is_incomplete()).count();
		if incomplete > 0 {
			warn!("{incomplete} photon(s) missing year, group or category; using defaults");
		}
		self.entities = entities.into_iter().map(Rc::new).collect();
		self.groups = groups_of(&self.entities);
		self.layout_dirty = true;
	}

	pub fn set_time_range(&mut self, range: TimeRange) {
		if self.time_range != range {
			self.time_range = range;
			self.layout_dirty = true;
		}
	}

	pub fn set_filters(&mut self, filters: Filters) {
		if self.filters != filters {
			self.filters = filters;
			self.layout_dirty = true;
		}
	}

	pub fn time_range(&self) -> TimeRange {
		self.time_range
	}

	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	/// Advances the animation clock by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if dt.is_finite() && dt > 0.0 {
			self.elapsed += dt.min(MAX_FRAME_STEP);
		}
	}

	/// Recomputes the visible set for the current camera and viewport.
	pub fn rebuild(&mut self) {
		if self.layout_dirty {
			let passing = filter(
				&self.entities,
				&self.filters,
				self.time_range,
				self.config.layout.fallback_year,
			);
			let projector = Projector::new(&self.config, self.time_range, &self.groups, &self.filters);
			let projected = passing.iter().map(|e| projector.project(e)).collect();
			self.layout = resolve(projected, self.config.overlap_radius);
			self.layout_dirty = false;
		}
		self.place();
		if !self.gesture.is_dragging() {
			self.refresh_hover();
		}
	}

	fn place(&mut self) {
		let (camera, viewport) = (&self.camera, self.viewport);
		self.visible.clear();
		self.visible.extend(self.layout.iter().map(|e| {
			let mut placed = e.clone();
			placed.screen = camera.to_screen(e.position, viewport);
			placed.radius = e.visual_size * camera.scale;
			placed
		}));
	}

	fn refresh_hover(&mut self) {
		self.hovered = self.pointer.and_then(|p| {
			find_hovered(p, &self.visible, self.config.hit_padding).map(|e| e.id().to_owned())
		});
	}

	pub fn visible(&self) -> &[RenderEntity] {
		&self.visible
	}

	pub fn pointer(&self) -> Option<Point> {
		self.pointer
	}

	pub fn hovered(&self) -> Option<&RenderEntity> {
		let id = self.hovered.as_deref()?;
		self.visible.iter().find(|e| e.id() == id)
	}

	pub fn is_hovered(&self, entity: &RenderEntity) -> bool {
		self.hovered.as_deref() == Some(entity.id())
	}

	pub fn pointer_down(&mut self, at: Point) {
		self.pointer = Some(at);
		self.gesture.press(at);
	}

	pub fn pointer_move(&mut self, at: Point) {
		self.pointer = Some(at);
		let threshold = self.config.camera.click_threshold;
		self.gesture.motion(at, threshold, &mut self.camera);
		if self.gesture.is_dragging() {
			self.place();
		} else {
			self.refresh_hover();
		}
	}

	/// Ends a press. Returns the clicked photon when the press was a click on one.
	pub fn pointer_up(&mut self, at: Point) -> Option<Rc<ContentEntity>> {
		self.pointer = Some(at);
		let threshold = self.config.camera.click_threshold;
		let end = self.gesture.release(at, threshold)?;
		self.refresh_hover();
		match end {
			GestureEnd::Click(point) => {
				let hit = find_hovered(point, &self.visible, self.config.hit_padding)?;
				debug!("photon {} clicked", hit.id());
				Some(hit.source.clone())
			}
			GestureEnd::Pan => None,
		}
	}

	pub fn pointer_leave(&mut self) {
		self.gesture.cancel();
		self.pointer = None;
		self.hovered = None;
	}

	pub fn wheel(&mut self, delta_y: f64, at: Option<Point>) {
		if self.camera.zoom(delta_y, at, self.viewport) {
			self.place();
			if !self.gesture.is_dragging() {
				self.refresh_hover();
			}
		}
	}
}
