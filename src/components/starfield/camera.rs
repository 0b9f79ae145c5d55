use super::config::CameraConfig;
use super::types::{Point, Viewport};

/// Pan offset and zoom scale applied to layout space.
///
/// `screen = (base - centre) * scale + centre - offset`, where `base` is the
/// layout point stretched over the viewport. Zoom is about the viewport centre
/// unless an anchor is given.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	pub offset: Point,
	pub scale: f64,
	min_scale: f64,
	max_scale: f64,
	zoom_in: f64,
	zoom_out: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self::new(&CameraConfig::default())
	}
}

impl Camera {
	pub fn new(config: &CameraConfig) -> Self {
		Self {
			offset: Point::default(),
			scale: 1.0_f64.clamp(config.min_scale, config.max_scale),
			min_scale: config.min_scale,
			max_scale: config.max_scale,
			zoom_in: config.zoom_in,
			zoom_out: config.zoom_out,
		}
	}

	pub fn to_screen(&self, p: Point, viewport: Viewport) -> Point {
		let c = viewport.center();
		let (bx, by) = (p.x / 100.0 * viewport.width, p.y / 100.0 * viewport.height);
		Point::new(
			(bx - c.x) * self.scale + c.x - self.offset.x,
			(by - c.y) * self.scale + c.y - self.offset.y,
		)
	}

	pub fn to_world(&self, s: Point, viewport: Viewport) -> Option<Point> {
		if viewport.is_empty() {
			return None;
		}
		let c = viewport.center();
		let bx = (s.x + self.offset.x - c.x) / self.scale + c.x;
		let by = (s.y + self.offset.y - c.y) / self.scale + c.y;
		Some(Point::new(bx / viewport.width * 100.0, by / viewport.height * 100.0))
	}

	pub fn pan_by(&mut self, last: Point, current: Point) {
		self.offset.x += last.x - current.x;
		self.offset.y += last.y - current.y;
	}

	/// Applies one wheel notch. Positive `delta_y` zooms out.
	///
	/// Returns false when the scale is already pinned at the bound.
	pub fn zoom(&mut self, delta_y: f64, anchor: Option<Point>, viewport: Viewport) -> bool {
		if delta_y == 0.0 {
			return false;
		}
		let factor = if delta_y > 0.0 {
			self.zoom_out
		} else {
			self.zoom_in
		};
		let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
		if new_scale == self.scale {
			return false;
		}
		let anchor = anchor.unwrap_or_else(|| viewport.center());
		let c = viewport.center();
		let ratio = new_scale / self.scale;
		// Keep the layout point under `anchor` fixed.
		self.offset.x = (anchor.x + self.offset.x - c.x) * ratio + c.x - anchor.x;
		self.offset.y = (anchor.y + self.offset.y - c.y) * ratio + c.y - anchor.y;
		self.scale = new_scale;
		true
	}
}

/// Pointer press lifecycle. Only a press that never became a drag can click.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	PendingClick {
		origin: Point,
	},
	Dragging {
		origin: Point,
		last: Point,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEnd {
	Click(Point),
	Pan,
}

impl Gesture {
	pub fn is_dragging(&self) -> bool {
		matches!(self, Gesture::Dragging { .. })
	}

	pub fn press(&mut self, at: Point) {
		*self = Gesture::PendingClick { origin: at };
	}

	/// Advances the gesture and pans the camera once the press is a drag.
	pub fn motion(&mut self, at: Point, threshold: f64, camera: &mut Camera) {
		match *self {
			Gesture::Idle => {}
			Gesture::PendingClick { origin } => {
				if origin.distance(at) >= threshold {
					camera.pan_by(origin, at);
					*self = Gesture::Dragging { origin, last: at };
				}
			}
			Gesture::Dragging { origin, last } => {
				camera.pan_by(last, at);
				*self = Gesture::Dragging { origin, last: at };
			}
		}
	}

	pub fn release(&mut self, at: Point, threshold: f64) -> Option<GestureEnd> {
		let end = match std::mem::take(self) {
			Gesture::Idle => return None,
			Gesture::PendingClick { origin } if origin.distance(at) < threshold => {
				GestureEnd::Click(at)
			}
			Gesture::PendingClick { .. } | Gesture::Dragging { .. } => GestureEnd::Pan,
		};
		Some(end)
	}

	pub fn cancel(&mut self) {
		*self = Gesture::Idle;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VIEW: Viewport = Viewport::new(800.0, 600.0);

	fn close(a: Point, b: Point) -> bool {
		a.distance(b) < 1e-9
	}

	#[test]
	fn identity_camera_stretches_layout_over_viewport() {
		let camera = Camera::default();
		assert!(close(camera.to_screen(Point::new(0.0, 0.0), VIEW), Point::new(0.0, 0.0)));
		assert!(close(
			camera.to_screen(Point::new(50.0, 50.0), VIEW),
			Point::new(400.0, 300.0)
		));
		assert!(close(
			camera.to_screen(Point::new(100.0, 100.0), VIEW),
			Point::new(800.0, 600.0)
		));
	}

	#[test]
	fn to_world_inverts_to_screen() {
		let mut camera = Camera::default();
		camera.zoom(-1.0, Some(Point::new(120.0, 80.0)), VIEW);
		camera.pan_by(Point::new(10.0, 10.0), Point::new(40.0, -5.0));
		let world = Point::new(33.0, 71.0);
		let back = camera.to_world(camera.to_screen(world, VIEW), VIEW);
		assert!(back.is_some_and(|p| close(p, world)));
		assert_eq!(camera.to_world(Point::default(), Viewport::default()), None);
	}

	#[test]
	fn drag_moves_offset_against_pointer() {
		let mut camera = Camera::default();
		camera.pan_by(Point::new(100.0, 100.0), Point::new(130.0, 90.0));
		assert_eq!(camera.offset, Point::new(-30.0, 10.0));
		// content follows the pointer
		let p = camera.to_screen(Point::new(50.0, 50.0), VIEW);
		assert!(close(p, Point::new(430.0, 290.0)));
	}

	#[test]
	fn zoom_is_pinned_at_bounds() {
		let mut camera = Camera::default();
		for _ in 0..100 {
			camera.zoom(-1.0, None, VIEW);
			assert!(camera.scale <= 3.0);
		}
		assert_eq!(camera.scale, 3.0);
		assert!(!camera.zoom(-1.0, None, VIEW));
		assert_eq!(camera.scale, 3.0);

		for _ in 0..100 {
			camera.zoom(1.0, None, VIEW);
			assert!(camera.scale >= 0.5);
		}
		assert_eq!(camera.scale, 0.5);
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut camera = Camera::default();
		let anchor = Point::new(200.0, 450.0);
		let world = camera.to_world(anchor, VIEW).unwrap_or_default();
		camera.zoom(-1.0, Some(anchor), VIEW);
		camera.zoom(-1.0, Some(anchor), VIEW);
		assert!((camera.scale - 1.21).abs() < 1e-9);
		assert!(close(camera.to_screen(world, VIEW), anchor));
	}

	#[test]
	fn short_press_is_a_click() {
		let mut camera = Camera::default();
		let mut gesture = Gesture::default();
		gesture.press(Point::new(100.0, 100.0));
		gesture.motion(Point::new(104.0, 100.0), 5.0, &mut camera);
		assert!(!gesture.is_dragging());
		assert_eq!(camera.offset, Point::default());
		assert_eq!(
			gesture.release(Point::new(104.0, 100.0), 5.0),
			Some(GestureEnd::Click(Point::new(104.0, 100.0)))
		);
		assert_eq!(gesture, Gesture::Idle);
	}

	#[test]
	fn long_press_is_a_pan() {
		let mut camera = Camera::default();
		let mut gesture = Gesture::default();
		gesture.press(Point::new(100.0, 100.0));
		gesture.motion(Point::new(106.0, 100.0), 5.0, &mut camera);
		assert!(gesture.is_dragging());
		assert_eq!(camera.offset, Point::new(-6.0, 0.0));
		assert_eq!(
			gesture.release(Point::new(106.0, 100.0), 5.0),
			Some(GestureEnd::Pan)
		);
	}

	#[test]
	fn release_without_motion_events_uses_end_displacement() {
		let mut gesture = Gesture::default();
		gesture.press(Point::new(0.0, 0.0));
		assert_eq!(
			gesture.release(Point::new(0.0, 6.0), 5.0),
			Some(GestureEnd::Pan)
		);
		gesture.press(Point::new(0.0, 0.0));
		assert!(matches!(
			gesture.release(Point::new(0.0, 4.0), 5.0),
			Some(GestureEnd::Click(_))
		));
	}

	#[test]
	fn drag_returning_home_does_not_click() {
		let mut camera = Camera::default();
		let mut gesture = Gesture::default();
		gesture.press(Point::new(0.0, 0.0));
		gesture.motion(Point::new(20.0, 0.0), 5.0, &mut camera);
		gesture.motion(Point::new(1.0, 0.0), 5.0, &mut camera);
		assert_eq!(camera.offset, Point::new(-1.0, 0.0));
		assert_eq!(gesture.release(Point::new(1.0, 0.0), 5.0), Some(GestureEnd::Pan));
	}

	#[test]
	fn release_when_idle_is_ignored() {
		let mut gesture = Gesture::default();
		assert_eq!(gesture.release(Point::new(1.0, 1.0), 5.0), None);
	}
}
