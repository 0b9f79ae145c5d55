use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	Idle,
	Running,
}

/// Turns `requestAnimationFrame` timestamps into frame deltas in seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
	last_ms: Option<f64>,
}

impl FrameClock {
	pub fn step(&mut self, now_ms: f64) -> f64 {
		let dt = match self.last_ms {
			Some(last) if now_ms >= last => (now_ms - last) / 1000.0,
			_ => 0.0,
		};
		self.last_ms = Some(now_ms);
		dt
	}
}

#[derive(Default)]
struct LoopInner {
	running: Cell<bool>,
	in_frame: Cell<bool>,
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<FrameCallback>>,
}

impl LoopInner {
	fn schedule(&self) {
		if !self.running.get() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("no window; animation loop halted");
			self.running.set(false);
			return;
		};
		if let Some(cb) = self.callback.borrow().as_ref() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.handle.set(Some(id)),
				Err(err) => {
					warn!("requestAnimationFrame failed: {err:?}");
					self.running.set(false);
				}
			}
		}
	}

	fn cancel_pending(&self) {
		if let Some(id) = self.handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	}
}

/// Owns a self-rescheduling animation frame callback.
///
/// At most one frame is pending at a time. `stop` (or dropping the loop)
/// cancels it, so no frame runs against a detached canvas.
#[derive(Default)]
pub struct AnimationLoop {
	inner: Rc<LoopInner>,
}

impl AnimationLoop {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> LoopState {
		if self.inner.running.get() {
			LoopState::Running
		} else {
			LoopState::Idle
		}
	}

	/// Starts calling `frame` with each frame timestamp in milliseconds.
	pub fn start(&self, mut frame: impl FnMut(f64) + 'static) {
		self.stop();
		let weak = Rc::downgrade(&self.inner);
		let callback = Closure::new(move |timestamp: f64| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			if !inner.running.get() {
				return;
			}
			inner.in_frame.set(true);
			frame(timestamp);
			inner.in_frame.set(false);
			inner.schedule();
		});
		*self.inner.callback.borrow_mut() = Some(callback);
		self.inner.running.set(true);
		self.inner.schedule();
		debug!("animation loop started");
	}

	pub fn stop(&self) {
		let was_running = self.inner.running.replace(false);
		self.inner.cancel_pending();
		// The callback cannot be freed while it is executing; it stays
		// parked until the next start or drop.
		if !self.inner.in_frame.get() {
			self.inner.callback.borrow_mut().take();
		}
		if was_running {
			debug!("animation loop stopped");
		}
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_measures_deltas_in_seconds() {
		let mut clock = FrameClock::default();
		assert_eq!(clock.step(1000.0), 0.0);
		assert!((clock.step(1016.0) - 0.016).abs() < 1e-12);
		assert!((clock.step(1049.0) - 0.033).abs() < 1e-12);
	}

	#[test]
	fn clock_ignores_backwards_time() {
		let mut clock = FrameClock::default();
		clock.step(500.0);
		assert_eq!(clock.step(400.0), 0.0);
		assert!((clock.step(450.0) - 0.05).abs() < 1e-12);
	}

	#[test]
	fn new_loop_is_idle() {
		let frames = AnimationLoop::new();
		assert_eq!(frames.state(), LoopState::Idle);
		frames.stop();
		assert_eq!(frames.state(), LoopState::Idle);
	}
}
