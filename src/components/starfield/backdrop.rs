use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{Point, Viewport};

const WRAP_MARGIN: f64 = 10.0;

#[derive(Clone, Debug)]
struct BackdropStar {
	/// Position as a fraction of the viewport.
	x: f64,
	y: f64,
	size: f64,
	opacity: f64,
	/// Leftward drift in px per second.
	speed: f64,
	twinkle_rate: f64,
	phase: f64,
	tinted: bool,
}

/// A decorative star at its position for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedStar {
	pub at: Point,
	pub size: f64,
	pub opacity: f64,
	pub tinted: bool,
}

/// Drifting background stars. Motion depends only on elapsed seconds.
#[derive(Clone, Debug, Default)]
pub struct Backdrop {
	stars: Vec<BackdropStar>,
}

impl Backdrop {
	pub fn new(count: usize, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let stars = (0..count)
			.map(|_| BackdropStar {
				x: rng.gen_range(0.0..1.0),
				y: rng.gen_range(0.0..1.0),
				size: rng.gen_range(0.5..2.5),
				opacity: rng.gen_range(0.3..1.0),
				speed: rng.gen_range(6.0..36.0),
				twinkle_rate: rng.gen_range(0.5..2.0),
				phase: rng.gen_range(0.0..TAU),
				tinted: rng.gen_bool(0.2),
			})
			.collect();
		Self { stars }
	}

	pub fn placed(&self, viewport: Viewport, elapsed: f64) -> impl Iterator<Item = PlacedStar> + '_ {
		let span = viewport.width + 2.0 * WRAP_MARGIN;
		self.stars.iter().map(move |s| {
			let travelled = s.x * span - s.speed * elapsed;
			let x = travelled.rem_euclid(span.max(1.0)) - WRAP_MARGIN;
			let twinkle = 0.5 + 0.5 * (elapsed * s.twinkle_rate * TAU + s.phase).sin();
			PlacedStar {
				at: Point::new(x, s.y * viewport.height),
				size: s.size,
				opacity: (s.opacity * (0.6 + 0.4 * twinkle)).clamp(0.1, 1.0),
				tinted: s.tinted,
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_seed_same_sky() {
		let view = Viewport::new(640.0, 480.0);
		let a: Vec<_> = Backdrop::new(50, 3).placed(view, 1.25).collect();
		let b: Vec<_> = Backdrop::new(50, 3).placed(view, 1.25).collect();
		assert_eq!(a, b);
	}

	#[test]
	fn stars_stay_in_the_wrapped_band() {
		let view = Viewport::new(320.0, 200.0);
		let sky = Backdrop::new(100, 11);
		for elapsed in [0.0, 0.5, 17.0, 3600.0] {
			for star in sky.placed(view, elapsed) {
				assert!(star.at.x >= -WRAP_MARGIN && star.at.x < view.width + WRAP_MARGIN);
				assert!(star.at.y >= 0.0 && star.at.y <= view.height);
				assert!(star.opacity > 0.0 && star.opacity <= 1.0);
			}
		}
	}

	#[test]
	fn stars_drift_left_with_time() {
		let view = Viewport::new(10_000.0, 100.0);
		let sky = Backdrop::new(1, 5);
		let before = sky.placed(view, 0.0).next().map(|s| s.at.x);
		let after = sky.placed(view, 0.1).next().map(|s| s.at.x);
		let (Some(before), Some(after)) = (before, after) else {
			panic!("one star expected");
		};
		// wraps only when crossing the left edge
		assert!(after < before || before < 40.0);
	}
}
