use super::palette::Palette;

/// Where entities land in the 0..100 layout space.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Horizontal extent of the time axis.
	pub time_span: (f64, f64),
	/// Vertical extent shared out between group bands.
	pub band_span: (f64, f64),
	/// Band used for the group matching an active group filter.
	pub focal_band: f64,
	pub jitter: f64,
	pub jitter_seed: u64,
	/// Year assumed for records without one.
	pub fallback_year: i32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			time_span: (10.0, 90.0),
			band_span: (15.0, 85.0),
			focal_band: 50.0,
			jitter: 2.5,
			jitter_seed: 0x9e37_79b9_7f4a_7c15,
			fallback_year: 2025,
		}
	}
}

/// Engagement to size/brightness mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualConfig {
	pub size_slope: f64,
	pub size_base: f64,
	pub min_size: f64,
	/// Bounds on the unzoomed size in pixels.
	pub max_size: f64,
	pub brightness_slope: f64,
	pub brightness_base: f64,
	pub min_brightness: f64,
}

impl Default for VisualConfig {
	fn default() -> Self {
		Self {
			size_slope: 0.2,
			size_base: 6.0,
			min_size: 6.0,
			max_size: 16.0,
			brightness_slope: 0.01,
			brightness_base: 0.0,
			min_brightness: 0.3,
		}
	}
}

impl VisualConfig {
	pub fn size(&self, engagement: u32) -> f64 {
		(engagement as f64 * self.size_slope + self.size_base).clamp(self.min_size, self.max_size)
	}

	pub fn brightness(&self, engagement: u32) -> f64 {
		(engagement as f64 * self.brightness_slope + self.brightness_base)
			.clamp(self.min_brightness, 1.0)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	pub zoom_in: f64,
	pub zoom_out: f64,
	/// Pointer travel in pixels below which a press counts as a click.
	pub click_threshold: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			zoom_in: 1.1,
			zoom_out: 0.9,
			click_threshold: 5.0,
		}
	}
}

/// Everything a starfield instance needs besides its data.
#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldConfig {
	pub layout: LayoutConfig,
	pub visual: VisualConfig,
	pub camera: CameraConfig,
	pub palette: Palette,
	pub hit_padding: f64,
	pub overlap_radius: f64,
	pub backdrop_stars: usize,
	pub backdrop_seed: u64,
	pub tick_step_years: i32,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			visual: VisualConfig::default(),
			camera: CameraConfig::default(),
			palette: Palette::default(),
			hit_padding: 10.0,
			overlap_radius: 1.5,
			backdrop_stars: 200,
			backdrop_seed: 7,
			tick_step_years: 5,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn size_is_clamped_and_monotonic() {
		let visual = VisualConfig::default();
		assert_eq!(visual.size(0), 6.0);
		assert_eq!(visual.size(1_000), 16.0);
		assert!(visual.size(90) > visual.size(10));
	}

	#[test]
	fn size_stays_within_configured_bounds() {
		let visual = VisualConfig::default();
		for likes in [0, 10, 90, 1_000, u32::MAX] {
			let size = visual.size(likes);
			assert!(size >= visual.min_size && size <= visual.max_size, "{likes} -> {size}");
		}
		let wide = VisualConfig {
			min_size: 10.0,
			max_size: 12.0,
			..VisualConfig::default()
		};
		assert_eq!(wide.size(0), 10.0);
		assert_eq!(wide.size(50), 12.0);
	}

	#[test]
	fn brightness_has_a_floor() {
		let visual = VisualConfig::default();
		assert_eq!(visual.brightness(0), 0.3);
		assert!((visual.brightness(50) - 0.5).abs() < 1e-9);
		assert_eq!(visual.brightness(500), 1.0);
	}
}
