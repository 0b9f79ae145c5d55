use std::collections::BTreeSet;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::StarfieldConfig;
use super::types::{ContentEntity, Filters, Point, RenderEntity, TimeRange};

/// Stable 64-bit FNV-1a, used to seed per-entity jitter.
pub fn fnv1a(text: &str) -> u64 {
	text.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
		(hash ^ byte as u64).wrapping_mul(0x0000_0100_0000_01b3)
	})
}

/// Sorted distinct group names, one band each.
pub fn groups_of(entities: &[Rc<ContentEntity>]) -> Vec<String> {
	entities
		.iter()
		.map(|e| e.group_name())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_owned)
		.collect()
}

/// Maps records into layout space. Camera placement happens afterwards.
pub struct Projector<'a> {
	config: &'a StarfieldConfig,
	range: TimeRange,
	groups: &'a [String],
	focus: Option<&'a str>,
}

impl<'a> Projector<'a> {
	pub fn new(
		config: &'a StarfieldConfig,
		range: TimeRange,
		groups: &'a [String],
		filters: &'a Filters,
	) -> Self {
		Self {
			config,
			range,
			groups,
			focus: filters.group.as_deref(),
		}
	}

	pub fn project(&self, entity: &Rc<ContentEntity>) -> RenderEntity {
		let layout = &self.config.layout;
		let visual = &self.config.visual;
		let palette = &self.config.palette;

		let progress = self.range.progress(entity.year_or(layout.fallback_year));
		let (x0, x1) = layout.time_span;
		let anchor = Point::new(x0 + (x1 - x0) * progress, self.band(entity.group_name()));

		let (jx, jy) = self.jitter(&entity.id);
		let size = visual.size(entity.engagement);

		RenderEntity {
			source: entity.clone(),
			anchor,
			position: Point::new(anchor.x + jx, anchor.y + jy),
			screen: anchor,
			visual_size: size,
			radius: size,
			brightness: visual.brightness(entity.engagement),
			primary: palette.category(entity.category.as_deref()),
			secondary: palette.group(entity.group_name()),
		}
	}

	fn band(&self, group: &str) -> f64 {
		let layout = &self.config.layout;
		if self.focus == Some(group) {
			return layout.focal_band;
		}
		let (y0, y1) = layout.band_span;
		let height = y1 - y0;
		match self.groups.iter().position(|g| g == group) {
			Some(index) => y0 + height * (index as f64 + 0.5) / self.groups.len() as f64,
			None => {
				let sum: u32 = group.chars().map(u32::from).sum();
				y0 + (sum as f64) % height.max(1.0)
			}
		}
	}

	fn jitter(&self, id: &str) -> (f64, f64) {
		let amplitude = self.config.layout.jitter;
		if amplitude <= 0.0 {
			return (0.0, 0.0);
		}
		let mut rng = SmallRng::seed_from_u64(fnv1a(id) ^ self.config.layout.jitter_seed);
		(
			rng.gen_range(-1.0..1.0) * amplitude,
			rng.gen_range(-1.0..1.0) * amplitude,
		)
	}
}
