use std::rc::Rc;

use super::palette::Rgb;

/// Group name used for records that carry no company.
pub const DEFAULT_GROUP: &str = "other";

/// A photon as supplied by the data layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentEntity {
	pub id: String,
	pub year: Option<i32>,
	pub category: Option<String>,
	pub group: Option<String>,
	pub engagement: u32,
	pub text: String,
	pub author: String,
}

impl ContentEntity {
	pub fn new(id: impl Into<String>, year: i32) -> Self {
		Self {
			id: id.into(),
			year: Some(year),
			..Default::default()
		}
	}

	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	pub fn with_engagement(mut self, engagement: u32) -> Self {
		self.engagement = engagement;
		self
	}

	pub fn with_text(mut self, author: impl Into<String>, text: impl Into<String>) -> Self {
		self.author = author.into();
		self.text = text.into();
		self
	}

	pub fn year_or(&self, fallback: i32) -> i32 {
		self.year.unwrap_or(fallback)
	}

	pub fn group_name(&self) -> &str {
		match self.group.as_deref() {
			Some(g) if !g.is_empty() => g,
			_ => DEFAULT_GROUP,
		}
	}

	/// True when any field had to be defaulted for layout.
	pub fn is_incomplete(&self) -> bool {
		self.year.is_none()
			|| self.group.as_deref().is_none_or(str::is_empty)
			|| self.category.as_deref().is_none_or(str::is_empty)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Inclusive range of years shown on the time axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
	pub start: i32,
	pub end: i32,
}

impl Default for TimeRange {
	fn default() -> Self {
		Self {
			start: 2015,
			end: 2035,
		}
	}
}

impl TimeRange {
	pub const fn new(start: i32, end: i32) -> Self {
		Self { start, end }
	}

	/// Moves the start year, never past the end year.
	pub fn with_start(self, start: i32) -> Self {
		Self {
			start: start.min(self.end),
			..self
		}
	}

	pub fn contains(&self, year: i32) -> bool {
		year >= self.start && year <= self.end
	}

	/// Position of `year` within the range, clamped to `[0, 1]`.
	pub fn progress(&self, year: i32) -> f64 {
		let span = (self.end as i64 - self.start as i64) as f64;
		if span <= 0.0 {
			return 0.0;
		}
		((year as i64 - self.start as i64) as f64 / span).clamp(0.0, 1.0)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
	pub category: Option<String>,
	pub group: Option<String>,
}

/// Per-frame layout of one visible entity.
#[derive(Clone, Debug)]
pub struct RenderEntity {
	pub source: Rc<ContentEntity>,
	/// Layout point before jitter, in 0..100 units on each axis.
	pub anchor: Point,
	pub position: Point,
	/// Pixel position after the camera transform.
	pub screen: Point,
	/// Size in unzoomed pixels.
	pub visual_size: f64,
	/// Size in screen pixels.
	pub radius: f64,
	pub brightness: f64,
	pub primary: Rgb,
	pub secondary: Rgb,
}

impl RenderEntity {
	pub fn id(&self) -> &str {
		&self.source.id
	}
}
