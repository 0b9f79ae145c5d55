use std::collections::HashMap;

const CATEGORY_COLORS: &[(&str, &str)] = &[
	("moment", "#3b82f6"),
	("prophecy", "#8b5cf6"),
	("culture", "#f59e0b"),
	("onsite", "#10b981"),
	("inspiration", "#06b6d4"),
	("history", "#f97316"),
	("darkmoment", "#ef4444"),
];

const GROUP_COLORS: &[(&str, &str)] = &[
	("华为", "#ef4444"),
	("蔚来", "#3b82f6"),
	("小鹏", "#22c55e"),
	("卓驭", "#f97316"),
	("特斯拉", "#9ca3af"),
	("百度", "#60a5fa"),
	("理想", "#c084fc"),
	("小米", "#f59e0b"),
	("Momenta", "#06b6d4"),
	("地平线", "#84cc16"),
	("Mobileye", "#fbbf24"),
	("其他", "#4b5563"),
];

pub const DEFAULT_COLOR: Rgb = Rgb::new(0x6b, 0x72, 0x80);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parses `#rrggbb` or `#rgb`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#').unwrap_or(hex);
		if !digits.is_ascii() {
			return None;
		}
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		match digits.len() {
			6 => Some(Self::new(
				channel(&digits[0..2])?,
				channel(&digits[2..4])?,
				channel(&digits[4..6])?,
			)),
			3 => {
				let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
				Some(Self::new(short(0)?, short(1)?, short(2)?))
			}
			_ => None,
		}
	}

	pub fn rgba(&self, alpha: f64) -> String {
		format!(
			"rgba({}, {}, {}, {:.3})",
			self.r,
			self.g,
			self.b,
			alpha.clamp(0.0, 1.0)
		)
	}
}

/// Category and group colour lookup, owned by one visualisation.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	categories: HashMap<String, Rgb>,
	groups: HashMap<String, Rgb>,
	fallback: Rgb,
}

impl Default for Palette {
	fn default() -> Self {
		Self::from_tables(CATEGORY_COLORS, GROUP_COLORS)
	}
}

impl Palette {
	/// Builds a palette from hex tables. Entries that fail to parse use the default gray.
	pub fn from_tables(categories: &[(&str, &str)], groups: &[(&str, &str)]) -> Self {
		let parse = |table: &[(&str, &str)]| {
			table
				.iter()
				.map(|(k, hex)| ((*k).to_owned(), Rgb::from_hex(hex).unwrap_or(DEFAULT_COLOR)))
				.collect()
		};
		Self {
			categories: parse(categories),
			groups: parse(groups),
			fallback: DEFAULT_COLOR,
		}
	}

	pub fn set_category(&mut self, category: impl Into<String>, color: Rgb) {
		self.categories.insert(category.into(), color);
	}

	pub fn set_group(&mut self, group: impl Into<String>, color: Rgb) {
		self.groups.insert(group.into(), color);
	}

	pub fn category(&self, category: Option<&str>) -> Rgb {
		category
			.and_then(|c| self.categories.get(c))
			.copied()
			.unwrap_or(self.fallback)
	}

	pub fn group(&self, group: &str) -> Rgb {
		self.groups.get(group).copied().unwrap_or(self.fallback)
	}
}
