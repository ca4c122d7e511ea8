use std::fmt;

/// An sRGB color with alpha, rendered as a CSS `rgba()` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub const fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn css(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

pub const PRIMARY: Rgba = Rgba::new(102, 126, 234, 1.0);
pub const SUCCESS: Rgba = Rgba::new(16, 185, 129, 1.0);
pub const WARNING: Rgba = Rgba::new(245, 158, 11, 1.0);
pub const DANGER: Rgba = Rgba::new(239, 68, 68, 1.0);
pub const NEUTRAL: Rgba = Rgba::new(156, 163, 175, 1.0);

pub const TEXT: &str = "#1f2937";
pub const MUTED_TEXT: &str = "#6b7280";
pub const GRID: &str = "rgba(0, 0, 0, 0.08)";
pub const BACKGROUND: &str = "#ffffff";

const BASE: [Rgba; 10] = [
	Rgba::new(102, 126, 234, 0.8),
	Rgba::new(118, 75, 162, 0.8),
	Rgba::new(16, 185, 129, 0.8),
	Rgba::new(245, 158, 11, 0.8),
	Rgba::new(239, 68, 68, 0.8),
	Rgba::new(59, 130, 246, 0.8),
	Rgba::new(236, 72, 153, 0.8),
	Rgba::new(20, 184, 166, 0.8),
	Rgba::new(251, 146, 60, 0.8),
	Rgba::new(168, 85, 247, 0.8),
];

/// Number of distinct colors before the palette wraps around.
#[cfg(test)]
pub const BASE_LEN: usize = BASE.len();

/// Color of category `i`; cycles through the base colors.
pub fn color(i: usize) -> Rgba {
	BASE[i % BASE.len()]
}

/// Colors for `count` categories.
pub fn palette(count: usize) -> Vec<Rgba> {
	(0..count).map(color).collect()
}
