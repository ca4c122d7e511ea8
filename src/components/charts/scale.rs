//! Plot-area geometry and linear data-to-pixel scales.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}

	pub fn right(&self) -> f64 {
		self.left + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.top + self.height
	}

	pub fn center(&self) -> (f64, f64) {
		(self.left + self.width / 2.0, self.top + self.height / 2.0)
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
	}

	/// Shrinks every side by `by`.
	pub fn inset(&self, by: f64) -> Self {
		Self::new(self.left + by, self.top + by, self.width - 2.0 * by, self.height - 2.0 * by)
	}
}

/// Maps `[min, max]` onto a pixel span. `reversed` spans run from the far
/// pixel edge back (screen y grows downward, data y upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	pub min: f64,
	pub max: f64,
	start: f64,
	length: f64,
	reversed: bool,
}

impl LinearScale {
	pub fn horizontal(min: f64, max: f64, area: &Rect) -> Self {
		Self::new(min, max, area.left, area.width, false)
	}

	pub fn vertical(min: f64, max: f64, area: &Rect) -> Self {
		Self::new(min, max, area.top, area.height, true)
	}

	fn new(min: f64, max: f64, start: f64, length: f64, reversed: bool) -> Self {
		// A degenerate domain still maps to the middle of the span.
		let (min, max) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
		Self {
			min,
			max,
			start,
			length,
			reversed,
		}
	}

	pub fn pixel(&self, value: f64) -> f64 {
		let t = (value - self.min) / (self.max - self.min);
		if self.reversed {
			self.start + self.length * (1.0 - t)
		} else {
			self.start + self.length * t
		}
	}

	/// Evenly spaced tick values from `min` to `max`, inclusive.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let count = count.max(1);
		let step = (self.max - self.min) / count as f64;
		(0..=count).map(|i| self.min + step * i as f64).collect()
	}
}

/// Smallest "nice" bound (1, 2 or 5 times a power of ten) not below
/// `value`. Non-positive input yields 1.
pub fn nice_max(value: f64) -> f64 {
	if !value.is_finite() || value <= 0.0 {
		return 1.0;
	}
	let magnitude = 10f64.powf(value.log10().floor());
	let fraction = value / magnitude;
	let nice = if fraction <= 1.0 {
		1.0
	} else if fraction <= 2.0 {
		2.0
	} else if fraction <= 5.0 {
		5.0
	} else {
		10.0
	};
	nice * magnitude
}

/// `(min, max)` of the values, padded by `pad` of the range on both sides.
pub fn padded_extent(values: impl IntoIterator<Item = f64>, pad: f64) -> Option<(f64, f64)> {
	let (min, max) = values
		.into_iter()
		.filter(|v| v.is_finite())
		.fold(None, |acc: Option<(f64, f64)>, v| match acc {
			None => Some((v, v)),
			Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
		})?;
	let margin = ((max - min) * pad).max(pad);
	Some((min - margin, max + margin))
}
