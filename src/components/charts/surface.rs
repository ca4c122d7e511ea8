//! Drawing surfaces and the mount points that hand them out.

/// Horizontal text anchor. Text is always vertically centered on `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
	Left,
	Center,
	Right,
}

/// The subset of a 2D canvas context the charts draw with.
pub trait Painter {
	fn clear(&mut self, width: f64, height: f64);
	fn save(&mut self);
	fn restore(&mut self);
	fn set_fill_style(&mut self, style: &str);
	fn set_stroke_style(&mut self, style: &str);
	fn set_line_width(&mut self, width: f64);
	fn set_font(&mut self, font: &str);
	fn set_text_align(&mut self, align: TextAlign);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	fn begin_path(&mut self);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	/// Like [`Painter::arc`], but sweeping anticlockwise.
	fn arc_reverse(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	fn close_path(&mut self);
	fn fill(&mut self);
	fn stroke(&mut self);
	fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// A freshly created drawable owned by one chart.
pub struct Surface {
	chart_id: String,
	width: f64,
	height: f64,
	painter: Box<dyn Painter>,
}

impl Surface {
	pub fn new(chart_id: impl Into<String>, width: f64, height: f64, painter: Box<dyn Painter>) -> Self {
		Self {
			chart_id: chart_id.into(),
			width,
			height,
			painter,
		}
	}

	pub fn chart_id(&self) -> &str {
		&self.chart_id
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn painter(&mut self) -> &mut dyn Painter {
		self.painter.as_mut()
	}
}

impl std::fmt::Debug for Surface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Surface")
			.field("chart_id", &self.chart_id)
			.field("width", &self.width)
			.field("height", &self.height)
			.finish_non_exhaustive()
	}
}

/// Pre-existing containers charts are drawn into.
pub trait MountPoints {
	fn contains(&self, container_id: &str) -> bool;

	/// Empties the container and returns a new surface inside it, or `None`
	/// when the container is gone or a surface cannot be made.
	fn prepare(&mut self, container_id: &str, chart_id: &str) -> Option<Surface>;
}
