//! In-memory painter and mount points for native tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::surface::{MountPoints, Painter, Surface, TextAlign};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Clear { width: f64, height: f64 },
	Save,
	Restore,
	FillStyle(String),
	StrokeStyle(String),
	LineWidth(f64),
	Font(String),
	TextAlign(TextAlign),
	FillRect { x: f64, y: f64, width: f64, height: f64 },
	BeginPath,
	MoveTo { x: f64, y: f64 },
	LineTo { x: f64, y: f64 },
	Arc { x: f64, y: f64, radius: f64 },
	ClosePath,
	Fill,
	Stroke,
	Text { text: String, x: f64, y: f64 },
}

/// Records every call; clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
	ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl RecordingPainter {
	pub fn ops(&self) -> Vec<DrawOp> {
		self.ops.borrow().clone()
	}

	pub fn texts(&self) -> Vec<String> {
		self.ops
			.borrow()
			.iter()
			.filter_map(|op| match op {
				DrawOp::Text { text, .. } => Some(text.clone()),
				_ => None,
			})
			.collect()
	}

	fn push(&self, op: DrawOp) {
		self.ops.borrow_mut().push(op);
	}
}

impl Painter for RecordingPainter {
	fn clear(&mut self, width: f64, height: f64) {
		self.push(DrawOp::Clear { width, height });
	}

	fn save(&mut self) {
		self.push(DrawOp::Save);
	}

	fn restore(&mut self) {
		self.push(DrawOp::Restore);
	}

	fn set_fill_style(&mut self, style: &str) {
		self.push(DrawOp::FillStyle(style.to_owned()));
	}

	fn set_stroke_style(&mut self, style: &str) {
		self.push(DrawOp::StrokeStyle(style.to_owned()));
	}

	fn set_line_width(&mut self, width: f64) {
		self.push(DrawOp::LineWidth(width));
	}

	fn set_font(&mut self, font: &str) {
		self.push(DrawOp::Font(font.to_owned()));
	}

	fn set_text_align(&mut self, align: TextAlign) {
		self.push(DrawOp::TextAlign(align));
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.push(DrawOp::FillRect { x, y, width, height });
	}

	fn begin_path(&mut self) {
		self.push(DrawOp::BeginPath);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.push(DrawOp::MoveTo { x, y });
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.push(DrawOp::LineTo { x, y });
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
		self.push(DrawOp::Arc { x, y, radius });
	}

	fn arc_reverse(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
		self.push(DrawOp::Arc { x, y, radius });
	}

	fn close_path(&mut self) {
		self.push(DrawOp::ClosePath);
	}

	fn fill(&mut self) {
		self.push(DrawOp::Fill);
	}

	fn stroke(&mut self) {
		self.push(DrawOp::Stroke);
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		self.push(DrawOp::Text {
			text: text.to_owned(),
			x,
			y,
		});
	}
}

/// Containers as lists of child canvas ids; every surface handed out keeps
/// its own recording.
#[derive(Debug, Default)]
pub struct MemoryMounts {
	containers: HashMap<String, Vec<String>>,
	surfaces: HashMap<String, RecordingPainter>,
	pub prepared: usize,
}

impl MemoryMounts {
	pub fn with_containers(ids: &[&str]) -> Self {
		Self {
			containers: ids.iter().map(|id| (id.to_string(), Vec::new())).collect(),
			..Self::default()
		}
	}

	pub fn children(&self, container_id: &str) -> &[String] {
		self.containers.get(container_id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Recording of the latest surface made for `chart_id`.
	pub fn painter(&self, chart_id: &str) -> Option<RecordingPainter> {
		self.surfaces.get(chart_id).cloned()
	}
}

impl MountPoints for MemoryMounts {
	fn contains(&self, container_id: &str) -> bool {
		self.containers.contains_key(container_id)
	}

	fn prepare(&mut self, container_id: &str, chart_id: &str) -> Option<Surface> {
		let children = self.containers.get_mut(container_id)?;
		children.clear();
		children.push(chart_id.to_owned());
		let painter = RecordingPainter::default();
		self.surfaces.insert(chart_id.to_owned(), painter.clone());
		self.prepared += 1;
		Some(Surface::new(chart_id, 640.0, 360.0, Box::new(painter)))
	}
}
