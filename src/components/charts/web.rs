//! Browser mount points: containers looked up by element id, one `<canvas>`
//! per chart.

use log::warn;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::surface::{MountPoints, Painter, Surface, TextAlign};

const FALLBACK_WIDTH: f64 = 640.0;
const FALLBACK_HEIGHT: f64 = 360.0;

#[derive(Debug, Error)]
pub enum SurfaceError {
	#[error("container `{0}` not found")]
	MissingMount(String),
	#[error("created element is not a canvas")]
	NotCanvas,
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Mount points of the current document.
pub struct DomMounts {
	document: Document,
}

impl DomMounts {
	/// `None` outside a browser window.
	pub fn from_window() -> Option<Self> {
		let document = web_sys::window()?.document()?;
		Some(Self { document })
	}

	fn create_canvas(&self, container_id: &str, chart_id: &str) -> Result<Surface, SurfaceError> {
		let container = self
			.document
			.get_element_by_id(container_id)
			.ok_or_else(|| SurfaceError::MissingMount(container_id.to_owned()))?;
		container.set_inner_html("");

		let canvas: HtmlCanvasElement = self
			.document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| SurfaceError::NotCanvas)?;
		canvas.set_id(chart_id);

		let size = |measured: i32, fallback: f64| {
			if measured > 0 { measured as f64 } else { fallback }
		};
		let (width, height) = (
			size(container.client_width(), FALLBACK_WIDTH),
			size(container.client_height(), FALLBACK_HEIGHT),
		);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		let style = canvas.style();
		style.set_property("display", "block")?;
		style.set_property("width", "100%")?;
		container.append_child(&canvas)?;

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(SurfaceError::NoContext)?
			.dyn_into()
			.map_err(|_| SurfaceError::NoContext)?;
		Ok(Surface::new(chart_id, width, height, Box::new(CanvasPainter { ctx })))
	}
}

impl MountPoints for DomMounts {
	fn contains(&self, container_id: &str) -> bool {
		self.document.get_element_by_id(container_id).is_some()
	}

	fn prepare(&mut self, container_id: &str, chart_id: &str) -> Option<Surface> {
		match self.create_canvas(container_id, chart_id) {
			Ok(surface) => Some(surface),
			Err(err) => {
				warn!("cannot mount `{chart_id}` in `{container_id}`: {err}");
				None
			}
		}
	}
}

/// [`Painter`] over a canvas 2d context.
pub struct CanvasPainter {
	ctx: CanvasRenderingContext2d,
}

impl Painter for CanvasPainter {
	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn set_fill_style(&mut self, style: &str) {
		self.ctx.set_fill_style_str(style);
	}

	fn set_stroke_style(&mut self, style: &str) {
		self.ctx.set_stroke_style_str(style);
	}

	fn set_line_width(&mut self, width: f64) {
		self.ctx.set_line_width(width);
	}

	fn set_font(&mut self, font: &str) {
		self.ctx.set_font(font);
	}

	fn set_text_align(&mut self, align: TextAlign) {
		self.ctx.set_text_align(match align {
			TextAlign::Left => "left",
			TextAlign::Center => "center",
			TextAlign::Right => "right",
		});
		self.ctx.set_text_baseline("middle");
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.ctx.fill_rect(x, y, width, height);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let _ = self.ctx.arc(x, y, radius.max(0.0), start, end);
	}

	fn arc_reverse(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let _ = self
			.ctx
			.arc_with_anticlockwise(x, y, radius.max(0.0), start, end, true);
	}

	fn close_path(&mut self) {
		self.ctx.close_path();
	}

	fn fill(&mut self) {
		self.ctx.fill();
	}

	fn stroke(&mut self) {
		self.ctx.stroke();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		let _ = self.ctx.fill_text(text, x, y);
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use serde_json::json;
	use wasm_bindgen_test::*;
	use web_sys::Element;

	use super::*;
	use crate::components::charts::manager::{TrendingOptions, VisualizationManager};
	use crate::components::charts::types::{Record, RecordKind};

	wasm_bindgen_test_configure!(run_in_browser);

	fn container(id: &str) -> Element {
		let document = web_sys::window().unwrap().document().unwrap();
		let div = document.create_element("div").unwrap();
		div.set_id(id);
		document.body().unwrap().append_child(&div).unwrap();
		div
	}

	#[wasm_bindgen_test]
	fn replacing_a_chart_keeps_one_canvas() {
		let host = container("wasm-trending");
		let mut manager = VisualizationManager::new(DomMounts::from_window().unwrap());
		let songs = Record::many(RecordKind::Trending, &json!([{ "title": "A", "plays": 3 }]));

		let first = manager
			.trending("wasm-trending", &songs, &TrendingOptions::default())
			.unwrap();
		let second = manager
			.trending("wasm-trending", &songs, &TrendingOptions::default())
			.unwrap();

		assert!(!first.is_live());
		assert!(second.is_live());
		assert_eq!(host.child_element_count(), 1);
		let canvas: HtmlCanvasElement = host.first_element_child().unwrap().dyn_into().unwrap();
		assert_eq!(canvas.id(), "trendingChart");
		manager.destroy_all();
	}

	#[wasm_bindgen_test]
	fn missing_container_renders_nothing() {
		let mut manager = VisualizationManager::new(DomMounts::from_window().unwrap());
		assert!(manager.friend_network("wasm-absent", &json!({})).is_none());
		assert!(manager.registry().is_empty());
	}
}
