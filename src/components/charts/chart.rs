use std::f64::consts::PI;

use super::palette::Rgba;
use super::render;
use super::scale::{LinearScale, Rect, nice_max, padded_extent};
use super::surface::{Painter, Surface};
use super::types::{Series, SeriesPoint};

pub const TITLE_FONT_SIZE: f64 = 16.0;
pub const LEGEND_FONT_SIZE: f64 = 12.0;
pub const TICK_FONT_SIZE: f64 = 11.0;
const LEGEND_ROW: f64 = 24.0;
const LEGEND_COLUMN: f64 = 150.0;
const AXIS_GUTTER: f64 = 48.0;
const CATEGORY_GUTTER: f64 = 110.0;
const AXIS_FOOTER: f64 = 28.0;
const HIT_SLACK: f64 = 4.0;
const BAR_FILL: f64 = 0.7;
const DOUGHNUT_CUTOUT: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendPosition {
	#[default]
	Top,
	Bottom,
	Right,
}

/// Options shared by every chart kind. `Default` is the common base every
/// chart starts from.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
	pub title: Option<String>,
	pub legend: LegendPosition,
	/// Bars grow along x, categories run down the y axis.
	pub horizontal: bool,
	pub x_bounds: Option<(f64, f64)>,
	pub y_bounds: Option<(f64, f64)>,
	pub show_axes: bool,
	pub padding: f64,
	pub font_family: String,
}

impl Default for ChartOptions {
	fn default() -> Self {
		Self {
			title: None,
			legend: LegendPosition::Top,
			horizontal: false,
			x_bounds: None,
			y_bounds: None,
			show_axes: true,
			padding: 12.0,
			font_family: "Arial, sans-serif".into(),
		}
	}
}

impl ChartOptions {
	pub fn titled(title: impl Into<String>) -> Self {
		Self {
			title: Some(title.into()),
			..Self::default()
		}
	}

	pub fn legend(mut self, legend: LegendPosition) -> Self {
		self.legend = legend;
		self
	}

	pub fn horizontal(mut self) -> Self {
		self.horizontal = true;
		self
	}

	pub fn bounds(mut self, x: (f64, f64), y: (f64, f64)) -> Self {
		self.x_bounds = Some(x);
		self.y_bounds = Some(y);
		self
	}

	pub fn hide_axes(mut self) -> Self {
		self.show_axes = false;
		self
	}

	pub fn font(&self, size: f64, bold: bool) -> String {
		let weight = if bold { "bold " } else { "" };
		format!("{weight}{size}px {}", self.font_family)
	}
}

/// A dataset of x/y points, drawn as dots (scatter) or a polyline (line).
#[derive(Clone, Debug, PartialEq)]
pub struct PointDataset {
	pub label: String,
	pub points: Vec<SeriesPoint>,
	pub color: Rgba,
	pub border: Rgba,
	pub point_radius: f64,
	/// Shade the area under a line.
	pub fill: bool,
}

impl PointDataset {
	pub fn new(label: impl Into<String>, points: Vec<SeriesPoint>, color: Rgba) -> Self {
		Self {
			label: label.into(),
			points,
			color,
			border: color,
			point_radius: 5.0,
			fill: false,
		}
	}

	pub fn border(mut self, border: Rgba) -> Self {
		self.border = border;
		self
	}

	pub fn radius(mut self, radius: f64) -> Self {
		self.point_radius = radius;
		self
	}

	pub fn filled(mut self) -> Self {
		self.fill = true;
		self
	}
}

/// What to draw. Categorical lines carry their x labels; numeric lines
/// leave `labels` empty.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartSpec {
	Bar {
		dataset_label: String,
		series: Series,
		colors: Vec<Rgba>,
	},
	Line {
		labels: Vec<String>,
		datasets: Vec<PointDataset>,
	},
	Scatter {
		datasets: Vec<PointDataset>,
	},
	Doughnut {
		series: Series,
		colors: Vec<Rgba>,
	},
}

impl ChartSpec {
	/// A categorical line over `series`, one point per label.
	pub fn line(dataset_label: impl Into<String>, series: &Series, color: Rgba) -> Self {
		let points = series
			.values()
			.iter()
			.enumerate()
			.map(|(i, v)| SeriesPoint::new(i as f64, *v))
			.collect();
		ChartSpec::Line {
			labels: series.labels().to_vec(),
			datasets: vec![PointDataset::new(dataset_label, points, color).border(color)],
		}
	}

	fn point_datasets(&self) -> &[PointDataset] {
		match self {
			ChartSpec::Line { datasets, .. } | ChartSpec::Scatter { datasets } => datasets,
			_ => &[],
		}
	}
}

/// Address of one point: dataset index, then point index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointSlot {
	pub dataset: usize,
	pub index: usize,
}

impl PointSlot {
	pub fn new(dataset: usize, index: usize) -> Self {
		Self { dataset, index }
	}
}

/// One legend swatch.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
	pub label: String,
	pub color: Rgba,
}

/// Resolved geometry of one paint pass: areas, scales and the
/// data-to-pixel mapping hooks draw against.
pub struct ChartFrame<'a> {
	spec: &'a ChartSpec,
	options: &'a ChartOptions,
	pub width: f64,
	pub height: f64,
	pub plot: Rect,
	pub title_area: Option<Rect>,
	pub legend_area: Option<Rect>,
	pub x: Option<LinearScale>,
	pub y: Option<LinearScale>,
}

impl<'a> ChartFrame<'a> {
	pub fn new(spec: &'a ChartSpec, options: &'a ChartOptions, width: f64, height: f64) -> Self {
		let outer = Rect::new(0.0, 0.0, width, height).inset(options.padding);
		let mut body = outer;

		let title_area = options.title.as_ref().map(|_| {
			let h = TITLE_FONT_SIZE + options.padding;
			let area = Rect::new(body.left, body.top, body.width, h);
			body = Rect::new(body.left, body.top + h, body.width, body.height - h);
			area
		});

		let legend_area = match options.legend {
			_ if legend_items(spec).is_empty() => None,
			LegendPosition::Top => {
				let area = Rect::new(body.left, body.top, body.width, LEGEND_ROW);
				body = Rect::new(body.left, body.top + LEGEND_ROW, body.width, body.height - LEGEND_ROW);
				Some(area)
			}
			LegendPosition::Bottom => {
				let area = Rect::new(body.left, body.bottom() - LEGEND_ROW, body.width, LEGEND_ROW);
				body = Rect::new(body.left, body.top, body.width, body.height - LEGEND_ROW);
				Some(area)
			}
			LegendPosition::Right => {
				let area = Rect::new(body.right() - LEGEND_COLUMN, body.top, LEGEND_COLUMN, body.height);
				body = Rect::new(body.left, body.top, body.width - LEGEND_COLUMN, body.height);
				Some(area)
			}
		};

		let has_axes = options.show_axes && !matches!(spec, ChartSpec::Doughnut { .. });
		let plot = if has_axes {
			let gutter = match spec {
				ChartSpec::Bar { .. } if options.horizontal => CATEGORY_GUTTER,
				_ => AXIS_GUTTER,
			};
			Rect::new(
				body.left + gutter,
				body.top,
				body.width - gutter,
				body.height - AXIS_FOOTER,
			)
		} else {
			body
		};

		let (x, y) = scales(spec, options, &plot);
		Self {
			spec,
			options,
			width,
			height,
			plot,
			title_area,
			legend_area,
			x,
			y,
		}
	}

	pub fn spec(&self) -> &ChartSpec {
		self.spec
	}

	pub fn options(&self) -> &ChartOptions {
		self.options
	}

	pub fn legend_items(&self) -> Vec<LegendItem> {
		legend_items(self.spec)
	}

	/// On-screen position of a point, or `None` when the slot does not
	/// exist in this chart.
	pub fn pixel(&self, slot: PointSlot) -> Option<(f64, f64)> {
		let point = self.spec.point_datasets().get(slot.dataset)?.points.get(slot.index)?;
		let (x, y) = (self.x?, self.y?);
		Some((x.pixel(point.x), y.pixel(point.y)))
	}

	/// Rectangle of bar `i`.
	pub fn bar_rect(&self, i: usize) -> Option<Rect> {
		let ChartSpec::Bar { series, .. } = self.spec else {
			return None;
		};
		let value = *series.values().get(i)?;
		let n = series.len() as f64;
		if self.options.horizontal {
			let x = self.x?;
			let band = self.plot.height / n;
			let (a, b) = (x.pixel(0.0), x.pixel(value));
			Some(Rect::new(
				a.min(b),
				self.plot.top + band * i as f64 + band * (1.0 - BAR_FILL) / 2.0,
				(b - a).abs(),
				band * BAR_FILL,
			))
		} else {
			let y = self.y?;
			let band = self.plot.width / n;
			let (a, b) = (y.pixel(0.0), y.pixel(value));
			Some(Rect::new(
				self.plot.left + band * i as f64 + band * (1.0 - BAR_FILL) / 2.0,
				a.min(b),
				band * BAR_FILL,
				(b - a).abs(),
			))
		}
	}

	/// Center, outer and inner radius of the doughnut ring.
	pub fn ring(&self) -> (f64, f64, f64, f64) {
		let (cx, cy) = self.plot.center();
		let outer = (self.plot.width.min(self.plot.height) / 2.0 * 0.9).max(0.0);
		(cx, cy, outer, outer * DOUGHNUT_CUTOUT)
	}

	/// Start and end angle of every doughnut sector, clockwise from 12
	/// o'clock. Empty when the values sum to zero.
	pub fn sectors(&self) -> Vec<(f64, f64)> {
		let ChartSpec::Doughnut { series, .. } = self.spec else {
			return Vec::new();
		};
		let total: f64 = series.values().iter().filter(|v| **v > 0.0).sum();
		if total <= 0.0 {
			return Vec::new();
		}
		let mut start = -PI / 2.0;
		series
			.values()
			.iter()
			.map(|v| {
				let end = start + v.max(0.0) / total * 2.0 * PI;
				let sector = (start, end);
				start = end;
				sector
			})
			.collect()
	}

	/// Text shown when hovering `(x, y)`, if anything is under it.
	pub fn tooltip_at(&self, x: f64, y: f64) -> Option<String> {
		match self.spec {
			ChartSpec::Bar {
				dataset_label,
				series,
				..
			} => (0..series.len())
				.find(|&i| self.bar_rect(i).is_some_and(|r| r.contains(x, y)))
				.map(|i| format!("{}: {}", dataset_label, series.values()[i])),
			ChartSpec::Doughnut { series, .. } => {
				let (cx, cy, outer, inner) = self.ring();
				let (dx, dy) = (x - cx, y - cy);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist < inner || dist > outer {
					return None;
				}
				// Angles from atan2 lie in (-PI, PI]; sectors start at -PI/2.
				let mut angle = dy.atan2(dx);
				if angle < -PI / 2.0 {
					angle += 2.0 * PI;
				}
				let i = self.sectors().iter().position(|(s, e)| angle >= *s && angle < *e)?;
				let (label, value) = series.iter().nth(i)?;
				Some(format!("{label}: {value}"))
			}
			ChartSpec::Line { .. } | ChartSpec::Scatter { .. } => {
				let mut best: Option<(f64, String)> = None;
				for (d, dataset) in self.spec.point_datasets().iter().enumerate() {
					for (i, point) in dataset.points.iter().enumerate() {
						let Some((px, py)) = self.pixel(PointSlot::new(d, i)) else {
							continue;
						};
						let dist = ((px - x).powi(2) + (py - y).powi(2)).sqrt();
						if dist > dataset.point_radius + HIT_SLACK {
							continue;
						}
						if best.as_ref().is_none_or(|(b, _)| dist <= *b) {
							let text = point
								.metadata
								.clone()
								.unwrap_or_else(|| format!("{}: {}", dataset.label, point.y));
							best = Some((dist, text));
						}
					}
				}
				best.map(|(_, text)| text)
			}
		}
	}
}

fn legend_items(spec: &ChartSpec) -> Vec<LegendItem> {
	match spec {
		ChartSpec::Bar {
			dataset_label,
			colors,
			..
		} => vec![LegendItem {
			label: dataset_label.clone(),
			color: colors.first().copied().unwrap_or(super::palette::PRIMARY),
		}],
		ChartSpec::Line { datasets, .. } | ChartSpec::Scatter { datasets } => datasets
			.iter()
			.map(|d| LegendItem {
				label: d.label.clone(),
				color: d.color,
			})
			.collect(),
		ChartSpec::Doughnut { series, colors } => series
			.labels()
			.iter()
			.enumerate()
			.map(|(i, label)| LegendItem {
				label: label.clone(),
				color: colors.get(i).copied().unwrap_or(super::palette::NEUTRAL),
			})
			.collect(),
	}
}

fn scales(spec: &ChartSpec, options: &ChartOptions, plot: &Rect) -> (Option<LinearScale>, Option<LinearScale>) {
	match spec {
		ChartSpec::Bar { series, .. } => {
			let max = series.values().iter().copied().fold(0.0, f64::max);
			let min = series.values().iter().copied().fold(0.0, f64::min);
			let lo = if min < 0.0 { -nice_max(-min) } else { 0.0 };
			let hi = nice_max(max);
			if options.horizontal {
				(Some(LinearScale::horizontal(lo, hi, plot)), None)
			} else {
				(None, Some(LinearScale::vertical(lo, hi, plot)))
			}
		}
		ChartSpec::Line { labels, datasets } => {
			let points = || datasets.iter().flat_map(|d| d.points.iter());
			let (x_lo, x_hi) = options.x_bounds.unwrap_or_else(|| {
				if labels.is_empty() {
					let lo = points().map(|p| p.x).fold(f64::INFINITY, f64::min);
					let hi = points().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
					if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) }
				} else {
					(0.0, labels.len().saturating_sub(1) as f64)
				}
			});
			let (y_lo, y_hi) = options.y_bounds.unwrap_or_else(|| {
				let max = points().map(|p| p.y).fold(0.0, f64::max);
				let min = points().map(|p| p.y).fold(0.0, f64::min);
				(min, nice_max(max))
			});
			(
				Some(LinearScale::horizontal(x_lo, x_hi, plot)),
				Some(LinearScale::vertical(y_lo, y_hi, plot)),
			)
		}
		ChartSpec::Scatter { datasets } => {
			let points = || datasets.iter().flat_map(|d| d.points.iter());
			let (x_lo, x_hi) = options
				.x_bounds
				.or_else(|| padded_extent(points().map(|p| p.x), 0.1))
				.unwrap_or((-1.0, 1.0));
			let (y_lo, y_hi) = options
				.y_bounds
				.or_else(|| padded_extent(points().map(|p| p.y), 0.1))
				.unwrap_or((-1.0, 1.0));
			(
				Some(LinearScale::horizontal(x_lo, x_hi, plot)),
				Some(LinearScale::vertical(y_lo, y_hi, plot)),
			)
		}
		ChartSpec::Doughnut { .. } => (None, None),
	}
}

/// Draws on top of the finished chart, once per paint.
pub type PaintHook = Box<dyn Fn(&ChartFrame<'_>, &mut dyn Painter)>;

/// A live chart: its surface, what it draws and the hooks layered on top.
pub struct Chart {
	surface: Surface,
	spec: ChartSpec,
	options: ChartOptions,
	hooks: Vec<PaintHook>,
}

impl Chart {
	pub fn new(surface: Surface, spec: ChartSpec, options: ChartOptions) -> Self {
		Self {
			surface,
			spec,
			options,
			hooks: Vec::new(),
		}
	}

	pub fn with_hook(mut self, hook: impl Fn(&ChartFrame<'_>, &mut dyn Painter) + 'static) -> Self {
		self.hooks.push(Box::new(hook));
		self
	}

	pub fn chart_id(&self) -> &str {
		self.surface.chart_id()
	}

	#[cfg(test)]
	pub fn spec(&self) -> &ChartSpec {
		&self.spec
	}

	#[cfg(test)]
	pub fn options(&self) -> &ChartOptions {
		&self.options
	}

	pub fn frame(&self) -> ChartFrame<'_> {
		let (width, height) = self.surface.size();
		ChartFrame::new(&self.spec, &self.options, width, height)
	}

	/// Draws the chart, then runs every hook against the same frame.
	pub fn paint(&mut self) {
		let Chart {
			surface,
			spec,
			options,
			hooks,
		} = self;
		let (width, height) = surface.size();
		let frame = ChartFrame::new(spec, options, width, height);
		let painter = surface.painter();
		render::paint(&frame, painter);
		for hook in hooks.iter() {
			painter.save();
			hook(&frame, &mut *painter);
			painter.restore();
		}
	}

	pub fn tooltip_at(&self, x: f64, y: f64) -> Option<String> {
		self.frame().tooltip_at(x, y)
	}

	/// Blanks the surface and drops every hook.
	pub(crate) fn teardown(mut self) {
		self.hooks.clear();
		let (width, height) = self.surface.size();
		self.surface.painter().clear(width, height);
	}
}

impl std::fmt::Debug for Chart {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Chart")
			.field("surface", &self.surface)
			.field("spec", &self.spec)
			.field("hooks", &self.hooks.len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;
	use crate::components::charts::palette;
	use crate::components::charts::testing::{DrawOp, RecordingPainter};

	fn surface(painter: &RecordingPainter) -> Surface {
		Surface::new("chart", 400.0, 300.0, Box::new(painter.clone()))
	}

	fn scatter() -> ChartSpec {
		ChartSpec::Scatter {
			datasets: vec![
				PointDataset::new("center", vec![SeriesPoint::new(0.0, 0.0)], palette::PRIMARY).radius(20.0),
				PointDataset::new(
					"ring",
					vec![SeriesPoint::new(30.0, 0.0).with_metadata("A (Weight: 0.500)")],
					palette::SUCCESS,
				)
				.radius(15.0),
			],
		}
	}

	#[test]
	fn pixel_resolves_known_slots_only() {
		let spec = scatter();
		let options = ChartOptions::default().bounds((-60.0, 60.0), (-60.0, 60.0)).hide_axes();
		let frame = ChartFrame::new(&spec, &options, 400.0, 300.0);
		let (cx, cy) = frame.pixel(PointSlot::new(0, 0)).unwrap();
		assert_eq!((cx, cy), frame.plot.center());
		let (ax, ay) = frame.pixel(PointSlot::new(1, 0)).unwrap();
		assert!(ax > cx);
		assert_eq!(ay, cy);
		assert_eq!(frame.pixel(PointSlot::new(1, 1)), None);
		assert_eq!(frame.pixel(PointSlot::new(5, 0)), None);
	}

	#[test]
	fn scatter_tooltip_prefers_metadata() {
		let spec = scatter();
		let options = ChartOptions::default().bounds((-60.0, 60.0), (-60.0, 60.0)).hide_axes();
		let frame = ChartFrame::new(&spec, &options, 400.0, 300.0);
		let (ax, ay) = frame.pixel(PointSlot::new(1, 0)).unwrap();
		assert_eq!(frame.tooltip_at(ax + 2.0, ay).as_deref(), Some("A (Weight: 0.500)"));
		let (cx, cy) = frame.pixel(PointSlot::new(0, 0)).unwrap();
		assert_eq!(frame.tooltip_at(cx, cy).as_deref(), Some("center: 0"));
		assert_eq!(frame.tooltip_at(1.0, 1.0), None);
	}

	#[test]
	fn bars_hit_test_and_grow_from_zero() {
		let series: Series = [("a", 4.0), ("b", 8.0)].into_iter().collect();
		let spec = ChartSpec::Bar {
			dataset_label: "Plays".into(),
			colors: palette::palette(series.len()),
			series,
		};
		let options = ChartOptions::titled("Top").horizontal();
		let frame = ChartFrame::new(&spec, &options, 400.0, 300.0);
		let a = frame.bar_rect(0).unwrap();
		let b = frame.bar_rect(1).unwrap();
		assert_eq!(a.left, b.left);
		assert!(b.width > a.width);
		assert!(b.top > a.top);
		let (x, y) = b.center();
		assert_eq!(frame.tooltip_at(x, y).as_deref(), Some("Plays: 8"));
		assert_eq!(frame.bar_rect(2), None);
	}

	#[test]
	fn doughnut_sectors_cover_the_circle() {
		let series: Series = [("Drama", 1.0), ("Comedy", 3.0)].into_iter().collect();
		let spec = ChartSpec::Doughnut {
			colors: palette::palette(2),
			series,
		};
		let options = ChartOptions::default().legend(LegendPosition::Right);
		let frame = ChartFrame::new(&spec, &options, 400.0, 300.0);
		let sectors = frame.sectors();
		assert_eq!(sectors.len(), 2);
		assert!((sectors[1].1 - sectors[0].0 - 2.0 * PI).abs() < 1e-9);

		// Right of center sits inside the larger "Comedy" sector.
		let (cx, cy, outer, inner) = frame.ring();
		let r = (outer + inner) / 2.0;
		assert_eq!(frame.tooltip_at(cx + r, cy).as_deref(), Some("Comedy: 3"));
		assert_eq!(frame.tooltip_at(cx, cy), None);
	}

	#[test]
	fn zero_total_doughnut_has_no_sectors() {
		let series: Series = [("a", 0.0)].into_iter().collect();
		let spec = ChartSpec::Doughnut {
			colors: palette::palette(1),
			series,
		};
		let options = ChartOptions::default();
		assert!(ChartFrame::new(&spec, &options, 200.0, 200.0).sectors().is_empty());
	}

	#[test]
	fn hooks_run_after_base_paint() {
		let painter = RecordingPainter::default();
		let calls = Rc::new(Cell::new(0));
		let seen = calls.clone();
		let mut chart = Chart::new(surface(&painter), scatter(), ChartOptions::default()).with_hook(
			move |_, p| {
				seen.set(seen.get() + 1);
				p.fill_text("hook", 0.0, 0.0);
			},
		);
		chart.paint();
		chart.paint();
		assert_eq!(calls.get(), 2);
		let ops = painter.ops();
		assert!(matches!(ops.first(), Some(DrawOp::Clear { .. })));
		let last_text = ops.iter().rev().find_map(|op| match op {
			DrawOp::Text { text, .. } => Some(text.as_str()),
			_ => None,
		});
		assert_eq!(last_text, Some("hook"));
	}

	#[test]
	fn teardown_blanks_the_surface() {
		let painter = RecordingPainter::default();
		let chart = Chart::new(surface(&painter), scatter(), ChartOptions::default());
		chart.teardown();
		assert_eq!(painter.ops(), [DrawOp::Clear { width: 400.0, height: 300.0 }]);
	}
}
