use std::f64::consts::PI;

use super::chart::{ChartFrame, ChartSpec, LEGEND_FONT_SIZE, PointDataset, PointSlot, TICK_FONT_SIZE, TITLE_FONT_SIZE};
use super::palette::{self, Rgba};
use super::scale::LinearScale;
use super::surface::{Painter, TextAlign};

const SWATCH: f64 = 12.0;
const TICKS: usize = 5;
const LINE_WIDTH: f64 = 2.0;
/// Rough glyph advance as a share of the font size; canvases without text
/// metrics still get a usable legend layout.
const GLYPH_WIDTH: f64 = 0.6;

pub fn paint(frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
	ctx.clear(frame.width, frame.height);
	ctx.set_fill_style(palette::BACKGROUND);
	ctx.fill_rect(0.0, 0.0, frame.width, frame.height);
	draw_title(frame, ctx);
	draw_legend(frame, ctx);

	match frame.spec() {
		ChartSpec::Bar { series, colors, .. } => {
			draw_value_axis(frame, ctx);
			draw_categories(frame, ctx, series.labels());
			for i in 0..series.len() {
				let Some(rect) = frame.bar_rect(i) else {
					continue;
				};
				let color = colors.get(i).copied().unwrap_or(palette::color(i));
				ctx.set_fill_style(&color.css());
				ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
			}
		}
		ChartSpec::Line { labels, datasets } => {
			draw_value_axis(frame, ctx);
			draw_categories(frame, ctx, labels);
			for (d, dataset) in datasets.iter().enumerate() {
				draw_line(frame, ctx, d, dataset);
				draw_points(frame, ctx, d, dataset);
			}
		}
		ChartSpec::Scatter { datasets } => {
			draw_value_axis(frame, ctx);
			for (d, dataset) in datasets.iter().enumerate() {
				draw_points(frame, ctx, d, dataset);
			}
		}
		ChartSpec::Doughnut { colors, .. } => draw_doughnut(frame, ctx, colors),
	}
}

fn text_width(text: &str, font_size: f64) -> f64 {
	text.chars().count() as f64 * font_size * GLYPH_WIDTH
}

fn draw_title(frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
	let (Some(area), Some(title)) = (frame.title_area, frame.options().title.as_deref()) else {
		return;
	};
	let (x, y) = area.center();
	ctx.set_fill_style(palette::TEXT);
	ctx.set_font(&frame.options().font(TITLE_FONT_SIZE, true));
	ctx.set_text_align(TextAlign::Center);
	ctx.fill_text(title, x, y);
}

fn draw_legend(frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
	let Some(area) = frame.legend_area else {
		return;
	};
	let items = frame.legend_items();
	ctx.set_font(&frame.options().font(LEGEND_FONT_SIZE, false));
	ctx.set_text_align(TextAlign::Left);

	// Rows for top/bottom legends are centered; a right legend stacks.
	let stacked = area.height > area.width;
	let widths: Vec<f64> = items
		.iter()
		.map(|item| SWATCH + 6.0 + text_width(&item.label, LEGEND_FONT_SIZE) + 15.0)
		.collect();
	let mut x = if stacked {
		area.left
	} else {
		area.left + (area.width - widths.iter().sum::<f64>()).max(0.0) / 2.0
	};
	let mut y = if stacked { area.top + SWATCH } else { area.center().1 };

	for (item, width) in items.iter().zip(widths) {
		ctx.set_fill_style(&item.color.css());
		ctx.fill_rect(x, y - SWATCH / 2.0, SWATCH, SWATCH);
		ctx.set_fill_style(palette::TEXT);
		ctx.fill_text(&item.label, x + SWATCH + 6.0, y);
		if stacked {
			y += SWATCH + 8.0;
		} else {
			x += width;
		}
	}
}

fn draw_value_axis(frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
	if !frame.options().show_axes {
		return;
	}
	let plot = frame.plot;
	ctx.set_font(&frame.options().font(TICK_FONT_SIZE, false));
	ctx.set_stroke_style(palette::GRID);
	ctx.set_line_width(1.0);
	ctx.set_fill_style(palette::MUTED_TEXT);

	let horizontal_bars = matches!(frame.spec(), ChartSpec::Bar { .. }) && frame.options().horizontal;
	let numeric_x = match frame.spec() {
		ChartSpec::Line { labels, .. } => labels.is_empty(),
		ChartSpec::Scatter { .. } => true,
		_ => horizontal_bars,
	};

	if let Some(y) = frame.y.filter(|_| !horizontal_bars) {
		ctx.set_text_align(TextAlign::Right);
		for tick in y.ticks(TICKS) {
			let py = y.pixel(tick);
			grid_line(ctx, plot.left, py, plot.right(), py);
			ctx.fill_text(&format_tick(tick), plot.left - 6.0, py);
		}
	}
	if let Some(x) = frame.x.filter(|_| numeric_x) {
		ctx.set_text_align(TextAlign::Center);
		for tick in x.ticks(TICKS) {
			let px = x.pixel(tick);
			grid_line(ctx, px, plot.top, px, plot.bottom());
			ctx.fill_text(&format_tick(tick), px, plot.bottom() + 14.0);
		}
	}
}

/// Category labels along the index axis of bar and categorical line charts.
fn draw_categories(frame: &ChartFrame<'_>, ctx: &mut dyn Painter, labels: &[String]) {
	if !frame.options().show_axes || labels.is_empty() {
		return;
	}
	let plot = frame.plot;
	ctx.set_font(&frame.options().font(TICK_FONT_SIZE, false));
	ctx.set_fill_style(palette::MUTED_TEXT);

	match frame.spec() {
		ChartSpec::Bar { .. } if frame.options().horizontal => {
			ctx.set_text_align(TextAlign::Right);
			let band = plot.height / labels.len() as f64;
			for (i, label) in labels.iter().enumerate() {
				ctx.fill_text(label, plot.left - 6.0, plot.top + band * (i as f64 + 0.5));
			}
		}
		ChartSpec::Bar { .. } => {
			ctx.set_text_align(TextAlign::Center);
			let band = plot.width / labels.len() as f64;
			for (i, label) in labels.iter().enumerate() {
				ctx.fill_text(label, plot.left + band * (i as f64 + 0.5), plot.bottom() + 14.0);
			}
		}
		_ => {
			let Some(x) = frame.x else {
				return;
			};
			ctx.set_text_align(TextAlign::Center);
			for (i, label) in labels.iter().enumerate() {
				ctx.fill_text(label, x.pixel(i as f64), plot.bottom() + 14.0);
			}
		}
	}
}

fn grid_line(ctx: &mut dyn Painter, x1: f64, y1: f64, x2: f64, y2: f64) {
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

fn format_tick(value: f64) -> String {
	if value.fract().abs() < 1e-9 {
		format!("{value:.0}")
	} else {
		format!("{value:.1}")
	}
}

fn draw_line(frame: &ChartFrame<'_>, ctx: &mut dyn Painter, d: usize, dataset: &PointDataset) {
	let pixels: Vec<(f64, f64)> = (0..dataset.points.len())
		.filter_map(|i| frame.pixel(PointSlot::new(d, i)))
		.collect();
	let (Some(first), Some(last)) = (pixels.first(), pixels.last()) else {
		return;
	};

	if dataset.fill {
		let base = frame
			.y
			.map(|y: LinearScale| y.pixel(y.min.max(0.0)))
			.unwrap_or(frame.plot.bottom());
		ctx.set_fill_style(&dataset.color.with_alpha(0.2).css());
		ctx.begin_path();
		ctx.move_to(first.0, base);
		for (x, y) in &pixels {
			ctx.line_to(*x, *y);
		}
		ctx.line_to(last.0, base);
		ctx.close_path();
		ctx.fill();
	}

	ctx.set_stroke_style(&dataset.border.css());
	ctx.set_line_width(LINE_WIDTH);
	ctx.begin_path();
	ctx.move_to(first.0, first.1);
	for (x, y) in pixels.iter().skip(1) {
		ctx.line_to(*x, *y);
	}
	ctx.stroke();
}

fn draw_points(frame: &ChartFrame<'_>, ctx: &mut dyn Painter, d: usize, dataset: &PointDataset) {
	ctx.set_fill_style(&dataset.color.css());
	ctx.set_stroke_style(&dataset.border.css());
	ctx.set_line_width(LINE_WIDTH);
	for i in 0..dataset.points.len() {
		let Some((x, y)) = frame.pixel(PointSlot::new(d, i)) else {
			continue;
		};
		ctx.begin_path();
		ctx.arc(x, y, dataset.point_radius, 0.0, 2.0 * PI);
		ctx.fill();
		ctx.stroke();
	}
}

fn draw_doughnut(frame: &ChartFrame<'_>, ctx: &mut dyn Painter, colors: &[Rgba]) {
	let (cx, cy, outer, inner) = frame.ring();
	let sectors = frame.sectors();
	if sectors.is_empty() {
		ctx.set_stroke_style(palette::GRID);
		ctx.set_line_width(LINE_WIDTH);
		ctx.begin_path();
		ctx.arc(cx, cy, outer, 0.0, 2.0 * PI);
		ctx.stroke();
		return;
	}
	ctx.set_stroke_style(palette::BACKGROUND);
	ctx.set_line_width(LINE_WIDTH);
	for (i, (start, end)) in sectors.into_iter().enumerate() {
		if end <= start {
			continue;
		}
		let color = colors.get(i).copied().unwrap_or(palette::color(i));
		ctx.set_fill_style(&color.css());
		ctx.begin_path();
		ctx.move_to(cx + inner * start.cos(), cy + inner * start.sin());
		ctx.arc(cx, cy, outer, start, end);
		ctx.line_to(cx + inner * end.cos(), cy + inner * end.sin());
		ctx.arc_reverse(cx, cy, inner, end, start);
		ctx.close_path();
		ctx.fill();
		ctx.stroke();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::charts::chart::ChartOptions;
	use crate::components::charts::testing::{DrawOp, RecordingPainter};
	use crate::components::charts::types::Series;

	#[test]
	fn bar_chart_fills_one_rect_per_value() {
		let series: Series = [("a", 1.0), ("b", 3.0), ("c", 2.0)].into_iter().collect();
		let spec = ChartSpec::Bar {
			dataset_label: "Plays".into(),
			colors: palette::palette(3),
			series,
		};
		let options = ChartOptions::titled("Top");
		let frame = ChartFrame::new(&spec, &options, 300.0, 200.0);
		let mut painter = RecordingPainter::default();
		paint(&frame, &mut painter);

		let fills: Vec<String> = painter
			.ops()
			.windows(2)
			.filter_map(|w| match w {
				[DrawOp::FillStyle(style), DrawOp::FillRect { .. }] => Some(style.clone()),
				_ => None,
			})
			.collect();
		// background, legend swatch, three bars
		assert_eq!(fills.len(), 5);
		assert_eq!(fills[2..], palette::palette(3).iter().map(Rgba::css).collect::<Vec<_>>());
		assert!(painter.texts().contains(&"Top".to_owned()));
	}

	#[test]
	fn empty_doughnut_draws_outline_only() {
		let spec = ChartSpec::Doughnut {
			series: Series::default(),
			colors: Vec::new(),
		};
		let options = ChartOptions::default();
		let frame = ChartFrame::new(&spec, &options, 200.0, 200.0);
		let mut painter = RecordingPainter::default();
		paint(&frame, &mut painter);
		let arcs = painter.ops().iter().filter(|op| matches!(op, DrawOp::Arc { .. })).count();
		assert_eq!(arcs, 1);
	}

	#[test]
	fn tick_labels() {
		assert_eq!(format_tick(10.0), "10");
		assert_eq!(format_tick(2.5), "2.5");
	}
}
