//! Connectors and labels layered over the network scatter chart.

use std::f64::consts::PI;

use log::trace;

use super::chart::{ChartFrame, PointDataset, PointSlot};
use super::palette::{self, Rgba};
use super::surface::{Painter, TextAlign};
use super::types::{DEFAULT_CENTER_LABEL, Node, NodeCategory, SeriesPoint};

/// Labels longer than this are shortened.
pub const LABEL_MAX_CHARS: usize = 8;
/// Characters kept from a shortened label.
pub const LABEL_PREFIX_CHARS: usize = 6;
pub const ELLIPSIS: &str = "...";
pub const CONNECTOR_WIDTH: f64 = 2.0;
/// Share of a node's radius covered by its label disc.
pub const LABEL_DISC_SCALE: f64 = 0.7;
const LABEL_DISC: &str = "rgba(255, 255, 255, 0.9)";
const LABEL_FONT: &str = "bold 10px Arial";
const DEFAULT_LABEL: &str = DEFAULT_CENTER_LABEL;

/// Point radius of a node; center > highlighted > tier1 > tier2.
pub fn emphasis_radius(category: NodeCategory) -> f64 {
	match category {
		NodeCategory::Center => 20.0,
		NodeCategory::Highlighted => 18.0,
		NodeCategory::Tier1 => 15.0,
		NodeCategory::Tier2 => 12.0,
	}
}

/// Dot fill of each category's dataset.
pub fn node_color(category: NodeCategory) -> Rgba {
	match category {
		NodeCategory::Center => palette::PRIMARY,
		NodeCategory::Tier1 => palette::SUCCESS,
		NodeCategory::Tier2 => palette::WARNING,
		NodeCategory::Highlighted => palette::DANGER,
	}
}

/// Connector color of a category. Only ring and highlighted members get a
/// tinted connector; anything else is neutral.
pub fn connector_color(category: NodeCategory) -> Rgba {
	match category {
		NodeCategory::Tier1 => palette::SUCCESS.with_alpha(0.4),
		NodeCategory::Tier2 => palette::WARNING.with_alpha(0.4),
		NodeCategory::Highlighted => palette::DANGER.with_alpha(0.4),
		NodeCategory::Center => palette::NEUTRAL.with_alpha(0.3),
	}
}

/// Shortens labels beyond [`LABEL_MAX_CHARS`] to a prefix plus ellipsis.
pub fn truncate_label(label: &str) -> String {
	if label.chars().count() > LABEL_MAX_CHARS {
		let prefix: String = label.chars().take(LABEL_PREFIX_CHARS).collect();
		format!("{prefix}{ELLIPSIS}")
	} else {
		label.to_owned()
	}
}

/// A laid-out node and where the chart plotted it.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
	pub node: Node,
	pub slot: PointSlot,
}

/// Paint hook drawing center-to-node connectors and node labels.
#[derive(Clone, Debug, Default)]
pub struct NetworkOverlay {
	nodes: Vec<PlacedNode>,
}

impl NetworkOverlay {
	pub fn new(nodes: Vec<PlacedNode>) -> Self {
		Self { nodes }
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &[PlacedNode] {
		&self.nodes
	}

	pub fn draw(&self, frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
		self.draw_connectors(frame, ctx);
		self.draw_labels(frame, ctx);
	}

	fn resolve(&self, frame: &ChartFrame<'_>, placed: &PlacedNode) -> Option<(f64, f64)> {
		let pixel = frame.pixel(placed.slot);
		if pixel.is_none() {
			trace!("no position for node `{}`; skipped", placed.node.id);
		}
		pixel
	}

	fn draw_connectors(&self, frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
		let Some(center) = self
			.nodes
			.iter()
			.find(|p| p.node.category == NodeCategory::Center)
			.and_then(|p| self.resolve(frame, p))
		else {
			return;
		};

		for placed in &self.nodes {
			if placed.node.category == NodeCategory::Center {
				continue;
			}
			let Some((x, y)) = self.resolve(frame, placed) else {
				continue;
			};
			ctx.save();
			ctx.set_stroke_style(&connector_color(placed.node.category).css());
			ctx.set_line_width(CONNECTOR_WIDTH);
			ctx.begin_path();
			ctx.move_to(center.0, center.1);
			ctx.line_to(x, y);
			ctx.stroke();
			ctx.restore();
		}
	}

	fn draw_labels(&self, frame: &ChartFrame<'_>, ctx: &mut dyn Painter) {
		for placed in &self.nodes {
			let Some((x, y)) = self.resolve(frame, placed) else {
				continue;
			};
			let node = &placed.node;
			let text = if node.label.is_empty() {
				if node.id.is_empty() { DEFAULT_LABEL } else { node.id.as_str() }
			} else {
				node.label.as_str()
			};
			let radius = emphasis_radius(node.category) * LABEL_DISC_SCALE;

			ctx.save();
			ctx.set_fill_style(LABEL_DISC);
			ctx.begin_path();
			ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.fill();
			ctx.restore();

			ctx.save();
			ctx.set_fill_style(palette::TEXT);
			ctx.set_font(LABEL_FONT);
			ctx.set_text_align(TextAlign::Center);
			ctx.fill_text(&truncate_label(text), x, y);
			ctx.restore();
		}
	}
}

/// Splits nodes into one scatter dataset per category (center, tier1,
/// tier2, highlighted; empty categories omitted) and records the slot each
/// node was plotted at.
pub fn plot_network(nodes: Vec<Node>) -> (Vec<PointDataset>, NetworkOverlay) {
	let mut datasets = Vec::new();
	let mut placed = Vec::with_capacity(nodes.len());
	for category in NodeCategory::ALL {
		let members: Vec<&Node> = nodes.iter().filter(|n| n.category == category).collect();
		if members.is_empty() {
			continue;
		}
		let dataset = datasets.len();
		let points = members
			.iter()
			.map(|n| SeriesPoint::new(n.position.0, n.position.1).with_metadata(n.tooltip()))
			.collect();
		for (index, node) in members.into_iter().enumerate() {
			placed.push(PlacedNode {
				node: node.clone(),
				slot: PointSlot::new(dataset, index),
			});
		}
		let color = node_color(category);
		datasets.push(
			PointDataset::new(category.legend_label(), points, color)
				.border(color)
				.radius(emphasis_radius(category)),
		);
	}
	(datasets, NetworkOverlay::new(placed))
}
