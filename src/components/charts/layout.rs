use std::f64::consts::PI;

use serde::Deserialize;

use super::types::{GraphMember, Node, NodeCategory, RelationshipGraph};

/// Geometry of the relationship network, in plane units.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	pub tier1_radius: f64,
	pub tier2_radius: f64,
	/// Fixed position of the highlighted member relative to the center.
	pub highlight_offset: (f64, f64),
	/// The plane spans `[-extent, extent]` on both axes.
	pub extent: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			tier1_radius: 30.0,
			tier2_radius: 50.0,
			highlight_offset: (0.0, -40.0),
			extent: 60.0,
		}
	}
}

/// Angle of node `i` on a ring of `n` nodes.
pub fn ring_angle(i: usize, n: usize) -> f64 {
	(i as f64) * 2.0 * PI / n.max(1) as f64
}

fn ring(members: &[GraphMember], radius: f64, category: NodeCategory) -> impl Iterator<Item = Node> + '_ {
	let n = members.len();
	members.iter().enumerate().map(move |(i, member)| {
		let angle = ring_angle(i, n);
		node(member, (radius * angle.cos(), radius * angle.sin()), category)
	})
}

fn node(member: &GraphMember, position: (f64, f64), category: NodeCategory) -> Node {
	Node {
		position,
		label: member.label.clone(),
		category,
		id: member.id.clone(),
		metric: member.metric,
	}
}

/// Places the center at the origin, each tier on its own ring with uniform
/// spacing starting at angle 0, and the highlighted member at the fixed
/// offset. Output order: center, tier1, tier2, highlighted.
///
/// A highlighted member that also sits on a ring keeps its ring node; the
/// extra node only adds emphasis.
pub fn layout(graph: &RelationshipGraph, config: &LayoutConfig) -> Vec<Node> {
	let mut nodes = Vec::with_capacity(1 + graph.tier1.len() + graph.tier2.len() + 1);
	nodes.push(node(&graph.center, (0.0, 0.0), NodeCategory::Center));
	nodes.extend(ring(&graph.tier1, config.tier1_radius, NodeCategory::Tier1));
	nodes.extend(ring(&graph.tier2, config.tier2_radius, NodeCategory::Tier2));
	if let Some(member) = &graph.highlighted {
		nodes.push(node(member, config.highlight_offset, NodeCategory::Highlighted));
	}
	nodes
}

#[cfg(test)]
mod tests {
	use super::*;

	fn members(ids: &[&str]) -> Vec<GraphMember> {
		ids.iter().map(|id| GraphMember::new(*id, *id)).collect()
	}

	fn graph() -> RelationshipGraph {
		RelationshipGraph {
			center: GraphMember::new("U", "U"),
			tier1: members(&["A", "B", "C"]),
			tier2: members(&["D"]),
			highlighted: Some(GraphMember::new("D", "D")),
		}
	}

	fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
		assert!(
			(actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
			"{actual:?} != {expected:?}"
		);
	}

	#[test]
	fn places_rings_and_highlight() {
		let nodes = layout(&graph(), &LayoutConfig::default());
		let ids: Vec<_> = nodes.iter().map(|n| (n.id.as_str(), n.category)).collect();
		assert_eq!(
			ids,
			[
				("U", NodeCategory::Center),
				("A", NodeCategory::Tier1),
				("B", NodeCategory::Tier1),
				("C", NodeCategory::Tier1),
				("D", NodeCategory::Tier2),
				("D", NodeCategory::Highlighted),
			]
		);

		assert_close(nodes[0].position, (0.0, 0.0));
		let third = 2.0 * PI / 3.0;
		assert_close(nodes[1].position, (30.0, 0.0));
		assert_close(nodes[2].position, (30.0 * third.cos(), 30.0 * third.sin()));
		assert_close(nodes[3].position, (30.0 * (2.0 * third).cos(), 30.0 * (2.0 * third).sin()));
		assert_close(nodes[4].position, (50.0, 0.0));
		assert_close(nodes[5].position, (0.0, -40.0));

		for node in &nodes[1..4] {
			let (x, y) = node.position;
			assert!(((x * x + y * y).sqrt() - 30.0).abs() < 1e-9);
		}
	}

	#[test]
	fn angular_spacing_is_uniform() {
		for n in 1..12 {
			for i in 1..n {
				let step = ring_angle(i, n) - ring_angle(i - 1, n);
				assert!((step - 2.0 * PI / n as f64).abs() < 1e-12);
			}
		}
	}

	#[test]
	fn layout_is_deterministic() {
		let config = LayoutConfig::default();
		assert_eq!(layout(&graph(), &config), layout(&graph(), &config));
	}

	#[test]
	fn empty_tiers_emit_nothing() {
		let graph = RelationshipGraph::new(GraphMember::new("U", "U"));
		let nodes = layout(&graph, &LayoutConfig::default());
		assert_eq!(nodes.len(), 1);
		assert_eq!(nodes[0].category, NodeCategory::Center);
		assert_eq!(ring_angle(0, 0), 0.0);
	}

	#[test]
	fn config_reads_partial_json() {
		let config: LayoutConfig = serde_json::from_str(r#"{ "tier2Radius": 55 }"#).unwrap();
		assert_eq!(config.tier2_radius, 55.0);
		assert_eq!(config.tier1_radius, 30.0);
		assert_eq!(config.highlight_offset, (0.0, -40.0));
	}
}
