use serde_json::{Map, Value};

use super::series::KeySpec;

/// The shape a payload entry was fetched as. Resolved once at the data
/// boundary; nothing downstream sniffs fields to guess it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
	Friend,
	Movie,
	Trending,
	PlaylistSong,
	Ranked,
}

/// A JSON-shaped record tagged with its kind. Fields may be partial.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
	kind: RecordKind,
	fields: Map<String, Value>,
}

impl Record {
	pub fn new(kind: RecordKind, fields: Map<String, Value>) -> Self {
		Self { kind, fields }
	}

	/// Wraps an object value; anything else is not a record.
	pub fn from_value(kind: RecordKind, value: &Value) -> Option<Self> {
		value.as_object().map(|fields| Self::new(kind, fields.clone()))
	}

	/// Reads an array payload. Non-array payloads and non-object entries are
	/// dropped rather than reported.
	pub fn many(kind: RecordKind, value: &Value) -> Vec<Self> {
		value
			.as_array()
			.map(|items| {
				items
					.iter()
					.filter_map(|item| Self::from_value(kind, item))
					.collect()
			})
			.unwrap_or_default()
	}

	pub fn kind(&self) -> RecordKind {
		self.kind
	}

	/// Display text for `key`: non-empty strings as-is, numbers formatted.
	/// Empty strings, nulls, booleans and nested values count as absent.
	pub fn text(&self, key: &str) -> Option<String> {
		match self.fields.get(key)? {
			Value::String(s) if !s.is_empty() => Some(s.clone()),
			Value::Number(n) => Some(n.to_string()),
			_ => None,
		}
	}

	/// Numeric value for `key`. Only JSON numbers qualify.
	pub fn number(&self, key: &str) -> Option<f64> {
		self.fields.get(key).and_then(Value::as_f64)
	}
}

/// One member of a relationship graph as delivered by the data source.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphMember {
	pub id: String,
	pub label: String,
	/// Tie weight for direct members, path distance for the others.
	pub metric: Option<f64>,
}

/// Label used when a member carries neither `label`, `name` nor `id`.
pub const UNKNOWN_LABEL: &str = "Unknown";
/// Label of the center node when the payload names no user.
pub const DEFAULT_CENTER_LABEL: &str = "User";

impl GraphMember {
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			metric: None,
		}
	}

	#[cfg(test)]
	pub fn with_metric(mut self, metric: f64) -> Self {
		self.metric = Some(metric);
		self
	}

	/// Label resolves through the record kind's chain (`label` -> `name` ->
	/// `id` for friends), else "Unknown".
	fn from_record(record: &Record, metric_key: &str) -> Self {
		Self {
			id: record.text("id").unwrap_or_default(),
			label: KeySpec::for_kind(record.kind()).resolve_label(record),
			metric: record.number(metric_key),
		}
	}
}

/// Input of the network layout: a center, two rings and an optional member
/// singled out for emphasis. The highlighted member may repeat a ring member.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipGraph {
	pub center: GraphMember,
	pub tier1: Vec<GraphMember>,
	pub tier2: Vec<GraphMember>,
	pub highlighted: Option<GraphMember>,
}

impl RelationshipGraph {
	pub fn new(center: GraphMember) -> Self {
		Self {
			center,
			tier1: Vec::new(),
			tier2: Vec::new(),
			highlighted: None,
		}
	}

	/// Builds the graph from a friend recommendation payload:
	/// `user`, `directRecommendations`, `shortestPathRecommendations`, `closest`.
	pub fn from_friend_payload(payload: &Value) -> Self {
		let user = payload
			.get("user")
			.and_then(Value::as_str)
			.filter(|s| !s.is_empty());
		let center = GraphMember::new(
			user.unwrap_or_default(),
			user.unwrap_or(DEFAULT_CENTER_LABEL),
		);
		let members = |key: &str, metric_key: &str| -> Vec<GraphMember> {
			payload
				.get(key)
				.map(|value| Record::many(RecordKind::Friend, value))
				.unwrap_or_default()
				.iter()
				.map(|record| GraphMember::from_record(record, metric_key))
				.collect()
		};
		let highlighted = payload
			.get("closest")
			.and_then(|value| Record::from_value(RecordKind::Friend, value))
			.map(|record| GraphMember::from_record(&record, "distance"));

		Self {
			center,
			tier1: members("directRecommendations", "weight"),
			tier2: members("shortestPathRecommendations", "distance"),
			highlighted,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
	Center,
	Tier1,
	Tier2,
	Highlighted,
}

impl NodeCategory {
	pub const ALL: [NodeCategory; 4] = [
		NodeCategory::Center,
		NodeCategory::Tier1,
		NodeCategory::Tier2,
		NodeCategory::Highlighted,
	];

	/// Legend text of the dataset holding this category.
	pub fn legend_label(self) -> &'static str {
		match self {
			NodeCategory::Center => "User",
			NodeCategory::Tier1 => "Direct connections",
			NodeCategory::Tier2 => "By shortest path",
			NodeCategory::Highlighted => "Closest friend",
		}
	}
}

/// A laid-out node. Immutable once produced; the whole set is rebuilt on
/// every render.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub position: (f64, f64),
	pub label: String,
	pub category: NodeCategory,
	pub id: String,
	pub metric: Option<f64>,
}

impl Node {
	/// Hover text: the label plus the member's weight or distance, when set.
	pub fn tooltip(&self) -> String {
		let metric = self.metric.filter(|m| *m != 0.0);
		match (self.category, metric) {
			(NodeCategory::Tier1, Some(weight)) => format!("{} (Weight: {:.3})", self.label, weight),
			(NodeCategory::Tier2 | NodeCategory::Highlighted, Some(distance)) => {
				format!("{} (Distance: {:.3})", self.label, distance)
			}
			_ => self.label.clone(),
		}
	}
}

/// Ordered label/value pairs. Both sides always have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
	labels: Vec<String>,
	values: Vec<f64>,
}

impl Series {
	pub fn with_capacity(n: usize) -> Self {
		Self {
			labels: Vec::with_capacity(n),
			values: Vec::with_capacity(n),
		}
	}

	pub fn push(&mut self, label: impl Into<String>, value: f64) {
		self.labels.push(label.into());
		self.values.push(value);
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	pub fn values(&self) -> &[f64] {
		&self.values
	}

	pub fn len(&self) -> usize {
		self.labels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.labels
			.iter()
			.map(String::as_str)
			.zip(self.values.iter().copied())
	}
}

impl<S: Into<String>> FromIterator<(S, f64)> for Series {
	fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
		let mut series = Series::default();
		for (label, value) in iter {
			series.push(label, value);
		}
		series
	}
}

/// A point of an x/y series; `metadata` becomes its tooltip text.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
	pub x: f64,
	pub y: f64,
	pub metadata: Option<String>,
}

impl SeriesPoint {
	pub fn new(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			metadata: None,
		}
	}

	pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
		self.metadata = Some(metadata.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn many_drops_non_objects_and_non_arrays() {
		let value = json!([{ "id": "a" }, 3, null, { "id": "b" }]);
		let records = Record::many(RecordKind::Trending, &value);
		assert_eq!(records.len(), 2);
		assert!(Record::many(RecordKind::Trending, &json!({ "id": "a" })).is_empty());
	}

	#[test]
	fn text_treats_empty_strings_as_missing() {
		let record = Record::from_value(RecordKind::Trending, &json!({ "title": "", "id": 7 })).unwrap();
		assert_eq!(record.text("title"), None);
		assert_eq!(record.text("id").as_deref(), Some("7"));
		assert_eq!(record.number("id"), Some(7.0));
	}

	#[test]
	fn friend_payload_maps_tiers_and_defaults() {
		let payload = json!({
			"user": "ana",
			"directRecommendations": [{ "id": "b", "name": "Bea", "weight": 0.5 }],
			"shortestPathRecommendations": [{ "id": "c", "distance": 2.0 }],
			"closest": { "id": "c", "label": "Cris", "distance": 1.25 }
		});
		let graph = RelationshipGraph::from_friend_payload(&payload);
		assert_eq!(graph.center, GraphMember::new("ana", "ana"));
		assert_eq!(graph.tier1, vec![GraphMember::new("b", "Bea").with_metric(0.5)]);
		assert_eq!(graph.tier2, vec![GraphMember::new("c", "c").with_metric(2.0)]);
		assert_eq!(
			graph.highlighted,
			Some(GraphMember::new("c", "Cris").with_metric(1.25))
		);
	}

	#[test]
	fn empty_payload_yields_bare_center() {
		let graph = RelationshipGraph::from_friend_payload(&json!({}));
		assert_eq!(graph.center.label, DEFAULT_CENTER_LABEL);
		assert!(graph.tier1.is_empty() && graph.tier2.is_empty());
		assert!(graph.highlighted.is_none());
	}

	#[test]
	fn tooltips_show_metric_by_category() {
		let node = |category, metric| Node {
			position: (0.0, 0.0),
			label: "Bea".into(),
			category,
			id: "b".into(),
			metric,
		};
		assert_eq!(node(NodeCategory::Tier1, Some(0.5)).tooltip(), "Bea (Weight: 0.500)");
		assert_eq!(node(NodeCategory::Tier2, Some(2.0)).tooltip(), "Bea (Distance: 2.000)");
		assert_eq!(node(NodeCategory::Tier1, Some(0.0)).tooltip(), "Bea");
		assert_eq!(node(NodeCategory::Center, Some(1.0)).tooltip(), "Bea");
	}

	#[test]
	fn series_collects_pairs_in_order() {
		let series: Series = [("a", 1.0), ("b", 2.0)].into_iter().collect();
		assert_eq!(series.labels(), ["a", "b"]);
		assert_eq!(series.values(), [1.0, 2.0]);
	}
}
