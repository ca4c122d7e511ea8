//! Record-to-series mapping. Every missing or malformed field degrades to a
//! named default; nothing here fails.

use std::collections::HashMap;

use serde_json::Value;

use super::types::{Record, RecordKind, Series, SeriesPoint, UNKNOWN_LABEL};

/// Keys tried after the preferred label key, in order.
pub const LABEL_FALLBACKS: [&str; 3] = ["songId", "movieId", "id"];
/// Value used when the value key is absent or not a number.
pub const DEFAULT_VALUE: f64 = 0.0;
/// Category used when the grouping field is absent.
pub const UNKNOWN_CATEGORY: &str = UNKNOWN_LABEL;
/// Histogram bins of the rating distribution chart.
pub const RATING_BINS: [&str; 5] = ["0-1", "1-2", "2-3", "3-4", "4-5"];

/// Which fields feed a series: a label chain and a single value key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySpec {
	label_keys: Vec<String>,
	value_key: String,
}

impl KeySpec {
	/// `label_key` first, then the id fallbacks.
	pub fn new(label_key: impl Into<String>, value_key: impl Into<String>) -> Self {
		let mut label_keys = vec![label_key.into()];
		for key in LABEL_FALLBACKS {
			if !label_keys.iter().any(|k| k == key) {
				label_keys.push(key.to_owned());
			}
		}
		Self {
			label_keys,
			value_key: value_key.into(),
		}
	}

	/// An exact label chain with no implicit fallbacks.
	pub fn with_label_chain<I, S>(labels: I, value_key: impl Into<String>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			label_keys: labels.into_iter().map(Into::into).collect(),
			value_key: value_key.into(),
		}
	}

	/// The label chain and value key of each record kind.
	pub fn for_kind(kind: RecordKind) -> Self {
		match kind {
			RecordKind::Friend => Self::with_label_chain(["label", "name", "id"], "weight"),
			RecordKind::Movie => Self::with_label_chain(["title", "movieId", "id"], "score"),
			RecordKind::Trending => Self::new("title", "plays"),
			RecordKind::PlaylistSong => Self::with_label_chain(["title", "id"], "duration"),
			RecordKind::Ranked => Self::with_label_chain(["title", "label"], "score"),
		}
	}

	/// First present key of the chain.
	pub fn label(&self, record: &Record) -> Option<String> {
		self.label_keys.iter().find_map(|key| record.text(key))
	}

	/// Like [`KeySpec::label`], else "Unknown". Never empty.
	pub fn resolve_label(&self, record: &Record) -> String {
		self.label(record).unwrap_or_else(|| UNKNOWN_LABEL.to_owned())
	}

	/// The value field, or 0 when absent or non-numeric.
	pub fn resolve_value(&self, record: &Record) -> f64 {
		record.number(&self.value_key).unwrap_or(DEFAULT_VALUE)
	}
}

/// One point per record, order preserved.
pub fn to_series(records: &[Record], spec: &KeySpec) -> Series {
	let mut series = Series::with_capacity(records.len());
	for record in records {
		series.push(spec.resolve_label(record), spec.resolve_value(record));
	}
	series
}

/// Like [`to_series`], with each record read through the fields of its own
/// kind.
pub fn to_series_by_kind(records: &[Record]) -> Series {
	records
		.iter()
		.map(|record| {
			let spec = KeySpec::for_kind(record.kind());
			(spec.resolve_label(record), spec.resolve_value(record))
		})
		.collect()
}

/// One point per distinct `category_key` value, counting records, in
/// first-seen order.
pub fn group_by_category(records: &[Record], category_key: &str) -> Series {
	let mut order: Vec<String> = Vec::new();
	let mut counts: HashMap<String, usize> = HashMap::new();
	for record in records {
		let category = record
			.text(category_key)
			.unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned());
		let count = counts.entry(category.clone()).or_insert_with(|| {
			order.push(category);
			0
		});
		*count += 1;
	}
	order
		.into_iter()
		.map(|category| {
			let count = counts.get(&category).copied().unwrap_or_default();
			(category, count as f64)
		})
		.collect()
}

/// Running total of `value_key`, labelled by 1-based position.
pub fn cumulative(records: &[Record], value_key: &str) -> Series {
	let mut total = 0.0;
	records
		.iter()
		.enumerate()
		.map(|(i, record)| {
			total += record.number(value_key).unwrap_or(DEFAULT_VALUE);
			((i + 1).to_string(), total)
		})
		.collect()
}

/// Label of the `i`-th ranked record: its kind's label chain, else the
/// 1-based position (`#3`).
fn rank_label(record: &Record, spec: &KeySpec, i: usize) -> String {
	spec.label(record).unwrap_or_else(|| format!("#{}", i + 1))
}

/// One point per record in rank order, read through the fields of each
/// record's kind. Unlabelled records are named by position.
pub fn ranked(records: &[Record]) -> Series {
	records
		.iter()
		.enumerate()
		.map(|(i, record)| {
			let spec = KeySpec::for_kind(record.kind());
			(rank_label(record, &spec, i), spec.resolve_value(record))
		})
		.collect()
}

/// Counts ratings into the half-open unit bins `[0, 1)` .. `[4, 5)`.
/// Missing ratings count as 0. Anything outside `[0, 5)` is ignored, so a
/// perfect 5 is not counted.
pub fn rating_histogram(records: &[Record], rating_key: &str) -> Series {
	let mut counts = [0usize; RATING_BINS.len()];
	for record in records {
		let rating = record.number(rating_key).unwrap_or(DEFAULT_VALUE);
		if !(0.0..RATING_BINS.len() as f64).contains(&rating) {
			continue;
		}
		counts[rating.floor() as usize] += 1;
	}
	RATING_BINS
		.iter()
		.zip(counts)
		.map(|(label, count)| (*label, count as f64))
		.collect()
}

/// Sizes of the arrays of an object payload, keyed in payload order. Used
/// for "songs shared with each friend"; non-array members count as 0.
pub fn entry_counts(map: &Value) -> Series {
	map.as_object()
		.map(|entries| {
			entries
				.iter()
				.map(|(key, value)| (key.clone(), value.as_array().map_or(0, Vec::len) as f64))
				.collect()
		})
		.unwrap_or_default()
}

/// x = 1-based rank, y = value, metadata = label, as in [`ranked`].
pub fn rank_points(records: &[Record]) -> Vec<SeriesPoint> {
	records
		.iter()
		.enumerate()
		.map(|(i, record)| {
			let spec = KeySpec::for_kind(record.kind());
			SeriesPoint::new((i + 1) as f64, spec.resolve_value(record))
				.with_metadata(rank_label(record, &spec, i))
		})
		.collect()
}
