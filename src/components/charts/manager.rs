//! The chart catalogue: one method per widget, each mapping a payload to a
//! chart spec and presenting it under a fixed chart id.

use serde_json::Value;

use super::chart::{Chart, ChartOptions, ChartSpec, LegendPosition, PointDataset};
use super::layout::{LayoutConfig, layout};
use super::overlay::plot_network;
use super::palette;
use super::registry::{ChartHandle, ChartRegistry};
use super::series::{self, KeySpec};
use super::surface::MountPoints;
use super::types::{Record, RecordKind, RelationshipGraph, Series};

pub const FRIEND_NETWORK: &str = "friendNetworkChart";
pub const SHARED_SONGS: &str = "sharedSongsChart";
pub const TRENDING: &str = "trendingChart";
pub const GENRE_DISTRIBUTION: &str = "genreDistributionChart";
pub const ALGORITHM_COMPARISON: &str = "algorithmComparisonChart";
pub const MARATHON_DURATION: &str = "marathonDurationChart";
pub const RATING_DISTRIBUTION: &str = "ratingDistributionChart";
pub const SCORE_TIMELINE: &str = "scoreTimelineChart";
pub const PLAYLIST_DURATION: &str = "playlistDurationChart";

/// Fields and title of a trending bar chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendingOptions {
	pub chart_id: String,
	pub label_key: String,
	pub value_key: String,
	pub title: String,
}

impl Default for TrendingOptions {
	fn default() -> Self {
		Self {
			chart_id: TRENDING.into(),
			label_key: "title".into(),
			value_key: "plays".into(),
			title: "Top Trending".into(),
		}
	}
}

impl TrendingOptions {
	fn dataset_label(&self) -> &'static str {
		if self.value_key == "plays" { "Plays" } else { "Views" }
	}
}

/// Owns the registry of live charts and renders every chart kind.
pub struct VisualizationManager<M: MountPoints> {
	registry: ChartRegistry<M>,
	layout: LayoutConfig,
}

impl<M: MountPoints> VisualizationManager<M> {
	pub fn new(mounts: M) -> Self {
		Self::with_layout(mounts, LayoutConfig::default())
	}

	pub fn with_layout(mounts: M, layout: LayoutConfig) -> Self {
		Self {
			registry: ChartRegistry::new(mounts),
			layout,
		}
	}

	#[cfg(test)]
	pub fn registry(&self) -> &ChartRegistry<M> {
		&self.registry
	}

	fn present(
		&mut self,
		container_id: &str,
		chart_id: &str,
		spec: ChartSpec,
		options: ChartOptions,
	) -> Option<ChartHandle> {
		self.registry
			.present(container_id, chart_id, move |surface| Chart::new(surface, spec, options))
	}

	/// Friend recommendation payload as a ring network around the user.
	pub fn friend_network(&mut self, container_id: &str, payload: &Value) -> Option<ChartHandle> {
		self.network(container_id, &RelationshipGraph::from_friend_payload(payload))
	}

	pub fn network(&mut self, container_id: &str, graph: &RelationshipGraph) -> Option<ChartHandle> {
		let (datasets, overlay) = plot_network(layout(graph, &self.layout));
		let extent = self.layout.extent;
		let options = ChartOptions::titled("Connection network")
			.legend(LegendPosition::Bottom)
			.bounds((-extent, extent), (-extent, extent))
			.hide_axes();
		self.registry.present(container_id, FRIEND_NETWORK, move |surface| {
			Chart::new(surface, ChartSpec::Scatter { datasets }, options)
				.with_hook(move |frame, ctx| overlay.draw(frame, ctx))
		})
	}

	/// Count of shared songs per friend, from the payload's `sharedSongs`.
	pub fn shared_songs(&mut self, container_id: &str, payload: &Value) -> Option<ChartHandle> {
		let series = payload
			.get("sharedSongs")
			.map(series::entry_counts)
			.unwrap_or_default();
		let spec = ChartSpec::Bar {
			dataset_label: "Shared songs".into(),
			colors: palette::palette(series.len()),
			series,
		};
		let options = ChartOptions::titled("Top friends by shared songs").horizontal();
		self.present(container_id, SHARED_SONGS, spec, options)
	}

	pub fn trending(
		&mut self,
		container_id: &str,
		records: &[Record],
		options: &TrendingOptions,
	) -> Option<ChartHandle> {
		let series = series::to_series(records, &KeySpec::new(&options.label_key, &options.value_key));
		let spec = ChartSpec::Bar {
			dataset_label: options.dataset_label().into(),
			colors: palette::palette(series.len()),
			series,
		};
		let chart_options = ChartOptions::titled(&options.title).horizontal();
		self.present(container_id, &options.chart_id, spec, chart_options)
	}

	pub fn genre_distribution(&mut self, container_id: &str, movies: &[Record]) -> Option<ChartHandle> {
		let series = series::group_by_category(movies, "genre");
		let spec = ChartSpec::Doughnut {
			colors: palette::palette(series.len()),
			series,
		};
		let options = ChartOptions::titled("Genre distribution").legend(LegendPosition::Right);
		self.present(container_id, GENRE_DISTRIBUTION, spec, options)
	}

	/// One line per algorithm (`{ "bfs": [...], "dfs": [...] }`), score by
	/// rank.
	pub fn algorithm_comparison(&mut self, container_id: &str, results: &Value) -> Option<ChartHandle> {
		let algorithms: Vec<(&String, &Value)> = results.as_object().map(|m| m.iter().collect()).unwrap_or_default();
		let colors = palette::palette(algorithms.len());
		let datasets = algorithms
			.into_iter()
			.zip(colors)
			.map(|((name, items), color)| {
				let records = Record::many(RecordKind::Ranked, items);
				PointDataset::new(name.to_uppercase(), series::rank_points(&records), color.with_alpha(0.1))
					.border(color)
					.filled()
			})
			.collect();
		let chart = ChartSpec::Line {
			labels: Vec::new(),
			datasets,
		};
		self.present(
			container_id,
			ALGORITHM_COMPARISON,
			chart,
			ChartOptions::titled("Algorithm comparison"),
		)
	}

	/// Running total of the plan's movie durations.
	pub fn marathon_duration(&mut self, container_id: &str, plan: &Value) -> Option<ChartHandle> {
		let movies = plan
			.get("movies")
			.map(|v| Record::many(RecordKind::Movie, v))
			.unwrap_or_default();
		let series = series::cumulative(&movies, "duration");
		let spec = filled_line("Cumulative duration (min)", &series);
		self.present(
			container_id,
			MARATHON_DURATION,
			spec,
			ChartOptions::titled("Marathon duration"),
		)
	}

	pub fn rating_distribution(&mut self, container_id: &str, movies: &[Record]) -> Option<ChartHandle> {
		let series = series::rating_histogram(movies, "rating");
		let spec = ChartSpec::Bar {
			dataset_label: "Movies".into(),
			colors: palette::palette(series.len()),
			series,
		};
		self.present(
			container_id,
			RATING_DISTRIBUTION,
			spec,
			ChartOptions::titled("Rating distribution"),
		)
	}

	pub fn score_timeline(&mut self, container_id: &str, items: &[Record]) -> Option<ChartHandle> {
		let series = series::ranked(items);
		self.present(
			container_id,
			SCORE_TIMELINE,
			filled_line("Score", &series),
			ChartOptions::titled("Score timeline"),
		)
	}

	/// Duration of every song of a generated playlist (`{ "songs": [...] }`).
	pub fn playlist_duration(&mut self, container_id: &str, playlist: &Value) -> Option<ChartHandle> {
		let songs = playlist
			.get("songs")
			.map(|v| Record::many(RecordKind::PlaylistSong, v))
			.unwrap_or_default();
		let series = series::to_series_by_kind(&songs);
		let spec = ChartSpec::Bar {
			dataset_label: "Duration (sec)".into(),
			colors: palette::palette(series.len()),
			series,
		};
		self.present(
			container_id,
			PLAYLIST_DURATION,
			spec,
			ChartOptions::titled("Playlist song durations"),
		)
	}

	#[cfg(test)]
	pub fn get(&self, chart_id: &str) -> Option<&ChartHandle> {
		self.registry.get(chart_id)
	}

	pub fn tooltip_at(&self, chart_id: &str, x: f64, y: f64) -> Option<String> {
		self.registry.get(chart_id)?.tooltip_at(x, y)
	}

	pub fn destroy(&mut self, chart_id: &str) -> bool {
		self.registry.destroy(chart_id)
	}

	pub fn destroy_all(&mut self) {
		self.registry.destroy_all();
	}
}

fn filled_line(label: &str, series: &Series) -> ChartSpec {
	let mut spec = ChartSpec::line(label, series, palette::PRIMARY);
	if let ChartSpec::Line { datasets, .. } = &mut spec {
		for dataset in datasets {
			dataset.fill = true;
		}
	}
	spec
}
