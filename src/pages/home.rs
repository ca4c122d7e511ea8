use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};

use super::sample;
use crate::components::charts::{
	ALGORITHM_COMPARISON, ChartPanel, DomMounts, FRIEND_NETWORK, GENRE_DISTRIBUTION,
	MARATHON_DURATION, PLAYLIST_DURATION, RATING_DISTRIBUTION, SCORE_TIMELINE, SHARED_SONGS,
	SharedManager, TRENDING, TrendingOptions, VisualizationManager,
};

const FRIEND_NETWORK_CONTAINER: &str = "friendNetworkContainer";
const SHARED_SONGS_CONTAINER: &str = "sharedSongsContainer";
const TRENDING_SONGS_CONTAINER: &str = "trendingSongsContainer";
const PLAYLIST_CONTAINER: &str = "playlistDurationContainer";
const TRENDING_MOVIES_CONTAINER: &str = "trendingMoviesContainer";
const GENRE_CONTAINER: &str = "genreDistributionContainer";
const RATING_CONTAINER: &str = "ratingDistributionContainer";
const MARATHON_CONTAINER: &str = "marathonDurationContainer";
const ALGORITHM_CONTAINER: &str = "algorithmComparisonContainer";
const SCORE_CONTAINER: &str = "scoreTimelineContainer";

/// Container id, chart id and heading of one dashboard panel.
type Panel = (&'static str, &'static str, &'static str);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Friends,
	Music,
	Movies,
	Analytics,
}

impl Tab {
	const ALL: [Tab; 4] = [Tab::Friends, Tab::Music, Tab::Movies, Tab::Analytics];

	fn label(self) -> &'static str {
		match self {
			Tab::Friends => "Friends",
			Tab::Music => "Music",
			Tab::Movies => "Movies",
			Tab::Analytics => "Analytics",
		}
	}

	fn panels(self) -> &'static [Panel] {
		match self {
			Tab::Friends => &[
				(FRIEND_NETWORK_CONTAINER, FRIEND_NETWORK, "Friend network"),
				(SHARED_SONGS_CONTAINER, SHARED_SONGS, "Shared songs"),
			],
			Tab::Music => &[
				(TRENDING_SONGS_CONTAINER, TRENDING, "Trending songs"),
				(PLAYLIST_CONTAINER, PLAYLIST_DURATION, "Playlist"),
			],
			Tab::Movies => &[
				(TRENDING_MOVIES_CONTAINER, TRENDING, "Trending movies"),
				(GENRE_CONTAINER, GENRE_DISTRIBUTION, "Genres"),
				(RATING_CONTAINER, RATING_DISTRIBUTION, "Ratings"),
				(MARATHON_CONTAINER, MARATHON_DURATION, "Marathon"),
			],
			Tab::Analytics => &[
				(ALGORITHM_CONTAINER, ALGORITHM_COMPARISON, "Algorithm comparison"),
				(SCORE_CONTAINER, SCORE_TIMELINE, "Recommendation scores"),
			],
		}
	}
}

/// Releases the charts of a tab that is no longer shown.
fn leave_tab(manager: &mut VisualizationManager<DomMounts>, tab: Tab) {
	for (_, chart_id, _) in tab.panels() {
		manager.destroy(chart_id);
	}
}

/// Renders every chart of `tab`.
fn render_tab(manager: &mut VisualizationManager<DomMounts>, tab: Tab) {
	debug!("rendering {} charts", tab.label());
	match tab {
		Tab::Friends => {
			let payload = sample::friend_recommendations();
			manager.friend_network(FRIEND_NETWORK_CONTAINER, &payload);
			manager.shared_songs(SHARED_SONGS_CONTAINER, &payload);
		}
		Tab::Music => {
			manager.trending(
				TRENDING_SONGS_CONTAINER,
				&sample::trending_songs(),
				&TrendingOptions {
					title: "Trending songs".into(),
					..TrendingOptions::default()
				},
			);
			manager.playlist_duration(PLAYLIST_CONTAINER, &sample::playlist());
		}
		Tab::Movies => {
			let movies = sample::movies();
			// Shares the trending chart id with the songs chart.
			manager.trending(
				TRENDING_MOVIES_CONTAINER,
				&sample::trending_movies(),
				&TrendingOptions {
					value_key: "views".into(),
					title: "Trending movies".into(),
					..TrendingOptions::default()
				},
			);
			manager.genre_distribution(GENRE_CONTAINER, &movies);
			manager.rating_distribution(RATING_CONTAINER, &movies);
			manager.marathon_duration(MARATHON_CONTAINER, &sample::marathon_plan());
		}
		Tab::Analytics => {
			manager.algorithm_comparison(ALGORITHM_CONTAINER, &sample::algorithm_results());
			manager.score_timeline(SCORE_CONTAINER, &sample::recommendation_scores());
		}
	}
}

/// Dashboard with one tab per chart family. Only the visible tab holds live
/// charts.
#[component]
pub fn Home() -> impl IntoView {
	let manager: SharedManager = Rc::new(RefCell::new(None));
	let active = RwSignal::new(Tab::Friends);

	let manager_fx = manager.clone();
	Effect::new(move |previous: Option<Tab>| {
		let tab = active.get();
		let mut slot = manager_fx.borrow_mut();
		if slot.is_none() {
			*slot = DomMounts::from_window().map(VisualizationManager::new);
		}
		match slot.as_mut() {
			Some(manager) => {
				if let Some(previous) = previous.filter(|p| *p != tab) {
					leave_tab(manager, previous);
				}
				render_tab(manager, tab);
			}
			None => warn!("no browser document; charts not rendered"),
		}
		tab
	});

	// Canvases are sized when mounted; redraw after the layout changes.
	let manager_redraw = manager.clone();
	let on_redraw = move |_| {
		if let Some(manager) = manager_redraw.borrow_mut().as_mut() {
			manager.destroy_all();
			render_tab(manager, active.get_untracked());
		}
	};

	let panels = move |tab: Tab| {
		tab.panels()
			.iter()
			.map(|&(container_id, chart_id, title)| {
				view! {
					<ChartPanel
						manager=manager.clone()
						container_id=container_id
						chart_id=chart_id
						title=title
					/>
				}
			})
			.collect_view()
	};

	view! {
		<main class="dashboard">
			<h1>"Playgraph"</h1>
			<nav class="tabs">
				{Tab::ALL
					.into_iter()
					.map(|tab| {
						view! {
							<button
								class:active=move || active.get() == tab
								on:click=move |_| active.set(tab)
							>
								{tab.label()}
							</button>
						}
					})
					.collect_view()}
				<button class="redraw" on:click=on_redraw>
					"Redraw"
				</button>
			</nav>

			{Tab::ALL
				.into_iter()
				.map(|tab| {
					view! {
						<div class="tab-panel" class:hidden=move || active.get() != tab>
							{panels(tab)}
						</div>
					}
				})
				.collect_view()}
		</main>
	}
}
