mod chart;
mod component;
mod layout;
mod manager;
mod overlay;
mod palette;
mod registry;
mod render;
pub mod scale;
mod series;
mod surface;
#[cfg(test)]
mod testing;
mod types;
mod web;

pub use component::{ChartPanel, SharedManager};
pub use manager::{
	ALGORITHM_COMPARISON, FRIEND_NETWORK, GENRE_DISTRIBUTION, MARATHON_DURATION, PLAYLIST_DURATION,
	RATING_DISTRIBUTION, SCORE_TIMELINE, SHARED_SONGS, TRENDING, TrendingOptions, VisualizationManager,
};
pub use types::{Record, RecordKind};
pub use web::DomMounts;
