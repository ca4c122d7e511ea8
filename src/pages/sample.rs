//! Canned API responses the dashboard renders until a backend is wired in.

use serde_json::{Value, json};

use crate::components::charts::{Record, RecordKind};

pub fn friend_recommendations() -> Value {
	json!({
		"user": "Maximiliano",
		"directRecommendations": [
			{ "id": "u2", "name": "Ana", "weight": 0.92 },
			{ "id": "u3", "name": "Bob", "weight": 0.75 },
			{ "id": "u4", "name": "Carla", "weight": 0.61 },
			{ "id": "u5", "name": "Dmitri", "weight": 0.4 }
		],
		"shortestPathRecommendations": [
			{ "id": "u6", "name": "Eun-ji", "distance": 2 },
			{ "id": "u7", "name": "Francisco", "distance": 2 },
			{ "id": "u8", "name": "Gus", "distance": 3 }
		],
		"closest": { "id": "u2", "name": "Ana", "distance": 1 },
		"sharedSongs": {
			"Ana": ["s1", "s2", "s3", "s4"],
			"Bob": ["s2", "s5"],
			"Carla": ["s1"],
			"Dmitri": []
		}
	})
}

pub fn trending_songs() -> Vec<Record> {
	Record::many(
		RecordKind::Trending,
		&json!([
			{ "songId": "s1", "title": "Midnight City", "plays": 182 },
			{ "songId": "s2", "title": "Archangel", "plays": 143 },
			{ "songId": "s3", "title": "Teardrop", "plays": 120 },
			{ "songId": "s4", "plays": 97 },
			{ "songId": "s5", "title": "Windowlicker", "plays": 64 }
		]),
	)
}

pub fn trending_movies() -> Vec<Record> {
	Record::many(
		RecordKind::Trending,
		&json!([
			{ "movieId": "m1", "title": "Arrival", "views": 311 },
			{ "movieId": "m2", "title": "Heat", "views": 270 },
			{ "movieId": "m3", "title": "Paprika", "views": 198 }
		]),
	)
}

pub fn playlist() -> Value {
	json!({
		"songs": [
			{ "id": "s1", "title": "Midnight City", "duration": 243 },
			{ "id": "s3", "title": "Teardrop", "duration": 330 },
			{ "id": "s5", "duration": 366 },
			{ "id": "s2", "title": "Archangel", "duration": 238 }
		]
	})
}

pub fn movies() -> Vec<Record> {
	Record::many(
		RecordKind::Movie,
		&json!([
			{ "movieId": "m1", "title": "Arrival", "genre": "Sci-Fi", "rating": 4.4, "duration": 116 },
			{ "movieId": "m2", "title": "Heat", "genre": "Crime", "rating": 4.6, "duration": 170 },
			{ "movieId": "m3", "title": "Paprika", "genre": "Animation", "rating": 4.1, "duration": 90 },
			{ "movieId": "m4", "title": "Alien", "genre": "Sci-Fi", "rating": 4.5, "duration": 117 },
			{ "movieId": "m5", "title": "Cats", "genre": "Musical", "rating": 1.2, "duration": 110 },
			{ "movieId": "m6", "title": "Moon", "genre": "Sci-Fi", "rating": 3.9, "duration": 97 },
			{ "movieId": "m7", "title": "Ronin", "rating": 3.5, "duration": 122 }
		]),
	)
}

pub fn marathon_plan() -> Value {
	json!({
		"movies": [
			{ "movieId": "m4", "title": "Alien", "duration": 117 },
			{ "movieId": "m1", "title": "Arrival", "duration": 116 },
			{ "movieId": "m6", "title": "Moon", "duration": 97 }
		],
		"totalDuration": 330
	})
}

pub fn algorithm_results() -> Value {
	json!({
		"bfs": [
			{ "title": "Arrival", "score": 0.91 },
			{ "title": "Heat", "score": 0.84 },
			{ "title": "Moon", "score": 0.7 },
			{ "title": "Alien", "score": 0.52 }
		],
		"dfs": [
			{ "title": "Paprika", "score": 0.88 },
			{ "title": "Alien", "score": 0.8 },
			{ "title": "Ronin", "score": 0.61 }
		],
		"dijkstra": [
			{ "title": "Heat", "score": 0.95 },
			{ "title": "Arrival", "score": 0.89 },
			{ "title": "Moon", "score": 0.73 },
			{ "title": "Cats", "score": 0.2 }
		]
	})
}

pub fn recommendation_scores() -> Vec<Record> {
	Record::many(
		RecordKind::Ranked,
		&json!([
			{ "title": "Heat", "score": 0.95 },
			{ "title": "Arrival", "score": 0.89 },
			{ "label": "Moon", "score": 0.73 },
			{ "score": 0.41 },
			{ "title": "Cats", "score": 0.2 }
		]),
	)
}
