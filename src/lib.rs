//! Playgraph dashboard: canvas charts for social recommendations, wired
//! into a Leptos client-side app.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Console verbosity: chart lifecycle `debug!` lines only in dev builds.
const LOG_LEVEL: Level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };

/// Routes browser console logging and panics for the wasm build.
pub fn init_logging() {
	let _ = console_log::init_with_level(LOG_LEVEL);
	console_error_panic_hook::set_once();
	info!("playgraph dashboard starting (log level {LOG_LEVEL})");
}

/// Dashboard at `/` and `/dashboard`; anything else is a 404.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Playgraph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="Friend, music and movie recommendation charts" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/dashboard") view=Home />
			</Routes>
		</Router>
	}
}
