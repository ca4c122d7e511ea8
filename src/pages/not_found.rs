use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="not-found">
			<h1>"Page not found"</h1>
			<a href="/">"Back to the dashboard"</a>
		</main>
	}
}
