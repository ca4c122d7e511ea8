use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::manager::VisualizationManager;
use super::web::DomMounts;

/// Manager shared by every panel of a page. `None` until the page's first
/// effect finds a browser document.
pub type SharedManager = Rc<RefCell<Option<VisualizationManager<DomMounts>>>>;

/// Titled container a chart is mounted into, with a tooltip line under it.
#[component]
pub fn ChartPanel(
	manager: SharedManager,
	container_id: &'static str,
	chart_id: &'static str,
	#[prop(into)] title: String,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let tooltip = RwSignal::new(None::<String>);

	let on_mousemove = move |ev: MouseEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let rect = container.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let text = manager
			.borrow()
			.as_ref()
			.and_then(|m| m.tooltip_at(chart_id, x, y));
		if tooltip.get_untracked() != text {
			tooltip.set(text);
		}
	};
	let on_mouseleave = move |_: MouseEvent| tooltip.set(None);

	view! {
		<section class="chart-panel">
			<h2>{title}</h2>
			<div
				node_ref=container_ref
				id=container_id
				class="chart-container"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
			/>
			<p class="chart-tooltip">{move || tooltip.get().unwrap_or_default()}</p>
		</section>
	}
}
