use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};

use super::chart::Chart;
use super::surface::{MountPoints, Surface};

/// Shared reference to a live chart. Clones point at the same chart; once
/// destroyed, every clone reports `is_live() == false` and paints nothing.
#[derive(Clone)]
pub struct ChartHandle {
	chart_id: Rc<str>,
	chart: Rc<RefCell<Option<Chart>>>,
}

impl ChartHandle {
	fn new(chart: Chart) -> Self {
		Self {
			chart_id: Rc::from(chart.chart_id()),
			chart: Rc::new(RefCell::new(Some(chart))),
		}
	}

	#[cfg(test)]
	pub fn chart_id(&self) -> &str {
		&self.chart_id
	}

	pub fn is_live(&self) -> bool {
		self.chart.borrow().is_some()
	}

	/// Repaints the chart and its hooks. Returns whether anything was drawn.
	pub fn paint(&self) -> bool {
		match self.chart.borrow_mut().as_mut() {
			Some(chart) => {
				chart.paint();
				true
			}
			None => false,
		}
	}

	pub fn tooltip_at(&self, x: f64, y: f64) -> Option<String> {
		self.chart.borrow().as_ref()?.tooltip_at(x, y)
	}

	#[cfg(test)]
	pub fn with_chart<R>(&self, f: impl FnOnce(&Chart) -> R) -> Option<R> {
		self.chart.borrow().as_ref().map(f)
	}

	/// Releases the surface and every hook. Idempotent.
	pub fn destroy(&self) {
		if let Some(chart) = self.chart.borrow_mut().take() {
			chart.teardown();
		}
	}

	#[cfg(test)]
	pub fn ptr_eq(&self, other: &ChartHandle) -> bool {
		Rc::ptr_eq(&self.chart, &other.chart)
	}
}

impl std::fmt::Debug for ChartHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChartHandle")
			.field("chart_id", &self.chart_id)
			.field("live", &self.is_live())
			.finish()
	}
}

/// Live charts keyed by chart id; at most one per id.
pub struct ChartRegistry<M: MountPoints> {
	mounts: M,
	live: HashMap<String, ChartHandle>,
}

impl<M: MountPoints> ChartRegistry<M> {
	pub fn new(mounts: M) -> Self {
		Self {
			mounts,
			live: HashMap::new(),
		}
	}

	#[cfg(test)]
	pub fn mounts(&self) -> &M {
		&self.mounts
	}

	/// Renders a chart into `container_id` under `chart_id`.
	///
	/// A missing container leaves everything untouched and returns `None`.
	/// Otherwise the chart currently registered for `chart_id` is destroyed
	/// first, the container is emptied, and `build` receives the new
	/// surface. The result is painted once and registered.
	pub fn present<F>(&mut self, container_id: &str, chart_id: &str, build: F) -> Option<ChartHandle>
	where
		F: FnOnce(Surface) -> Chart,
	{
		if !self.mounts.contains(container_id) {
			warn!("container `{container_id}` not found; `{chart_id}` not rendered");
			return None;
		}
		if self.destroy(chart_id) {
			debug!("replacing chart `{chart_id}`");
		}

		let Some(surface) = self.mounts.prepare(container_id, chart_id) else {
			warn!("no drawing surface in `{container_id}`; `{chart_id}` not rendered");
			return None;
		};
		let handle = ChartHandle::new(build(surface));
		handle.paint();
		self.live.insert(chart_id.to_owned(), handle.clone());
		debug!("chart `{chart_id}` rendered into `{container_id}`");
		Some(handle)
	}

	pub fn get(&self, chart_id: &str) -> Option<&ChartHandle> {
		self.live.get(chart_id)
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.live.len()
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.live.is_empty()
	}

	#[cfg(test)]
	pub fn chart_ids(&self) -> impl Iterator<Item = &str> {
		self.live.keys().map(String::as_str)
	}

	/// Tears down the chart registered for `chart_id`. Returns whether
	/// there was one.
	pub fn destroy(&mut self, chart_id: &str) -> bool {
		match self.live.remove(chart_id) {
			Some(handle) => {
				handle.destroy();
				debug!("chart `{chart_id}` destroyed");
				true
			}
			None => false,
		}
	}

	pub fn destroy_all(&mut self) {
		for (_, handle) in self.live.drain() {
			handle.destroy();
		}
	}
}

impl<M: MountPoints> Drop for ChartRegistry<M> {
	fn drop(&mut self) {
		self.destroy_all();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;
	use crate::components::charts::chart::{ChartOptions, ChartSpec};
	use crate::components::charts::palette;
	use crate::components::charts::testing::{DrawOp, MemoryMounts};
	use crate::components::charts::types::Series;

	fn bar(surface: Surface, label: &str) -> Chart {
		let series: Series = [(label, 1.0)].into_iter().collect();
		Chart::new(
			surface,
			ChartSpec::Bar {
				dataset_label: label.into(),
				series,
				colors: palette::palette(1),
			},
			ChartOptions::default(),
		)
	}

	#[test]
	fn second_present_replaces_first() {
		let mut registry = ChartRegistry::new(MemoryMounts::with_containers(&["box"]));
		let first = registry.present("box", "trend", |s| bar(s, "first")).unwrap();
		let first_painter = registry.mounts().painter("trend").unwrap();
		let second = registry.present("box", "trend", |s| bar(s, "second")).unwrap();

		assert!(!first.is_live());
		assert!(second.is_live());
		assert_eq!(registry.len(), 1);
		assert!(registry.get("trend").unwrap().ptr_eq(&second));
		assert_eq!(registry.mounts().children("box"), ["trend"]);

		// The old surface was blanked on teardown and never painted again.
		assert!(matches!(first_painter.ops().last(), Some(DrawOp::Clear { .. })));
		assert!(!first.paint());

		let texts = registry.mounts().painter("trend").unwrap().texts();
		assert!(texts.contains(&"second".to_owned()));
		assert!(!texts.contains(&"first".to_owned()));
	}

	#[test]
	fn missing_container_is_a_no_op() {
		let mut registry = ChartRegistry::new(MemoryMounts::with_containers(&["box"]));
		let live = registry.present("box", "trend", |s| bar(s, "a")).unwrap();
		let built = Cell::new(false);
		let handle = registry.present("gone", "trend", |s| {
			built.set(true);
			bar(s, "b")
		});
		assert!(handle.is_none());
		assert!(!built.get());
		assert!(live.is_live());
		assert_eq!(registry.mounts().prepared, 1);
	}

	#[test]
	fn charts_are_keyed_by_id_not_container() {
		let mut registry = ChartRegistry::new(MemoryMounts::with_containers(&["songs", "movies"]));
		let songs = registry.present("songs", "trendingChart", |s| bar(s, "songs")).unwrap();
		let movies = registry.present("movies", "trendingChart", |s| bar(s, "movies")).unwrap();
		assert!(!songs.is_live());
		assert!(movies.is_live());
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn destroy_and_destroy_all() {
		let mut registry = ChartRegistry::new(MemoryMounts::with_containers(&["a", "b"]));
		let one = registry.present("a", "one", |s| bar(s, "1")).unwrap();
		let two = registry.present("b", "two", |s| bar(s, "2")).unwrap();
		assert!(registry.destroy("one"));
		assert!(!registry.destroy("one"));
		assert!(!one.is_live());
		registry.destroy_all();
		assert!(!two.is_live());
		assert!(registry.is_empty());
	}

	#[test]
	fn dropping_the_registry_releases_charts() {
		let handle = {
			let mut registry = ChartRegistry::new(MemoryMounts::with_containers(&["a"]));
			registry.present("a", "one", |s| bar(s, "1")).unwrap()
		};
		assert!(!handle.is_live());
		assert_eq!(handle.tooltip_at(0.0, 0.0), None);
	}
}
