//! Board behaviour settings.
//!
//! Read from a `<script id="board-config" type="application/json">` element
//! when present. Every field is optional in that JSON; missing fields take
//! the defaults below.

use log::warn;
use serde::Deserialize;

use super::layout::RelaxParams;
use super::types::Point;

/// Behaviour settings for one board instance.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
	/// localStorage key the board is saved under.
	pub storage_key: String,
	/// Save to localStorage after each completed change.
	pub persist: bool,
	/// Snap drag deltas to `grid_size`.
	pub snap_to_grid: bool,
	pub grid_size: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Zoom multiplier per wheel notch.
	pub zoom_step: f64,
	/// Cell size used by grid arrange.
	pub arrange_spacing_x: f64,
	pub arrange_spacing_y: f64,
	pub relax_iterations: usize,
	/// Theme name, see [`Theme::by_name`](super::theme::Theme::by_name).
	pub theme: String,
}

impl Default for BoardConfig {
	fn default() -> Self {
		Self {
			storage_key: "collab_board_v1".to_string(),
			persist: true,
			snap_to_grid: false,
			grid_size: 24.0,
			min_zoom: 0.25,
			max_zoom: 4.0,
			zoom_step: 1.1,
			arrange_spacing_x: 260.0,
			arrange_spacing_y: 200.0,
			relax_iterations: 300,
			theme: "default".to_string(),
		}
	}
}

impl BoardConfig {
	/// Parses config JSON, keeping defaults for anything left out.
	/// Out-of-range values are replaced, see [`BoardConfig::sanitized`].
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::sanitized)
	}

	/// Replaces values the board cannot work with by their defaults.
	///
	/// Afterwards `0 < min_zoom <= max_zoom`, `zoom_step > 1`, and
	/// `grid_size` and both arrange spacings are positive and finite.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();
		let positive = |v: f64| v.is_finite() && v > 0.0;

		if !positive(self.min_zoom) {
			warn!("collab-board: minZoom {} out of range, using {}", self.min_zoom, defaults.min_zoom);
			self.min_zoom = defaults.min_zoom;
		}
		if !positive(self.max_zoom) {
			warn!("collab-board: maxZoom {} out of range, using {}", self.max_zoom, defaults.max_zoom);
			self.max_zoom = defaults.max_zoom;
		}
		if self.min_zoom > self.max_zoom {
			warn!(
				"collab-board: minZoom {} exceeds maxZoom {}, swapping",
				self.min_zoom, self.max_zoom
			);
			std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
		}
		if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
			warn!("collab-board: zoomStep {} out of range, using {}", self.zoom_step, defaults.zoom_step);
			self.zoom_step = defaults.zoom_step;
		}
		if !positive(self.grid_size) {
			warn!("collab-board: gridSize {} out of range, using {}", self.grid_size, defaults.grid_size);
			self.grid_size = defaults.grid_size;
		}
		if !positive(self.arrange_spacing_x) {
			self.arrange_spacing_x = defaults.arrange_spacing_x;
		}
		if !positive(self.arrange_spacing_y) {
			self.arrange_spacing_y = defaults.arrange_spacing_y;
		}
		self
	}

	pub fn arrange_spacing(&self) -> Point {
		Point::new(self.arrange_spacing_x, self.arrange_spacing_y)
	}

	pub fn relax_params(&self) -> RelaxParams {
		RelaxParams {
			iterations: self.relax_iterations,
			..Default::default()
		}
	}

	/// Grid step for the drag controller, if snapping is on.
	pub fn snap(&self) -> Option<f64> {
		(self.snap_to_grid && self.grid_size > 0.0).then_some(self.grid_size)
	}
}
