//! Zoom-dependent sizing for board visuals.
//!
//! # Coordinate Spaces
//!
//! - **Model space**: where node positions live. Card dimensions are given in
//!   model units and grow or shrink with zoom.
//! - **Screen space**: canvas pixels. The scene is projected into screen
//!   space before drawing, so every value computed here is in pixels.
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::World`]: follows zoom (`base * k` pixels).
//! - [`ScaleBehavior::Screen`]: fixed pixel size.
//! - [`ScaleBehavior::Clamped`]: follows zoom within pixel bounds, so text
//!   stays legible when zoomed out and does not balloon when zoomed in.

/// How a visual size responds to the zoom factor `k`.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World variant completes the API for callers customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Scales with zoom.
	World,
	/// Constant pixel size.
	Screen,
	/// Scales with zoom, clamped to `[min_screen, max_screen]` pixels.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Pixel size for a base size at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base * k,
			ScaleBehavior::Screen => base,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => (base * k).clamp(*min_screen, *max_screen),
		}
	}
}

/// How an opacity responds to the zoom factor.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "Constant variant available for callers that never fade"
)]
pub enum AlphaBehavior {
	Constant,
	/// Zero at or below `zero_alpha_k`, one at or above `full_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Card geometry and text.
#[derive(Clone, Debug)]
pub struct CardScaleConfig {
	/// Card width in model units.
	pub width: f64,
	/// Card height in model units.
	pub height: f64,
	pub corner_radius: f64,
	pub corner_behavior: ScaleBehavior,
	/// Label font size at zoom 1.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Type tag font size at zoom 1.
	pub kind_size: f64,
	pub kind_behavior: ScaleBehavior,
}

/// Edge strokes and labels.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	pub line_width: f64,
	pub line_behavior: ScaleBehavior,
	/// Perpendicular distance between parallel edges, in model units.
	pub fan_spacing: f64,
	/// Max pointer distance (pixels) that still counts as hitting an edge.
	pub hit_tolerance: f64,
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Edge labels fade out when zoomed far out.
	pub label_alpha_behavior: AlphaBehavior,
	/// Below this alpha labels are skipped entirely.
	pub label_cull_alpha: f64,
}

/// Arrowhead at the target end of an edge.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	pub size: f64,
	pub size_behavior: ScaleBehavior,
}

/// Selection and link-source outlines.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in pixels.
	pub width: f64,
	/// Gap between card border and ring in pixels.
	pub offset: f64,
}

/// Complete visual sizing configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub card: CardScaleConfig,
	pub edge: EdgeScaleConfig,
	pub arrow: ArrowScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			card: CardScaleConfig {
				width: 160.0,
				height: 72.0,
				corner_radius: 10.0,
				corner_behavior: ScaleBehavior::Clamped {
					min_screen: 2.0,
					max_screen: 16.0,
				},
				label_size: 14.0,
				label_behavior: ScaleBehavior::Clamped {
					min_screen: 9.0,
					max_screen: 22.0,
				},
				kind_size: 11.0,
				kind_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: 16.0,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				line_behavior: ScaleBehavior::Clamped {
					min_screen: 1.0,
					max_screen: 4.0,
				},
				fan_spacing: 28.0,
				hit_tolerance: 6.0,
				label_size: 12.0,
				label_behavior: ScaleBehavior::Clamped {
					min_screen: 9.0,
					max_screen: 18.0,
				},
				label_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.35,
					full_alpha_k: 0.6,
				},
				label_cull_alpha: 0.05,
			},
			arrow: ArrowScaleConfig {
				size: 10.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: 18.0,
				},
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 3.0,
			},
		}
	}
}

/// Pixel sizes for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub corner_radius: f64,
	/// CSS font for card labels, e.g. `"14px sans-serif"`.
	pub label_font: String,
	pub label_size: f64,
	pub kind_font: String,
	pub edge_line_width: f64,
	pub edge_label_font: String,
	pub edge_label_alpha: f64,
	/// Whether edge labels are too faint to draw.
	pub cull_edge_labels: bool,
	pub arrow_size: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.card.label_behavior.apply(config.card.label_size, k);
		let kind_size = config.card.kind_behavior.apply(config.card.kind_size, k);
		let edge_label_size = config.edge.label_behavior.apply(config.edge.label_size, k);
		let edge_label_alpha = config.edge.label_alpha_behavior.apply(k);

		Self {
			k,
			corner_radius: config
				.card
				.corner_behavior
				.apply(config.card.corner_radius, k),
			label_font: format!("600 {}px sans-serif", label_size),
			label_size,
			kind_font: format!("{}px sans-serif", kind_size),
			edge_line_width: config.edge.line_behavior.apply(config.edge.line_width, k),
			edge_label_font: format!("{}px sans-serif", edge_label_size),
			edge_label_alpha,
			cull_edge_labels: edge_label_alpha < config.edge.label_cull_alpha,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			ring_width: config.ring.width,
			ring_offset: config.ring.offset,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_follows_zoom_within_bounds() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 9.0,
			max_screen: 22.0,
		};
		assert_eq!(behavior.apply(14.0, 1.0), 14.0);
		assert_eq!(behavior.apply(14.0, 0.1), 9.0);
		assert_eq!(behavior.apply(14.0, 4.0), 22.0);
		assert_eq!(ScaleBehavior::Screen.apply(3.0, 8.0), 3.0);
		assert_eq!(ScaleBehavior::World.apply(3.0, 2.0), 6.0);
	}

	#[test]
	fn edge_labels_fade_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert!(ScaledValues::new(&config, 0.2).cull_edge_labels);
		let near = ScaledValues::new(&config, 1.0);
		assert!(!near.cull_edge_labels);
		assert_eq!(near.edge_label_alpha, 1.0);
	}
}
