//! Projection of the graph into screen-space primitives, and hit-testing.
//!
//! [`project`] is a pure function of the nodes, edges, viewport transform and
//! highlight flags. It is re-run whenever any of those change, so a
//! [`Scene`] is never reused across a drag.

use std::collections::HashMap;

use super::scale::ScaleConfig;
use super::types::{Edge, Node, Point};

/// Pan and zoom applied to the whole board.
///
/// `screen = model * k + (x, y)`. This is the only mapping between model
/// and screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Places the model origin in the middle of a `width` x `height` viewport.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	pub fn to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	pub fn to_model(&self, p: Point) -> Point {
		Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	/// Multiplies zoom by `factor`, clamped to `[min_k, max_k]`, keeping the
	/// model point under `anchor` (screen space) fixed.
	///
	/// Ignored unless `0 < min_k <= max_k` and the result is finite, so `k`
	/// never reaches zero.
	pub fn zoom_at(&mut self, anchor: Point, factor: f64, min_k: f64, max_k: f64) {
		if !(min_k > 0.0 && min_k <= max_k && max_k.is_finite()) {
			return;
		}
		let new_k = (self.k * factor).clamp(min_k, max_k);
		if !new_k.is_finite() {
			return;
		}
		let ratio = new_k / self.k;
		self.x = anchor.x - (anchor.x - self.x) * ratio;
		self.y = anchor.y - (anchor.y - self.y) * ratio;
		self.k = new_k;
	}
}

/// Which elements to draw emphasized.
#[derive(Clone, Copy, Debug, Default)]
pub struct Highlight<'a> {
	pub selected_node: Option<&'a str>,
	pub selected_edge: Option<&'a str>,
	pub link_source: Option<&'a str>,
}

/// A node card in screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	pub id: String,
	pub label: String,
	pub kind: String,
	pub center: Point,
	pub width: f64,
	pub height: f64,
	pub selected: bool,
	pub link_source: bool,
}

impl NodeBox {
	pub fn left(&self) -> f64 {
		self.center.x - self.width / 2.0
	}

	pub fn top(&self) -> f64 {
		self.center.y - self.height / 2.0
	}

	pub fn contains(&self, p: Point) -> bool {
		(p.x - self.center.x).abs() <= self.width / 2.0
			&& (p.y - self.center.y).abs() <= self.height / 2.0
	}

	/// Where the ray from the card center toward `toward` leaves the card.
	pub fn border_point(&self, toward: Point) -> Point {
		let d = toward - self.center;
		let (ax, ay) = (d.x.abs(), d.y.abs());
		if ax < 1e-9 && ay < 1e-9 {
			return self.center;
		}
		let tx = if ax < 1e-9 { f64::INFINITY } else { self.width / 2.0 / ax };
		let ty = if ay < 1e-9 { f64::INFINITY } else { self.height / 2.0 / ay };
		let t = tx.min(ty).min(1.0);
		Point::new(self.center.x + d.x * t, self.center.y + d.y * t)
	}
}

/// An edge in screen space: a quadratic curve from the source card border to
/// the target card border. Straight edges have `control` on the midpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePath {
	pub id: String,
	pub source_id: String,
	pub target_id: String,
	pub label: String,
	pub kind: String,
	pub from: Point,
	pub control: Point,
	pub to: Point,
	pub selected: bool,
}

const CURVE_SAMPLES: usize = 16;

impl EdgePath {
	/// Point on the curve at parameter `t` in `[0, 1]`.
	pub fn point_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		Point::new(
			u * u * self.from.x + 2.0 * u * t * self.control.x + t * t * self.to.x,
			u * u * self.from.y + 2.0 * u * t * self.control.y + t * t * self.to.y,
		)
	}

	/// Where the edge label is drawn.
	pub fn label_anchor(&self) -> Point {
		self.point_at(0.5)
	}

	/// Unit direction of travel at the target end, for the arrowhead.
	pub fn end_direction(&self) -> Option<Point> {
		let d = self.to - self.control;
		let len = d.length();
		if len < 1e-9 {
			let d = self.to - self.from;
			let len = d.length();
			return (len >= 1e-9).then(|| Point::new(d.x / len, d.y / len));
		}
		Some(Point::new(d.x / len, d.y / len))
	}

	/// Shortest distance from `p` to the curve (sampled as a polyline).
	pub fn distance_to(&self, p: Point) -> f64 {
		let mut best = f64::INFINITY;
		let mut prev = self.from;
		for i in 1..=CURVE_SAMPLES {
			let next = self.point_at(i as f64 / CURVE_SAMPLES as f64);
			best = best.min(segment_distance(p, prev, next));
			prev = next;
		}
		best
	}
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
	let ab = b - a;
	let len_sq = ab.x * ab.x + ab.y * ab.y;
	if len_sq < 1e-12 {
		return (p - a).length();
	}
	let ap = p - a;
	let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
	(p - Point::new(a.x + ab.x * t, a.y + ab.y * t)).length()
}

/// Everything needed to draw one frame, in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<NodeBox>,
	pub edges: Vec<EdgePath>,
}

impl Scene {
	pub fn node(&self, id: &str) -> Option<&NodeBox> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Topmost card under `p`. Later cards are drawn over earlier ones.
	pub fn node_at(&self, p: Point) -> Option<&NodeBox> {
		self.nodes.iter().rev().find(|n| n.contains(p))
	}

	/// Closest edge within `tolerance` pixels of `p`.
	pub fn edge_at(&self, p: Point, tolerance: f64) -> Option<&EdgePath> {
		self.edges
			.iter()
			.map(|e| (e, e.distance_to(p)))
			.filter(|(_, d)| *d <= tolerance)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(e, _)| e)
	}
}

/// Projects nodes and edges through `transform` into a [`Scene`].
///
/// Edges whose endpoints are missing from `nodes` are skipped; the graph
/// never produces them, but a scene must not panic on one.
pub fn project(
	nodes: &[Node],
	edges: &[Edge],
	transform: &ViewTransform,
	config: &ScaleConfig,
	highlight: &Highlight<'_>,
) -> Scene {
	let (width, height) = (config.card.width * transform.k, config.card.height * transform.k);
	let boxes: Vec<NodeBox> = nodes
		.iter()
		.map(|node| NodeBox {
			id: node.id.clone(),
			label: node.label.clone(),
			kind: node.kind.clone(),
			center: transform.to_screen(node.position),
			width,
			height,
			selected: highlight.selected_node == Some(node.id.as_str()),
			link_source: highlight.link_source == Some(node.id.as_str()),
		})
		.collect();
	let index: HashMap<&str, &NodeBox> = boxes.iter().map(|b| (b.id.as_str(), b)).collect();

	// Parallel edges (either direction) share a key and fan out around the
	// straight line between the two cards.
	let mut bundle_sizes: HashMap<(&str, &str), usize> = HashMap::new();
	for edge in edges {
		*bundle_sizes.entry(pair_key(edge)).or_insert(0) += 1;
	}
	let mut bundle_seen: HashMap<(&str, &str), usize> = HashMap::new();
	let spacing = config.edge.fan_spacing * transform.k;

	let mut paths = Vec::with_capacity(edges.len());
	for edge in edges {
		let key = pair_key(edge);
		let slot = bundle_seen.entry(key).or_insert(0);
		let position = *slot;
		*slot += 1;

		let (Some(source), Some(target)) = (
			index.get(edge.source_id.as_str()),
			index.get(edge.target_id.as_str()),
		) else {
			continue;
		};
		let (Some(low), Some(high)) = (index.get(key.0), index.get(key.1)) else {
			continue;
		};

		let count = bundle_sizes.get(&key).copied().unwrap_or(1);
		let offset = (position as f64 - (count as f64 - 1.0) / 2.0) * spacing;
		let mid = Point::new(
			(source.center.x + target.center.x) / 2.0,
			(source.center.y + target.center.y) / 2.0,
		);
		let axis = high.center - low.center;
		let axis_len = axis.length();
		// A quadratic's apex sits halfway to its control point.
		let control = if offset.abs() > 1e-9 && axis_len > 1e-9 {
			Point::new(
				mid.x - axis.y / axis_len * offset * 2.0,
				mid.y + axis.x / axis_len * offset * 2.0,
			)
		} else {
			mid
		};

		paths.push(EdgePath {
			id: edge.id.clone(),
			source_id: edge.source_id.clone(),
			target_id: edge.target_id.clone(),
			label: edge.label.clone(),
			kind: edge.kind.clone(),
			from: source.border_point(control),
			control,
			to: target.border_point(control),
			selected: highlight.selected_edge == Some(edge.id.as_str()),
		});
	}

	Scene {
		nodes: boxes,
		edges: paths,
	}
}

fn pair_key(edge: &Edge) -> (&str, &str) {
	if edge.source_id <= edge.target_id {
		(edge.source_id.as_str(), edge.target_id.as_str())
	} else {
		(edge.target_id.as_str(), edge.source_id.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::board::graph::Graph;
	use crate::components::board::types::{EdgeDetails, NewNode, NodePatch};

	fn config() -> ScaleConfig {
		ScaleConfig::default()
	}

	fn assert_close(actual: Point, expected: Point) {
		assert!(
			(actual - expected).length() < 1e-6,
			"{:?} != {:?}",
			actual,
			expected
		);
	}

	fn board() -> (Graph, String, String) {
		let mut graph = Graph::new();
		let a = graph.add_node(NewNode::new("A", Point::new(0.0, 0.0))).id;
		let b = graph.add_node(NewNode::new("B", Point::new(400.0, 0.0))).id;
		(graph, a, b)
	}

	#[test]
	fn transform_round_trips() {
		let t = ViewTransform {
			x: 120.0,
			y: -40.0,
			k: 2.5,
		};
		let p = Point::new(13.0, -7.0);
		let back = t.to_model(t.to_screen(p));
		assert!((back - p).length() < 1e-9);
		assert_eq!(t.to_screen(Point::new(0.0, 0.0)), Point::new(120.0, -40.0));
	}

	#[test]
	fn zoom_keeps_anchor_fixed_and_clamps() {
		let mut t = ViewTransform::centered(800.0, 600.0);
		let anchor = Point::new(650.0, 120.0);
		let under = t.to_model(anchor);
		t.zoom_at(anchor, 1.1, 0.25, 4.0);
		assert!((t.to_model(anchor) - under).length() < 1e-9);
		for _ in 0..100 {
			t.zoom_at(anchor, 1.1, 0.25, 4.0);
		}
		assert_eq!(t.k, 4.0);
	}

	#[test]
	fn zoom_with_unusable_bounds_is_ignored() {
		let mut t = ViewTransform::centered(800.0, 600.0);
		let before = t;
		t.zoom_at(Point::new(10.0, 10.0), 2.0, 5.0, 4.0);
		t.zoom_at(Point::new(10.0, 10.0), 0.0, 0.0, 4.0);
		t.zoom_at(Point::new(10.0, 10.0), 2.0, 0.25, f64::INFINITY);
		assert_eq!(t, before);
	}

	#[test]
	fn cards_are_centered_on_projected_positions() {
		let (graph, a, _) = board();
		let t = ViewTransform {
			x: 10.0,
			y: 20.0,
			k: 2.0,
		};
		let scene = project(graph.nodes(), graph.edges(), &t, &config(), &Highlight::default());
		let card = scene.node(&a).unwrap();
		assert_eq!(card.center, Point::new(10.0, 20.0));
		assert_eq!(card.width, 320.0);
		assert_eq!(card.left(), -150.0);
	}

	#[test]
	fn hit_test_prefers_topmost_card() {
		let mut graph = Graph::new();
		graph.add_node(NewNode::new("under", Point::new(0.0, 0.0)));
		let top = graph.add_node(NewNode::new("over", Point::new(20.0, 0.0))).id;
		let scene = project(
			graph.nodes(),
			graph.edges(),
			&ViewTransform::default(),
			&config(),
			&Highlight::default(),
		);
		assert_eq!(scene.node_at(Point::new(10.0, 0.0)).map(|n| n.id.as_str()), Some(top.as_str()));
		assert!(scene.node_at(Point::new(1000.0, 0.0)).is_none());
	}

	#[test]
	fn edge_runs_between_card_borders() {
		let (mut graph, a, b) = board();
		graph.add_edge(&a, &b, EdgeDetails::new("L1", "T1")).unwrap();
		let scene = project(
			graph.nodes(),
			graph.edges(),
			&ViewTransform::default(),
			&config(),
			&Highlight::default(),
		);
		let path = &scene.edges[0];
		assert_close(path.from, Point::new(80.0, 0.0));
		assert_close(path.to, Point::new(320.0, 0.0));
		assert_close(path.label_anchor(), Point::new(200.0, 0.0));
		assert_close(path.end_direction().unwrap(), Point::new(1.0, 0.0));
		assert_eq!(
			scene.edge_at(Point::new(200.0, 4.0), 6.0).map(|e| e.label.as_str()),
			Some("L1")
		);
		assert!(scene.edge_at(Point::new(200.0, 30.0), 6.0).is_none());
	}

	#[test]
	fn parallel_edges_fan_out() {
		let (mut graph, a, b) = board();
		graph.add_edge(&a, &b, EdgeDetails::default()).unwrap();
		graph.add_edge(&b, &a, EdgeDetails::default()).unwrap();
		let scene = project(
			graph.nodes(),
			graph.edges(),
			&ViewTransform::default(),
			&config(),
			&Highlight::default(),
		);
		let (first, second) = (&scene.edges[0], &scene.edges[1]);
		assert!(first.label_anchor().y < 0.0);
		assert!(second.label_anchor().y > 0.0);
		assert!((first.label_anchor().y + second.label_anchor().y).abs() < 1e-9);
	}

	#[test]
	fn projection_tracks_moved_nodes() {
		let (mut graph, a, b) = board();
		graph.add_edge(&a, &b, EdgeDetails::default()).unwrap();
		let t = ViewTransform::default();
		let before = project(graph.nodes(), graph.edges(), &t, &config(), &Highlight::default());
		graph
			.update_node(&b, NodePatch::position(Point::new(400.0, 300.0)))
			.unwrap();
		let after = project(graph.nodes(), graph.edges(), &t, &config(), &Highlight::default());
		assert!(after.edges[0].to.y > before.edges[0].to.y);
		let card = after.node(&b).unwrap();
		assert!((after.edges[0].to - card.center).length() <= card.width);
	}

	#[test]
	fn highlight_flags_are_projected() {
		let (mut graph, a, b) = board();
		let edge = graph.add_edge(&a, &b, EdgeDetails::default()).unwrap();
		let highlight = Highlight {
			selected_node: Some(&a),
			selected_edge: Some(&edge.id),
			link_source: Some(&b),
		};
		let scene = project(
			graph.nodes(),
			graph.edges(),
			&ViewTransform::default(),
			&config(),
			&highlight,
		);
		assert!(scene.node(&a).unwrap().selected);
		assert!(scene.node(&b).unwrap().link_source);
		assert!(scene.edges[0].selected);
	}
}
