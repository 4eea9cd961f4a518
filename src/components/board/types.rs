//! Board data structures: nodes, edges, and the requests that create or patch them.
//!
//! Field names on the serialized forms follow the export document schema
//! (`type`, `sourceId`, `targetId`), so these types double as the wire format.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset in model coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean length when used as an offset.
	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	pub fn scale(self, by: f64) -> Self {
		Self::new(self.x * by, self.y * by)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique within the graph and never reassigned.
	pub id: String,
	#[serde(default)]
	pub label: String,
	/// Free-form category tag. Drives the card color.
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Center of the card in model coordinates.
	pub position: Point,
}

/// A directed, annotated link between two distinct nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub id: String,
	#[serde(rename = "sourceId")]
	pub source_id: String,
	#[serde(rename = "targetId")]
	pub target_id: String,
	#[serde(default)]
	pub label: String,
	#[serde(rename = "type", default)]
	pub kind: String,
}

impl Edge {
	/// Whether `node_id` is either endpoint of this edge.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source_id == node_id || self.target_id == node_id
	}
}

/// Input for [`Graph::add_node`](super::graph::Graph::add_node).
///
/// A missing or empty `id` gets a generated one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewNode {
	pub id: Option<String>,
	pub label: String,
	pub kind: String,
	pub position: Point,
}

impl NewNode {
	pub fn new(label: impl Into<String>, position: Point) -> Self {
		Self {
			label: label.into(),
			position,
			..Default::default()
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = kind.into();
		self
	}
}

/// Partial update for a node. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	pub label: Option<String>,
	pub kind: Option<String>,
	pub position: Option<Point>,
}

impl NodePatch {
	pub fn position(position: Point) -> Self {
		Self {
			position: Some(position),
			..Default::default()
		}
	}
}

/// Annotation attached to an edge at creation time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeDetails {
	pub label: String,
	pub kind: String,
}

impl EdgeDetails {
	pub fn new(label: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			kind: kind.into(),
		}
	}
}

/// Partial update for an edge's annotation. Endpoints are immutable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgePatch {
	pub label: Option<String>,
	pub kind: Option<String>,
}

/// A deep, independent copy of a graph. This is also the export document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_serializes_with_document_field_names() {
		let edge = Edge {
			id: "edge-1".into(),
			source_id: "a".into(),
			target_id: "b".into(),
			label: "Budget sync".into(),
			kind: "handoff".into(),
		};
		let json = serde_json::to_value(&edge).unwrap();
		assert_eq!(json["sourceId"], "a");
		assert_eq!(json["targetId"], "b");
		assert_eq!(json["type"], "handoff");
		assert!(json.get("source_id").is_none());
	}

	#[test]
	fn node_label_and_type_default_when_missing() {
		let node: Node =
			serde_json::from_str(r#"{"id":"n","position":{"x":1.5,"y":-2}}"#).unwrap();
		assert_eq!(node.label, "");
		assert_eq!(node.kind, "");
		assert_eq!(node.position, Point::new(1.5, -2.0));
	}

	#[test]
	fn point_arithmetic() {
		let a = Point::new(20.0, 40.0);
		let b = Point::new(5.0, 10.0);
		assert_eq!(a - b, Point::new(15.0, 30.0));
		assert_eq!(a + b, Point::new(25.0, 50.0));
		assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
	}
}
