//! Node drag tracking.
//!
//! A drag remembers where the pointer and the node started. Every move
//! recomputes the node position from those two origins and the current
//! pointer, so replaying a pointer position always lands the node in the
//! same place no matter how many moves came before it.
//!
//! All pointer coordinates here are in model space; the caller inverts the
//! viewport transform first.

use log::debug;

use super::error::GraphError;
use super::graph::Graph;
use super::types::{Node, NodePatch, Point};

/// Current phase of the drag gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
	#[default]
	Idle,
	Dragging {
		node_id: String,
		origin_pointer: Point,
		origin_position: Point,
	},
}

/// Tracks at most one in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	state: DragState,
	/// Grid step applied to the drag delta, if snapping is on.
	snap: Option<f64>,
}

impl DragController {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snaps the drag delta to multiples of `grid` model units.
	pub fn with_snap(grid: f64) -> Self {
		Self {
			state: DragState::Idle,
			snap: (grid > 0.0).then_some(grid),
		}
	}

	pub fn set_snap(&mut self, grid: Option<f64>) {
		self.snap = grid.filter(|g| *g > 0.0);
	}

	pub fn state(&self) -> &DragState {
		&self.state
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.state, DragState::Dragging { .. })
	}

	/// Id of the node being dragged, if any.
	pub fn node_id(&self) -> Option<&str> {
		match &self.state {
			DragState::Dragging { node_id, .. } => Some(node_id),
			DragState::Idle => None,
		}
	}

	/// Starts dragging `node_id`. Ignored (returns `Ok(false)`) while another
	/// drag is active.
	pub fn pointer_down(
		&mut self,
		graph: &Graph,
		node_id: &str,
		pointer: Point,
	) -> Result<bool, GraphError> {
		if self.is_dragging() {
			return Ok(false);
		}
		let node = graph
			.node(node_id)
			.ok_or_else(|| GraphError::node_not_found(node_id))?;
		self.state = DragState::Dragging {
			node_id: node.id.clone(),
			origin_pointer: pointer,
			origin_position: node.position,
		};
		debug!("collab-board: drag start `{}`", node_id);
		Ok(true)
	}

	/// Where the dragged node belongs for `pointer`, without touching the graph.
	pub fn position_for(&self, pointer: Point) -> Option<Point> {
		match &self.state {
			DragState::Dragging {
				origin_pointer,
				origin_position,
				..
			} => {
				let delta = pointer - *origin_pointer;
				let delta = match self.snap {
					Some(grid) => Point::new(snap(delta.x, grid), snap(delta.y, grid)),
					None => delta,
				};
				Some(*origin_position + delta)
			}
			DragState::Idle => None,
		}
	}

	/// Moves the dragged node under `pointer`. Returns `Ok(None)` when idle.
	///
	/// If the node vanished mid-drag the drag is abandoned and the
	/// `NotFound` is passed back.
	pub fn pointer_move(
		&mut self,
		graph: &mut Graph,
		pointer: Point,
	) -> Result<Option<Node>, GraphError> {
		let (Some(node_id), Some(position)) = (self.node_id(), self.position_for(pointer)) else {
			return Ok(None);
		};
		match graph.update_node(node_id, NodePatch::position(position)) {
			Ok(node) => Ok(Some(node)),
			Err(e) => {
				self.state = DragState::Idle;
				Err(e)
			}
		}
	}

	/// Ends the drag, returning the id of the node that was being dragged.
	pub fn pointer_up(&mut self) -> Option<String> {
		match std::mem::take(&mut self.state) {
			DragState::Dragging { node_id, .. } => {
				debug!("collab-board: drag end `{}`", node_id);
				Some(node_id)
			}
			DragState::Idle => None,
		}
	}

	/// Abandons the drag. The node keeps its last computed position.
	pub fn cancel(&mut self) {
		self.state = DragState::Idle;
	}
}

fn snap(value: f64, grid: f64) -> f64 {
	(value / grid).round() * grid
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::components::board::types::NewNode;

	fn board() -> (Graph, String, String) {
		let mut graph = Graph::new();
		let a = graph.add_node(NewNode::new("A", Point::new(0.0, 0.0))).id;
		let b = graph.add_node(NewNode::new("B", Point::new(100.0, 100.0))).id;
		(graph, a, b)
	}

	#[test]
	fn drag_moves_node_by_pointer_delta() {
		let (mut graph, a, _) = board();
		let mut drag = DragController::new();
		assert!(drag.pointer_down(&graph, &a, Point::new(10.0, 10.0)).unwrap());
		let moved = drag
			.pointer_move(&mut graph, Point::new(30.0, 50.0))
			.unwrap()
			.unwrap();
		assert_eq!(moved.position, Point::new(20.0, 40.0));
		assert_eq!(drag.pointer_up(), Some(a.clone()));
		assert_eq!(drag.state(), &DragState::Idle);
		assert_eq!(graph.node(&a).unwrap().position, Point::new(20.0, 40.0));
	}

	#[test]
	fn second_pointer_down_is_ignored_while_dragging() {
		let (graph, a, b) = board();
		let mut drag = DragController::new();
		drag.pointer_down(&graph, &a, Point::default()).unwrap();
		assert!(!drag.pointer_down(&graph, &b, Point::default()).unwrap());
		assert_eq!(drag.node_id(), Some(a.as_str()));
	}

	#[test]
	fn move_while_idle_does_nothing() {
		let (mut graph, _, _) = board();
		let before = graph.snapshot();
		let mut drag = DragController::new();
		assert_eq!(drag.pointer_move(&mut graph, Point::new(5.0, 5.0)), Ok(None));
		assert_eq!(graph.snapshot(), before);
		assert_eq!(drag.pointer_up(), None);
	}

	#[test]
	fn cancel_keeps_last_position() {
		let (mut graph, a, _) = board();
		let mut drag = DragController::new();
		drag.pointer_down(&graph, &a, Point::default()).unwrap();
		drag.pointer_move(&mut graph, Point::new(7.0, -3.0)).unwrap();
		drag.cancel();
		assert!(!drag.is_dragging());
		assert_eq!(graph.node(&a).unwrap().position, Point::new(7.0, -3.0));
	}

	#[test]
	fn deleted_node_ends_the_drag() {
		let (mut graph, a, _) = board();
		let mut drag = DragController::new();
		drag.pointer_down(&graph, &a, Point::default()).unwrap();
		graph.remove_node(&a).unwrap();
		assert!(matches!(
			drag.pointer_move(&mut graph, Point::new(1.0, 1.0)),
			Err(GraphError::NotFound { .. })
		));
		assert!(!drag.is_dragging());
	}

	#[test]
	fn pointer_down_on_unknown_node_fails() {
		let (graph, _, _) = board();
		let mut drag = DragController::new();
		assert!(drag.pointer_down(&graph, "ghost", Point::default()).is_err());
		assert!(!drag.is_dragging());
	}

	#[test]
	fn snapping_rounds_the_delta() {
		let (mut graph, _, b) = board();
		let mut drag = DragController::with_snap(24.0);
		drag.pointer_down(&graph, &b, Point::default()).unwrap();
		let node = drag
			.pointer_move(&mut graph, Point::new(13.0, 35.0))
			.unwrap()
			.unwrap();
		assert_eq!(node.position, Point::new(124.0, 124.0));
	}

	proptest! {
		#[test]
		fn final_position_ignores_intermediate_moves(
			origin in (-500.0..500.0f64, -500.0..500.0f64),
			path in proptest::collection::vec((-500.0..500.0f64, -500.0..500.0f64), 0..12),
			end in (-500.0..500.0f64, -500.0..500.0f64),
		) {
			let (mut direct, a, _) = board();
			let mut replayed = direct.clone();
			let origin = Point::new(origin.0, origin.1);
			let end = Point::new(end.0, end.1);

			let mut drag = DragController::new();
			drag.pointer_down(&direct, &a, origin).unwrap();
			drag.pointer_move(&mut direct, end).unwrap();

			let mut wandering = DragController::new();
			wandering.pointer_down(&replayed, &a, origin).unwrap();
			for (x, y) in path {
				wandering.pointer_move(&mut replayed, Point::new(x, y)).unwrap();
			}
			wandering.pointer_move(&mut replayed, end).unwrap();

			prop_assert_eq!(
				direct.node(&a).unwrap().position,
				replayed.node(&a).unwrap().position
			);
		}
	}
}
