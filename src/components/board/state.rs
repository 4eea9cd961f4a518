//! Board state and input handling.
//!
//! [`BoardState`] owns the graph, the viewport transform and both
//! controllers, and turns raw screen-space pointer and keyboard input into
//! controller calls. It holds no DOM handles, so the whole interaction model
//! can be driven from tests.

use log::debug;

use super::config::BoardConfig;
use super::drag::DragController;
use super::error::GraphError;
use super::graph::Graph;
use super::layout::{self, RelaxParams};
use super::link::LinkController;
use super::scale::ScaleConfig;
use super::snapshot;
use super::surface::{self, Highlight, Scene, ViewTransform};
use super::types::{Edge, EdgeDetails, EdgePatch, NewNode, Node, NodePatch, Point};

/// What the user last clicked outside link mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Node(String),
	Edge(String),
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Keyboard shortcuts understood by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
	/// Abandon drag and link selection, clear selection, leave link mode.
	Escape,
	ToggleLinkMode,
	AddNode,
	DeleteSelection,
	Save,
}

impl Shortcut {
	/// Maps a `KeyboardEvent.key` value plus Ctrl/Cmd state to a shortcut.
	pub fn from_key(key: &str, ctrl_or_meta: bool) -> Option<Self> {
		match (key, ctrl_or_meta) {
			("Escape", _) => Some(Shortcut::Escape),
			("Delete" | "Backspace", false) => Some(Shortcut::DeleteSelection),
			("s" | "S", true) => Some(Shortcut::Save),
			("l" | "L", false) => Some(Shortcut::ToggleLinkMode),
			("a" | "A", false) => Some(Shortcut::AddNode),
			_ => None,
		}
	}
}

/// The starter board shown when nothing was saved or supplied.
pub fn seed_graph() -> Graph {
	let mut graph = Graph::new();
	let intake = graph
		.add_node(NewNode::new("Order intake", Point::new(-260.0, -100.0)).with_kind("operations"))
		.id;
	let budget = graph
		.add_node(NewNode::new("Budget review", Point::new(0.0, -100.0)).with_kind("finance"))
		.id;
	let pick = graph
		.add_node(NewNode::new("Warehouse pick", Point::new(-260.0, 100.0)).with_kind("warehouse"))
		.id;
	let dispatch = graph
		.add_node(NewNode::new("Fleet dispatch", Point::new(260.0, 100.0)).with_kind("logistics"))
		.id;
	let seeded = [
		(&intake, &budget, "Budget sync", "handoff"),
		(&intake, &pick, "Pick list", "dependency"),
		(&pick, &dispatch, "Ready to ship", "handoff"),
	];
	for (source, target, label, kind) in seeded {
		// Endpoints were created just above.
		let _ = graph.add_edge(source, target, EdgeDetails::new(label, kind));
	}
	graph
}

/// Everything the board canvas needs between events.
pub struct BoardState {
	pub graph: Graph,
	pub transform: ViewTransform,
	pub drag: DragController,
	pub link: LinkController,
	pub pan: PanState,
	pub selection: Selection,
	pub config: BoardConfig,
	pub scale: ScaleConfig,
	pub width: f64,
	pub height: f64,
	/// The scene must be re-projected and redrawn.
	dirty: bool,
	/// The graph changed since the last save.
	unsaved: bool,
	/// The active drag has moved its node at least once.
	drag_moved: bool,
}

impl BoardState {
	pub fn new(graph: Graph, config: BoardConfig, width: f64, height: f64) -> Self {
		let config = config.sanitized();
		let mut drag = DragController::new();
		drag.set_snap(config.snap());
		Self {
			graph,
			transform: ViewTransform::centered(width, height),
			drag,
			link: LinkController::new(),
			pan: PanState::default(),
			selection: Selection::None,
			config,
			scale: ScaleConfig::default(),
			width,
			height,
			dirty: true,
			unsaved: false,
			drag_moved: false,
		}
	}

	/// Projects the current graph and transform for drawing or hit-testing.
	pub fn scene(&self) -> Scene {
		let highlight = Highlight {
			selected_node: match &self.selection {
				Selection::Node(id) => Some(id.as_str()),
				_ => None,
			},
			selected_edge: match &self.selection {
				Selection::Edge(id) => Some(id.as_str()),
				_ => None,
			},
			link_source: self.link.source_id(),
		};
		surface::project(
			self.graph.nodes(),
			self.graph.edges(),
			&self.transform,
			&self.scale,
			&highlight,
		)
	}

	/// Id of the topmost node under a screen point.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<String> {
		self.scene()
			.node_at(Point::new(sx, sy))
			.map(|n| n.id.clone())
	}

	pub fn screen_to_model(&self, sx: f64, sy: f64) -> Point {
		self.transform.to_model(Point::new(sx, sy))
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> Result<(), GraphError> {
		self.dirty = true;
		let screen = Point::new(sx, sy);
		let scene = self.scene();
		let hit_node = scene.node_at(screen).map(|n| n.id.clone());

		if self.link.is_active() {
			if let Some(id) = hit_node {
				self.selection = Selection::None;
				self.link.click_node(&id);
			}
			return Ok(());
		}

		// A second press mid-drag changes nothing.
		if self.drag.is_dragging() {
			return Ok(());
		}

		if let Some(id) = hit_node {
			let pointer = self.transform.to_model(screen);
			if self.drag.pointer_down(&self.graph, &id, pointer)? {
				self.selection = Selection::Node(id);
				self.drag_moved = false;
			}
			return Ok(());
		}

		if let Some(edge) = scene.edge_at(screen, self.scale.edge.hit_tolerance) {
			self.selection = Selection::Edge(edge.id.clone());
			return Ok(());
		}

		self.selection = Selection::None;
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
		Ok(())
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) -> Result<(), GraphError> {
		if self.drag.is_dragging() {
			self.dirty = true;
			let pointer = self.transform.to_model(Point::new(sx, sy));
			if self.drag.pointer_move(&mut self.graph, pointer)?.is_some() {
				self.drag_moved = true;
			}
		} else if self.pan.active {
			self.dirty = true;
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
		Ok(())
	}

	pub fn pointer_up(&mut self) {
		self.end_drag();
		self.pan.active = false;
	}

	/// Pointer left the canvas: treated as a cancelled drag. The node stays
	/// where the last move put it.
	pub fn pointer_leave(&mut self) {
		self.end_drag();
		self.pan.active = false;
	}

	/// Stops any drag. A node that moved keeps its position and is flagged
	/// for saving, however the drag ended.
	fn end_drag(&mut self) {
		if self.drag.pointer_up().is_some() && self.drag_moved {
			self.unsaved = true;
		}
		self.drag_moved = false;
	}

	/// Zooms around the cursor. Positive `delta_y` zooms out.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			1.0 / self.config.zoom_step
		} else {
			self.config.zoom_step
		};
		self.transform.zoom_at(
			Point::new(sx, sy),
			factor,
			self.config.min_zoom,
			self.config.max_zoom,
		);
		self.dirty = true;
	}

	/// Returns whether link mode is now on.
	pub fn toggle_link_mode(&mut self) -> bool {
		self.end_drag();
		self.selection = Selection::None;
		self.dirty = true;
		self.link.toggle()
	}

	/// Commits the pending link with the form's label and type.
	pub fn commit_link(&mut self, details: EdgeDetails) -> Result<Option<Edge>, GraphError> {
		self.dirty = true;
		let edge = self.link.commit(&mut self.graph, details)?;
		if edge.is_some() {
			self.unsaved = true;
		}
		Ok(edge)
	}

	pub fn cancel_link(&mut self) {
		self.link.cancel();
		self.dirty = true;
	}

	/// Adds a card in the middle of the viewport and selects it.
	pub fn add_node(&mut self, label: &str) -> Node {
		let mut center = self.screen_to_model(self.width / 2.0, self.height / 2.0);
		if let Some(grid) = self.config.snap() {
			center = Point::new(
				(center.x / grid).round() * grid,
				(center.y / grid).round() * grid,
			);
		}
		let node = self.graph.add_node(NewNode::new(label, center));
		self.selection = Selection::Node(node.id.clone());
		self.unsaved = true;
		self.dirty = true;
		node
	}

	/// Deletes the selected node (with its edges) or edge.
	/// Returns whether anything was removed.
	pub fn delete_selection(&mut self) -> Result<bool, GraphError> {
		match std::mem::take(&mut self.selection) {
			Selection::None => return Ok(false),
			Selection::Node(id) => {
				if self.drag.node_id() == Some(id.as_str()) {
					self.drag.cancel();
					self.drag_moved = false;
				}
				self.graph.remove_node(&id)?;
			}
			Selection::Edge(id) => self.graph.remove_edge(&id)?,
		}
		self.unsaved = true;
		self.dirty = true;
		Ok(true)
	}

	/// Label and type of the selected node or edge, for the edit form.
	pub fn selection_details(&self) -> Option<EdgeDetails> {
		match &self.selection {
			Selection::None => None,
			Selection::Node(id) => self
				.graph
				.node(id)
				.map(|n| EdgeDetails::new(n.label.clone(), n.kind.clone())),
			Selection::Edge(id) => self
				.graph
				.edge(id)
				.map(|e| EdgeDetails::new(e.label.clone(), e.kind.clone())),
		}
	}

	/// Relabels the selected node or edge. Returns whether anything was
	/// selected.
	pub fn edit_selection(&mut self, label: &str, kind: &str) -> Result<bool, GraphError> {
		match &self.selection {
			Selection::None => return Ok(false),
			Selection::Node(id) => {
				let patch = NodePatch {
					label: Some(label.to_string()),
					kind: Some(kind.to_string()),
					position: None,
				};
				self.graph.update_node(id, patch)?;
			}
			Selection::Edge(id) => {
				let patch = EdgePatch {
					label: Some(label.to_string()),
					kind: Some(kind.to_string()),
				};
				self.graph.update_edge(id, patch)?;
			}
		}
		self.unsaved = true;
		self.dirty = true;
		Ok(true)
	}

	/// Abandons drag and link selection, leaves link mode and clears selection.
	pub fn escape(&mut self) {
		self.end_drag();
		self.pan.active = false;
		self.link.set_active(false);
		self.selection = Selection::None;
		self.dirty = true;
	}

	pub fn arrange(&mut self) -> Result<(), GraphError> {
		layout::arrange_grid(&mut self.graph, self.config.arrange_spacing())?;
		self.unsaved = true;
		self.dirty = true;
		Ok(())
	}

	pub fn relax(&mut self) -> Result<(), GraphError> {
		let params: RelaxParams = self.config.relax_params();
		layout::relax(&mut self.graph, &params)?;
		self.unsaved = true;
		self.dirty = true;
		Ok(())
	}

	/// Swaps in a whole new graph, dropping any in-progress interaction.
	pub fn replace_graph(&mut self, graph: Graph) {
		self.drag.cancel();
		self.link.cancel();
		self.pan.active = false;
		self.selection = Selection::None;
		self.graph = graph;
		self.unsaved = true;
		self.dirty = true;
		debug!(
			"collab-board: graph replaced ({} nodes, {} edges)",
			self.graph.node_count(),
			self.graph.edge_count()
		);
	}

	/// Replaces the graph with an imported document. On error the current
	/// graph is untouched.
	pub fn import_json(&mut self, document: &str) -> Result<(), GraphError> {
		let graph = snapshot::import(document)?;
		self.replace_graph(graph);
		Ok(())
	}

	pub fn export_json(&self) -> Result<String, GraphError> {
		snapshot::export(&self.graph)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.dirty = true;
	}

	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	/// Whether a redraw is due. Clears the flag.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}

	/// Whether the graph changed since the last call. Clears the flag.
	pub fn take_unsaved(&mut self) -> bool {
		std::mem::take(&mut self.unsaved)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::board::link::LinkState;

	/// 800x600 viewport, so model (0, 0) sits at screen (400, 300).
	fn state_with(nodes: &[(&str, f64, f64)]) -> (BoardState, Vec<String>) {
		let mut graph = Graph::new();
		let ids = nodes
			.iter()
			.map(|(label, x, y)| graph.add_node(NewNode::new(*label, Point::new(*x, *y))).id)
			.collect();
		(BoardState::new(graph, BoardConfig::default(), 800.0, 600.0), ids)
	}

	fn screen(state: &BoardState, x: f64, y: f64) -> (f64, f64) {
		let p = state.transform.to_screen(Point::new(x, y));
		(p.x, p.y)
	}

	#[test]
	fn dragging_a_card_moves_it_in_model_space() {
		let (mut state, ids) = state_with(&[("A", 0.0, 0.0)]);
		state.transform.k = 2.0;
		let (sx, sy) = screen(&state, 0.0, 0.0);
		state.pointer_down(sx, sy).unwrap();
		state.pointer_move(sx + 40.0, sy + 80.0).unwrap();
		state.pointer_up();
		assert_eq!(state.graph.node(&ids[0]).unwrap().position, Point::new(20.0, 40.0));
		assert!(state.take_unsaved());
		assert_eq!(state.selection, Selection::Node(ids[0].clone()));
	}

	#[test]
	fn click_without_move_does_not_mark_unsaved() {
		let (mut state, _) = state_with(&[("A", 0.0, 0.0)]);
		let (sx, sy) = screen(&state, 0.0, 0.0);
		state.pointer_down(sx, sy).unwrap();
		state.pointer_up();
		assert!(!state.take_unsaved());
	}

	#[test]
	fn background_drag_pans() {
		let (mut state, ids) = state_with(&[("A", 0.0, 0.0)]);
		state.pointer_down(10.0, 10.0).unwrap();
		state.pointer_move(60.0, 30.0).unwrap();
		state.pointer_up();
		assert_eq!(state.transform.x, 450.0);
		assert_eq!(state.transform.y, 320.0);
		assert_eq!(state.graph.node(&ids[0]).unwrap().position, Point::new(0.0, 0.0));
		assert_eq!(state.selection, Selection::None);
	}

	#[test]
	fn pointer_leave_ends_drag_at_last_position() {
		let (mut state, ids) = state_with(&[("A", 0.0, 0.0)]);
		let (sx, sy) = screen(&state, 0.0, 0.0);
		state.pointer_down(sx, sy).unwrap();
		state.pointer_move(sx + 5.0, sy).unwrap();
		state.pointer_leave();
		assert!(!state.drag.is_dragging());
		state.pointer_move(sx + 100.0, sy).unwrap();
		assert_eq!(state.graph.node(&ids[0]).unwrap().position, Point::new(5.0, 0.0));
	}

	#[test]
	fn link_mode_clicks_select_endpoints_instead_of_dragging() {
		let (mut state, ids) = state_with(&[("A", -200.0, 0.0), ("B", 200.0, 0.0)]);
		assert!(state.toggle_link_mode());
		let (ax, ay) = screen(&state, -200.0, 0.0);
		let (bx, by) = screen(&state, 200.0, 0.0);
		state.pointer_down(ax, ay).unwrap();
		assert!(!state.drag.is_dragging());
		state.pointer_up();
		state.pointer_down(bx, by).unwrap();
		assert_eq!(
			state.link.state(),
			&LinkState::PendingDetails {
				source_id: ids[0].clone(),
				target_id: ids[1].clone(),
			}
		);
		let edge = state
			.commit_link(EdgeDetails::new("Budget sync", "handoff"))
			.unwrap()
			.unwrap();
		assert_eq!((edge.source_id, edge.target_id), (ids[0].clone(), ids[1].clone()));
		assert!(state.link.is_active());
		assert!(state.take_unsaved());
	}

	#[test]
	fn clicking_an_edge_selects_it_for_deletion() {
		let (mut state, ids) = state_with(&[("A", -200.0, 0.0), ("B", 200.0, 0.0)]);
		let edge = state
			.graph
			.add_edge(&ids[0], &ids[1], EdgeDetails::default())
			.unwrap();
		let (mx, my) = screen(&state, 0.0, 0.0);
		state.pointer_down(mx, my + 2.0).unwrap();
		assert_eq!(state.selection, Selection::Edge(edge.id.clone()));
		assert!(state.delete_selection().unwrap());
		assert_eq!(state.graph.edge_count(), 0);
		assert_eq!(state.graph.node_count(), 2);
		assert!(!state.delete_selection().unwrap());
	}

	#[test]
	fn deleting_a_node_during_drag_cancels_the_drag() {
		let (mut state, ids) = state_with(&[("A", 0.0, 0.0)]);
		let (sx, sy) = screen(&state, 0.0, 0.0);
		state.pointer_down(sx, sy).unwrap();
		assert!(state.delete_selection().unwrap());
		assert!(!state.drag.is_dragging());
		assert!(state.pointer_move(sx + 10.0, sy).is_ok());
		assert!(state.graph.node(&ids[0]).is_none());
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let (mut state, _) = state_with(&[]);
		for _ in 0..200 {
			state.wheel(400.0, 300.0, -1.0);
		}
		assert_eq!(state.transform.k, state.config.max_zoom);
		for _ in 0..200 {
			state.wheel(400.0, 300.0, 1.0);
		}
		assert_eq!(state.transform.k, state.config.min_zoom);
	}

	#[test]
	fn add_node_lands_in_viewport_center() {
		let (mut state, _) = state_with(&[]);
		state.transform.x += 100.0;
		let node = state.add_node("New card");
		assert_eq!(node.position, Point::new(-100.0, 0.0));
		assert_eq!(node.kind, "");
		assert_eq!(state.selection, Selection::Node(node.id));
	}

	#[test]
	fn abandoning_a_moved_drag_still_flags_it_for_saving() {
		for abandon in [BoardState::escape as fn(&mut BoardState), |s: &mut BoardState| {
			s.toggle_link_mode();
		}] {
			let (mut state, ids) = state_with(&[("A", 0.0, 0.0)]);
			let (sx, sy) = screen(&state, 0.0, 0.0);
			state.pointer_down(sx, sy).unwrap();
			state.pointer_move(sx + 50.0, sy).unwrap();
			abandon(&mut state);
			state.pointer_up();
			assert!(!state.drag.is_dragging());
			assert_eq!(state.graph.node(&ids[0]).unwrap().position, Point::new(50.0, 0.0));
			assert!(state.take_unsaved());
		}
	}

	#[test]
	fn second_press_during_drag_keeps_selection_on_dragged_card() {
		let (mut state, ids) = state_with(&[("A", -200.0, 0.0), ("B", 200.0, 0.0)]);
		let (ax, ay) = screen(&state, -200.0, 0.0);
		let (bx, by) = screen(&state, 200.0, 0.0);
		state.pointer_down(ax, ay).unwrap();
		state.pointer_down(bx, by).unwrap();
		assert_eq!(state.selection, Selection::Node(ids[0].clone()));
		assert_eq!(state.drag.node_id(), Some(ids[0].as_str()));
		state.pointer_down(400.0, 20.0).unwrap();
		assert!(!state.pan.active);
		assert_eq!(state.selection, Selection::Node(ids[0].clone()));
	}

	#[test]
	fn editing_selected_node_and_edge() {
		let (mut state, ids) = state_with(&[("A", -200.0, 0.0), ("B", 200.0, 0.0)]);
		let edge = state
			.graph
			.add_edge(&ids[0], &ids[1], EdgeDetails::new("old", "dependency"))
			.unwrap();
		assert!(!state.edit_selection("x", "y").unwrap());

		let node = state.add_node("New card");
		assert_eq!(state.selection_details(), Some(EdgeDetails::new("New card", "")));
		assert!(state.edit_selection("Budget review", "finance").unwrap());
		let edited = state.graph.node(&node.id).unwrap();
		assert_eq!((edited.label.as_str(), edited.kind.as_str()), ("Budget review", "finance"));
		assert_eq!(edited.position, node.position);
		assert!(state.take_unsaved());

		state.selection = Selection::Edge(edge.id.clone());
		assert!(state.edit_selection("Budget sync", "handoff").unwrap());
		let edited = state.graph.edge(&edge.id).unwrap();
		assert_eq!((edited.label.as_str(), edited.kind.as_str()), ("Budget sync", "handoff"));
		assert_eq!((edited.source_id.as_str(), edited.target_id.as_str()), (ids[0].as_str(), ids[1].as_str()));
	}

	#[test]
	fn editing_a_vanished_selection_reports_not_found() {
		let (mut state, _) = state_with(&[]);
		state.selection = Selection::Edge("edge-9".into());
		assert!(matches!(
			state.edit_selection("a", "b"),
			Err(GraphError::NotFound { .. })
		));
		assert!(!state.take_unsaved());
	}

	#[test]
	fn out_of_range_config_cannot_break_zoom() {
		let config = BoardConfig {
			min_zoom: 5.0,
			..Default::default()
		};
		let mut state = BoardState::new(Graph::new(), config, 800.0, 600.0);
		state.wheel(400.0, 300.0, -1.0);
		assert!(state.transform.k >= 1.0);

		let config = BoardConfig {
			min_zoom: 0.0,
			zoom_step: 1e300,
			..Default::default()
		};
		let mut state = BoardState::new(Graph::new(), config, 800.0, 600.0);
		for _ in 0..10 {
			state.wheel(400.0, 300.0, 1.0);
		}
		assert!(state.transform.k > 0.0);
		let node = state.add_node("New card");
		assert!(node.position.is_finite());
		assert!(snapshot::import(&state.export_json().unwrap()).is_ok());
	}

	#[test]
	fn escape_leaves_link_mode_and_clears_selection() {
		let (mut state, ids) = state_with(&[("A", 0.0, 0.0)]);
		state.toggle_link_mode();
		let (sx, sy) = screen(&state, 0.0, 0.0);
		state.pointer_down(sx, sy).unwrap();
		assert_eq!(state.link.source_id(), Some(ids[0].as_str()));
		state.escape();
		assert!(!state.link.is_active());
		assert_eq!(state.selection, Selection::None);
	}

	#[test]
	fn failed_import_keeps_current_board() {
		let (mut state, _) = state_with(&[("A", 0.0, 0.0)]);
		let before = state.graph.snapshot();
		let bad = r#"{"nodes":[],"edges":[{"id":"e","sourceId":"x","targetId":"y"}]}"#;
		assert!(matches!(
			state.import_json(bad),
			Err(GraphError::MalformedSnapshot(_))
		));
		assert_eq!(state.graph.snapshot(), before);
	}

	#[test]
	fn import_replaces_board_and_resets_interaction() {
		let (mut state, _) = state_with(&[("A", 0.0, 0.0)]);
		state.toggle_link_mode();
		let document = snapshot::export(&seed_graph()).unwrap();
		state.import_json(&document).unwrap();
		assert_eq!(state.graph.snapshot(), seed_graph().snapshot());
		assert_eq!(state.link.state(), &LinkState::Active);
	}

	#[test]
	fn dirty_flag_clears_after_take() {
		let (mut state, _) = state_with(&[]);
		assert!(state.take_dirty());
		assert!(!state.take_dirty());
		state.wheel(0.0, 0.0, 1.0);
		assert!(state.take_dirty());
	}

	#[test]
	fn seed_is_a_valid_board() {
		let seed = seed_graph();
		assert_eq!(seed.node_count(), 4);
		assert_eq!(seed.edge_count(), 3);
	}

	#[test]
	fn shortcuts() {
		assert_eq!(Shortcut::from_key("Escape", false), Some(Shortcut::Escape));
		assert_eq!(Shortcut::from_key("l", false), Some(Shortcut::ToggleLinkMode));
		assert_eq!(Shortcut::from_key("s", true), Some(Shortcut::Save));
		assert_eq!(Shortcut::from_key("s", false), None);
		assert_eq!(Shortcut::from_key("Backspace", false), Some(Shortcut::DeleteSelection));
		assert_eq!(Shortcut::from_key("a", true), None);
	}
}
