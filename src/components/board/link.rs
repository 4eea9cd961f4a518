//! Link mode: pick a source node, pick a target node, then annotate and commit.
//!
//! Selecting endpoints never touches the graph. Only [`LinkController::commit`]
//! mutates, so abandoning a selection at any point needs no cleanup.

use log::debug;

use super::error::GraphError;
use super::graph::Graph;
use super::types::{Edge, EdgeDetails};

/// Phase of the link-creation flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LinkState {
	/// Link mode is off. Node clicks belong to dragging and selection.
	#[default]
	Inactive,
	/// Link mode is on, waiting for a source node.
	Active,
	/// A source is chosen, waiting for a target.
	SourceSelected { source_id: String },
	/// Both endpoints chosen; the detail form is open.
	PendingDetails { source_id: String, target_id: String },
}

/// Drives [`LinkState`] transitions.
#[derive(Clone, Debug, Default)]
pub struct LinkController {
	state: LinkState,
}

impl LinkController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &LinkState {
		&self.state
	}

	/// Whether link mode is on (any state but `Inactive`).
	pub fn is_active(&self) -> bool {
		self.state != LinkState::Inactive
	}

	/// Whether the detail form should be shown.
	pub fn is_pending(&self) -> bool {
		matches!(self.state, LinkState::PendingDetails { .. })
	}

	/// The chosen source node, in `SourceSelected` or `PendingDetails`.
	pub fn source_id(&self) -> Option<&str> {
		match &self.state {
			LinkState::SourceSelected { source_id }
			| LinkState::PendingDetails { source_id, .. } => Some(source_id),
			_ => None,
		}
	}

	/// Flips link mode. Turning it off drops any in-progress selection.
	/// Returns whether link mode is now on.
	pub fn toggle(&mut self) -> bool {
		self.set_active(!self.is_active());
		self.is_active()
	}

	pub fn set_active(&mut self, on: bool) {
		self.state = match (on, &self.state) {
			(false, _) => LinkState::Inactive,
			(true, LinkState::Inactive) => LinkState::Active,
			(true, _) => return,
		};
		debug!("collab-board: link mode {}", if on { "on" } else { "off" });
	}

	/// Feeds a node click into the flow. Clicks are ignored while link mode
	/// is off or while the detail form is open.
	pub fn click_node(&mut self, node_id: &str) -> &LinkState {
		let next = match &self.state {
			LinkState::Active => Some(LinkState::SourceSelected {
				source_id: node_id.to_string(),
			}),
			LinkState::SourceSelected { source_id } if source_id == node_id => {
				Some(LinkState::Active)
			}
			LinkState::SourceSelected { source_id } => Some(LinkState::PendingDetails {
				source_id: source_id.clone(),
				target_id: node_id.to_string(),
			}),
			LinkState::Inactive | LinkState::PendingDetails { .. } => None,
		};
		if let Some(next) = next {
			debug!("collab-board: link {:?} -> {:?}", self.state, next);
			self.state = next;
		}
		&self.state
	}

	/// Creates the pending edge and returns to `Active`.
	///
	/// Returns `Ok(None)` when no edge is pending. On a graph error the
	/// selection is still dropped.
	pub fn commit(
		&mut self,
		graph: &mut Graph,
		details: EdgeDetails,
	) -> Result<Option<Edge>, GraphError> {
		let LinkState::PendingDetails {
			source_id,
			target_id,
		} = &self.state
		else {
			return Ok(None);
		};
		let result = graph.add_edge(source_id, target_id, details);
		self.state = LinkState::Active;
		result.map(Some)
	}

	/// Drops the pending selection without mutating anything. Link mode stays on.
	pub fn cancel(&mut self) {
		if self.is_active() {
			self.state = LinkState::Active;
		}
	}
}
