//! Errors raised by graph operations and snapshot import.

use thiserror::Error;

/// Which collection an id was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
	Node,
	Edge,
}

impl std::fmt::Display for EntityKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EntityKind::Node => f.write_str("node"),
			EntityKind::Edge => f.write_str("edge"),
		}
	}
}

/// A rejected graph operation. Every variant is recoverable: the graph is left
/// exactly as it was before the failing call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
	/// The referenced id does not exist.
	#[error("{kind} `{id}` not found")]
	NotFound { kind: EntityKind, id: String },

	/// An edge endpoint does not resolve to a live node.
	#[error("edge endpoint `{0}` is not a live node")]
	InvalidEndpoint(String),

	/// Source and target of an edge are the same node.
	#[error("edge would connect node `{0}` to itself")]
	SelfLoop(String),

	/// An import document failed to parse or violates the graph invariants.
	#[error("malformed snapshot: {0}")]
	MalformedSnapshot(String),

	/// The graph holds data the export document cannot represent.
	#[error("cannot export board: {0}")]
	Unexportable(String),
}

impl GraphError {
	pub(crate) fn node_not_found(id: &str) -> Self {
		GraphError::NotFound {
			kind: EntityKind::Node,
			id: id.to_string(),
		}
	}

	pub(crate) fn edge_not_found(id: &str) -> Self {
		GraphError::NotFound {
			kind: EntityKind::Edge,
			id: id.to_string(),
		}
	}
}
