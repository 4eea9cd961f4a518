//! JSON export and import of a whole board.
//!
//! The document is exactly the graph snapshot:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "node-1", "label": "A", "type": "", "position": { "x": 0.0, "y": 0.0 } }],
//!   "edges": [{ "id": "edge-1", "sourceId": "node-1", "targetId": "node-2", "label": "", "type": "" }]
//! }
//! ```
//!
//! Export carries no timestamp or derived data, so two exports of an
//! unchanged graph are byte-identical. Import is all-or-nothing.

use log::info;

use super::error::GraphError;
use super::graph::Graph;
use super::types::GraphSnapshot;

/// Serializes the graph as a pretty-printed export document.
///
/// JSON has no encoding for NaN or infinity, so a node at a non-finite
/// position fails the export instead of being written as `null`.
pub fn export(graph: &Graph) -> Result<String, GraphError> {
	if let Some(node) = graph.nodes().iter().find(|n| !n.position.is_finite()) {
		return Err(GraphError::Unexportable(format!(
			"node `{}` has a non-finite position",
			node.id
		)));
	}
	serde_json::to_string_pretty(&graph.snapshot())
		.map_err(|e| GraphError::Unexportable(e.to_string()))
}

/// Parses and validates an export document into a new graph.
///
/// Any parse error or invariant violation (duplicate id, dangling or
/// self-referencing edge) rejects the whole document.
pub fn import(document: &str) -> Result<Graph, GraphError> {
	let snapshot: GraphSnapshot = serde_json::from_str(document)
		.map_err(|e| GraphError::MalformedSnapshot(e.to_string()))?;
	let graph = Graph::from_snapshot(snapshot)?;
	info!(
		"collab-board: imported {} nodes, {} edges",
		graph.node_count(),
		graph.edge_count()
	);
	Ok(graph)
}
