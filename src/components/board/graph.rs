//! The board's graph aggregate.
//!
//! [`Graph`] exclusively owns every node and edge. Callers get clones or
//! snapshots back, never references that outlive a call, and every mutation
//! either fully applies or returns an error before touching anything.
//!
//! Invariants held after every public call:
//! - node ids are unique, edge ids are unique
//! - every edge's endpoints resolve to live nodes
//! - no edge connects a node to itself

use log::debug;

use super::error::GraphError;
use super::types::{Edge, EdgeDetails, EdgePatch, GraphSnapshot, NewNode, Node, NodePatch};

const NODE_PREFIX: &str = "node";
const EDGE_PREFIX: &str = "edge";

/// Nodes and edges of one board, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_node: u64,
	next_edge: u64,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a graph from a snapshot, rejecting any invariant violation.
	///
	/// Nothing is constructed unless the whole snapshot is valid.
	pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
		let mut graph = Graph::new();
		for node in snapshot.nodes {
			if graph.node(&node.id).is_some() {
				return Err(GraphError::MalformedSnapshot(format!(
					"duplicate node id `{}`",
					node.id
				)));
			}
			if node.id.is_empty() {
				return Err(GraphError::MalformedSnapshot("node with empty id".into()));
			}
			if !node.position.is_finite() {
				return Err(GraphError::MalformedSnapshot(format!(
					"node `{}` has a non-finite position",
					node.id
				)));
			}
			graph.claim_node_id(&node.id);
			graph.nodes.push(node);
		}
		for edge in snapshot.edges {
			if graph.edge(&edge.id).is_some() {
				return Err(GraphError::MalformedSnapshot(format!(
					"duplicate edge id `{}`",
					edge.id
				)));
			}
			graph
				.check_endpoints(&edge.source_id, &edge.target_id)
				.map_err(|e| {
					GraphError::MalformedSnapshot(format!("edge `{}`: {}", edge.id, e))
				})?;
			graph.claim_edge_id(&edge.id);
			graph.edges.push(edge);
		}
		Ok(graph)
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Edges that have `node_id` as either endpoint.
	pub fn edges_of<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		self.edges.iter().filter(move |e| e.touches(node_id))
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Inserts a node, generating an id when none (or an already-taken one) is given.
	pub fn add_node(&mut self, partial: NewNode) -> Node {
		let id = match partial.id {
			Some(id) if !id.is_empty() && self.node(&id).is_none() => {
				self.claim_node_id(&id);
				id
			}
			Some(taken) => {
				let fresh = self.fresh_node_id();
				debug!("collab-board: node id `{}` unavailable, using `{}`", taken, fresh);
				fresh
			}
			None => self.fresh_node_id(),
		};
		let node = Node {
			id,
			label: partial.label,
			kind: partial.kind,
			position: partial.position,
		};
		self.nodes.push(node.clone());
		node
	}

	/// Merges the present fields of `patch` into the node.
	pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<Node, GraphError> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| GraphError::node_not_found(id))?;
		if let Some(label) = patch.label {
			node.label = label;
		}
		if let Some(kind) = patch.kind {
			node.kind = kind;
		}
		if let Some(position) = patch.position {
			node.position = position;
		}
		Ok(node.clone())
	}

	/// Removes a node together with every edge that references it.
	pub fn remove_node(&mut self, id: &str) -> Result<(), GraphError> {
		let index = self
			.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| GraphError::node_not_found(id))?;
		self.nodes.remove(index);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		debug!(
			"collab-board: removed node `{}` and {} incident edge(s)",
			id,
			before - self.edges.len()
		);
		Ok(())
	}

	/// Connects two distinct live nodes. Parallel edges are allowed.
	pub fn add_edge(
		&mut self,
		source_id: &str,
		target_id: &str,
		details: EdgeDetails,
	) -> Result<Edge, GraphError> {
		self.check_endpoints(source_id, target_id)?;
		let edge = Edge {
			id: self.fresh_edge_id(),
			source_id: source_id.to_string(),
			target_id: target_id.to_string(),
			label: details.label,
			kind: details.kind,
		};
		self.edges.push(edge.clone());
		Ok(edge)
	}

	/// Re-annotates an edge. Endpoints cannot be changed.
	pub fn update_edge(&mut self, id: &str, patch: EdgePatch) -> Result<Edge, GraphError> {
		let edge = self
			.edges
			.iter_mut()
			.find(|e| e.id == id)
			.ok_or_else(|| GraphError::edge_not_found(id))?;
		if let Some(label) = patch.label {
			edge.label = label;
		}
		if let Some(kind) = patch.kind {
			edge.kind = kind;
		}
		Ok(edge.clone())
	}

	pub fn remove_edge(&mut self, id: &str) -> Result<(), GraphError> {
		let index = self
			.edges
			.iter()
			.position(|e| e.id == id)
			.ok_or_else(|| GraphError::edge_not_found(id))?;
		self.edges.remove(index);
		Ok(())
	}

	/// Deep copy of the current nodes and edges.
	pub fn snapshot(&self) -> GraphSnapshot {
		GraphSnapshot {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	fn check_endpoints(&self, source_id: &str, target_id: &str) -> Result<(), GraphError> {
		for id in [source_id, target_id] {
			if self.node(id).is_none() {
				return Err(GraphError::InvalidEndpoint(id.to_string()));
			}
		}
		if source_id == target_id {
			return Err(GraphError::SelfLoop(source_id.to_string()));
		}
		Ok(())
	}

	/// Moves the generator past `id` if it has the generated form, so a
	/// later removal cannot free it for reuse.
	fn claim_node_id(&mut self, id: &str) {
		if let Some(n) = generated_index(id, NODE_PREFIX) {
			self.next_node = self.next_node.max(n);
		}
	}

	fn claim_edge_id(&mut self, id: &str) {
		if let Some(n) = generated_index(id, EDGE_PREFIX) {
			self.next_edge = self.next_edge.max(n);
		}
	}

	fn fresh_node_id(&mut self) -> String {
		loop {
			self.next_node += 1;
			let id = format!("{}-{}", NODE_PREFIX, self.next_node);
			if self.node(&id).is_none() {
				return id;
			}
		}
	}

	fn fresh_edge_id(&mut self) -> String {
		loop {
			self.next_edge += 1;
			let id = format!("{}-{}", EDGE_PREFIX, self.next_edge);
			if self.edge(&id).is_none() {
				return id;
			}
		}
	}
}

/// `n` for ids shaped like `<prefix>-<n>`.
fn generated_index(id: &str, prefix: &str) -> Option<u64> {
	id.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}
