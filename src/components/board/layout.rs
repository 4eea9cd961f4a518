//! Programmatic layout: grid arrangement and force-directed relaxation.
//!
//! Both write positions back through [`Graph::update_node`], the same path
//! the drag controller uses, so layout never bypasses the model.

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::error::GraphError;
use super::graph::Graph;
use super::types::{NodePatch, Point};

/// Lays nodes out on a square-ish grid, sorted by label.
///
/// Row width is `ceil(sqrt(n))`; `spacing` is the distance between
/// neighbouring cells.
pub fn arrange_grid(graph: &mut Graph, spacing: Point) -> Result<(), GraphError> {
	let mut order: Vec<(String, String)> = graph
		.nodes()
		.iter()
		.map(|n| (n.label.to_lowercase(), n.id.clone()))
		.collect();
	if order.is_empty() {
		return Ok(());
	}
	order.sort();
	let per_row = (order.len() as f64).sqrt().ceil() as usize;
	for (i, (_, id)) in order.iter().enumerate() {
		let (row, col) = (i / per_row, i % per_row);
		let position = Point::new(col as f64 * spacing.x, row as f64 * spacing.y);
		graph.update_node(id, NodePatch::position(position))?;
	}
	debug!("collab-board: arranged {} nodes, {} per row", order.len(), per_row);
	Ok(())
}

/// Tuning for [`relax`].
#[derive(Clone, Debug)]
pub struct RelaxParams {
	pub iterations: usize,
	/// Simulation step in seconds.
	pub dt: f32,
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
}

impl Default for RelaxParams {
	fn default() -> Self {
		Self {
			iterations: 300,
			dt: 0.016,
			force_charge: 12000.0,
			force_spring: 0.05,
			force_max: 280.0,
			node_speed: 7000.0,
			damping_factor: 0.9,
		}
	}
}

/// Runs a force simulation seeded with the current positions and writes the
/// settled positions back. Nodes whose result is not finite keep their place.
pub fn relax(graph: &mut Graph, params: &RelaxParams) -> Result<(), GraphError> {
	if graph.node_count() < 2 {
		return Ok(());
	}

	let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: params.force_charge,
		force_spring: params.force_spring,
		force_max: params.force_max,
		node_speed: params.node_speed,
		damping_factor: params.damping_factor,
	});

	let mut indices = Vec::with_capacity(graph.node_count());
	for (i, node) in graph.nodes().iter().enumerate() {
		// Coincident nodes would repel along an undefined direction.
		let jitter = i as f32 * 0.01;
		let idx = sim.add_node(NodeData {
			x: node.position.x as f32 + jitter,
			y: node.position.y as f32 - jitter,
			mass: 10.0,
			is_anchor: false,
			user_data: i,
		});
		indices.push((node.id.clone(), idx));
	}
	for edge in graph.edges() {
		let src = indices.iter().find(|(id, _)| *id == edge.source_id);
		let tgt = indices.iter().find(|(id, _)| *id == edge.target_id);
		if let (Some((_, src)), Some((_, tgt))) = (src, tgt) {
			sim.add_edge(*src, *tgt, EdgeData::default());
		}
	}

	for _ in 0..params.iterations {
		sim.update(params.dt);
	}

	let mut settled = vec![None; indices.len()];
	sim.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		if x.is_finite() && y.is_finite() {
			settled[node.data.user_data] = Some(Point::new(x, y));
		}
	});

	for ((id, _), position) in indices.iter().zip(settled) {
		if let Some(position) = position {
			graph.update_node(id, NodePatch::position(position))?;
		}
	}
	debug!(
		"collab-board: relaxed {} nodes over {} iterations",
		indices.len(),
		params.iterations
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::board::types::{EdgeDetails, NewNode};

	#[test]
	fn grid_sorts_by_label_and_wraps_rows() {
		let mut graph = Graph::new();
		for label in ["e", "D", "c", "b", "a"] {
			graph.add_node(NewNode::new(label, Point::new(-999.0, 999.0)));
		}
		arrange_grid(&mut graph, Point::new(260.0, 200.0)).unwrap();

		let at = |label: &str| {
			graph
				.nodes()
				.iter()
				.find(|n| n.label == label)
				.map(|n| n.position)
				.unwrap()
		};
		assert_eq!(at("a"), Point::new(0.0, 0.0));
		assert_eq!(at("b"), Point::new(260.0, 0.0));
		assert_eq!(at("c"), Point::new(520.0, 0.0));
		assert_eq!(at("D"), Point::new(0.0, 200.0));
		assert_eq!(at("e"), Point::new(260.0, 200.0));
	}

	#[test]
	fn grid_on_empty_graph_is_a_no_op() {
		let mut graph = Graph::new();
		arrange_grid(&mut graph, Point::new(260.0, 200.0)).unwrap();
		assert!(graph.is_empty());
	}

	#[test]
	fn relax_moves_only_positions() {
		let mut graph = Graph::new();
		let a = graph.add_node(NewNode::new("A", Point::new(0.0, 0.0))).id;
		let b = graph.add_node(NewNode::new("B", Point::new(0.0, 0.0))).id;
		let c = graph.add_node(NewNode::new("C", Point::new(50.0, 10.0))).id;
		graph.add_edge(&a, &b, EdgeDetails::new("L", "T")).unwrap();
		graph.add_edge(&b, &c, EdgeDetails::default()).unwrap();
		let before = graph.snapshot();

		relax(
			&mut graph,
			&RelaxParams {
				iterations: 50,
				..Default::default()
			},
		)
		.unwrap();

		let after = graph.snapshot();
		assert_eq!(after.edges, before.edges);
		assert_eq!(after.nodes.len(), 3);
		for (old, new) in before.nodes.iter().zip(&after.nodes) {
			assert_eq!(old.id, new.id);
			assert_eq!(old.label, new.label);
			assert!(new.position.x.is_finite() && new.position.y.is_finite());
		}
	}

	#[test]
	fn relax_single_node_is_a_no_op() {
		let mut graph = Graph::new();
		graph.add_node(NewNode::new("solo", Point::new(3.0, 4.0)));
		relax(&mut graph, &RelaxParams::default()).unwrap();
		assert_eq!(graph.nodes()[0].position, Point::new(3.0, 4.0));
	}
}
