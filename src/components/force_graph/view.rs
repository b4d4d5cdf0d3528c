//! The graph-view seam between the edit client and a rendering backend.

use indexmap::IndexMap;
use log::warn;

use super::types::{EdgeId, GraphData, GraphEdge, GraphNode, NodeId};

/// Operations the edit client needs from a rendering surface.
pub trait GraphView {
	/// Replace everything currently shown.
	fn set_data(&mut self, data: GraphData);
	fn clear(&mut self) {
		self.set_data(GraphData::default());
	}
	fn node(&self, id: &NodeId) -> Option<GraphNode>;
	fn add_node(&mut self, node: GraphNode);
	/// Replace the node with the same id. Returns false when it is unknown.
	fn update_node(&mut self, node: GraphNode) -> bool;
	/// Remove a node together with every edge touching it.
	fn remove_node(&mut self, id: &NodeId) -> Option<GraphNode>;
	fn has_edge(&self, id: &EdgeId) -> bool;
	/// Returns false when the edge would be a self loop, duplicate a pair, or
	/// reference a missing node.
	fn add_edge(&mut self, edge: GraphEdge) -> bool;
	fn remove_edge(&mut self, id: &EdgeId) -> Option<GraphEdge>;
	fn redraw(&mut self);
	/// Re-run the layout until it settles.
	fn stabilize(&mut self);
	/// Frame all nodes.
	fn fit(&mut self);
	fn node_count(&self) -> usize;
	fn edge_count(&self) -> usize;
	/// Mark the active node and the pending edge endpoint, if the surface
	/// draws them.
	fn show_selection(&mut self, _active: Option<&NodeId>, _pending: Option<&NodeId>) {}
	/// Whether `a` and `b` are already connected, in either direction and
	/// whatever the edge's id.
	fn has_edge_between(&self, a: &NodeId, b: &NodeId) -> bool;
}

/// Ordered in-memory node/edge collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	nodes: IndexMap<NodeId, GraphNode>,
	edges: IndexMap<EdgeId, GraphEdge>,
}

impl GraphModel {
	#[cfg(test)]
	pub fn from_data(data: GraphData) -> Self {
		let mut model = Self::default();
		model.set_data(data);
		model
	}

	pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
		self.nodes.values()
	}

	pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
		self.edges.values()
	}

	fn accepts_edge(&self, edge: &GraphEdge) -> bool {
		edge.from != edge.to
			&& self.nodes.contains_key(&edge.from)
			&& self.nodes.contains_key(&edge.to)
			&& !self.has_edge_between(&edge.from, &edge.to)
			&& !self.has_edge(&edge.id)
	}
}

impl GraphView for GraphModel {
	fn set_data(&mut self, data: GraphData) {
		self.nodes.clear();
		self.edges.clear();
		for node in data.nodes {
			self.nodes.insert(node.id.clone(), node);
		}
		for edge in data.edges {
			let id = edge.id.clone();
			if !self.add_edge(edge) {
				warn!("Dropping edge {id}: self loop, duplicate pair or unknown endpoint");
			}
		}
	}

	fn node(&self, id: &NodeId) -> Option<GraphNode> {
		self.nodes.get(id).cloned()
	}

	fn add_node(&mut self, node: GraphNode) {
		self.nodes.insert(node.id.clone(), node);
	}

	fn update_node(&mut self, node: GraphNode) -> bool {
		match self.nodes.get_mut(&node.id) {
			Some(slot) => {
				*slot = node;
				true
			}
			None => false,
		}
	}

	fn remove_node(&mut self, id: &NodeId) -> Option<GraphNode> {
		let node = self.nodes.shift_remove(id)?;
		self.edges.retain(|_, edge| !edge.touches(id));
		Some(node)
	}

	fn has_edge(&self, id: &EdgeId) -> bool {
		self.edges.contains_key(id)
	}

	fn has_edge_between(&self, a: &NodeId, b: &NodeId) -> bool {
		self.edges
			.values()
			.any(|e| (e.from == *a && e.to == *b) || (e.from == *b && e.to == *a))
	}

	fn add_edge(&mut self, edge: GraphEdge) -> bool {
		if !self.accepts_edge(&edge) {
			return false;
		}
		self.edges.insert(edge.id.clone(), edge);
		true
	}

	fn remove_edge(&mut self, id: &EdgeId) -> Option<GraphEdge> {
		self.edges.shift_remove(id)
	}

	fn redraw(&mut self) {}

	fn stabilize(&mut self) {}

	fn fit(&mut self) {}

	fn node_count(&self) -> usize {
		self.nodes.len()
	}

	fn edge_count(&self) -> usize {
		self.edges.len()
	}
}
