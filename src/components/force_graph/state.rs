use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::rc::Rc;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::palette::NodeStyle;
use super::types::{EdgeId, GraphData, GraphEdge, GraphNode, NodeId};
use super::view::{GraphModel, GraphView};
use crate::config::PhysicsConfig;

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;

const BASE_MASS: f32 = 10.0;
const SPAWN_RING: f64 = 100.0;
const FIT_PADDING: f64 = 60.0;
const FRAME_DT: f32 = 0.016;

/// Per-node render data carried inside the physics graph.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub style: NodeStyle,
	pub radius: f64,
}

impl NodeInfo {
	fn from_node(node: &GraphNode) -> Self {
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			style: node.style(),
			radius: radius_for(node.value),
		}
	}
}

/// Service values run 10..30; map them onto a 0.8x..2.4x radius range.
fn radius_for(value: Option<f64>) -> f64 {
	value
		.map(|v| NODE_RADIUS * (v.clamp(10.0, 30.0) / 12.5))
		.unwrap_or(NODE_RADIUS)
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer travels far enough to count as a drag, not a click.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Active node and pending edge endpoint, drawn as rings.
#[derive(Clone, Debug, Default)]
pub struct SelectionMarks {
	pub active: Option<NodeId>,
	pub pending: Option<NodeId>,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, f64>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub marks: SelectionMarks,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	model: GraphModel,
	physics: PhysicsConfig,
	id_to_idx: HashMap<NodeId, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(width: f64, height: f64, physics: PhysicsConfig) -> Self {
		Self {
			graph: ForceGraph::new(physics.simulation()),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			marks: SelectionMarks::default(),
			width,
			height,
			animation_running: true,
			model: GraphModel::default(),
			physics,
			id_to_idx: HashMap::new(),
			edges: Vec::new(),
		}
	}

	/// Mirror the model into a fresh physics graph, keeping the positions of
	/// nodes that survive.
	fn rebuild(&mut self) {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});

		let mut graph = ForceGraph::new(self.physics.simulation());
		self.id_to_idx.clear();
		self.edges.clear();

		let count = self.model.node_count().max(1);
		for (i, node) in self.model.nodes().enumerate() {
			let (x, y, is_anchor) = positions.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				(
					(SPAWN_RING * angle.cos()) as f32,
					(SPAWN_RING * angle.sin()) as f32,
					false,
				)
			});
			let info = NodeInfo::from_node(node);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: BASE_MASS * info.style.mass,
				is_anchor,
				user_data: info,
			});
			self.id_to_idx.insert(node.id.clone(), idx);
		}

		for edge in self.model.edges() {
			if let (Some(&src), Some(&tgt)) =
				(self.id_to_idx.get(&edge.from), self.id_to_idx.get(&edge.to))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: edge.value.unwrap_or(1.0),
					},
				);
				self.edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.hover = HoverState::default();
		self.drag = DragState::default();
		self.animation_running = true;
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	#[cfg(test)]
	pub fn node_position(&self, id: &NodeId) -> Option<(f32, f32)> {
		let idx = *self.id_to_idx.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	#[cfg(test)]
	pub fn node_mass(&self, id: &NodeId) -> Option<f32> {
		let idx = *self.id_to_idx.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.mass);
			}
		});
		found
	}

	pub fn is_marked_active(&self, id: &NodeId) -> bool {
		self.marks.active.as_ref() == Some(id)
	}

	pub fn is_marked_pending(&self, id: &NodeId) -> bool {
		self.marks.pending.as_ref() == Some(id)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// world-space, scales with zoom like nodes
			let hit = HIT_RADIUS.max(node.data.user_data.radius + 4.0);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl GraphView for ForceGraphState {
	fn set_data(&mut self, data: GraphData) {
		self.model.set_data(data);
		// fresh layout, nothing to preserve
		self.graph = ForceGraph::new(self.physics.simulation());
		self.marks = SelectionMarks::default();
		self.rebuild();
	}

	fn node(&self, id: &NodeId) -> Option<GraphNode> {
		self.model.node(id)
	}

	fn add_node(&mut self, node: GraphNode) {
		self.model.add_node(node);
		self.rebuild();
	}

	fn update_node(&mut self, node: GraphNode) -> bool {
		let Some(&idx) = self.id_to_idx.get(&node.id) else {
			return false;
		};
		let info = NodeInfo::from_node(&node);
		if !self.model.update_node(node) {
			return false;
		}
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.mass = BASE_MASS * info.style.mass;
				n.data.user_data = info.clone();
			}
		});
		true
	}

	fn remove_node(&mut self, id: &NodeId) -> Option<GraphNode> {
		let removed = self.model.remove_node(id)?;
		if self.marks.active.as_ref() == Some(id) {
			self.marks.active = None;
		}
		if self.marks.pending.as_ref() == Some(id) {
			self.marks.pending = None;
		}
		self.rebuild();
		Some(removed)
	}

	fn has_edge(&self, id: &EdgeId) -> bool {
		self.model.has_edge(id)
	}

	fn has_edge_between(&self, a: &NodeId, b: &NodeId) -> bool {
		self.model.has_edge_between(a, b)
	}

	fn add_edge(&mut self, edge: GraphEdge) -> bool {
		if !self.model.add_edge(edge) {
			return false;
		}
		self.rebuild();
		true
	}

	fn remove_edge(&mut self, id: &EdgeId) -> Option<GraphEdge> {
		let removed = self.model.remove_edge(id)?;
		self.rebuild();
		Some(removed)
	}

	fn redraw(&mut self) {
		self.animation_running = true;
	}

	fn stabilize(&mut self) {
		for _ in 0..self.physics.stabilization_iterations {
			self.graph.update(FRAME_DT);
		}
		self.animation_running = true;
	}

	fn fit(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => (x, y, x, y),
				Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
			});
		});

		let Some((x0, y0, x1, y1)) = bounds else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};

		let (bw, bh) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let (aw, ah) = (
			(self.width - 2.0 * FIT_PADDING).max(1.0),
			(self.height - 2.0 * FIT_PADDING).max(1.0),
		);
		let k = (aw / bw).min(ah / bh).clamp(0.1, 2.0);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	fn node_count(&self) -> usize {
		self.model.node_count()
	}

	fn edge_count(&self) -> usize {
		self.model.edge_count()
	}

	fn show_selection(&mut self, active: Option<&NodeId>, pending: Option<&NodeId>) {
		self.marks = SelectionMarks {
			active: active.cloned(),
			pending: pending.cloned(),
		};
	}
}

/// Shared handle to the canvas state. The render loop and the edit client
/// both hold one.
#[derive(Clone)]
pub struct GraphSurface(Rc<RefCell<ForceGraphState>>);

impl GraphSurface {
	pub fn new(state: ForceGraphState) -> Self {
		Self(Rc::new(RefCell::new(state)))
	}

	pub fn state(&self) -> &Rc<RefCell<ForceGraphState>> {
		&self.0
	}
}

impl GraphView for GraphSurface {
	fn set_data(&mut self, data: GraphData) {
		self.0.borrow_mut().set_data(data);
	}

	fn node(&self, id: &NodeId) -> Option<GraphNode> {
		self.0.borrow().node(id)
	}

	fn add_node(&mut self, node: GraphNode) {
		self.0.borrow_mut().add_node(node);
	}

	fn update_node(&mut self, node: GraphNode) -> bool {
		self.0.borrow_mut().update_node(node)
	}

	fn remove_node(&mut self, id: &NodeId) -> Option<GraphNode> {
		self.0.borrow_mut().remove_node(id)
	}

	fn has_edge(&self, id: &EdgeId) -> bool {
		self.0.borrow().has_edge(id)
	}

	fn has_edge_between(&self, a: &NodeId, b: &NodeId) -> bool {
		self.0.borrow().has_edge_between(a, b)
	}

	fn add_edge(&mut self, edge: GraphEdge) -> bool {
		self.0.borrow_mut().add_edge(edge)
	}

	fn remove_edge(&mut self, id: &EdgeId) -> Option<GraphEdge> {
		self.0.borrow_mut().remove_edge(id)
	}

	fn redraw(&mut self) {
		self.0.borrow_mut().redraw();
	}

	fn stabilize(&mut self) {
		self.0.borrow_mut().stabilize();
	}

	fn fit(&mut self) {
		self.0.borrow_mut().fit();
	}

	fn node_count(&self) -> usize {
		self.0.borrow().node_count()
	}

	fn edge_count(&self) -> usize {
		self.0.borrow().edge_count()
	}

	fn show_selection(&mut self, active: Option<&NodeId>, pending: Option<&NodeId>) {
		self.0.borrow_mut().show_selection(active, pending);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::Sentiment;

	fn alice_bob() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new(1)
					.with_label("Alice")
					.with_sentiment(Sentiment::Positive),
				GraphNode::new(2).with_label("Bob"),
			],
			edges: vec![GraphEdge::new(NodeId::Int(1), NodeId::Int(2))],
		}
	}

	fn state() -> ForceGraphState {
		let mut state = ForceGraphState::new(800.0, 600.0, PhysicsConfig::default());
		state.set_data(alice_bob());
		state
	}

	#[test]
	fn physics_mass_follows_style() {
		let mut state = state();
		assert_eq!(state.node_mass(&NodeId::Int(1)), Some(BASE_MASS * 2.0));
		assert_eq!(state.node_mass(&NodeId::Int(2)), Some(BASE_MASS));

		let bob = state.node(&NodeId::Int(2)).unwrap().with_sentiment(Sentiment::Negative);
		assert!(state.update_node(bob));
		assert_eq!(state.node_mass(&NodeId::Int(2)), Some(BASE_MASS * 2.0));
	}

	#[test]
	fn structural_changes_keep_surviving_positions() {
		let mut state = state();
		state.stabilize();
		let before = state.node_position(&NodeId::Int(1)).unwrap();

		state.add_node(GraphNode::new(3).with_label("Carol"));
		assert_eq!(state.node_position(&NodeId::Int(1)), Some(before));
		assert_eq!(state.node_count(), 3);

		state.remove_node(&NodeId::Int(2));
		assert_eq!(state.node_position(&NodeId::Int(1)), Some(before));
		assert_eq!(state.edge_count(), 0);
		assert!(state.node_position(&NodeId::Int(2)).is_none());
	}

	#[test]
	fn removing_marked_node_clears_marks() {
		let mut state = state();
		state.show_selection(Some(&NodeId::Int(1)), Some(&NodeId::Int(1)));
		state.remove_node(&NodeId::Int(1));
		assert!(state.marks.active.is_none());
		assert!(state.marks.pending.is_none());
	}

	#[test]
	fn fit_centers_the_node_bounds() {
		let mut state = state();
		state.fit();
		let (ax, ay) = state.node_position(&NodeId::Int(1)).unwrap();
		let (bx, by) = state.node_position(&NodeId::Int(2)).unwrap();
		let (cx, cy) = ((ax + bx) as f64 / 2.0, (ay + by) as f64 / 2.0);
		let k = state.transform.k;
		assert!((state.transform.x + cx * k - 400.0).abs() < 1e-6);
		assert!((state.transform.y + cy * k - 300.0).abs() < 1e-6);
	}

	#[test]
	fn hit_testing_maps_back_to_ids() {
		let state = state();
		let (x, y) = state.node_position(&NodeId::Int(2)).unwrap();
		let (sx, sy) = (
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		);
		let idx = state.node_at_position(sx, sy).unwrap();
		assert_eq!(state.node_id(idx), Some(NodeId::Int(2)));
	}
}
