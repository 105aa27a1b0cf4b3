use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::style::{EdgeKind, NodeKind, edge_width};
use crate::network::GraphModel;

/// Drawn node radius in graph units.
pub const NODE_RADIUS: f64 = 5.0;
/// Pointer distance, in screen pixels, that still hits a node.
pub const HIT_RADIUS: f64 = 12.0;
/// Radius of the circle nodes start on when the data has no positions.
const LAYOUT_RADIUS: f64 = 100.0;

/// Per-node payload carried through the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: &'static str,
}

/// Per-edge style, resolved once when the graph is loaded.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub label: Option<String>,
	pub kind: EdgeKind,
	pub width: f64,
}

impl Default for EdgeInfo {
	fn default() -> Self {
		Self {
			label: None,
			kind: EdgeKind::Default,
			width: edge_width(None),
		}
	}
}

/// Pan offset and zoom factor `k`.
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
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
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

/// Simulation plus view state for one loaded graph.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	/// Lays out `data` for simulation.
	///
	/// Edges whose endpoints are not in `data.nodes` are dropped, and a
	/// repeated node id keeps its first occurrence.
	pub fn new(data: &GraphModel, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let types = data.node_types();
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(node.id.as_str()) {
				debug!("duplicate node id {:?} ignored", node.id);
				continue;
			}
			let type_name = node.kind.as_deref().unwrap_or("default");
			let first_seen = types.iter().position(|t| *t == type_name).unwrap_or_default();
			let (x, y) = match node.position {
				Some(p) => (p.x as f32, p.y as f32),
				None => {
					let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
					(
						(LAYOUT_RADIUS * angle.cos()) as f32,
						(LAYOUT_RADIUS * angle.sin()) as f32,
					)
				}
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: NodeKind::from_type(type_name, first_seen).color(),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for edge in &data.edges {
			let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(edge.source.as_str()),
				id_to_idx.get(edge.target.as_str()),
			) else {
				debug!("edge {:?} has a dangling endpoint, not drawn", edge.id);
				continue;
			};
			graph.add_edge(src, tgt, EdgeData {
				user_data: EdgeInfo {
					label: edge.label.clone().filter(|l| !l.is_empty()),
					kind: EdgeKind::from_type(edge.kind.as_deref()),
					width: edge_width(edge.weight),
				},
			});
			edges.push((src, tgt));
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
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
			// world-space radius, scales with zoom like the nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
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

		// keep the old highlight around so it can fade out
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
		self.flow_time += dt as f64;

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

	/// Nodes and edges actually handed to the simulation.
	pub fn counts(&self) -> (usize, usize) {
		let mut nodes = 0;
		self.graph.visit_nodes(|_| nodes += 1);
		(nodes, self.edges.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::{Edge, Node, samples};

	#[test]
	fn dangling_edges_are_not_simulated() {
		let data = GraphModel {
			nodes: vec![Node::new("a", "A"), Node::new("b", "B")],
			edges: vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "missing")],
		};
		let state = ForceGraphState::new(&data, 800.0, 600.0);
		assert_eq!(state.counts(), (2, 1));
	}

	#[test]
	fn duplicate_node_ids_collapse() {
		let data = GraphModel {
			nodes: vec![Node::new("a", "A"), Node::new("a", "A again")],
			edges: vec![],
		};
		assert_eq!(ForceGraphState::new(&data, 800.0, 600.0).counts(), (1, 0));
	}

	#[test]
	fn hover_collects_neighbors() {
		let state_data = samples::sample_graph();
		let mut state = ForceGraphState::new(&state_data, 800.0, 600.0);
		let mut web_server = None;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.label == "Web Server" {
				web_server = Some(n.index());
			}
		});
		state.set_hover(web_server);
		assert_eq!(state.hover.neighbors.len(), 3);
		assert!(state.has_active_highlight());
		state.set_hover(None);
		assert_eq!(state.hover.prev_neighbors.len(), 3);
	}
}
