use std::f64::consts::PI;
use std::rc::Rc;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use leptos::prelude::{RwSignal, Set};

use crate::graph::{GraphModel, LinkIdx, NodeIdx, NodeStyle, PanelContent, RenderEngine};

/// Extra pick distance around a node, in world space.
pub const HIT_SLOP: f64 = 2.0;

// d3-style cooling schedule
const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY: f64 = 0.0228;
const ALPHA_REHEAT: f64 = 0.3;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// A node pressed on the canvas, possibly being dragged.
#[derive(Clone, Debug)]
pub struct PointerState {
	pub node: NodeIdx,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub width: f64,
	pub stroke: &'static str,
}

/// Canvas-side engine: force simulation, per-element styles, view transform
/// and the info panel signal.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeIdx, ()>,
	pub positions: Vec<(f64, f64)>,
	pub styles: Vec<NodeStyle>,
	pub links: Vec<LinkInfo>,
	pub transform: ViewTransform,
	pub pointer: Option<PointerState>,
	pub pan: PanState,
	pub hovered: Option<NodeIdx>,
	pub width: f64,
	pub height: f64,
	pub zoom_enabled: bool,
	alpha: f64,
	alpha_target: f64,
	layout_suspended: bool,
	panel: RwSignal<Option<PanelContent>>,
}

impl ForceGraphState {
	pub fn new(
		model: &Rc<GraphModel>,
		width: f64,
		height: f64,
		panel: RwSignal<Option<PanelContent>>,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let count = model.node_count();
		let mut handles = Vec::with_capacity(count);
		let mut positions = Vec::with_capacity(count);

		for (idx, _) in model.nodes() {
			let angle = (idx.index() as f64) * 2.0 * PI / count as f64;
			let (x, y) = (100.0 * angle.cos(), 100.0 * angle.sin());
			handles.push(graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: idx,
			}));
			positions.push((x, y));
		}

		let links = model
			.links()
			.iter()
			.map(|l| {
				graph.add_edge(
					handles[l.source.index()],
					handles[l.target.index()],
					EdgeData::default(),
				);
				LinkInfo {
					source: l.source,
					target: l.target,
					width: l.weight.sqrt(),
					stroke: "",
				}
			})
			.collect();

		Self {
			graph,
			positions,
			styles: vec![NodeStyle { fill: "", radius: 0.0 }; count],
			links,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pointer: None,
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			zoom_enabled: true,
			alpha: 1.0,
			alpha_target: 0.0,
			layout_suspended: false,
			panel,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.positions
			.iter()
			.zip(&self.styles)
			.rposition(|(&(x, y), style)| {
				let (dx, dy) = (x - gx, y - gy);
				(dx * dx + dy * dy).sqrt() < style.radius + HIT_SLOP
			})
			.map(NodeIdx)
	}

	fn running(&self) -> bool {
		!self.layout_suspended && (self.alpha >= ALPHA_MIN || self.alpha_target >= ALPHA_MIN)
	}

	pub fn tick(&mut self, dt: f32) {
		if !self.running() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		self.graph.update(dt);
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions[node.data.user_data.index()] = (node.x() as f64, node.y() as f64);
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl RenderEngine for ForceGraphState {
	fn set_node_style(&mut self, node: NodeIdx, style: NodeStyle) {
		self.styles[node.index()] = style;
	}

	fn set_link_stroke(&mut self, link: LinkIdx, stroke: &'static str) {
		self.links[link].stroke = stroke;
	}

	fn node_position(&self, node: NodeIdx) -> (f64, f64) {
		self.positions[node.index()]
	}

	fn pin_node(&mut self, node: NodeIdx, x: f64, y: f64) {
		self.graph.visit_nodes_mut(|n| {
			if n.data.user_data == node {
				n.data.x = x as f32;
				n.data.y = y as f32;
				n.data.is_anchor = true;
			}
		});
		self.positions[node.index()] = (x, y);
	}

	fn release_node(&mut self, node: NodeIdx) {
		self.graph.visit_nodes_mut(|n| {
			if n.data.user_data == node {
				n.data.is_anchor = false;
			}
		});
	}

	fn layout_at_rest(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	fn reheat_layout(&mut self) {
		self.alpha_target = ALPHA_REHEAT;
	}

	fn settle_layout(&mut self) {
		self.alpha_target = 0.0;
	}

	fn suspend_layout(&mut self) {
		self.layout_suspended = true;
	}

	fn resume_layout(&mut self) {
		self.layout_suspended = false;
	}

	fn set_zoom_enabled(&mut self, enabled: bool) {
		self.zoom_enabled = enabled;
		if !enabled {
			self.pan.active = false;
		}
	}

	fn show_panel(&mut self, content: PanelContent) {
		self.panel.set(Some(content));
	}

	fn hide_panel(&mut self) {
		self.panel.set(None);
	}
}
