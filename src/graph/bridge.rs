//! Glue between the layout/render engine and the selection logic.
//!
//! The engine reports pointer, drag and panel-focus events; the bridge runs
//! them through the [`SelectionController`] and [`SuspendRequests`] and turns
//! the outcome into styling, panel and layout commands.

use std::rc::Rc;

use log::debug;

use super::content::{self, PanelContent};
use super::model::{GraphModel, LinkIdx, NodeIdx};
use super::selection::{Instruction, Selection, SelectionController, SelectionEvent};
use super::suspend::{Capability, Change, SuspendReason, SuspendRequests};
use super::theme::{NodeStyle, Theme};

/// Commands the bridge needs from a layout and render engine.
pub trait RenderEngine {
	/// Sets the fill and radius `node` is drawn with.
	fn set_node_style(&mut self, node: NodeIdx, style: NodeStyle);
	/// Sets the stroke color `link` is drawn with.
	fn set_link_stroke(&mut self, link: LinkIdx, stroke: &'static str);

	/// Current layout position of `node`.
	fn node_position(&self, node: NodeIdx) -> (f64, f64);
	/// Fixes `node` at `(x, y)` until released.
	fn pin_node(&mut self, node: NodeIdx, x: f64, y: f64);
	/// Hands a pinned node back to the layout.
	fn release_node(&mut self, node: NodeIdx);

	/// True once the layout has cooled down and stopped moving by itself.
	fn layout_at_rest(&self) -> bool;
	/// Keeps the layout warm until [`settle_layout`](Self::settle_layout).
	fn reheat_layout(&mut self);
	/// Lets a reheated layout cool back down.
	fn settle_layout(&mut self);
	/// Freezes layout motion without touching its temperature.
	fn suspend_layout(&mut self);
	/// Undoes [`suspend_layout`](Self::suspend_layout).
	fn resume_layout(&mut self);

	/// Turns pan/zoom gesture handling on or off.
	fn set_zoom_enabled(&mut self, enabled: bool);

	/// Shows the info panel with `content`, replacing what it showed before.
	fn show_panel(&mut self, content: PanelContent);
	/// Hides the info panel.
	fn hide_panel(&mut self);
}

/// Events delivered by the engine, in dispatch order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineEvent {
	/// The pointer moved onto a node.
	HoverEnter(NodeIdx),
	/// The pointer left a node.
	HoverExit(NodeIdx),
	/// A node was pressed and released without moving.
	Click(NodeIdx),
	/// A node was pressed.
	DragStart(NodeIdx),
	/// The pressed node was moved to `(x, y)` in layout coordinates.
	DragMove {
		/// The dragged node.
		node: NodeIdx,
		/// Layout x coordinate.
		x: f64,
		/// Layout y coordinate.
		y: f64,
	},
	/// The pressed node was released.
	DragEnd(NodeIdx),
	/// The pointer moved onto the info panel.
	PanelPointerEnter,
	/// The pointer left the info panel.
	PanelPointerLeave,
}

#[derive(Debug)]
struct DragSession {
	node: NodeIdx,
	reheated: bool,
}

/// Owns the selection and suspend state and drives an engine `E` from its events.
pub struct InteractionBridge<E> {
	model: Rc<GraphModel>,
	theme: Theme,
	defaults: Vec<NodeStyle>,
	selection: SelectionController,
	suspend: SuspendRequests,
	drag: Option<DragSession>,
	engine: E,
}

impl<E: RenderEngine> InteractionBridge<E> {
	/// Wraps `engine` and paints every node and link in its default style.
	pub fn new(model: Rc<GraphModel>, theme: Theme, engine: E) -> Self {
		let defaults = model
			.nodes()
			.map(|(idx, _)| theme.default_style(&model, idx))
			.collect();
		let mut bridge = Self {
			model,
			theme,
			defaults,
			selection: SelectionController::new(),
			suspend: SuspendRequests::default(),
			drag: None,
			engine,
		};
		bridge.reset_styles();
		bridge
	}

	/// The wrapped engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// The wrapped engine, for per-frame work such as ticking and drawing.
	pub fn engine_mut(&mut self) -> &mut E {
		&mut self.engine
	}

	/// Current pin state.
	pub fn selection(&self) -> Selection {
		self.selection.selection()
	}

	/// Whether any outstanding request holds `cap`.
	pub fn is_suspended(&self, cap: Capability) -> bool {
		self.suspend.is_suspended(cap)
	}

	/// Node being dragged, if any.
	pub fn dragging(&self) -> Option<NodeIdx> {
		self.drag.as_ref().map(|d| d.node)
	}

	/// Reacts to one engine event. Never fails.
	pub fn handle(&mut self, event: EngineEvent) {
		match event {
			EngineEvent::HoverEnter(n) => self.select(SelectionEvent::HoverEnter(n)),
			EngineEvent::HoverExit(n) => self.select(SelectionEvent::HoverExit(n)),
			EngineEvent::Click(n) => self.select(SelectionEvent::Click(n)),
			EngineEvent::DragStart(n) => self.drag_start(n),
			EngineEvent::DragMove { node, x, y } => {
				if self.dragging() == Some(node) {
					self.engine.pin_node(node, x, y);
				}
			}
			EngineEvent::DragEnd(n) => self.drag_end(n),
			EngineEvent::PanelPointerEnter => self.request(SuspendReason::PanelFocus, true),
			EngineEvent::PanelPointerLeave => self.request(SuspendReason::PanelFocus, false),
		}
	}

	fn select(&mut self, event: SelectionEvent) {
		for instruction in self.selection.handle(event) {
			match instruction {
				Instruction::Preview(n) => {
					self.request(SuspendReason::NodeHover, true);
					self.focus(n);
				}
				Instruction::Highlight(n) => {
					self.request(SuspendReason::NodeHover, false);
					self.focus(n);
				}
				// one restyle pass, the old pin never shows in its default style
				Instruction::Reselect { to, .. } => self.focus(to),
				Instruction::ClearPreview(_) | Instruction::Unpin(_) => {
					self.request(SuspendReason::NodeHover, false);
					self.reset_styles();
					self.engine.hide_panel();
				}
			}
		}
	}

	fn request(&mut self, reason: SuspendReason, held: bool) {
		let changes = if held {
			self.suspend.acquire(reason)
		} else {
			self.suspend.release(reason)
		};
		self.apply_changes(changes);
	}

	fn focus(&mut self, node: NodeIdx) {
		self.highlight(node);
		let content = content::format(node, &self.model);
		self.engine.show_panel(content);
	}

	fn highlight(&mut self, node: NodeIdx) {
		let neighbors = self.model.neighbors_of(node);
		for (idx, default) in self.defaults.iter().enumerate() {
			let idx = NodeIdx(idx);
			let style = if idx == node {
				NodeStyle {
					fill: self.theme.accent,
					radius: self.theme.highlight_radius,
				}
			} else if neighbors.contains(&idx) {
				NodeStyle {
					fill: self.theme.accent,
					..*default
				}
			} else {
				*default
			};
			self.engine.set_node_style(idx, style);
		}
		for i in 0..self.model.link_count() {
			let stroke = if self.model.link_touches(i, node) {
				self.theme.accent
			} else {
				self.theme.link_stroke
			};
			self.engine.set_link_stroke(i, stroke);
		}
	}

	fn reset_styles(&mut self) {
		for (idx, style) in self.defaults.iter().enumerate() {
			self.engine.set_node_style(NodeIdx(idx), *style);
		}
		for i in 0..self.model.link_count() {
			self.engine.set_link_stroke(i, self.theme.link_stroke);
		}
	}

	fn drag_start(&mut self, node: NodeIdx) {
		if self.drag.is_some() {
			return;
		}
		let (x, y) = self.engine.node_position(node);
		self.engine.pin_node(node, x, y);
		let reheated = self.engine.layout_at_rest();
		if reheated {
			self.engine.reheat_layout();
		}
		self.drag = Some(DragSession { node, reheated });
		self.request(SuspendReason::NodeDrag, true);
	}

	fn drag_end(&mut self, node: NodeIdx) {
		let Some(session) = self.drag.take_if(|d| d.node == node) else {
			return;
		};
		self.engine.release_node(node);
		if session.reheated {
			self.engine.settle_layout();
		}
		self.request(SuspendReason::NodeDrag, false);
	}

	fn apply_changes(&mut self, changes: Vec<Change>) {
		for Change {
			capability,
			suspended,
		} in changes
		{
			debug!("{:?} suspended: {}", capability, suspended);
			match (capability, suspended) {
				(Capability::Layout, true) => self.engine.suspend_layout(),
				(Capability::Layout, false) => self.engine.resume_layout(),
				(Capability::Zoom, suspended) => self.engine.set_zoom_enabled(!suspended),
			}
		}
	}
}
