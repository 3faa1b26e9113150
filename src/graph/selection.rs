//! Hover/click selection state machine.
//!
//! A click pins a node; while a pin is set, hover events are ignored. Clicking
//! the pinned node again unpins it, clicking another node moves the pin there.

use log::debug;

use super::model::NodeIdx;

/// The single selection slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	/// Nothing pinned; hover previews are live.
	#[default]
	Idle,
	/// A node was clicked and stays selected until the next qualifying click.
	Pinned(NodeIdx),
}

/// Pointer input the selection reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
	/// The pointer moved onto a node.
	HoverEnter(NodeIdx),
	/// The pointer left a node.
	HoverExit(NodeIdx),
	/// A node was clicked.
	Click(NodeIdx),
}

/// Visual change requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
	/// Transient highlight of a hovered node, panel shown.
	Preview(NodeIdx),
	/// Hover left the node: default styling, panel hidden.
	ClearPreview(NodeIdx),
	/// A node became pinned from idle.
	Highlight(NodeIdx),
	/// The pin moved from one node to another in a single step.
	Reselect {
		/// Previously pinned node.
		from: NodeIdx,
		/// Newly pinned node.
		to: NodeIdx,
	},
	/// The pinned node was clicked again: default styling, panel hidden.
	Unpin(NodeIdx),
}

impl Selection {
	/// Next state for `event`, along with the visual changes it implies.
	pub fn transition(self, event: SelectionEvent) -> (Selection, Vec<Instruction>) {
		use Instruction::*;
		use Selection::*;
		use SelectionEvent::*;

		match (self, event) {
			(Idle, HoverEnter(n)) => (Idle, vec![Preview(n)]),
			(Idle, HoverExit(n)) => (Idle, vec![ClearPreview(n)]),
			(Pinned(_), HoverEnter(_) | HoverExit(_)) => (self, Vec::new()),
			(Idle, Click(n)) => (Pinned(n), vec![Highlight(n)]),
			(Pinned(p), Click(n)) if p == n => (Idle, vec![Unpin(n)]),
			(Pinned(p), Click(n)) => (Pinned(n), vec![Reselect { from: p, to: n }]),
		}
	}
}

/// Owner of the process-wide [`Selection`].
#[derive(Debug, Default)]
pub struct SelectionController {
	selection: Selection,
}

impl SelectionController {
	/// Starts out [`Selection::Idle`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Current state.
	pub fn selection(&self) -> Selection {
		self.selection
	}

	/// Applies `event` and returns the visual changes it implies.
	pub fn handle(&mut self, event: SelectionEvent) -> Vec<Instruction> {
		let (next, instructions) = self.selection.transition(event);
		if next != self.selection {
			debug!("selection: {:?} -> {:?}", self.selection, next);
		}
		self.selection = next;
		instructions
	}
}
