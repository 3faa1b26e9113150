//! Outstanding requests to pause layout motion and pan/zoom gestures.
//!
//! Several reasons can overlap (pointer resting on the info panel while a
//! drag is still in flight), so a capability is only given back once every
//! reason holding it has been released.

use std::collections::BTreeSet;

/// Something the engine can be asked to pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
	/// Continuous force layout motion.
	Layout,
	/// Pan/zoom gesture handling.
	Zoom,
}

/// Why a suspension was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuspendReason {
	/// The pointer is over the info panel.
	PanelFocus,
	/// A node is being dragged.
	NodeDrag,
	/// A node is showing a hover preview.
	NodeHover,
}

impl SuspendReason {
	fn holds(self, cap: Capability) -> bool {
		match self {
			SuspendReason::PanelFocus => true,
			SuspendReason::NodeDrag | SuspendReason::NodeHover => cap == Capability::Zoom,
		}
	}
}

/// A capability whose suspended state flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
	/// The capability that flipped.
	pub capability: Capability,
	/// Its new state.
	pub suspended: bool,
}

/// The set of reasons currently holding suspensions.
#[derive(Debug, Default)]
pub struct SuspendRequests {
	reasons: BTreeSet<SuspendReason>,
}

impl SuspendRequests {
	/// Whether any outstanding reason holds `cap`.
	pub fn is_suspended(&self, cap: Capability) -> bool {
		self.reasons.iter().any(|r| r.holds(cap))
	}

	/// Adds `reason`, returning the capabilities that became suspended.
	pub fn acquire(&mut self, reason: SuspendReason) -> Vec<Change> {
		self.apply(|reasons| {
			reasons.insert(reason);
		})
	}

	/// Drops `reason`, returning the capabilities that are free again.
	pub fn release(&mut self, reason: SuspendReason) -> Vec<Change> {
		self.apply(|reasons| {
			reasons.remove(&reason);
		})
	}

	fn apply(&mut self, f: impl FnOnce(&mut BTreeSet<SuspendReason>)) -> Vec<Change> {
		const CAPS: [Capability; 2] = [Capability::Layout, Capability::Zoom];
		let before = CAPS.map(|c| self.is_suspended(c));
		f(&mut self.reasons);
		CAPS.into_iter()
			.zip(before)
			.filter_map(|(capability, was)| {
				let suspended = self.is_suspended(capability);
				(suspended != was).then_some(Change {
					capability,
					suspended,
				})
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use Capability::*;
	use SuspendReason::*;

	fn change(capability: Capability, suspended: bool) -> Change {
		Change {
			capability,
			suspended,
		}
	}

	#[test]
	fn panel_focus_suspends_layout_and_zoom() {
		let mut s = SuspendRequests::default();
		assert_eq!(
			s.acquire(PanelFocus),
			[change(Layout, true), change(Zoom, true)]
		);
		assert_eq!(
			s.release(PanelFocus),
			[change(Layout, false), change(Zoom, false)]
		);
	}

	#[test]
	fn drag_ending_under_panel_focus_keeps_suspension() {
		let mut s = SuspendRequests::default();
		assert_eq!(s.acquire(NodeDrag), [change(Zoom, true)]);
		assert_eq!(s.acquire(PanelFocus), [change(Layout, true)]);
		assert!(s.release(NodeDrag).is_empty());
		assert!(s.is_suspended(Layout));
		assert!(s.is_suspended(Zoom));
		assert_eq!(
			s.release(PanelFocus),
			[change(Layout, false), change(Zoom, false)]
		);
	}

	#[test]
	fn hover_and_drag_share_zoom() {
		let mut s = SuspendRequests::default();
		assert_eq!(s.acquire(NodeHover), [change(Zoom, true)]);
		assert!(s.acquire(NodeDrag).is_empty());
		assert!(s.release(NodeHover).is_empty());
		assert!(!s.is_suspended(Layout));
		assert_eq!(s.release(NodeDrag), [change(Zoom, false)]);
	}

	#[test]
	fn repeated_requests_are_not_double_counted() {
		let mut s = SuspendRequests::default();
		s.acquire(PanelFocus);
		assert!(s.acquire(PanelFocus).is_empty());
		s.release(PanelFocus);
		assert!(!s.is_suspended(Zoom));
		assert!(s.release(PanelFocus).is_empty());
	}
}
