//! Default and highlight styling for nodes and links.

use super::model::{GraphModel, NodeIdx};
use super::types::NodeKind;

const PALETTE: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Fill and radius of a single node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// CSS fill color.
	pub fill: &'static str,
	/// Circle radius in world units.
	pub radius: f64,
}

/// Colors and sizes used for default and highlighted styling.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Fill of highlighted nodes and stroke of their links.
	pub accent: &'static str,
	/// Stroke of links that are not highlighted.
	pub link_stroke: &'static str,
	/// Fill of child nodes, and of parents when the palette is empty.
	pub child_fill: &'static str,
	/// Parents cycle through this palette by rank.
	pub palette: &'static [&'static str],
	/// Default radius of parent nodes.
	pub parent_radius: f64,
	/// Default radius of child nodes.
	pub child_radius: f64,
	/// Radius of the highlighted node.
	pub highlight_radius: f64,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			accent: "orange",
			link_stroke: "#aaa",
			child_fill: "#69b3a2",
			palette: PALETTE,
			parent_radius: 10.0,
			child_radius: 5.0,
			highlight_radius: 20.0,
		}
	}
}

impl Theme {
	/// Style of `idx` when nothing highlights it.
	pub fn default_style(&self, model: &GraphModel, idx: NodeIdx) -> NodeStyle {
		match model.node(idx).kind {
			NodeKind::Parent => NodeStyle {
				fill: model
					.parent_rank(idx)
					.and_then(|r| self.palette.get(r % self.palette.len().max(1)))
					.copied()
					.unwrap_or(self.child_fill),
				radius: self.parent_radius,
			},
			NodeKind::Child => NodeStyle {
				fill: self.child_fill,
				radius: self.child_radius,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn model() -> GraphModel {
		GraphModel::from_json(
			r#"{
				"nodes": [
					{"id": "a", "name": "a", "kind": "parent"},
					{"id": "b", "name": "b", "kind": "child"},
					{"id": "c", "name": "c", "kind": "parent"}
				],
				"links": []
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn parents_cycle_through_palette() {
		let m = model();
		let theme = Theme {
			palette: &["red", "blue"],
			..Theme::default()
		};
		let fills: Vec<&str> = m
			.nodes()
			.map(|(idx, _)| theme.default_style(&m, idx).fill)
			.collect();
		assert_eq!(fills, ["red", "#69b3a2", "blue"]);
	}

	#[test]
	fn empty_palette_falls_back_to_child_fill() {
		let m = model();
		let theme = Theme {
			palette: &[],
			..Theme::default()
		};
		let style = theme.default_style(&m, m.node_idx("c").unwrap());
		assert_eq!(style, NodeStyle { fill: "#69b3a2", radius: 10.0 });
	}
}
