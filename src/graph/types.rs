//! Raw dataset shapes, as deserialized from the embedded JSON document.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Node identifier as written in the dataset.
///
/// The converter that produces datasets numbers its nodes, while hand-written
/// datasets tend to use strings; both spellings normalize to the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_owned())
	}
}

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Repr {
			Text(String),
			Int(i64),
		}

		Ok(match Repr::deserialize(deserializer)? {
			Repr::Text(s) => Self(s),
			Repr::Int(n) => Self(n.to_string()),
		})
	}
}

/// Whether a node is a top-level category or a keyword hanging off one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// A category node.
	Parent,
	/// A keyword node.
	Child,
}

/// A node in the dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, referenced by links.
	pub id: NodeId,
	/// Display name.
	pub name: String,
	/// Parent or child.
	#[serde(alias = "type")]
	pub kind: NodeKind,
	/// Ordered topic strings.
	#[serde(default, alias = "tema")]
	pub topics: Option<Vec<String>>,
	/// Ordered topic descriptions.
	#[serde(default, alias = "textotema")]
	pub topic_texts: Option<Vec<String>>,
}

/// A link between two nodes. `target` is a child of `source`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: NodeId,
	/// Target node ID.
	pub target: NodeId,
	/// Non-negative link weight, drawn as stroke width.
	#[serde(default = "default_weight", alias = "value")]
	pub weight: f64,
}

fn default_weight() -> f64 {
	1.0
}

/// Complete dataset: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All nodes; ids must be unique.
	pub nodes: Vec<GraphNode>,
	/// Links between nodes, possibly with duplicates.
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_converter_field_names_and_numeric_ids() {
		let data: GraphData = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": 1, "name": "etica", "type": "parent", "tema": ["justicia"], "textotema": []},
					{"id": 2, "name": "virtud", "type": "child"}
				],
				"links": [{"source": 1, "target": 2}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[0].id, NodeId::from("1"));
		assert_eq!(data.nodes[0].kind, NodeKind::Parent);
		assert_eq!(data.nodes[0].topics.as_deref(), Some(&["justicia".to_owned()][..]));
		assert_eq!(data.nodes[0].topic_texts.as_deref(), Some(&[][..]));
		assert!(data.nodes[1].topics.is_none());
		assert_eq!(data.links[0].target, NodeId::from("2"));
		assert_eq!(data.links[0].weight, 1.0);
	}

	#[test]
	fn accepts_canonical_field_names() {
		let data: GraphData = serde_json::from_str(
			r#"{
				"nodes": [{"id": "a", "name": "A", "kind": "child", "topics": ["x"]}],
				"links": [{"source": "a", "target": "a", "weight": 4}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[0].kind, NodeKind::Child);
		assert_eq!(data.links[0].weight, 4.0);
	}

	#[test]
	fn rejects_unknown_kind() {
		let res = serde_json::from_str::<GraphData>(
			r#"{"nodes": [{"id": "a", "name": "A", "kind": "cousin"}], "links": []}"#,
		);
		assert!(res.is_err());
	}
}
