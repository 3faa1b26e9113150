//! Normalized, read-only graph: deduplicated links plus connectivity indexes.

use std::collections::{HashMap, HashSet};

use log::info;

use super::error::DataError;
use super::types::{GraphData, NodeId, NodeKind};

/// Handle to a node owned by a [`GraphModel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) usize);

impl NodeIdx {
	/// Position of the node in load order.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Position of a link in the deduplicated link list.
pub type LinkIdx = usize;

/// A loaded node.
#[derive(Clone, Debug)]
pub struct Node {
	/// Dataset id.
	pub id: NodeId,
	/// Display name, as written in the dataset.
	pub name: String,
	/// Parent or child.
	pub kind: NodeKind,
	/// Topic strings, if the dataset has any.
	pub topics: Option<Vec<String>>,
	/// Topic descriptions, if the dataset has any.
	pub topic_texts: Option<Vec<String>>,
}

/// A resolved link. Endpoints are handles into the owning model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Node the link starts at; its target is one of its children.
	pub source: NodeIdx,
	/// Node the link points to.
	pub target: NodeIdx,
	/// Non-negative weight.
	pub weight: f64,
}

impl Link {
	/// Direction-independent identity of the link.
	fn key(&self) -> (NodeIdx, NodeIdx) {
		if self.source <= self.target {
			(self.source, self.target)
		} else {
			(self.target, self.source)
		}
	}

	/// The endpoint opposite `node`, if the link touches it.
	pub fn other(&self, node: NodeIdx) -> Option<NodeIdx> {
		if self.source == node {
			Some(self.target)
		} else if self.target == node {
			Some(self.source)
		} else {
			None
		}
	}
}

/// Drops every link whose unordered endpoint pair was already seen.
///
/// The first occurrence in input order wins, whichever direction later
/// duplicates point in.
pub fn deduplicate_links(links: Vec<Link>) -> Vec<Link> {
	let mut seen = HashSet::with_capacity(links.len());
	links.into_iter().filter(|l| seen.insert(l.key())).collect()
}

/// Loaded dataset with duplicate links removed and connectivity indexed.
///
/// Read-only once built.
pub struct GraphModel {
	nodes: Vec<Node>,
	by_id: HashMap<NodeId, NodeIdx>,
	links: Vec<Link>,
	neighbors: Vec<Vec<NodeIdx>>,
	children: Vec<Vec<NodeIdx>>,
	parent_rank: Vec<Option<usize>>,
}

impl GraphModel {
	/// Parses a JSON dataset and [`load`](Self::load)s it.
	pub fn from_json(json: &str) -> Result<Self, DataError> {
		let data: GraphData = serde_json::from_str(json)?;
		Self::load(data)
	}

	/// Resolves link endpoints, deduplicates links and builds the indexes.
	pub fn load(data: GraphData) -> Result<Self, DataError> {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut by_id = HashMap::with_capacity(data.nodes.len());

		for raw in data.nodes {
			let idx = NodeIdx(nodes.len());
			if by_id.insert(raw.id.clone(), idx).is_some() {
				return Err(DataError::DuplicateNode { id: raw.id });
			}
			nodes.push(Node {
				id: raw.id,
				name: raw.name,
				kind: raw.kind,
				topics: raw.topics,
				topic_texts: raw.topic_texts,
			});
		}

		let resolve = |link: usize, id: &NodeId| {
			by_id.get(id).copied().ok_or_else(|| DataError::UnknownNode {
				link,
				id: id.clone(),
			})
		};

		let mut links = Vec::with_capacity(data.links.len());
		for (i, raw) in data.links.iter().enumerate() {
			if !raw.weight.is_finite() || raw.weight < 0.0 {
				return Err(DataError::InvalidWeight {
					link: i,
					weight: raw.weight,
				});
			}
			links.push(Link {
				source: resolve(i, &raw.source)?,
				target: resolve(i, &raw.target)?,
				weight: raw.weight,
			});
		}

		let raw_count = links.len();
		let links = deduplicate_links(links);

		let mut neighbors = vec![Vec::new(); nodes.len()];
		let mut children = vec![Vec::new(); nodes.len()];
		for link in &links {
			neighbors[link.source.0].push(link.target);
			if link.source != link.target {
				neighbors[link.target.0].push(link.source);
			}
			children[link.source.0].push(link.target);
		}

		let mut rank = 0;
		let parent_rank = nodes
			.iter()
			.map(|n| {
				(n.kind == NodeKind::Parent).then(|| {
					rank += 1;
					rank - 1
				})
			})
			.collect();

		info!(
			"graph loaded: {} nodes, {} links ({} duplicates dropped)",
			nodes.len(),
			links.len(),
			raw_count - links.len()
		);

		Ok(Self {
			nodes,
			by_id,
			links,
			neighbors,
			children,
			parent_rank,
		})
	}

	/// The node behind `idx`.
	pub fn node(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	/// Handle of the node with dataset id `id`.
	pub fn node_idx(&self, id: &str) -> Option<NodeIdx> {
		self.by_id.get(&NodeId::from(id)).copied()
	}

	/// All nodes in load order.
	pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	/// Deduplicated links in input order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links after deduplication.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Nodes at the opposite end of every link touching `idx`, in link order.
	pub fn neighbors_of(&self, idx: NodeIdx) -> &[NodeIdx] {
		&self.neighbors[idx.0]
	}

	/// Targets of links whose source is `idx`, in link order.
	pub fn children_of(&self, idx: NodeIdx) -> &[NodeIdx] {
		&self.children[idx.0]
	}

	/// Whether `idx` is either endpoint of `link`.
	pub fn link_touches(&self, link: LinkIdx, idx: NodeIdx) -> bool {
		self.links[link].other(idx).is_some()
	}

	/// Ordinal of a parent node among all parents, in load order.
	pub fn parent_rank(&self, idx: NodeIdx) -> Option<usize> {
		self.parent_rank[idx.0]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dataset(nodes: &[(&str, &str)], links: &[(&str, &str)]) -> String {
		let nodes: Vec<String> = nodes
			.iter()
			.map(|(id, kind)| format!(r#"{{"id": "{id}", "name": "{id}", "kind": "{kind}"}}"#))
			.collect();
		let links: Vec<String> = links
			.iter()
			.map(|(s, t)| format!(r#"{{"source": "{s}", "target": "{t}"}}"#))
			.collect();
		format!(r#"{{"nodes": [{}], "links": [{}]}}"#, nodes.join(","), links.join(","))
	}

	fn model(links: &[(&str, &str)]) -> GraphModel {
		let nodes = [("a", "parent"), ("b", "child"), ("c", "child"), ("d", "parent")];
		GraphModel::from_json(&dataset(&nodes, links)).unwrap()
	}

	fn link(s: usize, t: usize, weight: f64) -> Link {
		Link {
			source: NodeIdx(s),
			target: NodeIdx(t),
			weight,
		}
	}

	#[test]
	fn reverse_duplicate_keeps_first_occurrence() {
		let links = vec![link(1, 0, 2.0), link(0, 1, 5.0), link(1, 0, 7.0)];
		assert_eq!(deduplicate_links(links), vec![link(1, 0, 2.0)]);
	}

	#[test]
	fn deduplication_is_stable_and_idempotent() {
		let links = vec![
			link(0, 1, 1.0),
			link(2, 0, 1.0),
			link(0, 2, 1.0),
			link(1, 2, 1.0),
			link(1, 0, 1.0),
			link(3, 3, 1.0),
			link(3, 3, 1.0),
		];
		let once = deduplicate_links(links);
		assert_eq!(
			once,
			vec![link(0, 1, 1.0), link(2, 0, 1.0), link(1, 2, 1.0), link(3, 3, 1.0)]
		);
		assert_eq!(deduplicate_links(once.clone()), once);
	}

	#[test]
	fn neighbors_are_symmetric() {
		let m = model(&[("a", "b"), ("c", "a"), ("b", "c"), ("d", "b")]);
		for l in m.links() {
			assert!(m.neighbors_of(l.source).contains(&l.target));
			assert!(m.neighbors_of(l.target).contains(&l.source));
		}
	}

	#[test]
	fn neighbors_follow_link_order_after_dedup() {
		let m = model(&[("a", "b"), ("c", "a"), ("b", "a"), ("a", "d")]);
		let a = m.node_idx("a").unwrap();
		let names: Vec<&str> = m
			.neighbors_of(a)
			.iter()
			.map(|&n| m.node(n).name.as_str())
			.collect();
		assert_eq!(names, ["b", "c", "d"]);
		assert_eq!(m.link_count(), 3);
	}

	#[test]
	fn children_are_direction_sensitive() {
		let m = model(&[("a", "b"), ("c", "a"), ("a", "d")]);
		let a = m.node_idx("a").unwrap();
		let c = m.node_idx("c").unwrap();
		let children: Vec<&str> = m
			.children_of(a)
			.iter()
			.map(|&n| m.node(n).name.as_str())
			.collect();
		assert_eq!(children, ["b", "d"]);
		assert_eq!(m.children_of(c), &[a]);
		assert!(m.children_of(m.node_idx("b").unwrap()).is_empty());
	}

	#[test]
	fn self_link_counts_once() {
		let m = model(&[("a", "a"), ("a", "a")]);
		let a = m.node_idx("a").unwrap();
		assert_eq!(m.neighbors_of(a), &[a]);
		assert_eq!(m.children_of(a), &[a]);
	}

	#[test]
	fn link_touches_either_endpoint() {
		let m = model(&[("a", "b"), ("c", "d")]);
		let b = m.node_idx("b").unwrap();
		assert!(m.link_touches(0, b));
		assert!(!m.link_touches(1, b));
	}

	#[test]
	fn parents_are_ranked_in_load_order() {
		let m = model(&[]);
		assert_eq!(m.parent_rank(m.node_idx("a").unwrap()), Some(0));
		assert_eq!(m.parent_rank(m.node_idx("b").unwrap()), None);
		assert_eq!(m.parent_rank(m.node_idx("d").unwrap()), Some(1));
	}

	#[test]
	fn unknown_link_endpoint_fails() {
		let json = dataset(&[("a", "parent")], &[("a", "zz")]);
		match GraphModel::from_json(&json) {
			Err(DataError::UnknownNode { link, id }) => {
				assert_eq!(link, 0);
				assert_eq!(id, NodeId::from("zz"));
			}
			other => panic!("expected UnknownNode, got {:?}", other.err()),
		}
	}

	#[test]
	fn duplicate_node_id_fails() {
		let json = dataset(&[("a", "parent"), ("a", "child")], &[]);
		assert!(matches!(
			GraphModel::from_json(&json),
			Err(DataError::DuplicateNode { .. })
		));
	}

	#[test]
	fn negative_weight_fails() {
		let json = r#"{
			"nodes": [{"id": "a", "name": "a", "kind": "parent"}],
			"links": [{"source": "a", "target": "a", "weight": -1}]
		}"#;
		assert!(matches!(
			GraphModel::from_json(json),
			Err(DataError::InvalidWeight { link: 0, .. })
		));
	}

	#[test]
	fn malformed_json_fails() {
		assert!(matches!(
			GraphModel::from_json("{\"nodes\": ["),
			Err(DataError::Parse(_))
		));
	}
}
