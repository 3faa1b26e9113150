//! Info panel content for a node.

use super::model::{GraphModel, NodeIdx};

/// Label of the topic list.
pub const TOPIC_LABEL: &str = "Topic";
/// Label of the topic description list.
pub const TOPIC_TEXT_LABEL: &str = "Topic text";
/// Label of the child name list.
pub const RELATIONS_LABEL: &str = "Relations";

/// A labeled bullet list in the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelSection {
	/// One of the `*_LABEL` constants.
	pub label: &'static str,
	/// Capitalized entries, never empty.
	pub items: Vec<String>,
}

/// Everything the info panel shows for one node, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelContent {
	/// Capitalized node name.
	pub title: String,
	/// Non-empty sections in fixed order.
	pub sections: Vec<PanelSection>,
}

impl PanelContent {
	/// The section labeled `label`, if present.
	pub fn section(&self, label: &str) -> Option<&PanelSection> {
		self.sections.iter().find(|s| s.label == label)
	}
}

/// Uppercases the first character and leaves the rest as-is.
pub fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn section<'a>(
	label: &'static str,
	items: impl IntoIterator<Item = &'a str>,
) -> Option<PanelSection> {
	let items: Vec<String> = items.into_iter().map(capitalize).collect();
	(!items.is_empty()).then_some(PanelSection { label, items })
}

/// Builds the panel for `idx`: title, topics, topic texts, then child names.
/// Sections without data are left out.
pub fn format(idx: NodeIdx, model: &GraphModel) -> PanelContent {
	let node = model.node(idx);
	let topics = node.topics.iter().flatten().map(String::as_str);
	let texts = node.topic_texts.iter().flatten().map(String::as_str);
	let children = model
		.children_of(idx)
		.iter()
		.map(|&c| model.node(c).name.as_str());

	PanelContent {
		title: capitalize(&node.name),
		sections: [
			section(TOPIC_LABEL, topics),
			section(TOPIC_TEXT_LABEL, texts),
			section(RELATIONS_LABEL, children),
		]
		.into_iter()
		.flatten()
		.collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn model() -> GraphModel {
		GraphModel::from_json(
			r#"{
				"nodes": [
					{"id": 1, "name": "ética", "type": "parent", "tema": ["justicia"], "textotema": []},
					{"id": 2, "name": "virtud", "type": "child"},
					{"id": 3, "name": "", "type": "child"},
					{"id": 4, "name": "moral", "type": "parent", "tema": ["bien", "mal"], "textotema": ["sobre el bien"]}
				],
				"links": [
					{"source": 1, "target": 2},
					{"source": 4, "target": 1},
					{"source": 2, "target": 1}
				]
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn capitalizes_first_character_only() {
		assert_eq!(capitalize("justicia social"), "Justicia social");
		assert_eq!(capitalize("ética"), "Ética");
		assert_eq!(capitalize("aBC"), "ABC");
		assert_eq!(capitalize("ßx"), "SSx");
		assert_eq!(capitalize(""), "");
	}

	#[test]
	fn formats_node_with_topics_and_children() {
		let m = model();
		let content = format(m.node_idx("1").unwrap(), &m);

		assert_eq!(content.title, "Ética");
		assert_eq!(content.section(TOPIC_LABEL).unwrap().items, ["Justicia"]);
		assert!(content.section(TOPIC_TEXT_LABEL).is_none());
		assert_eq!(content.section(RELATIONS_LABEL).unwrap().items, ["Virtud"]);
	}

	#[test]
	fn sections_keep_fixed_order() {
		let m = model();
		let content = format(m.node_idx("4").unwrap(), &m);
		let labels: Vec<&str> = content.sections.iter().map(|s| s.label).collect();

		assert_eq!(content.title, "Moral");
		assert_eq!(labels, [TOPIC_LABEL, TOPIC_TEXT_LABEL, RELATIONS_LABEL]);
		assert_eq!(content.sections[0].items, ["Bien", "Mal"]);
		assert_eq!(content.sections[1].items, ["Sobre el bien"]);
		assert_eq!(content.sections[2].items, ["Ética"]);
	}

	#[test]
	fn empty_name_yields_empty_title() {
		let m = model();
		let content = format(m.node_idx("3").unwrap(), &m);
		assert_eq!(content.title, "");
		assert!(content.sections.is_empty());
	}

	#[test]
	fn reverse_duplicate_does_not_add_relation() {
		let m = model();
		// 2 -> 1 duplicates 1 -> 2 and was dropped
		assert!(format(m.node_idx("2").unwrap(), &m).section(RELATIONS_LABEL).is_none());
	}
}
