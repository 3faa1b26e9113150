use thiserror::Error;

use super::types::NodeId;

/// A dataset that cannot be turned into a [`GraphModel`](super::GraphModel).
///
/// Always fatal: nothing is rendered once loading has failed.
#[derive(Debug, Error)]
pub enum DataError {
	/// No dataset element was found in the document.
	#[error("graph dataset not found in document")]
	MissingDataset,
	/// The dataset is not valid JSON or does not have the expected shape.
	#[error("malformed graph dataset: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{id}`")]
	DuplicateNode {
		/// The repeated id.
		id: NodeId,
	},
	/// A link refers to a node id that is not in the dataset.
	#[error("link #{link} references unknown node `{id}`")]
	UnknownNode {
		/// Position of the link in the dataset.
		link: usize,
		/// The unresolved id.
		id: NodeId,
	},
	/// A link weight is negative, NaN or infinite.
	#[error("link #{link} has invalid weight {weight}")]
	InvalidWeight {
		/// Position of the link in the dataset.
		link: usize,
		/// The rejected weight.
		weight: f64,
	},
}
