//! Engine-independent core: dataset normalization, selection and panel
//! content, plus the bridge that drives a [`RenderEngine`].

mod bridge;
pub mod content;
mod error;
mod model;
pub mod selection;
pub mod suspend;
mod theme;
mod types;

pub use bridge::{EngineEvent, InteractionBridge, RenderEngine};
pub use content::{PanelContent, PanelSection};
pub use error::DataError;
pub use model::{GraphModel, Link, LinkIdx, Node, NodeIdx, deduplicate_links};
pub use selection::Selection;
pub use theme::{NodeStyle, Theme};
pub use types::{GraphData, GraphLink, GraphNode, NodeId, NodeKind};
