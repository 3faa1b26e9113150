//! Canvas engine for the graph: force layout via `force_graph`, drawing on a
//! 2d context, and pointer/wheel handling that feeds the interaction bridge.

mod component;
mod render;
mod state;

pub use component::ForceGraphCanvas;
