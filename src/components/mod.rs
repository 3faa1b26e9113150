pub mod force_graph;
pub mod info_panel;
