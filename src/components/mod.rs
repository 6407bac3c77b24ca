//! Page components.

pub mod footer;
pub mod force_graph;
pub mod graph_view;
pub mod header;
pub mod search_panel;
