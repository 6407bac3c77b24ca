//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Hover tooltips and neighbourhood highlighting
//! - Automatic fit-to-view once the layout settles
//!
//! # Example
//!
//! ```ignore
//! use cosmic_network::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
//!
//! let data = GraphData {
//!     nodes: vec![GraphNode::bare("octocat"), GraphNode::bare("hubot")],
//!     links: vec![GraphLink { source: "octocat".into(), target: "hubot".into() }],
//! };
//!
//! view! { <ForceGraphCanvas data=Signal::derive(move || data.clone()) /> }
//! ```

mod component;
mod frame;
mod render;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode};
