mod component;
pub mod palette;
mod render;
mod state;
mod types;
mod view;

pub use component::{ForceGraphCanvas, SurfaceEvent, SurfaceEventHandler};
pub use state::{ForceGraphState, GraphSurface};
pub use types::{EdgeId, GraphData, GraphEdge, GraphNode, NodeId, Sentiment};
#[cfg(test)]
pub use view::GraphModel;
pub use view::GraphView;
