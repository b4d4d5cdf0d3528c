pub mod force_graph;
pub mod notices;
pub mod sentiment_panel;
