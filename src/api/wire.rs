//! JSON bodies exchanged with the analysis service.

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::components::force_graph::{
	EdgeId, GraphData, GraphEdge, GraphNode, NodeId, Sentiment,
};

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
	pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SentimentRequest<'a> {
	pub node_id: &'a NodeId,
	pub sentiment: Sentiment,
}

#[derive(Debug, Serialize)]
pub struct NodeRequest<'a> {
	pub node_id: &'a NodeId,
}

#[derive(Debug, Serialize)]
pub struct EdgeRequest<'a> {
	pub from: &'a NodeId,
	pub to: &'a NodeId,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireNode {
	pub id: NodeId,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub sentiment: Option<Sentiment>,
	#[serde(default)]
	pub value: Option<f64>,
	#[serde(default)]
	pub is_special: Option<bool>,
	/// The service only sends an explicit color for special nodes.
	#[serde(default)]
	pub color: Option<serde_json::Value>,
}

impl From<WireNode> for GraphNode {
	fn from(wire: WireNode) -> Self {
		let special = wire.is_special.unwrap_or(wire.color.is_some());
		let mut node = GraphNode::new(wire.id).with_sentiment(wire.sentiment.unwrap_or_default());
		if let Some(label) = wire.label {
			node = node.with_label(label);
		}
		node.special = special;
		node.value = wire.value;
		node
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireEdge {
	#[serde(default)]
	pub id: Option<String>,
	pub from: NodeId,
	pub to: NodeId,
	#[serde(default)]
	pub value: Option<f64>,
}

impl From<WireEdge> for GraphEdge {
	fn from(wire: WireEdge) -> Self {
		let id = wire
			.id
			.map(EdgeId::from)
			.unwrap_or_else(|| EdgeId::between(&wire.from, &wire.to));
		GraphEdge {
			id,
			from: wire.from,
			to: wire.to,
			value: wire.value,
		}
	}
}

/// Body of a successful or failed `/analyze` call.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalysisResult {
	#[serde(default)]
	pub nodes: Vec<WireNode>,
	#[serde(default)]
	pub edges: Vec<WireEdge>,
	#[serde(default)]
	pub error: Option<String>,
}

impl AnalysisResult {
	pub fn into_graph(self) -> Result<GraphData, ApiError> {
		if let Some(message) = self.error {
			return Err(ApiError::Rejected { message });
		}
		Ok(GraphData {
			nodes: self.nodes.into_iter().map(GraphNode::from).collect(),
			edges: self.edges.into_iter().map(GraphEdge::from).collect(),
		})
	}
}

/// `{ "status": ..., "message"?, "is_special"? }`
#[derive(Clone, Debug, Deserialize)]
pub struct StatusReply {
	pub status: String,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub is_special: Option<bool>,
}

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_CLEARED: &str = "cleared";

impl StatusReply {
	pub fn expect_status(self, expected: &str) -> Result<Self, ApiError> {
		if self.status == expected {
			return Ok(self);
		}
		let message = self
			.message
			.unwrap_or_else(|| format!("unexpected status `{}`", self.status));
		Err(ApiError::Rejected { message })
	}
}
