//! Client side of the analysis/storage service.

mod http;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::components::force_graph::{GraphData, NodeId, Sentiment};

pub use http::HttpGraphService;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Transport(String),
	#[error("no response after {after_ms} ms")]
	Timeout { after_ms: u64 },
	/// Non-2xx HTTP status.
	#[error("service answered HTTP {code}")]
	Status { code: u16 },
	/// 2xx response whose body reports a failure.
	#[error("service rejected the request: {message}")]
	Rejected { message: String },
	#[error("malformed response: {0}")]
	Decode(String),
	#[error("could not encode request: {0}")]
	Encode(String),
}

/// The remote calls the edit client makes. Every method resolves only once
/// the service has confirmed (or refused) the change.
#[async_trait(?Send)]
pub trait GraphService {
	async fn analyze(&self, text: &str) -> Result<GraphData, ApiError>;
	async fn update_sentiment(&self, node: &NodeId, sentiment: Sentiment) -> Result<(), ApiError>;
	async fn remove_node(&self, node: &NodeId) -> Result<(), ApiError>;
	async fn create_edge(&self, from: &NodeId, to: &NodeId) -> Result<(), ApiError>;
	async fn clear(&self) -> Result<(), ApiError>;
	/// Returns the node's special flag after the flip.
	async fn toggle_special(&self, node: &NodeId) -> Result<bool, ApiError>;
}
