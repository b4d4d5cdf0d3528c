use std::future::Future;

use async_trait::async_trait;
use futures_util::future::{Either, select};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::wire::{
	AnalysisResult, AnalyzeRequest, EdgeRequest, NodeRequest, STATUS_CLEARED, STATUS_SUCCESS,
	SentimentRequest, StatusReply,
};
use super::{ApiError, GraphService};
use crate::components::force_graph::{GraphData, NodeId, Sentiment};
use crate::config::EditorConfig;

/// `fetch`-backed service client. Every call races a timeout.
#[derive(Clone, Debug)]
pub struct HttpGraphService {
	config: EditorConfig,
}

impl HttpGraphService {
	pub fn new(config: EditorConfig) -> Self {
		Self { config }
	}

	async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
	where
		B: Serialize + ?Sized,
		R: DeserializeOwned,
	{
		let url = self.config.endpoint(path);
		let request = Request::post(&url)
			.json(body)
			.map_err(|e| ApiError::Encode(e.to_string()))?;
		self.exchange(&url, request.send()).await
	}

	async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
		let url = self.config.endpoint(path);
		self.exchange(&url, Request::post(&url).send()).await
	}

	async fn exchange<R, F>(&self, url: &str, send: F) -> Result<R, ApiError>
	where
		R: DeserializeOwned,
		F: Future<Output = Result<Response, gloo_net::Error>>,
	{
		debug!("POST {url}");
		let call = async move {
			let response = send
				.await
				.map_err(|e| ApiError::Transport(e.to_string()))?;
			if !response.ok() {
				return Err(ApiError::Status {
					code: response.status(),
				});
			}
			response
				.json::<R>()
				.await
				.map_err(|e| ApiError::Decode(e.to_string()))
		};

		let after_ms = self.config.request_timeout.as_millis().min(u32::MAX as u128) as u32;
		match select(Box::pin(call), Box::pin(TimeoutFuture::new(after_ms))).await {
			Either::Left((result, _)) => result,
			Either::Right(((), _)) => Err(ApiError::Timeout {
				after_ms: after_ms as u64,
			}),
		}
	}
}

#[async_trait(?Send)]
impl GraphService for HttpGraphService {
	async fn analyze(&self, text: &str) -> Result<GraphData, ApiError> {
		let reply: AnalysisResult = self.post_json("analyze", &AnalyzeRequest { text }).await?;
		reply.into_graph()
	}

	async fn update_sentiment(&self, node: &NodeId, sentiment: Sentiment) -> Result<(), ApiError> {
		let body = SentimentRequest {
			node_id: node,
			sentiment,
		};
		let reply: StatusReply = self.post_json("update_sentiment", &body).await?;
		reply.expect_status(STATUS_SUCCESS).map(|_| ())
	}

	async fn remove_node(&self, node: &NodeId) -> Result<(), ApiError> {
		let reply: StatusReply = self
			.post_json("remove_node", &NodeRequest { node_id: node })
			.await?;
		reply.expect_status(STATUS_SUCCESS).map(|_| ())
	}

	async fn create_edge(&self, from: &NodeId, to: &NodeId) -> Result<(), ApiError> {
		let reply: StatusReply = self
			.post_json("create_edge", &EdgeRequest { from, to })
			.await?;
		reply.expect_status(STATUS_SUCCESS).map(|_| ())
	}

	async fn clear(&self) -> Result<(), ApiError> {
		let reply: StatusReply = self.post_empty("clear").await?;
		reply.expect_status(STATUS_CLEARED).map(|_| ())
	}

	async fn toggle_special(&self, node: &NodeId) -> Result<bool, ApiError> {
		let reply: StatusReply = self
			.post_json("toggle_special_node", &NodeRequest { node_id: node })
			.await?;
		let reply = reply.expect_status(STATUS_SUCCESS)?;
		reply.is_special.ok_or_else(|| {
			ApiError::Decode("toggle reply is missing `is_special`".into())
		})
	}
}
