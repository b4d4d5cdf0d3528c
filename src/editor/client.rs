use std::cell::RefCell;

use log::{debug, error, info, warn};

use super::error::{Action, EditorError};
use super::events::EditorEvent;
use super::session::SessionState;
use super::ui::{EditorUi, Notice};
use crate::api::GraphService;
use crate::components::force_graph::{EdgeId, GraphEdge, GraphNode, GraphView, NodeId, Sentiment};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this node?";

/// What a connect click did.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeStep {
	/// Modifier not held; nothing happened.
	Ignored,
	/// First endpoint recorded.
	Pending(NodeId),
	Created(EdgeId),
}

/// Turns UI events into service calls and applies confirmed results to the
/// view. Local state only changes after the service says yes.
pub struct GraphEditClient<S, V, U> {
	service: S,
	view: RefCell<V>,
	ui: U,
	session: RefCell<SessionState>,
}

/// Holds the analyze/clear slot; releases it on drop.
struct RequestSlot<'a, U: EditorUi> {
	session: &'a RefCell<SessionState>,
	ui: &'a U,
}

impl<U: EditorUi> Drop for RequestSlot<'_, U> {
	fn drop(&mut self) {
		self.session.borrow_mut().finish_request();
		self.ui.set_busy(false);
	}
}

impl<S, V, U> GraphEditClient<S, V, U>
where
	S: GraphService,
	V: GraphView,
	U: EditorUi,
{
	pub fn new(service: S, view: V, ui: U) -> Self {
		Self {
			service,
			view: RefCell::new(view),
			ui,
			session: RefCell::new(SessionState::default()),
		}
	}

	#[cfg(test)]
	pub fn service(&self) -> &S {
		&self.service
	}

	#[cfg(test)]
	pub fn ui(&self) -> &U {
		&self.ui
	}

	#[cfg(test)]
	pub fn session(&self) -> SessionState {
		self.session.borrow().clone()
	}

	#[cfg(test)]
	pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
		f(&self.view.borrow())
	}

	pub async fn handle(&self, event: EditorEvent) {
		match event {
			EditorEvent::NodeSelected(id) => {
				let _ = self.select_node(id).await;
			}
			EditorEvent::NodeDeselected => self.deselect_node(),
			EditorEvent::ModifierPressed => self.session.borrow_mut().press_modifier(),
			EditorEvent::ModifierReleased => {
				self.session.borrow_mut().release_modifier();
				self.mark_selection();
			}
			EditorEvent::DeletePressed => {
				let armed = {
					let session = self.session.borrow();
					session.panel_visible && session.active_node.is_some()
				};
				if armed {
					let _ = self.delete_active_node().await;
				}
			}
		}
	}

	/// Send `text` for analysis and show the returned graph. The input is
	/// cleared whatever happens.
	pub async fn submit_text(&self, text: &str) -> Result<(), EditorError> {
		let result = self.analyze(text).await;
		self.ui.clear_input();
		self.report(result)
	}

	async fn analyze(&self, text: &str) -> Result<(), EditorError> {
		if text.trim().is_empty() {
			return Err(EditorError::EmptyInput);
		}
		let _slot = self.claim_request_slot()?;
		let graph = self
			.service
			.analyze(text)
			.await
			.map_err(Action::Analyze.remote())?;
		info!(
			"Analysis returned {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);

		let summary = {
			let mut view = self.view.borrow_mut();
			view.set_data(graph);
			view.fit();
			format!(
				"Graph updated: {} nodes, {} edges",
				view.node_count(),
				view.edge_count()
			)
		};
		self.session.borrow_mut().reset_selection();
		self.ui.set_panel_visible(false);
		self.mark_selection();
		self.ui.notify(Notice::info(summary));
		Ok(())
	}

	/// Plain click makes `id` active; with the modifier held it is a connect click.
	pub async fn select_node(&self, id: NodeId) -> Result<(), EditorError> {
		if self.session.borrow().modifier_held {
			return self.begin_or_complete_edge(id).await.map(|_| ());
		}
		debug!("Selected node {id}");
		{
			let mut session = self.session.borrow_mut();
			session.active_node = Some(id);
			session.panel_visible = true;
		}
		self.ui.set_panel_visible(true);
		self.mark_selection();
		Ok(())
	}

	pub fn deselect_node(&self) {
		{
			let mut session = self.session.borrow_mut();
			session.active_node = None;
			session.panel_visible = false;
		}
		self.ui.set_panel_visible(false);
		self.mark_selection();
	}

	pub async fn delete_active_node(&self) -> Result<(), EditorError> {
		let result = self.delete_inner().await;
		self.report(result)
	}

	async fn delete_inner(&self) -> Result<(), EditorError> {
		let id = self.active_node()?;
		if !self.ui.confirm(DELETE_PROMPT) {
			return Err(EditorError::Cancelled);
		}
		self.service
			.remove_node(&id)
			.await
			.map_err(Action::RemoveNode.remote())?;
		info!("Removed node {id}");

		{
			let mut view = self.view.borrow_mut();
			view.remove_node(&id);
			view.fit();
		}
		{
			let mut session = self.session.borrow_mut();
			if session.active_node.as_ref() == Some(&id) {
				session.active_node = None;
			}
			if session.pending_endpoint.as_ref() == Some(&id) {
				session.pending_endpoint = None;
			}
			session.panel_visible = false;
		}
		self.ui.set_panel_visible(false);
		self.mark_selection();
		Ok(())
	}

	pub async fn assign_sentiment(&self, sentiment: Sentiment) -> Result<(), EditorError> {
		let result = self.assign_inner(sentiment).await;
		self.report(result)
	}

	async fn assign_inner(&self, sentiment: Sentiment) -> Result<(), EditorError> {
		let id = self.active_node()?;
		self.service
			.update_sentiment(&id, sentiment)
			.await
			.map_err(Action::UpdateSentiment.remote())?;
		info!("Node {id} is now {}", sentiment.as_str());

		self.patch_node(&id, |node| node.sentiment = sentiment);
		self.view.borrow_mut().redraw();
		self.session.borrow_mut().panel_visible = false;
		self.ui.set_panel_visible(false);
		Ok(())
	}

	pub async fn toggle_special(&self) -> Result<bool, EditorError> {
		let result = self.toggle_inner().await;
		self.report(result)
	}

	async fn toggle_inner(&self) -> Result<bool, EditorError> {
		let id = self.active_node()?;
		let special = self
			.service
			.toggle_special(&id)
			.await
			.map_err(Action::ToggleSpecial.remote())?;
		info!("Node {id} special: {special}");

		self.patch_node(&id, |node| node.special = special);
		let mut view = self.view.borrow_mut();
		view.redraw();
		view.stabilize();
		Ok(special)
	}

	/// One click of the two-click connect gesture. Only acts while the
	/// modifier is held; the pending endpoint is consumed by every second click.
	pub async fn begin_or_complete_edge(&self, node_id: NodeId) -> Result<EdgeStep, EditorError> {
		let result = self.edge_inner(node_id).await;
		self.report(result)
	}

	async fn edge_inner(&self, node_id: NodeId) -> Result<EdgeStep, EditorError> {
		let pending = {
			let mut session = self.session.borrow_mut();
			if !session.modifier_held {
				return Ok(EdgeStep::Ignored);
			}
			match session.take_pending() {
				Some(pending) => pending,
				None => {
					session.pending_endpoint = Some(node_id.clone());
					drop(session);
					self.mark_selection();
					debug!("Connect gesture started at {node_id}");
					return Ok(EdgeStep::Pending(node_id));
				}
			}
		};
		self.mark_selection();

		if pending == node_id {
			return Err(EditorError::SelfLoop);
		}
		if self.view.borrow().has_edge_between(&pending, &node_id) {
			return Err(EditorError::DuplicateEdge {
				from: pending,
				to: node_id,
			});
		}

		self.service
			.create_edge(&pending, &node_id)
			.await
			.map_err(Action::CreateEdge.remote())?;

		let edge = GraphEdge::new(pending, node_id);
		let id = edge.id.clone();
		let mut view = self.view.borrow_mut();
		if view.add_edge(edge) {
			info!("Created edge {id}");
		} else {
			warn!("Edge {id} confirmed remotely but an endpoint is gone locally");
		}
		view.redraw();
		Ok(EdgeStep::Created(id))
	}

	pub async fn clear_all(&self) -> Result<(), EditorError> {
		let result = self.clear_inner().await;
		self.report(result)
	}

	async fn clear_inner(&self) -> Result<(), EditorError> {
		let _slot = self.claim_request_slot()?;
		self.service.clear().await.map_err(Action::Clear.remote())?;
		info!("Graph cleared");

		self.view.borrow_mut().clear();
		self.ui.clear_input();
		self.session.borrow_mut().reset_selection();
		self.ui.set_panel_visible(false);
		self.mark_selection();
		Ok(())
	}

	fn active_node(&self) -> Result<NodeId, EditorError> {
		self.session
			.borrow()
			.active_node
			.clone()
			.ok_or(EditorError::NoActiveNode)
	}

	fn claim_request_slot(&self) -> Result<RequestSlot<'_, U>, EditorError> {
		if !self.session.borrow_mut().begin_request() {
			return Err(EditorError::Busy);
		}
		self.ui.set_busy(true);
		Ok(RequestSlot {
			session: &self.session,
			ui: &self.ui,
		})
	}

	fn patch_node(&self, id: &NodeId, patch: impl FnOnce(&mut GraphNode)) {
		let mut view = self.view.borrow_mut();
		let Some(mut node) = view.node(id) else {
			warn!("Node {id} confirmed remotely but no longer shown");
			return;
		};
		patch(&mut node);
		view.update_node(node);
	}

	fn mark_selection(&self) {
		let session = self.session.borrow();
		self.view.borrow_mut().show_selection(
			session.active_node.as_ref(),
			session.pending_endpoint.as_ref(),
		);
	}

	/// Log and surface a failure once. Cancellation stays silent.
	fn report<T>(&self, result: Result<T, EditorError>) -> Result<T, EditorError> {
		if let Err(err) = &result {
			if err.is_cancelled() {
				debug!("Action cancelled by user");
			} else if err.is_validation() {
				warn!("{err}");
				self.ui.notify(Notice::warning(err.to_string()));
			} else {
				error!("{err}");
				self.ui.notify(Notice::error(err.to_string()));
			}
		}
		result
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use async_trait::async_trait;
	use futures_util::future::join;

	use super::*;
	use crate::api::ApiError;
	use crate::components::force_graph::palette::{
		DEFAULT_BACKGROUND, POSITIVE_BACKGROUND, SPECIAL_BACKGROUND,
	};
	use crate::components::force_graph::{GraphData, GraphModel};
	use crate::editor::events::focus_lost;
	use crate::editor::ui::NoticeLevel;

	#[derive(Clone, Debug, PartialEq)]
	enum Call {
		Analyze(String),
		UpdateSentiment(NodeId, Sentiment),
		RemoveNode(NodeId),
		CreateEdge(NodeId, NodeId),
		Clear,
		ToggleSpecial(NodeId),
	}

	#[derive(Default)]
	struct MockService {
		calls: RefCell<Vec<Call>>,
		offline: Cell<bool>,
		analysis: RefCell<GraphData>,
		special: RefCell<std::collections::HashMap<NodeId, bool>>,
	}

	impl MockService {
		fn record(&self, call: Call) -> Result<(), ApiError> {
			self.calls.borrow_mut().push(call);
			if self.offline.get() {
				return Err(ApiError::Transport("offline".into()));
			}
			Ok(())
		}

		fn calls(&self) -> Vec<Call> {
			self.calls.borrow().clone()
		}
	}

	#[async_trait(?Send)]
	impl GraphService for MockService {
		async fn analyze(&self, text: &str) -> Result<GraphData, ApiError> {
			self.record(Call::Analyze(text.into()))?;
			tokio::task::yield_now().await;
			Ok(self.analysis.borrow().clone())
		}

		async fn update_sentiment(&self, node: &NodeId, sentiment: Sentiment) -> Result<(), ApiError> {
			self.record(Call::UpdateSentiment(node.clone(), sentiment))
		}

		async fn remove_node(&self, node: &NodeId) -> Result<(), ApiError> {
			self.record(Call::RemoveNode(node.clone()))
		}

		async fn create_edge(&self, from: &NodeId, to: &NodeId) -> Result<(), ApiError> {
			self.record(Call::CreateEdge(from.clone(), to.clone()))
		}

		async fn clear(&self) -> Result<(), ApiError> {
			self.record(Call::Clear)?;
			tokio::task::yield_now().await;
			Ok(())
		}

		async fn toggle_special(&self, node: &NodeId) -> Result<bool, ApiError> {
			self.record(Call::ToggleSpecial(node.clone()))?;
			let mut special = self.special.borrow_mut();
			let flag = special.entry(node.clone()).or_insert(false);
			*flag = !*flag;
			Ok(*flag)
		}
	}

	struct RecordingUi {
		notices: RefCell<Vec<Notice>>,
		prompts: RefCell<Vec<String>>,
		answer: Cell<bool>,
		panel: Cell<bool>,
		input_clears: Cell<usize>,
	}

	impl Default for RecordingUi {
		fn default() -> Self {
			Self {
				notices: RefCell::default(),
				prompts: RefCell::default(),
				answer: Cell::new(true),
				panel: Cell::new(false),
				input_clears: Cell::new(0),
			}
		}
	}

	impl EditorUi for RecordingUi {
		fn notify(&self, notice: Notice) {
			self.notices.borrow_mut().push(notice);
		}

		fn confirm(&self, question: &str) -> bool {
			self.prompts.borrow_mut().push(question.into());
			self.answer.get()
		}

		fn set_panel_visible(&self, visible: bool) {
			self.panel.set(visible);
		}

		fn clear_input(&self) {
			self.input_clears.set(self.input_clears.get() + 1);
		}
	}

	type Client = GraphEditClient<MockService, GraphModel, RecordingUi>;

	fn alice_loves_bob() -> GraphData {
		serde_json::from_value::<crate::api::wire::AnalysisResult>(serde_json::json!({
			"nodes": [
				{"id": 1, "label": "Alice", "sentiment": "positive"},
				{"id": 2, "label": "Bob"}
			],
			"edges": [{"id": "1-2", "from": 1, "to": 2}]
		}))
		.unwrap()
		.into_graph()
		.unwrap()
	}

	async fn loaded() -> Client {
		let service = MockService::default();
		*service.analysis.borrow_mut() = alice_loves_bob();
		let client = GraphEditClient::new(service, GraphModel::default(), RecordingUi::default());
		client.submit_text("Alice loves Bob").await.unwrap();
		client.service().calls.borrow_mut().clear();
		client.ui().notices.borrow_mut().clear();
		client
	}

	fn node(client: &Client, id: i64) -> Option<GraphNode> {
		client.with_view(|v| v.node(&NodeId::Int(id)))
	}

	fn last_notice(client: &Client) -> Option<Notice> {
		client.ui().notices.borrow().last().cloned()
	}

	#[tokio::test]
	async fn whitespace_input_makes_no_call() {
		let client = GraphEditClient::new(
			MockService::default(),
			GraphModel::default(),
			RecordingUi::default(),
		);
		for text in ["", "   ", "\n\t "] {
			assert_eq!(client.submit_text(text).await, Err(EditorError::EmptyInput));
		}
		assert!(client.service().calls().is_empty());
		assert_eq!(client.ui().input_clears.get(), 3);
		assert_eq!(
			last_notice(&client).map(|n| n.level),
			Some(NoticeLevel::Warning)
		);
	}

	#[tokio::test]
	async fn analysis_renders_returned_graph() {
		let client = loaded().await;
		client.with_view(|v| {
			assert_eq!(v.node_count(), 2);
			assert_eq!(v.edge_count(), 1);
		});
		let alice = node(&client, 1).unwrap();
		assert_eq!(alice.style().background, POSITIVE_BACKGROUND);
		assert_eq!(node(&client, 2).unwrap().style().background, DEFAULT_BACKGROUND);
		assert_eq!(client.ui().input_clears.get(), 1);

		client.submit_text("again").await.unwrap();
		assert_eq!(
			last_notice(&client),
			Some(Notice::info("Graph updated: 2 nodes, 1 edges"))
		);
	}

	#[tokio::test]
	async fn failed_analysis_keeps_previous_graph() {
		let client = loaded().await;
		client.service().offline.set(true);
		let before = client.with_view(|v| v.clone());

		let err = client.submit_text("more text").await.unwrap_err();
		assert!(matches!(err, EditorError::Remote { action: Action::Analyze, .. }));
		assert_eq!(client.with_view(|v| v.clone()), before);
		assert_eq!(client.ui().input_clears.get(), 2);
		assert_eq!(last_notice(&client).map(|n| n.level), Some(NoticeLevel::Error));
		assert!(!client.session().analysis_in_flight);
	}

	#[tokio::test]
	async fn overlapping_submissions_are_rejected() {
		let client = loaded().await;
		let (first, second) = join(client.submit_text("one"), client.submit_text("two")).await;
		assert!(first.is_ok());
		assert_eq!(second, Err(EditorError::Busy));
		assert_eq!(client.service().calls(), vec![Call::Analyze("one".into())]);
		assert!(client.submit_text("three").await.is_ok());
	}

	#[tokio::test]
	async fn plain_click_activates_node() {
		let client = loaded().await;
		client.handle(EditorEvent::NodeSelected(NodeId::Int(2))).await;
		assert_eq!(client.session().active_node, Some(NodeId::Int(2)));
		assert!(client.ui().panel.get());

		client.handle(EditorEvent::NodeDeselected).await;
		assert!(!client.ui().panel.get());
		assert_eq!(client.session().active_node, None);
	}

	#[tokio::test]
	async fn connect_gesture_issues_one_create_call() {
		let service = MockService::default();
		*service.analysis.borrow_mut() = GraphData {
			nodes: vec![GraphNode::new(1), GraphNode::new(2)],
			edges: vec![],
		};
		let client = GraphEditClient::new(service, GraphModel::default(), RecordingUi::default());
		client.submit_text("x").await.unwrap();
		client.service().calls.borrow_mut().clear();

		client.handle(EditorEvent::ModifierPressed).await;
		let first = client.begin_or_complete_edge(NodeId::Int(1)).await;
		assert_eq!(first, Ok(EdgeStep::Pending(NodeId::Int(1))));
		let second = client.begin_or_complete_edge(NodeId::Int(2)).await;
		assert_eq!(second, Ok(EdgeStep::Created(EdgeId::between(&NodeId::Int(1), &NodeId::Int(2)))));

		assert_eq!(
			client.service().calls(),
			vec![Call::CreateEdge(NodeId::Int(1), NodeId::Int(2))]
		);
		client.with_view(|v| assert!(v.has_edge(&EdgeId::from("1-2".to_string()))));
		assert_eq!(client.session().pending_endpoint, None);
		assert_eq!(client.session().active_node, None);
	}

	#[tokio::test]
	async fn self_loop_never_reaches_service() {
		let client = loaded().await;
		client.handle(EditorEvent::ModifierPressed).await;
		client.handle(EditorEvent::NodeSelected(NodeId::Int(1))).await;
		let result = client.select_node(NodeId::Int(1)).await;
		assert_eq!(result, Err(EditorError::SelfLoop));
		assert!(client.service().calls().is_empty());
		assert_eq!(client.session().pending_endpoint, None);
	}

	#[tokio::test]
	async fn duplicate_in_either_direction_never_reaches_service() {
		let client = loaded().await;
		client.handle(EditorEvent::ModifierPressed).await;
		for (a, b) in [(1, 2), (2, 1)] {
			client.begin_or_complete_edge(NodeId::Int(a)).await.unwrap();
			let result = client.begin_or_complete_edge(NodeId::Int(b)).await;
			assert!(matches!(result, Err(EditorError::DuplicateEdge { .. })));
		}
		assert!(client.service().calls().is_empty());
		assert_eq!(client.ui().notices.borrow().len(), 2);
	}

	#[tokio::test]
	async fn service_edge_ids_do_not_hide_existing_pairs() {
		let service = MockService::default();
		*service.analysis.borrow_mut() =
			serde_json::from_value::<crate::api::wire::AnalysisResult>(serde_json::json!({
				"nodes": [{"id": 1}, {"id": 2}],
				"edges": [{"id": "e1", "from": 1, "to": 2}]
			}))
			.unwrap()
			.into_graph()
			.unwrap();
		let client = GraphEditClient::new(service, GraphModel::default(), RecordingUi::default());
		client.submit_text("x").await.unwrap();
		client.service().calls.borrow_mut().clear();

		client.handle(EditorEvent::ModifierPressed).await;
		client.begin_or_complete_edge(NodeId::Int(2)).await.unwrap();
		let result = client.begin_or_complete_edge(NodeId::Int(1)).await;
		assert!(matches!(result, Err(EditorError::DuplicateEdge { .. })));
		assert!(client.service().calls().is_empty());
		assert_eq!(client.with_view(|v| v.edge_count()), 1);
	}

	#[tokio::test]
	async fn releasing_modifier_abandons_gesture() {
		let client = loaded().await;
		client.handle(EditorEvent::ModifierPressed).await;
		client.handle(EditorEvent::NodeSelected(NodeId::Int(1))).await;
		assert_eq!(client.session().pending_endpoint, Some(NodeId::Int(1)));

		client.handle(EditorEvent::ModifierReleased).await;
		assert_eq!(client.session().pending_endpoint, None);
		assert_eq!(
			client.begin_or_complete_edge(NodeId::Int(2)).await,
			Ok(EdgeStep::Ignored)
		);
		assert!(client.service().calls().is_empty());
	}

	#[tokio::test]
	async fn losing_focus_drops_a_held_modifier() {
		let client = loaded().await;
		client.handle(EditorEvent::ModifierPressed).await;
		client.handle(EditorEvent::NodeSelected(NodeId::Int(1))).await;
		client.handle(focus_lost()).await;
		assert!(!client.session().modifier_held);
		assert_eq!(client.session().pending_endpoint, None);

		client.handle(EditorEvent::NodeSelected(NodeId::Int(2))).await;
		assert_eq!(client.session().active_node, Some(NodeId::Int(2)));
		assert!(client.service().calls().is_empty());
	}

	#[tokio::test]
	async fn sentiment_drives_color_and_mass() {
		let client = loaded().await;
		client.select_node(NodeId::Int(2)).await.unwrap();

		client.assign_sentiment(Sentiment::Positive).await.unwrap();
		let style = node(&client, 2).unwrap().style();
		assert_eq!(style.mass, 2.0);
		assert_eq!(style.background, POSITIVE_BACKGROUND);
		assert!(!client.ui().panel.get());

		client.assign_sentiment(Sentiment::Neutral).await.unwrap();
		let style = node(&client, 2).unwrap().style();
		assert_eq!(style.mass, 1.0);
		assert_eq!(style.background, DEFAULT_BACKGROUND);

		assert_eq!(
			client.service().calls(),
			vec![
				Call::UpdateSentiment(NodeId::Int(2), Sentiment::Positive),
				Call::UpdateSentiment(NodeId::Int(2), Sentiment::Neutral),
			]
		);
	}

	#[tokio::test]
	async fn failed_sentiment_update_leaves_node_alone() {
		let client = loaded().await;
		client.select_node(NodeId::Int(2)).await.unwrap();
		client.service().offline.set(true);
		let before = node(&client, 2);
		assert!(client.assign_sentiment(Sentiment::Negative).await.is_err());
		assert_eq!(node(&client, 2), before);
	}

	#[tokio::test]
	async fn editing_without_active_node_is_rejected() {
		let client = loaded().await;
		assert_eq!(
			client.assign_sentiment(Sentiment::Positive).await,
			Err(EditorError::NoActiveNode)
		);
		assert_eq!(client.toggle_special().await, Err(EditorError::NoActiveNode));
		assert!(client.service().calls().is_empty());
	}

	#[tokio::test]
	async fn delete_removes_node_and_incident_edges() {
		let client = loaded().await;
		client.select_node(NodeId::Int(1)).await.unwrap();
		client.handle(EditorEvent::DeletePressed).await;

		assert_eq!(*client.ui().prompts.borrow(), vec![DELETE_PROMPT.to_string()]);
		assert_eq!(client.service().calls(), vec![Call::RemoveNode(NodeId::Int(1))]);
		client.with_view(|v| {
			assert_eq!(v.node_count(), 1);
			assert_eq!(v.edge_count(), 0);
		});
		assert!(!client.ui().panel.get());
		assert_eq!(client.session().active_node, None);
	}

	#[tokio::test]
	async fn failed_delete_leaves_graph_untouched() {
		let client = loaded().await;
		client.select_node(NodeId::Int(1)).await.unwrap();
		client.service().offline.set(true);
		let before = client.with_view(|v| v.clone());

		assert!(client.delete_active_node().await.is_err());
		assert_eq!(client.with_view(|v| v.clone()), before);
		assert_eq!(client.session().active_node, Some(NodeId::Int(1)));
	}

	#[tokio::test]
	async fn declined_delete_is_silent() {
		let client = loaded().await;
		client.select_node(NodeId::Int(1)).await.unwrap();
		client.ui().answer.set(false);

		assert_eq!(client.delete_active_node().await, Err(EditorError::Cancelled));
		assert!(client.service().calls().is_empty());
		assert!(client.ui().notices.borrow().is_empty());
		client.with_view(|v| assert_eq!(v.node_count(), 2));
	}

	#[tokio::test]
	async fn delete_key_without_selection_does_nothing() {
		let client = loaded().await;
		client.handle(EditorEvent::DeletePressed).await;
		assert!(client.ui().prompts.borrow().is_empty());
		assert!(client.service().calls().is_empty());
	}

	#[tokio::test]
	async fn toggling_special_twice_restores_style() {
		let client = loaded().await;
		let original = node(&client, 1).unwrap().style();
		client.select_node(NodeId::Int(1)).await.unwrap();

		assert_eq!(client.toggle_special().await, Ok(true));
		let special = node(&client, 1).unwrap().style();
		assert_eq!(special.background, SPECIAL_BACKGROUND);
		assert_eq!(special.mass, 2.0);

		assert_eq!(client.toggle_special().await, Ok(false));
		assert_eq!(node(&client, 1).unwrap().style(), original);
	}

	#[tokio::test]
	async fn clear_empties_graph_after_confirmation() {
		let client = loaded().await;
		client.select_node(NodeId::Int(1)).await.unwrap();
		client.clear_all().await.unwrap();

		assert_eq!(client.service().calls(), vec![Call::Clear]);
		client.with_view(|v| assert_eq!(v.node_count(), 0));
		assert_eq!(client.session().active_node, None);
		assert_eq!(client.ui().input_clears.get(), 2);
	}

	#[tokio::test]
	async fn failed_clear_keeps_graph() {
		let client = loaded().await;
		client.service().offline.set(true);
		assert!(client.clear_all().await.is_err());
		client.with_view(|v| assert_eq!(v.node_count(), 2));
		assert_eq!(client.ui().input_clears.get(), 1);
	}
}
