//! Transient per-page UI state. Nothing here is persisted.

use crate::components::force_graph::NodeId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
	/// Node the editing panel acts on.
	pub active_node: Option<NodeId>,
	pub modifier_held: bool,
	/// First node of a two-click connect gesture.
	pub pending_endpoint: Option<NodeId>,
	pub panel_visible: bool,
	/// An analyze or clear call has not returned yet.
	pub analysis_in_flight: bool,
}

impl SessionState {
	pub fn press_modifier(&mut self) {
		self.modifier_held = true;
	}

	pub fn release_modifier(&mut self) {
		self.modifier_held = false;
		self.pending_endpoint = None;
	}

	pub fn take_pending(&mut self) -> Option<NodeId> {
		self.pending_endpoint.take()
	}

	/// Claim the analysis slot. Returns false when it is already taken.
	pub fn begin_request(&mut self) -> bool {
		if self.analysis_in_flight {
			return false;
		}
		self.analysis_in_flight = true;
		true
	}

	pub fn finish_request(&mut self) {
		self.analysis_in_flight = false;
	}

	/// Forget every node reference, e.g. after the graph was replaced.
	pub fn reset_selection(&mut self) {
		self.active_node = None;
		self.pending_endpoint = None;
		self.panel_visible = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn releasing_modifier_drops_pending_endpoint() {
		let mut session = SessionState::default();
		session.press_modifier();
		session.pending_endpoint = Some(NodeId::Int(1));
		session.release_modifier();
		assert!(!session.modifier_held);
		assert_eq!(session.pending_endpoint, None);
	}

	#[test]
	fn request_slot_is_exclusive() {
		let mut session = SessionState::default();
		assert!(session.begin_request());
		assert!(!session.begin_request());
		session.finish_request();
		assert!(session.begin_request());
	}
}
