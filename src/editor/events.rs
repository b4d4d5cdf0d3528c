//! Typed events feeding the edit client.

use crate::components::force_graph::{NodeId, SurfaceEvent};

/// Key that arms the connect gesture.
pub const MODIFIER_KEY: &str = "Control";
pub const DELETE_KEY: &str = "Delete";

#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
	/// A node was clicked. Payload: the node's service id.
	NodeSelected(NodeId),
	/// Empty canvas was clicked.
	NodeDeselected,
	ModifierPressed,
	ModifierReleased,
	/// Delete key while a node is active.
	DeletePressed,
}

impl From<SurfaceEvent> for EditorEvent {
	fn from(event: SurfaceEvent) -> Self {
		match event {
			SurfaceEvent::NodeClicked(id) => EditorEvent::NodeSelected(id),
			SurfaceEvent::BackgroundClicked => EditorEvent::NodeDeselected,
		}
	}
}

/// Map a `KeyboardEvent.key` value to an event. Key repeat is harmless:
/// modifier presses are idempotent.
pub fn key_down(key: &str) -> Option<EditorEvent> {
	match key {
		MODIFIER_KEY => Some(EditorEvent::ModifierPressed),
		DELETE_KEY => Some(EditorEvent::DeletePressed),
		_ => None,
	}
}

pub fn key_up(key: &str) -> Option<EditorEvent> {
	(key == MODIFIER_KEY).then_some(EditorEvent::ModifierReleased)
}

/// The window lost focus. Any keyup for a held modifier goes elsewhere, so
/// treat it as released.
pub fn focus_lost() -> EditorEvent {
	EditorEvent::ModifierReleased
}
