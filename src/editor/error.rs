use thiserror::Error;

use crate::api::ApiError;
use crate::components::force_graph::NodeId;

/// Everything an edit operation can fail with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
	#[error("Please enter some text to analyze.")]
	EmptyInput,
	#[error("Still waiting for the previous request to finish.")]
	Busy,
	#[error("Select a node first.")]
	NoActiveNode,
	#[error("A node cannot be connected to itself.")]
	SelfLoop,
	#[error("\"{from}\" and \"{to}\" are already connected.")]
	DuplicateEdge { from: NodeId, to: NodeId },
	/// The user declined a confirmation prompt.
	#[error("cancelled")]
	Cancelled,
	#[error("Could not {action}: {source}")]
	Remote {
		action: Action,
		#[source]
		source: ApiError,
	},
}

impl EditorError {
	/// Rejected locally, before any network call.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			EditorError::EmptyInput
				| EditorError::Busy
				| EditorError::NoActiveNode
				| EditorError::SelfLoop
				| EditorError::DuplicateEdge { .. }
		)
	}

	pub fn is_cancelled(&self) -> bool {
		matches!(self, EditorError::Cancelled)
	}
}

/// Remote operation names, used in messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Analyze,
	UpdateSentiment,
	RemoveNode,
	CreateEdge,
	Clear,
	ToggleSpecial,
}

impl std::fmt::Display for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Action::Analyze => "analyze the text",
			Action::UpdateSentiment => "update the sentiment",
			Action::RemoveNode => "delete the node",
			Action::CreateEdge => "create the connection",
			Action::Clear => "clear the graph",
			Action::ToggleSpecial => "toggle the special flag",
		})
	}
}

impl Action {
	pub fn remote(self) -> impl FnOnce(ApiError) -> EditorError {
		move |source| EditorError::Remote {
			action: self,
			source,
		}
	}
}
