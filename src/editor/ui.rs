//! What the edit client needs from the page around the canvas.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Warning,
	Error,
}

/// A non-blocking message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}

impl Notice {
	pub fn info(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Info,
			message: message.into(),
		}
	}

	pub fn warning(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Warning,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Error,
			message: message.into(),
		}
	}
}

pub trait EditorUi {
	fn notify(&self, notice: Notice);
	/// Blocking yes/no prompt.
	fn confirm(&self, question: &str) -> bool;
	fn set_panel_visible(&self, visible: bool);
	fn clear_input(&self);
	/// Whether an analyze/clear round trip is running.
	fn set_busy(&self, _busy: bool) {}
}
