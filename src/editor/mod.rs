//! Graph editing: session state, typed events, and the client that keeps the
//! canvas in step with the service.

mod client;
mod error;
mod events;
mod session;
mod ui;

pub use client::GraphEditClient;
pub use events::{EditorEvent, focus_lost, key_down, key_up};
pub use ui::{EditorUi, Notice, NoticeLevel};
