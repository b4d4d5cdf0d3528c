use leptos::prelude::*;

use crate::editor::{Notice, NoticeLevel};

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 4000;

fn level_class(level: NoticeLevel) -> &'static str {
	match level {
		NoticeLevel::Info => "notice notice-info",
		NoticeLevel::Warning => "notice notice-warning",
		NoticeLevel::Error => "notice notice-error",
	}
}

/// Notices keyed by a running id so expiry removes the right one.
#[derive(Clone, Debug, Default)]
pub struct NoticeQueue {
	next_id: u64,
	entries: Vec<(u64, Notice)>,
}

impl NoticeQueue {
	pub fn push(&mut self, notice: Notice) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		self.entries.push((id, notice));
		id
	}

	pub fn dismiss(&mut self, id: u64) {
		self.entries.retain(|(i, _)| *i != id);
	}

	pub fn entries(&self) -> &[(u64, Notice)] {
		&self.entries
	}
}

/// Shows queued notices, newest last. Clicking one dismisses it.
#[component]
pub fn NoticeList(queue: RwSignal<NoticeQueue>) -> impl IntoView {
	view! {
		<div class="notices">
			{move || {
				queue
					.get()
					.entries()
					.iter()
					.cloned()
					.map(|(id, notice)| {
						view! {
							<div
								class=level_class(notice.level)
								on:click=move |_| queue.update(|q| q.dismiss(id))
							>
								{notice.message}
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
