use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlTextAreaElement, KeyboardEvent, MouseEvent};

use crate::api::HttpGraphService;
use crate::components::force_graph::{
	ForceGraphCanvas, ForceGraphState, GraphSurface, SurfaceEvent, SurfaceEventHandler,
};
use crate::components::notices::{NOTICE_TTL_MS, NoticeList, NoticeQueue};
use crate::components::sentiment_panel::{PanelAction, PanelActionHandler, SentimentPanel};
use crate::config::EditorConfig;
use crate::editor::{EditorEvent, EditorUi, GraphEditClient, Notice, focus_lost, key_down, key_up};

/// Page-level signals the edit client drives.
#[derive(Clone, Copy)]
struct PageUi {
	notices: RwSignal<NoticeQueue>,
	panel_visible: RwSignal<bool>,
	input: RwSignal<String>,
	busy: RwSignal<bool>,
}

impl PageUi {
	fn new() -> Self {
		Self {
			notices: RwSignal::new(NoticeQueue::default()),
			panel_visible: RwSignal::new(false),
			input: RwSignal::new(String::new()),
			busy: RwSignal::new(false),
		}
	}
}

impl EditorUi for PageUi {
	fn notify(&self, notice: Notice) {
		let mut id = 0;
		self.notices.update(|q| id = q.push(notice));
		let notices = self.notices;
		Timeout::new(NOTICE_TTL_MS, move || notices.update(|q| q.dismiss(id))).forget();
	}

	fn confirm(&self, question: &str) -> bool {
		web_sys::window()
			.and_then(|w| w.confirm_with_message(question).ok())
			.unwrap_or(false)
	}

	fn set_panel_visible(&self, visible: bool) {
		self.panel_visible.set(visible);
	}

	fn clear_input(&self) {
		self.input.set(String::new());
	}

	fn set_busy(&self, busy: bool) {
		self.busy.set(busy);
	}
}

type Client = GraphEditClient<HttpGraphService, GraphSurface, PageUi>;

fn dispatch(client: &Rc<Client>, event: EditorEvent) {
	let client = client.clone();
	spawn_local(async move { client.handle(event).await });
}

/// Feed window key presses and focus loss to the client. Typing in the text
/// box never deletes nodes.
fn install_key_listeners(client: &Rc<Client>) {
	let Some(window) = web_sys::window() else {
		warn!("No window; keyboard shortcuts disabled");
		return;
	};

	let down_client = client.clone();
	let on_down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
		let in_text_box = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
			.is_some();
		match key_down(&ev.key()) {
			Some(EditorEvent::DeletePressed) if in_text_box => {}
			Some(event) => dispatch(&down_client, event),
			None => {}
		}
	});
	let up_client = client.clone();
	let on_up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
		if let Some(event) = key_up(&ev.key()) {
			dispatch(&up_client, event);
		}
	});

	// Ctrl+Tab and friends move focus away before the keyup arrives
	let blur_client = client.clone();
	let on_blur = Closure::<dyn FnMut()>::new(move || dispatch(&blur_client, focus_lost()));

	let _ = window.add_event_listener_with_callback("keydown", on_down.as_ref().unchecked_ref());
	let _ = window.add_event_listener_with_callback("keyup", on_up.as_ref().unchecked_ref());
	let _ = window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
	// the page lives as long as the app
	on_down.forget();
	on_up.forget();
	on_blur.forget();
}

/// Text input, graph canvas and editing controls.
#[component]
pub fn Home() -> impl IntoView {
	let config = EditorConfig::from_document();
	let ui = PageUi::new();
	let surface = GraphSurface::new(ForceGraphState::new(800.0, 600.0, config.physics.clone()));
	let client = Rc::new(GraphEditClient::new(
		HttpGraphService::new(config),
		surface.clone(),
		ui,
	));
	install_key_listeners(&client);

	let canvas_client = client.clone();
	let on_surface: SurfaceEventHandler = Rc::new(move |event: SurfaceEvent| {
		dispatch(&canvas_client, event.into());
	});

	let panel_client = client.clone();
	let on_panel: PanelActionHandler = Rc::new(move |action: PanelAction| {
		let client = panel_client.clone();
		spawn_local(async move {
			let _ = match action {
				PanelAction::Tag(sentiment) => client.assign_sentiment(sentiment).await,
				PanelAction::ToggleSpecial => client.toggle_special().await.map(|_| ()),
				PanelAction::Delete => client.delete_active_node().await,
			};
		});
	});

	let submit = {
		let client = client.clone();
		move || {
			let client = client.clone();
			let text = ui.input.get_untracked();
			spawn_local(async move {
				let _ = client.submit_text(&text).await;
			});
		}
	};
	let submit_key = submit.clone();
	let on_textarea_key = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !ev.shift_key() {
			ev.prevent_default();
			submit_key();
		}
	};

	let clear_client = client.clone();
	let on_clear = move |_: MouseEvent| {
		let client = clear_client.clone();
		spawn_local(async move {
			let _ = client.clear_all().await;
		});
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas surface=surface on_event=on_surface fullscreen=true />
			<div class="graph-overlay">
				<h1>"Sentiment Graph"</h1>
				<textarea
					class="input-text"
					placeholder="Write something to analyze..."
					prop:value=move || ui.input.get()
					on:input=move |ev| ui.input.set(event_target_value(&ev))
					on:keydown=on_textarea_key
				></textarea>
				<div class="actions">
					<button on:click=move |_| submit() disabled=move || ui.busy.get()>
						"Analyze"
					</button>
					<button on:click=on_clear disabled=move || ui.busy.get()>
						"Clear"
					</button>
				</div>
				<p class="subtitle">
					"Click a node to tag it. Hold Ctrl and click two nodes to connect them. Delete removes the selected node."
				</p>
				<SentimentPanel visible=ui.panel_visible on_action=on_panel />
			</div>
			<NoticeList queue=ui.notices />
		</div>
	}
}
