use std::rc::Rc;

use leptos::prelude::*;

use super::force_graph::Sentiment;

/// Buttons of the editing panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
	Tag(Sentiment),
	ToggleSpecial,
	Delete,
}

pub type PanelActionHandler = Rc<dyn Fn(PanelAction)>;

/// Editing panel for the active node. Hidden unless `visible`.
#[component]
pub fn SentimentPanel(visible: RwSignal<bool>, on_action: PanelActionHandler) -> impl IntoView {
	let button = move |label: &'static str, class: &'static str, action: PanelAction| {
		let on_action = on_action.clone();
		view! {
			<button class=class on:click=move |_| on_action(action)>
				{label}
			</button>
		}
	};

	view! {
		<div
			class="sentiment-panel"
			style:display=move || if visible.get() { "flex" } else { "none" }
		>
			{button("Positive", "tag-positive", PanelAction::Tag(Sentiment::Positive))}
			{button("Negative", "tag-negative", PanelAction::Tag(Sentiment::Negative))}
			{button("Neutral", "tag-neutral", PanelAction::Tag(Sentiment::Neutral))}
			{button("Toggle special", "tag-special", PanelAction::ToggleSpecial)}
			{button("Delete", "tag-delete", PanelAction::Delete)}
		</div>
	}
}
