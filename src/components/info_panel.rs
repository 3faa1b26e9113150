use leptos::prelude::*;

use crate::graph::PanelContent;

/// Title and bullet sections describing the selected node.
#[component]
pub fn InfoPanel(content: PanelContent) -> impl IntoView {
	let PanelContent { title, sections } = content;

	view! {
		<div class="info-panel-title">{title}</div>
		{sections
			.into_iter()
			.map(|section| {
				view! {
					<div class="info-panel-section">
						<span class="info-panel-subtitle">{format!("{}:", section.label)}</span>
						<ul class="info-panel-list">
							{section
								.items
								.into_iter()
								.map(|item| view! { <li>{item}</li> })
								.collect_view()}
						</ul>
					</div>
				}
			})
			.collect_view()}
	}
}
