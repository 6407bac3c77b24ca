//! The area under the search form: placeholder, spinner, error or graph.

use leptos::prelude::*;

use super::force_graph::{ForceGraphCanvas, GraphData};
use crate::search::SearchState;

const OVERLAY: &str = "position: absolute; inset: 0; display: flex; align-items: center; \
	justify-content: center; pointer-events: none; z-index: 10;";

/// Shows whatever the current [`SearchState`] calls for. A graph and an error
/// are never on screen together.
#[component]
pub fn GraphView(#[prop(into)] state: Signal<SearchState>) -> impl IntoView {
	let body = move || match state.get() {
		SearchState::Idle => placeholder().into_any(),
		SearchState::Loading => view! {
			<div class="graph-loading" style=OVERLAY>
				<div class="graph-loading-card">
					<div class="spinner"></div>
					<p>"Scanning cosmic network... This may take a moment"</p>
				</div>
			</div>
		}
		.into_any(),
		SearchState::Error(message) => view! {
			<div class="graph-error" style=OVERLAY>
				<div class="graph-error-card">
					<div class="graph-error-icon">"\u{26a0}\u{fe0f}"</div>
					<p class="graph-error-title">"Error Loading Graph"</p>
					<p class="graph-error-description">{message}</p>
				</div>
			</div>
		}
		.into_any(),
		SearchState::Success(payload) => {
			let data = GraphData::from_payload(&payload);
			view! { <ForceGraphCanvas data=Signal::derive(move || data.clone()) /> }.into_any()
		}
	};

	view! {
		<div class="graph-view">
			<div class="graph-container" style="position: relative; width: 100%; height: 100%;">
				{body}
			</div>
		</div>
	}
}

/// Sample constellation shown before the first search.
fn placeholder() -> impl IntoView {
	let nodes = [(200, 250, "Node 1"), (400, 150, "Node 2"), (400, 350, "Node 3"), (600, 250, "Node 4")];
	let edges = [((200, 250), (400, 150)), ((200, 250), (400, 350)), ((400, 150), (600, 250)), ((400, 350), (600, 250))];

	view! {
		<div class="graph-placeholder" style="position: relative; width: 100%; height: 100%; min-height: 500px;">
			<svg width="100%" height="100%" viewBox="0 0 800 500" style="opacity: 0.3;">
				{edges
					.into_iter()
					.map(|((x1, y1), (x2, y2))| {
						view! {
							<line
								x1=x1.to_string()
								y1=y1.to_string()
								x2=x2.to_string()
								y2=y2.to_string()
								stroke="#60a5fa"
								stroke-width="2"
							/>
						}
					})
					.collect_view()}
				{nodes
					.into_iter()
					.map(|(cx, cy, label)| {
						view! {
							<circle
								cx=cx.to_string()
								cy=cy.to_string()
								r="30"
								fill="#3b82f6"
								stroke="#1e40af"
								stroke-width="3"
							/>
							<text
								x=cx.to_string()
								y=(cy + 10).to_string()
								text-anchor="middle"
								fill="#e5e7eb"
								font-size="14"
							>
								{label}
							</text>
						}
					})
					.collect_view()}
			</svg>
			<div style=OVERLAY>
				<div class="graph-placeholder-card">
					<p class="graph-placeholder-title">"Cosmic Network Map"</p>
					<p class="graph-placeholder-subtitle">
						"Enter a GitHub username to map community constellations"
					</p>
				</div>
			</div>
		</div>
	}
}
