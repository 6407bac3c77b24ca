//! Page title banner.

use leptos::prelude::*;

/// Title and tagline.
#[component]
pub fn Header() -> impl IntoView {
	view! {
		<header class="header">
			<h1 class="header-title">"Cosmic Network Explorer"</h1>
			<p class="header-subtitle">"Mapping GitHub Community Constellations"</p>
		</header>
	}
}
