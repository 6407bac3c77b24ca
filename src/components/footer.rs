//! Page footer.

use leptos::prelude::*;

/// Copyright line with the current year.
#[component]
pub fn Footer() -> impl IntoView {
	let year = js_sys::Date::new_0().get_full_year();
	view! {
		<footer class="footer">
			<p class="footer-text">
				{format!(
					"Cosmic Network Explorer \u{a9} {year} | Mapping GitHub Community Constellations",
				)}
			</p>
		</footer>
	}
}
