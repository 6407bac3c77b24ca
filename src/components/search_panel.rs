//! Username form.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

/// Text input and submit button.
///
/// Submits the trimmed username through `on_search` unless it is blank or a
/// search is loading. The input and button are disabled while loading, a
/// cancel button calling `on_cancel` appears instead, and the current error,
/// if any, is shown underneath.
#[component]
pub fn SearchPanel<F, C>(
	on_search: F,
	on_cancel: C,
	#[prop(into)] loading: Signal<bool>,
	#[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView
where
	F: Fn(String) + 'static,
	C: Fn() + 'static,
{
	let username = RwSignal::new(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let name = username.get_untracked();
		let name = name.trim();
		if !name.is_empty() && !loading.get_untracked() {
			on_search(name.to_string());
		}
	};

	let input_class = move || {
		if error.with(Option::is_some) {
			"search-input search-input-error"
		} else {
			"search-input"
		}
	};
	let button_class = move || {
		if loading.get() {
			"search-button search-button-loading"
		} else {
			"search-button"
		}
	};

	view! {
		<div class="search-panel">
			<form on:submit=on_submit class="search-form">
				<div class="search-input-wrapper">
					<input
						type="text"
						class=input_class
						placeholder="Enter GitHub username to scan..."
						prop:value=move || username.get()
						on:input=move |ev| username.set(event_target_value(&ev))
						prop:disabled=move || loading.get()
					/>
					<button type="submit" class=button_class prop:disabled=move || loading.get()>
						{move || if loading.get() { "Scanning..." } else { "Scan Network" }}
					</button>
					<button
						type="button"
						class="cancel-button"
						style:display=move || if loading.get() { "inline-block" } else { "none" }
						on:click=move |_| on_cancel()
					>
						"Cancel"
					</button>
				</div>
				{move || {
					error
						.get()
						.map(|message| {
							view! {
								<div class="error-message">
									<span class="error-icon">"\u{26a0}\u{fe0f}"</span>
									<span class="error-text">{message}</span>
								</div>
							}
						})
				}}
			</form>
		</div>
	}
}
