//! cosmic-network: explore GitHub community graphs in the browser.
//!
//! Enter a GitHub username, the mining backend returns a precomputed community
//! graph, and the result is drawn as an interactive force-directed graph.
//!
//! - [`api`] issues the request and normalizes the response.
//! - [`search`] tracks the idle/loading/success/error lifecycle.
//! - [`notice`] turns failures into sentences for the user.
//! - [`components`] renders all of it.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod notice;
pub mod search;

pub use api::{ApiConfig, FetchClient, FetchError, GraphPayload, HttpTransport, Transport};
pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
pub use search::{SearchSession, SearchState, SearchTicket};

use components::footer::Footer;
use components::graph_view::GraphView;
use components::header::Header;
use components::search_panel::SearchPanel;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("cosmic-network: logging initialized");
}

/// Runs searches and lands their outcomes in a [`SearchSession`] signal.
pub struct SearchController<T> {
	session: RwSignal<SearchSession>,
	client: Rc<FetchClient<T>>,
}

impl<T> Clone for SearchController<T> {
	fn clone(&self) -> Self {
		Self {
			session: self.session,
			client: self.client.clone(),
		}
	}
}

impl<T: Transport + 'static> SearchController<T> {
	/// A controller with a fresh, idle session.
	pub fn new(client: FetchClient<T>) -> Self {
		Self {
			session: RwSignal::new(SearchSession::new()),
			client: Rc::new(client),
		}
	}

	/// The session signal, for views.
	pub fn session(&self) -> RwSignal<SearchSession> {
		self.session
	}

	/// Start a search for `input` unless it is blank or one is already loading.
	pub fn submit(&self, input: &str) {
		let mut ticket = None;
		self.session.maybe_update(|session| {
			ticket = session.begin(input);
			ticket.is_some()
		});
		let Some(ticket) = ticket else {
			return;
		};

		info!("cosmic-network: mining {}", ticket.username());
		let (session, client) = (self.session, self.client.clone());
		spawn_local(async move {
			let outcome = client.fetch_graph(ticket.username()).await;
			session.maybe_update(|s| s.resolve(&ticket, outcome));
		});
	}

	/// Abandon the search in flight and go back to idle. Its outcome is
	/// dropped when it arrives.
	pub fn cancel(&self) {
		self.session.maybe_update(|session| {
			if !session.state().is_loading() {
				return false;
			}
			session.reset();
			info!("cosmic-network: search cancelled");
			true
		});
	}
}

/// Main application component.
/// Wires the search form to the backend and renders the result.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let client = FetchClient::new(HttpTransport::new(), ApiConfig::resolve());
	let controller = SearchController::new(client);
	let session = controller.session();
	let canceller = controller.clone();

	let state = Signal::derive(move || session.with(|s| s.state().clone()));
	let loading = Signal::derive(move || session.with(|s| s.state().is_loading()));
	let error = Signal::derive(move || session.with(|s| s.state().error().map(String::from)));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Cosmic Network Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="App">
			<Header />
			<SearchPanel
				on_search=move |name: String| controller.submit(&name)
				on_cancel=move || canceller.cancel()
				loading=loading
				error=error
			/>
			<GraphView state=state />
			<Footer />
		</div>
	}
}
