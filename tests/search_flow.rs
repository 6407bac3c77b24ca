//! End-to-end search flows: session state machine plus fetch client over a scripted transport.

// Integration test crate links every lib dependency.
#![allow(unused_crate_dependencies)]

use std::cell::RefCell;
use std::collections::HashMap;

use cosmic_network::api::{RawResponse, TransportError};
use cosmic_network::{ApiConfig, FetchClient, GraphPayload, SearchSession, SearchState, Transport};
use serde_json::json;

/// Answers by URL and counts requests.
#[derive(Default)]
struct Backend {
	routes: HashMap<String, Result<RawResponse, TransportError>>,
	requests: RefCell<Vec<String>>,
}

impl Backend {
	fn route(mut self, user: &str, status: u16, status_text: &str, body: &str) -> Self {
		self.routes.insert(
			format!("http://miner.test/mine/{user}"),
			Ok(RawResponse {
				status,
				status_text: status_text.into(),
				body: body.into(),
			}),
		);
		self
	}
}

impl Transport for &Backend {
	async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
		self.requests.borrow_mut().push(url.to_string());
		self.routes
			.get(url)
			.cloned()
			.unwrap_or_else(|| Err(TransportError::Unreachable("connection refused".into())))
	}
}

async fn search(session: &mut SearchSession, client: &FetchClient<&Backend>, input: &str) {
	let ticket = session.begin(input).expect("search should start");
	let outcome = client.fetch_graph(ticket.username()).await;
	assert!(session.resolve(&ticket, outcome));
}

fn client(backend: &Backend) -> FetchClient<&Backend> {
	FetchClient::new(backend, ApiConfig::new("http://miner.test"))
}

#[tokio::test]
async fn octocat_renders_its_graph() {
	let backend = Backend::default().route(
		"octocat",
		200,
		"OK",
		r#"{"nodes":[{"id":"octocat","group":0}],"links":[]}"#,
	);
	let mut session = SearchSession::new();
	search(&mut session, &client(&backend), "  octocat  ").await;

	assert_eq!(
		session.state(),
		&SearchState::Success(GraphPayload {
			nodes: vec![json!({"id": "octocat", "group": 0})],
			links: vec![],
		})
	);
}

#[tokio::test]
async fn unknown_user_reads_as_not_found() {
	let backend = Backend::default().route("ghost", 404, "Not Found", r#"{"detail":"Not Found"}"#);
	let mut session = SearchSession::new();
	search(&mut session, &client(&backend), "ghost").await;

	assert_eq!(
		session.state().error(),
		Some("User not found. Please check the GitHub username and try again.")
	);
}

#[tokio::test]
async fn unreachable_backend_says_so() {
	let backend = Backend::default();
	let mut session = SearchSession::new();
	search(&mut session, &client(&backend), "octocat").await;

	let message = session.state().error().unwrap();
	assert!(message.contains("Unable to connect"));
	assert!(message.contains("backend is running"));
}

#[tokio::test]
async fn empty_object_reads_as_no_connections() {
	let backend = Backend::default().route("loner", 200, "OK", "{}");
	let mut session = SearchSession::new();
	search(&mut session, &client(&backend), "loner").await;

	assert!(session.state().error().unwrap().starts_with("No community connections"));
}

#[tokio::test]
async fn blank_submit_sends_nothing() {
	let backend = Backend::default();
	let mut session = SearchSession::new();
	assert!(session.begin("   ").is_none());
	assert_eq!(session.state(), &SearchState::Idle);
	assert!(backend.requests.borrow().is_empty());
}

#[tokio::test]
async fn rapid_submits_only_reflect_the_latest_search() {
	let backend = Backend::default()
		.route("first", 200, "OK", r#"{"nodes":[{"id":"first"}],"links":[]}"#)
		.route("second", 200, "OK", r#"{"nodes":[{"id":"second"}],"links":[]}"#);
	let client = client(&backend);
	let mut session = SearchSession::new();

	let first = session.begin("first").unwrap();
	assert!(session.begin("second").is_none());
	assert!(session.state().is_loading());

	session.reset();
	let second = session.begin("second").unwrap();

	let late = client.fetch_graph(first.username()).await;
	let fresh = client.fetch_graph(second.username()).await;
	assert!(session.resolve(&second, fresh));
	assert!(!session.resolve(&first, late));

	assert_eq!(
		session.state().payload().unwrap().nodes,
		vec![json!({"id": "second"})]
	);
}

#[tokio::test]
async fn repeat_search_replaces_the_previous_graph() {
	let backend = Backend::default()
		.route("octocat", 200, "OK", r#"{"nodes":[{"id":"octocat"}],"edges":[{"source":"octocat","target":"hubot"}]}"#)
		.route("hubot", 500, "Internal Server Error", "");
	let client = client(&backend);
	let mut session = SearchSession::new();

	search(&mut session, &client, "octocat").await;
	assert_eq!(session.state().payload().unwrap().links.len(), 1);

	search(&mut session, &client, "hubot").await;
	assert!(session.state().payload().is_none());
	assert_eq!(
		session.state().error(),
		Some("Server encountered an error. Please try again in a moment.")
	);
	assert_eq!(backend.requests.borrow().len(), 2);
}
