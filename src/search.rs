//! Search lifecycle: idle, loading, then a graph or an error.
//!
//! [`SearchSession`] is a plain state machine; the Leptos layer keeps it in a
//! signal and runs the fetch between [`SearchSession::begin`] and
//! [`SearchSession::resolve`]. Every accepted search bumps a generation
//! counter, and outcomes carrying an older generation are dropped.

use log::debug;

use crate::api::{FetchError, GraphPayload};
use crate::notice;

/// What the page is currently showing. Exactly one of these at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchState {
	/// No search has been made yet.
	#[default]
	Idle,
	/// A request is in flight.
	Loading,
	/// The latest search produced a graph.
	Success(GraphPayload),
	/// The latest search failed; holds the rewritten message.
	Error(String),
}

impl SearchState {
	/// Whether a request is in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self, SearchState::Loading)
	}

	/// The graph, when the last search succeeded.
	pub fn payload(&self) -> Option<&GraphPayload> {
		match self {
			SearchState::Success(payload) => Some(payload),
			_ => None,
		}
	}

	/// The user-facing error, when the last search failed.
	pub fn error(&self) -> Option<&str> {
		match self {
			SearchState::Error(message) => Some(message),
			_ => None,
		}
	}
}

/// Handed out by [`SearchSession::begin`]; redeemed by [`SearchSession::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
	generation: u64,
	username: String,
}

impl SearchTicket {
	/// Trimmed username to fetch.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// Sequence number of the search this ticket belongs to.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

/// Owns the search state and decides which outcomes may land.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSession {
	state: SearchState,
	generation: u64,
}

impl SearchSession {
	/// A session that has not searched yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current state.
	pub fn state(&self) -> &SearchState {
		&self.state
	}

	/// Start a search for `input`.
	///
	/// Returns `None`, leaving the state untouched, when the trimmed input is
	/// empty or a search is already loading. Otherwise clears any previous
	/// graph or error, enters [`SearchState::Loading`] and returns the ticket
	/// the caller must pass back with the outcome.
	pub fn begin(&mut self, input: &str) -> Option<SearchTicket> {
		let username = input.trim();
		if username.is_empty() || self.state.is_loading() {
			return None;
		}

		self.generation += 1;
		self.state = SearchState::Loading;
		Some(SearchTicket {
			generation: self.generation,
			username: username.to_string(),
		})
	}

	/// Land the outcome of the search `ticket` was issued for.
	///
	/// Returns `false` and changes nothing if a newer search or a reset has
	/// superseded the ticket.
	pub fn resolve(
		&mut self,
		ticket: &SearchTicket,
		outcome: Result<GraphPayload, FetchError>,
	) -> bool {
		if ticket.generation != self.generation || !self.state.is_loading() {
			debug!(
				"cosmic-network: dropping stale outcome for {} (generation {}, current {})",
				ticket.username, ticket.generation, self.generation
			);
			return false;
		}

		self.state = match outcome {
			Ok(payload) => SearchState::Success(payload),
			Err(err) => SearchState::Error(notice::describe(&err)),
		};
		true
	}

	/// Return to [`SearchState::Idle`], abandoning any in-flight search.
	///
	/// Backs the cancel button: the request keeps running, but its outcome
	/// no longer matches the session and is dropped.
	pub fn reset(&mut self) {
		self.generation += 1;
		self.state = SearchState::Idle;
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn payload() -> GraphPayload {
		GraphPayload {
			nodes: vec![json!({"id": "octocat", "group": 0})],
			links: vec![],
		}
	}

	#[test]
	fn starts_idle() {
		let session = SearchSession::new();
		assert_eq!(session.state(), &SearchState::Idle);
	}

	#[test]
	fn blank_input_is_ignored() {
		let mut session = SearchSession::new();
		assert!(session.begin("").is_none());
		assert!(session.begin("   \t").is_none());
		assert_eq!(session, SearchSession::new());
	}

	#[test]
	fn begin_trims_and_loads() {
		let mut session = SearchSession::new();
		let ticket = session.begin("  octocat ").unwrap();
		assert_eq!(ticket.username(), "octocat");
		assert!(session.state().is_loading());
	}

	#[test]
	fn second_submit_while_loading_is_ignored() {
		let mut session = SearchSession::new();
		let first = session.begin("octocat").unwrap();
		assert!(session.begin("torvalds").is_none());
		assert!(session.resolve(&first, Ok(payload())));
		assert_eq!(session.state().payload(), Some(&payload()));
	}

	#[test]
	fn failure_stores_rewritten_message() {
		let mut session = SearchSession::new();
		let ticket = session.begin("ghost").unwrap();
		let err = FetchError::Server {
			status: 404,
			message: "Not Found".into(),
		};
		assert!(session.resolve(&ticket, Err(err)));
		assert_eq!(
			session.state().error(),
			Some("User not found. Please check the GitHub username and try again.")
		);
		assert!(session.state().payload().is_none());
	}

	#[test]
	fn new_search_clears_previous_result() {
		let mut session = SearchSession::new();
		let ticket = session.begin("octocat").unwrap();
		session.resolve(&ticket, Ok(payload()));

		let next = session.begin("ghost").unwrap();
		assert_eq!(session.state(), &SearchState::Loading);
		assert!(session.state().payload().is_none());

		session.resolve(&next, Err(FetchError::Network));
		assert!(session.state().error().is_some());

		session.begin("octocat").unwrap();
		assert!(session.state().error().is_none());
	}

	#[test]
	fn outcome_lands_once() {
		let mut session = SearchSession::new();
		let ticket = session.begin("octocat").unwrap();
		assert!(session.resolve(&ticket, Ok(payload())));
		assert!(!session.resolve(&ticket, Err(FetchError::Network)));
		assert!(session.state().payload().is_some());
	}

	#[test]
	fn superseded_outcome_is_dropped() {
		let mut session = SearchSession::new();
		let stale = session.begin("octocat").unwrap();
		session.reset();
		let fresh = session.begin("torvalds").unwrap();
		assert!(fresh.generation() > stale.generation());

		assert!(!session.resolve(&stale, Ok(payload())));
		assert_eq!(session.state(), &SearchState::Loading);

		assert!(session.resolve(&fresh, Err(FetchError::EmptyGraph)));
		assert!(session.state().error().is_some());
	}

	#[test]
	fn reset_abandons_in_flight_search() {
		let mut session = SearchSession::new();
		let ticket = session.begin("octocat").unwrap();
		session.reset();
		assert!(!session.resolve(&ticket, Ok(payload())));
		assert_eq!(session.state(), &SearchState::Idle);
	}

	#[test]
	fn search_after_cancel_can_start_and_land() {
		let mut session = SearchSession::new();
		let abandoned = session.begin("octocat").unwrap();
		assert!(session.begin("torvalds").is_none());

		session.reset();
		let retry = session.begin("torvalds").unwrap();
		assert!(!session.resolve(&abandoned, Err(FetchError::Network)));
		assert!(session.resolve(&retry, Ok(payload())));
		assert_eq!(session.state().payload(), Some(&payload()));
	}
}
