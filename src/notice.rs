//! User-facing sentences for failed searches.
//!
//! Rules are checked in a fixed order against the lower-cased raw message; the
//! first match wins. Unmatched messages are shown as-is, clipped to
//! [`MAX_PASSTHROUGH`] characters.

use crate::api::FetchError;

/// Longest raw message shown without clipping.
pub const MAX_PASSTHROUGH: usize = 100;

/// What the user is told about a failed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
	/// The backend could not be reached.
	Unreachable,
	/// The backend had nothing for this user.
	NoConnections,
	/// The backend answered with something unreadable.
	UnexpectedResponse,
	/// Status 404.
	UserNotFound,
	/// Any other server-side failure.
	ServerFault,
	/// Too many requests.
	RateLimited,
	/// GitHub, upstream of the backend, refused.
	UpstreamApi,
	/// No rule matched; the raw message is shown.
	Verbatim(String),
	/// There was no message at all.
	Unknown,
}

impl Notice {
	/// Classify a raw failure message.
	pub fn from_message(raw: &str) -> Self {
		Self::classify(raw, false)
	}

	/// Classify a fetch failure, treating a 404 status as "user not found"
	/// whatever the backend wrote.
	pub fn from_error(err: &FetchError) -> Self {
		Self::classify(&err.to_string(), err.status() == Some(404))
	}

	fn classify(raw: &str, not_found: bool) -> Self {
		if raw.is_empty() && !not_found {
			return Notice::Unknown;
		}
		let text = raw.to_lowercase();
		let has = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

		if has(&["network", "could not connect"]) {
			Notice::Unreachable
		} else if has(&["no data", "empty"]) {
			Notice::NoConnections
		} else if has(&["invalid response", "json"]) {
			Notice::UnexpectedResponse
		} else if not_found || has(&["server error", "500", "404"]) {
			if not_found || raw.contains("404") {
				Notice::UserNotFound
			} else {
				Notice::ServerFault
			}
		} else if has(&["rate limit", "429"]) {
			Notice::RateLimited
		} else if has(&["github", "api"]) {
			Notice::UpstreamApi
		} else {
			Notice::Verbatim(clip(raw))
		}
	}

	/// The sentence to display.
	pub fn text(&self) -> &str {
		match self {
			Notice::Unreachable => {
				"Unable to connect to the server. Please check if the backend is running on port 8000."
			}
			Notice::NoConnections => {
				"No community connections found for this username. The user may not exist or have no public connections."
			}
			Notice::UnexpectedResponse => {
				"The server returned an unexpected response. Please try again later."
			}
			Notice::UserNotFound => "User not found. Please check the GitHub username and try again.",
			Notice::ServerFault => "Server encountered an error. Please try again in a moment.",
			Notice::RateLimited => "Too many requests. Please wait a moment before trying again.",
			Notice::UpstreamApi => {
				"GitHub API error. The user may be private or the request was rejected."
			}
			Notice::Verbatim(message) => message,
			Notice::Unknown => "Something went wrong. Please try again.",
		}
	}
}

/// Rewrite a fetch failure into the sentence shown to the user.
pub fn describe(err: &FetchError) -> String {
	Notice::from_error(err).text().to_string()
}

fn clip(raw: &str) -> String {
	if raw.chars().count() > MAX_PASSTHROUGH {
		let head: String = raw.chars().take(MAX_PASSTHROUGH).collect();
		format!("{head}...")
	} else {
		raw.to_string()
	}
}
