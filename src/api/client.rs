//! Turns a username into a graph payload or a classified failure.

use log::{debug, info, warn};
use serde_json::Value;

use super::config::ApiConfig;
use super::error::FetchError;
use super::normalize::{GraphPayload, is_blank, normalize};
use super::transport::{RawResponse, Transport};

/// Longest slice of a non-JSON error body that is surfaced.
const MAX_ERROR_TEXT: usize = 200;

/// Fields consulted, in order, for a message in an error body.
const MESSAGE_FIELDS: [&str; 3] = ["detail", "message", "error"];

/// Client for the `/mine/{username}` endpoint.
#[derive(Clone, Debug)]
pub struct FetchClient<T> {
	transport: T,
	config: ApiConfig,
}

impl<T: Transport> FetchClient<T> {
	/// Wrap a transport and a backend location.
	pub fn new(transport: T, config: ApiConfig) -> Self {
		Self { transport, config }
	}

	/// Request the community graph for `username`.
	///
	/// The caller trims and rejects empty names; the name is only percent-encoded
	/// here. Exactly one request is issued per call.
	pub async fn fetch_graph(&self, username: &str) -> Result<GraphPayload, FetchError> {
		let url = self.config.mine_url(username);
		debug!("cosmic-network: GET {}", url);

		let response = match self.transport.get(&url).await {
			Ok(response) => response,
			Err(e) => {
				warn!("cosmic-network: request for {} failed: {}", username, e);
				return Err(e.into());
			}
		};

		match interpret(&response) {
			Ok(payload) => {
				info!(
					"cosmic-network: {} returned {} nodes, {} links",
					username,
					payload.nodes.len(),
					payload.links.len()
				);
				Ok(payload)
			}
			Err(e) => {
				warn!("cosmic-network: {} failed with status {}: {}", username, response.status, e);
				Err(e)
			}
		}
	}
}

/// Classify a complete response.
pub fn interpret(response: &RawResponse) -> Result<GraphPayload, FetchError> {
	if !response.is_success() {
		return Err(FetchError::Server {
			status: response.status,
			message: error_message(response),
		});
	}

	let body: Value =
		serde_json::from_str(&response.body).map_err(|_| FetchError::InvalidResponse)?;
	if is_blank(&body) {
		return Err(FetchError::NoData);
	}

	let payload = normalize(&body);
	if payload.is_empty() {
		return Err(FetchError::EmptyGraph);
	}
	Ok(payload)
}

/// Pick the most specific message an error response offers.
///
/// A JSON body is searched for `detail`, `message` and `error`; a body that is
/// not JSON is shown as text. Otherwise the status line is used.
fn error_message(response: &RawResponse) -> String {
	let found = match serde_json::from_str::<Value>(&response.body) {
		Ok(body) => MESSAGE_FIELDS
			.iter()
			.filter_map(|key| body.get(key))
			.find_map(message_text),
		Err(_) => Some(response.body.chars().take(MAX_ERROR_TEXT).collect::<String>())
			.filter(|text| !text.is_empty()),
	};
	found.unwrap_or_else(|| format!("Server error: {} {}", response.status, response.status_text))
}

fn message_text(value: &Value) -> Option<String> {
	match value {
		Value::Null | Value::Bool(false) => None,
		Value::String(s) if s.is_empty() => None,
		Value::Number(n) if n.as_f64() == Some(0.0) => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}
