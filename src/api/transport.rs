//! The single outbound call, behind a seam so the client can be driven without a network.

use std::error::Error;
use std::future::Future;

use log::debug;

use super::error::TransportError;

/// A fully read HTTP response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
	/// Status code.
	pub status: u16,
	/// Reason phrase, possibly empty.
	pub status_text: String,
	/// Body text; empty when the body was missing or unreadable.
	pub body: String,
}

impl RawResponse {
	/// Whether the status is 2xx.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Performs one `GET` and reads the whole body.
///
/// Implementations must not retry, cache or impose their own timeout.
pub trait Transport {
	/// Issue a `GET` to `url`.
	fn get(&self, url: &str) -> impl Future<Output = Result<RawResponse, TransportError>>;
}

/// [`Transport`] backed by `reqwest`, which uses `fetch` on wasm targets.
#[derive(Clone, Debug)]
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	/// Create a transport with a fresh client.
	pub fn new() -> Self {
		Self {
			client: reqwest::Client::new(),
		}
	}
}

impl Default for HttpTransport {
	fn default() -> Self {
		Self::new()
	}
}

impl Transport for HttpTransport {
	async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
		let response = self
			.client
			.get(url)
			.header("Content-Type", "application/json")
			.send()
			.await
			.map_err(classify)?;

		let status = response.status();
		let status_text = status.canonical_reason().unwrap_or_default().to_string();
		let body = match response.text().await {
			Ok(body) => body,
			Err(e) => {
				debug!("cosmic-network: could not read body from {}: {}", url, e);
				String::new()
			}
		};

		Ok(RawResponse {
			status: status.as_u16(),
			status_text,
			body,
		})
	}
}

/// Browsers report aborted fetches as an `AbortError` DOMException, which
/// reqwest keeps in the error's source chain rather than its own message.
fn classify(err: reqwest::Error) -> TransportError {
	classify_chain(&err)
}

fn classify_chain(err: &dyn Error) -> TransportError {
	let text = describe_chain(err);
	if text.contains("AbortError") {
		TransportError::Cancelled
	} else {
		TransportError::Unreachable(text)
	}
}

/// The error's message followed by each of its causes.
fn describe_chain(err: &dyn Error) -> String {
	let mut text = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		text.push_str(": ");
		text.push_str(&cause.to_string());
		source = cause.source();
	}
	text
}
