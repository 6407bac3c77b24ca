//! Failure taxonomy for graph requests.
//!
//! `Display` yields the raw message; [`crate::notice`] turns it into the
//! sentence shown to the user.

use thiserror::Error;

/// Why a transport could not produce a response at all.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
	/// Connection refused, DNS failure, CORS rejection and the like.
	#[error("request could not be completed: {0}")]
	Unreachable(String),
	/// The request was aborted before it completed.
	#[error("request aborted")]
	Cancelled,
}

/// Every way a graph request can fail. The client never recovers from any of these.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
	/// The backend could not be reached.
	#[error("Network error: Could not connect to the server. Please check if the backend is running.")]
	Network,
	/// The request was aborted.
	#[error("Request was cancelled.")]
	Cancelled,
	/// A success status with a body that is not JSON.
	#[error("Invalid response format: Server did not return valid JSON")]
	InvalidResponse,
	/// The body was an empty array or null-ish.
	#[error("No data found for this username. The user may not exist or have no connections.")]
	NoData,
	/// Normalization found neither nodes nor links.
	#[error("Received empty graph data. No nodes or links found.")]
	EmptyGraph,
	/// Non-2xx status; `message` is whatever the backend said, or a status line.
	#[error("{message}")]
	Server {
		/// HTTP status code.
		status: u16,
		/// Extracted message, before any rewrite.
		message: String,
	},
}

impl FetchError {
	/// True for both flavours of an empty result.
	pub fn is_empty_result(&self) -> bool {
		matches!(self, FetchError::NoData | FetchError::EmptyGraph)
	}

	/// HTTP status for server-side failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			FetchError::Server { status, .. } => Some(*status),
			_ => None,
		}
	}
}

impl From<TransportError> for FetchError {
	fn from(err: TransportError) -> Self {
		match err {
			TransportError::Unreachable(_) => FetchError::Network,
			TransportError::Cancelled => FetchError::Cancelled,
		}
	}
}
