//! Fetch client for the community-graph backend.
//!
//! One call to [`FetchClient::fetch_graph`] issues exactly one `GET
//! {base}/mine/{username}` and resolves to a normalized [`GraphPayload`] or a
//! [`FetchError`]. There are no retries, no caching and no client-side timeout.

mod client;
mod config;
mod error;
mod normalize;
mod transport;

pub use client::{FetchClient, interpret};
pub use config::{ApiConfig, DEFAULT_BASE_URL, META_NAME};
pub use error::{FetchError, TransportError};
pub use normalize::{GraphPayload, is_blank, normalize};
pub use transport::{HttpTransport, RawResponse, Transport};
