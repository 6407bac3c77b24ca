//! Backend location.
//!
//! The base URL can be set per deployment without rebuilding via a
//! `<meta name="cosmic-api-url" content="...">` tag in the host page, or baked
//! in at build time through the `COSMIC_API_URL` environment variable.

use log::debug;
use web_sys::Window;

/// Used when neither the host page nor the build environment names a backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Name of the `<meta>` element consulted by [`ApiConfig::resolve`].
pub const META_NAME: &str = "cosmic-api-url";

/// Where the mining backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	base_url: String,
}

impl ApiConfig {
	/// Build a config from an explicit base URL. Trailing slashes are dropped.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into();
		let trimmed = base_url.trim().trim_end_matches('/');
		let base_url = if trimmed.is_empty() {
			DEFAULT_BASE_URL.to_string()
		} else {
			trimmed.to_string()
		};
		Self { base_url }
	}

	/// Resolve the base URL: host page meta tag, then `COSMIC_API_URL`, then the default.
	pub fn resolve() -> Self {
		let configured =
			meta_base_url().or_else(|| option_env!("COSMIC_API_URL").map(String::from));
		let config = configured.map(Self::new).unwrap_or_default();
		debug!("cosmic-network: backend at {}", config.base_url);
		config
	}

	/// Base URL without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Endpoint that mines the community graph for `username`.
	pub fn mine_url(&self, username: &str) -> String {
		format!("{}/mine/{}", self.base_url, urlencoding::encode(username))
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new(DEFAULT_BASE_URL)
	}
}

fn meta_base_url() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document
		.query_selector(&format!("meta[name=\"{META_NAME}\"]"))
		.ok()??;
	element
		.get_attribute("content")
		.map(|url| url.trim().to_string())
		.filter(|url| !url.is_empty())
}
