//! Runtime configuration for the catalog viewer.

use std::time::Duration;

/// Provider constants.
pub mod api {
    use std::time::Duration;

    /// Origin of the catalog data provider. Also the base against which
    /// root-relative asset URLs are absolutized.
    pub const ORIGIN: &str = "https://easydash.enago.com";

    /// Path of the accepted-papers listing.
    pub const PAPERS_PATH: &str = "/acceptedpapers";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Cards shown per page.
    pub const DEFAULT_PAGE_SIZE: usize = 10;
}

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider origin (scheme + host).
    pub origin: String,

    /// Full URL of the listing endpoint.
    pub papers_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Records per page.
    pub page_size: usize,
}

impl Config {
    /// Configuration against the production provider.
    #[must_use]
    pub fn new() -> Self {
        Self::with_origin(api::ORIGIN)
    }

    /// Configuration against an alternate provider origin.
    #[must_use]
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/').to_string();
        let papers_url = format!("{origin}{}", api::PAPERS_PATH);
        Self {
            origin,
            papers_url,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            page_size: api::DEFAULT_PAGE_SIZE,
        }
    }

    /// Configuration for tests against a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Self::with_origin(base_url)
        }
    }

    /// Configuration from the environment, falling back to production.
    ///
    /// Reads `PAPER_CATALOG_ORIGIN` when set.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("PAPER_CATALOG_ORIGIN")
            .ok()
            .map_or_else(Self::new, |origin| Self::with_origin(&origin))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
