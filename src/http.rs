//! Page retrieval over HTTP.
//!
//! The pipeline talks to the network only through the [`PageFetcher`] trait,
//! so tests can substitute canned pages for the real site.
//!
//! [`HttpFetcher`] is the production implementation: a single
//! `reqwest::Client` that sends the same header set on every request
//! (language preference, referrer, browser user agent). Anything other than
//! a 2xx status is reported as [`FetchError::Status`]. There is no retry;
//! callers decide what a failed fetch means.

use std::error::Error;
use std::time::Instant;

use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::FetchError;

/// Trait for retrieving the markup of a page.
pub trait PageFetcher {
    /// Fetch `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client carrying the configured headers and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured header value is not a valid HTTP
    /// header value or the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
        headers.insert(REFERER, HeaderValue::from_str(&config.referer)?);
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(network)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
