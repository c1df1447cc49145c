//! HTTP transport for the TMDB API
//!
//! The cache layer talks to the network through the [`Transport`] trait so
//! that tests can substitute scripted outcomes. [`TmdbTransport`] is the real
//! implementation: reqwest with a bearer credential, JSON accept header and a
//! locale parameter on every request.

use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};

use super::Endpoint;

/// Base URL for the TMDB API
const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Environment variable the bearer credential is read from
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Default locale parameter sent with every request
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// What the transport observed for one request attempt.
///
/// The time budget is enforced by the caller, so a transport only ever
/// reports a response or a connection-level failure.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    /// An HTTP response was obtained (any status)
    Response { status: u16, body: String },
    /// No response was obtained
    ConnectionFailed(String),
}

/// A source of raw responses for endpoints
pub trait Transport: Send + Sync {
    /// Issues the request for `endpoint` and reports what happened.
    fn fetch(&self, endpoint: &Endpoint) -> BoxFuture<'static, TransportOutcome>;
}

/// Transport implementation backed by reqwest
#[derive(Debug, Clone)]
pub struct TmdbTransport {
    client: Client,
    base_url: String,
    bearer: String,
    language: String,
}

impl TmdbTransport {
    /// Creates a transport using the given bearer credential.
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: TMDB_BASE_URL.to_string(),
            bearer: bearer.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Overrides the API base URL, for tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the locale parameter sent with every request.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builds the full request URL for an endpoint, locale included.
    fn request_url(&self, endpoint: &Endpoint) -> Result<Url, String> {
        let base = format!("{}{}", self.base_url, endpoint.path());
        let mut url = Url::parse(&base).map_err(|e| e.to_string())?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in endpoint.query_pairs() {
                query.append_pair(&name, &value);
            }
            query.append_pair("language", &self.language);
        }
        Ok(url)
    }
}

impl Transport for TmdbTransport {
    fn fetch(&self, endpoint: &Endpoint) -> BoxFuture<'static, TransportOutcome> {
        let url = match self.request_url(endpoint) {
            Ok(url) => url,
            Err(reason) => {
                return Box::pin(async move { TransportOutcome::ConnectionFailed(reason) })
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let request = self
            .client
            .get(url)
            .headers(headers)
            .bearer_auth(&self.bearer);

        Box::pin(async move {
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => return TransportOutcome::ConnectionFailed(e.to_string()),
            };
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => TransportOutcome::Response { status, body },
                Err(e) => TransportOutcome::ConnectionFailed(e.to_string()),
            }
        })
    }
}
