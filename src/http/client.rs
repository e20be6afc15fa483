//! HTTP dispatcher
//!
//! Every remote operation funnels through `HttpClient::request_json`:
//! append the path segments to the API base, attach the Knack headers,
//! the query and the body, send once, then decode the UTF-8 JSON response
//! into the caller's type. Transport failures, non-2xx statuses and
//! undecodable bodies map to distinct error variants.
//!
//! Path segments are percent-encoded one by one, so a key containing
//! `/`, `?` or `#` stays inside its own segment.

use super::rate_limit::RateLimiter;
use crate::auth::{Authenticator, Credentials};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Body of a single request
#[derive(Debug)]
pub enum RequestBody {
    /// JSON-encoded body
    Json(Value),
    /// multipart/form-data body (file uploads)
    Multipart(Form),
}

/// Configuration for a single request
#[derive(Debug, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
    /// Extra request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set multipart body
    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client bound to one Knack application
pub struct HttpClient {
    client: Client,
    base_url: Url,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let credentials = Credentials::new(&config.application_id, &config.api_key);

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            authenticator: Authenticator::new(credentials),
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        })
    }

    /// Get the authenticator holding credentials and session token
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send one request to `segments` below the API base and return the raw response body
    ///
    /// Non-2xx statuses become `Error::HttpStatus` carrying the remote body.
    pub async fn request(&self, method: Method, segments: &[&str], config: RequestConfig) -> Result<String> {
        let url = self.build_url(segments)?;

        if let Some(ref limiter) = self.rate_limiter {
            limiter.until_ready().await;
        }

        let path = url.path().to_string();
        let mut req = self.client.request(method.clone(), url);

        req = self.authenticator.apply(req).await;

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        match config.body {
            Some(RequestBody::Json(body)) => req = req.json(&body),
            Some(RequestBody::Multipart(form)) => req = req.multipart(form),
            None => {}
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        debug!("{} {}", method, path);
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} {} failed with {}", method, path, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::decode(format!("response body is not valid UTF-8: {e}")))
    }

    /// Send one request and parse the JSON response into `T`
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        config: RequestConfig,
    ) -> Result<T> {
        let body = self.request(method, segments, config).await?;
        decode_json(&body)
    }

    /// Append percent-encoded segments to the API base
    fn build_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base_url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Parse a JSON response body into `T`
fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(e.to_string()))
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
