//! HTTP client for vendor and proxy probes
//!
//! Thin wrapper over reqwest with a fixed timeout, an optional proxy and
//! error classes the probes can map to readable messages.

use anyhow::{Context, Result};
use reqwest::{Client, Method, Proxy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),
}

/// HTTP client used by a single probe
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create client with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Self::build(timeout_secs, None)
    }

    /// Create client routing every request through `proxy_url`
    pub fn with_proxy(timeout_secs: u64, proxy_url: &str) -> Result<Self> {
        Self::build(timeout_secs, Some(proxy_url))
    }

    /// Create client with an optional proxy
    pub fn build(timeout_secs: u64, proxy_url: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs));

        match proxy_url {
            Some(url) => {
                let proxy = Proxy::all(url)
                    .map_err(|e| anyhow::anyhow!(HttpError::InvalidProxy(format!("{url}: {e}"))))?;
                builder = builder.proxy(proxy);
            }
            // Only the configured proxy applies; ignore *_proxy variables.
            None => builder = builder.no_proxy(),
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.full_url()?;
        debug!("Sending {} request to {}", request.method, url);

        let method =
            Method::from_bytes(request.method.as_bytes()).context("Invalid HTTP method")?;

        let mut req_builder = self.client.request(method, url.clone());

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder
            .send()
            .await
            .map_err(|e| self.classify(e, url.as_str()))?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        let mut response_headers = BTreeMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify(e, url.as_str()))?;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers: response_headers,
            body,
            duration_ms,
        })
    }

    fn classify(&self, e: reqwest::Error, url: &str) -> anyhow::Error {
        if e.is_timeout() {
            anyhow::anyhow!(HttpError::Timeout(self.timeout_secs))
        } else if e.is_connect() {
            anyhow::anyhow!(HttpError::ConnectionRefused(url.to_string()))
        } else if e.is_builder() {
            anyhow::anyhow!(HttpError::InvalidUrl(e.to_string()))
        } else {
            anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
        }
    }

    /// Convenience method for GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.send(HttpRequest::get(url)).await
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter (percent-encoded on send)
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// URL with query parameters applied
    pub fn full_url(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.url)
            .map_err(|e| anyhow::anyhow!(HttpError::InvalidUrl(format!("{}: {e}", self.url))))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Anything below 400 counts as reachable
    pub fn is_reachable(&self) -> bool {
        self.status_code < 400
    }

    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Failed to parse response JSON")
    }
}
