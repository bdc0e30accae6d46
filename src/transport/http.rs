//! HTTP transport backed by `reqwest`
//!
//! Joins the relative URLs built by resource clients onto a configured base
//! URL, sends JSON bodies, and maps non-2xx statuses to
//! [`TransportError::Status`]. No retries, no backoff: policy added here
//! (e.g. a `reqwest` middleware stack or client timeouts) applies uniformly
//! to every entity client sharing the transport.

use super::{Method, Transport, TransportRequest, TransportResponse};
use crate::core::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// `reqwest`-backed [`Transport`].
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a default `reqwest` client.
    ///
    /// The base URL is normalized to end with `/` so relative resource
    /// paths join under it instead of replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a transport reusing an existing `reqwest` client (connection
    /// pools, timeouts and middleware configured by the caller).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, TransportError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { client, base })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn join(&self, relative: &str) -> Result<Url, TransportError> {
        self.base.join(relative).map_err(|e| TransportError::InvalidUrl {
            url: relative.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.join(&request.url)?;
        tracing::debug!(method = %request.method, url = %url, "dispatching request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| TransportError::Connection {
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| TransportError::Connection {
            message: e.to_string(),
        })?;

        // Non-JSON bodies (empty 204s, HTML error pages) become `None`;
        // the status code is what decides success.
        let data: Option<Value> = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        if !(200..300).contains(&status) {
            tracing::debug!(method = %request.method, status, "request failed");
            return Err(TransportError::Status { status, body: data });
        }

        Ok(TransportResponse { status, data })
    }
}
