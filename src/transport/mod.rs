//! Transport seam: the shared request executor
//!
//! Every entity client delegates its network round-trips to one shared
//! [`Transport`]. The contract is deliberately minimal: take a method, a
//! relative URL and an optional JSON body, hand back the response data or a
//! [`TransportError`]. Retry, backoff, timeout and cancellation policy all
//! live behind this seam, never in the resource clients.

pub mod mock;

#[cfg(feature = "http")]
pub mod http;

pub use mock::MockTransport;

#[cfg(feature = "http")]
pub use http::HttpTransport;

use crate::core::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP method of a transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// One request handed to the transport.
///
/// `url` is relative to whatever base the transport is configured with;
/// resource clients only ever build relative URLs.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A settled 2xx response.
///
/// `data` is `None` when the response carried no JSON body (e.g. a void
/// update or a bare delete acknowledgement).
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub data: Option<Value>,
}

/// The shared request executor every entity client delegates to.
///
/// Implementations must map non-2xx statuses to
/// [`TransportError::Status`] so resource clients see exactly two shapes:
/// data, or error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest)
    -> Result<TransportResponse, TransportError>;
}
