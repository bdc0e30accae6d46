//! In-memory scriptable transport for testing and development
//!
//! Routes are scripted per `(method, relative URL)` pair; each route holds a
//! sequence of responses consumed in order, with the last one repeating.
//! Every executed request is recorded so tests can assert exactly what went
//! over the wire. Uses `RwLock` for thread-safe access.

use super::{Method, Transport, TransportRequest, TransportResponse};
use crate::core::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
enum Scripted {
    Status { status: u16, data: Option<Value> },
    ConnectionFailure { message: String },
}

#[derive(Default)]
struct MockInner {
    routes: HashMap<(Method, String), Vec<Scripted>>,
    cursors: HashMap<(Method, String), usize>,
    log: Vec<TransportRequest>,
}

/// Scriptable in-memory [`Transport`].
///
/// Unmatched requests answer 404, so a test that only scripts the routes it
/// cares about still gets well-formed errors everywhere else.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<RwLock<MockInner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a JSON 200 response for a route.
    pub fn respond_json(&self, method: Method, url: &str, data: Value) -> &Self {
        self.push(method, url, Scripted::Status {
            status: 200,
            data: Some(data),
        })
    }

    /// Script an empty-bodied response with an explicit status.
    pub fn respond_status(&self, method: Method, url: &str, status: u16) -> &Self {
        self.push(method, url, Scripted::Status { status, data: None })
    }

    /// Script a non-2xx response carrying a JSON error body.
    pub fn respond_error(&self, method: Method, url: &str, status: u16, body: Value) -> &Self {
        self.push(method, url, Scripted::Status {
            status,
            data: Some(body),
        })
    }

    /// Script a connection-level failure for a route.
    pub fn fail_connection(&self, method: Method, url: &str, message: &str) -> &Self {
        self.push(method, url, Scripted::ConnectionFailure {
            message: message.to_string(),
        })
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.inner
            .read()
            .map(|inner| inner.log.clone())
            .unwrap_or_default()
    }

    /// How many times a route was hit.
    pub fn request_count(&self, method: Method, url: &str) -> usize {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .log
                    .iter()
                    .filter(|req| req.method == method && req.url == url)
                    .count()
            })
            .unwrap_or(0)
    }

    fn push(&self, method: Method, url: &str, response: Scripted) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .routes
                .entry((method, url.to_string()))
                .or_default()
                .push(response);
        }
        self
    }

    fn next_response(&self, method: Method, url: &str) -> Option<Scripted> {
        let mut inner = self.inner.write().ok()?;
        let key = (method, url.to_string());
        let scripted = inner.routes.get(&key)?;
        let cursor = inner.cursors.get(&key).copied().unwrap_or(0);
        let response = scripted.get(cursor).or_else(|| scripted.last())?.clone();
        inner.cursors.insert(key, cursor + 1);
        Some(response)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        if let Ok(mut inner) = self.inner.write() {
            inner.log.push(request.clone());
        }

        match self.next_response(request.method, &request.url) {
            Some(Scripted::Status { status, data }) => {
                if (200..300).contains(&status) {
                    Ok(TransportResponse { status, data })
                } else {
                    Err(TransportError::Status { status, body: data })
                }
            }
            Some(Scripted::ConnectionFailure { message }) => {
                Err(TransportError::Connection { message })
            }
            None => Err(TransportError::Status {
                status: 404,
                body: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_responses_consume_in_order_then_repeat() {
        let transport = MockTransport::new();
        transport.respond_json(Method::Get, "Item/1", json!({"v": 1}));
        transport.respond_json(Method::Get, "Item/1", json!({"v": 2}));

        let first = transport
            .execute(TransportRequest::new(Method::Get, "Item/1"))
            .await
            .unwrap();
        assert_eq!(first.data.unwrap(), json!({"v": 1}));

        for _ in 0..2 {
            let next = transport
                .execute(TransportRequest::new(Method::Get, "Item/1"))
                .await
                .unwrap();
            assert_eq!(next.data.clone().unwrap(), json!({"v": 2}));
        }
    }

    #[tokio::test]
    async fn test_unmatched_route_answers_404() {
        let transport = MockTransport::new();
        let err = transport
            .execute(TransportRequest::new(Method::Get, "Nothing/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_request_log() {
        let transport = MockTransport::new();
        transport.respond_status(Method::Delete, "Item/1", 200);
        transport
            .execute(TransportRequest::new(Method::Delete, "Item/1"))
            .await
            .unwrap();

        assert_eq!(transport.request_count(Method::Delete, "Item/1"), 1);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let transport = MockTransport::new();
        transport.fail_connection(Method::Get, "Item/1", "connection refused");
        let err = transport
            .execute(TransportRequest::new(Method::Get, "Item/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connection { .. }));
    }
}
