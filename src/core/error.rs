//! Typed error handling for resource clients
//!
//! This module provides the error type hierarchy surfaced by every
//! operation so callers can handle failures specifically rather than
//! matching on stringly-typed `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`TransportError`]: the request never completed cleanly (connection
//!   failure, non-2xx status, bad URL)
//! - [`ClientError::NotFound`]: a get-one resolved to a missing record
//! - [`ClientError::Decode`]: the response body did not match the entity's
//!   field shape
//! - [`ClientError::Filter`]: a query-by-example filter could not be
//!   serialized (raised before any request is made)
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get_one(&"42".into()).await {
//!     Ok(org) => println!("Found: {:?}", org),
//!     Err(ClientError::NotFound { entity, id }) => {
//!         println!("{} {} is gone", entity, id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::resource::ResourceId;
use serde_json::Value;
use std::fmt;

/// The main error type for resource-client operations.
#[derive(Debug)]
pub enum ClientError {
    /// The transport collaborator failed to complete the request
    Transport(TransportError),

    /// A get-one operation resolved to a missing record
    NotFound {
        entity: String,
        id: ResourceId,
    },

    /// The response body could not be deserialized into the entity type
    Decode {
        entity: String,
        source: serde_json::Error,
    },

    /// A query-by-example filter could not be serialized
    Filter(serde_json::Error),

    /// The shared cache store failed internally (poisoned lock)
    Cache {
        message: String,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "{}", e),
            ClientError::NotFound { entity, id } => {
                write!(f, "{} with id '{}' not found", entity, id)
            }
            ClientError::Decode { entity, source } => {
                write!(f, "Failed to decode {} response: {}", entity, source)
            }
            ClientError::Filter(e) => {
                write!(f, "Failed to encode example filter: {}", e)
            }
            ClientError::Cache { message } => {
                write!(f, "Cache store error: {}", message)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::NotFound { .. } => None,
            ClientError::Decode { source, .. } => Some(source),
            ClientError::Filter(e) => Some(e),
            ClientError::Cache { .. } => None,
        }
    }
}

impl ClientError {
    /// Error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(e) => e.error_code(),
            ClientError::NotFound { .. } => "NOT_FOUND",
            ClientError::Decode { .. } => "DECODE_ERROR",
            ClientError::Filter(_) => "FILTER_ERROR",
            ClientError::Cache { .. } => "CACHE_ERROR",
        }
    }

    /// True when the error represents a missing record (typed not-found or
    /// a raw 404 from the transport).
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::NotFound { .. } => true,
            ClientError::Transport(TransportError::Status { status, .. }) => *status == 404,
            _ => false,
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Transport(err)
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised by the transport collaborator.
///
/// Surfaced verbatim to the caller; this layer never retries or suppresses
/// them. The single exception is the compensating rollback a failed update
/// performs on the cache before propagating the error.
#[derive(Debug)]
pub enum TransportError {
    /// The request could not be delivered (DNS, connection, I/O)
    Connection {
        message: String,
    },

    /// The server answered with a non-2xx status
    Status {
        status: u16,
        body: Option<Value>,
    },

    /// The request URL could not be constructed
    InvalidUrl {
        url: String,
        message: String,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connection { message } => {
                write!(f, "Transport connection failed: {}", message)
            }
            TransportError::Status { status, .. } => {
                write!(f, "Server responded with status {}", status)
            }
            TransportError::InvalidUrl { url, message } => {
                write!(f, "Invalid request URL '{}': {}", url, message)
            }
        }
    }
}

impl std::error::Error for TransportError {}

impl TransportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Connection { .. } => "TRANSPORT_CONNECTION_ERROR",
            TransportError::Status { .. } => "TRANSPORT_STATUS_ERROR",
            TransportError::InvalidUrl { .. } => "TRANSPORT_INVALID_URL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let typed = ClientError::NotFound {
            entity: "Organization".to_string(),
            id: "42".into(),
        };
        assert!(typed.is_not_found());

        let raw_404 = ClientError::Transport(TransportError::Status {
            status: 404,
            body: None,
        });
        assert!(raw_404.is_not_found());

        let raw_500 = ClientError::Transport(TransportError::Status {
            status: 500,
            body: None,
        });
        assert!(!raw_500.is_not_found());
    }

    #[test]
    fn test_display_messages() {
        let err = ClientError::NotFound {
            entity: "Item".to_string(),
            id: 7.into(),
        };
        assert_eq!(err.to_string(), "Item with id '7' not found");

        let err = TransportError::Status {
            status: 503,
            body: None,
        };
        assert_eq!(err.to_string(), "Server responded with status 503");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ClientError::Filter(serde_json::from_str::<Value>("x").unwrap_err()).error_code(),
            "FILTER_ERROR"
        );
        assert_eq!(
            ClientError::Transport(TransportError::Connection {
                message: "refused".to_string()
            })
            .error_code(),
            "TRANSPORT_CONNECTION_ERROR"
        );
    }
}
