//! Shared test harness for resource-client testing
//!
//! Provides the `Organization` fixture entity, helpers for building JSON
//! records, and a host factory wiring a scriptable [`MockTransport`] and a
//! fresh [`CacheStore`] per test.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod client_harness;
//! use client_harness::*;
//! ```

#![allow(dead_code)]

use requery::prelude::*;
use std::sync::Once;

impl_resource!(
    Organization,
    "Organization",
    {
        name: String,
    }
);

/// Initialize tracing once for the whole test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("requery=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// JSON wire shape of an organization record.
pub fn org_json(id: &str, name: &str) -> Value {
    json!({"id": id, "name": name})
}

/// Host sharing the given mock transport, with a fresh cache store.
pub fn mock_host(transport: &MockTransport) -> ClientHost {
    init_tracing();
    ClientBuilder::new()
        .with_transport(transport.clone())
        .build()
        .expect("mock host construction cannot fail")
}

/// Transport pre-scripted with one organization behind every read route.
pub fn seeded_transport(id: &str, name: &str) -> MockTransport {
    let transport = MockTransport::new();
    transport.respond_json(Method::Get, "Organization", json!([org_json(id, name)]));
    transport.respond_json(
        Method::Get,
        &format!("Organization/{}", id),
        org_json(id, name),
    );
    transport
}
