//! # Requery
//!
//! A generic typed REST-resource client framework with tag-based cache
//! invalidation and optimistic updates.
//!
//! ## Features
//!
//! - **One client per entity type**: six bound operations (list-paged,
//!   list-all, get-one, create, update, delete) over the conventional
//!   paths `<Entity>` and `<Entity>/<id>`
//! - **Tag-indexed caching**: query results declare the tags they provide;
//!   mutations invalidate tags; per-record, `LIST` and `PAGE_<n>` tags are
//!   disjoint namespaces
//! - **Optimistic updates**: patches are speculatively visible in the cache
//!   before the server confirms, with exact rollback on failure
//! - **Query by example**: partial-record filters carried as a single
//!   percent-encoded JSON query parameter
//! - **Pluggable transport**: one shared request executor behind a trait;
//!   `reqwest`-backed HTTP and a scriptable in-memory mock ship built in
//! - **Macro-based schemas**: one `impl_resource!` declaration per entity
//!   instead of a generated per-entity module
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use requery::prelude::*;
//!
//! impl_resource!(
//!     Organization,
//!     "Organization",
//!     {
//!         name: String,
//!     }
//! );
//!
//! let host = ClientBuilder::new()
//!     .with_base_url("https://api.example.com/api")
//!     .build()?;
//! let orgs = host.resource::<Organization>();
//!
//! let created = orgs.create(&json!({"name": "Acme"})).await?;
//! let page = orgs.list_paged(&PageRequest::new(0)).await?;
//! orgs.update(&created.id(), &json!({"name": "Acme Corp"})).await?;
//! orgs.delete(&created.id()).await?;
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod core;
pub mod schema;
pub mod transport;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ClientError, TransportError},
        query::{DEFAULT_PAGE_SIZE, PageRequest},
        resource::{Resource, ResourceId},
        tag::{Tag, TagId},
    };

    // === Macros ===
    pub use crate::impl_resource;

    // === Cache ===
    pub use crate::cache::{CacheKey, CacheStore, PatchUndo};

    // === Client ===
    pub use crate::client::{ClientBuilder, ClientHost, DeleteResponse, ResourceClient};

    // === Transport ===
    pub use crate::transport::{
        Method, MockTransport, Transport, TransportRequest, TransportResponse,
    };
    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;

    // === Config ===
    pub use crate::config::ClientConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use uuid::Uuid;
}
