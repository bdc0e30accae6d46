//! Client host: the shared context behind every entity client
//!
//! The host owns exactly the two process-wide collaborators — the transport
//! and the tag-indexed cache store — and hands out per-entity
//! [`ResourceClient`]s that share them. It is created once at application
//! start (via [`ClientBuilder`](crate::client::ClientBuilder)) and passed
//! explicitly wherever clients are needed; tests create their own host per
//! case so cache state never leaks between them.

use crate::cache::CacheStore;
use crate::client::resource_client::ResourceClient;
use crate::config::ClientConfig;
use crate::core::error::ClientError;
use crate::core::resource::Resource;
use crate::transport::Transport;
use std::sync::Arc;

/// Shared context for a family of entity clients.
pub struct ClientHost {
    transport: Arc<dyn Transport>,
    cache: CacheStore,
    config: ClientConfig,
}

impl ClientHost {
    /// Create a host from its collaborators.
    pub fn new(transport: Arc<dyn Transport>, cache: CacheStore, config: ClientConfig) -> Self {
        Self {
            transport,
            cache,
            config,
        }
    }

    /// Hand out a typed client for one entity type.
    ///
    /// All clients from the same host share one transport and one cache.
    pub fn resource<T: Resource>(&self) -> ResourceClient<T> {
        ResourceClient::new(
            self.transport.clone(),
            self.cache.clone(),
            self.config.default_page_size,
        )
    }

    /// The shared cache store.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// The shared transport.
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// The host's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Tear down the host's cached state.
    ///
    /// In-flight calls are unaffected; their results land in an empty cache.
    pub fn shutdown(&self) -> Result<(), ClientError> {
        tracing::info!("client host shutting down, clearing cache");
        self.cache.clear()
    }
}
