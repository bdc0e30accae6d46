//! ClientBuilder for fluent construction of a client host
//!
//! # Example
//!
//! ```ignore
//! let host = ClientBuilder::new()
//!     .with_base_url("https://api.example.com/api")
//!     .with_default_page_size(50)
//!     .build()?;
//!
//! let organizations = host.resource::<Organization>();
//! ```

use crate::cache::CacheStore;
use crate::client::host::ClientHost;
use crate::config::ClientConfig;
use crate::transport::Transport;
use anyhow::Result;
use std::sync::Arc;

/// Builder for creating a [`ClientHost`] with shared transport and cache.
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    cache: Option<CacheStore>,
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new ClientBuilder
    pub fn new() -> Self {
        Self {
            transport: None,
            cache: None,
            config: ClientConfig::default(),
        }
    }

    /// Set the transport (required unless a base URL is given).
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Provide an existing cache store instead of a fresh one.
    ///
    /// Useful when several hosts (or a test harness) must observe the same
    /// cached state.
    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the backend base URL.
    ///
    /// With the `http` feature enabled (the default), `build()` constructs
    /// an [`HttpTransport`](crate::transport::HttpTransport) from it when no
    /// explicit transport was given.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = Some(base_url.to_string());
        self
    }

    /// Override the default page size used by `ResourceClient::page`.
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.config.default_page_size = size;
        self
    }

    /// Build the host.
    pub fn build(self) -> Result<ClientHost> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => self.transport_from_config()?,
        };
        let cache = self.cache.unwrap_or_default();
        Ok(ClientHost::new(transport, cache, self.config))
    }

    #[cfg(feature = "http")]
    fn transport_from_config(&self) -> Result<Arc<dyn Transport>> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("a transport or a base URL is required"))?;
        Ok(Arc::new(crate::transport::HttpTransport::new(base_url)?))
    }

    #[cfg(not(feature = "http"))]
    fn transport_from_config(&self) -> Result<Arc<dyn Transport>> {
        anyhow::bail!("a transport is required (the `http` feature is disabled)")
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
