//! Resource clients and host construction

pub mod builder;
pub mod host;
pub mod resource_client;

pub use builder::ClientBuilder;
pub use host::ClientHost;
pub use resource_client::{DeleteResponse, ResourceClient};
