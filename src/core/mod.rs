//! Core module containing fundamental traits and types for the client

pub mod error;
pub mod query;
pub mod resource;
pub mod tag;

pub use error::{ClientError, TransportError};
pub use query::{DEFAULT_PAGE_SIZE, PageRequest};
pub use resource::{Resource, ResourceId};
pub use tag::{Tag, TagId};
