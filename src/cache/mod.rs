//! Shared tag-indexed result cache
//!
//! One [`CacheStore`] is created at application start, shared by every
//! entity client in the process, and torn down (or [`CacheStore::clear`]ed)
//! at shutdown or between tests. It is always passed explicitly; there is
//! no hidden module-level global.

pub mod store;

pub use store::{CacheKey, CacheStore, PatchUndo};
