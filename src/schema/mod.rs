//! Entity schema declarations
//!
//! Per-entity field shapes are ordinary Rust structs implementing
//! [`Resource`](crate::core::resource::Resource). The [`impl_resource!`]
//! macro stamps out the struct and its trait impl from one declaration,
//! which is what collapses a generator's hundred near-identical per-entity
//! files into one line each.
//!
//! [`impl_resource!`]: crate::impl_resource

pub mod macros;
