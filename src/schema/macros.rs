//! Macros for declaring entity record types
//!
//! These macros generate the repetitive struct definition and trait
//! implementation needed for each entity type.

/// Declare an entity record type and its `Resource` implementation.
///
/// Generates a struct with an `id: ResourceId` field plus the declared
/// domain fields, serde derives, and the [`Resource`] impl binding it to
/// the given collection path segment.
///
/// # Example
/// ```rust,ignore
/// impl_resource!(
///     Organization,
///     "Organization",
///     {
///         name: String,
///         tier: i64,
///     }
/// );
///
/// let orgs = host.resource::<Organization>();
/// let acme = orgs.get_one(&"42".into()).await?;
/// ```
///
/// [`Resource`]: crate::core::resource::Resource
#[macro_export]
macro_rules! impl_resource {
    (
        $type:ident,
        $resource_name:expr,
        {
            $( $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this record
            pub id: $crate::core::resource::ResourceId,
            $( pub $field : $field_type ),*
        }

        impl $crate::core::resource::Resource for $type {
            fn resource_name() -> &'static str {
                $resource_name
            }

            fn id(&self) -> $crate::core::resource::ResourceId {
                self.id.clone()
            }
        }
    };
}
