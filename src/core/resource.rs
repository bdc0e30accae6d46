//! Resource trait and identifier types
//!
//! A [`Resource`] is any entity record the backend exposes at the
//! conventional paths `<Entity>` (collection) and `<Entity>/<id>` (member).
//! The trait carries only what the client layer needs: the collection path
//! segment and id extraction. Everything else about the record is opaque
//! domain data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an entity record.
///
/// Backends in the wild assign either string ids or numeric ids; both are
/// accepted and compared by value. The serde representation is untagged so
/// `"42"` and `42` deserialize to the variant the server actually sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric identifier
    Int(i64),
    /// String identifier
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(n) => write!(f, "{}", n),
            ResourceId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId::Int(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId::Str(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId::Str(s)
    }
}

/// Trait implemented by every entity record type.
///
/// Implementations are usually generated with the [`impl_resource!`] macro
/// rather than written by hand; one declaration per entity replaces the
/// per-entity data-access file a code generator would otherwise stamp out.
///
/// # Example
///
/// ```rust,ignore
/// use requery::prelude::*;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Organization {
///     id: ResourceId,
///     name: String,
/// }
///
/// impl Resource for Organization {
///     fn resource_name() -> &'static str {
///         "Organization"
///     }
///
///     fn id(&self) -> ResourceId {
///         self.id.clone()
///     }
/// }
/// ```
///
/// [`impl_resource!`]: crate::impl_resource
pub trait Resource:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Collection path segment for this entity type (e.g. `"Organization"`).
    ///
    /// Also used as the entity-type component of every cache tag, so it must
    /// be unique across the resource types sharing one cache store.
    fn resource_name() -> &'static str;

    /// Extract the record's unique identifier.
    fn id(&self) -> ResourceId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_display() {
        assert_eq!(ResourceId::from(42).to_string(), "42");
        assert_eq!(ResourceId::from("abc-1").to_string(), "abc-1");
    }

    #[test]
    fn test_resource_id_untagged_deserialization() {
        let s: ResourceId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(s, ResourceId::Str("42".to_string()));

        let n: ResourceId = serde_json::from_str("42").unwrap();
        assert_eq!(n, ResourceId::Int(42));

        // String "42" and number 42 are distinct identities
        assert_ne!(s, n);
    }

    #[test]
    fn test_resource_id_serialization() {
        assert_eq!(
            serde_json::to_string(&ResourceId::from("x")).unwrap(),
            "\"x\""
        );
        assert_eq!(serde_json::to_string(&ResourceId::from(7)).unwrap(), "7");
    }
}
