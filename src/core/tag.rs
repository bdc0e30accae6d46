//! Cache tags: the unit of invalidation
//!
//! A [`Tag`] is a pair of entity-type name and a [`TagId`]. Query operations
//! declare the tags their results *provide*; mutation operations declare the
//! tags they *invalidate*. The cache store evicts every entry whose provided
//! tag set intersects an invalidated set.
//!
//! Per-record tags, the `LIST` sentinel (the unfiltered, unpaged view) and
//! the `PAGE_<n>` sentinels (one page's membership view) are disjoint
//! namespaces: invalidating a record tag never implicitly invalidates a
//! page sentinel.

use crate::core::resource::ResourceId;
use std::fmt;

/// The identifier component of a cache tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagId {
    /// A specific record, tagged by its own id
    Record(ResourceId),
    /// The `LIST` sentinel: the unfiltered, unpaged collection view
    List,
    /// The `PAGE_<n>` sentinel: membership in page `n` of the paginated view
    Page(u32),
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagId::Record(id) => write!(f, "{}", id),
            TagId::List => write!(f, "LIST"),
            TagId::Page(n) => write!(f, "PAGE_{}", n),
        }
    }
}

/// A cache tag: (entity-type name, tag id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Entity-type name, as returned by `Resource::resource_name()`
    pub entity: String,
    /// Record id or sentinel
    pub id: TagId,
}

impl Tag {
    /// Tag for a specific record of an entity type.
    pub fn record(entity: &str, id: ResourceId) -> Self {
        Self {
            entity: entity.to_string(),
            id: TagId::Record(id),
        }
    }

    /// `LIST` sentinel tag for an entity type.
    pub fn list(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            id: TagId::List,
        }
    }

    /// `PAGE_<n>` sentinel tag for an entity type.
    pub fn page(entity: &str, page: u32) -> Self {
        Self {
            entity: entity.to_string(),
            id: TagId::Page(page),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity, self.id)
    }
}
