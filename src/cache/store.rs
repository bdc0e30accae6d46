//! Tag-indexed cache store implementation
//!
//! Cached query results are keyed by their relative request URL and carry
//! the set of tags they provide. Invalidating a tag set evicts every entry
//! whose provided tags intersect it. The store also exposes the imperative
//! patch-with-undo primitive that optimistic updates are built on.
//!
//! Uses `RwLock` for thread-safe access; callers never need their own
//! locking because every operation is a single mutation intent.

use crate::core::error::ClientError;
use crate::core::tag::Tag;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Key of one cached query result.
///
/// The relative request URL fully determines a query (operation, id, page,
/// filter), so `(entity, request)` is the cache identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Entity-type name
    pub entity: String,
    /// Relative request URL, e.g. `Organization/42` or `Organization?page=0&size=20`
    pub request: String,
}

impl CacheKey {
    pub fn new(entity: &str, request: impl Into<String>) -> Self {
        Self {
            entity: entity.to_string(),
            request: request.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    tags: Vec<Tag>,
    call_id: Uuid,
    fetched_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    invalidations: HashMap<Tag, u64>,
}

/// Undo handle captured by [`CacheStore::patch`].
///
/// Holds an exact snapshot of the value that was cached before the patch
/// was applied. Applying it via [`CacheStore::undo`] restores that
/// snapshot; dropping it confirms the patch.
#[derive(Debug)]
pub struct PatchUndo {
    key: CacheKey,
    previous: Option<Value>,
}

impl PatchUndo {
    /// True when the patch actually mutated a cached entry.
    pub fn applied(&self) -> bool {
        self.previous.is_some()
    }
}

/// Process-wide, tag-indexed result cache shared by all entity clients.
///
/// Cloning is cheap and shares the underlying storage.
#[derive(Clone)]
pub struct CacheStore {
    inner: Arc<RwLock<CacheInner>>,
}

impl CacheStore {
    /// Create an empty cache store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner::default())),
        }
    }

    /// Look up the cached value for a query, if present.
    pub fn lookup(&self, key: &CacheKey) -> Result<Option<Value>, ClientError> {
        let inner = self.read()?;
        let hit = inner.entries.get(key).map(|entry| entry.value.clone());
        tracing::trace!(
            entity = %key.entity,
            request = %key.request,
            hit = hit.is_some(),
            "cache lookup"
        );
        Ok(hit)
    }

    /// Register a settled call's result together with the tags it provides.
    ///
    /// `call_id` correlates the entry with the call that produced it in
    /// trace output.
    pub fn insert(
        &self,
        call_id: Uuid,
        key: CacheKey,
        value: Value,
        tags: Vec<Tag>,
    ) -> Result<(), ClientError> {
        let mut inner = self.write()?;
        tracing::debug!(
            entity = %key.entity,
            request = %key.request,
            call_id = %call_id,
            tag_count = tags.len(),
            "cache insert"
        );
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                tags,
                call_id,
                fetched_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Invalidate a tag set: evict every entry providing at least one of
    /// the tags and record one invalidation event per tag.
    ///
    /// Returns the number of evicted entries.
    pub fn invalidate(&self, tags: &[Tag]) -> Result<usize, ClientError> {
        self.invalidate_inner(tags, None)
    }

    /// Invalidate a tag set while keeping one entry alive.
    ///
    /// A confirmed optimistic update invalidates its record tag to evict
    /// stale list views, but the freshly patched get-one entry already
    /// holds the authoritative value and must survive the sweep.
    pub fn invalidate_except(&self, tags: &[Tag], keep: &CacheKey) -> Result<usize, ClientError> {
        self.invalidate_inner(tags, Some(keep))
    }

    fn invalidate_inner(&self, tags: &[Tag], keep: Option<&CacheKey>) -> Result<usize, ClientError> {
        let mut inner = self.write()?;
        for tag in tags {
            *inner.invalidations.entry(tag.clone()).or_insert(0) += 1;
        }
        let before = inner.entries.len();
        inner.entries.retain(|key, entry| {
            keep == Some(key) || !entry.tags.iter().any(|t| tags.contains(t))
        });
        let evicted = before - inner.entries.len();
        tracing::debug!(tag_count = tags.len(), evicted, "cache invalidation");
        Ok(evicted)
    }

    /// Shallow-merge `patch`'s fields into the cached value for `key`,
    /// returning an undo handle holding the exact prior value.
    ///
    /// When no entry is cached for `key`, or the cached value is not a JSON
    /// object, nothing is mutated and the returned handle is a no-op.
    pub fn patch(&self, key: &CacheKey, patch: &Value) -> Result<PatchUndo, ClientError> {
        let mut inner = self.write()?;
        let previous = match inner.entries.get_mut(key) {
            Some(entry) => match (&mut entry.value, patch) {
                (Value::Object(cached), Value::Object(fields)) => {
                    let snapshot = Value::Object(cached.clone());
                    for (field, value) in fields {
                        cached.insert(field.clone(), value.clone());
                    }
                    tracing::debug!(
                        entity = %key.entity,
                        request = %key.request,
                        field_count = fields.len(),
                        "optimistic patch applied"
                    );
                    Some(snapshot)
                }
                _ => None,
            },
            None => None,
        };
        Ok(PatchUndo {
            key: key.clone(),
            previous,
        })
    }

    /// Revert a patch exactly, restoring the snapshot captured when it was
    /// applied.
    ///
    /// If the entry was evicted between patch and undo there is nothing to
    /// restore; resurrecting the snapshot would re-cache data a concurrent
    /// invalidation already discarded.
    pub fn undo(&self, undo: PatchUndo) -> Result<(), ClientError> {
        let Some(previous) = undo.previous else {
            return Ok(());
        };
        let mut inner = self.write()?;
        if let Some(entry) = inner.entries.get_mut(&undo.key) {
            tracing::debug!(
                entity = %undo.key.entity,
                request = %undo.key.request,
                "optimistic patch rolled back"
            );
            entry.value = previous;
        }
        Ok(())
    }

    /// Number of invalidation events recorded for a tag.
    pub fn invalidation_count(&self, tag: &Tag) -> Result<u64, ClientError> {
        let inner = self.read()?;
        Ok(inner.invalidations.get(tag).copied().unwrap_or(0))
    }

    /// When the cached value for `key` was fetched, if cached.
    pub fn fetched_at(&self, key: &CacheKey) -> Result<Option<DateTime<Utc>>, ClientError> {
        let inner = self.read()?;
        Ok(inner.entries.get(key).map(|entry| entry.fetched_at))
    }

    /// Call id that produced the cached value for `key`, if cached.
    pub fn call_id(&self, key: &CacheKey) -> Result<Option<Uuid>, ClientError> {
        let inner = self.read()?;
        Ok(inner.entries.get(key).map(|entry| entry.call_id))
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and counter. Used at teardown and between tests.
    pub fn clear(&self) -> Result<(), ClientError> {
        let mut inner = self.write()?;
        inner.entries.clear();
        inner.invalidations.clear();
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, CacheInner>, ClientError> {
        self.inner.read().map_err(|e| ClientError::Cache {
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, CacheInner>, ClientError> {
        self.inner.write().map_err(|e| ClientError::Cache {
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
