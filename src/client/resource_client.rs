//! The generic resource client: six operations per entity type
//!
//! One `ResourceClient<T>` replaces the per-entity data-access module a code
//! generator would emit: list-paged, list-all, get-one, create, update and
//! delete against the conventional paths `<Entity>` and `<Entity>/<id>`,
//! with tag bookkeeping against the shared [`CacheStore`] and the
//! optimistic-update protocol on `update`.
//!
//! Query operations are cache-first: a hit is answered locally, a miss goes
//! through the shared [`Transport`] and the settled result is registered
//! with the tags it provides. Mutations are never cached; they invalidate.

use crate::cache::{CacheKey, CacheStore, PatchUndo};
use crate::core::error::{ClientError, TransportError};
use crate::core::query::{self, PageRequest};
use crate::core::resource::{Resource, ResourceId};
use crate::core::tag::Tag;
use crate::transport::{Method, Transport, TransportRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a delete operation.
///
/// Servers following the sampled convention answer `{success, id}`; a bare
/// 2xx with no body is treated as `success: true` for the requested id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: ResourceId,
}

/// Typed client for one entity type.
///
/// Cheap to clone and cheap to create; all clients obtained from one
/// [`ClientHost`](crate::client::ClientHost) share the same transport and
/// cache store.
pub struct ResourceClient<T: Resource> {
    transport: Arc<dyn Transport>,
    cache: CacheStore,
    default_page_size: u32,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cache: self.cache.clone(),
            default_page_size: self.default_page_size,
            _entity: PhantomData,
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        cache: CacheStore,
        default_page_size: u32,
    ) -> Self {
        Self {
            transport,
            cache,
            default_page_size,
            _entity: PhantomData,
        }
    }

    /// The shared cache store this client reads through.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Fetch one page of the collection.
    ///
    /// `GET <Entity>?page=P&size=S[&example=…]`. Provides one record tag per
    /// returned record plus the page's `PAGE_<n>` sentinel, so invalidating
    /// one page never evicts another.
    pub async fn list_paged(&self, request: &PageRequest) -> Result<Vec<T>, ClientError> {
        let entity = T::resource_name();
        let url = query::paged_url(entity, request)?;
        let key = CacheKey::new(entity, &url);

        if let Some(cached) = self.cache.lookup(&key)? {
            tracing::debug!(entity, page = request.page, "list_paged served from cache");
            return decode_records::<T>(cached);
        }

        let call_id = Uuid::new_v4();
        let response = self
            .transport
            .execute(TransportRequest::new(Method::Get, &url))
            .await?;
        let data = response.data.unwrap_or_else(|| Value::Array(Vec::new()));
        let records = decode_records::<T>(data.clone())?;

        let mut tags: Vec<Tag> = records
            .iter()
            .map(|record| Tag::record(entity, record.id()))
            .collect();
        tags.push(Tag::page(entity, request.page));
        self.cache.insert(call_id, key, data, tags)?;

        Ok(records)
    }

    /// Fetch one page with this client's default page size.
    pub async fn page(&self, page: u32) -> Result<Vec<T>, ClientError> {
        self.list_paged(&PageRequest::new(page).with_size(self.default_page_size))
            .await
    }

    /// Fetch the full collection, optionally filtered by example.
    ///
    /// `GET <Entity>[?example=…]`. Provides one record tag per record plus
    /// the `LIST` sentinel; a response with no data provides only `LIST`.
    pub async fn list_all(&self, example: Option<&Value>) -> Result<Vec<T>, ClientError> {
        let entity = T::resource_name();
        let url = query::collection_url(entity, example)?;
        let key = CacheKey::new(entity, &url);

        if let Some(cached) = self.cache.lookup(&key)? {
            tracing::debug!(entity, "list_all served from cache");
            return decode_records::<T>(cached);
        }

        let call_id = Uuid::new_v4();
        let response = self
            .transport
            .execute(TransportRequest::new(Method::Get, &url))
            .await?;

        let mut tags = vec![Tag::list(entity)];
        let (data, records) = match response.data {
            Some(data) => {
                let records = decode_records::<T>(data.clone())?;
                tags.extend(records.iter().map(|record| Tag::record(entity, record.id())));
                (data, records)
            }
            None => (Value::Array(Vec::new()), Vec::new()),
        };
        self.cache.insert(call_id, key, data, tags)?;

        Ok(records)
    }

    /// Fetch a single record by id.
    ///
    /// `GET <Entity>/<id>`. Provides the record's tag. A 404 (or a 2xx with
    /// no body) surfaces as [`ClientError::NotFound`].
    pub async fn get_one(&self, id: &ResourceId) -> Result<T, ClientError> {
        let entity = T::resource_name();
        let url = query::member_url(entity, id);
        let key = CacheKey::new(entity, &url);

        if let Some(cached) = self.cache.lookup(&key)? {
            tracing::debug!(entity, id = %id, "get_one served from cache");
            return decode_record::<T>(cached);
        }

        let call_id = Uuid::new_v4();
        let response = self
            .transport
            .execute(TransportRequest::new(Method::Get, &url))
            .await
            .map_err(|err| match err {
                TransportError::Status { status: 404, .. } => ClientError::NotFound {
                    entity: entity.to_string(),
                    id: id.clone(),
                },
                other => ClientError::Transport(other),
            })?;

        let data = response.data.ok_or_else(|| ClientError::NotFound {
            entity: entity.to_string(),
            id: id.clone(),
        })?;
        let record = decode_record::<T>(data.clone())?;

        self.cache
            .insert(call_id, key, data, vec![Tag::record(entity, record.id())])?;

        Ok(record)
    }

    /// Create a record from a partial body.
    ///
    /// `POST <Entity>`. Invalidates the `LIST` sentinel so list views
    /// refetch; returns the created record with server-assigned fields
    /// filled in.
    pub async fn create(&self, body: &Value) -> Result<T, ClientError> {
        let entity = T::resource_name();
        let response = self
            .transport
            .execute(TransportRequest::new(Method::Post, entity).with_body(body.clone()))
            .await?;

        let created = decode_record::<T>(response.data.unwrap_or(Value::Null))?;
        self.cache.invalidate(&[Tag::list(entity)])?;
        tracing::debug!(entity, id = %created.id(), "record created");

        Ok(created)
    }

    /// Update a record with a partial patch, optimistically.
    ///
    /// `PUT <Entity>/<id>` with the patch as body (any `id` field is
    /// stripped). The cached get-one entry is shallow-merged with the patch
    /// before the request settles; on failure that mutation is reverted
    /// exactly, on success it stands and the record + `LIST` tags are
    /// invalidated so every other view refetches.
    ///
    /// `PAGE_<n>` sentinels are deliberately left untouched; paginated views
    /// must be invalidated explicitly by the caller if required.
    pub async fn update(&self, id: &ResourceId, patch: &Value) -> Result<(), ClientError> {
        let entity = T::resource_name();
        let url = query::member_url(entity, id);
        let key = CacheKey::new(entity, &url);
        let body = strip_id(patch);

        // Phase one: speculative mutation, inverse captured.
        let undo: PatchUndo = self.cache.patch(&key, &body)?;
        tracing::debug!(entity, id = %id, optimistic = undo.applied(), "update dispatched");

        match self
            .transport
            .execute(TransportRequest::new(Method::Put, &url).with_body(body))
            .await
        {
            Ok(_) => {
                // Phase two (success): discard the inverse, evict every
                // other view of this record.
                let tags = [Tag::record(entity, id.clone()), Tag::list(entity)];
                self.cache.invalidate_except(&tags, &key)?;
                Ok(())
            }
            Err(err) => {
                // Phase two (failure): apply the inverse, propagate.
                self.cache.undo(undo)?;
                tracing::debug!(entity, id = %id, "update failed, optimistic patch reverted");
                Err(err.into())
            }
        }
    }

    /// Delete a record by id.
    ///
    /// `DELETE <Entity>/<id>`. Invalidates the record's tag, which also
    /// evicts list views providing it. `PAGE_<n>` sentinels are left
    /// untouched (see [`ResourceClient::update`]).
    pub async fn delete(&self, id: &ResourceId) -> Result<DeleteResponse, ClientError> {
        let entity = T::resource_name();
        let url = query::member_url(entity, id);

        let response = self
            .transport
            .execute(TransportRequest::new(Method::Delete, &url))
            .await?;

        let outcome = match response.data {
            Some(data) => {
                serde_json::from_value(data).map_err(|source| ClientError::Decode {
                    entity: entity.to_string(),
                    source,
                })?
            }
            None => DeleteResponse {
                success: true,
                id: id.clone(),
            },
        };

        self.cache.invalidate(&[Tag::record(entity, id.clone())])?;
        tracing::debug!(entity, id = %id, success = outcome.success, "record deleted");

        Ok(outcome)
    }
}

fn decode_records<T: Resource>(data: Value) -> Result<Vec<T>, ClientError> {
    serde_json::from_value(data).map_err(|source| ClientError::Decode {
        entity: T::resource_name().to_string(),
        source,
    })
}

fn decode_record<T: Resource>(data: Value) -> Result<T, ClientError> {
    serde_json::from_value(data).map_err(|source| ClientError::Decode {
        entity: T::resource_name().to_string(),
        source,
    })
}

fn strip_id(patch: &Value) -> Value {
    match patch {
        Value::Object(fields) => {
            let mut body = fields.clone();
            body.remove("id");
            Value::Object(body)
        }
        other => other.clone(),
    }
}
