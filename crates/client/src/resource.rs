//! Generic CRUD client over one backend resource.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use ledgerdesk_core::RecordId;

use crate::{ApiError, Fetched, HttpClient};

/// A backend resource: where it lives and what it exchanges.
pub trait Resource: Send + Sync + 'static {
    /// Human-readable name used in logs.
    const NAME: &'static str;
    /// Collection path, e.g. `/api/purch-data`.
    const PATH: &'static str;

    type Record: DeserializeOwned + Send;
    type Payload: Serialize + Send + Sync;
}

/// Type-safe CRUD client for a single resource.
///
/// Routes: `GET {PATH}`, `GET {PATH}/{id}`, `POST {PATH}`, `PUT {PATH}/{id}`,
/// `DELETE {PATH}/{id}`.
pub struct ResourceClient<R: Resource> {
    http: HttpClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

impl<R: Resource> core::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::NAME)
            .field("path", &R::PATH)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn item_path(id: &RecordId) -> String {
        format!("{}/{}", R::PATH, id.as_path_segment())
    }

    /// List all records.
    pub async fn list(&self) -> Fetched<Vec<R::Record>> {
        self.http.get_list(R::PATH).await
    }

    /// Get a record by id; `Empty` when it does not exist.
    pub async fn get_by_id(&self, id: impl Into<RecordId>) -> Fetched<R::Record> {
        self.http.get_one(&Self::item_path(&id.into())).await
    }

    /// Create a record.
    pub async fn create(&self, payload: &R::Payload) -> Result<R::Record, ApiError> {
        let created = self.http.post(R::PATH, payload).await;
        if let Err(err) = &created {
            tracing::warn!(resource = R::NAME, "create failed: {err}");
        }
        created
    }

    /// Update a record by id.
    pub async fn update(&self, id: impl Into<RecordId>, payload: &R::Payload) -> Result<R::Record, ApiError> {
        let id = id.into();
        let updated = self.http.put(&Self::item_path(&id), payload).await;
        if let Err(err) = &updated {
            tracing::warn!(resource = R::NAME, %id, "update failed: {err}");
        }
        updated
    }

    /// Delete a record by id, returning it when the backend echoes it back.
    pub async fn delete(&self, id: impl Into<RecordId>) -> Result<Option<R::Record>, ApiError> {
        let id = id.into();
        let deleted = self.http.delete(&Self::item_path(&id)).await;
        if let Err(err) = &deleted {
            tracing::warn!(resource = R::NAME, %id, "delete failed: {err}");
        }
        deleted
    }

    /// Full-list fetch filtered client-side by a loosely compared key.
    ///
    /// O(n) per call; the backend offers no filtered endpoint.
    pub async fn filter_by<F>(&self, value: &RecordId, key: F) -> Fetched<Vec<R::Record>>
    where
        F: Fn(&R::Record) -> Option<&RecordId>,
    {
        self.list()
            .await
            .retain(|record| crate::filter::key_matches(key(record), value))
    }
}
