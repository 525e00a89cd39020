use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use shelf_codec::{CatalogObject, ObjectType};

use crate::error::StoreError;
use crate::key::IdempotencyKey;

/// Restricts [`CatalogStore::list`] to some object types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Empty means every type.
    pub object_types: Vec<ObjectType>,
}

impl ListFilter {
    pub fn all() -> Self {
        ListFilter::default()
    }

    pub fn of(object_types: impl IntoIterator<Item = ObjectType>) -> Self {
        ListFilter {
            object_types: object_types.into_iter().collect(),
        }
    }

    pub fn matches(&self, object_type: ObjectType) -> bool {
        self.object_types.is_empty() || self.object_types.contains(&object_type)
    }
}

/// The remote catalog a resource writes through.
///
/// ## Identifiers
///
/// `upsert` replaces a temporary identifier with a store-assigned one and
/// returns the stored object. Callers check the returned id with
/// [`shelf_codec::ensure_assigned`].
///
/// ## Versions
///
/// Every successful write bumps `version`. A write of an existing object
/// must carry the stored version, otherwise it fails with
/// `StoreError::VersionConflict` and nothing changes.
///
/// ## Idempotency
///
/// A second `upsert` with the same key returns the first call's result
/// without writing again.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` so a resource can be
/// shared across tasks.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    async fn upsert(
        &self,
        key: &IdempotencyKey,
        object: CatalogObject,
    ) -> Result<CatalogObject, StoreError>;

    /// Returns `Err(StoreError::NotFound)` if no object has `id`.
    async fn retrieve(&self, id: &str) -> Result<CatalogObject, StoreError>;

    /// Returns `Err(StoreError::NotFound)` if no object has `id`.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Objects matching `filter`, produced lazily. The stream is finite and
    /// can be consumed once; call `list` again to re-iterate.
    fn list(&self, filter: ListFilter) -> BoxStream<'_, Result<CatalogObject, StoreError>>;
}

/// Lets several resources share one store, e.g. one per configuration form.
#[async_trait]
impl<S: CatalogStore + ?Sized> CatalogStore for Arc<S> {
    async fn upsert(
        &self,
        key: &IdempotencyKey,
        object: CatalogObject,
    ) -> Result<CatalogObject, StoreError> {
        (**self).upsert(key, object).await
    }

    async fn retrieve(&self, id: &str) -> Result<CatalogObject, StoreError> {
        (**self).retrieve(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    fn list(&self, filter: ListFilter) -> BoxStream<'_, Result<CatalogObject, StoreError>> {
        (**self).list(filter)
    }
}
