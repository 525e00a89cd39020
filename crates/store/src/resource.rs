//! Create, read, update, delete and list catalog objects in their
//! configuration representation.
//!
//! Every operation decodes before the store call and encodes after it; the
//! store call itself is the only await point, so callers can wrap it with
//! whatever timeout or retry policy they need. The configuration form is a
//! type parameter: [`Entity`] by default, or one of the flat forms.

use std::marker::PhantomData;

use futures::future;
use futures::stream::{BoxStream, StreamExt};
use shelf_codec::{ConfigMap, Entity, Representation, TranscoderConfig};
use tracing::debug;

use crate::error::{ResourceError, StoreOperation};
use crate::key::IdempotencyKey;
use crate::traits::{CatalogStore, ListFilter};

pub struct CatalogResource<S, R = Entity> {
    store: S,
    config: TranscoderConfig,
    form: PhantomData<fn() -> R>,
}

impl<S: CatalogStore> CatalogResource<S> {
    pub fn new(store: S, config: TranscoderConfig) -> Self {
        Self::with_representation(store, config)
    }
}

impl<S: CatalogStore, R: Representation> CatalogResource<S, R> {
    /// A resource whose maps are read and written in form `R`.
    pub fn with_representation(store: S, config: TranscoderConfig) -> Self {
        CatalogResource {
            store,
            config,
            form: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Write a new object. Its id is normally absent or temporary.
    pub async fn create(&self, raw: &ConfigMap) -> Result<ConfigMap, ResourceError> {
        self.write("create", raw).await
    }

    /// Write an existing object. `version` must match the stored one.
    pub async fn update(&self, raw: &ConfigMap) -> Result<ConfigMap, ResourceError> {
        self.write("update", raw).await
    }

    async fn write(&self, action: &str, raw: &ConfigMap) -> Result<ConfigMap, ResourceError> {
        let object = R::decode(raw, &self.config)?;
        let id = object.id.clone();
        let key = IdempotencyKey::generate();
        debug!(
            operation = %StoreOperation::Upsert,
            action,
            form = R::NAME,
            object_id = %id,
            key = %key,
            "calling catalog store"
        );
        let stored = self
            .store
            .upsert(&key, object)
            .await
            .map_err(ResourceError::store(StoreOperation::Upsert, &id))?;
        Ok(R::encode_persisted(&stored, &self.config)?)
    }

    pub async fn read(&self, id: &str) -> Result<ConfigMap, ResourceError> {
        debug!(operation = %StoreOperation::Retrieve, object_id = %id, "calling catalog store");
        let stored = self
            .store
            .retrieve(id)
            .await
            .map_err(ResourceError::store(StoreOperation::Retrieve, id))?;
        Ok(R::encode_persisted(&stored, &self.config)?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ResourceError> {
        debug!(operation = %StoreOperation::Delete, object_id = %id, "calling catalog store");
        self.store
            .delete(id)
            .await
            .map_err(ResourceError::store(StoreOperation::Delete, id))
    }

    /// Encoded objects matching `filter`, in the order the store yields them.
    /// Objects of a type `R` cannot hold are skipped.
    pub fn list(&self, filter: ListFilter) -> BoxStream<'_, Result<ConfigMap, ResourceError>> {
        debug!(operation = %StoreOperation::List, form = R::NAME, types = ?filter.object_types, "calling catalog store");
        self.store
            .list(filter)
            .filter(|item| {
                future::ready(match item {
                    Ok(object) => R::accepts(object.object_type()),
                    Err(_) => true,
                })
            })
            .map(move |item| {
                let object = item.map_err(ResourceError::store(StoreOperation::List, "*"))?;
                Ok(R::encode_persisted(&object, &self.config)?)
            })
            .boxed()
    }
}
