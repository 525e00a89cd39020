//! In-memory reference implementation of [`CatalogStore`].

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use shelf_codec::{CatalogObject, CatalogObjectData, TranscoderConfig};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::key::IdempotencyKey;
use crate::traits::{CatalogStore, ListFilter};

#[derive(Default)]
struct State {
    objects: BTreeMap<String, CatalogObject>,
    /// Result of every accepted write, by idempotency key.
    replays: HashMap<IdempotencyKey, CatalogObject>,
    next_id: u64,
}

impl State {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        format!("OBJ-{:06}", self.next_id)
    }
}

/// A [`CatalogStore`] held in process memory.
///
/// Ids beginning with the configured temporary prefix are replaced with
/// `OBJ-<n>` on the first write. Variations embedded in an item get ids the
/// same way, take the item's version and point their `item_id` at it.
pub struct InMemoryCatalogStore {
    config: TranscoderConfig,
    state: Mutex<State>,
}

impl InMemoryCatalogStore {
    pub fn new(config: TranscoderConfig) -> Self {
        InMemoryCatalogStore {
            config,
            state: Mutex::new(State::default()),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.objects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        InMemoryCatalogStore::new(TranscoderConfig::default())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn upsert(
        &self,
        key: &IdempotencyKey,
        mut object: CatalogObject,
    ) -> Result<CatalogObject, StoreError> {
        let mut state = self.state.lock().await;
        if let Some(done) = state.replays.get(key) {
            debug!(key = %key, id = %done.id, "replaying idempotent write");
            return Ok(done.clone());
        }

        if self.config.is_temporary_id(&object.id) {
            object.id = state.assign_id();
            object.version = 1;
        } else {
            let stored = state
                .objects
                .get(&object.id)
                .ok_or_else(|| StoreError::NotFound {
                    id: object.id.clone(),
                })?;
            if stored.version != object.version {
                return Err(StoreError::VersionConflict {
                    id: object.id.clone(),
                    expected: object.version,
                    actual: stored.version,
                });
            }
            object.version += 1;
        }

        if let CatalogObjectData::Item(item) = &mut object.data {
            for variation in &mut item.variations {
                if self.config.is_temporary_id(&variation.id) {
                    variation.id = state.assign_id();
                }
                variation.version = object.version;
                if let CatalogObjectData::ItemVariation(data) = &mut variation.data {
                    data.item_id = object.id.clone();
                }
            }
        }

        state.objects.insert(object.id.clone(), object.clone());
        state.replays.insert(*key, object.clone());
        Ok(object)
    }

    async fn retrieve(&self, id: &str) -> Result<CatalogObject, StoreError> {
        self.state
            .lock()
            .await
            .objects
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self.state.lock().await.objects.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }

    /// Matching ids are collected on the first poll; each object is then
    /// fetched as the stream reaches it, so objects deleted meanwhile are
    /// skipped.
    fn list(&self, filter: ListFilter) -> BoxStream<'_, Result<CatalogObject, StoreError>> {
        let state = &self.state;
        stream::unfold(None, move |pending: Option<std::vec::IntoIter<String>>| {
            let filter = filter.clone();
            async move {
                let mut ids = match pending {
                    Some(ids) => ids,
                    None => state
                        .lock()
                        .await
                        .objects
                        .values()
                        .filter(|o| filter.matches(o.object_type()))
                        .map(|o| o.id.clone())
                        .collect::<Vec<_>>()
                        .into_iter(),
                };
                loop {
                    let id = ids.next()?;
                    let found = state.lock().await.objects.get(&id).cloned();
                    if let Some(object) = found {
                        return Some((Ok(object), Some(ids)));
                    }
                }
            }
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use serde_json::json;
    use shelf_codec::{from_json, CategoryData, FlatItem, Representation};

    fn category(id: &str) -> CatalogObject {
        CatalogObject::new(
            id,
            CatalogObjectData::Category(CategoryData {
                name: "Drinks".into(),
            }),
        )
    }

    #[tokio::test]
    async fn test_assigns_id_and_version() {
        let store = InMemoryCatalogStore::default();
        let stored = store
            .upsert(&IdempotencyKey::generate(), category("#new"))
            .await
            .unwrap();
        assert_eq!(stored.id, "OBJ-000001");
        assert_eq!(stored.version, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_permanent_id() {
        let store = InMemoryCatalogStore::default();
        let err = store
            .upsert(&IdempotencyKey::generate(), category("C404"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound { id: "C404".into() });
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_skips_objects_deleted_mid_stream() {
        let store = InMemoryCatalogStore::default();
        for _ in 0..3 {
            store
                .upsert(&IdempotencyKey::generate(), category("#"))
                .await
                .unwrap();
        }
        let mut stream = store.list(ListFilter::all());
        let first = stream.try_next().await.unwrap().unwrap();
        assert_eq!(first.id, "OBJ-000001");
        store.delete("OBJ-000002").await.unwrap();
        let rest: Vec<CatalogObject> = stream.try_collect().await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, "OBJ-000003");
    }

    #[tokio::test]
    async fn test_embedded_variations_get_ids() {
        let store = InMemoryCatalogStore::default();
        let raw = from_json(&json!({
            "name": "Coffee",
            "variation": [
                {"name": "Small", "pricing_type": "FIXED_PRICING", "amount": 300},
                {"id": "#v", "name": "Large", "pricing_type": "FIXED_PRICING", "amount": 400}
            ]
        }))
        .unwrap();
        let item = FlatItem::decode(&raw, &TranscoderConfig::default()).unwrap();
        let stored = store.upsert(&IdempotencyKey::generate(), item).await.unwrap();
        assert_eq!(stored.id, "OBJ-000001");

        let CatalogObjectData::Item(data) = &stored.data else {
            panic!("expected ITEM, got {:?}", stored.data);
        };
        let ids: Vec<&str> = data.variations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["OBJ-000002", "OBJ-000003"]);
        for v in &data.variations {
            assert_eq!(v.version, 1);
            match &v.data {
                CatalogObjectData::ItemVariation(d) => assert_eq!(d.item_id, "OBJ-000001"),
                other => panic!("expected ITEM_VARIATION, got {:?}", other),
            }
        }
        assert_eq!(store.len().await, 1);
    }
}
