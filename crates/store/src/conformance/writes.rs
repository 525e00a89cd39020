use std::future::Future;

use shelf_codec::{ensure_assigned, CatalogObjectData, TranscoderConfig};

use super::{category_name, new_category, new_item, TestResult};
use crate::{CatalogStore, IdempotencyKey, StoreError};

pub(super) async fn run_write_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "ids",
            "create_assigns_permanent_id",
            create_assigns_permanent_id(factory).await,
        ),
        TestResult::from_result(
            "ids",
            "distinct_creates_get_distinct_ids",
            distinct_creates_get_distinct_ids(factory).await,
        ),
        TestResult::from_result(
            "ids",
            "create_assigns_variation_ids",
            create_assigns_variation_ids(factory).await,
        ),
        TestResult::from_result(
            "ids",
            "update_keeps_assigned_id",
            update_keeps_assigned_id(factory).await,
        ),
        TestResult::from_result(
            "version",
            "write_bumps_version",
            write_bumps_version(factory).await,
        ),
        TestResult::from_result(
            "version",
            "stale_version_conflicts",
            stale_version_conflicts(factory).await,
        ),
        TestResult::from_result(
            "version",
            "conflict_does_not_change_object",
            conflict_does_not_change_object(factory).await,
        ),
        TestResult::from_result(
            "idempotency",
            "repeated_key_replays_result",
            repeated_key_replays_result(factory).await,
        ),
    ]
}

/// A created object comes back with an id the codec accepts as assigned.
async fn create_assigns_permanent_id<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let stored = s
        .upsert(&IdempotencyKey::generate(), new_category("Drinks"))
        .await
        .map_err(|e| e.to_string())?;
    ensure_assigned(&stored, &TranscoderConfig::default()).map_err(|e| e.to_string())?;
    let fetched = s.retrieve(&stored.id).await.map_err(|e| e.to_string())?;
    if category_name(&fetched)? != "Drinks" {
        return Err(format!("retrieved wrong object: {:?}", fetched));
    }
    Ok(())
}

/// Variations embedded in a new item get assigned ids that point back at it.
async fn create_assigns_variation_ids<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let stored = s
        .upsert(&IdempotencyKey::generate(), new_item("Coffee", &["Small", "Large"])?)
        .await
        .map_err(|e| e.to_string())?;
    ensure_assigned(&stored, &TranscoderConfig::default()).map_err(|e| e.to_string())?;
    let variations = match &stored.data {
        CatalogObjectData::Item(item) => &item.variations,
        other => return Err(format!("expected an item, got {:?}", other.object_type())),
    };
    if variations.len() != 2 {
        return Err(format!("expected 2 variations, got {}", variations.len()));
    }
    if variations[0].id == variations[1].id {
        return Err(format!("variations share id {}", variations[0].id));
    }
    for v in variations {
        match &v.data {
            CatalogObjectData::ItemVariation(d) if d.item_id == stored.id => {}
            other => return Err(format!("variation {} not linked to {}: {:?}", v.id, stored.id, other)),
        }
    }
    Ok(())
}

async fn distinct_creates_get_distinct_ids<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let a = s
        .upsert(&IdempotencyKey::generate(), new_category("A"))
        .await
        .map_err(|e| e.to_string())?;
    let b = s
        .upsert(&IdempotencyKey::generate(), new_category("B"))
        .await
        .map_err(|e| e.to_string())?;
    if a.id == b.id {
        return Err(format!("both objects were assigned id {}", a.id));
    }
    Ok(())
}

async fn update_keeps_assigned_id<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let created = s
        .upsert(&IdempotencyKey::generate(), new_category("Drinks"))
        .await
        .map_err(|e| e.to_string())?;
    let updated = s
        .upsert(&IdempotencyKey::generate(), created.clone())
        .await
        .map_err(|e| e.to_string())?;
    if updated.id != created.id {
        return Err(format!("id changed from {} to {}", created.id, updated.id));
    }
    Ok(())
}

async fn write_bumps_version<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let created = s
        .upsert(&IdempotencyKey::generate(), new_category("Drinks"))
        .await
        .map_err(|e| e.to_string())?;
    let updated = s
        .upsert(&IdempotencyKey::generate(), created.clone())
        .await
        .map_err(|e| e.to_string())?;
    if updated.version <= created.version {
        return Err(format!(
            "version did not increase: {} then {}",
            created.version, updated.version
        ));
    }
    Ok(())
}

/// Writing with the version from before an intervening write must conflict.
async fn stale_version_conflicts<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let created = s
        .upsert(&IdempotencyKey::generate(), new_category("Drinks"))
        .await
        .map_err(|e| e.to_string())?;
    let current = s
        .upsert(&IdempotencyKey::generate(), created.clone())
        .await
        .map_err(|e| e.to_string())?;
    match s.upsert(&IdempotencyKey::generate(), created.clone()).await {
        Err(StoreError::VersionConflict {
            id,
            expected,
            actual,
        }) => {
            if id != created.id || expected != created.version || actual != current.version {
                return Err(format!(
                    "conflict reported {}@{} vs {}, expected {}@{} vs {}",
                    id, expected, actual, created.id, created.version, current.version
                ));
            }
            Ok(())
        }
        Err(e) => Err(format!("expected VersionConflict, got {}", e)),
        Ok(o) => Err(format!("stale write accepted at version {}", o.version)),
    }
}

async fn conflict_does_not_change_object<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let created = s
        .upsert(&IdempotencyKey::generate(), new_category("Drinks"))
        .await
        .map_err(|e| e.to_string())?;
    let current = s
        .upsert(&IdempotencyKey::generate(), created.clone())
        .await
        .map_err(|e| e.to_string())?;

    let mut stale = created.clone();
    if let shelf_codec::CatalogObjectData::Category(c) = &mut stale.data {
        c.name = "Food".to_string();
    }
    if s.upsert(&IdempotencyKey::generate(), stale).await.is_ok() {
        return Err("stale write accepted".to_string());
    }
    let fetched = s.retrieve(&created.id).await.map_err(|e| e.to_string())?;
    if fetched != current {
        return Err(format!("object changed after conflict: {:?}", fetched));
    }
    Ok(())
}

/// Retrying a write with the same key must not write twice.
async fn repeated_key_replays_result<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let key = IdempotencyKey::generate();
    let object = new_category("Drinks");
    let first = s.upsert(&key, object.clone()).await.map_err(|e| e.to_string())?;
    let second = s.upsert(&key, object).await.map_err(|e| e.to_string())?;
    if first != second {
        return Err(format!("replay differs: {:?} vs {:?}", first, second));
    }
    let fetched = s.retrieve(&first.id).await.map_err(|e| e.to_string())?;
    if fetched.version != first.version {
        return Err(format!(
            "replay wrote again: version {} became {}",
            first.version, fetched.version
        ));
    }
    Ok(())
}
