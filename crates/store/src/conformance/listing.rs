use std::future::Future;

use futures::TryStreamExt;
use shelf_codec::{CatalogObject, ObjectType};

use super::{new_category, new_image, TestResult};
use crate::{CatalogStore, IdempotencyKey, ListFilter};

pub(super) async fn run_list_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "list",
            "empty_store_lists_nothing",
            empty_store_lists_nothing(factory).await,
        ),
        TestResult::from_result(
            "list",
            "empty_filter_lists_every_type",
            empty_filter_lists_every_type(factory).await,
        ),
        TestResult::from_result(
            "list",
            "filter_restricts_types",
            filter_restricts_types(factory).await,
        ),
        TestResult::from_result(
            "list",
            "fresh_list_call_reiterates",
            fresh_list_call_reiterates(factory).await,
        ),
    ]
}

async fn collect<S: CatalogStore>(s: &S, filter: ListFilter) -> Result<Vec<CatalogObject>, String> {
    s.list(filter).try_collect().await.map_err(|e| e.to_string())
}

async fn seed<S: CatalogStore>(s: &S) -> Result<(), String> {
    for object in [new_category("Drinks"), new_category("Food"), new_image("hero")] {
        s.upsert(&IdempotencyKey::generate(), object)
            .await
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

async fn empty_store_lists_nothing<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let listed = collect(&s, ListFilter::all()).await?;
    if !listed.is_empty() {
        return Err(format!("expected nothing, got {} objects", listed.len()));
    }
    Ok(())
}

async fn empty_filter_lists_every_type<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    seed(&s).await?;
    let listed = collect(&s, ListFilter::all()).await?;
    if listed.len() != 3 {
        return Err(format!("expected 3 objects, got {}", listed.len()));
    }
    Ok(())
}

async fn filter_restricts_types<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    seed(&s).await?;
    let listed = collect(&s, ListFilter::of([ObjectType::Image])).await?;
    if listed.len() != 1 || listed[0].object_type() != ObjectType::Image {
        return Err(format!(
            "expected one image, got {:?}",
            listed.iter().map(|o| o.object_type()).collect::<Vec<_>>()
        ));
    }
    Ok(())
}

/// A consumed stream is done; a second `list` call sees every object again.
async fn fresh_list_call_reiterates<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    seed(&s).await?;
    let filter = ListFilter::of([ObjectType::Category]);
    let first = collect(&s, filter.clone()).await?;
    let second = collect(&s, filter).await?;
    if first.len() != 2 || first != second {
        return Err(format!(
            "listings differ: {} then {} objects",
            first.len(),
            second.len()
        ));
    }
    Ok(())
}
