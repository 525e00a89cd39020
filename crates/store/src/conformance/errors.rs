use std::future::Future;

use super::{new_category, TestResult};
use crate::{CatalogStore, IdempotencyKey, StoreError};

pub(super) async fn run_error_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "error",
            "retrieve_missing_is_not_found",
            retrieve_missing_is_not_found(factory).await,
        ),
        TestResult::from_result(
            "error",
            "delete_missing_is_not_found",
            delete_missing_is_not_found(factory).await,
        ),
        TestResult::from_result(
            "error",
            "retrieve_after_delete_is_not_found",
            retrieve_after_delete_is_not_found(factory).await,
        ),
    ]
}

fn expect_not_found<T: std::fmt::Debug>(
    result: Result<T, StoreError>,
    id: &str,
) -> Result<(), String> {
    match result {
        Err(StoreError::NotFound { id: got }) if got == id => Ok(()),
        Err(StoreError::NotFound { id: got }) => {
            Err(format!("NotFound names '{}', expected '{}'", got, id))
        }
        other => Err(format!("expected NotFound, got {:?}", other)),
    }
}

async fn retrieve_missing_is_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    expect_not_found(s.retrieve("NO-SUCH-OBJECT").await, "NO-SUCH-OBJECT")
}

async fn delete_missing_is_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    expect_not_found(s.delete("NO-SUCH-OBJECT").await, "NO-SUCH-OBJECT")
}

async fn retrieve_after_delete_is_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
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
    s.delete(&created.id).await.map_err(|e| e.to_string())?;
    expect_not_found(s.retrieve(&created.id).await, &created.id)
}
