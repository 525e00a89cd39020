use shelf_store::conformance::run_conformance_suite;
use shelf_store::InMemoryCatalogStore;

#[tokio::test]
async fn test_in_memory_store_conformance() {
    let report = run_conformance_suite(|| async { InMemoryCatalogStore::default() }).await;
    assert!(report.total > 0);
    assert!(report.failed == 0, "{report}");
}
