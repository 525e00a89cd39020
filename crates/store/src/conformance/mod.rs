//! Conformance test suite for `CatalogStore` implementations.
//!
//! A backend-agnostic suite that any `CatalogStore` can run to check the
//! contract the resource operations rely on:
//!
//! - **Identifiers**: temporary ids replaced, assigned ids kept, variations
//!   embedded in an item assigned too
//! - **Versions**: bump on every write, optimistic conflict detection
//! - **Idempotency**: a repeated key replays the first result
//! - **Errors**: retrieve and delete of missing objects
//! - **Listing**: type filter, finite and restartable by calling again
//!
//! The suite writes objects with temporary ids in the default `"#"` form,
//! so the backend under test must treat that prefix as temporary.
//!
//! # Usage
//!
//! ```ignore
//! use shelf_store::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn remote_conformance() {
//!     let report = run_conformance_suite(|| async { connect_sandbox().await }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod errors;
mod listing;
mod writes;

use std::fmt;
use std::future::Future;

use shelf_codec::{
    temporary_id, CatalogObject, CatalogObjectData, CategoryData, ConfigMap, ConfigValue,
    FlatItem, ImageData, Representation, TranscoderConfig,
};

use crate::CatalogStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "ids", "version", "list").
    pub category: String,
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        TestResult {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in self.results.iter().filter(|r| !r.passed) {
            writeln!(
                f,
                "  FAIL [{}/{}]: {}",
                r.category,
                r.name,
                r.message.as_deref().unwrap_or("(no message)")
            )?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store.
///
/// `factory` is called once per test and must return a fresh, empty store.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: CatalogStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(writes::run_write_tests(&factory).await);
    results.extend(errors::run_error_tests(&factory).await);
    results.extend(listing::run_list_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn new_category(name: &str) -> CatalogObject {
    CatalogObject::new(
        temporary_id(&TranscoderConfig::default()),
        CatalogObjectData::Category(CategoryData {
            name: name.to_string(),
        }),
    )
}

fn new_image(name: &str) -> CatalogObject {
    CatalogObject::new(
        temporary_id(&TranscoderConfig::default()),
        CatalogObjectData::Image(ImageData {
            name: name.to_string(),
            url: format!("https://cdn.example.com/{}.png", name),
            caption: String::new(),
        }),
    )
}

/// A new item with one variably priced variation per name.
fn new_item(name: &str, variations: &[&str]) -> Result<CatalogObject, String> {
    let variation = |name: &str| {
        ConfigValue::Map(ConfigMap::from_iter([
            ("name".to_string(), ConfigValue::from(name)),
            ("pricing_type".to_string(), ConfigValue::from("VARIABLE_PRICING")),
        ]))
    };
    let raw = ConfigMap::from_iter([
        ("name".to_string(), ConfigValue::from(name)),
        (
            "variation".to_string(),
            ConfigValue::List(variations.iter().copied().map(variation).collect()),
        ),
    ]);
    FlatItem::decode(&raw, &TranscoderConfig::default()).map_err(|e| e.to_string())
}

fn category_name(object: &CatalogObject) -> Result<&str, String> {
    match &object.data {
        CatalogObjectData::Category(c) => Ok(&c.name),
        other => Err(format!("expected a category, got {:?}", other.object_type())),
    }
}
