//! shelf-store: the store boundary around the catalog transcoder.
//!
//! [`CatalogStore`] is the capability a remote catalog provides.
//! [`CatalogResource`] runs the create/read/update/delete/list flow over it,
//! with pure transcoding strictly before and after each store call.
//! [`InMemoryCatalogStore`] is a reference backend, and
//! [`conformance::run_conformance_suite`] checks any backend against the
//! trait's contract.

pub mod conformance;
mod error;
mod key;
mod memory;
mod resource;
mod traits;

pub use error::{ResourceError, StoreError, StoreOperation};
pub use key::IdempotencyKey;
pub use memory::InMemoryCatalogStore;
pub use resource::CatalogResource;
pub use traits::{CatalogStore, ListFilter};
