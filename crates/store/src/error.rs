use std::fmt;

use shelf_codec::CodecError;

/// All errors that can be returned by a CatalogStore implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No object with the given id.
    #[error("catalog object not found: {id}")]
    NotFound { id: String },

    /// Optimistic concurrency conflict: the write carried a version other
    /// than the stored one.
    #[error("version conflict on {id}: write carries version {expected}, store has {actual}")]
    VersionConflict {
        id: String,
        expected: i64,
        actual: i64,
    },

    /// The store refused the object (remote validation).
    #[error("invalid catalog object: {0}")]
    InvalidObject(String),

    /// A backend-specific failure (network, serialization, etc.).
    #[error("catalog backend error: {0}")]
    Backend(String),
}

/// The store call a [`ResourceError::Store`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Upsert,
    Retrieve,
    Delete,
    List,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreOperation::Upsert => "upsert",
            StoreOperation::Retrieve => "retrieve",
            StoreOperation::Delete => "delete",
            StoreOperation::List => "list",
        })
    }
}

/// Errors from the resource operations in [`crate::CatalogResource`].
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A store call failed. Nothing is retried.
    #[error("{operation} of catalog object '{object_id}' failed: {source}")]
    Store {
        operation: StoreOperation,
        object_id: String,
        #[source]
        source: StoreError,
    },
}

impl ResourceError {
    pub(crate) fn store(operation: StoreOperation, object_id: &str) -> impl FnOnce(StoreError) -> Self + '_ {
        move |source| ResourceError::Store {
            operation,
            object_id: object_id.to_string(),
            source,
        }
    }
}
