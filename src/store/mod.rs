//! Resource storage - versioned CRUD with single-row compare-and-swap.
//!
//! Every mutation of the catalog goes through a [`ResourceStore`]. Updates and
//! deletes carry the version the caller expects; the store checks it and writes
//! in the same critical section, so of two writers starting from the same
//! version exactly one succeeds.

mod in_memory;
mod store;

use std::fmt;

use uuid::Uuid;

/// Error type for resource store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency conflict.
    ConcurrencyConflict {
        collection: String,
        id: Uuid,
        expected: i64,
        actual: i64,
    },
    /// A row with this id already exists.
    DuplicateId { collection: String, id: Uuid },
    /// Another row already holds this natural key.
    DuplicateKey { collection: String, key: String },
    /// Row not found.
    NotFound { collection: String, id: Uuid },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConcurrencyConflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {}:{} (expected version {}, actual {})",
                collection, id, expected, actual
            ),
            StoreError::DuplicateId { collection, id } => {
                write!(f, "duplicate id in {}: {}", collection, id)
            }
            StoreError::DuplicateKey { collection, key } => {
                write!(f, "duplicate natural key in {}: {}", collection, key)
            }
            StoreError::NotFound { collection, id } => {
                write!(f, "row not found: {}:{}", collection, id)
            }
            StoreError::Serde(msg) => write!(f, "resource serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "resource storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryResourceStore;
pub use store::ResourceStore;
