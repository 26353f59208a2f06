//! Resources - the shape shared by every mutable catalog entity.
//!
//! A resource is a plain serde struct with a stable `Uuid` identity. The store
//! wraps it in [`Versioned`], which carries the optimistic-concurrency version
//! and the audit timestamps.
//!
//! ## Example
//!
//! ```ignore
//! use bookstore_catalog::{Resource, Uuid};
//!
//! #[derive(Serialize, Deserialize, Clone, Resource)]
//! #[resource(collection = "authors")]
//! struct Author {
//!     id: Uuid,
//!     #[resource(natural_key)]
//!     name: String,
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::etag::{self, EntityTag};

/// Trait for types that can be stored by a [`ResourceStore`](crate::ResourceStore).
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this resource type (e.g. "authors", "books").
    const COLLECTION: &'static str;

    /// Returns the immutable identifier of this resource.
    fn id(&self) -> Uuid;

    /// Optional natural key, already normalized for comparison.
    ///
    /// Stores reject two rows of the same collection sharing a natural key.
    fn natural_key(&self) -> Option<String> {
        None
    }
}

/// Version and audit timestamps of a persisted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

/// A resource together with the metadata of the row it was read from.
#[derive(Debug, Clone, Serialize)]
pub struct Versioned<T> {
    #[serde(flatten)]
    pub data: T,
    pub metadata: ResourceMetadata,
}

impl<T> Versioned<T> {
    /// The version of the row this value was read from.
    pub fn version(&self) -> i64 {
        self.metadata.version
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            data: f(self.data),
            metadata: self.metadata,
        }
    }
}

impl<T: Resource> Versioned<T> {
    pub fn id(&self) -> Uuid {
        self.data.id()
    }

    /// Strong entity tag for exactly this row state.
    pub fn etag(&self) -> EntityTag {
        etag::generate(self.data.id(), self.metadata.version)
    }
}
