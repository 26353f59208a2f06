//! ResourceStore - Abstract versioned storage for catalog resources.

use uuid::Uuid;

use super::StoreError;
use crate::page::{Page, PageRequest};
use crate::resource::{Resource, Versioned};

/// Abstract versioned storage for catalog resources.
///
/// Implementations must make the version check and the write of `update` and
/// `delete` atomic with respect to other writers on the same row.
pub trait ResourceStore: Clone + Send + Sync + 'static {
    /// Get a resource by ID. Returns None if not found.
    fn get<R: Resource>(&self, id: Uuid) -> Result<Option<Versioned<R>>, StoreError>;

    /// Get every resource whose id is listed. Missing ids are skipped.
    fn get_many<R: Resource>(&self, ids: &[Uuid]) -> Result<Vec<Versioned<R>>, StoreError>;

    /// Insert a new resource at version 0.
    ///
    /// Fails with `DuplicateId` if the id exists and with `DuplicateKey` if
    /// another row holds the same natural key.
    fn insert<R: Resource>(&self, resource: &R) -> Result<Versioned<R>, StoreError>;

    /// Replace an existing resource if its version equals `expected_version`.
    ///
    /// On success the version is incremented by one and `updated_at` refreshed.
    fn update<R: Resource>(
        &self,
        resource: &R,
        expected_version: i64,
    ) -> Result<Versioned<R>, StoreError>;

    /// Delete a resource if its version equals `expected_version`.
    fn delete<R: Resource>(&self, id: Uuid, expected_version: i64) -> Result<(), StoreError>;

    /// Find resources matching a predicate, in insertion order.
    fn find<R: Resource>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError>;

    /// One page of a collection ordered by `updated_at` ascending.
    fn list<R: Resource>(&self, page: &PageRequest) -> Result<Page<Versioned<R>>, StoreError>;
}
