//! InMemoryResourceStore - HashMap-backed resource store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{ResourceStore, StoreError};
use crate::page::{Page, PageRequest};
use crate::resource::{Resource, ResourceMetadata, Versioned};

/// Internal stored representation of a resource.
struct StoredRow {
    bytes: Vec<u8>,
    metadata: ResourceMetadata,
    natural_key: Option<String>,
    /// Insertion order, used as the final tie-break of every ordering.
    seq: u64,
}

#[derive(Default)]
struct Tables {
    rows: HashMap<String, StoredRow>,
    next_seq: u64,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Wall-clock time, nudged forward so that no two writes share a timestamp.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }

    fn key_taken<R: Resource>(&self, key: &str, except: Uuid) -> bool {
        let prefix = format!("{}:", R::COLLECTION);
        let except = make_key(R::COLLECTION, except);
        self.rows.iter().any(|(row_key, row)| {
            row_key.starts_with(&prefix)
                && *row_key != except
                && row.natural_key.as_deref() == Some(key)
        })
    }

    fn collection<R: Resource>(&self) -> Vec<&StoredRow> {
        let prefix = format!("{}:", R::COLLECTION);
        let mut rows: Vec<&StoredRow> = self
            .rows
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, row)| row)
            .collect();
        rows.sort_by_key(|row| row.seq);
        rows
    }
}

/// In-memory resource store backed by a HashMap.
///
/// Storage key is `"collection:id"`. Clone-friendly via Arc; clones share rows.
#[derive(Clone, Default)]
pub struct InMemoryResourceStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryResourceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }
}

fn make_key(collection: &str, id: Uuid) -> String {
    format!("{}:{}", collection, id)
}

fn encode<R: Resource>(resource: &R) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(resource).map_err(|e| StoreError::Serde(e.to_string()))
}

fn decode<R: Resource>(row: &StoredRow) -> Result<Versioned<R>, StoreError> {
    let data: R =
        serde_json::from_slice(&row.bytes).map_err(|e| StoreError::Serde(e.to_string()))?;
    Ok(Versioned {
        data,
        metadata: row.metadata,
    })
}

impl ResourceStore for InMemoryResourceStore {
    fn get<R: Resource>(&self, id: Uuid) -> Result<Option<Versioned<R>>, StoreError> {
        let tables = self.read()?;
        tables
            .rows
            .get(&make_key(R::COLLECTION, id))
            .map(decode::<R>)
            .transpose()
    }

    fn get_many<R: Resource>(&self, ids: &[Uuid]) -> Result<Vec<Versioned<R>>, StoreError> {
        let tables = self.read()?;
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(row) = tables.rows.get(&make_key(R::COLLECTION, *id)) {
                results.push(decode(row)?);
            }
        }
        Ok(results)
    }

    fn insert<R: Resource>(&self, resource: &R) -> Result<Versioned<R>, StoreError> {
        let id = resource.id();
        let key = make_key(R::COLLECTION, id);
        let bytes = encode(resource)?;
        let natural_key = resource.natural_key();

        let mut tables = self.write()?;

        if tables.rows.contains_key(&key) {
            return Err(StoreError::DuplicateId {
                collection: R::COLLECTION.to_string(),
                id,
            });
        }
        if let Some(natural) = &natural_key {
            if tables.key_taken::<R>(natural, id) {
                return Err(StoreError::DuplicateKey {
                    collection: R::COLLECTION.to_string(),
                    key: natural.clone(),
                });
            }
        }

        let now = tables.tick();
        let metadata = ResourceMetadata {
            created_at: now,
            updated_at: now,
            version: 0,
        };
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.rows.insert(
            key,
            StoredRow {
                bytes,
                metadata,
                natural_key,
                seq,
            },
        );

        Ok(Versioned {
            data: resource.clone(),
            metadata,
        })
    }

    fn update<R: Resource>(
        &self,
        resource: &R,
        expected_version: i64,
    ) -> Result<Versioned<R>, StoreError> {
        let id = resource.id();
        let key = make_key(R::COLLECTION, id);
        let bytes = encode(resource)?;
        let natural_key = resource.natural_key();

        let mut tables = self.write()?;

        let current = tables
            .rows
            .get(&key)
            .map(|row| row.metadata)
            .ok_or_else(|| StoreError::NotFound {
                collection: R::COLLECTION.to_string(),
                id,
            })?;

        if current.version != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                collection: R::COLLECTION.to_string(),
                id,
                expected: expected_version,
                actual: current.version,
            });
        }
        if let Some(natural) = &natural_key {
            if tables.key_taken::<R>(natural, id) {
                return Err(StoreError::DuplicateKey {
                    collection: R::COLLECTION.to_string(),
                    key: natural.clone(),
                });
            }
        }

        let metadata = ResourceMetadata {
            created_at: current.created_at,
            updated_at: tables.tick(),
            version: current.version + 1,
        };
        if let Some(row) = tables.rows.get_mut(&key) {
            row.bytes = bytes;
            row.metadata = metadata;
            row.natural_key = natural_key;
        }

        Ok(Versioned {
            data: resource.clone(),
            metadata,
        })
    }

    fn delete<R: Resource>(&self, id: Uuid, expected_version: i64) -> Result<(), StoreError> {
        let key = make_key(R::COLLECTION, id);
        let mut tables = self.write()?;

        let actual = tables
            .rows
            .get(&key)
            .map(|row| row.metadata.version)
            .ok_or_else(|| StoreError::NotFound {
                collection: R::COLLECTION.to_string(),
                id,
            })?;

        if actual != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                collection: R::COLLECTION.to_string(),
                id,
                expected: expected_version,
                actual,
            });
        }

        tables.rows.remove(&key);
        Ok(())
    }

    fn find<R: Resource>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        let tables = self.read()?;
        let mut results = Vec::new();
        for row in tables.collection::<R>() {
            let versioned = decode::<R>(row)?;
            if predicate(&versioned.data) {
                results.push(versioned);
            }
        }
        Ok(results)
    }

    fn list<R: Resource>(&self, page: &PageRequest) -> Result<Page<Versioned<R>>, StoreError> {
        let tables = self.read()?;
        let mut rows = tables.collection::<R>();
        rows.sort_by(|a, b| {
            a.metadata
                .updated_at
                .cmp(&b.metadata.updated_at)
                .then(a.seq.cmp(&b.seq))
        });

        let total = rows.len() as u64;
        let content = rows
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .map(decode::<R>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page, total))
    }
}
