use tracing::{info, warn};
use uuid::Uuid;

use super::{BookService, PutOutcome};
use crate::conditional::{Preconditions, WriteIntent};
use crate::error::CatalogError;
use crate::model::{Author, AuthorPatch, AuthorRequest, BookRequest};
use crate::page::{Page, PageRequest};
use crate::resource::Versioned;
use crate::store::ResourceStore;

/// Version-gated operations on authors.
///
/// Deleting an author also removes it from the credits of every book; each
/// of those book updates is gated on the book's own version.
#[derive(Clone)]
pub struct AuthorService<S> {
    store: S,
    books: BookService<S>,
}

impl<S: ResourceStore> AuthorService<S> {
    pub fn new(store: S) -> Self {
        let books = BookService::new(store.clone());
        Self { store, books }
    }

    pub fn list(&self, page: &PageRequest) -> Result<Page<Versioned<Author>>, CatalogError> {
        Ok(self.store.list::<Author>(page)?)
    }

    pub fn require_by_id(&self, id: Uuid) -> Result<Versioned<Author>, CatalogError> {
        self.store
            .get::<Author>(id)?
            .ok_or_else(|| CatalogError::NotFound(format!("Author {} not found", id)))
    }

    /// Authors for the given ids, skipping the ones that do not exist.
    pub fn find_all_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Versioned<Author>>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.store.get_many::<Author>(ids)?)
    }

    pub fn create(
        &self,
        id: Option<Uuid>,
        request: &AuthorRequest,
    ) -> Result<Versioned<Author>, CatalogError> {
        let author = Author {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: request.require_name()?,
        };
        let created = self.store.insert(&author)?;
        info!(author_id = %created.id(), name = %created.data.name, "author created");
        Ok(created)
    }

    /// Rename an author if it is still at `expected_version`.
    ///
    /// A blank name keeps the current one; the version is bumped regardless.
    pub fn update(
        &self,
        id: Uuid,
        expected_version: i64,
        request: &AuthorRequest,
    ) -> Result<Versioned<Author>, CatalogError> {
        let current = self.require_by_id(id)?;
        let name = request
            .require_name()
            .unwrap_or_else(|_| current.data.name.clone());
        let author = Author { id, name };

        let updated = self.store.update(&author, expected_version)?;
        info!(author_id = %id, version = updated.version(), "author updated");
        Ok(updated)
    }

    /// Delete an author, then strip it from every book that credits it.
    ///
    /// Books that fail to update (deleted or changed concurrently) are
    /// skipped; the author deletion itself stands.
    pub fn delete(&self, id: Uuid, expected_version: i64) -> Result<(), CatalogError> {
        self.store.delete::<Author>(id, expected_version)?;
        info!(author_id = %id, expected_version, "author deleted");

        let books = match self.books.find_by_author(id) {
            Ok(books) => books,
            Err(err) => {
                warn!(author_id = %id, error = %err, "could not look up books of deleted author");
                return Ok(());
            }
        };
        let mut updated = 0usize;
        for book in &books {
            let request = BookRequest::without_author(&book.data, id);
            match self.books.update(book.id(), book.version(), &request) {
                Ok(_) => updated += 1,
                Err(err) => {
                    warn!(author_id = %id, book_id = %book.id(), error = %err, "skipped book while removing author");
                }
            }
        }
        if !books.is_empty() {
            info!(author_id = %id, books = updated, "author removed from books");
        }
        Ok(())
    }

    /// `PUT /authors/:id`: create-if-absent or version-gated replace.
    pub fn put(
        &self,
        id: Uuid,
        preconditions: &Preconditions,
        request: &AuthorRequest,
    ) -> Result<PutOutcome<Versioned<Author>>, CatalogError> {
        match preconditions.write_intent()? {
            WriteIntent::Create => Ok(PutOutcome::Created(self.create(Some(id), request)?)),
            WriteIntent::Update => {
                let current = self.require_by_id(id)?;
                let expected = preconditions.expected_version(&current)?;
                Ok(PutOutcome::Updated(self.update(id, expected, request)?))
            }
        }
    }

    pub fn patch(
        &self,
        id: Uuid,
        preconditions: &Preconditions,
        patch: &AuthorPatch,
    ) -> Result<Versioned<Author>, CatalogError> {
        let current = self.require_by_id(id)?;
        let expected = preconditions.expected_version(&current)?;
        if patch.is_empty() {
            return Err(CatalogError::PreconditionFailed(
                "Patch request must contain at least one updatable field".into(),
            ));
        }
        self.update(id, expected, &patch.merge(&current.data))
    }

    pub fn delete_if_match(
        &self,
        id: Uuid,
        preconditions: &Preconditions,
    ) -> Result<(), CatalogError> {
        let current = self.require_by_id(id)?;
        let expected = preconditions.expected_version(&current)?;
        self.delete(id, expected)
    }
}
