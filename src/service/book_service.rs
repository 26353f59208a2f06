use tracing::info;
use uuid::Uuid;

use super::PutOutcome;
use crate::conditional::{Preconditions, WriteIntent};
use crate::error::CatalogError;
use crate::model::{Book, BookPatch, BookRequest};
use crate::page::{Page, PageRequest};
use crate::resource::Versioned;
use crate::store::ResourceStore;

/// Version-gated operations on books.
#[derive(Clone)]
pub struct BookService<S> {
    store: S,
}

impl<S: ResourceStore> BookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Books ordered by `updated_at` ascending.
    pub fn list(&self, page: &PageRequest) -> Result<Page<Versioned<Book>>, CatalogError> {
        Ok(self.store.list::<Book>(page)?)
    }

    pub fn require_by_id(&self, id: Uuid) -> Result<Versioned<Book>, CatalogError> {
        self.store
            .get::<Book>(id)?
            .ok_or_else(|| CatalogError::NotFound(format!("Book {} not found", id)))
    }

    /// Every book crediting `author_id`, read at its current version.
    pub fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Versioned<Book>>, CatalogError> {
        Ok(self.store.find::<Book>(&|book: &Book| book.has_author(author_id))?)
    }

    /// Create a book at version 0. Without an id a random one is assigned.
    pub fn create(
        &self,
        id: Option<Uuid>,
        request: &BookRequest,
    ) -> Result<Versioned<Book>, CatalogError> {
        let book = request.clone().into_book(id.unwrap_or_else(Uuid::new_v4))?;
        let created = self.store.insert(&book)?;
        info!(book_id = %created.id(), title = %created.data.title, "book created");
        Ok(created)
    }

    /// Replace a book if it is still at `expected_version`.
    pub fn update(
        &self,
        id: Uuid,
        expected_version: i64,
        request: &BookRequest,
    ) -> Result<Versioned<Book>, CatalogError> {
        let current = self.require_by_id(id)?;
        let book = request.clone().into_book(current.id())?;
        let updated = self.store.update(&book, expected_version)?;
        info!(book_id = %id, version = updated.version(), "book updated");
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid, expected_version: i64) -> Result<(), CatalogError> {
        self.store.delete::<Book>(id, expected_version)?;
        info!(book_id = %id, expected_version, "book deleted");
        Ok(())
    }

    /// `PUT /books/:id`: create-if-absent or version-gated replace.
    pub fn put(
        &self,
        id: Uuid,
        preconditions: &Preconditions,
        request: &BookRequest,
    ) -> Result<PutOutcome<Versioned<Book>>, CatalogError> {
        match preconditions.write_intent()? {
            WriteIntent::Create => Ok(PutOutcome::Created(self.create(Some(id), request)?)),
            WriteIntent::Update => {
                let current = self.require_by_id(id)?;
                let expected = preconditions.expected_version(&current)?;
                Ok(PutOutcome::Updated(self.update(id, expected, request)?))
            }
        }
    }

    /// `PATCH /books/:id`: merge the patch over the current state.
    pub fn patch(
        &self,
        id: Uuid,
        preconditions: &Preconditions,
        patch: &BookPatch,
    ) -> Result<Versioned<Book>, CatalogError> {
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
