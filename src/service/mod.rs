//! Catalog services - version-gated writes for authors and books.
//!
//! Services sit between the conditional request layer and the store. The
//! plain operations (`create`, `update`, `delete`) take an explicit expected
//! version; the conditional entry points (`put`, `patch`, `delete_if_match`)
//! resolve that version from [`Preconditions`](crate::Preconditions) first.
//!
//! ## Example
//!
//! ```ignore
//! use bookstore_catalog::{AuthorRequest, AuthorService, InMemoryResourceStore, Preconditions};
//!
//! let authors = AuthorService::new(InMemoryResourceStore::new());
//! let created = authors
//!     .put(id, &Preconditions::create(), &AuthorRequest::new("Le Guin"))?
//!     .into_inner();
//! let renamed = authors.put(
//!     id,
//!     &Preconditions::matching(&created),
//!     &AuthorRequest::new("Ursula K. Le Guin"),
//! )?;
//! ```

mod author_service;
mod book_query_service;
mod book_service;

pub use author_service::AuthorService;
pub use book_query_service::{BookEmbed, BookEmbedded, BookQueryService, BookView};
pub use book_service::BookService;

/// Result of a conditional PUT.
#[derive(Debug, Clone, PartialEq)]
pub enum PutOutcome<T> {
    /// The resource did not exist and was created.
    Created(T),
    /// An existing resource was replaced.
    Updated(T),
}

impl<T> PutOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, PutOutcome::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            PutOutcome::Created(value) | PutOutcome::Updated(value) => value,
        }
    }
}
