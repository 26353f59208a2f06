extern crate self as bookstore_catalog;

mod catalog;
pub mod conditional;
pub mod config;
mod error;
pub mod etag;
#[cfg(feature = "http")]
pub mod http;
pub mod model;
mod page;
mod resource;
pub mod search;
pub mod service;
mod store;

pub use catalog::Catalog;
pub use conditional::{Preconditions, WriteIntent};
pub use config::{CatalogConfig, ConfigError};
pub use error::CatalogError;
pub use etag::EntityTag;
pub use model::{
    Author, AuthorPatch, AuthorRequest, Book, BookGenre, BookPatch, BookRequest, Money,
};
pub use page::{Page, PageLimits, PageMeta, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use resource::{Resource, ResourceMetadata, Versioned};
pub use search::{BookSearchHit, BookSearchService, SearchRequest, TextProfile};
pub use service::{
    AuthorService, BookEmbed, BookEmbedded, BookQueryService, BookService, BookView, PutOutcome,
};
pub use store::{InMemoryResourceStore, ResourceStore, StoreError};

// Re-export the derive macro and the id type it expands to
pub use bookstore_catalog_macros::Resource;
pub use uuid::Uuid;
