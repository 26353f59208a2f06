use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::{AuthorService, BookService};
use crate::error::CatalogError;
use crate::model::{Author, Book};
use crate::page::{Page, PageRequest};
use crate::resource::Versioned;
use crate::store::ResourceStore;

/// Related resources a book view may inline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookEmbed {
    pub authors: bool,
}

impl BookEmbed {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn authors() -> Self {
        Self { authors: true }
    }

    /// Parse repeated and/or comma separated `embed` values.
    pub fn parse<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<Self, CatalogError> {
        let mut embed = Self::none();
        for token in values.into_iter().flat_map(|v| v.split(',')) {
            let token = token.trim().to_lowercase();
            match token.as_str() {
                "" => {}
                "authors" => embed.authors = true,
                other => {
                    return Err(CatalogError::BadRequest(format!(
                        "Unsupported embed option: {}",
                        other
                    )))
                }
            }
        }
        Ok(embed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookEmbedded {
    pub authors: Vec<Versioned<Author>>,
}

/// A book as rendered to readers, optionally with its authors inlined.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    #[serde(flatten)]
    pub book: Versioned<Book>,
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<BookEmbedded>,
}

/// Read side for books with related-resource embedding.
#[derive(Clone)]
pub struct BookQueryService<S> {
    books: BookService<S>,
    authors: AuthorService<S>,
}

impl<S: ResourceStore> BookQueryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            books: BookService::new(store.clone()),
            authors: AuthorService::new(store),
        }
    }

    pub fn list(
        &self,
        page: &PageRequest,
        embed: BookEmbed,
    ) -> Result<Page<BookView>, CatalogError> {
        let books = self.books.list(page)?;
        let authors = self.resolve_authors(&books.content, embed)?;
        Ok(books.map(|book| to_view(book, &authors, embed)))
    }

    pub fn require_by_id(&self, id: Uuid, embed: BookEmbed) -> Result<BookView, CatalogError> {
        let book = self.books.require_by_id(id)?;
        let authors = self.resolve_authors(std::slice::from_ref(&book), embed)?;
        Ok(to_view(book, &authors, embed))
    }

    fn resolve_authors(
        &self,
        books: &[Versioned<Book>],
        embed: BookEmbed,
    ) -> Result<HashMap<Uuid, Versioned<Author>>, CatalogError> {
        if !embed.authors {
            return Ok(HashMap::new());
        }

        let mut ids: Vec<Uuid> = books
            .iter()
            .flat_map(|book| book.data.authors.iter().copied())
            .collect();
        ids.sort();
        ids.dedup();

        Ok(self
            .authors
            .find_all_by_ids(&ids)?
            .into_iter()
            .map(|author| (author.id(), author))
            .collect())
    }
}

fn to_view(
    book: Versioned<Book>,
    authors: &HashMap<Uuid, Versioned<Author>>,
    embed: BookEmbed,
) -> BookView {
    let embedded = if embed.authors {
        let authors: Vec<_> = book
            .data
            .authors
            .iter()
            .filter_map(|id| authors.get(id).cloned())
            .collect();
        (!authors.is_empty()).then_some(BookEmbedded { authors })
    } else {
        None
    };
    BookView { book, embedded }
}
