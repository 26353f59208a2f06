use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{dedup_in_order, BookGenre, Money};
use crate::error::CatalogError;
use crate::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "books")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// Author ids in credit order.
    pub authors: Vec<Uuid>,
    pub genres: Vec<BookGenre>,
    pub price: Money,
}

impl Book {
    pub fn has_author(&self, author_id: Uuid) -> bool {
        self.authors.contains(&author_id)
    }
}

/// Full replacement payload for a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    #[serde(default, alias = "authorIds")]
    pub authors: Vec<Uuid>,
    #[serde(default)]
    pub genres: Vec<BookGenre>,
    pub price: Money,
}

impl BookRequest {
    /// Normalize into the stored shape: trimmed title, no repeated authors or genres.
    pub fn into_book(self, id: Uuid) -> Result<Book, CatalogError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CatalogError::BadRequest("Book title must not be blank".into()));
        }

        Ok(Book {
            id,
            title: title.to_string(),
            authors: dedup_in_order(&self.authors),
            genres: dedup_in_order(&self.genres),
            price: self.price,
        })
    }

    /// The same book with one author removed from its credits.
    pub fn without_author(book: &Book, author_id: Uuid) -> Self {
        Self {
            title: book.title.clone(),
            authors: book
                .authors
                .iter()
                .copied()
                .filter(|id| *id != author_id)
                .collect(),
            genres: book.genres.clone(),
            price: book.price.clone(),
        }
    }
}

/// Merge-patch payload for a book. Absent fields (and a blank title) keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "authorIds", skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<BookGenre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl BookPatch {
    fn title_value(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.title_value().is_none()
            && self.authors.is_none()
            && self.genres.is_none()
            && self.price.is_none()
    }

    pub fn merge(&self, current: &Book) -> BookRequest {
        BookRequest {
            title: self.title_value().unwrap_or(&current.title).to_string(),
            authors: self.authors.clone().unwrap_or_else(|| current.authors.clone()),
            genres: self.genres.clone().unwrap_or_else(|| current.genres.clone()),
            price: self.price.clone().unwrap_or_else(|| current.price.clone()),
        }
    }
}
