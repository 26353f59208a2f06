//! Shared fixtures for the catalog suite.

use bookstore_catalog::{
    AuthorRequest, AuthorService, BookGenre, BookRequest, BookService, InMemoryResourceStore,
    Money, Uuid,
};

pub struct Fixture {
    pub authors: AuthorService<InMemoryResourceStore>,
    pub books: BookService<InMemoryResourceStore>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryResourceStore::new();
        Self {
            authors: AuthorService::new(store.clone()),
            books: BookService::new(store),
        }
    }

    pub fn author(&self, name: &str) -> Uuid {
        self.authors
            .create(None, &AuthorRequest::new(name))
            .unwrap()
            .id()
    }

    pub fn book(&self, title: &str, authors: Vec<Uuid>) -> Uuid {
        self.books.create(None, &book_request(title, authors)).unwrap().id()
    }
}

pub fn book_request(title: &str, authors: Vec<Uuid>) -> BookRequest {
    BookRequest {
        title: title.into(),
        authors,
        genres: vec![BookGenre::Fiction],
        price: Money::eur(15.0).unwrap(),
    }
}
