use crate::config::CatalogConfig;
use crate::page::PageLimits;
use crate::search::BookSearchService;
use crate::service::{AuthorService, BookQueryService, BookService};
use crate::store::ResourceStore;

/// Every catalog service, wired to one shared store.
#[derive(Clone)]
pub struct Catalog<S> {
    pub authors: AuthorService<S>,
    pub books: BookService<S>,
    pub book_queries: BookQueryService<S>,
    pub search: BookSearchService<S>,
    pub page_limits: PageLimits,
}

impl<S: ResourceStore> Catalog<S> {
    pub fn new(store: S, config: &CatalogConfig) -> Self {
        Self {
            authors: AuthorService::new(store.clone()),
            books: BookService::new(store.clone()),
            book_queries: BookQueryService::new(store.clone()),
            search: BookSearchService::new(store, config.text_profile),
            page_limits: config.page_limits,
        }
    }
}
