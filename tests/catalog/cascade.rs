use bookstore_catalog::{
    AuthorRequest, AuthorService, BookService, CatalogError, InMemoryResourceStore, Page,
    PageRequest, Preconditions, Resource, ResourceStore, StoreError, Uuid, Versioned,
};

use crate::support::{book_request, Fixture};

#[test]
fn deleting_author_strips_it_from_every_book() {
    let fx = Fixture::new();
    let leaving = fx.author("Leaving");
    let staying = fx.author("Staying");

    let shared = fx.book("Co-written", vec![staying, leaving]);
    let solo = fx.book("Alone", vec![leaving]);
    let unrelated = fx.book("Unrelated", vec![staying]);

    // advance two books so the cascade must use their current versions
    for _ in 0..2 {
        let current = fx.books.require_by_id(solo).unwrap();
        fx.books
            .update(solo, current.version(), &book_request("Alone", vec![leaving]))
            .unwrap();
    }

    let before: Vec<i64> = [shared, solo, unrelated]
        .iter()
        .map(|id| fx.books.require_by_id(*id).unwrap().version())
        .collect();
    assert_eq!(before, vec![0, 2, 0]);

    let author = fx.authors.require_by_id(leaving).unwrap();
    fx.authors
        .delete_if_match(leaving, &Preconditions::matching(&author))
        .unwrap();

    let shared = fx.books.require_by_id(shared).unwrap();
    assert_eq!(shared.data.authors, vec![staying]);
    assert_eq!(shared.version(), 1);

    let solo = fx.books.require_by_id(solo).unwrap();
    assert!(solo.data.authors.is_empty());
    assert_eq!(solo.version(), 3);

    assert_eq!(fx.books.require_by_id(unrelated).unwrap().version(), 0);
    assert!(matches!(
        fx.authors.require_by_id(leaving),
        Err(CatalogError::NotFound(_))
    ));
}

#[test]
fn author_without_books_deletes_cleanly() {
    let fx = Fixture::new();
    let id = fx.author("Nobody Reads Me");
    fx.authors.delete(id, 0).unwrap();
    assert!(fx.books.find_by_author(id).unwrap().is_empty());
}

#[test]
fn stale_author_delete_does_not_cascade() {
    let fx = Fixture::new();
    let author = fx.author("Guarded");
    let book = fx.book("Guarded Book", vec![author]);
    let stale = fx.authors.require_by_id(author).unwrap();
    fx.authors
        .update(author, 0, &bookstore_catalog::AuthorRequest::new("Guarded, Renamed"))
        .unwrap();

    let err = fx
        .authors
        .delete_if_match(author, &Preconditions::matching(&stale))
        .unwrap_err();
    assert_eq!(err.status_code(), 412);

    let book = fx.books.require_by_id(book).unwrap();
    assert_eq!(book.data.authors, vec![author]);
    assert_eq!(book.version(), 0);
}

/// Delegates to an in-memory store, failing book lookups or one book's update.
#[derive(Clone)]
struct FlakyStore {
    inner: InMemoryResourceStore,
    fail_find: bool,
    fail_update_of: Option<Uuid>,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: InMemoryResourceStore::new(),
            fail_find: false,
            fail_update_of: None,
        }
    }
}

impl ResourceStore for FlakyStore {
    fn get<R: Resource>(&self, id: Uuid) -> Result<Option<Versioned<R>>, StoreError> {
        self.inner.get(id)
    }

    fn get_many<R: Resource>(&self, ids: &[Uuid]) -> Result<Vec<Versioned<R>>, StoreError> {
        self.inner.get_many(ids)
    }

    fn insert<R: Resource>(&self, resource: &R) -> Result<Versioned<R>, StoreError> {
        self.inner.insert(resource)
    }

    fn update<R: Resource>(
        &self,
        resource: &R,
        expected_version: i64,
    ) -> Result<Versioned<R>, StoreError> {
        if R::COLLECTION == "books" && self.fail_update_of == Some(resource.id()) {
            return Err(StoreError::Storage("book row locked".into()));
        }
        self.inner.update(resource, expected_version)
    }

    fn delete<R: Resource>(&self, id: Uuid, expected_version: i64) -> Result<(), StoreError> {
        self.inner.delete::<R>(id, expected_version)
    }

    fn find<R: Resource>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        if self.fail_find {
            return Err(StoreError::Storage("index unavailable".into()));
        }
        self.inner.find(predicate)
    }

    fn list<R: Resource>(&self, page: &PageRequest) -> Result<Page<Versioned<R>>, StoreError> {
        self.inner.list(page)
    }
}

#[test]
fn failing_book_update_is_skipped_and_delete_stands() {
    let mut store = FlakyStore::new();
    let setup = AuthorService::new(store.clone());
    let setup_books = BookService::new(store.clone());
    let author = setup.create(None, &AuthorRequest::new("Half Removed")).unwrap().id();
    let stuck = setup_books.create(None, &book_request("Stuck", vec![author])).unwrap().id();
    let freed = setup_books.create(None, &book_request("Freed", vec![author])).unwrap().id();

    store.fail_update_of = Some(stuck);
    let authors = AuthorService::new(store.clone());
    let books = BookService::new(store);

    authors.delete(author, 0).unwrap();

    assert!(matches!(authors.require_by_id(author), Err(CatalogError::NotFound(_))));

    let stuck = books.require_by_id(stuck).unwrap();
    assert_eq!(stuck.data.authors, vec![author]);
    assert_eq!(stuck.version(), 0);

    let freed = books.require_by_id(freed).unwrap();
    assert!(freed.data.authors.is_empty());
    assert_eq!(freed.version(), 1);
}

#[test]
fn failing_book_lookup_does_not_fail_the_delete() {
    let mut store = FlakyStore::new();
    let setup = AuthorService::new(store.clone());
    let setup_books = BookService::new(store.clone());
    let author = setup.create(None, &AuthorRequest::new("Unindexed")).unwrap().id();
    let book = setup_books.create(None, &book_request("Orphaned", vec![author])).unwrap().id();

    store.fail_find = true;
    let authors = AuthorService::new(store.clone());
    let books = BookService::new(store);

    authors.delete(author, 0).unwrap();

    assert!(matches!(authors.require_by_id(author), Err(CatalogError::NotFound(_))));
    assert_eq!(books.require_by_id(book).unwrap().version(), 0);
}
