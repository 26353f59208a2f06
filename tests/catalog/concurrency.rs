use std::sync::{Arc, Barrier};
use std::thread;

use bookstore_catalog::{
    AuthorRequest, AuthorService, CatalogError, InMemoryResourceStore, ResourceStore,
};

use crate::support::{book_request, Fixture};

#[test]
fn racing_updates_from_same_version_one_wins() {
    let fx = Fixture::new();
    let id = fx.book("Contested", vec![]);

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = ["Left", "Right"]
        .into_iter()
        .map(|title| {
            let books = fx.books.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                books.update(id, 0, &book_request(title, vec![]))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let wins = results.iter().filter(|r| r.is_ok()).count();
    let losses = results
        .iter()
        .filter(|r| matches!(r, Err(CatalogError::PreconditionFailed(_))))
        .count();

    assert_eq!(wins, 1);
    assert_eq!(losses, 1);
    assert_eq!(fx.books.require_by_id(id).unwrap().version(), 1);
}

#[test]
fn many_writers_advance_version_once_each() {
    let store = InMemoryResourceStore::new();
    let authors = AuthorService::new(store.clone());
    let id = authors
        .create(None, &AuthorRequest::new("Writer 0"))
        .unwrap()
        .id();

    let handles: Vec<_> = (1..=8)
        .map(|n| {
            let authors = authors.clone();
            thread::spawn(move || loop {
                let current = authors.require_by_id(id).unwrap();
                let request = AuthorRequest::new(format!("Writer {}", n));
                match authors.update(id, current.version(), &request) {
                    Ok(updated) => return updated.version(),
                    Err(CatalogError::PreconditionFailed(_)) => continue,
                    Err(other) => panic!("unexpected error: {other}"),
                }
            })
        })
        .collect();

    let mut versions: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    versions.sort();
    assert_eq!(versions, (1..=8).collect::<Vec<i64>>());

    let stored = store
        .get::<bookstore_catalog::Author>(id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.version(), 8);
}

#[test]
fn racing_creates_with_same_name_one_wins() {
    let fx = Fixture::new();
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = ["Ted Chiang", "ted chiang", " TED CHIANG", "Ted  Chiang"]
        .into_iter()
        .map(|name| {
            let authors = fx.authors.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                authors.create(None, &AuthorRequest::new(name))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(CatalogError::Conflict(_))))
        .count();

    // "Ted  Chiang" (two spaces) is a different natural key
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
    assert_eq!(conflicts, 2);
}
