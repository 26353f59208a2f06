//! Catalog domain types: authors, books and the values they carry.

mod author;
mod book;
mod genre;
mod money;

use std::collections::HashSet;
use std::hash::Hash;

pub use author::{Author, AuthorPatch, AuthorRequest};
pub use book::{Book, BookPatch, BookRequest};
pub use genre::BookGenre;
pub use money::{Money, DEFAULT_CURRENCY};

/// Drop repeated items, keeping the first occurrence of each.
pub(crate) fn dedup_in_order<T: Copy + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().filter(|item| seen.insert(*item)).collect()
}
