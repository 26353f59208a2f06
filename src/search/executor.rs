//! Runs a [`SearchPlan`] against the store.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use super::document::SearchDocument;
use super::planner::{Param, Predicate, SearchPlan};
use super::query::TextQuery;
use super::sort::{self, SortOrder};
use crate::error::CatalogError;
use crate::model::{Author, Book, BookGenre};
use crate::page::{Page, PageRequest};
use crate::resource::Versioned;
use crate::store::ResourceStore;

/// A book that passed every predicate, with its relevance.
#[derive(Debug, Clone)]
pub struct SearchRow {
    pub book: Versioned<Book>,
    /// Author names in credit order.
    pub authors: Vec<String>,
    /// Sum of the plan's rank terms; 0 when it has none.
    pub score: f64,
}

/// A plan with its parameters bound.
enum Bound {
    Text(TextQuery),
    Genres(Vec<BookGenre>),
}

struct Compiled<'a> {
    plan: &'a SearchPlan,
    params: Vec<Bound>,
}

impl<'a> Compiled<'a> {
    fn new(plan: &'a SearchPlan) -> Self {
        let params = plan
            .params
            .iter()
            .map(|param| match param {
                Param::Text(text) => Bound::Text(TextQuery::parse(text, plan.profile)),
                Param::Genres(genres) => Bound::Genres(genres.clone()),
            })
            .collect();
        Self { plan, params }
    }

    fn text(&self, param: usize) -> Option<&TextQuery> {
        match self.params.get(param) {
            Some(Bound::Text(query)) => Some(query),
            _ => None,
        }
    }

    fn matches(&self, book: &Book, document: &SearchDocument) -> bool {
        self.plan.predicates.iter().all(|predicate| match *predicate {
            Predicate::Matches { field, param } => self
                .text(param)
                .is_some_and(|query| query.matches(document.field(field))),
            Predicate::GenreIn { param } => match self.params.get(param) {
                Some(Bound::Genres(genres)) => book.genres.iter().any(|g| genres.contains(g)),
                _ => false,
            },
        })
    }

    fn rank(&self, document: &SearchDocument) -> f64 {
        self.plan
            .rank_terms
            .iter()
            .filter_map(|term| {
                self.text(term.param)
                    .map(|query| query.rank(document.field(term.field)))
            })
            .sum()
    }
}

#[derive(Clone)]
pub struct SearchExecutor<S> {
    store: S,
}

impl<S: ResourceStore> SearchExecutor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Filter, order and page the books.
    ///
    /// The page and the total count come from the same filtered set, read
    /// once from the store.
    pub fn execute(
        &self,
        plan: &SearchPlan,
        orders: &[SortOrder],
        page: &PageRequest,
    ) -> Result<Page<SearchRow>, CatalogError> {
        let books = self.store.find::<Book>(&|_: &Book| true)?;
        let names = self.author_names(&books)?;
        let compiled = Compiled::new(plan);

        let mut rows: Vec<SearchRow> = books
            .into_iter()
            .filter_map(|book| {
                let authors: Vec<String> = book
                    .data
                    .authors
                    .iter()
                    .filter_map(|id| names.get(id).cloned())
                    .collect();
                let document = SearchDocument::build(&book.data, &authors, plan.profile);
                if !compiled.matches(&book.data, &document) {
                    return None;
                }
                let score = compiled.rank(&document);
                Some(SearchRow {
                    book,
                    authors,
                    score,
                })
            })
            .collect();

        rows.sort_by(|a, b| sort::compare(orders, a, b));
        debug!(matched = rows.len(), page = page.number, size = page.size, "search executed");
        Ok(page.apply(rows))
    }

    fn author_names(&self, books: &[Versioned<Book>]) -> Result<HashMap<Uuid, String>, CatalogError> {
        let mut ids: Vec<Uuid> = books
            .iter()
            .flat_map(|book| book.data.authors.iter().copied())
            .collect();
        ids.sort();
        ids.dedup();

        Ok(self
            .store
            .get_many::<Author>(&ids)?
            .into_iter()
            .map(|author| (author.id(), author.data.name))
            .collect())
    }
}
