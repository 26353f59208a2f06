//! Weighted full-text book search.
//!
//! A request flows planner -> sort resolver -> executor:
//!
//! 1. [`SearchQueryPlanner`] turns filters into predicates, rank terms and
//!    bound parameters.
//! 2. [`SearchSortResolver`] turns the `sort` string into a total order,
//!    binding `score` to the rank expression (or a constant without one).
//! 3. [`SearchExecutor`] builds a [`SearchDocument`] per book, filters, ranks,
//!    sorts and pages.

mod document;
mod executor;
mod planner;
mod query;
mod service;
mod sort;
mod text;

pub use document::{Document, SearchDocument, Weight};
pub use executor::{SearchExecutor, SearchRow};
pub use planner::{
    sanitize, Param, Predicate, RankTerm, SearchField, SearchFilters, SearchPlan,
    SearchQueryPlanner,
};
pub use query::TextQuery;
pub use service::{BookSearchHit, BookSearchService, HitLinks, Link, SearchRequest};
pub use sort::{Direction, SearchSortResolver, SortKey, SortOrder};
pub use text::{Lexeme, TextProfile};
