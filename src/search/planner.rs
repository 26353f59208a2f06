//! Search planning: raw filters in, storage-agnostic predicates and rank terms out.
//!
//! The planner never evaluates anything. It accumulates `(predicate, rank
//! term, bound parameter)` entries; user input only ever lands in
//! [`Param`]s, which the executor binds when it runs the plan.

use super::text::TextProfile;
use crate::model::{dedup_in_order, BookGenre};

/// Searchable text field of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Authors,
    /// Title, authors and genre labels together.
    All,
}

/// A bound parameter. Predicates and rank terms refer to it by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Sanitized free text, parsed with the plan's profile at execution.
    Text(String),
    /// Deduplicated genre codes.
    Genres(Vec<BookGenre>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The weighted document of `field` matches text parameter `param`.
    Matches { field: SearchField, param: usize },
    /// The book carries at least one genre of parameter `param`.
    GenreIn { param: usize },
}

/// Relevance of `field` against text parameter `param`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTerm {
    pub field: SearchField,
    pub param: usize,
}

/// Validated search input. Genre codes are already parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Free text over the whole document.
    pub text: Option<String>,
    pub genres: Vec<BookGenre>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    pub profile: TextProfile,
    pub predicates: Vec<Predicate>,
    /// Summed into the rank expression. Empty means rank is constant 0.
    pub rank_terms: Vec<RankTerm>,
    pub params: Vec<Param>,
}

impl SearchPlan {
    fn new(profile: TextProfile) -> Self {
        Self {
            profile,
            predicates: Vec::new(),
            rank_terms: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn has_rank(&self) -> bool {
        !self.rank_terms.is_empty()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.predicates.is_empty()
    }

    fn bind(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len() - 1
    }

    fn text(&mut self, field: SearchField, raw: Option<&str>) {
        let Some(query) = sanitize(raw) else {
            return;
        };
        let param = self.bind(Param::Text(query));
        self.predicates.push(Predicate::Matches { field, param });
        self.rank_terms.push(RankTerm { field, param });
    }

    fn genres(&mut self, genres: &[BookGenre]) {
        if genres.is_empty() {
            return;
        }
        let param = self.bind(Param::Genres(dedup_in_order(genres)));
        self.predicates.push(Predicate::GenreIn { param });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchQueryPlanner {
    profile: TextProfile,
}

impl SearchQueryPlanner {
    pub fn new(profile: TextProfile) -> Self {
        Self { profile }
    }

    pub fn plan(&self, filters: &SearchFilters) -> SearchPlan {
        let mut plan = SearchPlan::new(self.profile);
        plan.text(SearchField::Title, filters.title.as_deref());
        plan.text(SearchField::Authors, filters.author.as_deref());
        plan.text(SearchField::All, filters.text.as_deref());
        plan.genres(&filters.genres);
        plan
    }
}

/// Collapse whitespace runs to one space and trim. Blank input yields `None`.
pub fn sanitize(raw: Option<&str>) -> Option<String> {
    let collapsed = raw?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}
