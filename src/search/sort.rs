//! Sort tokens to a total order over search rows.

use std::cmp::Ordering;

use super::executor::SearchRow;
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// What a sort token orders by, after binding `score` to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    /// Smallest author name.
    Author,
    /// Smallest genre code.
    Genre,
    Price,
    CreatedAt,
    UpdatedAt,
    /// The summed rank expression.
    Rank,
    /// `score` when the plan has no rank terms: every row ties.
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: Direction::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: Direction::Desc,
        }
    }
}

/// Resolves `sort=` strings such as `-score,title`.
#[derive(Debug, Clone, Copy)]
pub struct SearchSortResolver {
    has_rank: bool,
}

impl SearchSortResolver {
    pub fn new(has_rank: bool) -> Self {
        Self { has_rank }
    }

    /// Blank input yields the default order: score descending, then
    /// `updatedAt` descending.
    pub fn resolve(&self, raw: Option<&str>) -> Result<Vec<SortOrder>, CatalogError> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(vec![
                SortOrder::desc(self.score_key()),
                SortOrder::desc(SortKey::UpdatedAt),
            ]);
        };

        let mut orders = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (direction, property) = match token.strip_prefix('-') {
                Some(rest) => (Direction::Desc, rest.trim()),
                None => (Direction::Asc, token),
            };
            if property.is_empty() {
                return Err(CatalogError::BadRequest(format!(
                    "Sort token '{}' must name a property",
                    token
                )));
            }
            orders.push(SortOrder {
                key: self.key(property)?,
                direction,
            });
        }
        Ok(orders)
    }

    fn key(&self, property: &str) -> Result<SortKey, CatalogError> {
        let key = match property.to_ascii_lowercase().as_str() {
            "title" => SortKey::Title,
            "author" => SortKey::Author,
            "genre" => SortKey::Genre,
            "price" => SortKey::Price,
            "createdat" => SortKey::CreatedAt,
            "updatedat" => SortKey::UpdatedAt,
            "score" => self.score_key(),
            _ => {
                return Err(CatalogError::BadRequest(format!(
                    "Unsupported sort property: {}",
                    property
                )))
            }
        };
        Ok(key)
    }

    fn score_key(&self) -> SortKey {
        if self.has_rank {
            SortKey::Rank
        } else {
            SortKey::Constant
        }
    }
}

/// Compare two rows under `orders`. Rows that tie on every order compare
/// equal, so a stable sort keeps them in store order.
pub fn compare(orders: &[SortOrder], a: &SearchRow, b: &SearchRow) -> Ordering {
    orders
        .iter()
        .map(|order| {
            let ordering = compare_key(order.key, a, b);
            match order.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_key(key: SortKey, a: &SearchRow, b: &SearchRow) -> Ordering {
    match key {
        SortKey::Title => a
            .book
            .data
            .title
            .to_lowercase()
            .cmp(&b.book.data.title.to_lowercase()),
        SortKey::Author => nulls_last(min_author(a), min_author(b)),
        SortKey::Genre => nulls_last(min_genre(a), min_genre(b)),
        SortKey::Price => a.book.data.price.amount.total_cmp(&b.book.data.price.amount),
        SortKey::CreatedAt => a.book.metadata.created_at.cmp(&b.book.metadata.created_at),
        SortKey::UpdatedAt => a.book.metadata.updated_at.cmp(&b.book.metadata.updated_at),
        SortKey::Rank => a.score.total_cmp(&b.score),
        SortKey::Constant => Ordering::Equal,
    }
}

fn min_author(row: &SearchRow) -> Option<String> {
    row.authors.iter().map(|name| name.to_lowercase()).min()
}

fn min_genre(row: &SearchRow) -> Option<&'static str> {
    row.book.data.genres.iter().map(|genre| genre.code()).min()
}

/// Missing values sort after present ones (ascending).
fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
