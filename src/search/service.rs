use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::executor::{SearchExecutor, SearchRow};
use super::planner::{SearchFilters, SearchQueryPlanner};
use super::sort::SearchSortResolver;
use super::text::TextProfile;
use crate::error::CatalogError;
use crate::model::BookGenre;
use crate::page::{Page, PageRequest};
use crate::store::ResourceStore;

/// Raw search input, as received from a client.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub text: Option<String>,
    /// Genre codes; each entry may hold several, comma separated.
    pub genres: Vec<String>,
    pub sort: Option<String>,
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSearchHit {
    pub id: Uuid,
    pub title: String,
    pub authors: Vec<String>,
    pub score: f64,
    #[serde(rename = "_links")]
    pub links: HitLinks,
}

impl From<SearchRow> for BookSearchHit {
    fn from(row: SearchRow) -> Self {
        let id = row.book.data.id;
        Self {
            id,
            title: row.book.data.title,
            authors: row.authors,
            score: row.score,
            links: HitLinks {
                self_link: Link {
                    href: format!("/api/books/{}", id),
                },
            },
        }
    }
}

/// Ranked book search: validate, plan, resolve sort, execute.
#[derive(Clone)]
pub struct BookSearchService<S> {
    planner: SearchQueryPlanner,
    executor: SearchExecutor<S>,
}

impl<S: ResourceStore> BookSearchService<S> {
    pub fn new(store: S, profile: TextProfile) -> Self {
        Self {
            planner: SearchQueryPlanner::new(profile),
            executor: SearchExecutor::new(store),
        }
    }

    pub fn search(&self, request: &SearchRequest) -> Result<Page<BookSearchHit>, CatalogError> {
        let filters = SearchFilters {
            title: request.title.clone(),
            author: request.author.clone(),
            text: request.text.clone(),
            genres: parse_genres(&request.genres)?,
        };

        let plan = self.planner.plan(&filters);
        let orders = SearchSortResolver::new(plan.has_rank()).resolve(request.sort.as_deref())?;
        debug!(?plan, ?orders, "search planned");

        let page = self.executor.execute(&plan, &orders, &request.page)?;
        Ok(page.map(BookSearchHit::from))
    }
}

fn parse_genres(raw: &[String]) -> Result<Vec<BookGenre>, CatalogError> {
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::parse)
        .collect()
}
