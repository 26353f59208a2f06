use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::headers::{catalog_json, QueryParams};
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::search::SearchRequest;
use crate::store::ResourceStore;

/// `GET /api/book-search`
///
/// `filter[title]`, `filter[author]`, `filter[q]`, repeatable
/// `filter[genres]`, `page[number]`, `page[size]` and `sort`.
pub async fn search<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, CatalogError> {
    let params = QueryParams(params);
    let request = SearchRequest {
        title: params.first("filter[title]").map(str::to_string),
        author: params.first("filter[author]").map(str::to_string),
        text: params.first("filter[q]").map(str::to_string),
        genres: params.all("filter[genres]").map(str::to_string).collect(),
        sort: params.first("sort").map(str::to_string),
        page: params.page(catalog.page_limits)?,
    };

    let hits = catalog.search.search(&request)?;
    catalog_json(StatusCode::OK, &hits)
}
