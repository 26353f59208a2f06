use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::headers::{
    catalog_json, json_body, not_modified, parse_id, preconditions, with_etag, with_location,
    QueryParams,
};
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::{BookPatch, BookRequest};
use crate::service::{BookEmbed, PutOutcome};
use crate::store::ResourceStore;

/// `GET /api/books?embed=authors`
pub async fn list<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, CatalogError> {
    let params = QueryParams(params);
    let page = params.page(catalog.page_limits)?;
    let embed = BookEmbed::parse(params.all("embed"))?;
    let books = catalog.book_queries.list(&page, embed)?;
    catalog_json(StatusCode::OK, &books)
}

/// `GET /api/books/:id?embed=authors`
pub async fn get<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, CatalogError> {
    let embed = BookEmbed::parse(QueryParams(params).all("embed"))?;
    let view = catalog.book_queries.require_by_id(parse_id(&id)?, embed)?;
    let tag = view.book.etag();
    if preconditions(&headers).is_not_modified(&tag) {
        return Ok(not_modified(&tag));
    }
    Ok(with_etag(catalog_json(StatusCode::OK, &view)?, &tag))
}

/// `PUT /api/books/:id`
pub async fn put<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let id = parse_id(&id)?;
    let request: BookRequest = json_body(&body)?;

    let response = match catalog.books.put(id, &preconditions(&headers), &request)? {
        PutOutcome::Created(book) => with_location(
            with_etag(catalog_json(StatusCode::CREATED, &book)?, &book.etag()),
            &format!("/api/books/{}", book.id()),
        ),
        PutOutcome::Updated(book) => with_etag(catalog_json(StatusCode::OK, &book)?, &book.etag()),
    };
    Ok(response)
}

/// `PATCH /api/books/:id` (merge patch)
pub async fn patch<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let id = parse_id(&id)?;
    let patch: BookPatch = json_body(&body)?;
    let book = catalog.books.patch(id, &preconditions(&headers), &patch)?;
    Ok(with_etag(catalog_json(StatusCode::OK, &book)?, &book.etag()))
}

/// `DELETE /api/books/:id`
pub async fn delete<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, CatalogError> {
    catalog
        .books
        .delete_if_match(parse_id(&id)?, &preconditions(&headers))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
