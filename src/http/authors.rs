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
use crate::model::{AuthorPatch, AuthorRequest};
use crate::service::PutOutcome;
use crate::store::ResourceStore;

/// `GET /api/authors`
pub async fn list<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, CatalogError> {
    let page = QueryParams(params).page(catalog.page_limits)?;
    let authors = catalog.authors.list(&page)?;
    catalog_json(StatusCode::OK, &authors)
}

/// `GET /api/authors/:id`, answering 304 when `If-None-Match` holds.
pub async fn get<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, CatalogError> {
    let author = catalog.authors.require_by_id(parse_id(&id)?)?;
    let tag = author.etag();
    if preconditions(&headers).is_not_modified(&tag) {
        return Ok(not_modified(&tag));
    }
    Ok(with_etag(catalog_json(StatusCode::OK, &author)?, &tag))
}

/// `PUT /api/authors/:id`
pub async fn put<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let id = parse_id(&id)?;
    let request: AuthorRequest = json_body(&body)?;

    let response = match catalog.authors.put(id, &preconditions(&headers), &request)? {
        PutOutcome::Created(author) => with_location(
            with_etag(catalog_json(StatusCode::CREATED, &author)?, &author.etag()),
            &format!("/api/authors/{}", author.id()),
        ),
        PutOutcome::Updated(author) => {
            with_etag(catalog_json(StatusCode::OK, &author)?, &author.etag())
        }
    };
    Ok(response)
}

/// `PATCH /api/authors/:id` (merge patch)
pub async fn patch<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let id = parse_id(&id)?;
    let patch: AuthorPatch = json_body(&body)?;
    let author = catalog.authors.patch(id, &preconditions(&headers), &patch)?;
    Ok(with_etag(catalog_json(StatusCode::OK, &author)?, &author.etag()))
}

/// `DELETE /api/authors/:id`
pub async fn delete<S: ResourceStore>(
    State(catalog): State<Catalog<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, CatalogError> {
    catalog
        .authors
        .delete_if_match(parse_id(&id)?, &preconditions(&headers))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
