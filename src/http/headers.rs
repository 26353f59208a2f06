//! Header, query and body plumbing shared by the handlers.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::conditional::Preconditions;
use crate::error::CatalogError;
use crate::etag::EntityTag;
use crate::page::{PageLimits, PageRequest};
use crate::store::StoreError;

pub const CATALOG_JSON: &str = "application/vnd.vbookstore.catalog+json;version=1";
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Conditional headers. Repeated header lines are joined into one list.
pub fn preconditions(headers: &HeaderMap) -> Preconditions {
    Preconditions {
        if_match: joined(headers, header::IF_MATCH),
        if_none_match: joined(headers, header::IF_NONE_MATCH),
    }
}

fn joined(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    (!values.is_empty()).then(|| values.join(", "))
}

pub fn parse_id(raw: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CatalogError::BadRequest(format!("Invalid resource id: {}", raw)))
}

pub fn json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, CatalogError> {
    Ok(serde_json::from_slice(body)?)
}

/// Query string as ordered pairs, so parameters may repeat.
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, name: &str) -> Option<&str> {
        self.all(name).next()
    }

    pub fn all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let name = name.to_string();
        self.0
            .iter()
            .filter(move |(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `page[number]` (1-based) and `page[size]`.
    pub fn page(&self, limits: PageLimits) -> Result<PageRequest, CatalogError> {
        let number = self.int("page[number]")?;
        let size = self.int("page[size]")?;
        Ok(PageRequest::from_client(number, size, limits))
    }

    fn int(&self, name: &str) -> Result<Option<i64>, CatalogError> {
        match self.first(name).map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                CatalogError::BadRequest(format!("Invalid value for {}: {}", name, value))
            }),
        }
    }
}

/// Serialize `body` with the catalog media type.
pub fn catalog_json<B: Serialize>(status: StatusCode, body: &B) -> Result<Response, CatalogError> {
    let bytes = serde_json::to_vec(body)
        .map_err(|e| CatalogError::Store(StoreError::Serde(e.to_string())))?;
    Ok((status, [(header::CONTENT_TYPE, CATALOG_JSON)], bytes).into_response())
}

pub fn with_etag(mut response: Response, tag: &EntityTag) -> Response {
    if let Ok(value) = HeaderValue::from_str(tag.as_str()) {
        response.headers_mut().insert(header::ETAG, value);
    }
    response
}

pub fn with_location(mut response: Response, location: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// `304 Not Modified` carrying the current tag.
pub fn not_modified(tag: &EntityTag) -> Response {
    with_etag(StatusCode::NOT_MODIFIED.into_response(), tag)
}
