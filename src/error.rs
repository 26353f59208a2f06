use std::error::Error;
use std::fmt;

use crate::store::StoreError;

/// Error type for catalog operations.
///
/// Every variant carries a human-readable reason. None of them is retried
/// inside the catalog; the client decides whether to re-fetch and resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Resource absent.
    NotFound(String),
    /// Duplicate id or natural key.
    Conflict(String),
    /// A conditional header is required but missing.
    PreconditionRequired(String),
    /// Version mismatch, unmatched or unparseable conditional header, empty patch.
    PreconditionFailed(String),
    /// Invalid sort token, filter value or query parameter.
    BadRequest(String),
    /// Storage failure that is not part of the conditional protocol.
    Store(StoreError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(msg) => write!(f, "{}", msg),
            CatalogError::Conflict(msg) => write!(f, "{}", msg),
            CatalogError::PreconditionRequired(msg) => write!(f, "{}", msg),
            CatalogError::PreconditionFailed(msg) => write!(f, "{}", msg),
            CatalogError::BadRequest(msg) => write!(f, "{}", msg),
            CatalogError::Store(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CatalogError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConcurrencyConflict {
                expected, actual, ..
            } => CatalogError::PreconditionFailed(format!(
                "Entity version mismatch. Expected {} but was {}",
                expected, actual
            )),
            StoreError::DuplicateId { collection, .. } => CatalogError::Conflict(format!(
                "{} with the provided id already exists",
                singular(&collection)
            )),
            StoreError::DuplicateKey { collection, .. } => CatalogError::Conflict(format!(
                "{} with the provided name already exists",
                singular(&collection)
            )),
            StoreError::NotFound { collection, id } => {
                CatalogError::NotFound(format!("{} {} not found", singular(&collection), id))
            }
            other => CatalogError::Store(other),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::BadRequest(err.to_string())
    }
}

impl CatalogError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 404,
            CatalogError::Conflict(_) => 409,
            CatalogError::PreconditionRequired(_) => 412,
            CatalogError::PreconditionFailed(_) => 412,
            CatalogError::BadRequest(_) => 400,
            CatalogError::Store(_) => 500,
        }
    }
}

/// "authors" -> "Author", "books" -> "Book".
fn singular(collection: &str) -> String {
    let name = collection.strip_suffix('s').unwrap_or(collection);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
