//! HTTP surface for the catalog.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health`
//! - `GET /api/authors`, `GET|PUT|PATCH|DELETE /api/authors/:id`
//! - `GET /api/books`, `GET|PUT|PATCH|DELETE /api/books/:id` (`?embed=authors`)
//! - `GET /api/book-search`
//!
//! ## Example
//!
//! ```ignore
//! use bookstore_catalog::{http, Catalog, CatalogConfig, InMemoryResourceStore};
//!
//! let config = CatalogConfig::from_env()?;
//! let catalog = Catalog::new(InMemoryResourceStore::new(), &config);
//!
//! // Compose with other axum routes
//! let app = http::router(catalog.clone());
//!
//! // Or serve directly
//! http::serve(catalog, &config.bind_addr).await?;
//! ```

mod authors;
mod books;
mod error;
mod headers;
mod search;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use crate::catalog::Catalog;
use crate::store::ResourceStore;

pub use headers::{CATALOG_JSON, PROBLEM_JSON};

/// Build an axum `Router` over the given catalog.
pub fn router<S: ResourceStore>(catalog: Catalog<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/authors", get(authors::list::<S>))
        .route(
            "/api/authors/:id",
            get(authors::get::<S>)
                .put(authors::put::<S>)
                .patch(authors::patch::<S>)
                .delete(authors::delete::<S>),
        )
        .route("/api/books", get(books::list::<S>))
        .route(
            "/api/books/:id",
            get(books::get::<S>)
                .put(books::put::<S>)
                .patch(books::patch::<S>)
                .delete(books::delete::<S>),
        )
        .route("/api/book-search", get(search::search::<S>))
        .with_state(catalog)
}

/// Serve the catalog over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<S: ResourceStore>(catalog: Catalog<S>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(catalog);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "catalog listening");
    axum::serve(listener, app).await
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}
