//! HTTP surface integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use bookstore_catalog::http::{self, CATALOG_JSON};
use bookstore_catalog::{Catalog, CatalogConfig, InMemoryResourceStore, Uuid};
use reqwest::header::{ETAG, IF_MATCH, IF_NONE_MATCH, LOCATION};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Bind to port 0 and return the actual address.
async fn start_server() -> String {
    let catalog = Catalog::new(InMemoryResourceStore::new(), &CatalogConfig::default());
    let app = http::router(catalog);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn etag_of(resp: &reqwest::Response) -> String {
    resp.headers()[ETAG].to_str().unwrap().to_string()
}

async fn put_author(client: &reqwest::Client, base: &str, id: Uuid, name: &str) -> String {
    let resp = client
        .put(format!("{base}/api/authors/{id}"))
        .header(IF_NONE_MATCH, "*")
        .json(&json!({ "name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    etag_of(&resp)
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn author_lifecycle() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let id = Uuid::new_v4();

    let resp = client
        .put(format!("{base}/api/authors/{id}"))
        .header(IF_NONE_MATCH, "*")
        .json(&json!({ "name": "Ursula K. Le Guin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[LOCATION], format!("/api/authors/{id}").as_str());
    assert_eq!(resp.headers()["content-type"], CATALOG_JSON);
    let tag = etag_of(&resp);
    assert_eq!(tag, bookstore_catalog::etag::generate(id, 0).as_str());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["metadata"]["version"], 0);

    // conditional read
    let resp = client
        .get(format!("{base}/api/authors/{id}"))
        .header(IF_NONE_MATCH, &tag)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag_of(&resp), tag);

    // update
    let resp = client
        .put(format!("{base}/api/authors/{id}"))
        .header(IF_MATCH, &tag)
        .json(&json!({ "name": "Ursula Le Guin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let new_tag = etag_of(&resp);
    assert_ne!(new_tag, tag);

    // the old tag no longer matches
    let resp = client
        .delete(format!("{base}/api/authors/{id}"))
        .header(IF_MATCH, &tag)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(resp.headers()["content-type"], "application/problem+json");
    let problem: Value = resp.json().await.unwrap();
    assert_eq!(problem["status"], 412);
    assert_eq!(
        problem["detail"],
        "If-Match header does not match the current entity tag"
    );

    let resp = client
        .delete(format!("{base}/api/authors/{id}"))
        .header(IF_MATCH, &new_tag)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base}/api/authors/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_without_conditional_headers_is_412() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let id = Uuid::new_v4();
    put_author(&client, &base, id, "Someone").await;

    let resp = client
        .put(format!("{base}/api/authors/{id}"))
        .json(&json!({ "name": "Someone Else" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn duplicate_create_is_409() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let id = Uuid::new_v4();
    put_author(&client, &base, id, "Twice").await;

    let resp = client
        .put(format!("{base}/api/authors/{id}"))
        .header(IF_NONE_MATCH, "*")
        .json(&json!({ "name": "Twice Again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = client
        .put(format!("{base}/api/authors/{}", Uuid::new_v4()))
        .header(IF_NONE_MATCH, "*")
        .json(&json!({ "name": "twice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn book_patch_and_embed() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let author = Uuid::new_v4();
    put_author(&client, &base, author, "Frank Herbert").await;

    let book = Uuid::new_v4();
    let resp = client
        .put(format!("{base}/api/books/{book}"))
        .header(IF_NONE_MATCH, "*")
        .json(&json!({
            "title": "Dune",
            "authors": [author],
            "genres": ["SCIENCE_FICTION"],
            "price": { "amount": 9.99 }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let tag = etag_of(&resp);

    let resp = client
        .patch(format!("{base}/api/books/{book}"))
        .header(IF_MATCH, &tag)
        .header("content-type", "application/merge-patch+json")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);

    let resp = client
        .patch(format!("{base}/api/books/{book}"))
        .header(IF_MATCH, &tag)
        .header("content-type", "application/merge-patch+json")
        .body(r#"{"title":"Dune Messiah"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "Dune Messiah");
    assert_eq!(body["price"]["currency"], "EUR");
    assert_eq!(body["metadata"]["version"], 1);

    let resp = client
        .get(format!("{base}/api/books/{book}?embed=authors"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["_embedded"]["authors"][0]["name"], "Frank Herbert");

    let resp = client
        .get(format!("{base}/api/books/{book}?embed=reviews"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_genre_and_id_are_400() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/books/{}", Uuid::new_v4()))
        .header(IF_NONE_MATCH, "*")
        .json(&json!({ "title": "T", "genres": ["POETRY"], "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{base}/api/books/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn book_search_endpoint() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for (title, genre) in [
        ("Domain Driven Design", "NON_FICTION"),
        ("Design Patterns for Domain Experts", "NON_FICTION"),
        ("The Hobbit", "FANTASY"),
    ] {
        let resp = client
            .put(format!("{base}/api/books/{}", Uuid::new_v4()))
            .header(IF_NONE_MATCH, "*")
            .json(&json!({ "title": title, "genres": [genre], "price": 20 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!(
            "{base}/api/book-search?filter[title]=domain%20design&sort=-score"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["meta"]["totalElements"], 2);
    assert_eq!(body["meta"]["number"], 1);
    assert_eq!(body["content"][0]["title"], "Domain Driven Design");
    assert!(body["content"][0]["_links"]["self"]["href"]
        .as_str()
        .unwrap()
        .starts_with("/api/books/"));

    let resp = client
        .get(format!(
            "{base}/api/book-search?filter[genres]=FANTASY&filter[genres]=mystery&page[size]=1"
        ))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["meta"]["totalElements"], 1);
    assert_eq!(body["content"][0]["score"], 0.0);

    let resp = client
        .get(format!("{base}/api/book-search?sort=bogus"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = resp.json().await.unwrap();
    assert!(problem["detail"].as_str().unwrap().contains("bogus"));

    let resp = client
        .get(format!("{base}/api/book-search?page[number]=abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
