//! HTTP tests driving the router with an in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use library_catalog::{
    api,
    config::{AppConfig, StoreBackend},
    repository::{MemoryDocumentStore, Repository},
    AppState,
};

fn app() -> Router {
    let repository = Repository::new(Arc::new(MemoryDocumentStore::new()));
    api::router(AppState::new(AppConfig::default(), repository))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// POST a url-encoded form; returns status, Location header and JSON body
async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, body)
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "postgres");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    let repository = Repository::new(Arc::new(MemoryDocumentStore::new()));
    let app = api::router(AppState::new(config, repository));
    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/catalog");
}

#[tokio::test]
async fn test_catalog_summary_on_empty_store() {
    let (status, body) = get(&app(), "/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Local Library Home");
    assert_eq!(body["book_count"], 0);
    assert_eq!(body["book_instance_available_count"], 0);
}

#[tokio::test]
async fn test_create_genre_then_view_it() {
    let app = app();
    let (status, location, _) = post_form(&app, "/catalog/genre/create", "name=Science+Fiction").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.unwrap();
    assert!(location.starts_with("/catalog/genre/"));

    let (status, body) = get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genre"]["name"], "Science Fiction");
    assert_eq!(body["genre"]["url"], location.as_str());

    // Same name, different case: redirected to the first one
    let (status, again, _) = post_form(&app, "/catalog/genre/create", "name=science+fiction").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(again.as_deref(), Some(location.as_str()));
}

#[tokio::test]
async fn test_invalid_form_is_echoed_with_errors() {
    let app = app();
    let (status, location, body) = post_form(&app, "/catalog/genre/create", "name=+%3Cb+").await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert_eq!(body["genre"]["name"], "&lt;b");
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "Genre name must contain at least 3 characters");
}

#[tokio::test]
async fn test_book_form_accepts_repeated_genres() {
    let app = app();
    let (_, author, _) = post_form(&app, "/catalog/author/create", "first_name=Ursula&family_name=LeGuin").await;
    let (_, fantasy, _) = post_form(&app, "/catalog/genre/create", "name=Fantasy").await;
    let (_, poetry, _) = post_form(&app, "/catalog/genre/create", "name=Poetry").await;
    let id = |url: Option<String>| url.unwrap().rsplit('/').next().unwrap().to_string();
    let (author, fantasy, poetry) = (id(author), id(fantasy), id(poetry));

    let form = format!(
        "title=Earthsea&author={author}&summary=Wizards&isbn=123&genre={fantasy}&genre={poetry}&genre={fantasy}"
    );
    let (status, location, _) = post_form(&app, "/catalog/book/create", &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = get(&app, &location.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["author"]["name"], "LeGuin, Ursula");
}

#[tokio::test]
async fn test_unknown_record_is_not_found() {
    let app = app();
    let (status, body) = get(&app, "/catalog/author/8f2b5f4e-3c1a-4d7e-9a55-0b6f1c2d3e4f").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = get(&app, "/catalog/book/8f2b5f4e-3c1a-4d7e-9a55-0b6f1c2d3e4f/update").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_form_of_unknown_record_redirects_to_list() {
    let app = app();
    let (status, location, _) = post_form(
        &app,
        "/catalog/bookinstance/8f2b5f4e-3c1a-4d7e-9a55-0b6f1c2d3e4f/delete",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/bookinstances"));
}

#[tokio::test]
async fn test_unknown_status_is_bad_request() {
    let app = app();
    let (_, author, _) = post_form(&app, "/catalog/author/create", "first_name=Isaac&family_name=Asimov").await;
    let author = author.unwrap().rsplit('/').next().unwrap().to_string();
    let form = format!("title=Foundation&author={author}&summary=Empire&isbn=123");
    let (_, book, _) = post_form(&app, "/catalog/book/create", &form).await;
    let book = book.unwrap().rsplit('/').next().unwrap().to_string();

    let form = format!("book={book}&imprint=Gnome&status=Lost");
    let (status, _, _) = post_form(&app, "/catalog/bookinstance/create", &form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
