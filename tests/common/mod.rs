//! Shared helpers for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bookstore_app::modules::books::models::{Book, NewBook};
use bookstore_app::modules::books::store::{BookStore, MemoryBookStore};
use bookstore_kernel::settings::Settings;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the full application over a fresh in-memory store, returning the
/// store too so tests can inspect it directly.
pub fn build_test_app() -> (Router, Arc<MemoryBookStore>) {
    let store = Arc::new(MemoryBookStore::new());
    let app = bookstore_app::app_with_store(&Settings::default(), store.clone());
    (app, store)
}

/// Build the application over a store whose every operation fails.
pub fn build_failing_app() -> Router {
    bookstore_app::app_with_store(&Settings::default(), Arc::new(FailingStore))
}

pub struct FailingStore;

#[async_trait]
impl BookStore for FailingStore {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        anyhow::bail!("mongodb://db-internal:27017 unreachable")
    }

    async fn insert(&self, _book: NewBook) -> anyhow::Result<Book> {
        anyhow::bail!("mongodb://db-internal:27017 unreachable")
    }

    async fn delete(&self, _id: &str) -> anyhow::Result<Option<Book>> {
        anyhow::bail!("mongodb://db-internal:27017 unreachable")
    }
}

/// Number of books currently held by `store`.
pub async fn stored_count(store: &MemoryBookStore) -> usize {
    store.list().await.unwrap().len()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
