//! HTTP handlers for the Books module.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use bookstore_http::error::AppError;

use super::models::{Book, CreateBook, DeletedBook};
use super::store::BookStore;

pub type SharedStore = Arc<dyn BookStore>;

/// Routes served under `/api/books`
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", delete(delete_book))
        .route("/health", get(health_check))
        .with_state(store)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

/// GET /api/books
async fn list_books(State(store): State<SharedStore>) -> Result<Json<Vec<Book>>, AppError> {
    let books = store
        .list()
        .await
        .map_err(|e| AppError::internal("Error fetching books", e))?;

    Ok(Json(books))
}

/// POST /api/books
///
/// All five business fields must be present and non-empty; nothing is
/// written otherwise.
async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected create book body");
        AppError::bad_request(rejection.body_text())
    })?;

    let new_book = request
        .validate()
        .map_err(|failure| AppError::validation(failure.details, failure.message))?;

    let book = store
        .insert(new_book)
        .await
        .map_err(|e| AppError::internal("Error adding book", e))?;

    tracing::info!(book_id = %book.id, title = %book.title, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// DELETE /api/books/{id}
async fn delete_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<DeletedBook>, AppError> {
    let book = store
        .delete(&id)
        .await
        .map_err(|e| AppError::internal("Error deleting book", e))?
        .ok_or_else(|| AppError::not_found("Book not found"))?;

    tracing::info!(book_id = %book.id, "book deleted");
    Ok(Json(DeletedBook {
        message: "Book deleted successfully".to_string(),
        book,
    }))
}
