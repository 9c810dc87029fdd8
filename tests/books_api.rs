//! HTTP-level tests for `/api/books`, driven through the full router with
//! `tower::ServiceExt`.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{
    body_json, build_failing_app, build_test_app, delete, get, post_json, post_raw, stored_count,
};
use serde_json::{json, Value};

fn orwell() -> Value {
    json!({
        "title": "1984",
        "description": "dystopia",
        "price": 9.99,
        "quantity": 5,
        "imageUrl": "http://x/1.jpg"
    })
}

fn assert_same_fields(book: &Value, input: &Value) {
    for field in ["title", "description", "price", "quantity", "imageUrl"] {
        assert_eq!(book[field], input[field], "field {field} differs");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_fresh_identifier() {
    let (app, _store) = build_test_app();
    let mut seen = HashSet::new();

    for _ in 0..3 {
        let response = post_json(app.clone(), "/api/books", orwell()).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let book = body_json(response).await;
        assert_same_fields(&book, &orwell());
        let id = book["_id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert!(seen.insert(id), "identifier was reused");
    }
}

#[tokio::test]
async fn create_missing_any_field_is_rejected_without_write() {
    let (app, store) = build_test_app();

    for field in ["title", "description", "price", "quantity", "imageUrl"] {
        let mut body = orwell();
        body.as_object_mut().unwrap().remove(field);

        let response = post_json(app.clone(), "/api/books", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {field}");

        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "All fields are required");
        assert_eq!(json["error"]["details"][0]["field"], field);
    }

    assert_eq!(stored_count(&store).await, 0);
}

#[tokio::test]
async fn create_with_empty_values_is_rejected() {
    let (app, store) = build_test_app();

    let mut body = orwell();
    body["title"] = json!("");
    body["quantity"] = json!(0);

    let response = post_json(app, "/api/books", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"].as_array().unwrap().len(), 2);
    assert_eq!(stored_count(&store).await, 0);
}

#[tokio::test]
async fn create_with_malformed_json_is_a_bad_request() {
    let (app, store) = build_test_app();

    let response = post_raw(app, "/api/books", "{not json".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "bad_request");
    assert_eq!(stored_count(&store).await, 0);
}

// ---------------------------------------------------------------------------
// List and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_reflects_creates_minus_deletes() {
    let (app, _store) = build_test_app();

    let mut ids = Vec::new();
    for n in 0..4 {
        let mut body = orwell();
        body["title"] = json!(format!("Book {n}"));
        let book = body_json(post_json(app.clone(), "/api/books", body).await).await;
        ids.push(book["_id"].as_str().unwrap().to_string());
    }

    for id in &ids[..2] {
        let response = delete(app.clone(), &format!("/api/books/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let listed = body_json(get(app, "/api/books").await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["title"], "Book 2");
    assert_eq!(listed[1]["title"], "Book 3");
}

#[tokio::test]
async fn collection_path_accepts_trailing_slash() {
    let (app, store) = build_test_app();

    let response = post_json(app.clone(), "/api/books/", orwell()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/books/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    assert_eq!(stored_count(&store).await, 1);
}

#[tokio::test]
async fn delete_unknown_identifier_is_404_and_changes_nothing() {
    let (app, store) = build_test_app();
    post_json(app.clone(), "/api/books", orwell()).await;

    let response = delete(app.clone(), "/api/books/never-created").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Book not found");

    assert_eq!(stored_count(&store).await, 1);
}

#[tokio::test]
async fn deleting_twice_reports_not_found_the_second_time() {
    let (app, _store) = build_test_app();
    let book = body_json(post_json(app.clone(), "/api/books", orwell()).await).await;
    let uri = format!("/api/books/{}", book["_id"].as_str().unwrap());

    assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::OK);
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn end_to_end_create_list_delete() {
    let (app, _store) = build_test_app();

    let response = post_json(app.clone(), "/api/books", orwell()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let listed = body_json(get(app.clone(), "/api/books").await).await;
    assert_eq!(listed, json!([created.clone()]));

    let response = delete(app.clone(), &format!("/api/books/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = body_json(response).await;
    assert_eq!(deleted["message"], "Book deleted successfully");
    assert_eq!(deleted["book"], created);

    let listed = body_json(get(app, "/api/books").await).await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .all(|book| book["_id"] != json!(id)));
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failures_map_to_generic_500s() {
    let cases = [
        ("list", get(build_failing_app(), "/api/books").await, "Error fetching books"),
        (
            "create",
            post_json(build_failing_app(), "/api/books", orwell()).await,
            "Error adding book",
        ),
        (
            "delete",
            delete(build_failing_app(), "/api/books/abc").await,
            "Error deleting book",
        ),
    ];

    for (operation, response, message) in cases {
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{operation} should fail with 500"
        );
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], message);
        assert!(
            !json.to_string().contains("db-internal"),
            "{operation} leaked store details"
        );
    }
}

#[tokio::test]
async fn validation_runs_before_the_store_is_touched() {
    let response = post_json(build_failing_app(), "/api/books", json!({"title": "x"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn module_health_and_request_id() {
    let (app, _store) = build_test_app();
    let response = get(app, "/api/books/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());
}
