//! HTTP behavior of the public and admin note endpoints.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_create_trims_content_and_defaults_color() {
    let app = TestApp::new();
    let response = app.create(json!({ "content": "  buy milk \n" })).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let note = &response.body;
    assert_eq!(note["content"], "buy milk");
    assert_eq!(note["color"], "#FDE68A");
    assert_eq!(note["id"].as_str().unwrap().len(), 12);

    let created_at = note["created_at"].as_str().unwrap();
    assert!(created_at.ends_with('Z'), "{}", created_at);
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn test_create_preserves_valid_colors() {
    let app = TestApp::new();
    for color in ["#abc", "#A1b2C3"] {
        let response = app.create(json!({ "content": "x", "color": color })).await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["color"], color);
    }
}

#[tokio::test]
async fn test_create_replaces_malformed_color() {
    let app = TestApp::new();
    for color in [json!("red"), json!("#12345"), json!("#GGGGGG"), json!(42)] {
        let response = app.create(json!({ "content": "x", "color": color })).await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["color"], "#FDE68A");
    }
}

#[tokio::test]
async fn test_create_rejects_blank_content() {
    let app = TestApp::new();
    for body in [json!({}), json!({ "content": "   " }), json!({ "content": null })] {
        let response = app.create(body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "BAD_REQUEST");
        assert_eq!(response.error_message(), "content required");
    }
    assert!(app.list().await.is_empty());
}

#[tokio::test]
async fn test_create_content_length_limit() {
    let app = TestApp::new();

    let response = app.create(json!({ "content": "a".repeat(1000) })).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.create(json!({ "content": "a".repeat(1001) })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_message(),
        "content too long (max 1000 characters)"
    );

    // Astral characters count as two units each.
    let response = app.create(json!({ "content": "😀".repeat(501) })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_coerces_non_string_content() {
    let app = TestApp::new();

    let response = app.create(json!({ "content": 42 })).await;
    assert_eq!(response.body["content"], "42");

    let response = app.create(json!({ "content": ["a", "b"] })).await;
    assert_eq!(response.body["content"], "a,b");

    let response = app.create(json!({ "content": false })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_accepts_body_without_content_type() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/notes")
        .body(axum::body::Body::from(r#"{"content":"plain"}"#))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["content"], "plain");
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/notes")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"content\":"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_rejects_oversized_body() {
    let app = TestApp::new();
    let response = app
        .create(json!({ "content": "a".repeat(300 * 1024) }))
        .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error_code(), "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = TestApp::new();
    let a = app.create_note("A").await;
    let b = app.create_note("B").await;

    let notes = app.list().await;
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["id"], b["id"]);
    assert_eq!(notes[1]["id"], a["id"]);
}

#[tokio::test]
async fn test_color_only_update_keeps_other_fields() {
    let app = TestApp::new();
    let token = app.login().await;
    let note = app.create_note("keep me").await;
    let id = note["id"].as_str().unwrap();

    let response = app.update(id, Some(&token), json!({ "color": "#123" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["color"], "#123");
    assert_eq!(response.body["content"], "keep me");
    assert_eq!(response.body["created_at"], note["created_at"]);
    assert_eq!(response.body["id"], note["id"]);

    assert_eq!(app.list().await[0], response.body);
}

#[tokio::test]
async fn test_update_content() {
    let app = TestApp::new();
    let token = app.login().await;
    let note = app.create_note("draft").await;
    let id = note["id"].as_str().unwrap();

    let response = app
        .update(id, Some(&token), json!({ "content": "  final  " }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["content"], "final");
    assert_eq!(response.body["color"], note["color"]);
}

#[tokio::test]
async fn test_update_rejects_malformed_color() {
    let app = TestApp::new();
    let token = app.login().await;
    let note = app.create_note("x").await;
    let id = note["id"].as_str().unwrap();

    let response = app
        .update(id, Some(&token), json!({ "content": "new", "color": "blue" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "invalid color format");

    // Nothing was applied.
    assert_eq!(app.list().await[0]["content"], "x");
}

#[tokio::test]
async fn test_update_requires_string_fields() {
    let app = TestApp::new();
    let token = app.login().await;
    let note = app.create_note("x").await;
    let id = note["id"].as_str().unwrap();

    for body in [json!({}), json!({ "content": 5, "color": null })] {
        let response = app.update(id, Some(&token), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_message(), "no changes submitted");
    }

    let response = app.update(id, Some(&token), json!({ "content": " " })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "content required");
}

#[tokio::test]
async fn test_update_and_delete_unknown_id() {
    let app = TestApp::new();
    let token = app.login().await;

    let response = app
        .update("doesnotexist", Some(&token), json!({ "content": "x" }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");

    let response = app.delete("doesnotexist", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = TestApp::new();
    let token = app.login().await;
    let response = app.update("doesnotexist", Some(&token), json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_removes_note() {
    let app = TestApp::new();
    let token = app.login().await;
    let keep = app.create_note("keep").await;
    let gone = app.create_note("gone").await;

    let response = app.delete(gone["id"].as_str().unwrap(), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));

    let notes = app.list().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], keep["id"]);

    let response = app.delete(gone["id"].as_str().unwrap(), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();
    let response = app.get("/api/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}
