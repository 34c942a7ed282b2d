//! Shared harness for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use stickynotes_server::{AccessControl, AppState, ServerConfig, build_app};
use stickynotes_store::{MemoryStore, NoteStore};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const JWT_SECRET: &str = "integration_test_signing_key";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        admin_password: ADMIN_PASSWORD.to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        ..ServerConfig::default()
    }
}

/// Access control sharing the test server's secrets, for forging tokens.
pub fn test_access() -> AccessControl {
    AccessControl::new(ADMIN_PASSWORD, JWT_SECRET)
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    pub fn with_store(store: Arc<dyn NoteStore>, config: ServerConfig) -> Self {
        let state = AppState::new(store, config);
        let app = build_app(state.clone()).expect("router builds");
        Self { app, state }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let raw = String::from_utf8_lossy(&bytes).into_owned();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("valid request")).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn create(&self, body: Value) -> TestResponse {
        self.request(Method::POST, "/api/notes", None, Some(body)).await
    }

    /// Create a note that must succeed and return its JSON.
    pub async fn create_note(&self, content: &str) -> Value {
        let response = self.create(serde_json::json!({ "content": content })).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.raw);
        response.body
    }

    pub async fn update(&self, id: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, &format!("/api/notes/{}", id), token, Some(body))
            .await
    }

    pub async fn delete(&self, id: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, &format!("/api/notes/{}", id), token, None)
            .await
    }

    pub async fn login_with(&self, body: Value) -> TestResponse {
        self.request(Method::POST, "/api/admin/login", None, Some(body))
            .await
    }

    /// Log in with the configured password and return the token.
    pub async fn login(&self) -> String {
        let response = self
            .login_with(serde_json::json!({ "password": ADMIN_PASSWORD }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.raw);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub async fn list(&self) -> Vec<Value> {
        let response = self.get("/api/notes").await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.raw);
        response.body.as_array().cloned().expect("array body")
    }
}
