//! Shared helpers for router-level tests.
//!
//! The pool is constructed lazily and points at a closed local port, so
//! tests exercising auth, validation, and diagnostics run without a
//! database; only a request that actually reaches storage observes the
//! unreachable pool.

#![allow(dead_code)]

use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use leadgate_api::{create_router, AppState, Config};
use leadgate_core::storage::Storage;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

/// Builds a router whose pool points at a closed port on localhost.
///
/// `secret` becomes the configured `API_SECRET_KEY`; pass `""` for open
/// mode.
pub fn test_router(secret: &str) -> Router {
    let options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(9)
        .username("leadgate")
        .database("leadgate_test");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(options);

    let mut config = Config::default();
    config.api_secret_key = secret.to_string();

    create_router(AppState::new(Storage::new(pool), config))
}

/// Builds a POST request for the insert endpoint.
pub fn insert_request(body: &serde_json::Value, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/whatsapp/leads/insert")
        .header("content-type", "application/json");

    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }

    builder.body(Body::from(body.to_string())).expect("request should build")
}

/// Builds a bare GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).expect("request should build")
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// A lead body that passes every validation rule.
pub fn valid_lead_body() -> serde_json::Value {
    serde_json::json!({
        "NUMERO_TELEFONO": "+5491122334455",
        "PUSH_NAME": "Ana",
        "NOMBRE_USUARIO": "ana.perez",
        "TIPO_SALUDO": "hola"
    })
}
