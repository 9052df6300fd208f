//! Shared-secret authentication for the insert endpoint.
//!
//! Compares the `x-api-key` request header against the configured secret.
//! When no secret is configured the service runs in open mode and the check
//! is skipped entirely.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::server::AppState;

/// Extracts the trimmed API key from the `x-api-key` header.
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()).map(|s| s.trim().to_string())
}

/// Errors that can occur during shared-secret authentication.
#[derive(Debug)]
pub enum AuthError {
    /// The request key is missing or does not match the configured secret.
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "ok": false, "error": "unauthorized" })),
            )
                .into_response(),
        }
    }
}

/// Axum middleware enforcing the shared secret on protected routes.
///
/// The comparison is case-sensitive on trimmed values. Rejected requests
/// never reach the handler, so no database work happens for them.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let expected = state.config.api_secret_key.trim();
    if expected.is_empty() {
        // Open mode: no secret configured for this deployment.
        return Ok(next.run(req).await);
    }

    match extract_api_key(req.headers()) {
        Some(provided) if provided == expected => Ok(next.run(req).await),
        Some(_) => {
            warn!("rejected insert request with mismatched api key");
            Err(AuthError::Unauthorized)
        },
        None => {
            warn!("rejected insert request with missing api key");
            Err(AuthError::Unauthorized)
        },
    }
}
