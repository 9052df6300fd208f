//! Health check handlers for service monitoring.
//!
//! Liveness confirms the process is serving requests without touching any
//! dependency; database health performs a trivial round-trip query.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, instrument};

use crate::server::{AppState, SERVICE_NAME};

/// Liveness endpoint.
///
/// Static confirmation that the process is up; called frequently by
/// orchestration systems, so it deliberately has no dependencies.
#[instrument(name = "liveness")]
pub async fn liveness() -> Response {
    debug!("performing liveness check");

    (StatusCode::OK, Json(serde_json::json!({ "ok": true, "service": SERVICE_NAME })))
        .into_response()
}

/// Database health endpoint.
///
/// Round-trips a trivial query through the shared pool. A failure is
/// reported in the response body; the process keeps serving.
#[instrument(name = "db_health", skip(state))]
pub async fn db_health(State(state): State<AppState>) -> Response {
    match state.storage.health_check().await {
        Ok(()) => {
            debug!("database health check passed");
            (StatusCode::OK, Json(serde_json::json!({ "ok": true, "db": true }))).into_response()
        },
        Err(e) => {
            error!(error = %e, "database health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "ok": false, "error": e.to_string() })),
            )
                .into_response()
        },
    }
}
