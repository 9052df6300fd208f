//! Lead insert handler: validation, timestamp parsing, and persistence.
//!
//! The flow is auth (middleware) → validate → parse date → persist →
//! respond. Validation failures carry the full violation list; storage
//! failures are reported generically and logged server-side only.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leadgate_core::{parse_fecha_hora, validate, LeadId, LeadSubmission, NewLead};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::server::AppState;

/// Response from a successful insert.
#[derive(Debug, Serialize)]
pub struct InsertResponse {
    /// Always true on this shape.
    pub ok: bool,
    /// Storage-generated identifier of the created lead.
    #[serde(rename = "insertId")]
    pub insert_id: LeadId,
}

/// Response carrying field violations.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// Always false on this shape.
    pub ok: bool,
    /// Fixed discriminator: `"validation"`.
    pub error: &'static str,
    /// One human-readable message per violated rule, in field order.
    pub details: Vec<String>,
}

/// Inserts a validated lead and returns the generated identifier.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: field violations or an unparseable `FECHA_HORA`
/// - 500: storage failure (generic message; detail only in server logs)
#[instrument(name = "insert_lead", skip(state, submission))]
pub async fn insert_lead(
    State(state): State<AppState>,
    Json(submission): Json<LeadSubmission>,
) -> Response {
    let normalized = match validate::normalize(&submission) {
        Ok(normalized) => normalized,
        Err(violations) => {
            warn!(violations = violations.len(), "lead submission failed validation");
            return validation_failure(violations);
        },
    };

    let fecha_hora = match parse_fecha_hora(normalized.fecha_hora.as_deref()) {
        Ok(timestamp) => timestamp,
        Err(e) => {
            warn!(error = %e, "lead submission carried an unparseable timestamp");
            return validation_failure(vec![e.to_string()]);
        },
    };

    let lead = NewLead {
        numero_telefono: normalized.numero_telefono,
        fecha_hora,
        push_name: normalized.push_name,
        nombre_usuario: normalized.nombre_usuario,
        tipo_saludo: normalized.tipo_saludo,
    };

    match state.storage.leads.insert(&lead).await {
        Ok(id) => {
            info!(lead_id = %id, "lead inserted");
            (StatusCode::OK, Json(InsertResponse { ok: true, insert_id: id })).into_response()
        },
        Err(e) => {
            // Raw storage errors stay in the logs; clients get a generic
            // message.
            error!(error = %e, "failed to persist lead");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "ok": false, "error": "internal error" })),
            )
                .into_response()
        },
    }
}

fn validation_failure(details: Vec<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ValidationResponse { ok: false, error: "validation", details }))
        .into_response()
}
