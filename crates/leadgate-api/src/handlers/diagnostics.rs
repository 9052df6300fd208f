//! Diagnostic endpoints: usage hint and environment presence report.

use axum::Json;
use tracing::instrument;

use crate::config;

/// Plain-text usage hint served at the root path.
pub async fn usage() -> &'static str {
    "leadgate lead ingestion service\n\
     POST /whatsapp/leads/insert with a JSON lead body (x-api-key header when configured)\n\
     GET /health, /db-health, /env-check for diagnostics\n"
}

/// Environment presence report.
///
/// Reports, per required configuration key, whether it is set and how long
/// its value is. Values themselves are never included; only the
/// server-address key carries a truncated sample.
#[instrument(name = "env_check")]
pub async fn env_check() -> Json<std::collections::BTreeMap<&'static str, config::EnvKeyStatus>> {
    Json(config::env_report())
}
