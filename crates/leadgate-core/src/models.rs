//! Domain models and the strongly-typed lead identifier.
//!
//! Defines the raw wire-level lead submission, the validated insert model,
//! and a newtype ID wrapper with database serialization traits.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

type PgDb = sqlx::Postgres;
type PgValueRef<'r> = sqlx::postgres::PgValueRef<'r>;
type PgTypeInfo = sqlx::postgres::PgTypeInfo;
type PgArgumentBuffer = sqlx::postgres::PgArgumentBuffer;
type EncodeResult =
    Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync + 'static>>;
type BoxDynError = sqlx::error::BoxDynError;

/// Strongly-typed lead identifier.
///
/// Wraps the storage-generated `BIGSERIAL` value. Leads are append-only, so
/// this ID is assigned exactly once, by the database, at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub i64);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LeadId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl sqlx::Type<PgDb> for LeadId {
    fn type_info() -> PgTypeInfo {
        <i64 as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for LeadId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let id = <i64 as sqlx::Decode<PgDb>>::decode(value)?;
        Ok(Self(id))
    }
}

impl sqlx::Encode<'_, PgDb> for LeadId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <i64 as sqlx::Encode<PgDb>>::encode_by_ref(&self.0, buf)
    }
}

/// Raw lead payload as received on the wire.
///
/// Inbound clients are not trusted to send well-typed fields, so every field
/// is captured as an arbitrary JSON value and pushed through the coercion
/// step in [`crate::validate`] before anything touches the database. Missing
/// fields default to JSON null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadSubmission {
    /// Contact phone number.
    #[serde(default, rename = "NUMERO_TELEFONO")]
    pub numero_telefono: serde_json::Value,

    /// Event timestamp; absent means "now".
    #[serde(default, rename = "FECHA_HORA")]
    pub fecha_hora: serde_json::Value,

    /// Display name pushed by the messaging client.
    #[serde(default, rename = "PUSH_NAME")]
    pub push_name: serde_json::Value,

    /// Username of the contact.
    #[serde(default, rename = "NOMBRE_USUARIO")]
    pub nombre_usuario: serde_json::Value,

    /// Greeting type, optional.
    #[serde(default, rename = "TIPO_SALUDO")]
    pub tipo_saludo: serde_json::Value,
}

/// A fully validated lead, ready for insertion.
///
/// Invariant: the three required text fields are non-empty and every text
/// field is within its column width. `tipo_saludo` is `None` when the client
/// omitted it or sent an empty value, and is stored as SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    /// Contact phone number, at most 26 chars.
    pub numero_telefono: String,
    /// Event timestamp with full date+time precision.
    pub fecha_hora: NaiveDateTime,
    /// Display name, at most 510 chars.
    pub push_name: String,
    /// Username, at most 255 chars.
    pub nombre_usuario: String,
    /// Optional greeting type, at most 100 chars.
    pub tipo_saludo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_deserializes_wire_field_names() {
        let submission: LeadSubmission = serde_json::from_str(
            r#"{
                "NUMERO_TELEFONO": "+5491122334455",
                "PUSH_NAME": "Ana",
                "NOMBRE_USUARIO": "ana.perez",
                "TIPO_SALUDO": "hola"
            }"#,
        )
        .unwrap();

        assert_eq!(submission.numero_telefono, serde_json::json!("+5491122334455"));
        assert_eq!(submission.fecha_hora, serde_json::Value::Null);
        assert_eq!(submission.tipo_saludo, serde_json::json!("hola"));
    }

    #[test]
    fn submission_accepts_loosely_typed_fields() {
        let submission: LeadSubmission =
            serde_json::from_str(r#"{"NUMERO_TELEFONO": 5491122334455, "PUSH_NAME": null}"#)
                .unwrap();

        assert!(submission.numero_telefono.is_number());
        assert!(submission.push_name.is_null());
    }

    #[test]
    fn lead_id_display_matches_inner_value() {
        assert_eq!(LeadId::from(42).to_string(), "42");
    }
}
