//! Field normalization and validation for inbound leads.
//!
//! Coerces loosely-typed JSON fields to trimmed strings and checks them
//! against the column-width constraints of the leads table. All violations
//! are accumulated so a client sees every problem in one response.

use serde_json::Value;

use crate::models::LeadSubmission;

/// Maximum length of `NUMERO_TELEFONO` in chars.
pub const MAX_NUMERO_TELEFONO: usize = 26;
/// Maximum length of `PUSH_NAME` in chars.
pub const MAX_PUSH_NAME: usize = 510;
/// Maximum length of `NOMBRE_USUARIO` in chars.
pub const MAX_NOMBRE_USUARIO: usize = 255;
/// Maximum length of `TIPO_SALUDO` in chars.
pub const MAX_TIPO_SALUDO: usize = 100;

/// Lead fields after coercion and validation, before timestamp parsing.
///
/// `fecha_hora` stays a raw string here; parsing it is a separate step with
/// its own failure mode (see [`crate::datetime`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLead {
    /// Trimmed, non-empty phone number.
    pub numero_telefono: String,
    /// Raw timestamp text; `None` when absent or empty.
    pub fecha_hora: Option<String>,
    /// Trimmed, non-empty push name.
    pub push_name: String,
    /// Trimmed, non-empty username.
    pub nombre_usuario: String,
    /// Trimmed greeting type; `None` when absent or empty.
    pub tipo_saludo: Option<String>,
}

/// Coerces an arbitrary JSON value to a trimmed string.
///
/// Null (and therefore absent fields, which default to null) becomes the
/// empty string; strings are trimmed; any other value is rendered as JSON
/// and trimmed.
fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn check_required(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        violations.push(format!("{field} is required"));
    }
}

fn check_length(violations: &mut Vec<String>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        violations.push(format!("{field} must be at most {max} characters"));
    }
}

/// Normalizes and validates a raw lead submission.
///
/// Returns the normalized fields, or the full ordered list of violations.
/// The required and length checks are independent: an over-long field
/// produces a length violation even if another field is missing.
///
/// # Errors
///
/// Returns `Err` with one human-readable message per violated rule, each
/// naming the offending field.
pub fn normalize(submission: &LeadSubmission) -> Result<NormalizedLead, Vec<String>> {
    let numero_telefono = coerce(&submission.numero_telefono);
    let fecha_hora = coerce(&submission.fecha_hora);
    let push_name = coerce(&submission.push_name);
    let nombre_usuario = coerce(&submission.nombre_usuario);
    let tipo_saludo = coerce(&submission.tipo_saludo);

    let mut violations = Vec::new();

    check_required(&mut violations, "NUMERO_TELEFONO", &numero_telefono);
    check_length(&mut violations, "NUMERO_TELEFONO", &numero_telefono, MAX_NUMERO_TELEFONO);

    check_required(&mut violations, "PUSH_NAME", &push_name);
    check_length(&mut violations, "PUSH_NAME", &push_name, MAX_PUSH_NAME);

    check_required(&mut violations, "NOMBRE_USUARIO", &nombre_usuario);
    check_length(&mut violations, "NOMBRE_USUARIO", &nombre_usuario, MAX_NOMBRE_USUARIO);

    check_length(&mut violations, "TIPO_SALUDO", &tipo_saludo, MAX_TIPO_SALUDO);

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(NormalizedLead {
        numero_telefono,
        fecha_hora: if fecha_hora.is_empty() { None } else { Some(fecha_hora) },
        push_name,
        nombre_usuario,
        tipo_saludo: if tipo_saludo.is_empty() { None } else { Some(tipo_saludo) },
    })
}
