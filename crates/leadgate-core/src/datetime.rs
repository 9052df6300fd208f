//! Timestamp parsing for the `FECHA_HORA` field.
//!
//! Clients send either `YYYY-MM-DD HH:MM:SS` or the combined
//! `YYYY-MM-DDTHH:MM:SS` form; an absent value means "now". The stored value
//! keeps full date+time precision and carries no timezone.

use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

/// A `FECHA_HORA` value that could not be parsed.
///
/// The message names both accepted shapes so the caller can correct input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid FECHA_HORA {input:?}: expected 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DDTHH:MM:SS'")]
pub struct TimestampParseError {
    /// The rejected input text.
    pub input: String,
}

/// Parses an optional `FECHA_HORA` string into a timestamp.
///
/// Absent input yields the current UTC time. Present input is normalized by
/// replacing the first space separator with `T`, then parsed as a combined
/// date-time; fractional seconds are tolerated.
///
/// # Errors
///
/// Returns [`TimestampParseError`] when the text does not form a valid
/// date-time after normalization.
pub fn parse_fecha_hora(input: Option<&str>) -> Result<NaiveDateTime, TimestampParseError> {
    let Some(raw) = input else {
        return Ok(Utc::now().naive_utc());
    };

    raw.replacen(' ', "T", 1)
        .parse::<NaiveDateTime>()
        .map_err(|_| TimestampParseError { input: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn space_and_t_separators_parse_to_same_instant() {
        let spaced = parse_fecha_hora(Some("2025-09-12 15:30:00")).unwrap();
        let combined = parse_fecha_hora(Some("2025-09-12T15:30:00")).unwrap();

        assert_eq!(spaced, combined);
        assert_eq!(
            spaced,
            NaiveDate::from_ymd_opt(2025, 9, 12).unwrap().and_hms_opt(15, 30, 0).unwrap()
        );
    }

    #[test]
    fn fractional_seconds_are_tolerated() {
        let parsed = parse_fecha_hora(Some("2025-09-12 15:30:00.250")).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2025, 9, 12).unwrap());
    }

    #[test]
    fn garbage_input_fails_naming_both_shapes() {
        let err = parse_fecha_hora(Some("not-a-date")).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("not-a-date"));
        assert!(message.contains("YYYY-MM-DD HH:MM:SS"));
        assert!(message.contains("YYYY-MM-DDTHH:MM:SS"));
    }

    #[test]
    fn date_without_time_is_rejected() {
        assert!(parse_fecha_hora(Some("2025-09-12")).is_err());
    }

    #[test]
    fn absent_input_yields_current_time() {
        let before = Utc::now().naive_utc();
        let parsed = parse_fecha_hora(None).unwrap();
        let after = Utc::now().naive_utc();

        assert!(parsed >= before && parsed <= after);
    }
}
