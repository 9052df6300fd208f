//! Error types and result handling for storage operations.
//!
//! Distinguishes connection-level unavailability from query failures so the
//! API layer can log the detail while returning a generic response to the
//! client.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for storage operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The database could not be reached or a connection could not be
    /// established.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// A query failed after a connection was obtained.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_maps_to_unavailable() {
        let err = CoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, CoreError::Unavailable(_)));
    }

    #[test]
    fn row_not_found_maps_to_database_error() {
        let err = CoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, CoreError::Database(_)));
    }
}
