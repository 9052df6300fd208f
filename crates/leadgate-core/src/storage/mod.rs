//! Database access layer for lead persistence.
//!
//! All database operations go through the repository here; direct SQL
//! outside this module is forbidden to keep the schema surface in one place.

use std::sync::Arc;

use sqlx::PgPool;

pub mod leads;

use crate::error::Result;

/// Container for repository instances providing unified database access.
///
/// Constructed once at startup around the shared connection pool and passed
/// to request handlers through application state.
#[derive(Clone)]
pub struct Storage {
    /// Repository for lead insert operations.
    pub leads: Arc<leads::Repository>,
}

impl Storage {
    /// Creates a new storage instance with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        let pool = Arc::new(pool);

        Self { leads: Arc::new(leads::Repository::new(pool)) }
    }

    /// Performs a health check on the database connection.
    ///
    /// Executes a trivial query to verify connectivity. Used by the
    /// `/db-health` diagnostic endpoint.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the connection cannot be established or the
    /// query fails.
    pub async fn health_check(&self) -> Result<()> {
        let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&*self.leads.pool()).await?;

        Ok(())
    }
}

/// Ensures the leads table exists.
///
/// Best-effort schema setup run at startup. There is no migration framework;
/// the single table is created in place if missing.
///
/// # Errors
///
/// Returns `CoreError` if the DDL statement fails, typically because the
/// database is unreachable. Callers treat this as non-fatal.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS leads (
            id BIGSERIAL PRIMARY KEY,
            numero_telefono VARCHAR(26) NOT NULL,
            fecha_hora TIMESTAMP NOT NULL,
            push_name VARCHAR(510) NOT NULL,
            nombre_usuario VARCHAR(255) NOT NULL,
            tipo_saludo VARCHAR(100)
        )
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn storage_can_be_created() {
        // Instantiation only; queries are covered by integration tests.
        let pool = sqlx::PgPool::connect_lazy("postgresql://test").unwrap();
        let _storage = Storage::new(pool);
    }
}
