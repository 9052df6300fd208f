//! Repository for lead insert operations.
//!
//! Leads are append-only: the single operation is a parameterized insert
//! returning the generated identifier. No read, update, or delete path
//! exists through this API.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    error::Result,
    models::{LeadId, NewLead},
};

/// Repository for the leads table.
pub struct Repository {
    pool: Arc<PgPool>,
}

impl Repository {
    /// Creates a new repository instance.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<PgPool> {
        self.pool.clone()
    }

    /// Inserts a validated lead and returns the generated identifier.
    ///
    /// A single parameterized statement; no retries are performed, failures
    /// surface directly to the caller of this request.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the connection cannot be established or the
    /// insert fails.
    pub async fn insert(&self, lead: &NewLead) -> Result<LeadId> {
        let id: LeadId = sqlx::query_scalar(
            r"
            INSERT INTO leads (
                numero_telefono, fecha_hora, push_name, nombre_usuario, tipo_saludo
            ) VALUES (
                $1, $2, $3, $4, $5
            )
            RETURNING id
            ",
        )
        .bind(&lead.numero_telefono)
        .bind(lead.fecha_hora)
        .bind(&lead.push_name)
        .bind(&lead.nombre_usuario)
        .bind(&lead.tipo_saludo)
        .fetch_one(&*self.pool)
        .await?;

        Ok(id)
    }
}
