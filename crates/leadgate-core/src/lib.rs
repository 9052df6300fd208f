//! Core domain types and rules for lead ingestion.
//!
//! Provides the lead models, field normalization and validation, the
//! timestamp parsing contract, and the storage layer for the leads table.
//! The API crate depends on these foundations for type safety and
//! consistency.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod datetime;
pub mod error;
pub mod models;
pub mod storage;
pub mod validate;

pub use datetime::{parse_fecha_hora, TimestampParseError};
pub use error::{CoreError, Result};
pub use models::{LeadId, LeadSubmission, NewLead};
pub use validate::NormalizedLead;
