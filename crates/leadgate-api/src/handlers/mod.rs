//! HTTP request handlers for the leadgate API.
//!
//! Handlers are grouped by functionality:
//! - `leads` - lead insert endpoint
//! - `health` - liveness and database health probes
//! - `diagnostics` - usage hint and environment presence report
//!
//! All handlers convert failures into the service's JSON error shapes at
//! this boundary; nothing here panics or crashes the process.

pub mod diagnostics;
pub mod health;
pub mod leads;

pub use diagnostics::{env_check, usage};
pub use health::{db_health, liveness};
pub use leads::insert_lead;
