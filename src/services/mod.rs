//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on input validation and envelope translation.
//! Each service is exposed as an object-safe trait with a Postgres-backed
//! implementation; routes only ever see the trait objects held in `AppState`.

pub mod audit_log;
pub mod session;
pub mod smart_skip;
pub mod validation;

/// Failure raised by any service operation.
///
/// Every variant renders to a non-empty descriptive message; route handlers
/// forward that message verbatim inside the error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("location not found: {0}")]
    LocationNotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Failed(String),
}
