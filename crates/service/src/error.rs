//! Typed error type for the service crate.

use thiserror::Error;

/// Failures a CRUD operation can surface.
///
/// Not-found is *not* an error: lookup operations return `Option` so the
/// caller (typically an HTTP layer) maps absence to its own response.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend rejected a statement (constraint violation, lost
    /// connection, …).  Propagated unchanged; the service never retries.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// A filter referenced a column the entity does not declare.  Caught
    /// before any SQL is issued.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
}
