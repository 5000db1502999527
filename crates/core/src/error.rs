use crate::types::DbId;

/// Domain error taxonomy shared by the db and api crates.
///
/// Every service failure mode maps to exactly one variant so the HTTP
/// layer can translate it into a stable machine-readable code. All
/// validation variants are raised before any write; store failures
/// during a commit surface as [`CoreError::Internal`] after the
/// enclosing transaction has rolled back.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing input, detected before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A list-filter value that cannot be coerced to its expected type.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A malformed id in a path-style parameter.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A foreign-key target that does not exist.
    #[error("Reference error: {0}")]
    Reference(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Idempotency guard: enable called on an already-active user.
    #[error("User {id} is already active")]
    AlreadyActive { id: DbId },

    /// Idempotency guard: disable called on an already-inactive user.
    #[error("User {id} is already inactive")]
    AlreadyInactive { id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
