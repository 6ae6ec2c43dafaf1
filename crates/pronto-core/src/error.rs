//! Error types for the PRONTO system.

use thiserror::Error;

/// Workspace-wide error taxonomy.
///
/// The HTTP layer maps these onto status codes: authentication → 401,
/// authorization → 403, not-found → 404, already-exists/conflict →
/// 409, validation → 422, everything else → 500.
#[derive(Debug, Error)]
pub enum ProntoError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProntoResult<T> = Result<T, ProntoError>;
