//! Database-specific error types and conversions.

use pronto_core::error::ProntoError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Row mapping failed: {0}")]
    Mapping(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for ProntoError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ProntoError::NotFound { entity, id },
            other => ProntoError::Database(other.to_string()),
        }
    }
}
