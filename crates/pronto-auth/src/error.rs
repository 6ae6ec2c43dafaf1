//! Authentication error types.

use pronto_core::error::ProntoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for ProntoError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Crypto(msg) => ProntoError::Crypto(msg),
            other => ProntoError::AuthenticationFailed {
                reason: other.to_string(),
            },
        }
    }
}
