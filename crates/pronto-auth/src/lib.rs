//! PRONTO Auth — password hashing, bearer token issuance/validation,
//! and identity resolution with explicit role checks.

pub mod authorize;
pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use authorize::{require_active, require_any_role, require_role};
pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginOutput, RegisterInput};
pub use token::AccessTokenClaims;
