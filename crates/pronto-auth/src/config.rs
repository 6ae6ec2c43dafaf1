//! Authentication configuration.

/// Configuration for the authentication service.
///
/// Constructed once at startup and passed in explicitly — there is no
/// global settings object.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide HMAC secret for JWT signing (HS256).
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default: 1800 = 30 minutes).
    pub access_token_lifetime_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_lifetime_secs: 1800,
            pepper: None,
        }
    }
}
