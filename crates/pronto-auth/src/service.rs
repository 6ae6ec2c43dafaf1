//! Identity service — registration, login, and token-to-user
//! resolution.

use pronto_core::error::{ProntoError, ProntoResult};
use pronto_core::models::user::{CreateUser, Role, User};
use pronto_core::repository::UserRepository;
use tracing::info;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`Role::Customer`] when omitted.
    pub role: Option<Role>,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Identity service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Register a new user with a hashed password.
    ///
    /// Duplicate username or email fails with `AlreadyExists` before
    /// any insert is attempted, so the caller sees a typed conflict
    /// rather than a raw index violation.
    pub async fn register(&self, input: RegisterInput) -> ProntoResult<User> {
        match self.user_repo.get_by_username(&input.username).await {
            Ok(_) => {
                return Err(ProntoError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(ProntoError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        match self.user_repo.get_by_email(&input.email).await {
            Ok(_) => {
                return Err(ProntoError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(ProntoError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let password_hash = password::hash_password(&input.password, self.config.pepper.as_deref())?;

        let user = self
            .user_repo
            .create(CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                role: input.role.unwrap_or(Role::Customer),
            })
            .await?;

        info!(username = %user.username, "registered user");
        Ok(user)
    }

    /// Authenticate with username + password and issue a bearer token.
    ///
    /// Unknown username and wrong password are indistinguishable to
    /// the caller.
    pub async fn login(&self, username: &str, pass: &str) -> ProntoResult<LoginOutput> {
        let user = match self.user_repo.get_by_username(username).await {
            Ok(u) => u,
            Err(ProntoError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if !password::verify_password(pass, &user.password_hash, self.config.pepper.as_deref()) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = token::issue_access_token(&user.username, &self.config)?;

        Ok(LoginOutput {
            access_token,
            token_type: "bearer",
            expires_in: self.config.access_token_lifetime_secs,
        })
    }

    /// Resolve a bearer token to its persisted user record.
    ///
    /// Invalid or expired tokens, and tokens whose subject no longer
    /// exists, all fail with `AuthenticationFailed`.
    pub async fn current_user(&self, bearer_token: &str) -> ProntoResult<User> {
        let claims = token::decode_access_token(bearer_token, &self.config)?;

        self.user_repo
            .get_by_username(&claims.sub)
            .await
            .map_err(|e| match e {
                ProntoError::NotFound { .. } => {
                    AuthError::TokenInvalid("subject no longer exists".into()).into()
                }
                other => other,
            })
    }
}
