//! Explicit role-authorization checks.
//!
//! Each protected operation invokes these directly instead of hiding
//! the gate behind middleware or decorators. Checks are stateless and
//! per-request; the "session" is entirely the token's validity window.

use pronto_core::error::{ProntoError, ProntoResult};
use pronto_core::models::user::{Role, User};

/// Fail with `AuthorizationDenied` unless the account is active.
pub fn require_active(user: &User) -> ProntoResult<&User> {
    if user.is_active {
        Ok(user)
    } else {
        Err(ProntoError::AuthorizationDenied {
            reason: "inactive user".into(),
        })
    }
}

/// Fail unless the user holds exactly `role`.
///
/// No hierarchy: an admin does not pass a delivery-partner check.
pub fn require_role(user: &User, role: Role) -> ProntoResult<&User> {
    if user.role == role {
        Ok(user)
    } else {
        Err(ProntoError::AuthorizationDenied {
            reason: "not enough permissions".into(),
        })
    }
}

/// Accept any of the listed roles. Used where admin and delivery
/// partner share an operation (order status updates).
pub fn require_any_role<'a>(user: &'a User, roles: &[Role]) -> ProntoResult<&'a User> {
    if roles.contains(&user.role) {
        Ok(user)
    } else {
        Err(ProntoError::AuthorizationDenied {
            reason: "not enough permissions".into(),
        })
    }
}
