//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access tier of a user. Checks are exact-match only — there is no
/// role hierarchy, so an admin does not satisfy a delivery-partner
/// requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    DeliveryPartner,
    Admin,
}

impl Role {
    /// Wire string, as stored in the database and sent over HTTP.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::DeliveryPartner => "delivery_partner",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    /// Argon2id PHC-format hash — hashing happens in the auth layer
    /// before the record reaches storage.
    pub password_hash: String,
    pub role: Role,
}
