//! Pizza catalog domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pizza {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Catalog price. Orders snapshot this into `OrderItem.unit_price`
    /// at creation time; cart totals always read the live value.
    pub price: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePizza {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePizza {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_available: Option<bool>,
}
