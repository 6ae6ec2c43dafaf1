//! Shopping cart domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One cart line. Invariant: at most one `CartItem` exists per
/// `(user_id, pizza_id)` pair — repeat additions merge by incrementing
/// `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pizza_id: Uuid,
    pub quantity: u32,
}

/// A user's cart with its live total. `total` is recomputed from
/// current catalog prices on every view — unlike an order total, it is
/// never frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: f64,
}

impl Cart {
    /// An empty cart is a valid steady state, not an error.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0.0,
        }
    }
}
