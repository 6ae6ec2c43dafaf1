//! Order domain model and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether `next` is a legal successor of `self`.
    ///
    /// Enforced graph:
    /// `placed → preparing → out_for_delivery → delivered`, and
    /// `placed | preparing → cancelled`. Delivered and cancelled are
    /// terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Placed, Preparing)
                | (Preparing, OutForDelivery)
                | (OutForDelivery, Delivered)
                | (Placed, Cancelled)
                | (Preparing, Cancelled)
        )
    }

    /// Wire string, as stored in the database and sent over HTTP.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Computed once at creation from unit-price snapshots; never
    /// recomputed against live catalog prices.
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One immutable order line. `unit_price` snapshots the pizza price at
/// order time and survives later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub pizza_id: Uuid,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Input for the atomic order + items insert. The composer resolves
/// prices and totals before this reaches storage.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub total_amount: f64,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub pizza_id: Uuid,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Free-text note a delivery partner attaches to an order.
/// Append-only — no editing or deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryComment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub delivery_person_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateDeliveryComment {
    pub order_id: Uuid,
    pub delivery_person_id: Uuid,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn forward_path_is_legal() {
        assert!(Placed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
    }

    #[test]
    fn cancellation_only_before_dispatch() {
        assert!(Placed.can_transition_to(Cancelled));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(!OutForDelivery.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for next in [Placed, Preparing, OutForDelivery, Delivered, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn no_skipping_or_rewinding() {
        assert!(!Placed.can_transition_to(OutForDelivery));
        assert!(!Placed.can_transition_to(Delivered));
        assert!(!Preparing.can_transition_to(Placed));
        assert!(!OutForDelivery.can_transition_to(Preparing));
        assert!(!Placed.can_transition_to(Placed));
    }
}
