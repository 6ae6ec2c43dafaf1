//! Order composition — immutable line-item orders with server-computed
//! totals, plus role-gated status transitions and delivery comments.

use pronto_auth::authorize::{require_active, require_any_role, require_role};
use pronto_core::error::{ProntoError, ProntoResult};
use pronto_core::models::order::{
    CreateDeliveryComment, DeliveryComment, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus,
};
use pronto_core::models::user::{Role, User};
use pronto_core::repository::{OrderRepository, Pagination, PizzaRepository};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// One requested order line, as it arrives from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub pizza_id: Uuid,
    pub quantity: u32,
}

/// Order service.
pub struct OrderService<O: OrderRepository, P: PizzaRepository> {
    orders: O,
    pizzas: P,
}

impl<O: OrderRepository, P: PizzaRepository> OrderService<O, P> {
    pub fn new(orders: O, pizzas: P) -> Self {
        Self { orders, pizzas }
    }

    /// Compose and persist an order from the requested lines.
    ///
    /// Every pizza is resolved before anything is written — one
    /// unknown id aborts the whole operation with `NotFound` naming
    /// it, and no order or item rows are persisted. `unit_price` is
    /// snapshotted from the catalog at this moment and the total is
    /// computed server-side; neither changes when catalog prices do.
    pub async fn create(&self, actor: &User, lines: &[OrderLine]) -> ProntoResult<Order> {
        require_active(actor)?;

        if lines.is_empty() {
            return Err(ProntoError::Validation {
                message: "order must contain at least one item".into(),
            });
        }

        let mut items = Vec::with_capacity(lines.len());
        let mut total_amount = 0.0;
        for line in lines {
            if line.quantity < 1 {
                return Err(ProntoError::Validation {
                    message: "quantity must be at least 1".into(),
                });
            }

            let pizza = self.pizzas.get_by_id(line.pizza_id).await?;
            total_amount += pizza.price * f64::from(line.quantity);
            items.push(NewOrderItem {
                pizza_id: line.pizza_id,
                quantity: line.quantity,
                unit_price: pizza.price,
            });
        }

        let order = self
            .orders
            .create_with_items(NewOrder {
                user_id: actor.id,
                total_amount,
                items,
            })
            .await?;

        info!(
            order_id = %order.id,
            total = order.total_amount,
            "order placed"
        );
        Ok(order)
    }

    /// A user's own orders, oldest first.
    pub async fn list_for_user(
        &self,
        actor: &User,
        pagination: Pagination,
    ) -> ProntoResult<Vec<Order>> {
        require_active(actor)?;
        self.orders.list_for_user(actor.id, pagination).await
    }

    /// Fetch one of the actor's own orders. A foreign order id fails
    /// with `NotFound` — its existence is not revealed.
    pub async fn get_for_user(&self, actor: &User, order_id: Uuid) -> ProntoResult<Order> {
        require_active(actor)?;

        let order = self.orders.get_by_id(order_id).await?;
        if order.user_id != actor.id {
            return Err(ProntoError::NotFound {
                entity: "pizza_order".into(),
                id: order_id.to_string(),
            });
        }
        Ok(order)
    }

    /// The line items of an order.
    pub async fn items(&self, order_id: Uuid) -> ProntoResult<Vec<OrderItem>> {
        self.orders.items(order_id).await
    }

    /// Move an order to `new_status`.
    ///
    /// Admins and delivery partners may update status; cancellation is
    /// admin-only. Transitions outside the enforced graph
    /// (`placed → preparing → out_for_delivery → delivered`,
    /// `placed|preparing → cancelled`) fail with `Conflict`.
    pub async fn update_status(
        &self,
        actor: &User,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> ProntoResult<Order> {
        require_any_role(
            require_active(actor)?,
            &[Role::Admin, Role::DeliveryPartner],
        )?;
        if new_status == OrderStatus::Cancelled {
            require_role(actor, Role::Admin)?;
        }

        let order = self.orders.get_by_id(order_id).await?;
        if !order.status.can_transition_to(new_status) {
            return Err(ProntoError::Conflict {
                message: format!(
                    "illegal status transition: {} -> {}",
                    order.status.as_str(),
                    new_status.as_str()
                ),
            });
        }

        let updated = self.orders.update_status(order_id, new_status).await?;
        info!(
            order_id = %updated.id,
            status = updated.status.as_str(),
            "order status updated"
        );
        Ok(updated)
    }

    /// Attach a free-text delivery comment to an order. Delivery
    /// partners only; comments are append-only.
    pub async fn add_comment(
        &self,
        actor: &User,
        order_id: Uuid,
        comment: &str,
    ) -> ProntoResult<DeliveryComment> {
        require_role(require_active(actor)?, Role::DeliveryPartner)?;

        let text = comment.trim();
        if text.is_empty() {
            return Err(ProntoError::Validation {
                message: "comment must not be empty".into(),
            });
        }

        // Confirm the order exists before attaching anything to it.
        self.orders.get_by_id(order_id).await?;

        self.orders
            .add_comment(CreateDeliveryComment {
                order_id,
                delivery_person_id: actor.id,
                comment: text.to_string(),
            })
            .await
    }
}
