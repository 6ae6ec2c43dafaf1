//! SurrealDB implementation of [`OrderRepository`].
//!
//! Order creation writes the order row and every order item inside
//! one `BEGIN/COMMIT TRANSACTION` block — a failing item insert rolls
//! back the whole order.

use chrono::{DateTime, Utc};
use pronto_core::error::ProntoResult;
use pronto_core::models::order::{
    CreateDeliveryComment, DeliveryComment, NewOrder, Order, OrderItem, OrderStatus,
};
use pronto_core::repository::{OrderRepository, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct OrderRow {
    user_id: String,
    total_amount: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct OrderRowWithId {
    record_id: String,
    user_id: String,
    total_amount: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct OrderItemRowWithId {
    record_id: String,
    order_id: String,
    pizza_id: String,
    quantity: u32,
    unit_price: f64,
}

#[derive(Debug, SurrealValue)]
struct CommentRow {
    order_id: String,
    delivery_person_id: String,
    comment: String,
    created_at: DateTime<Utc>,
}

/// Bound as an array parameter for the transactional item inserts.
#[derive(Debug, SurrealValue)]
struct OrderItemParam {
    pizza_id: String,
    quantity: u32,
    unit_price: f64,
}

fn parse_status(s: &str) -> Result<OrderStatus, DbError> {
    match s {
        "placed" => Ok(OrderStatus::Placed),
        "preparing" => Ok(OrderStatus::Preparing),
        "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
        "delivered" => Ok(OrderStatus::Delivered),
        "cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(DbError::Mapping(format!("unknown order status: {other}"))),
    }
}

impl OrderRow {
    fn into_order(self, id: Uuid) -> Result<Order, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Mapping(format!("invalid user UUID: {e}")))?;
        Ok(Order {
            id,
            user_id,
            total_amount: self.total_amount,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrderRowWithId {
    fn try_into_order(self) -> Result<Order, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Mapping(format!("invalid UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Mapping(format!("invalid user UUID: {e}")))?;
        Ok(Order {
            id,
            user_id,
            total_amount: self.total_amount,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrderItemRowWithId {
    fn try_into_item(self) -> Result<OrderItem, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Mapping(format!("invalid UUID: {e}")))?;
        let order_id = Uuid::parse_str(&self.order_id)
            .map_err(|e| DbError::Mapping(format!("invalid order UUID: {e}")))?;
        let pizza_id = Uuid::parse_str(&self.pizza_id)
            .map_err(|e| DbError::Mapping(format!("invalid pizza UUID: {e}")))?;
        Ok(OrderItem {
            id,
            order_id,
            pizza_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
        })
    }
}

impl CommentRow {
    fn into_comment(self, id: Uuid) -> Result<DeliveryComment, DbError> {
        let order_id = Uuid::parse_str(&self.order_id)
            .map_err(|e| DbError::Mapping(format!("invalid order UUID: {e}")))?;
        let delivery_person_id = Uuid::parse_str(&self.delivery_person_id)
            .map_err(|e| DbError::Mapping(format!("invalid user UUID: {e}")))?;
        Ok(DeliveryComment {
            id,
            order_id,
            delivery_person_id,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Order repository.
#[derive(Clone)]
pub struct SurrealOrderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrderRepository for SurrealOrderRepository<C> {
    async fn create_with_items(&self, input: NewOrder) -> ProntoResult<Order> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let items: Vec<OrderItemParam> = input
            .items
            .into_iter()
            .map(|item| OrderItemParam {
                pizza_id: item.pizza_id.to_string(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        // All-or-nothing: the order row and every item row commit
        // together or not at all.
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::record('pizza_order', $order_id) SET \
                 user_id = $user_id, \
                 total_amount = $total_amount, \
                 status = 'placed'; \
                 FOR $item IN $items { \
                 CREATE type::record('order_item', \
                 type::string(rand::uuid::v4())) SET \
                 order_id = $order_id, \
                 pizza_id = $item.pizza_id, \
                 quantity = $item.quantity, \
                 unit_price = $item.unit_price; \
                 }; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order_id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("total_amount", input.total_amount))
            .bind(("items", items))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::Surreal)?;

        // Index 0 is the BEGIN statement; the CREATE result is at 1.
        let rows: Vec<OrderRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "pizza_order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ProntoResult<Order> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('pizza_order', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "pizza_order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> ProntoResult<Vec<Order>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM pizza_order \
                 WHERE user_id = $user_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_order())
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> ProntoResult<Order> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('pizza_order', $id) SET \
                 status = $status, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("status", status.as_str()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "pizza_order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn items(&self, order_id: Uuid) -> ProntoResult<Vec<OrderItem>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM order_item \
                 WHERE order_id = $order_id",
            )
            .bind(("order_id", order_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderItemRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_item())
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn add_comment(&self, input: CreateDeliveryComment) -> ProntoResult<DeliveryComment> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('delivery_comment', $id) SET \
                 order_id = $order_id, \
                 delivery_person_id = $delivery_person_id, \
                 comment = $comment",
            )
            .bind(("id", id_str.clone()))
            .bind(("order_id", input.order_id.to_string()))
            .bind(("delivery_person_id", input.delivery_person_id.to_string()))
            .bind(("comment", input.comment))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::Surreal)?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "delivery_comment".into(),
            id: id_str,
        })?;

        Ok(row.into_comment(id)?)
    }
}
