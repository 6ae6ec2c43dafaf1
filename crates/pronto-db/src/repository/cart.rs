//! SurrealDB implementation of [`CartRepository`].
//!
//! The `(user_id, pizza_id)` uniqueness invariant is enforced by the
//! `idx_cart_user_pizza` index; a first-insert race between two
//! concurrent adds collapses onto it. Quantity increments run as a
//! single `+=` statement inside the engine so merges never lose
//! updates.

use pronto_core::error::ProntoResult;
use pronto_core::models::cart::CartItem;
use pronto_core::repository::CartRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CartItemRow {
    user_id: String,
    pizza_id: String,
    quantity: u32,
}

#[derive(Debug, SurrealValue)]
struct CartItemRowWithId {
    record_id: String,
    user_id: String,
    pizza_id: String,
    quantity: u32,
}

fn row_to_item(row: CartItemRow, id: Uuid) -> Result<CartItem, DbError> {
    let user_id = Uuid::parse_str(&row.user_id)
        .map_err(|e| DbError::Mapping(format!("invalid user UUID: {e}")))?;
    let pizza_id = Uuid::parse_str(&row.pizza_id)
        .map_err(|e| DbError::Mapping(format!("invalid pizza UUID: {e}")))?;
    Ok(CartItem {
        id,
        user_id,
        pizza_id,
        quantity: row.quantity,
    })
}

impl CartItemRowWithId {
    fn try_into_item(self) -> Result<CartItem, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Mapping(format!("invalid UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Mapping(format!("invalid user UUID: {e}")))?;
        let pizza_id = Uuid::parse_str(&self.pizza_id)
            .map_err(|e| DbError::Mapping(format!("invalid pizza UUID: {e}")))?;
        Ok(CartItem {
            id,
            user_id,
            pizza_id,
            quantity: self.quantity,
        })
    }
}

/// SurrealDB implementation of the Cart repository.
#[derive(Clone)]
pub struct SurrealCartRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCartRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_line(
        &self,
        user_id: Uuid,
        pizza_id: Uuid,
    ) -> Result<Option<CartItemRowWithId>, DbError> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM cart_item \
                 WHERE user_id = $user_id AND pizza_id = $pizza_id",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("pizza_id", pizza_id.to_string()))
            .await?;

        let rows: Vec<CartItemRowWithId> = result.take(0)?;
        Ok(rows.into_iter().next())
    }
}

impl<C: Connection> CartRepository for SurrealCartRepository<C> {
    async fn add_item(
        &self,
        user_id: Uuid,
        pizza_id: Uuid,
        quantity: u32,
    ) -> ProntoResult<CartItem> {
        // Merge path: increment the existing line in-engine.
        if let Some(existing) = self.find_line(user_id, pizza_id).await? {
            let mut result = self
                .db
                .query(
                    "UPDATE type::record('cart_item', $id) SET \
                     quantity += $quantity",
                )
                .bind(("id", existing.record_id.clone()))
                .bind(("quantity", quantity))
                .await
                .map_err(DbError::from)?;

            let rows: Vec<CartItemRow> = result.take(0).map_err(DbError::from)?;
            let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
                entity: "cart_item".into(),
                id: existing.record_id.clone(),
            })?;

            let id = Uuid::parse_str(&existing.record_id)
                .map_err(|e| DbError::Mapping(format!("invalid UUID: {e}")))?;
            return Ok(row_to_item(row, id)?);
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('cart_item', $id) SET \
                 user_id = $user_id, pizza_id = $pizza_id, \
                 quantity = $quantity",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .bind(("pizza_id", pizza_id.to_string()))
            .bind(("quantity", quantity))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::Surreal)?;

        let rows: Vec<CartItemRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cart_item".into(),
            id: id_str,
        })?;

        Ok(row_to_item(row, id)?)
    }

    async fn set_quantity(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> ProntoResult<CartItem> {
        let id_str = item_id.to_string();

        // Ownership lives in the WHERE clause: a row belonging to
        // another user matches nothing and is never mutated.
        let mut result = self
            .db
            .query(
                "UPDATE type::record('cart_item', $id) SET \
                 quantity = $quantity \
                 WHERE user_id = $user_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .bind(("quantity", quantity))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CartItemRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cart_item".into(),
            id: id_str,
        })?;

        Ok(row_to_item(row, item_id)?)
    }

    async fn remove_item(&self, user_id: Uuid, pizza_id: Uuid) -> ProntoResult<()> {
        // Deleting an absent line is a no-op, not an error.
        self.db
            .query(
                "DELETE cart_item \
                 WHERE user_id = $user_id AND pizza_id = $pizza_id",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("pizza_id", pizza_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::Surreal)?;

        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> ProntoResult<()> {
        self.db
            .query("DELETE cart_item WHERE user_id = $user_id")
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::Surreal)?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> ProntoResult<Vec<CartItem>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM cart_item \
                 WHERE user_id = $user_id",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CartItemRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_item())
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}
