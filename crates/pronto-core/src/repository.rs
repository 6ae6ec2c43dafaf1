//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations are expected
//! to provide the storage-level guarantees the services rely on:
//! unique `(user_id, pizza_id)` cart lines, an in-engine increment for
//! cart merges, and an atomic multi-row insert for orders.

use uuid::Uuid;

use crate::error::ProntoResult;
use crate::models::{
    cart::CartItem,
    order::{CreateDeliveryComment, DeliveryComment, NewOrder, Order, OrderItem, OrderStatus},
    pizza::{CreatePizza, Pizza, UpdatePizza},
    user::{CreateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

pub trait UserRepository: Send + Sync {
    /// Insert a new user. The `password_hash` field must already be
    /// hashed — raw passwords never reach storage.
    fn create(&self, input: CreateUser) -> impl Future<Output = ProntoResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ProntoResult<User>> + Send;
    fn get_by_username(&self, username: &str) -> impl Future<Output = ProntoResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = ProntoResult<User>> + Send;
}

pub trait PizzaRepository: Send + Sync {
    fn create(&self, input: CreatePizza) -> impl Future<Output = ProntoResult<Pizza>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ProntoResult<Pizza>> + Send;
    /// Partial update — `None` fields are left untouched.
    fn update(
        &self,
        id: Uuid,
        input: UpdatePizza,
    ) -> impl Future<Output = ProntoResult<Pizza>> + Send;
    /// Hard delete. Returns the deleted row, or `NotFound`.
    fn delete(&self, id: Uuid) -> impl Future<Output = ProntoResult<Pizza>> + Send;
    fn list(&self, pagination: Pagination) -> impl Future<Output = ProntoResult<Vec<Pizza>>> + Send;
}

pub trait CartRepository: Send + Sync {
    /// Increment the `(user_id, pizza_id)` line by `quantity`, creating
    /// it if absent. The increment runs inside the storage engine so
    /// concurrent adds do not lose updates.
    fn add_item(
        &self,
        user_id: Uuid,
        pizza_id: Uuid,
        quantity: u32,
    ) -> impl Future<Output = ProntoResult<CartItem>> + Send;
    /// Set a line's quantity absolutely. Fails with `NotFound` when the
    /// item does not exist or belongs to another user; a foreign row is
    /// never touched.
    fn set_quantity(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> impl Future<Output = ProntoResult<CartItem>> + Send;
    /// Delete the matching line if present; succeeds silently if absent.
    fn remove_item(
        &self,
        user_id: Uuid,
        pizza_id: Uuid,
    ) -> impl Future<Output = ProntoResult<()>> + Send;
    /// Drop every line for the user.
    fn clear(&self, user_id: Uuid) -> impl Future<Output = ProntoResult<()>> + Send;
    fn list_for_user(&self, user_id: Uuid)
    -> impl Future<Output = ProntoResult<Vec<CartItem>>> + Send;
}

pub trait OrderRepository: Send + Sync {
    /// Persist an order together with its items as one atomic unit —
    /// either all rows commit or none do.
    fn create_with_items(&self, input: NewOrder)
    -> impl Future<Output = ProntoResult<Order>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ProntoResult<Order>> + Send;
    /// A user's orders in creation order (ascending).
    fn list_for_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = ProntoResult<Vec<Order>>> + Send;
    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> impl Future<Output = ProntoResult<Order>> + Send;
    fn items(&self, order_id: Uuid) -> impl Future<Output = ProntoResult<Vec<OrderItem>>> + Send;
    fn add_comment(
        &self,
        input: CreateDeliveryComment,
    ) -> impl Future<Output = ProntoResult<DeliveryComment>> + Send;
}
