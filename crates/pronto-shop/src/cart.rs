//! Cart aggregation — one line per (user, pizza), merged additions,
//! live totals.

use pronto_auth::authorize::require_active;
use pronto_core::error::{ProntoError, ProntoResult};
use pronto_core::models::cart::{Cart, CartItem};
use pronto_core::models::user::User;
use pronto_core::repository::{CartRepository, PizzaRepository};
use uuid::Uuid;

/// Cart service.
pub struct CartService<C: CartRepository, P: PizzaRepository> {
    carts: C,
    pizzas: P,
}

impl<C: CartRepository, P: PizzaRepository> CartService<C, P> {
    pub fn new(carts: C, pizzas: P) -> Self {
        Self { carts, pizzas }
    }

    /// Add `quantity` of a pizza to the actor's cart.
    ///
    /// Merges into the existing `(user, pizza)` line when present —
    /// repeated adds accumulate quantity in a single row. Fails with
    /// `NotFound` when the pizza does not exist.
    pub async fn add(&self, actor: &User, pizza_id: Uuid, quantity: u32) -> ProntoResult<CartItem> {
        require_active(actor)?;
        validate_quantity(quantity)?;

        // Resolve the pizza first so an unknown id surfaces as a
        // catalog NotFound, not a dangling cart line.
        self.pizzas.get_by_id(pizza_id).await?;

        self.carts.add_item(actor.id, pizza_id, quantity).await
    }

    /// Set a cart line's quantity absolutely (no accumulation).
    ///
    /// Fails with `NotFound` when the item does not exist or belongs
    /// to another user.
    pub async fn update_quantity(
        &self,
        actor: &User,
        item_id: Uuid,
        quantity: u32,
    ) -> ProntoResult<CartItem> {
        require_active(actor)?;
        validate_quantity(quantity)?;

        self.carts.set_quantity(actor.id, item_id, quantity).await
    }

    /// Remove a pizza's line from the cart; removing an absent line
    /// succeeds silently.
    pub async fn remove(&self, actor: &User, pizza_id: Uuid) -> ProntoResult<()> {
        require_active(actor)?;
        self.carts.remove_item(actor.id, pizza_id).await
    }

    /// Empty the actor's cart.
    pub async fn clear(&self, actor: &User) -> ProntoResult<()> {
        require_active(actor)?;
        self.carts.clear(actor.id).await
    }

    /// View the cart with its total computed from current catalog
    /// prices. An empty cart is a valid steady state and yields
    /// `Cart { items: [], total: 0.0 }`.
    pub async fn view(&self, actor: &User) -> ProntoResult<Cart> {
        require_active(actor)?;

        let items = self.carts.list_for_user(actor.id).await?;
        if items.is_empty() {
            return Ok(Cart::empty());
        }

        let mut total = 0.0;
        for item in &items {
            let pizza = self.pizzas.get_by_id(item.pizza_id).await?;
            total += f64::from(item.quantity) * pizza.price;
        }

        Ok(Cart { items, total })
    }
}

fn validate_quantity(quantity: u32) -> ProntoResult<()> {
    if quantity >= 1 {
        Ok(())
    } else {
        Err(ProntoError::Validation {
            message: "quantity must be at least 1".into(),
        })
    }
}
