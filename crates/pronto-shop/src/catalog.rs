//! Catalog access — pizza listing for customers, CRUD for admins.

use pronto_auth::authorize::{require_active, require_role};
use pronto_core::error::{ProntoError, ProntoResult};
use pronto_core::models::pizza::{CreatePizza, Pizza, UpdatePizza};
use pronto_core::models::user::{Role, User};
use pronto_core::repository::{Pagination, PizzaRepository};
use tracing::info;

/// Catalog service.
pub struct CatalogService<P: PizzaRepository> {
    pizzas: P,
}

impl<P: PizzaRepository> CatalogService<P> {
    pub fn new(pizzas: P) -> Self {
        Self { pizzas }
    }

    /// List the catalog. Any active user may browse.
    pub async fn list(&self, actor: &User, pagination: Pagination) -> ProntoResult<Vec<Pizza>> {
        require_active(actor)?;
        self.pizzas.list(pagination).await
    }

    pub async fn get(&self, actor: &User, id: uuid::Uuid) -> ProntoResult<Pizza> {
        require_active(actor)?;
        self.pizzas.get_by_id(id).await
    }

    /// Add a pizza to the catalog. Admin only.
    pub async fn create(&self, actor: &User, input: CreatePizza) -> ProntoResult<Pizza> {
        require_role(require_active(actor)?, Role::Admin)?;
        validate_price(input.price)?;

        let pizza = self.pizzas.create(input).await?;
        info!(pizza = %pizza.name, "added pizza to catalog");
        Ok(pizza)
    }

    /// Partially update a pizza. Admin only; `NotFound` on unknown id.
    pub async fn update(
        &self,
        actor: &User,
        id: uuid::Uuid,
        input: UpdatePizza,
    ) -> ProntoResult<Pizza> {
        require_role(require_active(actor)?, Role::Admin)?;
        if let Some(price) = input.price {
            validate_price(price)?;
        }
        self.pizzas.update(id, input).await
    }

    /// Remove a pizza, returning the deleted row. Admin only.
    pub async fn delete(&self, actor: &User, id: uuid::Uuid) -> ProntoResult<Pizza> {
        require_role(require_active(actor)?, Role::Admin)?;

        let pizza = self.pizzas.delete(id).await?;
        info!(pizza = %pizza.name, "removed pizza from catalog");
        Ok(pizza)
    }
}

fn validate_price(price: f64) -> ProntoResult<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ProntoError::Validation {
            message: "price must be non-negative".into(),
        })
    }
}
