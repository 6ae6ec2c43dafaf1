//! SurrealDB implementation of [`PizzaRepository`].

use chrono::{DateTime, Utc};
use pronto_core::error::ProntoResult;
use pronto_core::models::pizza::{CreatePizza, Pizza, UpdatePizza};
use pronto_core::repository::{Pagination, PizzaRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PizzaRow {
    name: String,
    description: String,
    price: f64,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct PizzaRowWithId {
    record_id: String,
    name: String,
    description: String,
    price: f64,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PizzaRow {
    fn into_pizza(self, id: Uuid) -> Pizza {
        Pizza {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PizzaRowWithId {
    fn try_into_pizza(self) -> Result<Pizza, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Mapping(format!("invalid UUID: {e}")))?;
        Ok(Pizza {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Pizza repository.
#[derive(Clone)]
pub struct SurrealPizzaRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPizzaRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PizzaRepository for SurrealPizzaRepository<C> {
    async fn create(&self, input: CreatePizza) -> ProntoResult<Pizza> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('pizza', $id) SET \
                 name = $name, description = $description, \
                 price = $price, is_available = $is_available",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("price", input.price))
            .bind(("is_available", input.is_available))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::Surreal)?;

        let rows: Vec<PizzaRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "pizza".into(),
            id: id_str,
        })?;

        Ok(row.into_pizza(id))
    }

    async fn get_by_id(&self, id: Uuid) -> ProntoResult<Pizza> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('pizza', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PizzaRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "pizza".into(),
            id: id_str,
        })?;

        Ok(row.into_pizza(id))
    }

    async fn update(&self, id: Uuid, input: UpdatePizza) -> ProntoResult<Pizza> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.is_available.is_some() {
            sets.push("is_available = $is_available");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('pizza', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price));
        }
        if let Some(is_available) = input.is_available {
            builder = builder.bind(("is_available", is_available));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::Surreal)?;

        let rows: Vec<PizzaRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "pizza".into(),
            id: id_str,
        })?;

        Ok(row.into_pizza(id))
    }

    async fn delete(&self, id: Uuid) -> ProntoResult<Pizza> {
        // Read first so the caller gets the deleted row back (and a
        // NotFound when the id never existed).
        let pizza = self.get_by_id(id).await?;

        self.db
            .query("DELETE type::record('pizza', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::Surreal)?;

        Ok(pizza)
    }

    async fn list(&self, pagination: Pagination) -> ProntoResult<Vec<Pizza>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM pizza \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PizzaRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_pizza())
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}
