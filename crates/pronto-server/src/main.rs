//! PRONTO Server — application entry point.
//!
//! Builds configuration from the environment, connects storage, runs
//! migrations, and wires the business services. The HTTP routing
//! layer mounts on top of [`AppState`].

use pronto_auth::{AuthConfig, AuthService};
use pronto_db::repository::{
    SurrealCartRepository, SurrealOrderRepository, SurrealPizzaRepository, SurrealUserRepository,
};
use pronto_db::{DbConfig, DbManager};
use pronto_shop::{CartService, CatalogService, OrderService};
use surrealdb::engine::remote::ws::Client;
use tracing_subscriber::EnvFilter;

/// Fully wired services, ready for an HTTP layer to consume.
#[allow(dead_code)] // consumed by the HTTP layer, not by main itself
struct AppState {
    auth: AuthService<SurrealUserRepository<Client>>,
    catalog: CatalogService<SurrealPizzaRepository<Client>>,
    cart: CartService<SurrealCartRepository<Client>, SurrealPizzaRepository<Client>>,
    orders: OrderService<SurrealOrderRepository<Client>, SurrealPizzaRepository<Client>>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pronto=info".parse().unwrap()))
        .json()
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "startup failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting PRONTO server...");

    let db_config = DbConfig::from_env();

    let auth_config = AuthConfig {
        jwt_secret: std::env::var("PRONTO_JWT_SECRET")
            .map_err(|_| "PRONTO_JWT_SECRET must be set")?,
        access_token_lifetime_secs: env_or("PRONTO_TOKEN_TTL_SECS", "1800").parse()?,
        pepper: std::env::var("PRONTO_PASSWORD_PEPPER").ok(),
    };

    let manager = DbManager::connect(&db_config).await?;
    let db = manager.client().clone();
    pronto_db::run_migrations(&db).await?;

    let _state = AppState {
        auth: AuthService::new(SurrealUserRepository::new(db.clone()), auth_config),
        catalog: CatalogService::new(SurrealPizzaRepository::new(db.clone())),
        cart: CartService::new(
            SurrealCartRepository::new(db.clone()),
            SurrealPizzaRepository::new(db.clone()),
        ),
        orders: OrderService::new(
            SurrealOrderRepository::new(db.clone()),
            SurrealPizzaRepository::new(db),
        ),
    };

    tracing::info!("Storage migrated and services wired.");

    // TODO: mount the REST API routes on AppState and serve.

    Ok(())
}
