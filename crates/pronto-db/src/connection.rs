//! SurrealDB connection setup.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Connection settings for the SurrealDB backend.
///
/// Every field has a local-development default; production deployments
/// override them via `PRONTO_DB_*` environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket endpoint, host:port without a scheme.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "pronto".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl DbConfig {
    /// Build the configuration from `PRONTO_DB_*` environment
    /// variables, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |key: &str, fallback: String| std::env::var(key).unwrap_or(fallback);
        Self {
            url: var("PRONTO_DB_URL", defaults.url),
            namespace: var("PRONTO_DB_NAMESPACE", defaults.namespace),
            database: var("PRONTO_DB_DATABASE", defaults.database),
            username: var("PRONTO_DB_USER", defaults.username),
            password: var("PRONTO_DB_PASS", defaults.password),
        }
    }
}

/// Owns the live SurrealDB client.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Open a WebSocket connection, sign in as root, and select the
    /// configured namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
        db.use_ns(&config.namespace).use_db(&config.database).await?;

        Ok(Self { db })
    }

    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
