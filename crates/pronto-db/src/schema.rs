//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as their wire strings
//! with ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['customer', 'delivery_partner', 'admin'];
DEFINE FIELD is_active ON TABLE user TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Pizza catalog
-- =======================================================================
DEFINE TABLE pizza SCHEMAFULL;
DEFINE FIELD name ON TABLE pizza TYPE string;
DEFINE FIELD description ON TABLE pizza TYPE string;
DEFINE FIELD price ON TABLE pizza TYPE float ASSERT $value >= 0;
DEFINE FIELD is_available ON TABLE pizza TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE pizza TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE pizza TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Cart items — one line per (user, pizza)
-- =======================================================================
DEFINE TABLE cart_item SCHEMAFULL;
DEFINE FIELD user_id ON TABLE cart_item TYPE string;
DEFINE FIELD pizza_id ON TABLE cart_item TYPE string;
DEFINE FIELD quantity ON TABLE cart_item TYPE int ASSERT $value >= 1;
DEFINE INDEX idx_cart_user_pizza ON TABLE cart_item \
    COLUMNS user_id, pizza_id UNIQUE;
DEFINE INDEX idx_cart_user ON TABLE cart_item COLUMNS user_id;

-- =======================================================================
-- Orders ('order' is a reserved word, hence pizza_order)
-- =======================================================================
DEFINE TABLE pizza_order SCHEMAFULL;
DEFINE FIELD user_id ON TABLE pizza_order TYPE string;
DEFINE FIELD total_amount ON TABLE pizza_order TYPE float \
    ASSERT $value >= 0;
DEFINE FIELD status ON TABLE pizza_order TYPE string \
    ASSERT $value IN ['placed', 'preparing', 'out_for_delivery', \
    'delivered', 'cancelled'];
DEFINE FIELD created_at ON TABLE pizza_order TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE pizza_order TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_order_user ON TABLE pizza_order COLUMNS user_id;

-- =======================================================================
-- Order items — immutable price snapshots
-- =======================================================================
DEFINE TABLE order_item SCHEMAFULL;
DEFINE FIELD order_id ON TABLE order_item TYPE string;
DEFINE FIELD pizza_id ON TABLE order_item TYPE string;
DEFINE FIELD quantity ON TABLE order_item TYPE int ASSERT $value >= 1;
DEFINE FIELD unit_price ON TABLE order_item TYPE float \
    ASSERT $value >= 0;
DEFINE INDEX idx_order_item_order ON TABLE order_item COLUMNS order_id;

-- =======================================================================
-- Delivery comments (append-only)
-- =======================================================================
DEFINE TABLE delivery_comment SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD order_id ON TABLE delivery_comment TYPE string;
DEFINE FIELD delivery_person_id ON TABLE delivery_comment TYPE string;
DEFINE FIELD comment ON TABLE delivery_comment TYPE string;
DEFINE FIELD created_at ON TABLE delivery_comment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_delivery_comment_order ON TABLE delivery_comment \
    COLUMNS order_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
