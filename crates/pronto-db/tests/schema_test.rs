//! Schema and migration tests using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn fresh_db() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    db
}

#[tokio::test]
async fn migrations_apply_on_fresh_db() {
    let db = fresh_db().await;
    pronto_db::run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = fresh_db().await;
    pronto_db::run_migrations(&db).await.unwrap();
    // Second run must be a no-op, not a failure.
    pronto_db::run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn schema_rejects_unknown_role() {
    let db = fresh_db().await;
    pronto_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE user SET username = 'x', email = 'x@example.com', \
             password_hash = 'h', role = 'superuser', is_active = true",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "role ASSERT should reject 'superuser'");
}

#[tokio::test]
async fn schema_rejects_negative_price() {
    let db = fresh_db().await;
    pronto_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE pizza SET name = 'Broken', description = '', \
             price = -1.0, is_available = true",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "price ASSERT should reject negatives");
}

#[tokio::test]
async fn schema_rejects_zero_quantity_cart_line() {
    let db = fresh_db().await;
    pronto_db::run_migrations(&db).await.unwrap();

    let result = db
        .query("CREATE cart_item SET user_id = 'u', pizza_id = 'p', quantity = 0")
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "quantity ASSERT should reject 0");
}
