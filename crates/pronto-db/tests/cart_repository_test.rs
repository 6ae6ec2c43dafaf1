//! Cart repository tests against in-memory SurrealDB.

use pronto_core::error::ProntoError;
use pronto_core::repository::CartRepository;
use pronto_db::repository::SurrealCartRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealCartRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pronto_db::run_migrations(&db).await.unwrap();
    SurrealCartRepository::new(db)
}

#[tokio::test]
async fn add_creates_a_line() {
    let repo = setup().await;
    let user = Uuid::new_v4();
    let pizza = Uuid::new_v4();

    let item = repo.add_item(user, pizza, 2).await.unwrap();
    assert_eq!(item.user_id, user);
    assert_eq!(item.pizza_id, pizza);
    assert_eq!(item.quantity, 2);
}

#[tokio::test]
async fn repeated_add_merges_into_one_line() {
    let repo = setup().await;
    let user = Uuid::new_v4();
    let pizza = Uuid::new_v4();

    let first = repo.add_item(user, pizza, 1).await.unwrap();
    let second = repo.add_item(user, pizza, 1).await.unwrap();

    assert_eq!(second.id, first.id, "merge must reuse the existing line");
    assert_eq!(second.quantity, 2);

    let items = repo.list_for_user(user).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
}

#[tokio::test]
async fn different_pizzas_get_separate_lines() {
    let repo = setup().await;
    let user = Uuid::new_v4();

    repo.add_item(user, Uuid::new_v4(), 1).await.unwrap();
    repo.add_item(user, Uuid::new_v4(), 3).await.unwrap();

    let items = repo.list_for_user(user).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn carts_are_isolated_per_user() {
    let repo = setup().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let pizza = Uuid::new_v4();

    repo.add_item(alice, pizza, 2).await.unwrap();
    repo.add_item(bob, pizza, 5).await.unwrap();

    let alice_items = repo.list_for_user(alice).await.unwrap();
    assert_eq!(alice_items.len(), 1);
    assert_eq!(alice_items[0].quantity, 2);

    let bob_items = repo.list_for_user(bob).await.unwrap();
    assert_eq!(bob_items.len(), 1);
    assert_eq!(bob_items[0].quantity, 5);
}

#[tokio::test]
async fn set_quantity_is_absolute() {
    let repo = setup().await;
    let user = Uuid::new_v4();
    let item = repo.add_item(user, Uuid::new_v4(), 2).await.unwrap();

    let updated = repo.set_quantity(user, item.id, 7).await.unwrap();
    assert_eq!(updated.id, item.id);
    assert_eq!(updated.quantity, 7);
}

#[tokio::test]
async fn set_quantity_refuses_foreign_lines() {
    let repo = setup().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let item = repo.add_item(alice, Uuid::new_v4(), 2).await.unwrap();

    let err = repo.set_quantity(bob, item.id, 9).await.unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));

    // Alice's line is untouched.
    let items = repo.list_for_user(alice).await.unwrap();
    assert_eq!(items[0].quantity, 2);
}

#[tokio::test]
async fn remove_deletes_line_and_tolerates_absence() {
    let repo = setup().await;
    let user = Uuid::new_v4();
    let pizza = Uuid::new_v4();

    repo.add_item(user, pizza, 1).await.unwrap();
    repo.remove_item(user, pizza).await.unwrap();
    assert!(repo.list_for_user(user).await.unwrap().is_empty());

    // Removing an absent line is a no-op.
    repo.remove_item(user, pizza).await.unwrap();
}

#[tokio::test]
async fn clear_empties_only_that_users_cart() {
    let repo = setup().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.add_item(alice, Uuid::new_v4(), 1).await.unwrap();
    repo.add_item(alice, Uuid::new_v4(), 2).await.unwrap();
    repo.add_item(bob, Uuid::new_v4(), 3).await.unwrap();

    repo.clear(alice).await.unwrap();

    assert!(repo.list_for_user(alice).await.unwrap().is_empty());
    assert_eq!(repo.list_for_user(bob).await.unwrap().len(), 1);
}
