//! Pizza repository tests against in-memory SurrealDB.

use pronto_core::error::ProntoError;
use pronto_core::models::pizza::{CreatePizza, UpdatePizza};
use pronto_core::repository::{Pagination, PizzaRepository};
use pronto_db::repository::SurrealPizzaRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealPizzaRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pronto_db::run_migrations(&db).await.unwrap();
    SurrealPizzaRepository::new(db)
}

fn margherita() -> CreatePizza {
    CreatePizza {
        name: "Margherita".to_string(),
        description: "Tomato, mozzarella, basil".to_string(),
        price: 9.5,
        is_available: true,
    }
}

#[tokio::test]
async fn create_and_get() {
    let repo = setup().await;

    let created = repo.create(margherita()).await.unwrap();
    assert_eq!(created.name, "Margherita");
    assert_eq!(created.price, 9.5);
    assert!(created.is_available);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.description, "Tomato, mozzarella, basil");
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let repo = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));
}

#[tokio::test]
async fn partial_update_touches_only_given_fields() {
    let repo = setup().await;
    let created = repo.create(margherita()).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdatePizza {
                price: Some(11.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 11.0);
    assert_eq!(updated.name, "Margherita");
    assert_eq!(updated.description, "Tomato, mozzarella, basil");
    assert!(updated.is_available);
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let repo = setup().await;

    let err = repo
        .update(
            Uuid::new_v4(),
            UpdatePizza {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));
}

#[tokio::test]
async fn delete_returns_row_then_not_found() {
    let repo = setup().await;
    let created = repo.create(margherita()).await.unwrap();

    let deleted = repo.delete(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);
    assert_eq!(deleted.name, "Margherita");

    let err = repo.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));

    let err = repo.delete(created.id).await.unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));
}

#[tokio::test]
async fn list_paginates_in_creation_order() {
    let repo = setup().await;

    for i in 0..5 {
        repo.create(CreatePizza {
            name: format!("Pizza {i}"),
            description: String::new(),
            price: 8.0 + f64::from(i),
            is_available: true,
        })
        .await
        .unwrap();
    }

    let all = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].name, "Pizza 0");
    assert_eq!(all[4].name, "Pizza 4");

    let page = repo
        .list(Pagination {
            offset: 2,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Pizza 2");
    assert_eq!(page[1].name, "Pizza 3");
}
