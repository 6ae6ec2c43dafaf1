//! Order repository tests against in-memory SurrealDB.

use pronto_core::error::ProntoError;
use pronto_core::models::order::{
    CreateDeliveryComment, NewOrder, NewOrderItem, OrderStatus,
};
use pronto_core::repository::{OrderRepository, Pagination};
use pronto_db::repository::SurrealOrderRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealOrderRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pronto_db::run_migrations(&db).await.unwrap();
    SurrealOrderRepository::new(db)
}

fn two_line_order(user_id: Uuid) -> NewOrder {
    NewOrder {
        user_id,
        total_amount: 31.5,
        items: vec![
            NewOrderItem {
                pizza_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: 9.5,
            },
            NewOrderItem {
                pizza_id: Uuid::new_v4(),
                quantity: 1,
                unit_price: 12.5,
            },
        ],
    }
}

#[tokio::test]
async fn create_with_items_persists_order_and_lines() {
    let repo = setup().await;
    let user = Uuid::new_v4();

    let order = repo.create_with_items(two_line_order(user)).await.unwrap();
    assert_eq!(order.user_id, user);
    assert_eq!(order.total_amount, 31.5);
    assert_eq!(order.status, OrderStatus::Placed);

    let items = repo.items(order.id).await.unwrap();
    assert_eq!(items.len(), 2);
    for item in &items {
        assert_eq!(item.order_id, order.id);
    }

    let quantities: u32 = items.iter().map(|i| i.quantity).sum();
    assert_eq!(quantities, 3);
}

#[tokio::test]
async fn get_by_id_round_trips() {
    let repo = setup().await;
    let order = repo
        .create_with_items(two_line_order(Uuid::new_v4()))
        .await
        .unwrap();

    let fetched = repo.get_by_id(order.id).await.unwrap();
    assert_eq!(fetched.id, order.id);
    assert_eq!(fetched.total_amount, order.total_amount);
    assert_eq!(fetched.status, OrderStatus::Placed);
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let repo = setup().await;

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));
}

#[tokio::test]
async fn list_for_user_is_scoped_and_ordered() {
    let repo = setup().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let first = repo.create_with_items(two_line_order(alice)).await.unwrap();
    let second = repo.create_with_items(two_line_order(alice)).await.unwrap();
    repo.create_with_items(two_line_order(bob)).await.unwrap();

    let orders = repo.list_for_user(alice, Pagination::default()).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, first.id);
    assert_eq!(orders[1].id, second.id);
}

#[tokio::test]
async fn update_status_persists() {
    let repo = setup().await;
    let order = repo
        .create_with_items(two_line_order(Uuid::new_v4()))
        .await
        .unwrap();

    let updated = repo
        .update_status(order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Preparing);

    let fetched = repo.get_by_id(order.id).await.unwrap();
    assert_eq!(fetched.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn update_status_of_unknown_order_is_not_found() {
    let repo = setup().await;

    let err = repo
        .update_status(Uuid::new_v4(), OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert!(matches!(err, ProntoError::NotFound { .. }));
}

#[tokio::test]
async fn add_comment_round_trips() {
    let repo = setup().await;
    let order = repo
        .create_with_items(two_line_order(Uuid::new_v4()))
        .await
        .unwrap();
    let partner = Uuid::new_v4();

    let comment = repo
        .add_comment(CreateDeliveryComment {
            order_id: order.id,
            delivery_person_id: partner,
            comment: "Gate code is 4711".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(comment.order_id, order.id);
    assert_eq!(comment.delivery_person_id, partner);
    assert_eq!(comment.comment, "Gate code is 4711");
}
