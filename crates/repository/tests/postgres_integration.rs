//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p repository --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use domain::{Address, DeliveryStatus, OrderStatus};
use repository::{
    CountingRepository, NewDelivery, NewMember, NewOrder, OrderRepository, OrderRepositoryExt,
    OrderSearch, PostgresOrderStore, RepositoryError,
};
use serial_test::serial;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresOrderStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool, cleared tables and a restarted sequence
async fn get_test_store() -> PostgresOrderStore {
    let info = get_container_info().await;

    // Create a fresh pool for each test to avoid connection issues
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::raw_sql("TRUNCATE TABLE orders, delivery, member; ALTER SEQUENCE entity_seq RESTART WITH 1")
        .execute(&pool)
        .await
        .unwrap();

    PostgresOrderStore::new(pool)
}

fn date(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap()
}

async fn place_order<R: OrderRepository>(
    repo: &R,
    name: &str,
    city: &str,
    status: OrderStatus,
) -> repository::Result<()> {
    let member_id = repo
        .save_member(NewMember::new(name, Address::new(city, "street", "10000")))
        .await?;
    let delivery_id = repo
        .save_delivery(NewDelivery::ready(Address::new(city, "dock", "20000")))
        .await?;
    let mut order = NewOrder::placed(member_id, delivery_id, date(3));
    order.status = status;
    repo.save_order(order).await?;
    Ok(())
}

#[tokio::test]
#[serial]
async fn save_and_find_member_with_orders() {
    let store = get_test_store().await;
    place_order(&store, "userA", "Seoul", OrderStatus::Order)
        .await
        .unwrap();

    let member = store
        .find_member(common::MemberId::new(1))
        .await
        .unwrap();
    assert_eq!(member.name(), "userA");
    assert_eq!(member.address().city(), "Seoul");
    assert_eq!(member.orders(), &[common::OrderId::new(3)]);

    let delivery = store
        .find_delivery(common::DeliveryId::new(2))
        .await
        .unwrap();
    assert_eq!(delivery.status(), DeliveryStatus::Ready);
    assert_eq!(delivery.address().street(), "dock");
}

#[tokio::test]
#[serial]
async fn find_missing_member_is_not_found() {
    let store = get_test_store().await;
    let err = store
        .find_member(common::MemberId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { entity: "Member", .. }));
}

#[tokio::test]
#[serial]
async fn find_all_filters_and_leaves_references_unloaded() {
    let store = get_test_store().await;
    place_order(&store, "userA", "Seoul", OrderStatus::Order)
        .await
        .unwrap();
    place_order(&store, "userB", "Jinju", OrderStatus::Cancel)
        .await
        .unwrap();

    let all = store.find_all(&OrderSearch::new()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|o| !o.member_ref().is_loaded()));

    let cancelled = store
        .find_all(&OrderSearch::new().with_status(OrderStatus::Cancel))
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].status(), OrderStatus::Cancel);

    let by_name = store
        .find_all(&OrderSearch::new().with_member_name("erA"))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].member_ref().id(), common::MemberId::new(1));
}

#[tokio::test]
#[serial]
async fn lazy_loading_costs_two_queries_per_order() {
    let store = get_test_store().await;
    place_order(&store, "userA", "Seoul", OrderStatus::Order)
        .await
        .unwrap();
    place_order(&store, "userB", "Jinju", OrderStatus::Order)
        .await
        .unwrap();

    let repo = CountingRepository::new(store);
    let mut orders = repo.find_all(&OrderSearch::new()).await.unwrap();
    let mut session = repo.session();
    session.initialize_all(&mut orders).await.unwrap();

    assert_eq!(repo.query_count(), 5);
    assert_eq!(orders[1].member().unwrap().name(), "userB");
}

#[tokio::test]
#[serial]
async fn fetch_join_and_projection_agree() {
    let store = get_test_store().await;
    place_order(&store, "userA", "Seoul", OrderStatus::Order)
        .await
        .unwrap();
    place_order(&store, "userB", "Jinju", OrderStatus::Cancel)
        .await
        .unwrap();

    let repo = CountingRepository::new(store);
    let joined = repo.find_all_with_member_delivery().await.unwrap();
    assert_eq!(repo.query_count(), 1);

    let rows = repo.find_order_dtos().await.unwrap();
    assert_eq!(repo.query_count(), 2);

    assert_eq!(joined.len(), rows.len());
    for (order, row) in joined.iter().zip(&rows) {
        assert_eq!(order.id(), row.order_id);
        assert_eq!(order.member().unwrap().name(), row.name);
        assert_eq!(order.order_date(), row.order_date);
        assert_eq!(order.status(), row.order_status);
        assert_eq!(order.delivery().unwrap().address(), &row.address);
    }
}

#[tokio::test]
#[serial]
async fn delivery_cannot_be_shared() {
    let store = get_test_store().await;
    let member_id = store
        .save_member(NewMember::new("userA", Address::new("Seoul", "s", "1")))
        .await
        .unwrap();
    let delivery_id = store
        .save_delivery(NewDelivery::ready(Address::new("Seoul", "s", "1")))
        .await
        .unwrap();

    store
        .save_order(NewOrder::placed(member_id, delivery_id, date(1)))
        .await
        .unwrap();
    let err = store
        .save_order(NewOrder::placed(member_id, delivery_id, date(2)))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DeliveryAlreadyAssigned(_)));

    let free_delivery = store
        .save_delivery(NewDelivery::ready(Address::new("Seoul", "s", "1")))
        .await
        .unwrap();
    let err = store
        .save_order(NewOrder::placed(
            common::MemberId::new(999),
            free_delivery,
            date(2),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { entity: "Member", .. }));
}
