//! Order listing endpoints, one per loading strategy.
//!
//! All four versions return the same orders. They differ in how many
//! queries they cost and in what they expose:
//!
//! | Version | Loading | Queries for N orders | Body |
//! |---|---|---|---|
//! | v1 | plain query, then each reference loaded | 1 + 2N | entities |
//! | v2 | plain query, references loaded while mapping | 1 + 2N | `SimpleOrderDto` |
//! | v3 | fetch join | 1 | `SimpleOrderDto` |
//! | v4 | projection | 1 | `OrderSimpleQueryDto` |
//!
//! The 1 + 2N figures assume distinct members and deliveries; a session
//! fetches each entity once, so shared ones cost less.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::NaiveDateTime;
use common::OrderId;
use domain::{Address, DomainError, Order, OrderStatus};
use repository::{OrderRepository, OrderRepositoryExt, OrderSearch, OrderSimpleQueryDto};
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: OrderRepository> {
    pub repository: R,
}

// -- Response types --

/// Flat listing row built from a loaded order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleOrderDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
}

impl TryFrom<&Order> for SimpleOrderDto {
    type Error = DomainError;

    /// Copies the listing fields out of `order`.
    ///
    /// Fails if the member or delivery reference has not been loaded.
    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: order.id(),
            name: order.member()?.name().to_string(),
            order_date: order.order_date(),
            order_status: order.status(),
            address: order.delivery()?.address().clone(),
        })
    }
}

// -- Loading strategies --

/// Loads every order, then loads each order's member and delivery.
pub(crate) async fn load_initialized_orders<R: OrderRepository>(
    repository: &R,
) -> Result<Vec<Order>, ApiError> {
    let mut orders = repository.find_all(&OrderSearch::new()).await?;
    let mut session = repository.session();
    session.initialize_all(&mut orders).await?;
    Ok(orders)
}

/// Loads every order and maps it row by row, loading references on the way.
pub(crate) async fn load_dtos_per_row<R: OrderRepository>(
    repository: &R,
) -> Result<Vec<SimpleOrderDto>, ApiError> {
    let orders = repository.find_all(&OrderSearch::new()).await?;
    let mut session = repository.session();

    let mut dtos = Vec::with_capacity(orders.len());
    for mut order in orders {
        session.initialize(&mut order).await?;
        dtos.push(SimpleOrderDto::try_from(&order)?);
    }
    Ok(dtos)
}

/// Loads every order with its member and delivery in one query and maps it.
pub(crate) async fn load_dtos_fetch_join<R: OrderRepository>(
    repository: &R,
) -> Result<Vec<SimpleOrderDto>, ApiError> {
    let orders = repository.find_all_with_member_delivery().await?;
    let dtos = orders
        .iter()
        .map(SimpleOrderDto::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(dtos)
}

// -- Handlers --

/// GET /api/v1/simple-orders — order entities with member and delivery force-loaded.
#[tracing::instrument(skip(state))]
pub async fn orders_v1<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "v1").increment(1);
    let orders = load_initialized_orders(&state.repository).await?;
    Ok(Json(orders))
}

/// GET /api/v2/simple-orders — DTOs mapped row by row (N+1 queries).
#[tracing::instrument(skip(state))]
pub async fn orders_v2<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<SimpleOrderDto>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "v2").increment(1);
    let dtos = load_dtos_per_row(&state.repository).await?;
    Ok(Json(dtos))
}

/// GET /api/v3/simple-orders — DTOs mapped from a single fetch-join query.
#[tracing::instrument(skip(state))]
pub async fn orders_v3<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<SimpleOrderDto>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "v3").increment(1);
    let dtos = load_dtos_fetch_join(&state.repository).await?;
    Ok(Json(dtos))
}

/// GET /api/v4/simple-orders — rows selected directly by a projection query.
#[tracing::instrument(skip(state))]
pub async fn orders_v4<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<OrderSimpleQueryDto>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "v4").increment(1);
    let rows = state.repository.find_order_dtos().await?;
    Ok(Json(rows))
}
