//! Listing endpoints wrapped in a `{count, data}` envelope.
//!
//! Each version loads orders the same way as its `/api` counterpart.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::Order;
use repository::OrderRepository;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::simple_orders::{
    AppState, SimpleOrderDto, load_dtos_fetch_join, load_dtos_per_row, load_initialized_orders,
};

/// Envelope carrying a list and its length.
#[derive(Debug, Serialize)]
pub struct CountResult<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for CountResult<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// GET /practice/api/v1/simple-orders
#[tracing::instrument(skip(state))]
pub async fn orders_v1<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<CountResult<Order>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "practice_v1").increment(1);
    let orders = load_initialized_orders(&state.repository).await?;
    Ok(Json(orders.into()))
}

/// GET /practice/api/v2/simple-orders
#[tracing::instrument(skip(state))]
pub async fn orders_v2<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<CountResult<SimpleOrderDto>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "practice_v2").increment(1);
    let dtos = load_dtos_per_row(&state.repository).await?;
    Ok(Json(dtos.into()))
}

/// GET /practice/api/v3/simple-orders
#[tracing::instrument(skip(state))]
pub async fn orders_v3<R: OrderRepository + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<CountResult<SimpleOrderDto>>, ApiError> {
    metrics::counter!("simple_orders_requests_total", "version" => "practice_v3").increment(1);
    let dtos = load_dtos_fetch_join(&state.repository).await?;
    Ok(Json(dtos.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_data_length() {
        let result = CountResult::from(vec!["a", "b", "c"]);
        assert_eq!(result.count, 3);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"count": 3, "data": ["a", "b", "c"]}));
    }

    #[test]
    fn empty_list() {
        let result: CountResult<u8> = Vec::new().into();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"count": 0, "data": []}));
    }
}
