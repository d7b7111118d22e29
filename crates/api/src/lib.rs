//! HTTP API server for the simple-order listing service.
//!
//! Exposes the same order listing four ways (`/api/v1`..`/api/v4`), plus
//! `{count, data}` wrapped variants under `/practice`, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use repository::OrderRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::simple_orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: OrderRepository + Clone + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/v1/simple-orders",
            get(routes::simple_orders::orders_v1::<R>),
        )
        .route(
            "/api/v2/simple-orders",
            get(routes::simple_orders::orders_v2::<R>),
        )
        .route(
            "/api/v3/simple-orders",
            get(routes::simple_orders::orders_v3::<R>),
        )
        .route(
            "/api/v4/simple-orders",
            get(routes::simple_orders::orders_v4::<R>),
        )
        .route(
            "/practice/api/v1/simple-orders",
            get(routes::practice::orders_v1::<R>),
        )
        .route(
            "/practice/api/v2/simple-orders",
            get(routes::practice::orders_v2::<R>),
        )
        .route(
            "/practice/api/v3/simple-orders",
            get(routes::practice::orders_v3::<R>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around a repository.
pub fn create_default_state<R: OrderRepository + Clone + 'static>(
    repository: R,
) -> Arc<AppState<R>> {
    Arc::new(AppState { repository })
}
