//! API server entry point.

use anyhow::{Context, Result};
use api::config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use repository::{CountingRepository, InMemoryOrderStore, OrderRepository, PostgresOrderStore};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Resolves once the process receives SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "SIGINT handler failed");
            }
            "SIGINT"
        }
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "shutting down");
}

/// Seeds the store if requested, builds the router and serves until shutdown.
async fn serve<R: OrderRepository + Clone + 'static>(
    repository: R,
    config: &Config,
    metrics_handle: PrometheusHandle,
) -> Result<()> {
    if config.seed_demo_data {
        api::seed::init_db(&repository)
            .await
            .context("failed to load demo data")?;
    }

    let state = api::create_default_state(CountingRepository::new(repository));
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    let Some(url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, using in-memory order store");
        return serve(InMemoryOrderStore::new(), &config, metrics_handle).await;
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(url)
        .await
        .context("failed to connect to database")?;
    let store = PostgresOrderStore::new(pool);
    store
        .run_migrations()
        .await
        .context("failed to run migrations")?;
    tracing::info!("using PostgreSQL order store");

    serve(store, &config, metrics_handle).await
}
