//! HTTP adapter layer for the task store.
//!
//! The server holds exactly one [`TaskStore`] chosen from configuration at
//! startup and translates requests into store calls and store outcomes into
//! status codes. Request logging and a per-request timeout are applied as
//! tower layers rather than inside handlers.

mod handlers;

use crate::config::{Config, ConfigError, StorageBackend};
use crate::task::{
    adapters::{InMemoryTaskStore, PostgresTaskStore, TaskCounters},
    ports::{TaskMetrics, TaskStore, TaskStoreError},
};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Upper bound on request handling, applied as a tower layer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration was incomplete at store construction time.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The selected backend could not be constructed.
    #[error("failed to construct task store: {0}")]
    Store(#[from] TaskStoreError),

    /// Socket binding or serving failed.
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The single task store selected at startup.
    pub store: Arc<dyn TaskStore>,
    /// Mutation counters shared with the store for `/metrics`.
    pub counters: Arc<TaskCounters>,
}

/// Constructs the backend named by the configuration.
///
/// # Errors
///
/// Returns [`ServerError::Config`] when the `postgres` backend is selected
/// without a database URL, or [`ServerError::Store`] when the connection
/// pool cannot be built.
pub fn build_store(
    config: &Config,
    counters: Arc<TaskCounters>,
) -> Result<Arc<dyn TaskStore>, ServerError> {
    let metrics: Arc<dyn TaskMetrics> = counters;
    let clock = Arc::new(DefaultClock);
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryTaskStore::new(metrics, clock))),
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::MissingEnvVar("CHORES_DATABASE_URL"))?;
            let store =
                PostgresTaskStore::connect(url, config.statement_timeout(), metrics, clock)?;
            Ok(Arc::new(store))
        }
    }
}

/// Builds the application router over the given state.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/task", post(handlers::create_task))
        .route("/tasks", get(handlers::list_tasks))
        .route(
            "/task/:id",
            get(handlers::get_task)
                .post(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// Runs the HTTP server until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError`] when the store cannot be constructed or the
/// listener fails.
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let counters = Arc::new(TaskCounters::new());
    let store = build_store(&config, Arc::clone(&counters))?;
    let state = Arc::new(AppState { store, counters });

    let listen_addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("server is running on {listen_addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shutdown successfully");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received interrupt signal");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal");
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }
}
