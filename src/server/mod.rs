//! HTTP surface of the export function
//!
//! Routes:
//!
//! | Route | Methods | Behaviour |
//! |-------|---------|-----------|
//! | `/export`, `/` | `GET`, `POST` | Manual export with `Authorization: Bearer`, sweep without |
//! | `/export`, `/` | `OPTIONS` | Empty 200 |
//! | `/health` | `GET` | Liveness |
//!
//! Every response carries permissive CORS headers.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::config::schema::ServerConfig;
use crate::core::orchestrator::Orchestrator;
use axum::{
    http::StatusCode,
    routing::{get, MethodRouter},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

fn export_route() -> MethodRouter<AppState> {
    get(handlers::export)
        .post(handlers::export)
        .options(handlers::preflight)
}

/// Build the router with its middleware stack
pub fn create_router(orchestrator: Orchestrator, config: &ServerConfig) -> Router {
    let state = AppState::new(orchestrator);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ));

    Router::new()
        .route("/", export_route())
        .route("/export", export_route())
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(middleware)
        .layer(cors)
}

/// Serve until `shutdown_signal` resolves
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_with_shutdown(
    orchestrator: Orchestrator,
    config: &ServerConfig,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_router(orchestrator, config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Starting export server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
