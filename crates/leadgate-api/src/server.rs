//! HTTP server configuration and request routing.
//!
//! Provides Axum router setup with the middleware stack and graceful
//! shutdown. Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement (30s)
//! 4. Shared-secret authentication (insert route only)
//! 5. Handler execution

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use leadgate_core::storage::Storage;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{config::Config, handlers, middleware::auth::require_api_key};

/// Service name reported by the liveness endpoint.
pub const SERVICE_NAME: &str = "leadgate";

/// Shared application state injected into every handler.
///
/// Constructed once at startup; holds the storage layer (wrapping the lazy
/// connection pool) and the loaded configuration. Immutable afterwards, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Database access layer.
    pub storage: Storage,
    /// Loaded service configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state from its parts.
    pub fn new(storage: Storage, config: Config) -> Self {
        Self { storage, config: Arc::new(config) }
    }
}

/// Creates the Axum router with all routes and middleware.
///
/// Sets up the diagnostic endpoints, the authenticated insert route,
/// request tracing, timeout handling, and shared application state.
///
/// # Example
///
/// ```no_run
/// use leadgate_api::{create_router, AppState, Config};
/// use leadgate_core::storage::Storage;
///
/// fn build(storage: Storage) -> axum::Router {
///     create_router(AppState::new(storage, Config::default()))
/// }
/// ```
pub fn create_router(state: AppState) -> Router {
    let diagnostic_routes = Router::new()
        .route("/", get(handlers::usage))
        .route("/health", get(handlers::liveness))
        .route("/db-health", get(handlers::db_health))
        .route("/env-check", get(handlers::env_check));

    let api_routes = Router::new()
        .route("/whatsapp/leads/insert", post(handlers::insert_lead))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .merge(diagnostic_routes)
        .merge(api_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject a request ID into all responses.
///
/// Adds an X-Request-Id header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the given address and serves until SIGINT/SIGTERM.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is in use or the interface is
/// unavailable.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("received SIGTERM, starting graceful shutdown");
        },
    }

    warn!("waiting for in-flight requests to complete");
}
