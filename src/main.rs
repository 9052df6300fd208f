//! Leadgate lead ingestion service.
//!
//! Main entry point. Initializes logging, loads configuration from the
//! environment, builds the lazy database pool, and serves HTTP until a
//! shutdown signal arrives.

use anyhow::Result;
use leadgate_api::{start_server, AppState, Config};
use leadgate_core::storage::{self, Storage};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("starting leadgate lead ingestion service");

    let config = Config::load()?;

    let missing = Config::missing_required_keys();
    if !missing.is_empty() {
        // Startup is never blocked on configuration; affected endpoints fail
        // lazily and /env-check points at the gap.
        warn!(missing = ?missing, "required configuration keys are not set");
    }

    info!(
        database = %config.database_target_masked(),
        listen_addr = %config.server_addr(),
        max_connections = config.db_max_connections,
        "configuration loaded"
    );

    // No connection is opened here; establishment happens on first use and
    // is re-attempted on the next request after a failure.
    let pool = config.pool_options().connect_lazy_with(config.connect_options());

    if let Err(e) = storage::ensure_schema(&pool).await {
        warn!(
            error = %e,
            "could not ensure leads schema at startup; inserts will fail until the database is reachable"
        );
    } else {
        info!("leads schema ensured");
    }

    let addr = config.server_addr();
    let state = AppState::new(Storage::new(pool.clone()), config);

    info!(addr = %addr, "leadgate is ready to receive leads");

    start_server(state, addr).await?;

    pool.close().await;
    info!("database connections closed");

    info!("leadgate shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,leadgate=debug,tower_http=debug"))
        .expect("invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
