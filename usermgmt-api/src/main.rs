//! # User Management API Server
//!
//! Serves the user record endpoints over HTTP, backed by SQLite.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment
//! 2. Install console and file logging
//! 3. Open the database pool and apply migrations
//! 4. Seed the default managers
//! 5. Serve until Ctrl-C, then close the pool
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p usermgmt-api
//! ```

use usermgmt_api::{
    app::{build_router, AppState},
    config::Config,
    telemetry,
};
use usermgmt_shared::{
    db::{migrations::run_migrations, pool},
    models::manager::Manager,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let _log_guard = telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        "User management API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let db = match pool::create_pool(config.pool_config()).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    run_migrations(&db).await?;
    Manager::seed_defaults(&db).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
