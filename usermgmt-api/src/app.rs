/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use usermgmt_api::{app::AppState, config::Config};
/// use usermgmt_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let state = AppState::new(pool);
/// let app = usermgmt_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use usermgmt_shared::service::UserService;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// The pool is the only handle to the store; handlers never reach for a
/// global connection.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Record service bound to this state's pool
    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone())
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health
/// ├── POST /create_user
/// ├── POST /get_users
/// ├── POST /update_user
/// └── POST /delete_user
/// ```
///
/// Every request is traced by tower-http's `TraceLayer`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/create_user", post(routes::users::create_user))
        .route("/get_users", post(routes::users::get_users))
        .route("/update_user", post(routes::users::update_user))
        .route("/delete_user", post(routes::users::delete_user))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
