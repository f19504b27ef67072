/// Common test utilities for integration tests
///
/// Every `TestContext` owns a private in-memory database with migrations
/// applied and the default managers seeded, so tests never share state.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::Service as _;
use usermgmt_api::app::{build_router, AppState};
use usermgmt_shared::db::migrations::run_migrations;
use usermgmt_shared::db::pool::{create_pool, DatabaseConfig};
use usermgmt_shared::models::manager::Manager;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

/// Response captured for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parses the body as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Expected JSON body, got {:?}: {}",
                String::from_utf8_lossy(&self.body),
                e
            )
        })
    }

    /// Returns the body as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;
        Manager::seed_defaults(&db).await?;

        let state = AppState::new(db.clone());
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a POST with a JSON body
    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Sends an arbitrary request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse { status, body }
    }

    /// Creates a user through the API and returns its ID
    pub async fn create_user(&self, full_name: &str, mob_num: &str, manager_id: &str) -> String {
        let response = self
            .post_json(
                "/create_user",
                serde_json::json!({
                    "full_name": full_name,
                    "mob_num": mob_num,
                    "pan_num": "abcd1234e",
                    "manager_id": manager_id,
                }),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()["user_id"]
            .as_str()
            .expect("user_id should be a string")
            .to_string()
    }

    /// Counts every user row, active or not
    pub async fn count_users(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .unwrap()
    }
}
