/// Manager model and database operations
///
/// Managers are never created through the API. Two fixed managers are seeded
/// at startup; any further changes happen through direct store edits.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE managers (
///     manager_id TEXT PRIMARY KEY,
///     is_active BOOLEAN NOT NULL DEFAULT 1
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqliteExecutor};
use tracing::info;

/// Identifiers of the managers inserted by [`Manager::seed_defaults`]
pub const SEED_MANAGER_IDS: [&str; 2] = [
    "11111111-1111-1111-1111-111111111111",
    "22222222-2222-2222-2222-222222222222",
];

/// Manager referenced by user records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Manager {
    /// Opaque manager identifier
    pub manager_id: String,

    /// Only active managers may be assigned to users
    pub is_active: bool,
}

impl Manager {
    /// Finds a manager by ID
    ///
    /// # Returns
    ///
    /// The manager if found, None otherwise
    pub async fn find_by_id<'e, E>(executor: E, manager_id: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let manager = sqlx::query_as::<Sqlite, Manager>(
            r#"
            SELECT manager_id, is_active
            FROM managers
            WHERE manager_id = ?
            "#,
        )
        .bind(manager_id)
        .fetch_optional(executor)
        .await?;

        Ok(manager)
    }

    /// Returns true if the manager exists and is active
    ///
    /// Unknown and inactive managers are treated the same way.
    pub async fn is_assignable<'e, E>(executor: E, manager_id: &str) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        Ok(Self::find_by_id(executor, manager_id)
            .await?
            .is_some_and(|manager| manager.is_active))
    }

    /// Inserts the default managers if they are not present yet
    ///
    /// Existing rows are left untouched, including their active flag.
    pub async fn seed_defaults<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO managers (manager_id, is_active)
            VALUES (?, 1), (?, 1)
            "#,
        )
        .bind(SEED_MANAGER_IDS[0])
        .bind(SEED_MANAGER_IDS[1])
        .execute(executor)
        .await?;

        info!(inserted = result.rows_affected(), "Seeded default managers");
        Ok(result.rows_affected())
    }

    /// Sets the active flag of a manager
    ///
    /// Not reachable from the HTTP surface; used for store maintenance and tests.
    pub async fn set_active<'e, E>(executor: E, manager_id: &str, is_active: bool) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("UPDATE managers SET is_active = ? WHERE manager_id = ?")
            .bind(is_active)
            .bind(manager_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Inserts a manager row directly
    ///
    /// Not reachable from the HTTP surface; used for store maintenance and tests.
    pub async fn insert<'e, E>(executor: E, manager_id: &str, is_active: bool) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query("INSERT INTO managers (manager_id, is_active) VALUES (?, ?)")
            .bind(manager_id)
            .bind(is_active)
            .execute(executor)
            .await?;

        Ok(Self {
            manager_id: manager_id.to_string(),
            is_active,
        })
    }
}
