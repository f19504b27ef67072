/// User model and database operations
///
/// Every user belongs to a manager. Writes normalize the tax identifier
/// (`pan_num`) to uppercase; deletes are physical row removals.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id TEXT PRIMARY KEY,
///     full_name TEXT NOT NULL,
///     mob_num TEXT NOT NULL,
///     pan_num TEXT NOT NULL,
///     manager_id TEXT REFERENCES managers(manager_id),
///     created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
///     updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
///     is_active BOOLEAN NOT NULL DEFAULT 1
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use usermgmt_shared::models::user::{NewUser, User, UserFilter};
/// use usermgmt_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let user = User::create(
///     &pool,
///     NewUser {
///         full_name: "Jane Doe".to_string(),
///         mob_num: "5551234".to_string(),
///         pan_num: "abcd1234e".to_string(),
///         manager_id: "11111111-1111-1111-1111-111111111111".to_string(),
///     },
/// )
/// .await?;
/// assert_eq!(user.pan_num, "ABCD1234E");
///
/// let found = User::find(&pool, &UserFilter::by_user_id(&user.user_id)).await?;
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqliteExecutor};
use uuid::Uuid;
use validator::Validate;

const USER_COLUMNS: &str =
    "user_id, full_name, mob_num, pan_num, manager_id, created_at, updated_at, is_active";

/// User record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Server-generated identifier (UUID v4 string)
    pub user_id: String,

    /// Full name, never empty
    pub full_name: String,

    /// Mobile number
    pub mob_num: String,

    /// Tax identifier, stored uppercase
    pub pan_num: String,

    /// Owning manager
    pub manager_id: Option<String>,

    /// Set by the store on insert
    pub created_at: Option<NaiveDateTime>,

    /// Refreshed on every update
    pub updated_at: Option<NaiveDateTime>,

    /// Inactive users are hidden from queries
    pub is_active: bool,
}

/// Input for creating a new user
///
/// All fields have already passed presence validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub full_name: String,
    pub mob_num: String,
    pub pan_num: String,
    pub manager_id: String,
}

/// Equality filters for [`User::find`]
///
/// Absent and empty filters are ignored. Only active users are ever returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    pub user_id: Option<String>,
    pub mob_num: Option<String>,
    pub manager_id: Option<String>,
}

impl UserFilter {
    /// Filter matching a single user
    pub fn by_user_id(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            ..Default::default()
        }
    }
}

/// Field changes applied by [`User::update`]
///
/// Only fields that are present are written. Unknown keys are rejected when
/// deserializing so callers can never name arbitrary columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    /// New full name
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub full_name: Option<String>,

    /// New mobile number
    #[validate(length(min = 1, message = "mob_num must not be empty"))]
    pub mob_num: Option<String>,

    /// New tax identifier (uppercased on write)
    #[validate(length(min = 1, message = "pan_num must not be empty"))]
    pub pan_num: Option<String>,

    /// New manager; must be active, checked by the service
    #[validate(length(min = 1, message = "manager_id must not be empty"))]
    pub manager_id: Option<String>,

    /// Activate or deactivate the user
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Returns true if no field would be written
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.mob_num.is_none()
            && self.pan_num.is_none()
            && self.manager_id.is_none()
            && self.is_active.is_none()
    }
}

/// Treats empty strings the same as absent values
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl User {
    /// Creates a new user with a freshly generated identifier
    ///
    /// The tax identifier is uppercased before it is stored. Timestamps and
    /// the active flag take their store defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint is violated (for example an unknown
    /// manager) or the store call fails.
    pub async fn create<'e, E>(executor: E, data: NewUser) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let user_id = Uuid::new_v4().to_string();

        let query = format!(
            "INSERT INTO users (user_id, full_name, mob_num, pan_num, manager_id)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<Sqlite, User>(&query)
            .bind(user_id)
            .bind(data.full_name)
            .bind(data.mob_num)
            .bind(data.pan_num.to_uppercase())
            .bind(data.manager_id)
            .fetch_one(executor)
            .await?;

        Ok(user)
    }

    /// Finds a user by ID regardless of its active flag
    pub async fn find_by_id<'e, E>(executor: E, user_id: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?");

        let user = sqlx::query_as::<Sqlite, User>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Lists active users matching every supplied filter
    ///
    /// With no filters this returns all active users. Results are ordered by
    /// creation time, then identifier.
    pub async fn find<'e, E>(executor: E, filter: &UserFilter) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let mut query = format!("SELECT {USER_COLUMNS} FROM users WHERE is_active = 1");
        let mut binds: Vec<&str> = Vec::with_capacity(3);

        if let Some(user_id) = non_empty(filter.user_id.as_deref()) {
            query.push_str(" AND user_id = ?");
            binds.push(user_id);
        }
        if let Some(mob_num) = non_empty(filter.mob_num.as_deref()) {
            query.push_str(" AND mob_num = ?");
            binds.push(mob_num);
        }
        if let Some(manager_id) = non_empty(filter.manager_id.as_deref()) {
            query.push_str(" AND manager_id = ?");
            binds.push(manager_id);
        }

        query.push_str(" ORDER BY created_at, user_id");

        let mut q = sqlx::query_as::<Sqlite, User>(&query);
        for value in binds {
            q = q.bind(value);
        }

        q.fetch_all(executor).await
    }

    /// Applies a patch to one user
    ///
    /// `updated_at` is always refreshed. Returns false if no row has the
    /// given identifier. An empty patch only touches `updated_at`.
    pub async fn update<'e, E>(executor: E, user_id: &str, patch: &UserPatch) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        // SQLite placeholders are positional, so binds follow the push order below
        let mut query = String::from("UPDATE users SET updated_at = CURRENT_TIMESTAMP");

        if patch.full_name.is_some() {
            query.push_str(", full_name = ?");
        }
        if patch.mob_num.is_some() {
            query.push_str(", mob_num = ?");
        }
        if patch.pan_num.is_some() {
            query.push_str(", pan_num = ?");
        }
        if patch.manager_id.is_some() {
            query.push_str(", manager_id = ?");
        }
        if patch.is_active.is_some() {
            query.push_str(", is_active = ?");
        }

        query.push_str(" WHERE user_id = ?");

        let mut q = sqlx::query(&query);

        if let Some(full_name) = &patch.full_name {
            q = q.bind(full_name.as_str());
        }
        if let Some(mob_num) = &patch.mob_num {
            q = q.bind(mob_num.as_str());
        }
        if let Some(pan_num) = &patch.pan_num {
            q = q.bind(pan_num.to_uppercase());
        }
        if let Some(manager_id) = &patch.manager_id {
            q = q.bind(manager_id.as_str());
        }
        if let Some(is_active) = patch.is_active {
            q = q.bind(is_active);
        }

        let result = q.bind(user_id).execute(executor).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permanently deletes users whose ID or mobile number matches
    ///
    /// The two criteria are ORed. An absent side is bound as NULL and matches
    /// nothing, so passing only one criterion filters on that field alone.
    /// Passing both may remove two unrelated rows.
    ///
    /// # Returns
    ///
    /// The number of rows removed
    pub async fn delete_matching<'e, E>(
        executor: E,
        user_id: Option<&str>,
        mob_num: Option<&str>,
    ) -> Result<u64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ? OR mob_num = ?")
            .bind(non_empty(user_id))
            .bind(non_empty(mob_num))
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
