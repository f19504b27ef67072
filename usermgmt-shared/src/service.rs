/// Record service for user management
///
/// This module holds the business rules that sit between the HTTP surface and
/// the models:
/// - Required-field checks (missing, null and empty strings are all "missing")
/// - The active-manager check on create and on manager changes
/// - Batch updates, applied inside a single transaction
///
/// Each operation is one request's unit of work. Nothing is retried.
///
/// # Example
///
/// ```no_run
/// use usermgmt_shared::service::{CreateUserInput, UserService};
/// use usermgmt_shared::models::user::UserFilter;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let service = UserService::new(pool);
///
/// let user_id = service
///     .create(CreateUserInput {
///         full_name: Some("Jane Doe".to_string()),
///         mob_num: Some("5551234".to_string()),
///         pan_num: Some("abcd1234e".to_string()),
///         manager_id: Some("11111111-1111-1111-1111-111111111111".to_string()),
///     })
///     .await?;
///
/// let users = service.query(&UserFilter::by_user_id(&user_id)).await?;
/// assert_eq!(users[0].pan_num, "ABCD1234E");
/// # Ok(())
/// # }
/// ```

use crate::models::{
    manager::Manager,
    user::{non_empty, NewUser, User, UserFilter, UserPatch},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use validator::Validate;

/// Client input that is incomplete or refers to something unusable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or empty
    #[error("Missing required fields")]
    MissingFields,

    /// The manager does not exist or is inactive
    #[error("Invalid manager_id")]
    InvalidManager,

    /// An update carried no fields to write
    #[error("No fields to update")]
    EmptyUpdate,
}

/// Record service error
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Rejected before touching user rows
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store call failed
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Input for [`UserService::create`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(required, length(min = 1))]
    pub full_name: Option<String>,

    #[validate(required, length(min = 1))]
    pub mob_num: Option<String>,

    #[validate(required, length(min = 1))]
    pub pan_num: Option<String>,

    #[validate(required, length(min = 1))]
    pub manager_id: Option<String>,
}

/// Input for [`UserService::update`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUsersInput {
    /// Users to patch
    #[validate(required)]
    pub user_ids: Option<Vec<String>>,

    /// Fields to write to every listed user
    #[validate(required)]
    pub update_data: Option<UserPatch>,
}

/// Input for [`UserService::delete`]
///
/// At least one field must be present. Both are matched with OR.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteUsersInput {
    pub user_id: Option<String>,
    pub mob_num: Option<String>,
}

/// Create, query, update and delete operations over user records
///
/// Holds the shared pool; cloning is cheap.
#[derive(Debug, Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    /// Creates a service over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a user and returns its generated identifier
    ///
    /// # Errors
    ///
    /// - `ValidationError::MissingFields` if any field is absent or empty
    /// - `ValidationError::InvalidManager` if the manager is unknown or inactive
    /// - `ServiceError::Storage` if the insert fails
    pub async fn create(&self, input: CreateUserInput) -> ServiceResult<String> {
        input.validate().map_err(|_| ValidationError::MissingFields)?;

        let (Some(full_name), Some(mob_num), Some(pan_num), Some(manager_id)) =
            (input.full_name, input.mob_num, input.pan_num, input.manager_id)
        else {
            return Err(ValidationError::MissingFields.into());
        };

        self.ensure_manager_assignable(&manager_id).await?;

        let user = User::create(
            &self.pool,
            NewUser {
                full_name,
                mob_num,
                pan_num,
                manager_id,
            },
        )
        .await?;

        info!(user_id = %user.user_id, manager_id = ?user.manager_id, "User created");
        Ok(user.user_id)
    }

    /// Lists active users matching every supplied filter
    pub async fn query(&self, filter: &UserFilter) -> ServiceResult<Vec<User>> {
        let users = User::find(&self.pool, filter).await?;

        debug!(count = users.len(), "Users queried");
        Ok(users)
    }

    /// Applies the same patch to every listed user
    ///
    /// The manager check runs once, before any row is touched. All row
    /// updates share one transaction: the first failure rolls back the whole
    /// batch. Identifiers that match no row are skipped silently.
    ///
    /// # Returns
    ///
    /// The number of rows that were updated
    pub async fn update(&self, input: UpdateUsersInput) -> ServiceResult<u64> {
        input.validate().map_err(|_| ValidationError::MissingFields)?;

        let (Some(user_ids), Some(patch)) = (input.user_ids, input.update_data) else {
            return Err(ValidationError::MissingFields.into());
        };

        patch.validate().map_err(|_| ValidationError::MissingFields)?;

        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }

        if let Some(manager_id) = patch.manager_id.as_deref() {
            self.ensure_manager_assignable(manager_id).await?;
        }

        let mut tx = self.pool.begin().await?;
        let mut updated = 0u64;

        for user_id in &user_ids {
            if User::update(&mut *tx, user_id, &patch).await? {
                updated += 1;
            }
        }

        tx.commit().await?;

        info!(requested = user_ids.len(), updated, "Users updated");
        Ok(updated)
    }

    /// Permanently deletes users matching `user_id` OR `mob_num`
    ///
    /// # Returns
    ///
    /// The number of rows removed; zero is still a success
    pub async fn delete(&self, input: DeleteUsersInput) -> ServiceResult<u64> {
        let user_id = non_empty(input.user_id.as_deref());
        let mob_num = non_empty(input.mob_num.as_deref());

        if user_id.is_none() && mob_num.is_none() {
            return Err(ValidationError::MissingFields.into());
        }

        let deleted = User::delete_matching(&self.pool, user_id, mob_num).await?;

        info!(user_id = ?user_id, mob_num = ?mob_num, deleted, "Users deleted");
        Ok(deleted)
    }

    async fn ensure_manager_assignable(&self, manager_id: &str) -> ServiceResult<()> {
        if Manager::is_assignable(&self.pool, manager_id).await? {
            Ok(())
        } else {
            warn!(manager_id, "Rejected unknown or inactive manager");
            Err(ValidationError::InvalidManager.into())
        }
    }
}
