/// User record endpoints
///
/// Every route is a POST with a JSON body and maps one record-service
/// operation:
///
/// - `POST /create_user` - Create a user under an active manager
/// - `POST /get_users` - List active users, optionally filtered
/// - `POST /update_user` - Patch a batch of users in one transaction
/// - `POST /delete_user` - Hard delete by `user_id` OR `mob_num`
///
/// A request without a body is read as `{}`. Validation failures answer 400
/// with a plain-text reason; store failures answer 500 with a generic body.

use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use usermgmt_shared::{
    models::user::{User, UserFilter},
    service::{CreateUserInput, DeleteUsersInput, UpdateUsersInput},
};

/// Create user response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    /// Acknowledgment
    pub message: String,

    /// Generated user ID
    pub user_id: String,
}

/// List users response
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// Matching active users
    pub users: Vec<User>,
}

/// Plain acknowledgment
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /create_user
/// Content-Type: application/json
///
/// {
///   "full_name": "Jane Doe",
///   "mob_num": "5551234",
///   "pan_num": "abcd1234e",
///   "manager_id": "11111111-1111-1111-1111-111111111111"
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "User created successfully", "user_id": "uuid" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing required fields, or invalid manager_id
/// - `500 Internal Server Error`: Store failure
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> ApiResult<Json<CreateUserResponse>> {
    let user_id = state.users().create(input).await?;

    Ok(Json(CreateUserResponse {
        message: "User created successfully".to_string(),
        user_id,
    }))
}

/// List users
///
/// All filters are optional and combined with AND. Only active users are
/// returned. An empty list is a normal result.
///
/// # Endpoint
///
/// ```text
/// POST /get_users
/// Content-Type: application/json
///
/// { "manager_id": "11111111-1111-1111-1111-111111111111" }
/// ```
///
/// # Response
///
/// ```json
/// { "users": [ { "user_id": "uuid", "full_name": "Jane Doe", ... } ] }
/// ```
pub async fn get_users(
    State(state): State<AppState>,
    JsonBody(filter): JsonBody<UserFilter>,
) -> ApiResult<Json<ListUsersResponse>> {
    let users = state.users().query(&filter).await?;

    Ok(Json(ListUsersResponse { users }))
}

/// Update users
///
/// Applies `update_data` to every user in `user_ids`. Accepted fields are
/// `full_name`, `mob_num`, `pan_num`, `manager_id` and `is_active`; any other
/// key is rejected. The batch is all-or-nothing.
///
/// # Endpoint
///
/// ```text
/// POST /update_user
/// Content-Type: application/json
///
/// {
///   "user_ids": ["uuid-1", "uuid-2"],
///   "update_data": { "manager_id": "22222222-2222-2222-2222-222222222222" }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields, unknown field, empty update, or invalid manager_id
/// - `500 Internal Server Error`: Store failure (nothing is written)
pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UpdateUsersInput>,
) -> ApiResult<Json<MessageResponse>> {
    state.users().update(input).await?;

    Ok(Json(MessageResponse::new("Users updated successfully")))
}

/// Delete users
///
/// Removes every row whose `user_id` OR `mob_num` matches. Supplying both may
/// delete two unrelated users. Succeeds even when nothing matched.
///
/// # Endpoint
///
/// ```text
/// POST /delete_user
/// Content-Type: application/json
///
/// { "mob_num": "5551234" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Neither field supplied
/// - `500 Internal Server Error`: Store failure
pub async fn delete_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DeleteUsersInput>,
) -> ApiResult<Json<MessageResponse>> {
    state.users().delete(input).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
