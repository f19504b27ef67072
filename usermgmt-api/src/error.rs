/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`, which converts to the right
/// status code and a plain-text body.
///
/// | Variant | Status | Body |
/// |---|---|---|
/// | `BadRequest` | 400 | the reason |
/// | `InternalError` | 500 | `Database error` (detail is logged only) |
///
/// # Example
///
/// ```
/// use usermgmt_api::error::{ApiError, ApiResult};
///
/// fn require(value: Option<&str>) -> ApiResult<&str> {
///     value.ok_or_else(|| ApiError::BadRequest("Missing required fields".to_string()))
/// }
///
/// assert!(require(None).is_err());
/// ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use usermgmt_shared::service::ServiceError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Body returned for every internal error
pub const INTERNAL_ERROR_BODY: &str = "Database error";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): incomplete or invalid client input
    BadRequest(String),

    /// Internal server error (500): the detail never reaches the client
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

/// Convert service errors to API errors
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(reason) => ApiError::BadRequest(reason.to_string()),
            ServiceError::Storage(db_err) => db_err.into(),
        }
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::InternalError(format!("Database error: {}", err))
    }
}

/// Convert body parsing failures to API errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
