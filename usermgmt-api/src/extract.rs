/// Request body extraction
///
/// [`JsonBody`] parses a JSON request body like `axum::Json`, except that an
/// absent or blank body (with or without a `Content-Type`) yields
/// `T::default()`. A POST without a body is then treated as `{}`, so a bare
/// `POST /get_users` lists every active user and a bare `POST /create_user`
/// reports missing fields.
///
/// A non-blank body must be valid JSON for `T`; anything else answers 400.

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body that defaults when the request carries none
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}
