//! Axum extractor for validated payloads
//!
//! `ValidatedJson<T>` deserializes the body and runs the `validator` rules
//! declared on `T` before the handler sees it.

use crate::core::error::{ApiError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_review(
///     ValidatedJson(payload): ValidatedJson<ReviewCreate>,
/// ) -> ApiResult<(StatusCode, Json<ReviewOut>)> {
///     // payload passed its field rules
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        payload.validate()?;

        Ok(ValidatedJson(payload))
    }
}
