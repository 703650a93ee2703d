//! Request-body extraction
//!
//! [`ValidJson`] wraps `axum::Json` so that body rejections (missing
//! fields, malformed JSON, wrong content type) become a 400 [`AppError`]
//! with the problem-details body, short-circuiting before any store
//! access.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// JSON body extractor with unified 400 rejections
///
/// ## Examples
/// ```ignore
/// async fn create(ValidJson(body): ValidJson<NewStudent>) -> ... {}
/// ```
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}
