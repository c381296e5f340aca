//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use common::AppError;
use domain::FieldValidation;

/// JSON extractor that automatically validates the payload.
///
/// Every failing field is reported, in declaration order.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + FieldValidation,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation("body", e.body_text()))?;

        let errors = value.field_errors();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(ValidatedJson(value))
    }
}
