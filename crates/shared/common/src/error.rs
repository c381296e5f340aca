//! Unified error handling for the service and the HTTP gateway.
//!
//! Every failure crossing the service boundary is an [`AppError`]. The HTTP
//! mapping lives in one place ([`AppError::status`]) and internal details are
//! logged, never sent to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, FieldError, Resource, SearchError};
use thiserror::Error;

use crate::response::ApiResponse;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{0} not found")]
    NotFound(Resource),

    // Storage errors
    #[error("storage error: {0}")]
    Storage(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Call context
    #[error("request cancelled: {0}")]
    Cancelled(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Coarse classification of [`AppError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Search,
    NotFound,
    Storage,
    Cancelled,
    Internal,
}

impl ErrorKind {
    /// Caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::Validation | ErrorKind::Search | ErrorKind::NotFound)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Search(_) => ErrorKind::Search,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Storage(_) => ErrorKind::Storage,
            #[cfg(feature = "database")]
            AppError::Database(_) => ErrorKind::Storage,
            AppError::Cancelled(_) => ErrorKind::Cancelled,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Search(_) => "SEARCH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Cancelled(_) => "CANCELLED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Search => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Cancelled => StatusCode::REQUEST_TIMEOUT,
            ErrorKind::Storage | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => ApiResponse::failure("validation failed", Some(errors)),
            other => ApiResponse::failure(other.user_message(), None),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Search(e) => AppError::Search(e),
            other => AppError::Validation(other.into_field_errors()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, resource: Resource) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, resource: Resource) -> AppResult<T> {
        self.ok_or(AppError::NotFound(resource))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::validation("name", "required").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Search(SearchError::EmptyValue).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound(Resource::Task).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::storage("disk").status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Cancelled("deadline".into()).status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::storage("connection refused to 10.0.0.3");
        assert_eq!(err.user_message(), "A storage error occurred");
        assert!(!err.kind().is_client_error());
    }

    #[test]
    fn test_domain_errors_convert() {
        let err = AppError::from(DomainError::InvalidId("a b".into()));
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = AppError::from(DomainError::Search(SearchError::MissingFilter));
        assert_eq!(err.kind(), ErrorKind::Search);
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let response = AppError::validation("email", "must be a valid email address").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::NotFound(Resource::User).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "user not found");
        assert!(json.get("data").is_none());
    }
}
