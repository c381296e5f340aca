//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::filter::SearchError;
use crate::validation::{format_field_errors, FieldError};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more request fields failed validation
    #[error("{}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Date string does not follow `YYYY-MM-DD`
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Identifier is not 1-64 characters of `[A-Za-z0-9_-]`
    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    /// Value outside an enumerated set
    #[error("unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    /// Search request rejected by the filter policy
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl DomainError {
    /// Field-level view of the error, used when reporting it to clients.
    pub fn into_field_errors(self) -> Vec<FieldError> {
        match self {
            DomainError::Validation(errors) => errors,
            DomainError::InvalidDate { .. } => vec![FieldError::new("date", self.to_string())],
            DomainError::InvalidId(_) => vec![FieldError::new("id", self.to_string())],
            DomainError::UnknownValue { field, .. } => vec![FieldError::new(field, self.to_string())],
            DomainError::Search(_) => vec![FieldError::new("search", self.to_string())],
        }
    }
}

/// Kinds of stored records, used in not-found reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Task,
    Project,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::User => f.write_str("user"),
            Resource::Task => f.write_str("task"),
            Resource::Project => f.write_str("project"),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
