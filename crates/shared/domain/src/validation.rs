//! Field validation shared by every request type.
//!
//! Request structs derive [`validator::Validate`] and point their fields at the
//! `validate_*` functions below. [`FieldValidation`] turns the unordered
//! `ValidationErrors` map into a list ordered by field declaration.

use std::borrow::Cow;

use serde::Serialize;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::date::OnlyDate;
use crate::error::{DomainError, DomainResult};
use crate::id::is_valid_id;
use crate::task::{TaskPriority, TaskStatus};
use crate::user::UserRole;

/// A single rejected field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub(crate) fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered validation on top of `validator`.
pub trait FieldValidation: Validate {
    /// Field names in declaration order.
    const FIELDS: &'static [&'static str];

    /// All failures, ordered by [`Self::FIELDS`]. Empty means valid.
    fn field_errors(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_field_errors(&errors, Self::FIELDS),
        }
    }

    fn ensure_valid(&self) -> DomainResult<()> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

fn ordered_field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut collected: Vec<(usize, FieldError)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field = field.to_string();
            let rank = order.iter().position(|name| *name == field).unwrap_or(order.len());
            failures.iter().map(move |failure| {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                (rank, FieldError::new(field.clone(), message))
            })
        })
        .collect();
    collected.sort_by_key(|(rank, _)| *rank);
    collected.into_iter().map(|(_, error)| error).collect()
}

/// Treat absent and whitespace-only update fields alike.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn failure(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

// =============================================================================
// Required-field validators (creation requests)
// =============================================================================

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure("required", "must not be empty"));
    }
    Ok(())
}

pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if !is_valid_id(value) {
        return Err(failure("identifier", "must be a valid identifier"));
    }
    Ok(())
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    OnlyDate::parse(value)
        .map(|_| ())
        .map_err(|_| failure("date", "must be a date in YYYY-MM-DD format"))
}

pub fn validate_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<UserRole>()
        .map(|_| ())
        .map_err(|_| failure("role", one_of(UserRole::ALL.iter().map(UserRole::as_str))))
}

pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskPriority>()
        .map(|_| ())
        .map_err(|_| failure("priority", one_of(TaskPriority::ALL.iter().map(TaskPriority::as_str))))
}

pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskStatus>()
        .map(|_| ())
        .map_err(|_| failure("status", one_of(TaskStatus::ALL.iter().map(TaskStatus::as_str))))
}

fn one_of<'a>(values: impl Iterator<Item = &'a str>) -> String {
    format!("must be one of: {}", values.collect::<Vec<_>>().join(", "))
}

// =============================================================================
// Optional-field validators (update requests, blank = not supplied)
// =============================================================================

pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(failure("email", "must be a valid email address"))
    }
}

pub fn optional_identifier(value: &str) -> Result<(), ValidationError> {
    skip_blank(value, validate_identifier)
}

pub fn optional_date(value: &str) -> Result<(), ValidationError> {
    skip_blank(value, validate_date)
}

pub fn optional_role(value: &str) -> Result<(), ValidationError> {
    skip_blank(value, validate_role)
}

pub fn optional_priority(value: &str) -> Result<(), ValidationError> {
    skip_blank(value, validate_priority)
}

pub fn optional_status(value: &str) -> Result<(), ValidationError> {
    skip_blank(value, validate_status)
}

fn skip_blank(value: &str, check: fn(&str) -> Result<(), ValidationError>) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Ok(())
    } else {
        check(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        assert!(validate_required("  ").is_err());
        assert!(validate_required("Ana").is_ok());
    }

    #[test]
    fn test_failure_carries_message() {
        let err = validate_date("2024-02-30").unwrap_err();
        assert_eq!(err.code, "date");
        assert_eq!(err.message.unwrap(), "must be a date in YYYY-MM-DD format");
    }

    #[test]
    fn test_enum_messages_list_allowed_values() {
        let err = validate_role("owner").unwrap_err();
        assert_eq!(err.message.unwrap(), "must be one of: admin, manager, developer");
    }

    #[test]
    fn test_optional_validators_skip_blank() {
        assert!(optional_email(" ").is_ok());
        assert!(optional_date("").is_ok());
        assert!(optional_identifier("bad id").is_err());
        assert!(optional_status("archived").is_err());
    }

    #[test]
    fn test_supplied_filters_blank() {
        assert_eq!(supplied(&Some("  ".into())), None);
        assert_eq!(supplied(&None), None);
        assert_eq!(supplied(&Some("x".into())), Some("x"));
    }
}
