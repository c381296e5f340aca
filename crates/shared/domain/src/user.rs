//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{ROLE_ADMIN, ROLE_DEVELOPER, ROLE_MANAGER};
use crate::date::OnlyDate;
use crate::error::DomainResult;
use crate::id::Id;
use crate::validation::{supplied, FieldValidation};

string_enum! {
    /// User roles enumeration
    pub enum UserRole("role") {
        Admin => ROLE_ADMIN,
        Manager => ROLE_MANAGER,
        Developer => ROLE_DEVELOPER,
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub registration_date: OnlyDate,
    pub role: UserRole,
}

impl User {
    /// Validate a creation request and build the entity under `id`.
    pub fn from_request(id: Id, req: CreateUserRequest) -> DomainResult<Self> {
        req.ensure_valid()?;
        Ok(Self {
            id,
            name: req.name,
            email: req.email,
            registration_date: req.registration_date.parse()?,
            role: req.role.parse()?,
        })
    }

    /// Overwrite the supplied mutable fields. Id and registration date stay.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub name: String,
    /// Email address
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Registration date (YYYY-MM-DD)
    #[validate(custom(function = "crate::validation::validate_date"))]
    pub registration_date: String,
    /// One of admin, manager, developer
    #[validate(custom(function = "crate::validation::validate_role"))]
    pub role: String,
}

impl FieldValidation for CreateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "registration_date", "role"];
}

/// User update data transfer object. Blank fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::optional_email"))]
    pub email: Option<String>,
    #[validate(custom(function = "crate::validation::optional_role"))]
    pub role: Option<String>,
}

impl FieldValidation for UpdateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "role"];
}

/// Parsed partial update for a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = crate::DomainError;

    fn try_from(req: UpdateUserRequest) -> Result<Self, Self::Error> {
        req.ensure_valid()?;
        Ok(Self {
            name: supplied(&req.name).map(str::to_string),
            email: supplied(&req.email).map(str::to_string),
            role: supplied(&req.role).map(str::parse).transpose()?,
        })
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: String,
    pub name: String,
    pub email: String,
    /// Registration date (YYYY-MM-DD)
    pub registration_date: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_inner(),
            name: user.name,
            email: user.email,
            registration_date: user.registration_date.to_string(),
            role: user.role.to_string(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            registration_date: user.registration_date.to_string(),
            role: user.role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            registration_date: "2024-02-29".into(),
            role: "developer".into(),
        }
    }

    #[test]
    fn test_valid_request_builds_user() {
        let id = Id::generate();
        let user = User::from_request(id.clone(), request()).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, UserRole::Developer);
        assert_eq!(user.registration_date.to_string(), "2024-02-29");
    }

    #[test]
    fn test_errors_follow_field_order() {
        let req = CreateUserRequest {
            name: " ".into(),
            email: "not-an-email".into(),
            registration_date: "29.02.2024".into(),
            role: "owner".into(),
        };
        let fields: Vec<_> = req.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "email", "registration_date", "role"]);
    }

    #[test]
    fn test_missing_fields_fail() {
        let err = User::from_request(Id::generate(), CreateUserRequest::default()).unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_update_ignores_blank_fields() {
        let changes = UserChanges::try_from(UpdateUserRequest {
            name: Some("  ".into()),
            email: Some("".into()),
            role: Some("admin".into()),
        })
        .unwrap();
        assert_eq!(
            changes,
            UserChanges {
                role: Some(UserRole::Admin),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_update_rejects_bad_supplied_email() {
        let result = UserChanges::try_from(UpdateUserRequest {
            email: Some("nope".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(ref e)) if e[0].field == "email"));
    }

    #[test]
    fn test_apply_keeps_id_and_registration_date() {
        let mut user = User::from_request(Id::generate(), request()).unwrap();
        let before = user.clone();
        user.apply(UserChanges {
            name: Some("Bea".into()),
            ..Default::default()
        });
        assert_eq!(user.name, "Bea");
        assert_eq!(user.id, before.id);
        assert_eq!(user.registration_date, before.registration_date);
        assert_eq!(user.email, before.email);
    }

    #[test]
    fn test_response_uses_wire_strings() {
        let user = User::from_request(Id::parse("u1").unwrap(), request()).unwrap();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["id"], "u1");
        assert_eq!(json["role"], "developer");
        assert_eq!(json["registration_date"], "2024-02-29");
    }
}
