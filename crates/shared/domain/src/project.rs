//! Project domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::date::OnlyDate;
use crate::error::{DomainError, DomainResult};
use crate::id::Id;
use crate::validation::{supplied, FieldValidation};

/// Project domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub manager_id: Id,
    pub started_at: OnlyDate,
    pub finished_at: OnlyDate,
}

impl Project {
    pub fn from_request(id: Id, req: CreateProjectRequest) -> DomainResult<Self> {
        req.ensure_valid()?;
        Ok(Self {
            id,
            title: req.title,
            description: req.description,
            manager_id: Id::parse(&req.manager_id)?,
            started_at: req.started_at.parse()?,
            finished_at: req.finished_at.parse()?,
        })
    }

    /// Overwrite the supplied mutable fields. Id and `started_at` stay.
    pub fn apply(&mut self, changes: ProjectChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(manager_id) = changes.manager_id {
            self.manager_id = manager_id;
        }
        if let Some(finished_at) = changes.finished_at {
            self.finished_at = finished_at;
        }
    }
}

/// Project creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CreateProjectRequest {
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub title: String,
    pub description: String,
    /// Identifier of the managing user
    #[validate(custom(function = "crate::validation::validate_identifier"))]
    pub manager_id: String,
    /// Start date (YYYY-MM-DD)
    #[validate(custom(function = "crate::validation::validate_date"))]
    pub started_at: String,
    /// Planned or actual end date (YYYY-MM-DD)
    #[validate(custom(function = "crate::validation::validate_date"))]
    pub finished_at: String,
}

impl FieldValidation for CreateProjectRequest {
    const FIELDS: &'static [&'static str] = &["title", "description", "manager_id", "started_at", "finished_at"];
}

/// Project update data transfer object. Blank fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "crate::validation::optional_identifier"))]
    pub manager_id: Option<String>,
    #[validate(custom(function = "crate::validation::optional_date"))]
    pub finished_at: Option<String>,
}

impl FieldValidation for UpdateProjectRequest {
    const FIELDS: &'static [&'static str] = &["title", "description", "manager_id", "finished_at"];
}

/// Parsed partial update for a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub manager_id: Option<Id>,
    pub finished_at: Option<OnlyDate>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TryFrom<UpdateProjectRequest> for ProjectChanges {
    type Error = DomainError;

    fn try_from(req: UpdateProjectRequest) -> Result<Self, Self::Error> {
        req.ensure_valid()?;
        Ok(Self {
            title: supplied(&req.title).map(str::to_string),
            description: supplied(&req.description).map(str::to_string),
            manager_id: supplied(&req.manager_id).map(Id::parse).transpose()?,
            finished_at: supplied(&req.finished_at).map(OnlyDate::parse).transpose()?,
        })
    }
}

/// Project response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub manager_id: String,
    pub started_at: String,
    pub finished_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.into_inner(),
            title: project.title,
            description: project.description,
            manager_id: project.manager_id.into_inner(),
            started_at: project.started_at.to_string(),
            finished_at: project.finished_at.to_string(),
        }
    }
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self::from(project.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProjectRequest {
        CreateProjectRequest {
            title: "Apollo".into(),
            description: String::new(),
            manager_id: "u1".into(),
            started_at: "2023-12-31".into(),
            finished_at: "2024-06-30".into(),
        }
    }

    #[test]
    fn test_valid_request_builds_project() {
        let project = Project::from_request(Id::parse("p1").unwrap(), request()).unwrap();
        let response = ProjectResponse::from(project);
        assert_eq!(response.id, "p1");
        assert_eq!(response.started_at, "2023-12-31");
        assert_eq!(response.manager_id, "u1");
    }

    #[test]
    fn test_missing_title_and_dates_fail() {
        let req = CreateProjectRequest {
            title: String::new(),
            started_at: String::new(),
            ..request()
        };
        let err = Project::from_request(Id::generate(), req).unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["title", "started_at"]);
    }

    #[test]
    fn test_apply_keeps_started_at() {
        let mut project = Project::from_request(Id::generate(), request()).unwrap();
        let started = project.started_at;
        project.apply(
            ProjectChanges::try_from(UpdateProjectRequest {
                finished_at: Some("2024-12-31".into()),
                ..Default::default()
            })
            .unwrap(),
        );
        assert_eq!(project.started_at, started);
        assert_eq!(project.finished_at.to_string(), "2024-12-31");
    }

    #[test]
    fn test_update_rejects_bad_date() {
        let result = ProjectChanges::try_from(UpdateProjectRequest {
            finished_at: Some("2024-02-30".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
