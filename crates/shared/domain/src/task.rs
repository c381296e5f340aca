//! Task domain entity and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, STATUS_DONE, STATUS_IN_PROGRESS, STATUS_TODO};
use crate::date::OnlyDate;
use crate::error::{DomainError, DomainResult};
use crate::id::Id;
use crate::validation::{supplied, FieldValidation};

string_enum! {
    /// Task priority
    pub enum TaskPriority("priority") {
        Low => PRIORITY_LOW,
        Medium => PRIORITY_MEDIUM,
        High => PRIORITY_HIGH,
    }
}

string_enum! {
    /// Task workflow status
    pub enum TaskStatus("status") {
        Todo => STATUS_TODO,
        InProgress => STATUS_IN_PROGRESS,
        Done => STATUS_DONE,
    }
}

/// Task domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: OnlyDate,
    pub done_at: OnlyDate,
    pub author_id: Id,
    pub project_id: Id,
}

impl Task {
    pub fn from_request(id: Id, req: CreateTaskRequest) -> DomainResult<Self> {
        req.ensure_valid()?;
        Ok(Self {
            id,
            title: req.title,
            description: req.description,
            priority: req.priority.parse()?,
            status: req.status.parse()?,
            created_at: req.created_at.parse()?,
            done_at: req.done_at.parse()?,
            author_id: Id::parse(&req.author_id)?,
            project_id: Id::parse(&req.project_id)?,
        })
    }

    /// Overwrite the supplied mutable fields. Id and `created_at` stay.
    pub fn apply(&mut self, changes: TaskChanges) {
        let TaskChanges {
            title,
            description,
            priority,
            status,
            done_at,
            author_id,
            project_id,
        } = changes;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(done_at) = done_at {
            self.done_at = done_at;
        }
        if let Some(author_id) = author_id {
            self.author_id = author_id;
        }
        if let Some(project_id) = project_id {
            self.project_id = project_id;
        }
    }
}

/// Task creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CreateTaskRequest {
    #[validate(custom(function = "crate::validation::validate_required"))]
    pub title: String,
    pub description: String,
    /// One of low, medium, high
    #[validate(custom(function = "crate::validation::validate_priority"))]
    pub priority: String,
    /// One of todo, in_progress, done
    #[validate(custom(function = "crate::validation::validate_status"))]
    pub status: String,
    /// Creation date (YYYY-MM-DD)
    #[validate(custom(function = "crate::validation::validate_date"))]
    pub created_at: String,
    /// Completion date (YYYY-MM-DD)
    #[validate(custom(function = "crate::validation::validate_date"))]
    pub done_at: String,
    /// Identifier of the authoring user
    #[validate(custom(function = "crate::validation::validate_identifier"))]
    pub author_id: String,
    /// Identifier of the owning project
    #[validate(custom(function = "crate::validation::validate_identifier"))]
    pub project_id: String,
}

impl FieldValidation for CreateTaskRequest {
    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "priority",
        "status",
        "created_at",
        "done_at",
        "author_id",
        "project_id",
    ];
}

/// Task update data transfer object. Blank fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "crate::validation::optional_priority"))]
    pub priority: Option<String>,
    #[validate(custom(function = "crate::validation::optional_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "crate::validation::optional_date"))]
    pub done_at: Option<String>,
    #[validate(custom(function = "crate::validation::optional_identifier"))]
    pub author_id: Option<String>,
    #[validate(custom(function = "crate::validation::optional_identifier"))]
    pub project_id: Option<String>,
}

impl FieldValidation for UpdateTaskRequest {
    const FIELDS: &'static [&'static str] =
        &["title", "description", "priority", "status", "done_at", "author_id", "project_id"];
}

/// Parsed partial update for a task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub done_at: Option<OnlyDate>,
    pub author_id: Option<Id>,
    pub project_id: Option<Id>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TryFrom<UpdateTaskRequest> for TaskChanges {
    type Error = DomainError;

    fn try_from(req: UpdateTaskRequest) -> Result<Self, Self::Error> {
        req.ensure_valid()?;
        Ok(Self {
            title: supplied(&req.title).map(str::to_string),
            description: supplied(&req.description).map(str::to_string),
            priority: supplied(&req.priority).map(str::parse).transpose()?,
            status: supplied(&req.status).map(str::parse).transpose()?,
            done_at: supplied(&req.done_at).map(OnlyDate::parse).transpose()?,
            author_id: supplied(&req.author_id).map(Id::parse).transpose()?,
            project_id: supplied(&req.project_id).map(Id::parse).transpose()?,
        })
    }
}

/// Task response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: String,
    pub done_at: String,
    pub author_id: String,
    pub project_id: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.into_inner(),
            title: task.title,
            description: task.description,
            priority: task.priority.to_string(),
            status: task.status.to_string(),
            created_at: task.created_at.to_string(),
            done_at: task.done_at.to_string(),
            author_id: task.author_id.into_inner(),
            project_id: task.project_id.into_inner(),
        }
    }
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self::from(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTaskRequest {
        CreateTaskRequest {
            title: "Write docs".into(),
            description: "API reference".into(),
            priority: "high".into(),
            status: "todo".into(),
            created_at: "2024-01-10".into(),
            done_at: "2024-01-20".into(),
            author_id: "u1".into(),
            project_id: "p1".into(),
        }
    }

    #[test]
    fn test_valid_request_builds_task() {
        let task = Task::from_request(Id::generate(), request()).unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.author_id.as_str(), "u1");
        assert_eq!(task.project_id.as_str(), "p1");
    }

    #[test]
    fn test_description_is_optional() {
        let req = CreateTaskRequest {
            description: String::new(),
            ..request()
        };
        assert!(req.field_errors().is_empty());
    }

    #[test]
    fn test_bad_fields_reported_in_order() {
        let req = CreateTaskRequest {
            status: "archived".into(),
            done_at: "soon".into(),
            project_id: "p 1".into(),
            ..request()
        };
        let fields: Vec<_> = req.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["status", "done_at", "project_id"]);
    }

    #[test]
    fn test_status_wire_value() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!(matches!(
            "started".parse::<TaskStatus>(),
            Err(DomainError::UnknownValue { field: "status", .. })
        ));
    }

    #[test]
    fn test_update_keeps_author_and_project_apart() {
        let mut task = Task::from_request(Id::generate(), request()).unwrap();
        let changes = TaskChanges::try_from(UpdateTaskRequest {
            author_id: Some("u2".into()),
            ..Default::default()
        })
        .unwrap();
        task.apply(changes);
        assert_eq!(task.author_id.as_str(), "u2");
        assert_eq!(task.project_id.as_str(), "p1");
    }

    #[test]
    fn test_empty_update_is_empty() {
        let changes = TaskChanges::try_from(UpdateTaskRequest {
            title: Some(" ".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(changes.is_empty());
    }
}
