//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared by the management service and the HTTP gateway.
//!
//! Each entity (user, task, project) comes in four shapes:
//! - a creation request (`Create*Request`) validated field by field,
//! - an update request (`Update*Request`) whose blank fields mean "not supplied",
//! - the persisted entity with its identifier,
//! - a response DTO mapped one-to-one from the entity.

#[macro_use]
mod macros;

pub mod constants;
pub mod date;
pub mod error;
pub mod filter;
pub mod id;
pub mod project;
pub mod task;
pub mod user;
pub mod validation;

pub use constants::*;
pub use date::OnlyDate;
pub use error::{DomainError, DomainResult, Resource};
pub use filter::{validate_search, MatchMode, ProjectFilter, SearchError, SearchFilter, TaskFilter, UserFilter};
pub use id::Id;
pub use project::{CreateProjectRequest, Project, ProjectChanges, ProjectResponse, UpdateProjectRequest};
pub use task::{CreateTaskRequest, Task, TaskChanges, TaskPriority, TaskResponse, TaskStatus, UpdateTaskRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserChanges, UserResponse, UserRole};
pub use validation::{FieldError, FieldValidation};
