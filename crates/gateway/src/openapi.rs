//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use domain::{
    CreateProjectRequest, CreateTaskRequest, CreateUserRequest, FieldError, ProjectResponse, TaskResponse,
    UpdateProjectRequest, UpdateTaskRequest, UpdateUserRequest, UserResponse,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::heartbeat,
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::search_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::list_user_tasks,
        crate::handlers::task_handler::list_tasks,
        crate::handlers::task_handler::create_task,
        crate::handlers::task_handler::search_tasks,
        crate::handlers::task_handler::get_task,
        crate::handlers::task_handler::update_task,
        crate::handlers::task_handler::delete_task,
        crate::handlers::project_handler::list_projects,
        crate::handlers::project_handler::create_project,
        crate::handlers::project_handler::search_projects,
        crate::handlers::project_handler::get_project,
        crate::handlers::project_handler::update_project,
        crate::handlers::project_handler::delete_project,
        crate::handlers::project_handler::list_project_tasks,
    ),
    components(
        schemas(
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            CreateTaskRequest,
            UpdateTaskRequest,
            TaskResponse,
            CreateProjectRequest,
            UpdateProjectRequest,
            ProjectResponse,
            FieldError,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and storage health"),
        (name = "Users", description = "User management endpoints"),
        (name = "Tasks", description = "Task management endpoints"),
        (name = "Projects", description = "Project management endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/heartbeat",
            "/api/v1/users",
            "/api/v1/users/{id}/tasks",
            "/api/v1/tasks/search",
            "/api/v1/projects/{id}",
            "/api/v1/projects/{id}/tasks",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
