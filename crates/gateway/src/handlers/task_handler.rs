//! Task handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::{ApiResponse, AppResult};
use domain::{CreateTaskRequest, Id, TaskResponse, UpdateTaskRequest};

use crate::extractors::{Ctx, SearchParams, ValidatedJson};
use crate::state::AppState;

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/search", get(search_tasks))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
}

/// List all tasks
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "All tasks", body = Vec<TaskResponse>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_tasks(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<TaskResponse>>>> {
    let tasks = state.service.list_tasks(&ctx).await?;
    Ok(Json(ApiResponse::success(tasks)))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Validation errors")
    )
)]
pub async fn create_task(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TaskResponse>>)> {
    let (message, task) = state.service.create_task(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(task, message))))
}

/// Search tasks by one field
#[utoipa::path(
    get,
    path = "/api/v1/tasks/search",
    tag = "Tasks",
    params(
        ("title" = Option<String>, Query, description = "Substring of the title"),
        ("priority" = Option<String>, Query, description = "Exact priority"),
        ("status" = Option<String>, Query, description = "Exact status"),
        ("author_id" = Option<String>, Query, description = "Exact author id"),
        ("project_id" = Option<String>, Query, description = "Exact project id")
    ),
    responses(
        (status = 200, description = "Matching tasks", body = Vec<TaskResponse>),
        (status = 400, description = "Missing, repeated, empty or unsupported filter")
    )
)]
pub async fn search_tasks(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    search: SearchParams,
) -> AppResult<Json<ApiResponse<Vec<TaskResponse>>>> {
    let tasks = state.service.search_tasks(&ctx, &search.filter, &search.value).await?;
    Ok(Json(ApiResponse::success(tasks)))
}

/// Get task by ID
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TaskResponse>>> {
    let id = Id::parse(&id)?;
    let task = state.service.get_task(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(task)))
}

/// Update task
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated"),
        (status = 400, description = "Validation errors"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Id::parse(&id)?;
    state.service.update_task(&ctx, &id, req).await?;
    Ok(Json(ApiResponse::message("task updated")))
}

/// Delete task
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Id::parse(&id)?;
    state.service.delete_task(&ctx, &id).await?;
    Ok(Json(ApiResponse::message("task deleted")))
}
