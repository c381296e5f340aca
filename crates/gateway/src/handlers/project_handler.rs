//! Project handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::{ApiResponse, AppResult};
use domain::{CreateProjectRequest, Id, ProjectResponse, TaskResponse, UpdateProjectRequest};

use crate::extractors::{Ctx, SearchParams, ValidatedJson};
use crate::state::AppState;

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/search", get(search_projects))
        .route("/:id", get(get_project).put(update_project).delete(delete_project))
        .route("/:id/tasks", get(list_project_tasks))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All projects", body = Vec<ProjectResponse>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_projects(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProjectResponse>>>> {
    let projects = state.service.list_projects(&ctx).await?;
    Ok(Json(ApiResponse::success(projects)))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation errors")
    )
)]
pub async fn create_project(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectResponse>>)> {
    let (message, project) = state.service.create_project(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(project, message))))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/search",
    tag = "Projects",
    params(
        ("title" = Option<String>, Query, description = "Substring of the title"),
        ("manager_id" = Option<String>, Query, description = "Exact manager id")
    ),
    responses(
        (status = 200, description = "Matching projects", body = Vec<ProjectResponse>),
        (status = 400, description = "Missing, repeated, empty or unsupported filter")
    )
)]
pub async fn search_projects(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    search: SearchParams,
) -> AppResult<Json<ApiResponse<Vec<ProjectResponse>>>> {
    let projects = state
        .service
        .search_projects(&ctx, &search.filter, &search.value)
        .await?;
    Ok(Json(ApiResponse::success(projects)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProjectResponse>>> {
    let id = Id::parse(&id)?;
    let project = state.service.get_project(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(project)))
}

#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated"),
        (status = 400, description = "Validation errors"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Id::parse(&id)?;
    state.service.update_project(&ctx, &id, req).await?;
    Ok(Json(ApiResponse::message("project updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Id::parse(&id)?;
    state.service.delete_project(&ctx, &id).await?;
    Ok(Json(ApiResponse::message("project deleted")))
}

/// Tasks that belong to a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/tasks",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Tasks in the project", body = Vec<TaskResponse>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn list_project_tasks(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<TaskResponse>>>> {
    let id = Id::parse(&id)?;
    let tasks = state.service.list_project_tasks(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(tasks)))
}
