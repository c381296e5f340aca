//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::{ApiResponse, AppResult};
use domain::{CreateUserRequest, Id, TaskResponse, UpdateUserRequest, UserResponse};

use crate::extractors::{Ctx, SearchParams, ValidatedJson};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/tasks", get(list_user_tasks))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_users(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.service.list_users(&ctx).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation errors")
    )
)]
pub async fn create_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let (message, user) = state.service.create_user(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(user, message))))
}

/// Search users by one field
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    tag = "Users",
    params(
        ("name" = Option<String>, Query, description = "Substring of the name"),
        ("email" = Option<String>, Query, description = "Substring of the email"),
        ("role" = Option<String>, Query, description = "Exact role")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "Missing, repeated, empty or unsupported filter")
    )
)]
pub async fn search_users(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    search: SearchParams,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.service.search_users(&ctx, &search.filter, &search.value).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let id = Id::parse(&id)?;
    let user = state.service.get_user(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Validation errors"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Id::parse(&id)?;
    state.service.update_user(&ctx, &id, req).await?;
    Ok(Json(ApiResponse::message("user updated")))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = Id::parse(&id)?;
    state.service.delete_user(&ctx, &id).await?;
    Ok(Json(ApiResponse::message("user deleted")))
}

/// Tasks authored by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/tasks",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Tasks authored by the user", body = Vec<TaskResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_tasks(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<TaskResponse>>>> {
    let id = Id::parse(&id)?;
    let tasks = state.service.list_user_tasks(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(tasks)))
}
