//! Task use cases, including the per-user and per-project task listings.

use common::{AppError, AppResult};
use domain::{
    validate_search, CreateTaskRequest, Id, SearchFilter, Task, TaskChanges, TaskFilter, TaskResponse,
    UpdateTaskRequest,
};

use super::management_service::{log_failure, ManagementService};
use crate::context::RequestContext;

impl ManagementService {
    pub async fn create_task(&self, ctx: &RequestContext, req: CreateTaskRequest) -> AppResult<(String, TaskResponse)> {
        let task = Task::from_request(Id::generate(), req)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "create task", e))?;

        let (message, task) = self
            .tasks
            .create(ctx, task)
            .await
            .inspect_err(|e| log_failure(ctx, "create task", e))?;

        tracing::info!(parent: ctx.span(), task_id = %task.id, "task created");
        Ok((message, TaskResponse::from(task)))
    }

    pub async fn get_task(&self, ctx: &RequestContext, id: &Id) -> AppResult<TaskResponse> {
        let task = self
            .tasks
            .get(ctx, id)
            .await
            .inspect_err(|e| log_failure(ctx, "get task", e))?;

        Ok(TaskResponse::from(task))
    }

    pub async fn update_task(&self, ctx: &RequestContext, id: &Id, req: UpdateTaskRequest) -> AppResult<()> {
        let changes = TaskChanges::try_from(req)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "update task", e))?;

        self.tasks
            .update(ctx, id, changes)
            .await
            .inspect_err(|e| log_failure(ctx, "update task", e))
    }

    pub async fn delete_task(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        self.tasks
            .delete(ctx, id)
            .await
            .inspect_err(|e| log_failure(ctx, "delete task", e))
    }

    pub async fn list_tasks(&self, ctx: &RequestContext) -> AppResult<Vec<TaskResponse>> {
        let tasks = self
            .tasks
            .list(ctx)
            .await
            .inspect_err(|e| log_failure(ctx, "list tasks", e))?;

        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    pub async fn search_tasks(&self, ctx: &RequestContext, filter: &str, value: &str) -> AppResult<Vec<TaskResponse>> {
        let (filter, value) = validate_search::<TaskFilter>(filter, value)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "search tasks", e))?;

        self.find_tasks(ctx, filter, value, "search tasks").await
    }

    /// Tasks authored by an existing user.
    pub async fn list_user_tasks(&self, ctx: &RequestContext, user_id: &Id) -> AppResult<Vec<TaskResponse>> {
        self.users
            .get(ctx, user_id)
            .await
            .inspect_err(|e| log_failure(ctx, "list user tasks", e))?;

        self.find_tasks(ctx, TaskFilter::AuthorId, user_id.as_str(), "list user tasks")
            .await
    }

    /// Tasks belonging to an existing project.
    pub async fn list_project_tasks(&self, ctx: &RequestContext, project_id: &Id) -> AppResult<Vec<TaskResponse>> {
        self.projects
            .get(ctx, project_id)
            .await
            .inspect_err(|e| log_failure(ctx, "list project tasks", e))?;

        self.find_tasks(ctx, TaskFilter::ProjectId, project_id.as_str(), "list project tasks")
            .await
    }

    async fn find_tasks(
        &self,
        ctx: &RequestContext,
        filter: TaskFilter,
        value: &str,
        action: &str,
    ) -> AppResult<Vec<TaskResponse>> {
        tracing::debug!(parent: ctx.span(), filter = filter.as_str(), "searching tasks");
        let tasks = self
            .tasks
            .search(ctx, filter, value)
            .await
            .inspect_err(|e| log_failure(ctx, action, e))?;

        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }
}
