//! Task repository: contract and SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::contains_pattern;
use super::entities::task::{self, ActiveModel, Entity as TaskEntity};
use crate::context::RequestContext;
use common::{AppError, AppResult, OptionExt};
use domain::{Id, MatchMode, Resource, SearchFilter, Task, TaskChanges, TaskFilter, TASK_CREATED};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Task repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, ctx: &RequestContext, task: Task) -> AppResult<(String, Task)>;

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<Task>;

    /// Overwrite the supplied fields; `created_at` is never touched
    async fn update(&self, ctx: &RequestContext, id: &Id, changes: TaskChanges) -> AppResult<()>;

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()>;

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Task>>;

    async fn search(&self, ctx: &RequestContext, filter: TaskFilter, value: &str) -> AppResult<Vec<Task>>;
}

/// Concrete implementation of TaskRepository
pub struct TaskStore {
    db: DatabaseConnection,
}

impl TaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(filter: TaskFilter) -> task::Column {
    match filter {
        TaskFilter::Title => task::Column::Title,
        TaskFilter::Priority => task::Column::Priority,
        TaskFilter::Status => task::Column::Status,
        TaskFilter::AuthorId => task::Column::AuthorId,
        TaskFilter::ProjectId => task::Column::ProjectId,
    }
}

fn into_tasks(models: Vec<task::Model>) -> AppResult<Vec<Task>> {
    models.into_iter().map(Task::try_from).collect()
}

#[async_trait]
impl TaskRepository for TaskStore {
    async fn create(&self, ctx: &RequestContext, task: Task) -> AppResult<(String, Task)> {
        let active_model = ActiveModel::from(task);
        let model = ctx
            .guard(async { active_model.insert(&self.db).await.map_err(AppError::from) })
            .await?;

        Ok((TASK_CREATED.to_string(), Task::try_from(model)?))
    }

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<Task> {
        let model = ctx
            .guard(async {
                TaskEntity::find_by_id(id.as_str())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?
            .ok_or_not_found(Resource::Task)?;

        Task::try_from(model)
    }

    async fn update(&self, ctx: &RequestContext, id: &Id, changes: TaskChanges) -> AppResult<()> {
        let existing = ctx
            .guard(async {
                TaskEntity::find_by_id(id.as_str())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?
            .ok_or_not_found(Resource::Task)?;

        if changes.is_empty() {
            return Ok(());
        }

        let mut active: ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(priority.to_string());
        }
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        if let Some(done_at) = changes.done_at {
            active.done_at = Set(done_at.into());
        }
        if let Some(author_id) = changes.author_id {
            active.author_id = Set(author_id.into_inner());
        }
        if let Some(project_id) = changes.project_id {
            active.project_id = Set(project_id.into_inner());
        }

        ctx.guard(async { active.update(&self.db).await.map_err(AppError::from) })
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        let result = ctx
            .guard(async {
                TaskEntity::delete_by_id(id.as_str())
                    .exec(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(Resource::Task));
        }

        Ok(())
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Task>> {
        let models = ctx
            .guard(async {
                TaskEntity::find()
                    .order_by_asc(task::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        into_tasks(models)
    }

    async fn search(&self, ctx: &RequestContext, filter: TaskFilter, value: &str) -> AppResult<Vec<Task>> {
        let condition = match filter.match_mode() {
            MatchMode::Contains => column(filter).like(contains_pattern(value)),
            MatchMode::Exact => column(filter).eq(value),
        };

        let models = ctx
            .guard(async {
                TaskEntity::find()
                    .filter(condition)
                    .order_by_asc(task::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        into_tasks(models)
    }
}
