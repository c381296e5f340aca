//! Project repository: contract and SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::contains_pattern;
use super::entities::project::{self, ActiveModel, Entity as ProjectEntity};
use crate::context::RequestContext;
use common::{AppError, AppResult, OptionExt};
use domain::{Id, MatchMode, Project, ProjectChanges, ProjectFilter, Resource, SearchFilter, PROJECT_CREATED};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Project repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, ctx: &RequestContext, project: Project) -> AppResult<(String, Project)>;

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<Project>;

    /// Overwrite the supplied fields; `started_at` is never touched
    async fn update(&self, ctx: &RequestContext, id: &Id, changes: ProjectChanges) -> AppResult<()>;

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()>;

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Project>>;

    async fn search(&self, ctx: &RequestContext, filter: ProjectFilter, value: &str) -> AppResult<Vec<Project>>;
}

/// Concrete implementation of ProjectRepository
pub struct ProjectStore {
    db: DatabaseConnection,
}

impl ProjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(filter: ProjectFilter) -> project::Column {
    match filter {
        ProjectFilter::Title => project::Column::Title,
        ProjectFilter::ManagerId => project::Column::ManagerId,
    }
}

fn into_projects(models: Vec<project::Model>) -> AppResult<Vec<Project>> {
    models.into_iter().map(Project::try_from).collect()
}

#[async_trait]
impl ProjectRepository for ProjectStore {
    async fn create(&self, ctx: &RequestContext, project: Project) -> AppResult<(String, Project)> {
        let active_model = ActiveModel::from(project);
        let model = ctx
            .guard(async { active_model.insert(&self.db).await.map_err(AppError::from) })
            .await?;

        Ok((PROJECT_CREATED.to_string(), Project::try_from(model)?))
    }

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<Project> {
        let model = ctx
            .guard(async {
                ProjectEntity::find_by_id(id.as_str())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?
            .ok_or_not_found(Resource::Project)?;

        Project::try_from(model)
    }

    async fn update(&self, ctx: &RequestContext, id: &Id, changes: ProjectChanges) -> AppResult<()> {
        let existing = ctx
            .guard(async {
                ProjectEntity::find_by_id(id.as_str())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?
            .ok_or_not_found(Resource::Project)?;

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
        if let Some(manager_id) = changes.manager_id {
            active.manager_id = Set(manager_id.into_inner());
        }
        if let Some(finished_at) = changes.finished_at {
            active.finished_at = Set(finished_at.into());
        }

        ctx.guard(async { active.update(&self.db).await.map_err(AppError::from) })
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        let result = ctx
            .guard(async {
                ProjectEntity::delete_by_id(id.as_str())
                    .exec(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(Resource::Project));
        }

        Ok(())
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Project>> {
        let models = ctx
            .guard(async {
                ProjectEntity::find()
                    .order_by_asc(project::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        into_projects(models)
    }

    async fn search(&self, ctx: &RequestContext, filter: ProjectFilter, value: &str) -> AppResult<Vec<Project>> {
        let condition = match filter.match_mode() {
            MatchMode::Contains => column(filter).like(contains_pattern(value)),
            MatchMode::Exact => column(filter).eq(value),
        };

        let models = ctx
            .guard(async {
                ProjectEntity::find()
                    .filter(condition)
                    .order_by_asc(project::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        into_projects(models)
    }
}
