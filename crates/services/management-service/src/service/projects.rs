//! Project use cases.

use common::{AppError, AppResult};
use domain::{
    validate_search, CreateProjectRequest, Id, Project, ProjectChanges, ProjectFilter, ProjectResponse,
    UpdateProjectRequest,
};

use super::management_service::{log_failure, ManagementService};
use crate::context::RequestContext;

impl ManagementService {
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> AppResult<(String, ProjectResponse)> {
        let project = Project::from_request(Id::generate(), req)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "create project", e))?;

        let (message, project) = self
            .projects
            .create(ctx, project)
            .await
            .inspect_err(|e| log_failure(ctx, "create project", e))?;

        tracing::info!(parent: ctx.span(), project_id = %project.id, "project created");
        Ok((message, ProjectResponse::from(project)))
    }

    pub async fn get_project(&self, ctx: &RequestContext, id: &Id) -> AppResult<ProjectResponse> {
        let project = self
            .projects
            .get(ctx, id)
            .await
            .inspect_err(|e| log_failure(ctx, "get project", e))?;

        Ok(ProjectResponse::from(project))
    }

    pub async fn update_project(&self, ctx: &RequestContext, id: &Id, req: UpdateProjectRequest) -> AppResult<()> {
        let changes = ProjectChanges::try_from(req)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "update project", e))?;

        self.projects
            .update(ctx, id, changes)
            .await
            .inspect_err(|e| log_failure(ctx, "update project", e))
    }

    pub async fn delete_project(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        self.projects
            .delete(ctx, id)
            .await
            .inspect_err(|e| log_failure(ctx, "delete project", e))
    }

    pub async fn list_projects(&self, ctx: &RequestContext) -> AppResult<Vec<ProjectResponse>> {
        let projects = self
            .projects
            .list(ctx)
            .await
            .inspect_err(|e| log_failure(ctx, "list projects", e))?;

        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }

    pub async fn search_projects(
        &self,
        ctx: &RequestContext,
        filter: &str,
        value: &str,
    ) -> AppResult<Vec<ProjectResponse>> {
        let (filter, value) = validate_search::<ProjectFilter>(filter, value)
            .map_err(AppError::from)
            .inspect_err(|e| log_failure(ctx, "search projects", e))?;

        let projects = self
            .projects
            .search(ctx, filter, value)
            .await
            .inspect_err(|e| log_failure(ctx, "search projects", e))?;

        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }
}
