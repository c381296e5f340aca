//! In-memory repositories.
//!
//! Selected with `STORAGE_BACKEND=memory`. Data lives for the lifetime of the
//! process. Search semantics mirror the SQL stores: free-text filters match a
//! substring, enum and identifier filters match the whole value.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProjectRepository, TaskRepository, UserRepository};
use crate::context::RequestContext;
use common::{AppError, AppResult, OptionExt};
use domain::{
    Id, Project, ProjectChanges, ProjectFilter, Resource, SearchFilter, Task, TaskChanges, TaskFilter, User,
    UserChanges, UserFilter, PROJECT_CREATED, TASK_CREATED, USER_CREATED,
};

/// Keyed rows shared by the three stores.
struct Table<T> {
    resource: Resource,
    rows: RwLock<HashMap<Id, T>>,
}

impl<T: Clone> Table<T> {
    fn new(resource: Resource) -> Self {
        Self {
            resource,
            rows: RwLock::new(HashMap::new()),
        }
    }

    async fn insert(&self, id: Id, row: T) -> AppResult<T> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(AppError::storage(format!("duplicate {} id {}", self.resource, id)));
        }
        rows.insert(id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: &Id) -> AppResult<T> {
        self.rows.read().await.get(id).cloned().ok_or_not_found(self.resource)
    }

    async fn modify(&self, id: &Id, change: impl FnOnce(&mut T)) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_not_found(self.resource)?;
        change(row);
        Ok(())
    }

    async fn remove(&self, id: &Id) -> AppResult<()> {
        self.rows
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_not_found(self.resource)
    }

    /// Rows accepted by `keep`, ordered by id.
    async fn select(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        let mut selected: Vec<(&Id, &T)> = rows.iter().filter(|(_, row)| keep(row)).collect();
        selected.sort_by(|a, b| a.0.cmp(b.0));
        selected.into_iter().map(|(_, row)| row.clone()).collect()
    }
}

// =============================================================================
// Users
// =============================================================================

/// In-memory [`UserRepository`]
pub struct MemoryUserStore {
    table: Table<User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(Resource::User),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn user_field(user: &User, filter: UserFilter) -> &str {
    match filter {
        UserFilter::Name => &user.name,
        UserFilter::Email => &user.email,
        UserFilter::Role => user.role.as_str(),
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn create(&self, ctx: &RequestContext, user: User) -> AppResult<(String, User)> {
        let stored = ctx.guard(self.table.insert(user.id.clone(), user)).await?;
        Ok((USER_CREATED.to_string(), stored))
    }

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<User> {
        ctx.guard(self.table.get(id)).await
    }

    async fn update(&self, ctx: &RequestContext, id: &Id, changes: UserChanges) -> AppResult<()> {
        ctx.guard(self.table.modify(id, |user| user.apply(changes))).await
    }

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        ctx.guard(self.table.remove(id)).await
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        ctx.guard(async { Ok(self.table.select(|_| true).await) }).await
    }

    async fn search(&self, ctx: &RequestContext, filter: UserFilter, value: &str) -> AppResult<Vec<User>> {
        let mode = filter.match_mode();
        ctx.guard(async {
            Ok(self
                .table
                .select(|user| mode.matches(user_field(user, filter), value))
                .await)
        })
        .await
    }
}

// =============================================================================
// Tasks
// =============================================================================

/// In-memory [`TaskRepository`]
pub struct MemoryTaskStore {
    table: Table<Task>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(Resource::Task),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn task_field(task: &Task, filter: TaskFilter) -> &str {
    match filter {
        TaskFilter::Title => &task.title,
        TaskFilter::Priority => task.priority.as_str(),
        TaskFilter::Status => task.status.as_str(),
        TaskFilter::AuthorId => task.author_id.as_str(),
        TaskFilter::ProjectId => task.project_id.as_str(),
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskStore {
    async fn create(&self, ctx: &RequestContext, task: Task) -> AppResult<(String, Task)> {
        let stored = ctx.guard(self.table.insert(task.id.clone(), task)).await?;
        Ok((TASK_CREATED.to_string(), stored))
    }

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<Task> {
        ctx.guard(self.table.get(id)).await
    }

    async fn update(&self, ctx: &RequestContext, id: &Id, changes: TaskChanges) -> AppResult<()> {
        ctx.guard(self.table.modify(id, |task| task.apply(changes))).await
    }

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        ctx.guard(self.table.remove(id)).await
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Task>> {
        ctx.guard(async { Ok(self.table.select(|_| true).await) }).await
    }

    async fn search(&self, ctx: &RequestContext, filter: TaskFilter, value: &str) -> AppResult<Vec<Task>> {
        let mode = filter.match_mode();
        ctx.guard(async {
            Ok(self
                .table
                .select(|task| mode.matches(task_field(task, filter), value))
                .await)
        })
        .await
    }
}

// =============================================================================
// Projects
// =============================================================================

/// In-memory [`ProjectRepository`]
pub struct MemoryProjectStore {
    table: Table<Project>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(Resource::Project),
        }
    }
}

impl Default for MemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn project_field(project: &Project, filter: ProjectFilter) -> &str {
    match filter {
        ProjectFilter::Title => &project.title,
        ProjectFilter::ManagerId => project.manager_id.as_str(),
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectStore {
    async fn create(&self, ctx: &RequestContext, project: Project) -> AppResult<(String, Project)> {
        let stored = ctx.guard(self.table.insert(project.id.clone(), project)).await?;
        Ok((PROJECT_CREATED.to_string(), stored))
    }

    async fn get(&self, ctx: &RequestContext, id: &Id) -> AppResult<Project> {
        ctx.guard(self.table.get(id)).await
    }

    async fn update(&self, ctx: &RequestContext, id: &Id, changes: ProjectChanges) -> AppResult<()> {
        ctx.guard(self.table.modify(id, |project| project.apply(changes))).await
    }

    async fn delete(&self, ctx: &RequestContext, id: &Id) -> AppResult<()> {
        ctx.guard(self.table.remove(id)).await
    }

    async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Project>> {
        ctx.guard(async { Ok(self.table.select(|_| true).await) }).await
    }

    async fn search(&self, ctx: &RequestContext, filter: ProjectFilter, value: &str) -> AppResult<Vec<Project>> {
        let mode = filter.match_mode();
        ctx.guard(async {
            Ok(self
                .table
                .select(|project| mode.matches(project_field(project, filter), value))
                .await)
        })
        .await
    }
}
