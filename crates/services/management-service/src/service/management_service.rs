//! Management service - turns validated requests into stored records.
//!
//! One service covers users, tasks and projects. It owns nothing but the
//! three repository handles it was composed with; the per-entity operations
//! live in sibling modules.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use common::AppError;

use crate::context::RequestContext;
use crate::repository::{
    MemoryProjectStore, MemoryTaskStore, MemoryUserStore, ProjectRepository, ProjectStore, TaskRepository,
    TaskStore, UserRepository, UserStore,
};

/// Repository handles the service is built from. Immutable once built.
#[derive(Clone)]
pub struct ServiceConfig {
    pub users: Arc<dyn UserRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub projects: Arc<dyn ProjectRepository>,
}

impl ServiceConfig {
    /// PostgreSQL-backed repositories sharing one connection pool.
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            tasks: Arc::new(TaskStore::new(db.clone())),
            projects: Arc::new(ProjectStore::new(db)),
        }
    }

    /// Process-local repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            tasks: Arc::new(MemoryTaskStore::new()),
            projects: Arc::new(MemoryProjectStore::new()),
        }
    }
}

/// Orchestrates user, task and project use cases.
pub struct ManagementService {
    pub(super) users: Arc<dyn UserRepository>,
    pub(super) tasks: Arc<dyn TaskRepository>,
    pub(super) projects: Arc<dyn ProjectRepository>,
}

impl ManagementService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            users: config.users,
            tasks: config.tasks,
            projects: config.projects,
        }
    }
}

/// Log a failed operation on the request span. Client mistakes are warnings.
pub(super) fn log_failure(ctx: &RequestContext, action: &str, err: &AppError) {
    if err.kind().is_client_error() {
        tracing::warn!(parent: ctx.span(), error = %err, "failed to {}", action);
    } else {
        tracing::error!(parent: ctx.span(), error = %err, "failed to {}", action);
    }
}
