//! Repository layer for data access.
//!
//! One trait per entity; every method receives the caller's
//! [`RequestContext`](crate::context::RequestContext). Two implementations are
//! provided: SeaORM stores for PostgreSQL and in-memory stores.

pub mod entities;
mod memory;
mod project_repository;
mod task_repository;
mod user_repository;

pub use memory::{MemoryProjectStore, MemoryTaskStore, MemoryUserStore};
pub use project_repository::{ProjectRepository, ProjectStore};
pub use task_repository::{TaskRepository, TaskStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use project_repository::MockProjectRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use task_repository::MockTaskRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use sea_orm::sea_query::LikeExpr;

/// `LIKE` expression matching `value` anywhere, with wildcards in `value`
/// taken literally.
pub(crate) fn contains_pattern(value: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}
